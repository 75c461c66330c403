//! Property-based tests for slot placement and rim segmentation.

use approx::assert_relative_eq;
use proptest::prelude::*;

use movetray::border::shadow_half_angle;
use movetray::placement::effective_cols;
use movetray::{
    free_arcs, intersects_ellipse, place_slots, NeighborIndex, SceneConfig, SupportMode,
    SupportSlot,
};
use nalgebra::Point2;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Inset diameter, rim thickness and gap of a plausible tray.
fn arb_slot_size() -> impl Strategy<Value = (f64, f64, f64)> {
    (10.0f64..60.0, 0.5f64..5.0, 0.0f64..3.0)
}

fn arb_grid() -> impl Strategy<Value = (usize, usize, bool, bool)> {
    (1usize..7, 1usize..7, any::<bool>(), any::<bool>())
}

/// Support length and width, length first.
fn arb_support() -> impl Strategy<Value = (f64, f64)> {
    (20.0f64..120.0, 10.0f64..80.0)
}

fn arb_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..40)
}

const TAU: f64 = std::f64::consts::TAU;

// ---------------------------------------------------------------------------
// 1. Grid placement yields the effective column count of every row
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn grid_slot_count(
        (rows, cols, stagger, stray_slot_removal) in arb_grid(),
        (inset_diameter, edge_thickness, gap) in arb_slot_size(),
    ) {
        let config = SceneConfig {
            rows,
            cols,
            stagger,
            stray_slot_removal,
            inset_diameter,
            edge_thickness,
            gap,
            ..SceneConfig::default()
        };
        let layout = place_slots(&config);
        let expected: usize = (0..rows).map(|row| effective_cols(&config, row)).sum();
        prop_assert_eq!(layout.slots.len(), expected);
        prop_assert_eq!(layout.requested, expected);
        prop_assert!(!layout.is_under_capacity());
        prop_assert!(layout.slots.iter().all(|s| s.position.x.is_finite() && s.position.y.is_finite()));
    }
}

// ---------------------------------------------------------------------------
// 2. Radial placement never overlaps slots or the support
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn radial_slots_clear_each_other_and_support(
        (inset_diameter, edge_thickness, _gap) in arb_slot_size(),
        (length, width) in arb_support(),
        count in 1usize..30,
        oval in any::<bool>(),
    ) {
        let config = SceneConfig {
            inset_diameter,
            edge_thickness,
            segments: 16,
            support_slot: SupportSlot {
                enabled: true,
                mode: if oval { SupportMode::Oval } else { SupportMode::Circle },
                length,
                width,
                count,
            },
            ..SceneConfig::default()
        };
        let layout = place_slots(&config);
        let r = config.inset_radius();
        let outer = config.outer_radius();
        let origin = Point2::origin();
        // The angle walk keeps inset-to-outer clearance; the oval ring only
        // keeps insets apart.
        let spacing = if oval { 2.0 * r } else { r + outer };

        prop_assert!(layout.achieved() <= count);
        prop_assert!(layout.achieved() >= 1);
        for (i, a) in layout.slots.iter().enumerate() {
            prop_assert!(!intersects_ellipse(&a.position, &origin, outer, length, width));
            for b in &layout.slots[i + 1..] {
                let d = (a.position - b.position).norm();
                prop_assert!(d >= spacing - 1e-9, "slots {} apart", d);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Free arcs are sorted, disjoint and avoid every shadowing neighbour
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn free_arcs_avoid_neighbours(
        points in arb_points(),
        (inset_diameter, edge_thickness, _gap) in arb_slot_size(),
    ) {
        let (r, outer) = (0.5 * inset_diameter, 0.5 * inset_diameter + edge_thickness);
        let center = Point2::new(0.0, 0.0);
        let neighbors: Vec<Point2<f64>> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let arcs = free_arcs(&center, r, outer, &neighbors);

        let mut last_end = 0.0;
        for arc in &arcs {
            prop_assert!(arc.start >= last_end - 1e-9);
            prop_assert!(arc.end > arc.start);
            prop_assert!(arc.end <= TAU + 1e-9);
            last_end = arc.end;
        }

        for p in &neighbors {
            let delta = p - center;
            if shadow_half_angle(delta.norm(), r, outer).is_some() {
                let bearing = delta.y.atan2(delta.x);
                prop_assert!(!arcs.iter().any(|arc| arc.contains(bearing)));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Neighbour index agrees with a linear scan
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn neighbor_index_matches_linear_scan(
        points in arb_points(),
        cell in 1.0f64..50.0,
        radius in 0.0f64..80.0,
    ) {
        let points: Vec<Point2<f64>> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let index = NeighborIndex::new(&points, cell);
        for center in &points {
            let expected: Vec<usize> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    let d = (*p - center).norm();
                    d > 1e-5 && d < radius
                })
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(index.within(center, radius), expected);
        }
    }
}

#[test]
fn default_oval_ring_radius() {
    let config = SceneConfig {
        support_slot: SupportSlot {
            enabled: true,
            ..SupportSlot::default()
        },
        ..SceneConfig::default()
    };
    let layout = place_slots(&config);
    let first = &layout.slots[0];
    assert_relative_eq!(first.position.x, 30.0 + 14.5 + 2.0, epsilon = 1e-9);
    assert_relative_eq!(first.position.y, 0.0, epsilon = 1e-9);
}
