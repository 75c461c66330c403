//! Base plate: a thin slab joining all slots, with every slot's outer outline
//! and the bordered support footprint cut out of it.

use crate::config::{SceneConfig, SupportMode};
use crate::csg::CSG;
use crate::errors::BooleanError;
use crate::extrude::extrude;
use crate::float_types::{Real, ELLIPSE_SEGMENTS, EPSILON};
use crate::placement::{effective_cols, Slot};
use crate::shapes2d;
use crate::shapes3d::elliptic_prism;
use crate::slot_body::{Part, SlotSpec, CUTTER_OVERSHOOT};
use geo::{Area, Coord, LineString, Polygon as GeoPolygon};
use hashbrown::HashMap;
use nalgebra::{Point2, Vector3};
use tracing::debug;

/// Thickness of the base plate, independent of the slot bodies.
pub const BASE_PLATE_DEPTH: Real = 2.0;

/// Outline the plate was extruded from.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseFootprint {
    /// Closed path through boundary slot centers.
    Polygon(Vec<Point2<Real>>),
    /// Box over all slot centers, used when the path encloses no area.
    BoundingBox { min: Point2<Real>, max: Point2<Real> },
}

#[derive(Debug, Clone)]
pub struct BasePlate {
    pub footprint: BaseFootprint,
    pub solid: CSG<Part>,
}

/// Slot centers along the tray boundary, in walking order.
///
/// Grids are walked along the top row, down the right edge, back along the
/// bottom row and up the left edge. Radial layouts use every slot in
/// placement order, preceded by the origin in the circle walk.
pub fn perimeter_path(slots: &[Slot], config: &SceneConfig) -> Vec<Point2<Real>> {
    let mut path: Vec<Point2<Real>> = Vec::new();

    if config.support_slot.enabled {
        if config.support_slot.mode == SupportMode::Circle {
            path.push(Point2::origin());
        }
        path.extend(slots.iter().map(|s| s.position));
    } else if config.rows > 0 {
        let by_cell: HashMap<(usize, usize), Point2<Real>> =
            slots.iter().map(|s| ((s.row, s.col), s.position)).collect();
        let mut visit = |row: usize, col: isize| {
            if col < 0 {
                return;
            }
            if let Some(p) = by_cell.get(&(row, col as usize)) {
                path.push(*p);
            }
        };
        let last_col = |row: usize| effective_cols(config, row) as isize - 1;
        let bottom = config.rows - 1;

        for c in 0..=last_col(0) {
            visit(0, c);
        }
        for r in 1..config.rows {
            visit(r, last_col(r));
        }
        for c in (0..last_col(bottom)).rev() {
            visit(bottom, c);
        }
        for r in (1..bottom).rev() {
            visit(r, 0);
        }
    }

    dedup_points(path)
}

/// Drop consecutive repeats, including a last point equal to the first.
fn dedup_points(points: Vec<Point2<Real>>) -> Vec<Point2<Real>> {
    let coords = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    shapes2d::dedup_coords(coords)
        .into_iter()
        .map(|c| Point2::new(c.x, c.y))
        .collect()
}

fn path_profile(path: &[Point2<Real>]) -> GeoPolygon<Real> {
    let ring: LineString<Real> = path.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(ring, vec![])
}

/// Footprint for a boundary path, falling back to the box over `slots`.
pub fn footprint(path: Vec<Point2<Real>>, slots: &[Slot]) -> BaseFootprint {
    if path.len() > 2 && path_profile(&path).unsigned_area() >= EPSILON {
        return BaseFootprint::Polygon(path);
    }
    let (min, max) = slots.iter().fold(
        (
            Point2::new(Real::INFINITY, Real::INFINITY),
            Point2::new(Real::NEG_INFINITY, Real::NEG_INFINITY),
        ),
        |(lo, hi), s| (lo.inf(&s.position), hi.sup(&s.position)),
    );
    BaseFootprint::BoundingBox { min, max }
}

impl BaseFootprint {
    /// The footprint extruded from Z = 0 to `depth`. A box of no extent gives
    /// an empty solid.
    pub fn extrude(&self, depth: Real) -> CSG<Part> {
        match self {
            BaseFootprint::Polygon(path) => {
                extrude(&path_profile(path), 0.0, depth, Some(Part::BasePlate))
            }
            BaseFootprint::BoundingBox { min, max } => {
                let size = max - min;
                if !(size.x >= EPSILON && size.y >= EPSILON) {
                    return CSG::new();
                }
                let center = min + 0.5 * size;
                extrude(
                    &shapes2d::rectangle(size.x, size.y),
                    0.0,
                    depth,
                    Some(Part::BasePlate),
                )
                .translate(Vector3::new(center.x, center.y, 0.0))
            }
        }
    }
}

/// Build the base plate for `slots`.
pub fn build_base(slots: &[Slot], config: &SceneConfig) -> Result<BasePlate, BooleanError> {
    let depth = BASE_PLATE_DEPTH;
    let footprint = footprint(perimeter_path(slots, config), slots);
    let mut solid = footprint.extrude(depth);

    if !solid.is_empty() {
        let spec = SlotSpec::from_config(config);
        for slot in slots {
            solid = solid.try_subtract(&spec.base_cutter(slot, -0.5 * depth, 2.0 * depth))?;
        }

        if config.support_slot.enabled {
            let border = config.edge_thickness;
            let cutter = elliptic_prism(
                0.5 * config.support_slot.length + border,
                0.5 * config.support_slot.width + border,
                -CUTTER_OVERSHOOT,
                depth + 2.0 * CUTTER_OVERSHOOT,
                ELLIPSE_SEGMENTS,
                Some(Part::BasePlate),
            );
            solid = solid.try_subtract(&cutter)?;
        }
    }

    debug!(
        polygons = solid.polygons.len(),
        fallback = matches!(footprint, BaseFootprint::BoundingBox { .. }),
        "built base plate"
    );
    Ok(BasePlate { footprint, solid })
}
