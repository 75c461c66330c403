//! Rim segmentation.
//!
//! A slot's rim is only built along the arcs that no neighbouring slot
//! shadows, so rims of touching slots never overlap.

use crate::csg::CSG;
use crate::extrude::extrude;
use crate::float_types::{Real, EPSILON, TAU};
use crate::shapes2d;
use nalgebra::{Point2, Vector3};

/// A counter-clockwise angular interval in radians, `start <= end`, within
/// `[0, 2π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: Real,
    pub end: Real,
}

impl Arc {
    pub const FULL: Arc = Arc {
        start: 0.0,
        end: TAU,
    };

    #[inline]
    pub fn span(&self) -> Real {
        self.end - self.start
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.span() >= TAU - EPSILON
    }

    /// Whether `angle` (any branch) falls on this arc.
    pub fn contains(&self, angle: Real) -> bool {
        let a = angle.rem_euclid(TAU);
        (a >= self.start - EPSILON && a <= self.end + EPSILON)
            || (self.end >= TAU - EPSILON && a <= EPSILON)
    }
}

/// Half-angle of the rim arc around `center` that a neighbour at distance
/// `d` shadows, or `None` when it shadows nothing.
pub fn shadow_half_angle(d: Real, inset_radius: Real, outer_radius: Real) -> Option<Real> {
    if !(d > 0.0 && d < 2.0 * outer_radius) {
        return None;
    }
    let cos = (d * d + 2.0 * inset_radius * inset_radius - 4.0 * outer_radius * outer_radius)
        / (2.0 * d * inset_radius);
    let half = cos.acos();
    (!half.is_nan()).then_some(half)
}

/// Shadowed intervals, normalised into `[0, 2π]` with wrapping intervals
/// split in two.
fn shadow_intervals(
    center: &Point2<Real>,
    inset_radius: Real,
    outer_radius: Real,
    neighbors: &[Point2<Real>],
) -> Vec<Arc> {
    let mut intervals = Vec::new();
    for other in neighbors {
        let delta = other - center;
        let Some(half) = shadow_half_angle(delta.norm(), inset_radius, outer_radius) else {
            continue;
        };
        if half >= 0.5 * TAU - EPSILON {
            intervals.push(Arc::FULL);
            continue;
        }
        let start = (delta.y.atan2(delta.x) - half).rem_euclid(TAU);
        let end = start + 2.0 * half;
        if end > TAU {
            intervals.push(Arc { start, end: TAU });
            intervals.push(Arc {
                start: 0.0,
                end: end - TAU,
            });
        } else {
            intervals.push(Arc { start, end });
        }
    }
    intervals
}

/// Arcs of the rim around `center` that no neighbour shadows.
///
/// With no neighbour closer than `2 * outer_radius` the result is the single
/// arc `[0, 2π]`.
pub fn free_arcs(
    center: &Point2<Real>,
    inset_radius: Real,
    outer_radius: Real,
    neighbors: &[Point2<Real>],
) -> Vec<Arc> {
    let mut shadows = shadow_intervals(center, inset_radius, outer_radius, neighbors);
    shadows.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Arc> = Vec::with_capacity(shadows.len());
    for range in shadows {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }

    let mut free = Vec::with_capacity(merged.len() + 1);
    let mut last_end: Real = 0.0;
    for range in &merged {
        if range.start > last_end + EPSILON {
            free.push(Arc {
                start: last_end,
                end: range.start,
            });
        }
        last_end = last_end.max(range.end);
    }
    if last_end < TAU - EPSILON {
        free.push(Arc {
            start: last_end,
            end: TAU,
        });
    }
    free
}

/// Segments needed for `arc` so a full circle would get `segments`.
pub fn arc_segments(arc: &Arc, segments: usize) -> usize {
    ((segments as Real * arc.span() / TAU).ceil() as usize).max(1)
}

/// Extrude one rim solid per arc between `inset_radius` and `outer_radius`,
/// from Z = 0 to `height`, positioned at `center`.
pub fn rim_solids<S: Clone>(
    arcs: &[Arc],
    center: &Point2<Real>,
    inset_radius: Real,
    outer_radius: Real,
    height: Real,
    segments: usize,
    metadata: Option<S>,
) -> Vec<CSG<S>> {
    let offset = Vector3::new(center.x, center.y, 0.0);
    arcs.iter()
        .filter(|arc| arc.span() > EPSILON)
        .map(|arc| {
            let profile = if arc.is_full() {
                shapes2d::ring(inset_radius, outer_radius, segments)
            } else {
                shapes2d::annular_sector(
                    inset_radius,
                    outer_radius,
                    arc.start,
                    arc.end,
                    arc_segments(arc, segments),
                )
            };
            extrude(&profile, 0.0, height, metadata.clone()).translate(offset)
        })
        .filter(|solid| !solid.is_empty())
        .collect()
}
