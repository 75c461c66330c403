//! Planar profiles in the XY plane, expressed as `geo` polygons.
//!
//! Profiles are centered on the origin; callers position the extruded solid.
//! Exterior rings are produced counter-clockwise and holes clockwise.

use crate::float_types::{Real, EPSILON, MIN_SEGMENTS, TAU};
use geo::{Coord, LineString, Polygon as GeoPolygon};

/// Points on an ellipse with semi-axes `a` (X) and `b` (Y), counter-clockwise
/// from angle 0. The ring is left open.
fn ellipse_points(a: Real, b: Real, segments: usize) -> Vec<Coord<Real>> {
    let segments = segments.max(MIN_SEGMENTS);
    (0..segments)
        .map(|i| {
            let th = TAU * (i as Real) / (segments as Real);
            Coord {
                x: a * th.cos(),
                y: b * th.sin(),
            }
        })
        .collect()
}

/// Close an open ring by repeating its first coordinate.
fn closed(mut coords: Vec<Coord<Real>>) -> LineString<Real> {
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::new(coords)
}

/// A circle of `radius`, approximated by `segments` edges.
pub fn circle(radius: Real, segments: usize) -> GeoPolygon<Real> {
    ellipse(radius, radius, segments)
}

/// An axis-aligned ellipse with semi-axes `a` along X and `b` along Y.
pub fn ellipse(a: Real, b: Real, segments: usize) -> GeoPolygon<Real> {
    GeoPolygon::new(closed(ellipse_points(a, b, segments)), vec![])
}

/// A square of side `size` centered on the origin.
pub fn square(size: Real) -> GeoPolygon<Real> {
    rectangle(size, size)
}

/// A `width` × `length` rectangle centered on the origin.
pub fn rectangle(width: Real, length: Real) -> GeoPolygon<Real> {
    let (hx, hy) = (0.5 * width, 0.5 * length);
    polygon(&[[-hx, -hy], [hx, -hy], [hx, hy], [-hx, hy]])
}

/// A closed polygon through `points`. Consecutive duplicates are dropped.
pub fn polygon(points: &[[Real; 2]]) -> GeoPolygon<Real> {
    let coords: Vec<Coord<Real>> = points.iter().map(|&[x, y]| Coord { x, y }).collect();
    GeoPolygon::new(closed(dedup_coords(coords)), vec![])
}

/// Annulus between `inner` and `outer` radius.
pub fn ring(inner: Real, outer: Real, segments: usize) -> GeoPolygon<Real> {
    elliptic_ring((inner, inner), (outer, outer), segments)
}

/// Region between two concentric ellipses, given as `(a, b)` semi-axes.
pub fn elliptic_ring(
    inner: (Real, Real),
    outer: (Real, Real),
    segments: usize,
) -> GeoPolygon<Real> {
    let exterior = closed(ellipse_points(outer.0, outer.1, segments));
    if inner.0 <= EPSILON || inner.1 <= EPSILON {
        return GeoPolygon::new(exterior, vec![]);
    }
    let mut hole = ellipse_points(inner.0, inner.1, segments);
    hole.reverse();
    GeoPolygon::new(exterior, vec![closed(hole)])
}

/// The part of an annulus between angles `start` and `end` (radians,
/// counter-clockwise, `end > start`). Spans of a full turn or more give the
/// whole ring.
pub fn annular_sector(
    inner: Real,
    outer: Real,
    start: Real,
    end: Real,
    segments: usize,
) -> GeoPolygon<Real> {
    let sweep = end - start;
    if sweep >= TAU - EPSILON {
        return ring(inner, outer, segments);
    }
    let segments = segments.max(1);

    let mut coords = Vec::with_capacity(2 * (segments + 1));
    for i in 0..=segments {
        let th = start + sweep * (i as Real) / (segments as Real);
        coords.push(Coord {
            x: outer * th.cos(),
            y: outer * th.sin(),
        });
    }
    for i in (0..=segments).rev() {
        let th = start + sweep * (i as Real) / (segments as Real);
        coords.push(Coord {
            x: inner * th.cos(),
            y: inner * th.sin(),
        });
    }
    GeoPolygon::new(closed(coords), vec![])
}

/// Drop consecutive coordinates closer than `EPSILON`, including a trailing
/// copy of the first one.
pub fn dedup_coords(coords: Vec<Coord<Real>>) -> Vec<Coord<Real>> {
    let near = |a: &Coord<Real>, b: &Coord<Real>| (a.x - b.x).hypot(a.y - b.y) < EPSILON;
    let mut out: Vec<Coord<Real>> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().map_or(true, |last| !near(last, &c)) {
            out.push(c);
        }
    }
    while out.len() > 1 && near(&out[0], &out[out.len() - 1]) {
        out.pop();
    }
    out
}

/// Square frame between a centered square of side `inner` and one of side
/// `outer`.
pub fn square_ring(inner: Real, outer: Real) -> GeoPolygon<Real> {
    let exterior = rectangle(outer, outer).exterior().clone();
    if inner <= EPSILON {
        return GeoPolygon::new(exterior, vec![]);
    }
    let mut hole: Vec<Coord<Real>> = dedup_coords(rectangle(inner, inner).exterior().0.clone());
    hole.reverse();
    GeoPolygon::new(exterior, vec![closed(hole)])
}
