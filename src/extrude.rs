//! Linear extrusion of `geo` profiles into closed solids along +Z.

use crate::csg::CSG;
use crate::float_types::{Real, EPSILON};
use crate::polygon::Polygon;
use crate::shapes2d::dedup_coords;
use geo::orient::{Direction, Orient};
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::Point3;

/// Open ring coordinates with duplicates removed.
fn ring_coords(ring: &LineString<Real>) -> Vec<Coord<Real>> {
    dedup_coords(ring.0.clone())
}

/// Twice the signed area of an open ring; positive for counter-clockwise.
fn signed_area2(coords: &[Coord<Real>]) -> Real {
    let n = coords.len();
    (0..n)
        .map(|i| {
            let (a, b) = (coords[i], coords[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// True when no turn of the open counter-clockwise ring goes clockwise.
fn is_convex_ccw(coords: &[Coord<Real>]) -> bool {
    let n = coords.len();
    (0..n).all(|i| {
        let (a, b, c) = (coords[i], coords[(i + 1) % n], coords[(i + 2) % n]);
        (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x) >= -EPSILON
    })
}

fn lift(c: &Coord<Real>, z: Real) -> Point3<Real> {
    Point3::new(c.x, c.y, z)
}

/// Counter-clockwise cap pieces of a profile: the profile itself when it is
/// convex and has no holes, otherwise its ear-cut triangles.
fn cap_loops(profile: &GeoPolygon<Real>) -> Vec<Vec<Coord<Real>>> {
    let exterior = ring_coords(profile.exterior());
    if profile.interiors().is_empty() && is_convex_ccw(&exterior) {
        return vec![exterior];
    }

    let raw = profile.earcut_triangles_raw();
    raw.triangle_indices
        .chunks_exact(3)
        .map(|tri| {
            let mut pts: Vec<Coord<Real>> = tri
                .iter()
                .map(|&idx| Coord {
                    x: raw.vertices[idx * 2],
                    y: raw.vertices[idx * 2 + 1],
                })
                .collect();
            if signed_area2(&pts) < 0.0 {
                pts.reverse();
            }
            pts
        })
        .collect()
}

/// Extrude a single profile from `z0` to `z0 + height`.
///
/// The bottom cap faces −Z, the top cap faces +Z and side walls face away
/// from the material, for the exterior as well as for every hole.
pub fn extrude<S: Clone>(
    profile: &GeoPolygon<Real>,
    z0: Real,
    height: Real,
    metadata: Option<S>,
) -> CSG<S> {
    if height <= EPSILON {
        return CSG::new();
    }
    let profile = profile.orient(Direction::Default);
    let z1 = z0 + height;
    let mut polygons: Vec<Polygon<S>> = Vec::new();

    for cap in cap_loops(&profile) {
        let top: Vec<Point3<Real>> = cap.iter().map(|c| lift(c, z1)).collect();
        let bottom: Vec<Point3<Real>> = cap.iter().rev().map(|c| lift(c, z0)).collect();
        polygons.extend(Polygon::from_positions(&top, metadata.clone()));
        polygons.extend(Polygon::from_positions(&bottom, metadata.clone()));
    }

    // Exterior is CCW and holes CW, so [a0, b0, b1, a1] always faces outward.
    for ring in std::iter::once(profile.exterior()).chain(profile.interiors()) {
        let coords = ring_coords(ring);
        let n = coords.len();
        if n < 3 {
            continue;
        }
        for i in 0..n {
            let (a, b) = (&coords[i], &coords[(i + 1) % n]);
            let quad = [lift(a, z0), lift(b, z0), lift(b, z1), lift(a, z1)];
            polygons.extend(Polygon::from_positions(&quad, metadata.clone()));
        }
    }

    CSG::from_polygons(polygons)
}
