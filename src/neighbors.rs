//! Spatial lookup of nearby slot centers.

use crate::float_types::{Real, EPSILON};
use hashbrown::HashMap;
use nalgebra::Point2;

/// Uniform bucket grid over a fixed set of points.
///
/// The cell size should be at least the largest query radius so that a query
/// touches only the 3 × 3 block of cells around the query point.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    cell: Real,
    points: Vec<Point2<Real>>,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl NeighborIndex {
    pub fn new(points: &[Point2<Real>], cell: Real) -> Self {
        let cell = if cell.is_finite() && cell > EPSILON { cell } else { 1.0 };
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            buckets.entry(Self::key(cell, p)).or_default().push(i);
        }
        NeighborIndex {
            cell,
            points: points.to_vec(),
            buckets,
        }
    }

    fn key(cell: Real, p: &Point2<Real>) -> (i64, i64) {
        ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indices of points strictly closer than `radius` to `center`, excluding
    /// points that coincide with it. Sorted ascending.
    pub fn within(&self, center: &Point2<Real>, radius: Real) -> Vec<usize> {
        let reach = (radius / self.cell).ceil().max(1.0) as i64;
        let (cx, cy) = Self::key(self.cell, center);
        let mut found: Vec<usize> = Vec::new();

        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let Some(bucket) = self.buckets.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                found.extend(bucket.iter().copied().filter(|&i| {
                    let d = (self.points[i] - center).norm();
                    d > EPSILON && d < radius
                }));
            }
        }
        found.sort_unstable();
        found
    }

    /// Positions of the points returned by [`NeighborIndex::within`].
    pub fn neighbors_of(&self, center: &Point2<Real>, radius: Real) -> Vec<Point2<Real>> {
        self.within(center, radius)
            .into_iter()
            .map(|i| self.points[i])
            .collect()
    }
}
