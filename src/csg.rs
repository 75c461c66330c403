//! Boolean solids built from convex polygons, combined through BSP trees.
//!
//! ```rust
//! use movetray::{shapes3d, CSG};
//!
//! let block: CSG<()> = shapes3d::cuboid(10.0, 10.0, 2.0, None);
//! let hole = shapes3d::cylinder(2.0, -1.0, 4.0, 16, None);
//! let drilled = block.subtract(&hole);
//! assert!(drilled.polygons.len() > block.polygons.len());
//! ```

use crate::bsp::Node;
use crate::errors::BooleanError;
use crate::float_types::{Real, EPSILON};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use hashbrown::HashMap;
use nalgebra::{Matrix4, Point3, Translation3, Vector3};
use parry3d_f64::bounding_volume::Aabb;

/// The main CSG solid structure. Contains a list of polygons.
#[derive(Debug, Clone)]
pub struct CSG<S: Clone> {
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone> Default for CSG<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> CSG<S> {
    /// Create an empty CSG
    pub fn new() -> Self {
        CSG {
            polygons: Vec::new(),
        }
    }

    /// Build a CSG from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        CSG { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// CSG union: this ∪ other
    pub fn union(&self, other: &CSG<S>) -> CSG<S> {
        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        CSG::from_polygons(a.all_polygons())
    }

    /// CSG subtract: this \ other
    pub fn subtract(&self, other: &CSG<S>) -> CSG<S> {
        // Nothing to carve from, or nothing to carve with.
        if self.polygons.is_empty() || other.polygons.is_empty() {
            return self.clone();
        }

        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        CSG::from_polygons(a.all_polygons())
    }

    /// Subtract, reporting non-finite input or output instead of returning a
    /// silently broken mesh.
    pub fn try_subtract(&self, other: &CSG<S>) -> Result<CSG<S>, BooleanError> {
        if !self.is_finite() {
            return Err(BooleanError::NonFiniteOperand("minuend"));
        }
        if !other.is_finite() {
            return Err(BooleanError::NonFiniteOperand("subtrahend"));
        }
        let result = self.subtract(other);
        if !result.is_finite() {
            return Err(BooleanError::NonFiniteResult);
        }
        Ok(result)
    }

    /// CSG intersect: this ∩ other
    pub fn intersect(&self, other: &CSG<S>) -> CSG<S> {
        let mut a = Node::new(&self.polygons);
        let mut b = Node::new(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        CSG::from_polygons(a.all_polygons())
    }

    /// Invert this CSG (flip inside vs. outside)
    pub fn inverse(&self) -> CSG<S> {
        let mut csg = self.clone();
        for p in &mut csg.polygons {
            p.flip();
        }
        csg
    }

    /// Transform all vertices in this CSG by a given 4×4 matrix.
    pub fn transform(&self, mat: &Matrix4<Real>) -> CSG<S> {
        CSG::from_polygons(self.polygons.iter().map(|p| p.transform(mat)).collect())
    }

    pub fn translate(&self, v: Vector3<Real>) -> CSG<S> {
        self.transform(&Translation3::from(v).to_homogeneous())
    }

    /// Returns a `parry3d::bounding_volume::Aabb`.
    pub fn bounding_box(&self) -> Aabb {
        let all_points: Vec<Point3<Real>> = self
            .polygons
            .iter()
            .flat_map(|p| p.vertices.iter().map(|v| v.pos))
            .collect();

        if all_points.is_empty() {
            return Aabb::new_invalid();
        }
        Aabb::from_points(&all_points)
    }

    /// Helper to collect all vertices from the CSG.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Number of triangles after fan triangulation of every polygon.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    pub fn is_finite(&self) -> bool {
        self.polygons.iter().all(Polygon::is_finite)
    }

    /// Checks that every triangle edge is shared by exactly two triangles.
    ///
    /// Boolean results may contain T-junctions where split edges meet whole
    /// ones, so this is only exact for meshes that were built directly.
    pub fn is_manifold(&self) -> bool {
        // Quantize so nearly equal points share a key.
        fn point_key(p: &Point3<Real>) -> (i64, i64, i64) {
            let q = |v: Real| (v / EPSILON).round() as i64;
            (q(p.x), q(p.y), q(p.z))
        }

        let mut edge_counts: HashMap<((i64, i64, i64), (i64, i64, i64)), u32> = HashMap::new();

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                    let a = point_key(&tri[i0].pos);
                    let b = point_key(&tri[i1].pos);
                    let key = if a < b { (a, b) } else { (b, a) };
                    *edge_counts.entry(key).or_insert(0) += 1;
                }
            }
        }

        edge_counts.values().all(|&count| count == 2)
    }
}
