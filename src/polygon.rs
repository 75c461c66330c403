use crate::float_types::{Real, EPSILON};
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector3};

/// A convex planar polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices
    ///
    /// Panics if the loop has fewer than three vertices or no area; use
    /// [`Polygon::try_new`] when the input may be degenerate.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "Polygon::new requires at least 3 vertices");
        match Self::try_new(vertices, metadata) {
            Some(polygon) => polygon,
            None => panic!("Polygon::new requires a loop with non-zero area"),
        }
    }

    /// Create a polygon from vertices, or `None` for a degenerate loop.
    pub fn try_new(vertices: Vec<Vertex>, metadata: Option<S>) -> Option<Self> {
        let plane = Plane::from_vertices(&vertices)?;
        Some(Polygon {
            vertices,
            plane,
            metadata,
        })
    }

    /// Create a polygon that is known to lie in `plane` (e.g. a split piece).
    pub fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Build a flat-shaded polygon from bare positions: every vertex gets the
    /// loop's normal. `None` for degenerate loops.
    pub fn from_positions(positions: &[Point3<Real>], metadata: Option<S>) -> Option<Self> {
        if positions.len() < 3 {
            return None;
        }
        let mut vertices: Vec<Vertex> = positions
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let plane = Plane::from_vertices(&vertices)?;
        for v in &mut vertices {
            v.normal = plane.normal;
        }
        Some(Polygon {
            vertices,
            plane,
            metadata,
        })
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Triangulate this (convex) polygon as a fan, each triangle is [v0, v1, v2].
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::new();
        if self.vertices.len() < 3 {
            return triangles;
        }
        let v0 = &self.vertices[0];
        for pair in self.vertices[1..].windows(2) {
            triangles.push([v0.clone(), pair[0].clone(), pair[1].clone()]);
        }
        triangles
    }

    /// Area of the polygon, measured in its own plane.
    pub fn area(&self) -> Real {
        let Some(v0) = self.vertices.first() else {
            return 0.0;
        };
        let mut sum = Vector3::zeros();
        for pair in self.vertices[1..].windows(2) {
            sum += (pair[0].pos - v0.pos).cross(&(pair[1].pos - v0.pos));
        }
        0.5 * sum.dot(&self.plane.normal).abs()
    }

    /// True when every vertex position is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(Vertex::is_finite)
    }

    /// Apply an affine transform to positions, normals and the cached plane.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Self {
        let normal_mat = mat
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or_else(nalgebra::Matrix3::identity);

        let vertices: Vec<Vertex> = self
            .vertices
            .iter()
            .map(|v| {
                let pos = mat.transform_point(&v.pos);
                let n = normal_mat * v.normal;
                let normal = if n.norm() > EPSILON { n.normalize() } else { n };
                Vertex::new(pos, normal)
            })
            .collect();

        let plane = Plane::from_vertices(&vertices).unwrap_or_else(|| self.plane.clone());
        Polygon {
            vertices,
            plane,
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a reference to the metadata, if any.
    pub fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }
}
