use crate::float_types::{Real, EPSILON};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Classification bits. A polygon's type is the OR of its vertices' types.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in 3D space defined by a unit normal and the offset `w`
/// (every point `p` on the plane satisfies `normal · p == w`).
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Build the plane of a planar vertex loop using Newell's method, which
    /// stays well defined when the first three vertices are (nearly) collinear.
    ///
    /// Returns `None` if the loop has no area.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Plane> {
        let n = vertices.len();
        if n < 3 {
            return None;
        }
        let mut normal = Vector3::<Real>::zeros();
        for (i, current) in vertices.iter().enumerate() {
            let next = &vertices[(i + 1) % n];
            let (c, nx) = (current.pos, next.pos);
            normal.x += (c.y - nx.y) * (c.z + nx.z);
            normal.y += (c.z - nx.z) * (c.x + nx.x);
            normal.z += (c.x - nx.x) * (c.y + nx.y);
        }
        let len = normal.norm();
        if !len.is_finite() || len < EPSILON * EPSILON {
            return None;
        }
        let normal = normal / len;
        let centroid = vertices
            .iter()
            .fold(Vector3::<Real>::zeros(), |acc, v| acc + v.pos.coords)
            / n as Real;
        Some(Plane {
            normal,
            w: normal.dot(&centroid),
        })
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point as FRONT, BACK or COPLANAR (within `EPSILON`).
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// FRONT if `other` faces the same way as this plane, BACK otherwise.
    #[inline]
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// Split `polygon` by this plane if needed.
    ///
    /// Returns four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let mut types = Vec::with_capacity(polygon.vertices.len());
        let mut polygon_type: i8 = 0;
        for vertex in &polygon.vertices {
            let vertex_type = self.orient_point(&vertex.pos);
            types.push(vertex_type);
            polygon_type |= vertex_type;
        }

        match polygon_type {
            COPLANAR => {
                if self.orient_plane(&polygon.plane) == FRONT {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let vcount = polygon.vertices.len();
                let mut split_front = Vec::<Vertex>::with_capacity(vcount + 1);
                let mut split_back = Vec::<Vertex>::with_capacity(vcount + 1);

                for i in 0..vcount {
                    let j = (i + 1) % vcount;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new.clone());
                            split_back.push(vertex_new);
                        }
                    }
                }

                // Pieces of a split polygon stay in the parent's plane.
                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            }
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
