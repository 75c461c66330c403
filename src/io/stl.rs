//! STL export of solids and whole trays.

use crate::csg::CSG;
use crate::scene::ExportGroup;
use std::fmt::Write as _;
use std::io::Cursor;

fn stl_triangles<S: Clone>(csg: &CSG<S>) -> Vec<stl_io::Triangle> {
    let mut triangles = Vec::with_capacity(csg.triangle_count());
    for poly in &csg.polygons {
        let normal = poly.plane.normal;
        for tri in poly.triangulate() {
            let v = |i: usize| {
                let p = tri[i].pos;
                stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            };
            triangles.push(stl_io::Triangle {
                normal: stl_io::Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [v(0), v(1), v(2)],
            });
        }
    }
    triangles
}

impl<S: Clone> CSG<S> {
    /// Binary STL bytes of this solid.
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        let triangles = stl_triangles(self);
        let mut cursor = Cursor::new(Vec::new());
        stl_io::write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }

    /// ASCII STL text of this solid, named `name`.
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "solid {name}");
        for poly in &self.polygons {
            let n = poly.plane.normal;
            for tri in poly.triangulate() {
                let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
                out.push_str("    outer loop\n");
                for vertex in &tri {
                    let p = vertex.pos;
                    let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
                }
                out.push_str("    endloop\n");
                out.push_str("  endfacet\n");
            }
        }
        let _ = writeln!(out, "endsolid {name}");
        out
    }
}

impl ExportGroup {
    /// The whole tray as one binary STL.
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self.flatten().to_stl_binary()
    }

    pub fn to_stl_ascii(&self, name: &str) -> String {
        self.flatten().to_stl_ascii(name)
    }
}
