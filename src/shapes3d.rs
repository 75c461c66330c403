//! Closed primitive solids used as bodies and cutters.

use crate::csg::CSG;
use crate::extrude::extrude;
use crate::float_types::Real;
use crate::shapes2d;

/// A Z-axis cylinder of `radius` centered on the origin in XY, spanning
/// `z0 ..= z0 + height`.
pub fn cylinder<S: Clone>(
    radius: Real,
    z0: Real,
    height: Real,
    segments: usize,
    metadata: Option<S>,
) -> CSG<S> {
    if radius <= 0.0 {
        return CSG::new();
    }
    extrude(&shapes2d::circle(radius, segments), z0, height, metadata)
}

/// An axis-aligned box centered on the origin in XY, spanning `0 ..= height`
/// in Z.
pub fn cuboid<S: Clone>(width: Real, length: Real, height: Real, metadata: Option<S>) -> CSG<S> {
    if width <= 0.0 || length <= 0.0 {
        return CSG::new();
    }
    extrude(&shapes2d::rectangle(width, length), 0.0, height, metadata)
}

/// An elliptic cylinder with semi-axes `a` (X) and `b` (Y).
pub fn elliptic_prism<S: Clone>(
    a: Real,
    b: Real,
    z0: Real,
    height: Real,
    segments: usize,
    metadata: Option<S>,
) -> CSG<S> {
    if a <= 0.0 || b <= 0.0 {
        return CSG::new();
    }
    extrude(&shapes2d::ellipse(a, b, segments), z0, height, metadata)
}
