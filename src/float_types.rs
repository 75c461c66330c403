// Our Real scalar type:
pub type Real = f64;

/// A small epsilon for geometric comparisons (plane classification, degenerate
/// edge and area checks). Tray coordinates are millimetres.
pub const EPSILON: Real = 1e-5;

// Pi
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Tessellation
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Default number of segments used to approximate a full circle. Solids that
/// are subtracted from each other must share this count to avoid seam slivers.
pub const DEFAULT_SEGMENTS: usize = 64;

/// Segment count used for the support slot's ellipses.
pub const ELLIPSE_SEGMENTS: usize = 128;

/// Lower bound for any circle or ellipse tessellation.
pub const MIN_SEGMENTS: usize = 8;

