//! Slot placement: where every slot of a tray goes.
//!
//! Without a support slot, slots sit on a (optionally staggered) grid. With
//! one, they ring the support ellipse, either by an adaptive angle walk that
//! rejects overlapping candidates (`SupportMode::Circle`) or at perimeter-even
//! positions taken from an arc-length table (`SupportMode::Oval`).

use crate::config::{SceneConfig, SupportMode};
use crate::float_types::{Real, TAU};
use geo::{BoundingRect, Coord, MultiPoint, Point as GeoPoint, Rect};
use nalgebra::Point2;
use tracing::{debug, warn};

/// Tightens the staggered row pitch so neighbouring rims always touch.
pub const STAGGER_PITCH_FACTOR: Real = 0.98;

/// Tightens the minimum spacing of the radial angle walk.
pub const RADIAL_SPACING_FACTOR: Real = 0.99;

/// Angle advance after a rejected radial candidate.
pub const REJECTED_ANGLE_STEP: Real = 0.01;

/// How far past a full turn the radial walk may go before giving up.
pub const ANGLE_OVERRUN: Real = 0.2;

/// Number of equal-angle samples in an ellipse arc-length table.
pub const ARC_TABLE_STEPS: usize = 1000;

/// Outward padding of the ring that oval-mode slots sit on.
pub const OVAL_PADDING: Real = 2.0;

/// A placed piece holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub position: Point2<Real>,
    pub inset_radius: Real,
    pub border_width: Real,
    pub border_height: Real,
    /// Grid row; always 0 for radial placement.
    pub row: usize,
    /// Grid column, or the placement index for radial placement.
    pub col: usize,
}

impl Slot {
    #[inline]
    pub fn outer_radius(&self) -> Real {
        self.inset_radius + self.border_width
    }
}

/// Result of one placement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    pub slots: Vec<Slot>,
    /// Points the camera should frame: slot centers, plus the tray origin for
    /// the radial circle walk.
    pub reference_points: Vec<Point2<Real>>,
    /// How many slots the configuration asked for.
    pub requested: usize,
}

impl SlotLayout {
    pub fn achieved(&self) -> usize {
        self.slots.len()
    }

    /// True when radial placement could not fit the requested count.
    pub fn is_under_capacity(&self) -> bool {
        self.achieved() < self.requested
    }

    pub fn centers(&self) -> Vec<Point2<Real>> {
        self.slots.iter().map(|s| s.position).collect()
    }

    /// Axis-aligned box over the reference points.
    pub fn bounds(&self) -> Option<Rect<Real>> {
        let points: MultiPoint<Real> = self
            .reference_points
            .iter()
            .map(|p| GeoPoint::new(p.x, p.y))
            .collect();
        points.bounding_rect()
    }

    /// Axis-aligned box over every slot's outer disk.
    pub fn extent(&self) -> Option<Rect<Real>> {
        self.slots
            .iter()
            .map(|s| {
                let r = s.outer_radius();
                Rect::new(
                    Coord {
                        x: s.position.x - r,
                        y: s.position.y - r,
                    },
                    Coord {
                        x: s.position.x + r,
                        y: s.position.y + r,
                    },
                )
            })
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })
    }
}

/// True when disks of radius `r1` and `r2` around `p1` and `p2` overlap.
#[inline]
pub fn overlaps(p1: &Point2<Real>, p2: &Point2<Real>, r1: Real, r2: Real) -> bool {
    (p1 - p2).norm_squared() < (r1 + r2) * (r1 + r2)
}

/// True when a disk of radius `r` at `p` reaches into the ellipse of full
/// extents `length` × `width` centered on `center`.
#[inline]
pub fn intersects_ellipse(
    p: &Point2<Real>,
    center: &Point2<Real>,
    r: Real,
    length: Real,
    width: Real,
) -> bool {
    let d = p - center;
    let rx = 0.5 * length + r;
    let ry = 0.5 * width + r;
    (d.x * d.x) / (rx * rx) + (d.y * d.y) / (ry * ry) < 1.0
}

/// Horizontal and vertical grid pitch.
///
/// With `stagger`, the vertical pitch is `NaN` when `gap` is so large that
/// staggered rows cannot touch; such a gap is outside the valid input range.
pub fn grid_pitch(config: &SceneConfig) -> (Real, Real) {
    let outer = config.outer_radius();
    let x_offset = outer + config.inset_radius() + config.gap;
    let y_offset = if config.stagger {
        ((2.0 * outer).powi(2) - (0.5 * x_offset).powi(2)).sqrt() * STAGGER_PITCH_FACTOR
    } else {
        x_offset
    };
    (x_offset, y_offset)
}

/// Columns in `row`: staggered odd rows lose their trailing slot when stray
/// slots are removed.
#[inline]
pub fn effective_cols(config: &SceneConfig, row: usize) -> usize {
    if config.stagger && config.stray_slot_removal && row % 2 == 1 {
        config.cols.saturating_sub(1)
    } else {
        config.cols
    }
}

/// Place every slot for `config`.
pub fn place_slots(config: &SceneConfig) -> SlotLayout {
    let requested = config.requested_slots();
    let layout = if !config.support_slot.enabled {
        place_grid(config)
    } else {
        match config.support_slot.mode {
            SupportMode::Circle => place_radial_circle(config),
            SupportMode::Oval => place_radial_oval(config),
        }
    };
    let layout = SlotLayout {
        requested,
        ..layout
    };

    debug!(
        requested,
        achieved = layout.achieved(),
        "placed slots"
    );
    if layout.is_under_capacity() {
        warn!(
            requested,
            achieved = layout.achieved(),
            "requested slot count does not fit around the support"
        );
    }
    layout
}

fn make_slot(config: &SceneConfig, position: Point2<Real>, row: usize, col: usize) -> Slot {
    Slot {
        position,
        inset_radius: config.inset_radius(),
        border_width: config.edge_thickness,
        border_height: config.edge_height,
        row,
        col,
    }
}

fn place_grid(config: &SceneConfig) -> SlotLayout {
    let (x_offset, y_offset) = grid_pitch(config);
    let slots: Vec<Slot> = (0..config.rows)
        .flat_map(|row| {
            let shift = if config.stagger && row % 2 == 1 {
                0.5 * x_offset
            } else {
                0.0
            };
            (0..effective_cols(config, row)).map(move |col| {
                let p = Point2::new(col as Real * x_offset + shift, row as Real * y_offset);
                (p, row, col)
            })
        })
        .map(|(p, row, col)| make_slot(config, p, row, col))
        .collect();

    let reference_points = slots.iter().map(|s| s.position).collect();
    SlotLayout {
        slots,
        reference_points,
        requested: 0,
    }
}

/// Whether a radial candidate may join the slots accepted so far: a disk of
/// radius `reach.0` around it overlaps no disk of radius `reach.1` around an
/// accepted center, and it is clear of the support at inset and outer radius.
fn radial_candidate_fits<'a>(
    config: &SceneConfig,
    p: &Point2<Real>,
    reach: (Real, Real),
    accepted: impl IntoIterator<Item = &'a Point2<Real>>,
) -> bool {
    let r = config.inset_radius();
    let outer = config.outer_radius();
    let (length, width) = (config.support_slot.length, config.support_slot.width);
    let origin = Point2::origin();

    !intersects_ellipse(p, &origin, r, length, width)
        && !intersects_ellipse(p, &origin, outer, length, width)
        && !accepted.into_iter().any(|q| overlaps(p, q, reach.0, reach.1))
}

/// State of the adaptive angle walk around the support ellipse.
#[derive(Debug, Clone)]
struct RadialWalk {
    theta: Real,
    accepted: Vec<Slot>,
}

impl RadialWalk {
    fn is_done(&self, count: usize) -> bool {
        self.accepted.len() >= count || self.theta >= TAU + ANGLE_OVERRUN
    }

    /// Try the candidate at the current angle and advance.
    fn step(mut self, config: &SceneConfig, a: Real, b: Real) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        let p = Point2::new(a * cos, b * sin);

        let reach = (config.inset_radius(), config.outer_radius());
        if radial_candidate_fits(config, &p, reach, self.accepted.iter().map(|s| &s.position)) {
            let index = self.accepted.len();
            self.accepted.push(make_slot(config, p, 0, index));

            // Advance by roughly one slot width along the local tangent.
            let min_spacing = 2.0 * config.inset_radius() * RADIAL_SPACING_FACTOR;
            let speed = (a * sin).hypot(b * cos);
            self.theta += min_spacing / speed;
        } else {
            self.theta += REJECTED_ANGLE_STEP;
        }
        self
    }
}

fn place_radial_circle(config: &SceneConfig) -> SlotLayout {
    let (ca, cb) = config.support_with_clearance();
    let a = ca + config.outer_radius();
    let b = cb + config.outer_radius();
    let count = config.support_slot.count;

    let mut walk = RadialWalk {
        theta: 0.0,
        accepted: Vec::with_capacity(count),
    };
    while !walk.is_done(count) {
        walk = walk.step(config, a, b);
    }

    let mut reference_points: Vec<Point2<Real>> =
        walk.accepted.iter().map(|s| s.position).collect();
    reference_points.push(Point2::origin());

    SlotLayout {
        slots: walk.accepted,
        reference_points,
        requested: 0,
    }
}

/// Slots on a ring padded out from the support, at perimeter-even angles.
///
/// Inset disks may not overlap; rims may, and rim segmentation trims them.
/// The ring holds as many of the requested slots as fit; when `count` does
/// not fit, fewer slots are spread evenly instead of dropping single
/// candidates.
fn place_radial_oval(config: &SceneConfig) -> SlotLayout {
    let a = 0.5 * config.support_slot.length + config.outer_radius();
    let b = 0.5 * config.support_slot.width + config.outer_radius();
    let (pa, pb) = (a + OVAL_PADDING, b + OVAL_PADDING);

    let ring = |n: usize| -> Vec<Point2<Real>> {
        perimeter_even_angles(a, b, n)
            .into_iter()
            .map(|theta| Point2::new(pa * theta.cos(), pb * theta.sin()))
            .collect()
    };
    let reach = (config.inset_radius(), config.inset_radius());
    let fits = |points: &[Point2<Real>]| {
        points
            .iter()
            .enumerate()
            .all(|(i, p)| radial_candidate_fits(config, p, reach, &points[..i]))
    };

    let positions = (1..=config.support_slot.count)
        .rev()
        .map(ring)
        .find(|points| fits(points.as_slice()))
        .unwrap_or_default();

    let slots: Vec<Slot> = positions
        .into_iter()
        .enumerate()
        .map(|(index, p)| make_slot(config, p, 0, index))
        .collect();
    let reference_points = slots.iter().map(|s| s.position).collect();
    SlotLayout {
        slots,
        reference_points,
        requested: 0,
    }
}

/// `count` angles splitting the perimeter of the `a` × `b` ellipse into
/// equal arc lengths, starting at angle 0.
pub fn perimeter_even_angles(a: Real, b: Real, count: usize) -> Vec<Real> {
    if count == 0 {
        return Vec::new();
    }
    let table = EllipseArcTable::new(a, b, ARC_TABLE_STEPS);
    let total = table.total_length();
    (0..count)
        .map(|i| table.angle_at(total * i as Real / count as Real))
        .collect()
}

/// Cumulative chord lengths of an ellipse sampled at equal angle steps.
#[derive(Debug, Clone)]
pub struct EllipseArcTable {
    step: Real,
    /// `lengths[i]` is the arc length from angle 0 to `i * step`.
    lengths: Vec<Real>,
}

impl EllipseArcTable {
    pub fn new(a: Real, b: Real, steps: usize) -> Self {
        let steps = steps.max(1);
        let step = TAU / steps as Real;
        let point = |i: usize| {
            let t = i as Real * step;
            Point2::new(a * t.cos(), b * t.sin())
        };

        let mut lengths = Vec::with_capacity(steps + 1);
        lengths.push(0.0);
        let mut total = 0.0;
        for i in 1..=steps {
            total += (point(i) - point(i - 1)).norm();
            lengths.push(total);
        }
        EllipseArcTable { step, lengths }
    }

    pub fn total_length(&self) -> Real {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Smallest sampled angle whose cumulative length reaches `length`.
    pub fn angle_at(&self, length: Real) -> Real {
        let index = self.lengths.partition_point(|&l| l < length);
        index.min(self.lengths.len() - 1) as Real * self.step
    }

    /// Arc length from angle 0 to `angle`, interpolated between samples.
    pub fn length_at(&self, angle: Real) -> Real {
        let angle = angle.rem_euclid(TAU);
        let pos = angle / self.step;
        let i = (pos.floor() as usize).min(self.lengths.len() - 2);
        let frac = pos - i as Real;
        self.lengths[i] + frac * (self.lengths[i + 1] - self.lengths[i])
    }
}
