//! Per-slot solids: the inset body with its cavities, and the rim.

use crate::border::{free_arcs, rim_solids};
use crate::config::{SceneConfig, SlotShape};
use crate::csg::CSG;
use crate::errors::BooleanError;
use crate::extrude::extrude;
use crate::float_types::{Real, EPSILON};
use crate::neighbors::NeighborIndex;
use crate::placement::Slot;
use crate::shapes2d;
use crate::shapes3d::cylinder;
use geo::Polygon as GeoPolygon;
use nalgebra::Vector3;

/// Radial wall kept around a hollowed slot bottom.
pub const HOLLOW_BOTTOM_WALL: Real = 3.0;

/// Vertical overshoot of cutters past the faces they open.
pub const CUTTER_OVERSHOOT: Real = 1.0;

/// What a polygon of the exported tray belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    SlotBody,
    Border,
    BasePlate,
    SupportBody,
    SupportBorder,
}

/// Inputs shared by both slot outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotParams {
    pub base_thickness: Real,
    /// Magnet recess `(diameter, depth)`, if enabled.
    pub magnet: Option<(Real, Real)>,
    pub hollow_bottom: bool,
    pub segments: usize,
}

/// The slot outline, chosen once per scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotSpec {
    /// Round inset, rim cut to its free arcs.
    Circle(SlotParams),
    /// Square inset of half-width `inset_radius`, square rim.
    Square(SlotParams),
}

/// Magnet recess cutter opening at the top face `base_thickness`.
pub fn magnet_cutter(
    diameter: Real,
    depth: Real,
    base_thickness: Real,
    segments: usize,
    tag: Part,
) -> CSG<Part> {
    cylinder(
        0.5 * diameter,
        base_thickness - depth,
        depth + CUTTER_OVERSHOOT,
        segments,
        Some(tag),
    )
}

impl SlotSpec {
    pub fn from_config(config: &SceneConfig) -> Self {
        let params = SlotParams {
            base_thickness: config.base_thickness,
            magnet: config
                .magnet_slot
                .enabled
                .then_some((config.magnet_slot.width, config.magnet_slot.depth)),
            hollow_bottom: config.hollow_bottom,
            segments: config.segments,
        };
        match config.slot_shape {
            SlotShape::Circle => SlotSpec::Circle(params),
            SlotShape::Square => SlotSpec::Square(params),
        }
    }

    pub fn params(&self) -> &SlotParams {
        match self {
            SlotSpec::Circle(p) | SlotSpec::Square(p) => p,
        }
    }

    /// Outline of the inset floor, centered on the origin.
    pub fn inset_profile(&self, inset_radius: Real) -> GeoPolygon<Real> {
        match self {
            SlotSpec::Circle(p) => shapes2d::circle(inset_radius, p.segments),
            SlotSpec::Square(_) => shapes2d::square(2.0 * inset_radius),
        }
    }

    /// Cutter clearing the base plate under the whole slot, rim included, in
    /// world position.
    pub fn base_cutter(&self, slot: &Slot, z0: Real, height: Real) -> CSG<Part> {
        let outer = slot.outer_radius();
        let cutter = match self {
            SlotSpec::Circle(p) => cylinder(outer, z0, height, p.segments, Some(Part::BasePlate)),
            SlotSpec::Square(_) => {
                extrude(&shapes2d::square(2.0 * outer), z0, height, Some(Part::BasePlate))
            }
        };
        cutter.translate(Vector3::new(slot.position.x, slot.position.y, 0.0))
    }

    /// Body of one slot at the origin: inset floor with magnet recess and
    /// optional hollow bottom.
    pub fn body(&self, slot: &Slot) -> Result<CSG<Part>, BooleanError> {
        let p = self.params();
        let mut body = extrude(
            &self.inset_profile(slot.inset_radius),
            0.0,
            p.base_thickness,
            Some(Part::SlotBody),
        );

        if let Some((diameter, depth)) = p.magnet {
            let magnet = magnet_cutter(diameter, depth, p.base_thickness, p.segments, Part::SlotBody);
            body = body.try_subtract(&magnet)?;
        }

        let hollow_radius = slot.inset_radius - HOLLOW_BOTTOM_WALL;
        if p.hollow_bottom && hollow_radius > EPSILON {
            let hollow = cylinder(
                hollow_radius,
                -CUTTER_OVERSHOOT,
                p.base_thickness + 2.0 * CUTTER_OVERSHOOT,
                p.segments,
                Some(Part::SlotBody),
            );
            body = body.try_subtract(&hollow)?;
        }
        Ok(body)
    }

    /// Every solid of slot `index`, in world position: body first, then rim
    /// pieces.
    pub fn build(
        &self,
        index: usize,
        slots: &[Slot],
        neighbors: &NeighborIndex,
    ) -> Result<Vec<CSG<Part>>, BooleanError> {
        let Some(slot) = slots.get(index) else {
            return Ok(Vec::new());
        };
        let offset = Vector3::new(slot.position.x, slot.position.y, 0.0);
        let mut solids = vec![self.body(slot)?.translate(offset)];

        match self {
            SlotSpec::Circle(p) => {
                let outer = slot.outer_radius();
                let nearby = neighbors.neighbors_of(&slot.position, 2.0 * outer);
                let arcs = free_arcs(&slot.position, slot.inset_radius, outer, &nearby);
                solids.extend(rim_solids(
                    &arcs,
                    &slot.position,
                    slot.inset_radius,
                    outer,
                    slot.border_height,
                    p.segments,
                    Some(Part::Border),
                ));
            }
            SlotSpec::Square(_) => {
                if let Some(rim) = self.square_rim(index, slots, neighbors)? {
                    solids.push(rim);
                }
            }
        }
        Ok(solids)
    }

    /// Square frame of slot `index`, trimmed against overlapping neighbours.
    fn square_rim(
        &self,
        index: usize,
        slots: &[Slot],
        neighbors: &NeighborIndex,
    ) -> Result<Option<CSG<Part>>, BooleanError> {
        let Some(slot) = slots.get(index) else {
            return Ok(None);
        };
        let (r, outer, height) = (slot.inset_radius, slot.outer_radius(), slot.border_height);
        let to_world = |v: &Slot| Vector3::new(v.position.x, v.position.y, 0.0);

        let mut rim = extrude(
            &shapes2d::square_ring(2.0 * r, 2.0 * outer),
            0.0,
            height,
            Some(Part::Border),
        )
        .translate(to_world(slot));
        if rim.is_empty() {
            return Ok(None);
        }

        // Squares overlap when both axis distances are below 2 * outer.
        let reach = 2.0 * outer * std::f64::consts::SQRT_2;
        for j in neighbors.within(&slot.position, reach) {
            let Some(other) = slots.get(j) else { continue };
            let d = other.position - slot.position;
            if d.x.abs() >= 2.0 * outer || d.y.abs() >= 2.0 * outer {
                continue;
            }
            let side = if j < index { 2.0 * other.outer_radius() } else { 2.0 * other.inset_radius };
            let cutter = extrude(
                &shapes2d::square(side),
                -CUTTER_OVERSHOOT,
                height + 2.0 * CUTTER_OVERSHOOT,
                Some(Part::Border),
            )
            .translate(to_world(other));
            rim = rim.try_subtract(&cutter)?;
        }
        Ok(Some(rim))
    }
}
