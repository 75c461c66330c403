//! The central support slot: an elliptic floor and its ring border.

use crate::config::SceneConfig;
use crate::csg::CSG;
use crate::errors::BooleanError;
use crate::extrude::extrude;
use crate::float_types::ELLIPSE_SEGMENTS;
use crate::shapes2d;
use crate::slot_body::{magnet_cutter, Part};

/// Solids of the support slot at the tray origin, or nothing when it is
/// disabled: the floor (with the magnet recess at its center) first, then
/// the ring border.
pub fn build_support(config: &SceneConfig) -> Result<Vec<CSG<Part>>, BooleanError> {
    let support = &config.support_slot;
    if !support.enabled {
        return Ok(Vec::new());
    }
    let (a, b) = (0.5 * support.length, 0.5 * support.width);
    let border = config.edge_thickness;

    let mut floor = extrude(
        &shapes2d::ellipse(a, b, ELLIPSE_SEGMENTS),
        0.0,
        config.base_thickness,
        Some(Part::SupportBody),
    );
    if config.magnet_slot.enabled {
        let magnet = magnet_cutter(
            config.magnet_slot.width,
            config.magnet_slot.depth,
            config.base_thickness,
            config.segments,
            Part::SupportBody,
        );
        floor = floor.try_subtract(&magnet)?;
    }

    let ring = extrude(
        &shapes2d::elliptic_ring((a, b), (a + border, b + border), ELLIPSE_SEGMENTS),
        0.0,
        config.edge_height,
        Some(Part::SupportBorder),
    );

    Ok([floor, ring].into_iter().filter(|s| !s.is_empty()).collect())
}
