//! Scene parameters for one generation pass.
//!
//! A [`SceneConfig`] is an immutable value: every derived quantity (radii,
//! clearance-adjusted support size) comes from an accessor, never from
//! rewriting a field.

use crate::errors::ConfigError;
use crate::float_types::{Real, DEFAULT_SEGMENTS};
use crate::placement::{effective_cols, grid_pitch};
use serde::{Deserialize, Serialize};

/// Gap kept between the support ellipse and the ring slots walk along.
pub const SUPPORT_CLEARANCE: Real = 1.0;

/// Outline of a slot's inset and rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SlotShape {
    #[default]
    Circle,
    Square,
}

/// How slots are arranged around an enabled support slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SupportMode {
    /// Adaptive angle walk with overlap rejection.
    Circle,
    /// Perimeter-even spacing from an arc-length table.
    #[default]
    Oval,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupportSlot {
    pub enabled: bool,
    pub mode: SupportMode,
    /// Full extent along X.
    pub length: Real,
    /// Full extent along Y.
    pub width: Real,
    /// Requested number of slots around the support.
    pub count: usize,
}

impl Default for SupportSlot {
    fn default() -> Self {
        SupportSlot {
            enabled: false,
            mode: SupportMode::Oval,
            length: 60.0,
            width: 35.5,
            count: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MagnetSlot {
    pub enabled: bool,
    /// Recess diameter.
    pub width: Real,
    pub depth: Real,
}

impl Default for MagnetSlot {
    fn default() -> Self {
        MagnetSlot {
            enabled: true,
            width: 2.0,
            depth: 1.0,
        }
    }
}

/// Everything one generation pass consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub slot_shape: SlotShape,
    pub inset_diameter: Real,
    pub edge_thickness: Real,
    pub edge_height: Real,
    pub base_thickness: Real,
    pub gap: Real,
    pub rows: usize,
    pub cols: usize,
    pub stagger: bool,
    pub stray_slot_removal: bool,
    pub hollow_bottom: bool,
    /// Tessellation of every circle; solids subtracted from each other share it.
    pub segments: usize,
    pub support_slot: SupportSlot,
    pub magnet_slot: MagnetSlot,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            slot_shape: SlotShape::Circle,
            inset_diameter: 25.0,
            edge_thickness: 2.0,
            edge_height: 3.0,
            base_thickness: 2.0,
            gap: 0.0,
            rows: 4,
            cols: 3,
            stagger: false,
            stray_slot_removal: false,
            hollow_bottom: false,
            segments: DEFAULT_SEGMENTS,
            support_slot: SupportSlot::default(),
            magnet_slot: MagnetSlot::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    #[inline]
    pub fn inset_radius(&self) -> Real {
        0.5 * self.inset_diameter
    }

    /// Inset radius plus the rim thickness.
    #[inline]
    pub fn outer_radius(&self) -> Real {
        self.inset_radius() + self.edge_thickness
    }

    /// Support semi-axes `(length / 2, width / 2)`, each grown by one unit of
    /// clearance.
    pub fn support_with_clearance(&self) -> (Real, Real) {
        (
            0.5 * self.support_slot.length + SUPPORT_CLEARANCE,
            0.5 * self.support_slot.width + SUPPORT_CLEARANCE,
        )
    }

    /// The number of slots the configuration asks for. A grid asks for the
    /// cells left after stray-slot removal, so it always gets all of them.
    pub fn requested_slots(&self) -> usize {
        if self.support_slot.enabled {
            self.support_slot.count
        } else {
            (0..self.rows).map(|row| effective_cols(self, row)).sum()
        }
    }

    /// Check the preconditions generation relies on.
    ///
    /// Generation does not call this; invalid values are the caller's to
    /// clamp, and produce unspecified geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.inset_radius() > 0.0) {
            return Err(ConfigError::NonPositiveInsetRadius(self.inset_diameter));
        }
        if !(self.edge_height >= 0.0) {
            return Err(ConfigError::NegativeEdgeHeight(self.edge_height));
        }
        if !(self.base_thickness > 0.0) {
            return Err(ConfigError::NonPositiveBaseThickness(self.base_thickness));
        }
        if self.magnet_slot.enabled && self.magnet_slot.depth >= self.base_thickness {
            return Err(ConfigError::MagnetTooDeep {
                depth: self.magnet_slot.depth,
                base: self.base_thickness,
            });
        }
        if self.support_slot.enabled {
            if !(self.support_slot.length > 0.0) {
                return Err(ConfigError::NonPositiveSupportDimension("length"));
            }
            if !(self.support_slot.width > 0.0) {
                return Err(ConfigError::NonPositiveSupportDimension("width"));
            }
        }
        if self.stagger && !self.support_slot.enabled && grid_pitch(self).1.is_nan() {
            return Err(ConfigError::StaggerGapTooLarge(self.gap));
        }
        if self.requested_slots() == 0 {
            return Err(ConfigError::NoSlotsRequested);
        }
        Ok(())
    }
}
