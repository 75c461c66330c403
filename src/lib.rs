//! Parametric movement-tray generator.
//!
//! A [`SceneConfig`] describes a tray: slot size, rim, base, and either a
//! (staggered) grid or a ring of slots around a central support slot.
//! [`generate`] places the slots, builds every slot body, rim segment, base
//! plate and support solid with BSP-tree CSG, and returns them as one
//! [`ExportGroup`] ready to be written as STL.
//!
//! ```rust
//! use movetray::{generate, SceneConfig};
//!
//! let mut config = SceneConfig::default();
//! config.rows = 1;
//! config.cols = 2;
//! config.segments = 16;
//! config.magnet_slot.enabled = false;
//! let scene = generate(&config).unwrap();
//! assert_eq!(scene.layout.slots.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod base;
pub mod border;
pub mod bsp;
pub mod config;
pub mod csg;
pub mod errors;
pub mod extrude;
pub mod float_types;
pub mod io;
pub mod neighbors;
pub mod placement;
pub mod plane;
pub mod polygon;
pub mod scene;
pub mod shapes2d;
pub mod shapes3d;
pub mod slot_body;
pub mod support;
pub mod vertex;


pub use base::{build_base, perimeter_path, BaseFootprint, BasePlate, BASE_PLATE_DEPTH};
pub use border::{free_arcs, rim_solids, Arc};
pub use bsp::Node;
pub use config::{MagnetSlot, SceneConfig, SlotShape, SupportMode, SupportSlot};
pub use csg::CSG;
pub use errors::{BooleanError, ConfigError, Result, TrayError};
pub use neighbors::NeighborIndex;
pub use placement::{
    intersects_ellipse, overlaps, place_slots, EllipseArcTable, Slot, SlotLayout,
};
pub use plane::Plane;
pub use polygon::Polygon;
pub use scene::{
    generate, generate_with, ExportGroup, Generation, Scene, SceneObserver, TrayGenerator,
};
pub use slot_body::{Part, SlotSpec};
pub use support::build_support;
pub use vertex::Vertex;
