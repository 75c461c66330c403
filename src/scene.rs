//! Scene assembly: one generation pass from a [`SceneConfig`] to an
//! [`ExportGroup`], and the hand-off of finished passes to readers.

use crate::base::{build_base, BaseFootprint};
use crate::config::SceneConfig;
use crate::csg::CSG;
use crate::errors::Result;
use crate::float_types::Real;
use crate::neighbors::NeighborIndex;
use crate::placement::{place_slots, SlotLayout};
use crate::slot_body::{Part, SlotSpec};
use crate::support::build_support;
use geo::Rect;
use parking_lot::RwLock;
use parry3d_f64::bounding_volume::Aabb;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Receives the outputs of a published generation pass.
///
/// Every method has an empty default, so observers implement only what they
/// need.
pub trait SceneObserver {
    /// Box over the placement reference points, for camera framing.
    fn on_bounds(&self, _bounds: &Rect<Real>) {}
    /// Radial placement fit only `achieved` of the requested slots.
    fn on_max_reached(&self, _achieved: usize) {}
    /// The finished solids of the tray.
    fn on_base_mesh_ready(&self, _group: &ExportGroup) {}
}

impl SceneObserver for () {}

/// The exported tray: a flat, ordered list of closed solids in one frame
/// (tray plane XY, height along +Z).
#[derive(Debug, Clone, Default)]
pub struct ExportGroup {
    pub solids: Vec<CSG<Part>>,
}

impl ExportGroup {
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CSG<Part>> {
        self.solids.iter()
    }

    pub fn push(&mut self, solid: CSG<Part>) {
        if !solid.is_empty() {
            self.solids.push(solid);
        }
    }

    /// All polygons of all solids in one polygon soup, without any union.
    pub fn flatten(&self) -> CSG<Part> {
        CSG::from_polygons(
            self.solids
                .iter()
                .flat_map(|s| s.polygons.iter().cloned())
                .collect(),
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.solids.iter().map(CSG::triangle_count).sum()
    }

    pub fn polygon_count(&self) -> usize {
        self.solids.iter().map(|s| s.polygons.len()).sum()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.flatten().bounding_box()
    }

    /// Polygons tagged with `part`, across all solids.
    pub fn part_polygon_count(&self, part: Part) -> usize {
        self.solids
            .iter()
            .flat_map(|s| s.polygons.iter())
            .filter(|p| p.metadata() == Some(&part))
            .count()
    }
}

/// One complete generation pass.
#[derive(Debug, Clone)]
pub struct Scene {
    pub layout: SlotLayout,
    pub bounds: Option<Rect<Real>>,
    pub base_footprint: BaseFootprint,
    pub group: ExportGroup,
}

impl Scene {
    /// Report this pass to `observer` in order: bounds, under-capacity, mesh.
    pub fn notify(&self, observer: &dyn SceneObserver) {
        if let Some(bounds) = &self.bounds {
            observer.on_bounds(bounds);
        }
        if self.layout.is_under_capacity() {
            observer.on_max_reached(self.layout.achieved());
        }
        observer.on_base_mesh_ready(&self.group);
    }
}

/// Run placement and build every solid for `config`.
///
/// The result depends on `config` alone.
pub fn generate(config: &SceneConfig) -> Result<Scene> {
    let layout = place_slots(config);
    let bounds = layout.bounds();

    let neighbors = NeighborIndex::new(&layout.centers(), 2.0 * config.outer_radius());
    let spec = SlotSpec::from_config(config);

    let mut group = ExportGroup::default();
    for index in 0..layout.slots.len() {
        for solid in spec.build(index, &layout.slots, &neighbors)? {
            group.push(solid);
        }
    }

    let base = build_base(&layout.slots, config)?;
    group.push(base.solid);

    for solid in build_support(config)? {
        group.push(solid);
    }

    info!(
        slots = layout.achieved(),
        solids = group.len(),
        polygons = group.polygon_count(),
        "generated tray"
    );

    Ok(Scene {
        layout,
        bounds,
        base_footprint: base.footprint,
        group,
    })
}

/// Generate and report straight to `observer`.
pub fn generate_with(config: &SceneConfig, observer: &dyn SceneObserver) -> Result<Scene> {
    let scene = generate(config)?;
    scene.notify(observer);
    Ok(scene)
}

/// Identifies one generation pass of a [`TrayGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Runs generation passes and publishes the newest finished one.
///
/// Readers take an `Arc` snapshot with [`TrayGenerator::latest`]; a
/// publication swaps the whole scene, so no reader sees a partial result. A
/// pass that finishes after a newer one was started is dropped.
#[derive(Debug, Default)]
pub struct TrayGenerator {
    generation: AtomicU64,
    latest: RwLock<Option<Arc<Scene>>>,
}

impl TrayGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass; any pass started earlier becomes stale.
    pub fn begin(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.load(Ordering::Acquire) == generation.0
    }

    /// Publish `scene` if `generation` is still the newest pass.
    pub fn publish(&self, generation: Generation, scene: Scene) -> Option<Arc<Scene>> {
        let mut latest = self.latest.write();
        if !self.is_current(generation) {
            debug!(generation = generation.0, "discarding stale generation");
            return None;
        }
        let scene = Arc::new(scene);
        *latest = Some(Arc::clone(&scene));
        Some(scene)
    }

    /// Generate for `config`, publish, then notify `observer`. Returns `None`
    /// when a newer pass started meanwhile.
    pub fn regenerate(
        &self,
        config: &SceneConfig,
        observer: &dyn SceneObserver,
    ) -> Result<Option<Arc<Scene>>> {
        let generation = self.begin();
        let scene = generate(config)?;
        let published = self.publish(generation, scene);
        if let Some(scene) = &published {
            scene.notify(observer);
        }
        Ok(published)
    }

    /// Snapshot of the newest published scene.
    pub fn latest(&self) -> Option<Arc<Scene>> {
        self.latest.read().clone()
    }
}
