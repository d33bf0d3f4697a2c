//! Pickable proxies for interactive nodes.

use crate::constants::{HITBOX_SIZE_MULTIPLIER, HITBOX_SUFFIX};
use crate::scene::{NodeId, SceneGraph};
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitboxId(pub usize);

/// Oriented box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obb {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Proxy {
    /// The source mesh itself is the pick surface.
    Source(NodeId),
    /// Invisible box enclosing the source at its rest scale.
    Volume(Obb),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HitboxEntry {
    pub name: String,
    pub source: NodeId,
    pub proxy: Proxy,
}

impl HitboxEntry {
    pub fn uses_source_as_proxy(&self) -> bool {
        matches!(self.proxy, Proxy::Source(_))
    }
}

/// Build the proxy for one node. Returns `None` for nodes without geometry.
///
/// A node that is still hidden (any zero scale component) is measured at its
/// reveal scale and then put back, so the proxy matches what the intro reveals
/// rather than a flat sliver.
pub fn build_hitbox(scene: &mut SceneGraph, id: NodeId, multiplier: Vec3) -> Option<HitboxEntry> {
    let node = scene.get_mut(id)?;
    node.capture_initial();
    let name = format!("{}{}", node.name, HITBOX_SUFFIX);

    if node.tags.source_proxy {
        return Some(HitboxEntry {
            name,
            source: id,
            proxy: Proxy::Source(id),
        });
    }

    let quarter_turn = node.tags.quarter_turn;
    let hidden_scale = node.transform.scale;
    let hidden = node.transform.has_zero_scale();
    if hidden {
        node.transform.scale = node.reveal_scale;
    }
    let bounds = scene.world_bounds(id);
    if hidden {
        if let Some(node) = scene.get_mut(id) {
            node.transform.scale = hidden_scale;
        }
    }
    let bounds = bounds?;

    let rotation = if quarter_turn {
        Quat::from_rotation_y(FRAC_PI_4)
    } else {
        Quat::IDENTITY
    };
    Some(HitboxEntry {
        name,
        source: id,
        proxy: Proxy::Volume(Obb {
            center: bounds.center(),
            half_extents: bounds.size() * multiplier * 0.5,
            rotation,
        }),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredPhase {
    /// Intro has not settled yet.
    Waiting,
    /// Settle event seen; the batch build is on a timer.
    Scheduled,
    Built,
}

/// Owns every pickable proxy plus the batch waiting for the intro.
#[derive(Debug)]
pub struct HitboxManager {
    entries: Vec<HitboxEntry>,
    by_source: FnvHashMap<NodeId, HitboxId>,
    pending: Vec<NodeId>,
    phase: DeferredPhase,
    multiplier: Vec3,
}

impl Default for HitboxManager {
    fn default() -> Self {
        Self::new(HITBOX_SIZE_MULTIPLIER)
    }
}

impl HitboxManager {
    pub fn new(multiplier: Vec3) -> Self {
        Self {
            entries: Vec::new(),
            by_source: FnvHashMap::default(),
            pending: Vec::new(),
            phase: DeferredPhase::Waiting,
            multiplier,
        }
    }

    /// Build and register a proxy; a node that already has one keeps it.
    pub fn register(&mut self, scene: &mut SceneGraph, node: NodeId) -> Option<HitboxId> {
        if let Some(existing) = self.by_source.get(&node) {
            return Some(*existing);
        }
        let entry = build_hitbox(scene, node, self.multiplier)?;
        let id = HitboxId(self.entries.len());
        log::debug!("[hitbox] built {}", entry.name);
        self.entries.push(entry);
        self.by_source.insert(node, id);
        Some(id)
    }

    pub fn build_immediate(&mut self, scene: &mut SceneGraph, nodes: &[NodeId]) -> usize {
        let built = nodes
            .iter()
            .filter_map(|n| self.register(scene, *n))
            .count();
        log::info!("[hitbox] {} immediate hitboxes", built);
        built
    }

    pub fn defer(&mut self, nodes: &[NodeId]) {
        self.pending.extend_from_slice(nodes);
    }

    /// Record the intro settle event. Returns true only the first time, when
    /// the caller should start the settle delay.
    pub fn mark_scheduled(&mut self) -> bool {
        if self.phase != DeferredPhase::Waiting {
            return false;
        }
        self.phase = DeferredPhase::Scheduled;
        true
    }

    /// Drain the pending batch. Runs at most once; later calls return 0.
    pub fn build_deferred(&mut self, scene: &mut SceneGraph) -> usize {
        if self.phase == DeferredPhase::Built {
            log::debug!("[hitbox] deferred batch already built");
            return 0;
        }
        self.phase = DeferredPhase::Built;
        let pending = std::mem::take(&mut self.pending);
        let built = pending
            .iter()
            .filter_map(|n| self.register(scene, *n))
            .count();
        log::info!("[hitbox] {} deferred hitboxes", built);
        built
    }

    pub fn phase(&self) -> DeferredPhase {
        self.phase
    }

    pub fn pending(&self) -> &[NodeId] {
        &self.pending
    }

    pub fn get(&self, id: HitboxId) -> Option<&HitboxEntry> {
        self.entries.get(id.0)
    }

    pub fn for_source(&self, node: NodeId) -> Option<HitboxId> {
        self.by_source.get(&node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HitboxId, &HitboxEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (HitboxId(i), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
