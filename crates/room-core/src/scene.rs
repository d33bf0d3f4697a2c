//! Minimal scene graph mirroring what the renderer owns.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Everything else in the
//! core (registry, hitboxes, tweens) holds ids, never references, so the graph
//! stays the single owner of transforms.

use crate::registry::NodeTags;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Position, Euler XYZ rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    pub fn has_zero_scale(&self) -> bool {
        self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut out = Self::new(*first, *first);
        for p in rest {
            out.min = out.min.min(*p);
            out.max = out.max.max(*p);
        }
        Some(out)
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when any extent is zero, e.g. a mesh scaled to nothing.
    pub fn is_degenerate(&self) -> bool {
        let s = self.size();
        s.x <= 0.0 || s.y <= 0.0 || s.z <= 0.0
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after an affine transform.
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        let pts = self.corners().map(|c| m.transform_point3(c));
        // eight corners, never empty
        Aabb::from_points(&pts).unwrap_or(*self)
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub transform: Transform,
    /// Rest transform, captured once before any animation touches the node.
    pub initial: Option<Transform>,
    /// Scale the node is revealed to by the intro; used to measure hidden nodes.
    pub reveal_scale: Vec3,
    /// Object-space bounds of the mesh; `None` for groups and empties.
    pub local_bounds: Option<Aabb>,
    pub tags: NodeTags,
    pub visible: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            transform: Transform::default(),
            initial: None,
            reveal_scale: Vec3::ONE,
            local_bounds: None,
            tags: NodeTags::default(),
            visible: true,
        }
    }

    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        let mut node = Self::new(name);
        node.local_bounds = Some(bounds);
        node
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.local_bounds.is_some()
    }

    /// Capture the rest transform unless one was already captured.
    pub fn capture_initial(&mut self) -> Transform {
        *self.initial.get_or_insert(self.transform)
    }

    /// Captured rest transform, falling back to the current one.
    pub fn rest(&self) -> Transform {
        self.initial.unwrap_or(self.transform)
    }
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    by_name: FnvHashMap<String, NodeId>,
    /// Day/night blend read by the room materials (0 = day, 1 = night).
    pub theme_mix: f32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_name.entry(node.name.clone()).or_insert(id);
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Local-to-world matrix, composed through parent links.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cursor = Some(id);
        // guard against accidental parent cycles
        let mut hops = 0usize;
        while let Some(cur) = cursor {
            let Some(node) = self.get(cur) else { break };
            m = node.transform.matrix() * m;
            cursor = node.parent;
            hops += 1;
            if hops > self.nodes.len() {
                log::warn!("[scene] parent cycle at node {}", node.name);
                break;
            }
        }
        m
    }

    /// World-space bounds of a mesh node in its current state.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let local = self.get(id)?.local_bounds?;
        Some(local.transformed(&self.world_matrix(id)))
    }
}
