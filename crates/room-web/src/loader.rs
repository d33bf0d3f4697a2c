use glam::{EulerRot, Quat, Vec3};
use room_core::{Aabb, NodeId, SceneGraph, SceneNode, Transform};

/// Build the scene graph from a glTF or GLB file.
///
/// Only names, transforms, hierarchy and mesh bounds are read; materials and
/// vertex data stay in the file.
pub fn scene_from_gltf(bytes: &[u8]) -> anyhow::Result<SceneGraph> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| anyhow::anyhow!("model has no scene"))?;

    let mut graph = SceneGraph::new();
    for node in scene.nodes() {
        add_node(&mut graph, &node, None);
    }
    Ok(graph)
}

fn add_node(graph: &mut SceneGraph, node: &gltf::Node, parent: Option<NodeId>) {
    let name = node.name().unwrap_or_default();
    let base = match node.mesh().and_then(|m| mesh_bounds(&m)) {
        Some(bounds) => SceneNode::mesh(name, bounds),
        None => SceneNode::new(name),
    };
    let mut scene_node = base.with_transform(local_transform(node));
    if let Some(parent) = parent {
        scene_node = scene_node.with_parent(parent);
    }
    let id = graph.add(scene_node);
    for child in node.children() {
        add_node(graph, &child, Some(id));
    }
}

fn local_transform(node: &gltf::Node) -> Transform {
    let (translation, rotation, scale) = node.transform().decomposed();
    let (x, y, z) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);
    Transform {
        position: Vec3::from(translation),
        rotation: Vec3::new(x, y, z),
        scale: Vec3::from(scale),
    }
}

/// Union of every primitive's POSITION bounds.
fn mesh_bounds(mesh: &gltf::Mesh) -> Option<Aabb> {
    mesh.primitives()
        .map(|p| {
            let b = p.bounding_box();
            Aabb::new(Vec3::from(b.min), Vec3::from(b.max))
        })
        .reduce(|a, b| a.union(&b))
}
