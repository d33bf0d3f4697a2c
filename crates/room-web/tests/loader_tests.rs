// Host-side tests for reading model files into the scene graph.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod loader {
    include!("../src/loader.rs");
}

use glam::Vec3;
use loader::scene_from_gltf;
use std::f32::consts::FRAC_PI_4;

const SHELF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [
    { "name": "Shelf", "translation": [1.0, 2.0, 3.0], "children": [1] },
    {
      "name": "Mug",
      "mesh": 0,
      "rotation": [0.0, 0.38268343, 0.0, 0.9238795],
      "scale": [2.0, 2.0, 2.0]
    }
  ],
  "meshes": [{
    "primitives": [
      { "attributes": { "POSITION": 0 } },
      { "attributes": { "POSITION": 1 } }
    ]
  }],
  "accessors": [
    {
      "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [-1.0, 0.0, -0.5], "max": [1.0, 0.5, 0.5]
    },
    {
      "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [-0.5, -0.25, -2.0], "max": [0.5, 1.5, 0.0]
    }
  ],
  "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
  "buffers": [{ "byteLength": 36 }]
}"#;

#[test]
fn nodes_keep_names_and_hierarchy() {
    let scene = scene_from_gltf(SHELF.as_bytes()).unwrap();
    assert_eq!(scene.len(), 2);
    let shelf = scene.find("Shelf").unwrap();
    let mug = scene.find("Mug").unwrap();
    assert_eq!(scene.get(mug).unwrap().parent, Some(shelf));
    assert_eq!(scene.get(shelf).unwrap().parent, None);
}

#[test]
fn transforms_are_decomposed() {
    let scene = scene_from_gltf(SHELF.as_bytes()).unwrap();
    let shelf = scene.get(scene.find("Shelf").unwrap()).unwrap();
    assert_eq!(shelf.transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(shelf.transform.scale, Vec3::ONE);

    let mug = scene.get(scene.find("Mug").unwrap()).unwrap();
    assert_eq!(mug.transform.scale, Vec3::splat(2.0));
    let r = mug.transform.rotation;
    assert!(r.x.abs() < 1e-5 && r.z.abs() < 1e-5, "{:?}", r);
    assert!((r.y - FRAC_PI_4).abs() < 1e-5, "{:?}", r);
}

#[test]
fn mesh_bounds_cover_every_primitive() {
    let scene = scene_from_gltf(SHELF.as_bytes()).unwrap();
    let shelf = scene.get(scene.find("Shelf").unwrap()).unwrap();
    assert!(shelf.local_bounds.is_none());

    let mug = scene.get(scene.find("Mug").unwrap()).unwrap();
    let bounds = mug.local_bounds.unwrap();
    assert_eq!(bounds.min, Vec3::new(-1.0, -0.25, -2.0));
    assert_eq!(bounds.max, Vec3::new(1.0, 1.5, 0.5));
}

#[test]
fn unreadable_files_are_errors() {
    assert!(scene_from_gltf(b"not a model").is_err());
    let err = scene_from_gltf(br#"{ "asset": { "version": "2.0" } }"#).unwrap_err();
    assert!(err.to_string().contains("no scene"));
}
