//! Ray casting from the pointer into the pickable set.
//!
//! Proxy volumes are tested as oriented boxes; nodes that pick through their
//! own mesh are tested against their object-space bounds, in object space, so
//! a node scaled to nothing can never be hit.

use crate::camera::Camera;
use crate::hitbox::{HitboxId, HitboxManager, Obb, Proxy};
use crate::scene::{Aabb, NodeId, SceneGraph};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from the camera through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn from_ndc(camera: &Camera, ndc: Vec2) -> Self {
        let inv = camera.view_proj().inverse();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(camera.position, far - camera.position)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab test. Returns the entry distance, or the exit distance when the
/// origin is inside the box.
pub fn ray_aabb(origin: Vec3, direction: Vec3, aabb: &Aabb) -> Option<f32> {
    let inv = direction.recip();
    let t0 = (aabb.min - origin) * inv;
    let t1 = (aabb.max - origin) * inv;
    let near = t0.min(t1).max_element();
    let far = t0.max(t1).min_element();
    if near <= far && far >= 0.0 {
        Some(if near >= 0.0 { near } else { far })
    } else {
        None
    }
}

pub fn ray_obb(ray: &Ray, obb: &Obb) -> Option<f32> {
    let to_local = obb.rotation.inverse();
    let origin = to_local * (ray.origin - obb.center);
    let direction = to_local * ray.direction;
    ray_aabb(
        origin,
        direction,
        &Aabb::new(-obb.half_extents, obb.half_extents),
    )
}

/// Intersect a mesh's object-space bounds placed by `world`.
pub fn ray_local_bounds(ray: &Ray, world: &Mat4, bounds: &Aabb) -> Option<f32> {
    if bounds.is_degenerate() || world.determinant().abs() <= f32::EPSILON {
        return None;
    }
    let inv = world.inverse();
    // direction stays unnormalised so t is still measured along the world ray
    let origin = inv.transform_point3(ray.origin);
    let direction = inv.transform_vector3(ray.direction);
    ray_aabb(origin, direction, bounds)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub hitbox: HitboxId,
    pub node: NodeId,
    pub distance: f32,
}

pub type Hits = SmallVec<[Intersection; 8]>;

/// All proxies under the ray, nearest first.
pub fn pick(ray: &Ray, hitboxes: &HitboxManager, scene: &SceneGraph) -> Hits {
    let mut hits: Hits = hitboxes
        .iter()
        .filter_map(|(id, entry)| {
            let distance = match entry.proxy {
                Proxy::Volume(obb) => ray_obb(ray, &obb),
                Proxy::Source(node) => {
                    let bounds = scene.get(node)?.local_bounds?;
                    ray_local_bounds(ray, &scene.world_matrix(node), &bounds)
                }
            }?;
            Some(Intersection {
                hitbox: id,
                node: entry.source,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
