use glam::Vec2;
use std::f32::consts::TAU;

/// Horizontal drag across the full canvas height turns the orbit once.
pub const ROTATE_SPEED: f32 = 1.0;
/// Orbit zoom units per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 1.0;

/// Client-space position to normalized device coordinates, y up.
#[inline]
pub fn client_to_ndc(client: Vec2, origin: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let local = (client - origin) / size;
    Vec2::new(local.x * 2.0 - 1.0, -(local.y * 2.0 - 1.0))
}

/// Pixel drag to (left, up) orbit angles, scaled by the element height.
#[inline]
pub fn drag_to_orbit(delta_px: Vec2, height_px: f32) -> (f32, f32) {
    if height_px <= 0.0 {
        return (0.0, 0.0);
    }
    let per_px = TAU * ROTATE_SPEED / height_px;
    (delta_px.x * per_px, delta_px.y * per_px)
}

/// One zoom step per wheel event, signed by the scroll direction.
#[inline]
pub fn wheel_steps(delta_y: f64) -> f32 {
    if delta_y > 0.0 {
        WHEEL_ZOOM_STEP
    } else if delta_y < 0.0 {
        -WHEEL_ZOOM_STEP
    } else {
        0.0
    }
}

/// Tracks a single-pointer orbit drag.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        if self.active {
            return;
        }
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the last sample for the pointer that started the drag.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}
