//! Per-frame idle motion: clock, fans, chair sway, fish bob.

use crate::constants::*;
use crate::registry::{Registry, Role};
use crate::scene::SceneGraph;
use std::f32::consts::TAU;

/// Wall-clock reading in local time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// `(hour, minute)` hand angles in radians, measured clockwise from twelve.
pub fn clock_angles(time: LocalTime) -> (f32, f32) {
    let minutes = time.minutes as f32 + time.seconds as f32 / 60.0;
    let hours = (time.hours % 12) as f32 + time.minutes as f32 / 60.0;
    (hours * TAU / 12.0, minutes * TAU / 60.0)
}

/// Damped sine used by the chair and the fish: the peaks flatten out.
pub fn eased_swing(amplitude: f32, t: f32, flatten: f32) -> f32 {
    let s = t.sin();
    amplitude * s * (1.0 - s.abs() * flatten)
}

pub fn update_clock(scene: &mut SceneGraph, registry: &Registry, time: LocalTime) {
    let (Some(hour), Some(minute)) = (
        registry.get(Role::HourHand),
        registry.get(Role::MinuteHand),
    ) else {
        return;
    };
    let (hour_angle, minute_angle) = clock_angles(time);
    if let Some(n) = scene.get_mut(minute) {
        n.transform.rotation.x = -minute_angle;
    }
    if let Some(n) = scene.get_mut(hour) {
        n.transform.rotation.x = -hour_angle;
    }
}

pub fn spin_fans(scene: &mut SceneGraph, registry: &Registry) {
    for id in &registry.x_axis_fans {
        if let Some(n) = scene.get_mut(*id) {
            n.transform.rotation.x -= FAN_STEP_PER_FRAME;
        }
    }
    for id in &registry.y_axis_fans {
        if let Some(n) = scene.get_mut(*id) {
            n.transform.rotation.y -= FAN_STEP_PER_FRAME;
        }
    }
}

/// `now_ms` is the frame timestamp.
pub fn sway_chair(scene: &mut SceneGraph, registry: &Registry, now_ms: f64) {
    let Some(node) = registry.get(Role::ChairTop).and_then(|id| scene.get_mut(id)) else {
        return;
    };
    let t = (now_ms * 0.001) as f32 * CHAIR_SWAY_RATE;
    node.transform.rotation.y =
        node.rest().rotation.y + eased_swing(CHAIR_SWAY_AMPLITUDE, t, CHAIR_SWAY_FLATTEN);
}

pub fn bob_fish(scene: &mut SceneGraph, registry: &Registry, now_ms: f64) {
    let Some(node) = registry.get(Role::Fish).and_then(|id| scene.get_mut(id)) else {
        return;
    };
    let t = (now_ms * FISH_BOB_RATE_PER_MS as f64) as f32;
    node.transform.position.y =
        node.rest().position.y + eased_swing(FISH_BOB_AMPLITUDE, t, FISH_BOB_FLATTEN);
}
