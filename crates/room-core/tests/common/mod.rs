// Shared fixtures for the room-core integration tests: a small room model, a
// recording audio backend and frame-stepping helpers.

#![allow(dead_code)]

use glam::{Vec2, Vec3};
use room_core::ambient::LocalTime;
use room_core::*;
use std::collections::HashMap;

pub fn unit_box() -> Aabb {
    Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5))
}

pub fn mesh_at(name: &str, position: Vec3) -> SceneNode {
    SceneNode::mesh(name, unit_box()).with_transform(Transform {
        position,
        ..Transform::default()
    })
}

pub const ABOUT: &str = "About_Button_Raycaster_Hover_Pointer_First";
pub const WORK: &str = "My_Work_Button_Raycaster_Hover_Pointer_First";
pub const GITHUB: &str = "GitHub_Raycaster_Hover_Pointer_Third";
pub const COFFEE: &str = "Coffee_Raycaster_Hover_Pointer_Second";
pub const HEADPHONES: &str = "Headphones_Raycaster_Hover_Fourth";
pub const BULB: &str = "Bulb_Raycaster_Hover_Pointer_First";
pub const PLANT: &str = "Plant_Raycaster_Second";
pub const FISH: &str = "Fish_Fourth_Raycaster_Hover_Pointer";
pub const KEY_C1: &str = "C1_Key_Raycaster_Hover_Pointer_Second";
pub const KEY_CS1: &str = "C#1_Key_Raycaster_Hover_Pointer_Second";
pub const LETTER_1: &str = "Name_Letter_1_Raycaster_Hover_Third";

/// A room laid out on the z = 0 plane in front of a camera at (0, 0, 10),
/// plus a few non-pickable ambient props behind it.
pub fn sample_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    let root = scene.add(SceneNode::new("Scene"));
    let pickables = [
        (ABOUT, Vec3::new(-4.0, 2.0, 0.0)),
        (WORK, Vec3::new(-2.0, 2.0, 0.0)),
        (GITHUB, Vec3::new(2.0, 2.0, 0.0)),
        (LETTER_1, Vec3::new(4.0, 2.0, 0.0)),
        (COFFEE, Vec3::new(0.0, 0.0, 0.0)),
        (HEADPHONES, Vec3::new(3.0, 0.0, 0.0)),
        (BULB, Vec3::new(-3.0, 0.0, 0.0)),
        (PLANT, Vec3::new(0.0, -2.0, 0.0)),
        (FISH, Vec3::new(-2.0, -2.0, 0.0)),
        (KEY_C1, Vec3::new(1.5, -2.0, 0.0)),
        (KEY_CS1, Vec3::new(3.0, -2.0, 0.0)),
    ];
    for (name, position) in pickables {
        scene.add(mesh_at(name, position).with_parent(root));
    }
    let props = [
        ("Chair_Top_Second", Vec3::new(0.0, 0.0, -20.0)),
        ("Hour_Hand_Third", Vec3::new(1.0, 0.0, -20.0)),
        ("Minute_Hand_Third", Vec3::new(2.0, 0.0, -20.0)),
        ("Fan_1_Fourth", Vec3::new(3.0, 0.0, -20.0)),
        ("Fan_2_Fourth", Vec3::new(4.0, 0.0, -20.0)),
        ("Room_Walls_First", Vec3::new(0.0, -5.0, -20.0)),
    ];
    for (name, position) in props {
        scene.add(mesh_at(name, position).with_parent(root));
    }
    scene
}

pub fn desktop() -> Viewport {
    Viewport::new(1920.0, 1080.0, 1.0)
}

/// Loaded room looking straight down -Z at the sample layout, with picking
/// unlocked so hover can be driven without playing the intro.
pub fn ready_room() -> Room {
    let mut room = Room::new(RoomParams::default(), desktop());
    room.load_scene(sample_scene());
    room.camera.position = Vec3::new(0.0, 0.0, 10.0);
    room.camera.target = Vec3::ZERO;
    room.state.picking_unlocked = true;
    room
}

pub fn node(room: &Room, name: &str) -> NodeId {
    room.scene.find(name).unwrap()
}

/// Pointer position that aims at a world point.
pub fn ndc_of(room: &Room, world: Vec3) -> Vec2 {
    room.camera.view_proj().project_point3(world).truncate()
}

pub fn aim_at(room: &mut Room, name: &str) {
    let id = node(room, name);
    let target = room.scene.world_bounds(id).unwrap().center();
    let ndc = ndc_of(room, target);
    room.pointer_move(ndc);
}

pub fn aim_at_nothing(room: &mut Room) {
    room.pointer_move(Vec2::new(0.95, -0.95));
}

pub const FRAME_MS: f64 = 16.0;

pub fn frame_at(room: &mut Room, audio: &mut RecordingAudio, now_ms: f64) -> Vec<Effect> {
    let mut effects = Vec::new();
    let input = FrameInput {
        now_ms,
        dt_sec: (FRAME_MS / 1000.0) as f32,
        local_time: LocalTime::default(),
    };
    room.frame(input, audio, &mut effects);
    effects
}

/// Step frames from `from_ms` up to and including `to_ms`.
pub fn run(room: &mut Room, audio: &mut RecordingAudio, from_ms: f64, to_ms: f64) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut t = from_ms;
    while t <= to_ms {
        effects.extend(frame_at(room, audio, t));
        t += FRAME_MS;
    }
    effects
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    Play(SoundId),
    SetVolume(SoundId, f32),
    Fade { sound: SoundId, from: f32, to: f32 },
    Muted(SoundId, bool),
}

#[derive(Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
    volumes: HashMap<SoundId, f32>,
}

impl RecordingAudio {
    pub fn plays(&self, sound: SoundId) -> usize {
        self.events
            .iter()
            .filter(|e| **e == AudioEvent::Play(sound))
            .count()
    }

    pub fn music_fades(&self) -> Vec<(f32, f32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AudioEvent::Fade {
                    sound: SoundId::Music,
                    from,
                    to,
                } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        self.events.push(AudioEvent::Play(sound));
    }

    fn volume(&self, sound: SoundId) -> f32 {
        self.volumes
            .get(&sound)
            .copied()
            .unwrap_or_else(|| sound.base_volume())
    }

    fn set_volume(&mut self, sound: SoundId, volume: f32) {
        self.volumes.insert(sound, volume);
        self.events.push(AudioEvent::SetVolume(sound, volume));
    }

    fn fade(&mut self, sound: SoundId, from: f32, to: f32, _duration_ms: f64) {
        self.volumes.insert(sound, to);
        self.events.push(AudioEvent::Fade { sound, from, to });
    }

    fn set_muted(&mut self, sound: SoundId, muted: bool) {
        self.events.push(AudioEvent::Muted(sound, muted));
    }
}
