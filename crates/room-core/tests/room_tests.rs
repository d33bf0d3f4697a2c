// Host-side tests for the load, entry, reveal and intro lifecycle.

mod common;

use common::*;
use glam::{Vec2, Vec3};
use room_core::constants::*;
use room_core::*;

fn loaded(scene: SceneGraph) -> Room {
    let mut room = Room::new(RoomParams::default(), desktop());
    room.load_scene(scene);
    let mut effects = Vec::new();
    room.begin_loading(1, &mut effects);
    room.asset_loaded(&mut effects);
    room
}

/// Enter at t = 0 and step through the end of the reveal.
fn revealed(scene: SceneGraph) -> (Room, RecordingAudio) {
    let mut room = loaded(scene);
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.enter(&mut audio, &mut effects).unwrap();
    // keep the pointer off every hitbox
    room.pointer_move(Vec2::splat(5.0));
    run(&mut room, &mut audio, 0.0, REVEAL_MS - 6.0);
    assert_eq!(room.phase(), LoadPhase::Entering);
    frame_at(&mut room, &mut audio, REVEAL_MS);
    assert_eq!(room.phase(), LoadPhase::Revealed);
    (room, audio)
}

/// Step frames until the deferred hitbox timer is armed; returns that time.
fn run_until_settled(room: &mut Room, audio: &mut RecordingAudio, from: f64) -> f64 {
    let mut t = from;
    while !room.timers.is_armed(TimerKind::DeferredHitboxes) {
        assert!(t < 30_000.0, "intro never settled");
        frame_at(room, audio, t);
        t += FRAME_MS;
    }
    t - FRAME_MS
}

#[test]
fn entry_unlocks_once_every_asset_arrived() {
    let mut room = Room::new(RoomParams::default(), desktop());
    let mut effects = Vec::new();
    room.begin_loading(3, &mut effects);
    room.asset_loaded(&mut effects);
    room.asset_loaded(&mut effects);
    assert!(effects.is_empty());
    assert_eq!(room.phase(), LoadPhase::Loading);

    room.asset_loaded(&mut effects);
    room.asset_loaded(&mut effects);
    assert_eq!(effects, vec![Effect::EntryReady]);
    assert_eq!(room.phase(), LoadPhase::Ready);
}

#[test]
fn nothing_to_load_is_ready_at_once() {
    let mut room = Room::new(RoomParams::default(), desktop());
    let mut effects = Vec::new();
    room.begin_loading(0, &mut effects);
    assert_eq!(effects, vec![Effect::EntryReady]);
}

#[test]
fn entering_before_ready_is_refused() {
    let mut room = Room::new(RoomParams::default(), desktop());
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.begin_loading(2, &mut effects);
    assert_eq!(
        room.enter(&mut audio, &mut effects),
        Err(RoomError::NotReady("loading"))
    );
    assert!(audio.events.is_empty());
}

#[test]
fn failed_asset_keeps_entry_locked() {
    let mut room = Room::new(RoomParams::default(), desktop());
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.begin_loading(2, &mut effects);
    room.asset_failed("room.glb", &mut effects);
    room.asset_loaded(&mut effects);
    room.asset_loaded(&mut effects);

    assert_eq!(room.phase(), LoadPhase::Failed);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::LoadFailed(msg) => assert!(msg.contains("room.glb")),
        other => panic!("unexpected effect {:?}", other),
    }
    assert!(room.enter(&mut audio, &mut effects).is_err());
}

#[test]
fn enter_starts_music_and_the_reveal_once() {
    let mut room = loaded(sample_scene());
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.enter(&mut audio, &mut effects).unwrap();
    assert_eq!(effects, vec![Effect::RevealStarted]);
    assert_eq!(audio.plays(SoundId::Music), 1);
    assert_eq!(room.phase(), LoadPhase::Entering);

    assert_eq!(
        room.enter(&mut audio, &mut effects),
        Err(RoomError::NotReady("entering"))
    );
    assert_eq!(audio.plays(SoundId::Music), 1);
}

#[test]
fn picking_waits_for_the_loading_screen() {
    let mut room = loaded(sample_scene());
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.enter(&mut audio, &mut effects).unwrap();
    room.camera.position = Vec3::new(0.0, 0.0, 10.0);
    room.camera.target = Vec3::ZERO;
    aim_at(&mut room, COFFEE);

    let effects = run(&mut room, &mut audio, 0.0, REVEAL_MS - 6.0);
    assert!(!effects.contains(&Effect::LoadingScreenDone));
    assert_eq!(room.state.hovered, None);
    assert!(room.state.intersections.is_empty());

    let effects = frame_at(&mut room, &mut audio, REVEAL_MS);
    assert!(effects.contains(&Effect::LoadingScreenDone));
    assert_eq!(room.hovered_node(), Some(node(&room, COFFEE)));
}

#[test]
fn deferred_hitboxes_arrive_once_after_the_piano_settles() {
    let (mut room, mut audio) = revealed(sample_scene());
    assert_eq!(room.hitboxes.len(), 4);
    assert_eq!(room.hitboxes.phase(), DeferredPhase::Waiting);

    let settled_at = run_until_settled(&mut room, &mut audio, REVEAL_MS + FRAME_MS);
    let due = room.timers.due(TimerKind::DeferredHitboxes).unwrap();
    assert_eq!(due, settled_at + HITBOX_SETTLE_MS);
    assert_eq!(room.hitboxes.phase(), DeferredPhase::Scheduled);

    let mut t = settled_at + FRAME_MS;
    while t < due {
        frame_at(&mut room, &mut audio, t);
        t += FRAME_MS;
    }
    assert_eq!(room.hitboxes.len(), 4);

    frame_at(&mut room, &mut audio, due);
    assert_eq!(room.hitboxes.len(), 11);
    assert_eq!(room.hitboxes.phase(), DeferredPhase::Built);

    run(&mut room, &mut audio, due + FRAME_MS, due + 3000.0);
    assert_eq!(room.hitboxes.len(), 11);
    assert!(!room.timers.is_armed(TimerKind::DeferredHitboxes));
}

#[test]
fn intro_leaves_everything_at_rest() {
    let (mut room, mut audio) = revealed(sample_scene());
    let start = REVEAL_MS + FRAME_MS;
    run(&mut room, &mut audio, start, start + 12_000.0);
    assert!(room.tweens.is_empty());

    for id in room.registry.deferred_pickables.clone() {
        let n = room.scene.get(id).unwrap();
        assert_eq!(n.transform.scale, Vec3::ONE, "{}", n.name);
    }
    let letter = room.scene.get(node(&room, LETTER_1)).unwrap();
    assert_eq!(letter.transform.position, letter.rest().position);
    let key = room.scene.get(node(&room, KEY_CS1)).unwrap();
    assert_eq!(key.transform.position, key.rest().position);
}

#[test]
fn room_without_piano_settles_at_reveal() {
    let mut scene = SceneGraph::new();
    scene.add(mesh_at(ABOUT, Vec3::ZERO));
    scene.add(mesh_at(COFFEE, Vec3::X * 2.0));
    let (room, _) = revealed(scene);
    assert_eq!(
        room.timers.due(TimerKind::DeferredHitboxes),
        Some(REVEAL_MS + HITBOX_SETTLE_MS)
    );
}

#[test]
fn smoke_sits_above_the_coffee() {
    let room = ready_room();
    let smoke = room.scene.get(room.smoke().unwrap()).unwrap();
    assert_eq!(smoke.name, SMOKE_NODE_NAME);
    assert_eq!(smoke.transform.position, Vec3::new(0.0, SMOKE_LIFT, 0.0));

    let mut bare = Room::new(RoomParams::default(), desktop());
    bare.load_scene(SceneGraph::new());
    let smoke = bare.scene.get(bare.smoke().unwrap()).unwrap();
    assert_eq!(smoke.transform.position.y, SMOKE_BASE_Y);
}

#[test]
fn theme_toggle_blends_and_reverses() {
    let mut room = ready_room();
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.toggle_theme(&mut audio, &mut effects);
    assert_eq!(effects, vec![Effect::ThemeChanged { night: true }]);
    assert_eq!(audio.plays(SoundId::Click), 1);

    run(&mut room, &mut audio, 0.0, 496.0);
    let partway = room.scene.theme_mix;
    assert!(partway > 0.0 && partway < 1.0);

    room.toggle_theme(&mut audio, &mut effects);
    assert_eq!(
        room.tweens.destination(TweenTarget::ThemeMix),
        Some(Vec3::ZERO)
    );
    run(&mut room, &mut audio, 512.0, 2200.0);
    assert_eq!(room.scene.theme_mix, 0.0);
    assert!(!room.state.night_mode);
}

#[test]
fn modal_exit_clicks_and_closes() {
    let mut room = ready_room();
    let mut audio = RecordingAudio::default();
    let mut effects = Vec::new();
    room.open_modal(ModalKind::Work, &mut effects);
    effects.clear();

    room.modal_exit(&mut audio, &mut effects);
    assert_eq!(effects, vec![Effect::HideModal(ModalKind::Work)]);
    assert_eq!(audio.plays(SoundId::Click), 1);

    // overlay close with nothing open is a no-op
    room.close_modal(&mut effects);
    assert_eq!(effects.len(), 1);
}
