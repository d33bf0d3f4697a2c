// Host-side tests for piano ducking, mute and the cooperative timers.

mod common;

use common::*;
use room_core::*;

fn piano_room() -> (Room, RecordingAudio) {
    let mut room = ready_room();
    room.hitboxes.build_deferred(&mut room.scene);
    aim_at(&mut room, KEY_C1);
    let mut audio = RecordingAudio::default();
    frame_at(&mut room, &mut audio, 0.0);
    (room, audio)
}

fn press(room: &mut Room, audio: &mut RecordingAudio) {
    let mut effects = Vec::new();
    room.click(audio, &mut effects);
    assert!(effects.is_empty());
}

#[test]
fn key_click_ducks_music_and_plays_the_key() {
    let (mut room, mut audio) = piano_room();
    press(&mut room, &mut audio);

    let key = PianoKey::from_index(0).unwrap();
    assert_eq!(audio.plays(SoundId::Piano(key)), 1);
    assert_eq!(audio.music_fades(), vec![(1.0, 0.0)]);
    assert!(room.state.audio.music_ducked);
    assert_eq!(room.timers.due(TimerKind::PianoResume), Some(2000.0));
}

#[test]
fn repeated_keys_push_the_resume_back() {
    let (mut room, mut audio) = piano_room();
    press(&mut room, &mut audio);
    run(&mut room, &mut audio, 16.0, 484.0);
    frame_at(&mut room, &mut audio, 500.0);
    press(&mut room, &mut audio);

    // only one duck for the whole phrase
    assert_eq!(audio.music_fades().len(), 1);
    assert_eq!(room.timers.due(TimerKind::PianoResume), Some(2500.0));

    run(&mut room, &mut audio, 516.0, 2496.0);
    assert_eq!(audio.music_fades().len(), 1);
    assert!(room.state.audio.music_ducked);

    frame_at(&mut room, &mut audio, 2500.0);
    assert_eq!(audio.music_fades(), vec![(1.0, 0.0), (0.0, 1.0)]);
    assert!(!room.state.audio.music_ducked);
    assert!(!room.timers.is_armed(TimerKind::PianoResume));
}

#[test]
fn muted_room_never_ducks() {
    let (mut room, mut audio) = piano_room();
    let mut effects = Vec::new();
    room.toggle_mute(&mut audio, &mut effects);
    assert_eq!(effects, vec![Effect::MuteChanged { muted: true }]);
    assert!(audio
        .events
        .contains(&AudioEvent::SetVolume(SoundId::Music, 0.0)));
    assert!(audio
        .events
        .contains(&AudioEvent::Muted(SoundId::Click, true)));

    press(&mut room, &mut audio);
    assert!(audio.music_fades().is_empty());
    assert!(!room.state.audio.music_ducked);

    // the resume timer firing while muted changes nothing either
    run(&mut room, &mut audio, 16.0, 2100.0);
    assert!(audio.music_fades().is_empty());
}

#[test]
fn unmute_restores_music_volume() {
    let (mut room, mut audio) = piano_room();
    let mut effects = Vec::new();
    room.toggle_mute(&mut audio, &mut effects);
    room.toggle_mute(&mut audio, &mut effects);
    assert_eq!(audio.volume(SoundId::Music), 1.0);
    assert!(audio
        .events
        .contains(&AudioEvent::Muted(SoundId::Click, false)));
    // each toggle clicks
    assert_eq!(audio.plays(SoundId::Click), 2);
}

#[test]
fn muting_mid_duck_lets_the_next_phrase_duck_again() {
    let (mut room, mut audio) = piano_room();
    let mut effects = Vec::new();
    press(&mut room, &mut audio);
    room.toggle_mute(&mut audio, &mut effects);
    assert!(!room.state.audio.music_ducked);

    // the resume timer fires while muted
    run(&mut room, &mut audio, 16.0, 2100.0);
    assert!(!room.timers.is_armed(TimerKind::PianoResume));

    room.toggle_mute(&mut audio, &mut effects);
    assert!(!room.state.audio.music_ducked);
    assert_eq!(audio.volume(SoundId::Music), 1.0);

    press(&mut room, &mut audio);
    assert!(room.state.audio.music_ducked);
    assert_eq!(audio.music_fades(), vec![(1.0, 0.0), (1.0, 0.0)]);
}

#[test]
fn unmuting_before_the_resume_skips_the_fade_back() {
    let (mut room, mut audio) = piano_room();
    let mut effects = Vec::new();
    press(&mut room, &mut audio);
    room.toggle_mute(&mut audio, &mut effects);
    room.toggle_mute(&mut audio, &mut effects);
    assert_eq!(audio.volume(SoundId::Music), 1.0);

    run(&mut room, &mut audio, 16.0, 2100.0);
    assert_eq!(audio.music_fades(), vec![(1.0, 0.0)]);
    assert_eq!(audio.volume(SoundId::Music), 1.0);
}

#[test]
fn pressed_key_dips_and_swings_back_to_rest() {
    let (mut room, mut audio) = piano_room();
    let key = node(&room, KEY_C1);
    press(&mut room, &mut audio);

    run(&mut room, &mut audio, 16.0, 200.0);
    assert!(room.scene.get(key).unwrap().transform.rotation.x > 0.0);

    run(&mut room, &mut audio, 216.0, 1000.0);
    assert_eq!(room.scene.get(key).unwrap().transform.rotation.x, 0.0);
    assert!(!room
        .tweens
        .is_animating(TweenTarget::Node(key, Channel::Rotation)));
}

#[test]
fn leaving_a_key_mid_press_returns_it_to_rest() {
    let (mut room, mut audio) = piano_room();
    let key = node(&room, KEY_C1);
    let rest = room.scene.get(key).unwrap().rest().rotation;
    press(&mut room, &mut audio);

    run(&mut room, &mut audio, 16.0, 100.0);
    assert!(room.scene.get(key).unwrap().transform.rotation.x > rest.x);

    aim_at_nothing(&mut room);
    run(&mut room, &mut audio, 116.0, 3000.0);
    assert_eq!(room.state.hovered, None);
    assert_eq!(room.scene.get(key).unwrap().transform.rotation, rest);
    assert!(!room
        .tweens
        .is_animating(TweenTarget::Node(key, Channel::Rotation)));
}

#[test]
fn duck_and_unduck_are_idempotent() {
    let mut audio = RecordingAudio::default();
    let mut state = AudioState::default();
    state.unduck(&mut audio, 500.0);
    assert!(audio.events.is_empty());
    state.duck(&mut audio, 500.0);
    state.duck(&mut audio, 500.0);
    assert_eq!(audio.music_fades(), vec![(1.0, 0.0)]);
}

#[test]
fn rescheduling_a_timer_replaces_its_deadline() {
    let mut timers = Timers::new();
    timers.schedule(TimerKind::PianoResume, 0.0, 2000.0);
    timers.schedule(TimerKind::PianoResume, 500.0, 2000.0);
    assert_eq!(timers.due(TimerKind::PianoResume), Some(2500.0));
    assert!(timers.poll(2000.0).is_empty());
    assert_eq!(timers.poll(2500.0).as_slice(), &[TimerKind::PianoResume]);
    assert!(timers.poll(3000.0).is_empty());
}

#[test]
fn timers_fire_earliest_first_and_cancel() {
    let mut timers = Timers::new();
    timers.schedule(TimerKind::DeferredHitboxes, 0.0, 300.0);
    timers.schedule(TimerKind::RevealDone, 0.0, 100.0);
    timers.schedule(TimerKind::PianoResume, 0.0, 200.0);
    assert!(timers.cancel(TimerKind::PianoResume));
    assert!(!timers.cancel(TimerKind::PianoResume));
    assert_eq!(
        timers.poll(1000.0).as_slice(),
        &[TimerKind::RevealDone, TimerKind::DeferredHitboxes]
    );
}
