//! The room: one owner for the scene, its pickables, animation, timers and
//! interaction state.
//!
//! Frontends feed it input events and one [`Room::frame`] call per display
//! frame, and apply the [`Effect`]s it pushes (DOM changes, links, cursor).
//! Sound goes straight to the [`AudioBackend`] passed in.

use crate::ambient::{self, LocalTime};
use crate::audio::{AudioBackend, SoundId};
use crate::camera::{Camera, OrbitControls, Viewport};
use crate::constants::*;
use crate::error::{Result, RoomError};
use crate::hitbox::{HitboxId, HitboxManager};
use crate::interaction::{
    click_action, cursor_for, hover_candidate, hover_transition, play_hover_animation,
    press_key_tween, release_key_tween, ClickAction, CursorStyle, HoverTransition,
    InteractionState,
};
use crate::intro::intro_timelines;
use crate::picking::{pick, Ray};
use crate::registry::{ModalKind, PianoKey, Registry, Role};
use crate::scene::{Aabb, NodeId, SceneGraph, SceneNode, Transform};
use crate::timer::{TimerKind, Timers};
use crate::tween::{Easing, Tween, TweenEngine, TweenTag, TweenTarget};
use glam::{Vec2, Vec3};

/// Runtime-tunable timings and factors.
#[derive(Clone, Debug)]
pub struct RoomParams {
    pub hover_scale: f32,
    pub fish_hover_scale: f32,
    pub hover_enter_sec: f32,
    pub hover_exit_sec: f32,
    pub hover_overshoot: f32,
    pub piano_press_sec: f32,
    pub piano_release_sec: f32,
    pub piano_resume_ms: f64,
    pub music_fade_ms: f64,
    pub hitbox_settle_ms: f64,
    pub reveal_ms: f64,
    pub theme_fade_sec: f32,
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            hover_scale: HOVER_SCALE,
            fish_hover_scale: FISH_HOVER_SCALE,
            hover_enter_sec: HOVER_ENTER_SEC,
            hover_exit_sec: HOVER_EXIT_SEC,
            hover_overshoot: HOVER_OVERSHOOT,
            piano_press_sec: PIANO_PRESS_SEC,
            piano_release_sec: PIANO_RELEASE_SEC,
            piano_resume_ms: PIANO_RESUME_MS,
            music_fade_ms: MUSIC_FADE_MS,
            hitbox_settle_ms: HITBOX_SETTLE_MS,
            reveal_ms: REVEAL_MS,
            theme_fade_sec: THEME_FADE_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    /// Everything arrived; the entry button is live.
    Ready,
    /// Entry pressed, loading screen on its way out.
    Entering,
    Revealed,
    /// An asset failed. Entry stays locked.
    Failed,
}

impl LoadPhase {
    pub fn name(self) -> &'static str {
        match self {
            LoadPhase::Loading => "loading",
            LoadPhase::Ready => "ready",
            LoadPhase::Entering => "entering",
            LoadPhase::Revealed => "revealed",
            LoadPhase::Failed => "failed",
        }
    }
}

/// Requests for the frontend.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    EntryReady,
    LoadFailed(String),
    RevealStarted,
    LoadingScreenDone,
    ShowModal(ModalKind),
    HideModal(ModalKind),
    /// Open in a new browsing context with no opener.
    OpenLink(&'static str),
    Cursor(CursorStyle),
    ThemeChanged { night: bool },
    MuteChanged { muted: bool },
    /// Backing-store size in device pixels after a resize.
    Resized { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Frame timestamp in milliseconds.
    pub now_ms: f64,
    pub dt_sec: f32,
    pub local_time: LocalTime,
}

pub struct Room {
    pub params: RoomParams,
    pub scene: SceneGraph,
    pub registry: Registry,
    pub hitboxes: HitboxManager,
    pub tweens: TweenEngine,
    pub timers: Timers,
    pub state: InteractionState,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    phase: LoadPhase,
    assets_total: usize,
    assets_done: usize,
    smoke: Option<NodeId>,
    elapsed_sec: f32,
    now_ms: f64,
    finished: Vec<TweenTag>,
}

impl Room {
    pub fn new(params: RoomParams, viewport: Viewport) -> Self {
        Self {
            params,
            scene: SceneGraph::new(),
            registry: Registry::default(),
            hitboxes: HitboxManager::default(),
            tweens: TweenEngine::new(),
            timers: Timers::new(),
            state: InteractionState::default(),
            camera: Camera::new(&viewport),
            controls: OrbitControls::default(),
            viewport,
            phase: LoadPhase::Loading,
            assets_total: 0,
            assets_done: 0,
            smoke: None,
            elapsed_sec: 0.0,
            now_ms: 0.0,
            finished: Vec::new(),
        }
    }

    /// Take ownership of a freshly loaded scene: classify it, build the
    /// immediate hitboxes, queue the deferred ones and place the smoke.
    pub fn load_scene(&mut self, scene: SceneGraph) {
        self.scene = scene;
        self.registry = Registry::classify(&mut self.scene);
        self.hitboxes = HitboxManager::default();
        self.hitboxes
            .build_immediate(&mut self.scene, &self.registry.immediate_pickables);
        self.hitboxes.defer(&self.registry.deferred_pickables);
        self.smoke = Some(self.place_smoke());
    }

    fn place_smoke(&mut self) -> NodeId {
        let coffee = self
            .registry
            .get(Role::Coffee)
            .and_then(|id| self.scene.get(id))
            .map(|n| n.rest().position);
        let position = match coffee {
            Some(p) => p + Vec3::Y * SMOKE_LIFT,
            None => Vec3::new(0.0, SMOKE_BASE_Y, 0.0),
        };
        let bounds = Aabb::new(Vec3::new(-0.165, 0.0, 0.0), Vec3::new(0.165, 1.0, 0.0));
        self.scene.add(
            SceneNode::mesh(SMOKE_NODE_NAME, bounds).with_transform(Transform {
                position,
                ..Transform::default()
            }),
        )
    }

    pub fn smoke(&self) -> Option<NodeId> {
        self.smoke
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Seconds since the room started ticking; drives the smoke shader.
    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    /// Timestamp of the latest frame.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn hovered_node(&self) -> Option<NodeId> {
        let id = self.state.hovered?;
        self.hitboxes.get(id).map(|e| e.source)
    }

    // ---- loading and entry ----

    pub fn begin_loading(&mut self, total: usize, effects: &mut Vec<Effect>) {
        self.phase = LoadPhase::Loading;
        self.assets_total = total;
        self.assets_done = 0;
        if total == 0 {
            self.mark_ready(effects);
        }
    }

    pub fn asset_loaded(&mut self, effects: &mut Vec<Effect>) {
        if self.phase != LoadPhase::Loading {
            return;
        }
        self.assets_done += 1;
        log::debug!(
            "[loader] {}/{} assets",
            self.assets_done,
            self.assets_total
        );
        if self.assets_done >= self.assets_total {
            self.mark_ready(effects);
        }
    }

    fn mark_ready(&mut self, effects: &mut Vec<Effect>) {
        self.phase = LoadPhase::Ready;
        log::info!("[loader] all assets loaded");
        effects.push(Effect::EntryReady);
    }

    pub fn asset_failed(&mut self, what: &str, effects: &mut Vec<Effect>) {
        let err = RoomError::AssetLoad(what.to_string());
        log::error!("[loader] {}", err);
        if matches!(self.phase, LoadPhase::Loading | LoadPhase::Ready) {
            self.phase = LoadPhase::Failed;
            effects.push(Effect::LoadFailed(err.to_string()));
        }
    }

    /// The entry button was pressed.
    pub fn enter(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) -> Result<()> {
        if self.phase != LoadPhase::Ready {
            return Err(RoomError::NotReady(self.phase.name()));
        }
        self.phase = LoadPhase::Entering;
        audio.play(SoundId::Music);
        self.timers
            .schedule(TimerKind::RevealDone, self.now_ms, self.params.reveal_ms);
        effects.push(Effect::RevealStarted);
        log::info!("[intro] entering");
        Ok(())
    }

    fn finish_reveal(&mut self, effects: &mut Vec<Effect>) {
        self.phase = LoadPhase::Revealed;
        self.state.picking_unlocked = true;
        effects.push(Effect::LoadingScreenDone);
        self.start_intro();
    }

    fn start_intro(&mut self) {
        let mut settles = false;
        for timeline in intro_timelines(&self.registry, &self.scene) {
            for tween in timeline.schedule() {
                settles |= tween.tag == Some(TweenTag::IntroSettled);
                self.tweens.add(tween);
            }
        }
        log::info!("[intro] started, {} tweens", self.tweens.len());
        if !settles {
            // no piano keys in the model: nothing to wait for
            self.intro_settled();
        }
    }

    fn intro_settled(&mut self) {
        if self.hitboxes.mark_scheduled() {
            self.timers.schedule(
                TimerKind::DeferredHitboxes,
                self.now_ms,
                self.params.hitbox_settle_ms,
            );
        }
    }

    // ---- input ----

    /// Mouse movement; also ends any touch suppression.
    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.state.touch_happened = false;
        self.state.pointer_ndc = ndc;
    }

    pub fn touch_start(&mut self, ndc: Vec2) {
        if self.state.modal_open() {
            return;
        }
        self.state.pointer_ndc = ndc;
    }

    /// A tap on the scene. Acts immediately and suppresses the click the
    /// browser may synthesise for the same tap.
    pub fn touch_end(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        if self.state.modal_open() {
            return;
        }
        self.state.touch_happened = true;
        self.dispatch_click(audio, effects);
    }

    pub fn click(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        if std::mem::take(&mut self.state.touch_happened) {
            return;
        }
        self.dispatch_click(audio, effects);
    }

    /// UI buttons: a click is ignored when a touch already handled the tap.
    pub fn ui_click_allowed(&self) -> bool {
        !self.state.touch_happened
    }

    pub fn note_ui_touch(&mut self) {
        self.state.touch_happened = true;
    }

    fn dispatch_click(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        let Some(hit) = self.state.intersections.first().copied() else {
            return;
        };
        let role = self.scene.get(hit.node).and_then(|n| n.tags.role);
        match click_action(role) {
            ClickAction::OpenModal(kind) => {
                audio.play(SoundId::Click);
                self.open_modal(kind, effects);
            }
            ClickAction::OpenLink(url) => {
                log::info!("[link] {}", url);
                effects.push(Effect::OpenLink(url));
            }
            ClickAction::PlayKey(key) => self.play_key(key, hit.node, audio),
            ClickAction::Nothing => {}
        }
    }

    fn play_key(&mut self, key: PianoKey, node: NodeId, audio: &mut dyn AudioBackend) {
        self.timers.cancel(TimerKind::PianoResume);
        self.state.audio.duck(audio, self.params.music_fade_ms);
        audio.play(SoundId::Piano(key));
        self.timers.schedule(
            TimerKind::PianoResume,
            self.now_ms,
            self.params.piano_resume_ms,
        );
        press_key_tween(&mut self.tweens, &self.scene, node, &self.params);
        log::debug!("[piano] {}", key.node_name());
    }

    // ---- UI ----

    pub fn open_modal(&mut self, kind: ModalKind, effects: &mut Vec<Effect>) {
        self.state.modal = Some(kind);
        self.controls.enabled = false;
        if let Some(hovered) = self.state.hovered.take() {
            self.hover(hovered, false);
        }
        self.set_cursor(CursorStyle::Default, effects);
        self.state.intersections.clear();
        effects.push(Effect::ShowModal(kind));
        log::info!("[modal] open {}", kind.id());
    }

    /// Close whichever modal is open. Hover is left for the next frame's
    /// picking to re-establish.
    pub fn close_modal(&mut self, effects: &mut Vec<Effect>) {
        let Some(kind) = self.state.modal.take() else {
            return;
        };
        self.controls.enabled = true;
        effects.push(Effect::HideModal(kind));
        log::info!("[modal] close {}", kind.id());
    }

    /// The modal's own exit button.
    pub fn modal_exit(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        audio.play(SoundId::Click);
        self.close_modal(effects);
    }

    pub fn toggle_mute(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        self.state.audio.muted = !self.state.audio.muted;
        self.state.audio.apply_mute(audio);
        audio.play(SoundId::Click);
        effects.push(Effect::MuteChanged {
            muted: self.state.audio.muted,
        });
    }

    pub fn toggle_theme(&mut self, audio: &mut dyn AudioBackend, effects: &mut Vec<Effect>) {
        self.state.night_mode = !self.state.night_mode;
        audio.play(SoundId::Click);
        let to = if self.state.night_mode { 1.0 } else { 0.0 };
        self.tweens.kill(TweenTarget::ThemeMix);
        self.tweens
            .add(Tween::theme(to, self.params.theme_fade_sec, Easing::Power2InOut));
        effects.push(Effect::ThemeChanged {
            night: self.state.night_mode,
        });
    }

    pub fn resize(&mut self, viewport: Viewport, effects: &mut Vec<Effect>) {
        let layout = viewport.layout();
        let crossed = layout != self.viewport.layout();
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        if crossed {
            self.camera.apply_pose(layout.start_pose());
            self.controls.stop();
        }
        let (width, height) = viewport.physical_size();
        effects.push(Effect::Resized { width, height });
    }

    // ---- frame ----

    pub fn frame(
        &mut self,
        input: FrameInput,
        audio: &mut dyn AudioBackend,
        effects: &mut Vec<Effect>,
    ) {
        self.now_ms = input.now_ms;
        self.elapsed_sec += input.dt_sec;

        for kind in self.timers.poll(input.now_ms) {
            match kind {
                TimerKind::PianoResume => {
                    self.state.audio.unduck(audio, self.params.music_fade_ms)
                }
                TimerKind::DeferredHitboxes => {
                    self.hitboxes.build_deferred(&mut self.scene);
                }
                TimerKind::RevealDone => self.finish_reveal(effects),
            }
        }

        let mut finished = std::mem::take(&mut self.finished);
        self.tweens
            .update(input.dt_sec, &mut self.scene, &mut finished);
        for tag in finished.drain(..) {
            match tag {
                TweenTag::IntroSettled => self.intro_settled(),
                TweenTag::PianoKeyPressed(node) => {
                    release_key_tween(&mut self.tweens, &self.scene, node, &self.params)
                }
            }
        }
        self.finished = finished;

        self.controls.update(&mut self.camera);
        ambient::update_clock(&mut self.scene, &self.registry, input.local_time);
        ambient::spin_fans(&mut self.scene, &self.registry);
        ambient::sway_chair(&mut self.scene, &self.registry, input.now_ms);
        ambient::bob_fish(&mut self.scene, &self.registry, input.now_ms);

        if self.state.picking_active() {
            self.update_picking(effects);
        }
    }

    fn update_picking(&mut self, effects: &mut Vec<Effect>) {
        let ray = Ray::from_ndc(&self.camera, self.state.pointer_ndc);
        let hits = pick(&ray, &self.hitboxes, &self.scene);
        let candidate = hover_candidate(&hits, &self.scene);
        match hover_transition(self.state.hovered, candidate) {
            HoverTransition::Stay => {}
            HoverTransition::Enter(enter) => {
                self.hover(enter, true);
                self.state.hovered = Some(enter);
            }
            HoverTransition::Switch { exit, enter } => {
                self.hover(exit, false);
                self.hover(enter, true);
                self.state.hovered = Some(enter);
            }
            HoverTransition::Exit(exit) => {
                self.hover(exit, false);
                self.state.hovered = None;
            }
        }
        let cursor = cursor_for(&hits, &self.scene);
        self.set_cursor(cursor, effects);
        self.state.intersections = hits;
    }

    fn hover(&mut self, hitbox: HitboxId, entering: bool) {
        play_hover_animation(
            &mut self.tweens,
            &self.scene,
            &self.hitboxes,
            hitbox,
            self.smoke,
            entering,
            &self.params,
        );
    }

    fn set_cursor(&mut self, cursor: CursorStyle, effects: &mut Vec<Effect>) {
        if self.state.cursor != cursor {
            self.state.cursor = cursor;
            effects.push(Effect::Cursor(cursor));
        }
    }
}
