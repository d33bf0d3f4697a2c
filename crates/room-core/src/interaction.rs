//! Hover and click rules.
//!
//! Picking produces a nearest-first hit list every frame; this module decides
//! what that list means. Hover is a two-state machine (idle, or hovering one
//! proxy) and every transition replaces whatever tweens were running on the
//! node's transform channels.

use crate::audio::AudioState;
use crate::constants::{
    BUTTON_HOVER_TILT, FLOAT_HOVER_LIFT, PIANO_KEY_TILT, SMOKE_HOVER_SCALE,
};
use crate::hitbox::{HitboxId, HitboxManager};
use crate::picking::Hits;
use crate::registry::{ModalKind, PianoKey, Role};
use crate::room::RoomParams;
use crate::scene::{NodeId, SceneGraph};
use crate::tween::{Channel, Easing, Tween, TweenEngine, TweenTag, TweenTarget};
use glam::{BVec3, Vec2, Vec3};

const X_AXIS: BVec3 = BVec3::new(true, false, false);
const Y_AXIS: BVec3 = BVec3::new(false, true, false);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

impl CursorStyle {
    pub fn css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Stay,
    Enter(HitboxId),
    /// Exit runs to completion of its dispatch before enter starts.
    Switch {
        exit: HitboxId,
        enter: HitboxId,
    },
    Exit(HitboxId),
}

/// Next hover step given the current hover and the hover-eligible nearest hit.
pub fn hover_transition(current: Option<HitboxId>, candidate: Option<HitboxId>) -> HoverTransition {
    match (current, candidate) {
        (None, None) => HoverTransition::Stay,
        (None, Some(enter)) => HoverTransition::Enter(enter),
        (Some(a), Some(b)) if a == b => HoverTransition::Stay,
        (Some(exit), Some(enter)) => HoverTransition::Switch { exit, enter },
        (Some(exit), None) => HoverTransition::Exit(exit),
    }
}

/// The nearest hit, if its source node is hover-eligible.
pub fn hover_candidate(hits: &Hits, scene: &SceneGraph) -> Option<HitboxId> {
    let nearest = hits.first()?;
    scene
        .get(nearest.node)
        .filter(|n| n.tags.hover)
        .map(|_| nearest.hitbox)
}

/// Pointer cursor while the nearest hit is cursor-marked.
pub fn cursor_for(hits: &Hits, scene: &SceneGraph) -> CursorStyle {
    match hits.first().and_then(|h| scene.get(h.node)) {
        Some(node) if node.tags.pointer => CursorStyle::Pointer,
        _ => CursorStyle::Default,
    }
}

/// What a confirmed click on a node does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    OpenModal(ModalKind),
    OpenLink(&'static str),
    PlayKey(PianoKey),
    Nothing,
}

pub fn click_action(role: Option<Role>) -> ClickAction {
    match role {
        Some(Role::Button(modal)) => ClickAction::OpenModal(modal),
        Some(Role::SocialLink(link)) => ClickAction::OpenLink(link.url()),
        Some(Role::PianoKey(key)) => ClickAction::PlayKey(key),
        _ => ClickAction::Nothing,
    }
}

/// The single mutable record behind every input handler and the frame loop.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    pub hovered: Option<HitboxId>,
    /// Last frame's hits, nearest first. Cleared while a modal is open.
    pub intersections: Hits,
    pub pointer_ndc: Vec2,
    pub modal: Option<ModalKind>,
    pub audio: AudioState,
    pub night_mode: bool,
    pub cursor: CursorStyle,
    /// Set by touch handlers so the click the browser synthesises afterwards
    /// is ignored.
    pub touch_happened: bool,
    /// Picking stays off until the loading screen is gone.
    pub picking_unlocked: bool,
}

impl InteractionState {
    pub fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn picking_active(&self) -> bool {
        self.picking_unlocked && !self.modal_open()
    }
}

/// Dispatch hover feedback for the node behind `hitbox`.
///
/// In-flight tweens on the node's scale, rotation and position are dropped
/// first, so the new tweens start from wherever the node is right now and
/// head for an absolute destination derived from its rest transform.
pub fn play_hover_animation(
    tweens: &mut TweenEngine,
    scene: &SceneGraph,
    hitboxes: &HitboxManager,
    hitbox: HitboxId,
    smoke: Option<NodeId>,
    entering: bool,
    params: &RoomParams,
) {
    let Some(node_id) = hitboxes.get(hitbox).map(|e| e.source) else {
        return;
    };
    let Some(node) = scene.get(node_id) else {
        return;
    };
    for channel in Channel::ALL {
        tweens.kill(TweenTarget::Node(node_id, channel));
    }

    let role = node.tags.role;
    let rest = node.rest();
    let duration = if entering {
        params.hover_enter_sec
    } else {
        params.hover_exit_sec
    };
    let ease = Easing::BackOut(params.hover_overshoot);
    let tween = |channel, to| Tween::new(TweenTarget::Node(node_id, channel), to, duration, ease);

    if let (Some(Role::Coffee), Some(smoke)) = (role, smoke) {
        let target = TweenTarget::Node(smoke, Channel::Scale);
        tweens.kill(target);
        let to = if entering { SMOKE_HOVER_SCALE } else { 1.0 };
        tweens.add(Tween::new(target, Vec3::splat(to), duration, ease));
    }

    let factor = match role {
        Some(Role::Fish) => params.fish_hover_scale,
        _ => params.hover_scale,
    };
    let scale = if entering { rest.scale * factor } else { rest.scale };
    tweens.add(tween(Channel::Scale, scale));

    let tilt = role.map_or(0.0, Role::hover_tilt_sign);
    if tilt != 0.0 {
        let x = if entering {
            rest.rotation.x + tilt * BUTTON_HOVER_TILT
        } else {
            rest.rotation.x
        };
        tweens.add(tween(Channel::Rotation, Vec3::new(x, 0.0, 0.0)).axes(X_AXIS));
    } else if node.transform.rotation != rest.rotation {
        // an interrupted key press never queues its swing back
        tweens.add(tween(Channel::Rotation, rest.rotation));
    }

    if role.is_some_and(Role::floats) {
        let y = if entering {
            rest.position.y + FLOAT_HOVER_LIFT
        } else {
            rest.position.y
        };
        tweens.add(tween(Channel::Position, Vec3::new(0.0, y, 0.0)).axes(Y_AXIS));
    }
}

/// Tilt a key down; the swing back is queued when this tween reports in.
pub fn press_key_tween(
    tweens: &mut TweenEngine,
    scene: &SceneGraph,
    node: NodeId,
    params: &RoomParams,
) {
    let Some(rest) = scene.get(node).map(|n| n.rest()) else {
        return;
    };
    let target = TweenTarget::Node(node, Channel::Rotation);
    tweens.kill(target);
    tweens.add(
        Tween::new(
            target,
            Vec3::new(rest.rotation.x + PIANO_KEY_TILT, 0.0, 0.0),
            params.piano_press_sec,
            Easing::BackOut(params.hover_overshoot),
        )
        .axes(X_AXIS)
        .tagged(TweenTag::PianoKeyPressed(node)),
    );
}

pub fn release_key_tween(
    tweens: &mut TweenEngine,
    scene: &SceneGraph,
    node: NodeId,
    params: &RoomParams,
) {
    let Some(rest) = scene.get(node).map(|n| n.rest()) else {
        return;
    };
    tweens.add(
        Tween::new(
            TweenTarget::Node(node, Channel::Rotation),
            Vec3::new(rest.rotation.x, 0.0, 0.0),
            params.piano_release_sec,
            Easing::BackOut(params.hover_overshoot),
        )
        .axes(X_AXIS),
    );
}
