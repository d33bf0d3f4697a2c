//! Property tweens over node transform channels and the theme blend.
//!
//! A tween reads its start value the first frame it becomes active (after its
//! delay), so tweens queued back to back chain naturally. Tweens are applied in
//! insertion order; when two touch the same channel the later one wins.

use crate::scene::{NodeId, SceneGraph};
use glam::{BVec3, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoots the destination, then settles. Argument is the overshoot.
    BackOut(f32),
    /// Pulls back before leaving.
    BackIn(f32),
    Power2InOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::BackIn(s) => (s + 1.0) * t * t * t - s * t * t,
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Scale, Channel::Rotation, Channel::Position];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Node(NodeId, Channel),
    /// Scalar day/night blend, carried in `x`.
    ThemeMix,
}

impl TweenTarget {
    fn read(self, scene: &SceneGraph) -> Option<Vec3> {
        match self {
            TweenTarget::Node(id, channel) => {
                let t = &scene.get(id)?.transform;
                Some(match channel {
                    Channel::Position => t.position,
                    Channel::Rotation => t.rotation,
                    Channel::Scale => t.scale,
                })
            }
            TweenTarget::ThemeMix => Some(Vec3::splat(scene.theme_mix)),
        }
    }

    fn write(self, scene: &mut SceneGraph, value: Vec3) {
        match self {
            TweenTarget::Node(id, channel) => {
                if let Some(node) = scene.get_mut(id) {
                    let t = &mut node.transform;
                    match channel {
                        Channel::Position => t.position = value,
                        Channel::Rotation => t.rotation = value,
                        Channel::Scale => t.scale = value,
                    }
                }
            }
            TweenTarget::ThemeMix => scene.theme_mix = value.x,
        }
    }
}

/// Completion events the room reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenTag {
    /// The last step of the piano-key intro group landed.
    IntroSettled,
    /// A key finished its press tilt and should swing back.
    PianoKeyPressed(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub to: Vec3,
    /// Components the tween writes; the rest are left alone.
    pub mask: BVec3,
    pub duration: f32,
    pub delay: f32,
    pub ease: Easing,
    pub tag: Option<TweenTag>,
    from: Option<Vec3>,
    elapsed: f32,
}

impl Tween {
    pub fn new(target: TweenTarget, to: Vec3, duration: f32, ease: Easing) -> Self {
        Self {
            target,
            to,
            mask: BVec3::TRUE,
            duration,
            delay: 0.0,
            ease,
            tag: None,
            from: None,
            elapsed: 0.0,
        }
    }

    pub fn theme(to: f32, duration: f32, ease: Easing) -> Self {
        Self::new(TweenTarget::ThemeMix, Vec3::splat(to), duration, ease)
    }

    pub fn axes(mut self, mask: BVec3) -> Self {
        self.mask = mask;
        self
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn tagged(mut self, tag: TweenTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn end_time(&self) -> f32 {
        self.delay + self.duration
    }
}

#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: Vec<Tween>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    /// Drop every tween on `target`, including ones still waiting on a delay.
    pub fn kill(&mut self, target: TweenTarget) {
        self.tweens.retain(|t| t.target != target);
    }

    pub fn kill_node(&mut self, node: NodeId) {
        self.tweens
            .retain(|t| !matches!(t.target, TweenTarget::Node(id, _) if id == node));
    }

    pub fn is_animating(&self, target: TweenTarget) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    /// Latest destination queued for `target`, if any.
    pub fn destination(&self, target: TweenTarget) -> Option<Vec3> {
        self.tweens
            .iter()
            .rev()
            .find(|t| t.target == target)
            .map(|t| t.to)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween by `dt` seconds and push the tags of finished ones.
    pub fn update(&mut self, dt: f32, scene: &mut SceneGraph, finished: &mut Vec<TweenTag>) {
        self.tweens.retain_mut(|tw| {
            tw.elapsed += dt;
            if tw.elapsed < tw.delay {
                return true;
            }
            let Some(current) = tw.target.read(scene) else {
                return false;
            };
            let from = *tw.from.get_or_insert(current);
            let t = if tw.duration <= 0.0 {
                1.0
            } else {
                ((tw.elapsed - tw.delay) / tw.duration).min(1.0)
            };
            let value = if t >= 1.0 {
                tw.to
            } else {
                from.lerp(tw.to, tw.ease.apply(t))
            };
            tw.target
                .write(scene, Vec3::select(tw.mask, value, current));
            if t >= 1.0 {
                if let Some(tag) = tw.tag {
                    finished.push(tag);
                }
                false
            } else {
                true
            }
        });
    }
}
