//! The one-time reveal that plays after the loading screen leaves.
//!
//! Each group is a [`Timeline`]; nodes missing from the model are skipped and
//! the rest of their group plays as usual. The piano group is the last to
//! settle and carries [`TweenTag::IntroSettled`].

use crate::constants::*;
use crate::registry::{Decoration, ModalKind, PianoKey, Registry, Role, SocialLink};
use crate::scene::SceneGraph;
use crate::timeline::{Position, Timeline, TimelineStep};
use crate::tween::{Channel, Easing, TweenTag, TweenTarget};
use glam::{BVec3, Vec3};

const Y_ONLY: BVec3 = BVec3::new(false, true, false);
const XY_ONLY: BVec3 = BVec3::new(true, true, false);

/// Builds groups against the classified scene.
struct IntroBuilder<'a> {
    registry: &'a Registry,
    scene: &'a SceneGraph,
}

impl IntroBuilder<'_> {
    fn group(&self, name: &'static str) -> Timeline {
        Timeline::new(
            name,
            INTRO_TIME_SCALE,
            INTRO_STEP_SEC,
            Easing::BackOut(INTRO_OVERSHOOT),
        )
    }

    fn reveal(&self, tl: Timeline, role: Role, position: Position) -> Timeline {
        self.reveal_with(tl, role, position, |s| s)
    }

    fn reveal_with(
        &self,
        tl: Timeline,
        role: Role,
        position: Position,
        f: impl FnOnce(TimelineStep) -> TimelineStep,
    ) -> Timeline {
        match self.registry.get(role) {
            Some(id) => tl.push(f(TimelineStep::new(
                TweenTarget::Node(id, Channel::Scale),
                Vec3::ONE,
                position,
            ))),
            None => {
                log::debug!("[intro] no node for {:?}", role);
                tl
            }
        }
    }

    /// Hop up, grow in place, settle back: the letter and key entrance.
    fn hop(&self, tl: Timeline, role: Role, lift: f32, first: Position, delay: f32) -> Timeline {
        let Some(id) = self.registry.get(role) else {
            log::debug!("[intro] no node for {:?}", role);
            return tl;
        };
        let rest = self
            .scene
            .get(id)
            .map(|n| n.rest().position)
            .unwrap_or(Vec3::ZERO);
        let position = TweenTarget::Node(id, Channel::Position);
        let quick = |s: TimelineStep| {
            s.duration(INTRO_HOP_SEC)
                .ease(Easing::BackOut(INTRO_OVERSHOOT))
        };
        tl.push(
            quick(TimelineStep::new(position, rest + Vec3::Y * lift, first))
                .axes(Y_ONLY)
                .delay(delay),
        )
        .push(quick(TimelineStep::new(
            TweenTarget::Node(id, Channel::Scale),
            Vec3::ONE,
            Position::WithPrevious,
        )))
        .push(
            quick(TimelineStep::new(
                position,
                rest,
                Position::AfterPrevious(-0.2),
            ))
            .axes(Y_ONLY),
        )
    }

    fn chain(&self, name: &'static str, roles: &[Role], overlap: f32) -> Timeline {
        roles.iter().enumerate().fold(self.group(name), |tl, (i, role)| {
            let position = if i == 0 {
                Position::Sequence
            } else {
                Position::Overlap(overlap)
            };
            self.reveal(tl, *role, position)
        })
    }
}

/// Every intro group, in the order they start.
pub fn intro_timelines(registry: &Registry, scene: &SceneGraph) -> Vec<Timeline> {
    use Decoration::*;
    let b = IntroBuilder { registry, scene };
    let mut out = Vec::new();

    let planks = b.reveal_with(
        b.group("planks"),
        Role::Decoration(Plank(1)),
        Position::Sequence,
        |s| s.axes(XY_ONLY),
    );
    let planks = b.reveal(planks, Role::Decoration(Plank(2)), Position::Overlap(0.5));
    let planks = [ModalKind::Work, ModalKind::About, ModalKind::Contact]
        .into_iter()
        .fold(planks, |tl, m| {
            b.reveal(tl, Role::Button(m), Position::Overlap(0.6))
        });
    out.push(planks);

    out.push(b.chain(
        "frames",
        &[
            Role::Decoration(Frame(1)),
            Role::Decoration(Frame(2)),
            Role::Decoration(Frame(3)),
        ],
        0.5,
    ));

    let shelf = b.reveal_with(b.group("shelf"), Role::Boba, Position::Sequence, |s| {
        s.delay(0.4)
    });
    let shelf = b.reveal(
        shelf,
        Role::SocialLink(SocialLink::GitHub),
        Position::Overlap(0.5),
    );
    let shelf = b.reveal(
        shelf,
        Role::SocialLink(SocialLink::YouTube),
        Position::Overlap(0.6),
    );
    out.push(b.reveal(
        shelf,
        Role::SocialLink(SocialLink::Twitter),
        Position::Overlap(0.6),
    ));

    let flowers: Vec<Role> = (1..=5).rev().map(|i| Role::Decoration(Flower(i))).collect();
    out.push(b.chain("flowers", &flowers, 0.5));

    let boxes: Vec<Role> = (1..=3).map(|i| Role::Decoration(Box(i))).collect();
    out.push(b.chain("boxes", &boxes, 0.5));

    out.push(b.reveal(
        b.group("lamp").with_default_delay(0.2),
        Role::Decoration(Lamp),
        Position::Sequence,
    ));

    let slippers = b.reveal_with(
        b.group("slippers"),
        Role::Decoration(Slipper(1)),
        Position::Sequence,
        |s| s.delay(0.5),
    );
    out.push(b.reveal(slippers, Role::Decoration(Slipper(2)), Position::Overlap(0.5)));

    let eggs: Vec<Role> = (1..=3).map(|i| Role::Decoration(Egg(i))).collect();
    out.push(b.chain("eggs", &eggs, 0.5));

    out.push(b.reveal(
        b.group("fish").with_default_delay(0.8),
        Role::Fish,
        Position::Sequence,
    ));

    let letters = (1..=8u8).fold(b.group("letters"), |tl, i| {
        let (first, delay) = if i == 1 {
            (Position::Sequence, 0.25)
        } else {
            (Position::Overlap(0.5), 0.0)
        };
        b.hop(tl, Role::NameLetter(i), LETTER_HOP, first, delay)
    });
    out.push(letters);

    let piano = PianoKey::all().fold(
        Timeline::new(
            "piano",
            PIANO_INTRO_TIME_SCALE,
            INTRO_HOP_SEC,
            Easing::BackOut(1.7),
        )
        .on_complete(TweenTag::IntroSettled),
        |tl, key| {
            b.hop(
                tl,
                Role::PianoKey(key),
                PIANO_KEY_HOP,
                Position::At(key.index() as f32 * PIANO_KEY_STAGGER_SEC),
                0.0,
            )
        },
    );
    out.push(piano);

    out
}
