//! Sequenced tweens described as data.
//!
//! A [`Timeline`] is an ordered list of steps, each placed relative to what
//! came before it. [`Timeline::schedule`] lays the steps out on a time axis
//! and hands back plain delayed tweens for the [`TweenEngine`](crate::tween::TweenEngine).

use crate::tween::{Easing, Tween, TweenTag, TweenTarget};
use glam::{BVec3, Vec3};

/// Where a step starts, in unscaled timeline seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    Sequence,
    /// `x` seconds before the current end of the timeline.
    Overlap(f32),
    /// Together with the previous step.
    WithPrevious,
    /// Offset from the end of the previous step (negative overlaps it).
    AfterPrevious(f32),
    /// Absolute time from the timeline start.
    At(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    pub target: TweenTarget,
    pub to: Vec3,
    pub mask: BVec3,
    pub duration: Option<f32>,
    pub ease: Option<Easing>,
    pub delay: f32,
    pub position: Position,
}

impl TimelineStep {
    pub fn new(target: TweenTarget, to: Vec3, position: Position) -> Self {
        Self {
            target,
            to,
            mask: BVec3::TRUE,
            duration: None,
            ease: None,
            delay: 0.0,
            position,
        }
    }

    pub fn axes(mut self, mask: BVec3) -> Self {
        self.mask = mask;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub name: &'static str,
    pub time_scale: f32,
    pub default_duration: f32,
    pub default_ease: Easing,
    /// Default delay applied to steps that set none.
    pub default_delay: f32,
    pub steps: Vec<TimelineStep>,
    /// Tag carried by whichever step finishes last.
    pub on_complete: Option<TweenTag>,
}

impl Timeline {
    pub fn new(name: &'static str, time_scale: f32, duration: f32, ease: Easing) -> Self {
        Self {
            name,
            time_scale,
            default_duration: duration,
            default_ease: ease,
            default_delay: 0.0,
            steps: Vec::new(),
            on_complete: None,
        }
    }

    pub fn with_default_delay(mut self, delay: f32) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn on_complete(mut self, tag: TweenTag) -> Self {
        self.on_complete = Some(tag);
        self
    }

    pub fn push(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Shorthand for a default-timed step on all axes.
    pub fn to(self, target: TweenTarget, to: Vec3, position: Position) -> Self {
        self.push(TimelineStep::new(target, to, position))
    }

    /// `(start, duration)` of every step in unscaled seconds.
    pub fn layout(&self) -> Vec<(f32, f32)> {
        let mut out = Vec::with_capacity(self.steps.len());
        let mut end = 0.0f32;
        let mut prev = (0.0f32, 0.0f32);
        for step in &self.steps {
            let duration = step.duration.unwrap_or(self.default_duration);
            let delay = if step.delay != 0.0 {
                step.delay
            } else {
                self.default_delay
            };
            let anchor = match step.position {
                Position::Sequence => end,
                Position::Overlap(x) => end - x,
                Position::WithPrevious => prev.0,
                Position::AfterPrevious(x) => prev.0 + prev.1 + x,
                Position::At(t) => t,
            };
            let start = (anchor + delay).max(0.0);
            prev = (start, duration);
            end = end.max(start + duration);
            out.push(prev);
        }
        out
    }

    /// Total length in real (scaled) seconds.
    pub fn duration(&self) -> f32 {
        let end = self
            .layout()
            .iter()
            .map(|(s, d)| s + d)
            .fold(0.0, f32::max);
        end / self.time_scale
    }

    /// Resolve the steps into delayed tweens.
    pub fn schedule(&self) -> Vec<Tween> {
        let layout = self.layout();
        let scale = if self.time_scale > 0.0 {
            self.time_scale
        } else {
            1.0
        };
        let last = layout
            .iter()
            .enumerate()
            .max_by(|a, b| (a.1 .0 + a.1 .1).total_cmp(&(b.1 .0 + b.1 .1)))
            .map(|(i, _)| i);

        self.steps
            .iter()
            .zip(layout)
            .enumerate()
            .map(|(i, (step, (start, duration)))| {
                let tween = Tween::new(
                    step.target,
                    step.to,
                    duration / scale,
                    step.ease.unwrap_or(self.default_ease),
                )
                .axes(step.mask)
                .delayed(start / scale);
                match self.on_complete {
                    Some(tag) if Some(i) == last => tween.tagged(tag),
                    _ => tween,
                }
            })
            .collect()
    }
}
