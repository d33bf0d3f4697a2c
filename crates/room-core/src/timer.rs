use smallvec::SmallVec;

/// Named single-shot timers. Each kind has at most one outstanding deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Bring the background music back after piano playing stops.
    PianoResume,
    /// Build the hitboxes that waited for the intro.
    DeferredHitboxes,
    /// The loading screen has finished flying away.
    RevealDone,
}

/// Cooperative timers polled from the frame loop, in page milliseconds.
#[derive(Debug, Default)]
pub struct Timers {
    pending: SmallVec<[(TimerKind, f64); 4]>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire at `now + delay_ms`, replacing any earlier deadline.
    pub fn schedule(&mut self, kind: TimerKind, now: f64, delay_ms: f64) {
        self.cancel(kind);
        self.pending.push((kind, now + delay_ms));
    }

    /// Returns true if a timer was outstanding.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != kind);
        before != self.pending.len()
    }

    pub fn due(&self, kind: TimerKind) -> Option<f64> {
        self.pending
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, at)| *at)
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.due(kind).is_some()
    }

    /// Remove and return every timer whose deadline has passed, earliest first.
    pub fn poll(&mut self, now: f64) -> SmallVec<[TimerKind; 4]> {
        let mut fired: SmallVec<[(TimerKind, f64); 4]> = SmallVec::new();
        self.pending.retain(|(k, at)| {
            if *at <= now {
                fired.push((*k, *at));
                false
            } else {
                true
            }
        });
        fired.sort_by(|a, b| a.1.total_cmp(&b.1));
        fired.into_iter().map(|(k, _)| k).collect()
    }
}
