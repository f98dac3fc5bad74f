//! The pet: its state plus the redraw signal fired after every change.

use std::cell::Cell;
use std::rc::Rc;

use jiff::{SignedDuration, Timestamp};

use crate::model::{CommitCounts, MoodTier, PetState, PollOutcome, count_recent};
use crate::mood;

/// Told whenever the pet's state changes. The UI decides what to redraw.
pub trait RenderNotifier {
    fn state_changed(&self);
}

/// A shared dirty flag: the notifier sets it, the render loop takes it.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    /// Returns whether a redraw was requested and clears the request.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl RenderNotifier for RedrawFlag {
    fn state_changed(&self) {
        self.0.set(true);
    }
}

/// A [`PetState`] that can only be changed through methods which notify.
pub struct Pet<N> {
    state: PetState,
    notifier: N,
}

impl<N: RenderNotifier> Pet<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            state: PetState::default(),
            notifier,
        }
    }

    pub fn state(&self) -> &PetState {
        &self.state
    }

    /// Apply a finished poll. Notifies only if the state changed.
    pub fn apply_outcome(&mut self, outcome: &PollOutcome, now: Timestamp) -> bool {
        let changed = mood::update(&mut self.state, outcome, now);
        if changed {
            tracing::info!(
                last_commit = ?self.state.last_commit_time,
                mood = %self.state.mood,
                "pet updated from fetch",
            );
            self.notifier.state_changed();
        }
        changed
    }

    /// Advance the animation and let the mood catch up with the clock.
    pub fn advance_frame(&mut self, now: Timestamp) {
        self.state.frame_index = self.state.frame_index.wrapping_add(1);
        if mood::refresh(&mut self.state, now) {
            tracing::info!(mood = %self.state.mood, "mood decayed");
        }
        self.notifier.state_changed();
    }

    /// Record that a fetch was just issued.
    pub fn record_poll(&mut self, now: Timestamp) {
        self.state.last_poll_time = now;
        self.notifier.state_changed();
    }

    pub fn mood(&self) -> MoodTier {
        self.state.mood
    }

    pub fn frame_index(&self) -> u64 {
        self.state.frame_index
    }

    pub fn time_since_commit(&self, now: Timestamp) -> Option<SignedDuration> {
        mood::time_since_commit(&self.state, now)
    }

    pub fn time_until_next_mood(&self, now: Timestamp) -> Option<SignedDuration> {
        mood::time_until_next_mood(&self.state, now)
    }

    pub fn commit_counts(&self, now: Timestamp) -> CommitCounts {
        count_recent(&self.state.commits, now)
    }
}
