//! Poll scheduling: when to fetch, where the fetch runs, and how its result
//! gets back to the pet.
//!
//! The UI thread calls [`PollScheduler::tick`] on its poll timer. A fetch is
//! issued at most once per debounce interval and never while another is
//! still running. The fetch itself runs on a spawned thread and reports back
//! over a channel, so the pet is only ever touched by its owning thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use jiff::{SignedDuration, Timestamp};

use crate::model::PollOutcome;
use crate::observe::CommitSource;
use crate::pet::{Pet, RenderNotifier};

/// Permission to start one fetch, issued by [`PollScheduler::maybe_poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollRequest {
    pub issued_at: Timestamp,
}

pub struct PollScheduler<S> {
    source: Arc<S>,
    debounce: SignedDuration,
    in_flight: bool,
    /// Result channel of the dispatched fetch. Disconnects if the worker
    /// dies without reporting.
    pending: Option<Receiver<PollOutcome>>,
}

impl<S: CommitSource> PollScheduler<S> {
    pub fn new(source: Arc<S>, debounce: SignedDuration) -> Self {
        Self {
            source,
            debounce,
            in_flight: false,
            pending: None,
        }
    }

    /// Whether a fetch has been dispatched and not yet drained.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Decide whether a fetch is due.
    ///
    /// When it is, the pet's `last_poll_time` moves to `now` right away so
    /// the debounce window starts at issue time, not completion time. The
    /// returned request must be passed to [`PollScheduler::dispatch`].
    pub fn maybe_poll<N: RenderNotifier>(
        &mut self,
        pet: &mut Pet<N>,
        now: Timestamp,
    ) -> Option<PollRequest> {
        if self.in_flight {
            tracing::trace!("fetch still in flight, skipping poll");
            return None;
        }
        if now.duration_since(pet.state().last_poll_time) < self.debounce {
            return None;
        }

        pet.record_poll(now);
        self.in_flight = true;
        Some(PollRequest { issued_at: now })
    }

    /// Run the fetch for `request` on a background thread.
    pub fn dispatch(&mut self, request: PollRequest) {
        let source = Arc::clone(&self.source);
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("commit-poll".into())
            .spawn(move || {
                let outcome = PollOutcome::from_commits(source.fetch_recent_commits());
                // The loop may have shut down; an orphaned result is dropped.
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(_) => {
                tracing::debug!(issued_at = %request.issued_at, "dispatched commit fetch");
                self.pending = Some(rx);
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not spawn commit fetch");
                self.in_flight = false;
            }
        }
    }

    /// Apply a finished fetch, if one is waiting. Returns whether the pet changed.
    pub fn drain<N: RenderNotifier>(&mut self, pet: &mut Pet<N>, now: Timestamp) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => {
                if outcome == PollOutcome::FetchFailed {
                    tracing::debug!("fetch returned no commits, keeping last state");
                }
                outcome
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("commit fetch ended without a result");
                PollOutcome::FetchFailed
            }
        };
        self.pending = None;
        self.in_flight = false;
        pet.apply_outcome(&outcome, now)
    }

    /// One poll-timer tick: take in any finished fetch, then start the next if due.
    pub fn tick<N: RenderNotifier>(&mut self, pet: &mut Pet<N>, now: Timestamp) {
        self.drain(pet, now);
        if let Some(request) = self.maybe_poll(pet, now) {
            self.dispatch(request);
        }
    }
}
