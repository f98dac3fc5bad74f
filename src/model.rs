//! Core data model for the pet.
//!
//! Plain records with no I/O: commits as the remote reports them, the mood
//! tiers, and the state the UI thread carries between ticks.

mod commit;
mod mood;
mod pet;

pub use commit::{CommitCounts, CommitRecord, count_recent};
pub use mood::MoodTier;
pub use pet::{PetState, PollOutcome};
