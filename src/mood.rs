//! Mood engine: elapsed time since the last commit in, mood tier out.
//!
//! Pure functions over [`PetState`]. No clocks are read here; every
//! operation takes `now` so callers and tests control time.

use jiff::{SignedDuration, Timestamp};

use crate::model::{MoodTier, PetState, PollOutcome};

/// Below this the pet is happy.
pub const HAPPY_WITHIN: SignedDuration = SignedDuration::from_hours(4);

/// Below this the pet is neutral.
pub const NEUTRAL_WITHIN: SignedDuration = SignedDuration::from_hours(24);

/// Below this the pet is sad. Beyond it, dead.
pub const SAD_WITHIN: SignedDuration = SignedDuration::from_hours(48);

/// Map a known elapsed time to its tier.
///
/// Negative elapsed (commit dated ahead of the local clock) counts as zero.
pub fn classify(elapsed: SignedDuration) -> MoodTier {
    let elapsed = elapsed.max(SignedDuration::ZERO);
    if elapsed < HAPPY_WITHIN {
        MoodTier::Happy
    } else if elapsed < NEUTRAL_WITHIN {
        MoodTier::Neutral
    } else if elapsed < SAD_WITHIN {
        MoodTier::Sad
    } else {
        MoodTier::Dead
    }
}

/// The mood for a possibly unknown last commit time.
///
/// No data is not evidence of neglect: unknown maps to `Neutral`.
pub fn mood_for(last_commit_time: Option<Timestamp>, now: Timestamp) -> MoodTier {
    match last_commit_time {
        Some(at) => classify(now.duration_since(at)),
        None => MoodTier::Neutral,
    }
}

/// Fold a poll outcome into the state. Returns whether anything changed.
///
/// Only a newest commit whose committer time differs from the stored one
/// moves the mood, and it moves to wherever that commit's age lands: an old
/// commit discovered late still yields a severe mood.
pub fn update(state: &mut PetState, outcome: &PollOutcome, now: Timestamp) -> bool {
    let commits = outcome.commits();
    let Some(latest) = commits.first() else {
        return false;
    };

    let mut changed = false;
    if state.commits != commits {
        state.commits = commits.to_vec();
        changed = true;
    }

    if state.last_commit_time != Some(latest.committer_time) {
        state.last_commit_time = Some(latest.committer_time);
        state.mood = mood_for(state.last_commit_time, now);
        changed = true;
    }

    changed
}

/// Recompute the mood as the clock moves. Returns whether the tier changed.
pub fn refresh(state: &mut PetState, now: Timestamp) -> bool {
    let mood = mood_for(state.last_commit_time, now);
    if mood == state.mood {
        return false;
    }
    state.mood = mood;
    true
}

/// Time since the last known commit, if any.
pub fn time_since_commit(state: &PetState, now: Timestamp) -> Option<SignedDuration> {
    state.last_commit_time.map(|at| now.duration_since(at))
}

/// Remaining time before the pet gets hungrier.
///
/// The tier is taken from `now`, not the stored mood, so the countdown never
/// goes negative between refreshes. Only `Happy` and `Neutral` count down.
/// `Sad` has a boundary at two days but shows no countdown, and `Dead` has
/// nowhere left to go.
pub fn time_until_next_mood(state: &PetState, now: Timestamp) -> Option<SignedDuration> {
    let elapsed = time_since_commit(state, now)?.max(SignedDuration::ZERO);
    let boundary = tier_span(classify(elapsed))?;
    Some(boundary - elapsed)
}

/// Full length of the countdown for a tier, used to scale the hunger bar.
pub fn tier_span(mood: MoodTier) -> Option<SignedDuration> {
    match mood {
        MoodTier::Happy => Some(HAPPY_WITHIN),
        MoodTier::Neutral => Some(NEUTRAL_WITHIN),
        MoodTier::Sad | MoodTier::Dead => None,
    }
}
