//! Mood tiers, ordered by how neglected the pet feels.

use std::fmt;

use serde::Serialize;

/// The pet's emotional state.
///
/// Ordered by severity: `Happy < Neutral < Sad < Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTier {
    Happy,
    Neutral,
    Sad,
    Dead,
}

impl MoodTier {
    pub const ALL: [MoodTier; 4] = [
        MoodTier::Happy,
        MoodTier::Neutral,
        MoodTier::Sad,
        MoodTier::Dead,
    ];

    /// Lowercase name, also used as the asset file prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            MoodTier::Happy => "happy",
            MoodTier::Neutral => "neutral",
            MoodTier::Sad => "sad",
            MoodTier::Dead => "dead",
        }
    }
}

impl fmt::Display for MoodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
