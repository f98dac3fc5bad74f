//! Animation frames for each mood.
//!
//! Loaded once at startup and handed to the pet panel. Frames come either
//! from the built-in art or from a directory of `<mood>_<n>.txt` files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::model::MoodTier;

pub const FRAMES_PER_MOOD: usize = 2;

const BUILTIN: [(MoodTier, [&str; FRAMES_PER_MOOD]); 4] = [
    (
        MoodTier::Happy,
        [
            include_str!("../assets/happy_1.txt"),
            include_str!("../assets/happy_2.txt"),
        ],
    ),
    (
        MoodTier::Neutral,
        [
            include_str!("../assets/neutral_1.txt"),
            include_str!("../assets/neutral_2.txt"),
        ],
    ),
    (
        MoodTier::Sad,
        [
            include_str!("../assets/sad_1.txt"),
            include_str!("../assets/sad_2.txt"),
        ],
    ),
    (
        MoodTier::Dead,
        [
            include_str!("../assets/dead_1.txt"),
            include_str!("../assets/dead_2.txt"),
        ],
    ),
];

/// Frames keyed by mood. Every mood always has [`FRAMES_PER_MOOD`] entries.
#[derive(Debug, Clone)]
pub struct FrameCache {
    frames: HashMap<MoodTier, Vec<String>>,
}

impl FrameCache {
    /// The art compiled into the binary.
    pub fn builtin() -> Self {
        let frames = BUILTIN
            .iter()
            .map(|(mood, frames)| {
                let frames = frames.iter().map(|f| (*f).to_string()).collect();
                (*mood, pad_to_same_height(frames))
            })
            .collect();
        Self { frames }
    }

    /// Read frames from `dir`. Missing or unreadable files become a
    /// `[missing: <file>]` placeholder instead of failing.
    pub fn load(dir: &Path) -> Self {
        let frames = MoodTier::ALL
            .iter()
            .map(|&mood| {
                let frames = (1..=FRAMES_PER_MOOD)
                    .map(|n| {
                        let name = format!("{mood}_{n}.txt");
                        match fs::read_to_string(dir.join(&name)) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::warn!(file = %name, error = %e, "missing animation frame");
                                format!("[missing: {name}]")
                            }
                        }
                    })
                    .collect();
                (mood, pad_to_same_height(frames))
            })
            .collect();
        Self { frames }
    }

    /// The frame to show for `mood` at animation step `frame_index`.
    pub fn frame(&self, mood: MoodTier, frame_index: u64) -> &str {
        let Some(frames) = self.frames.get(&mood).filter(|f| !f.is_empty()) else {
            return "(?)";
        };
        // usize -> u64 is lossless on every supported target.
        let index = frame_index % frames.len() as u64;
        usize::try_from(index).map_or("(?)", |i| frames[i].as_str())
    }
}

/// Pad shorter frames with blank lines so the panel height doesn't jump.
///
/// Padding lines hold a single space; a trailing empty line would be dropped
/// when the frame is split into lines for rendering.
fn pad_to_same_height(frames: Vec<String>) -> Vec<String> {
    let height = frames.iter().map(|f| f.lines().count()).max().unwrap_or(0);
    frames
        .into_iter()
        .map(|frame| {
            let mut lines: Vec<&str> = frame.lines().collect();
            lines.resize(height, " ");
            lines.join("\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn builtin_has_every_mood() {
        let cache = FrameCache::builtin();
        for mood in MoodTier::ALL {
            let a = cache.frame(mood, 0);
            let b = cache.frame(mood, 1);
            assert!(!a.is_empty());
            assert_ne!(a, b, "{mood} frames should differ");
        }
    }

    #[test]
    fn frames_alternate() {
        let cache = FrameCache::builtin();
        assert_eq!(cache.frame(MoodTier::Happy, 0), cache.frame(MoodTier::Happy, 2));
        assert_eq!(cache.frame(MoodTier::Happy, 1), cache.frame(MoodTier::Happy, 3));
    }

    #[test]
    fn loads_fixture_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("happy_1.txt"), "(^_^)").unwrap();
        fs::write(dir.path().join("happy_2.txt"), "(^o^)\n/|\\").unwrap();

        let cache = FrameCache::load(dir.path());
        assert_eq!(cache.frame(MoodTier::Happy, 0), "(^_^)\n ");
        assert_eq!(cache.frame(MoodTier::Happy, 1), "(^o^)\n/|\\");
    }

    #[test]
    fn missing_files_get_placeholders() {
        let dir = TempDir::new().unwrap();
        let cache = FrameCache::load(dir.path());
        assert_eq!(cache.frame(MoodTier::Sad, 0), "[missing: sad_1.txt]");
        assert_eq!(cache.frame(MoodTier::Dead, 1), "[missing: dead_2.txt]");
    }

    #[test]
    fn pads_shorter_frames() {
        let padded = pad_to_same_height(vec!["a".into(), "b\nc\nd".into()]);
        assert_eq!(padded[0], "a\n \n ");
        assert_eq!(padded[0].lines().count(), padded[1].lines().count());
    }
}
