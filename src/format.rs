//! Text formatting shared by the pet panel and `tuxagotchi status`.

use jiff::SignedDuration;

use crate::model::MoodTier;
use crate::mood;

/// Width the pet art is centered in.
pub const ART_WIDTH: usize = 32;

/// Cells in the hunger bar.
pub const BAR_LENGTH: usize = 10;

/// Shimmer cycled through the bar's leading cell.
const BAR_ANIMATION: [char; 6] = ['░', '▒', '▓', '█', '▓', '▒'];

/// Largest whole unit: `42s`, `5m`, `3h`, `2d`. Negative durations read as `0s`.
pub fn format_elapsed(duration: SignedDuration) -> String {
    let secs = duration.as_secs().max(0);
    match secs {
        0..60 => format!("{secs}s"),
        60..3_600 => format!("{}m", secs / 60),
        3_600..86_400 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// A block bar showing how much of the current tier is left.
///
/// Empty for tiers without a countdown. The leading filled cell shimmers
/// with `tick`.
pub fn hunger_bar(mood: MoodTier, countdown: SignedDuration, tick: u64) -> String {
    let Some(span) = mood::tier_span(mood) else {
        return String::new();
    };

    let remaining = countdown.as_secs().clamp(0, span.as_secs());
    // Both operands are bounded by the tier span, far below i64 overflow.
    let filled = usize::try_from(remaining * BAR_LENGTH as i64 / span.as_secs()).unwrap_or(0);
    let frame = BAR_ANIMATION[usize::try_from(tick % BAR_ANIMATION.len() as u64).unwrap_or(0)];

    let mut bar = String::with_capacity(BAR_LENGTH * 3);
    if filled > 0 {
        bar.extend(std::iter::repeat_n('█', filled - 1));
        bar.push(frame);
        bar.extend(std::iter::repeat_n('░', BAR_LENGTH - filled));
    } else {
        bar.push(frame);
        bar.extend(std::iter::repeat_n('░', BAR_LENGTH - 1));
    }
    bar
}

/// Center each line of `art` within `width` columns.
pub fn center_lines(art: &str, width: usize) -> Vec<String> {
    art.lines()
        .map(|line| {
            let len = line.chars().count();
            if len >= width {
                return line.to_string();
            }
            let left = (width - len) / 2;
            let right = width - len - left;
            format!("{}{line}{}", " ".repeat(left), " ".repeat(right))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_uses_largest_unit() {
        let cases = [
            (SignedDuration::from_secs(0), "0s"),
            (SignedDuration::from_secs(59), "59s"),
            (SignedDuration::from_secs(60), "1m"),
            (SignedDuration::from_mins(59), "59m"),
            (SignedDuration::from_hours(1), "1h"),
            (SignedDuration::from_hours(23), "23h"),
            (SignedDuration::from_hours(24), "1d"),
            (SignedDuration::from_hours(50), "2d"),
            (SignedDuration::from_secs(-30), "0s"),
        ];
        for (duration, expected) in cases {
            assert_eq!(format_elapsed(duration), expected);
        }
    }

    #[test]
    fn full_bar_for_fresh_tier() {
        let bar = hunger_bar(MoodTier::Happy, SignedDuration::from_hours(4), 3);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn half_bar_with_shimmer() {
        let bar = hunger_bar(MoodTier::Neutral, SignedDuration::from_hours(12), 0);
        assert_eq!(bar, "████░░░░░░");
        assert_eq!(bar.chars().count(), BAR_LENGTH);
    }

    #[test]
    fn empty_bar_still_shimmers() {
        let bar = hunger_bar(MoodTier::Happy, SignedDuration::from_secs(30), 1);
        assert_eq!(bar, "▒░░░░░░░░░");
    }

    #[test]
    fn no_bar_without_countdown() {
        assert!(hunger_bar(MoodTier::Sad, SignedDuration::from_hours(5), 0).is_empty());
        assert!(hunger_bar(MoodTier::Dead, SignedDuration::ZERO, 0).is_empty());
    }

    #[test]
    fn centers_each_line() {
        let lines = center_lines("ab\nabcd", 8);
        assert_eq!(lines, vec!["   ab   ", "  abcd  "]);
    }

    #[test]
    fn wide_lines_are_left_alone() {
        let lines = center_lines("0123456789", 4);
        assert_eq!(lines, vec!["0123456789"]);
    }
}
