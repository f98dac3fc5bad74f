//! Pet panel: the animated pet and what it knows about the repository.

use jiff::Timestamp;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::format::{ART_WIDTH, center_lines, format_elapsed, hunger_bar};
use crate::frames::FrameCache;
use crate::pet::{Pet, RenderNotifier};
use crate::tui::theme::Theme;

pub struct PetPanel<'a> {
    pub frames: &'a FrameCache,
    pub repo: &'a str,
}

impl PetPanel<'_> {
    /// Lines of the panel body, without the border.
    pub fn lines<N: RenderNotifier>(
        &self,
        pet: &Pet<N>,
        now: Timestamp,
        theme: &Theme,
    ) -> Vec<Line<'static>> {
        let art = self.frames.frame(pet.mood(), pet.frame_index());
        let mut lines: Vec<Line> = center_lines(art, ART_WIDTH)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, theme.text)))
            .collect();
        lines.push(Line::default());

        let committed = pet
            .time_since_commit(now)
            .map_or_else(|| "Unknown".to_string(), |d| format!("{} ago", format_elapsed(d)));
        let counts = pet.commit_counts(now);

        lines.push(field("Mood", pet.mood().as_str().to_uppercase(), theme));
        lines.push(field("Repo", self.repo.to_string(), theme));
        lines.push(field("Committed", committed, theme));
        lines.push(field(
            "Commits",
            format!("{} today, {} this week", counts.last_24h, counts.last_7d),
            theme,
        ));

        if let Some(countdown) = pet.time_until_next_mood(now) {
            let bar = hunger_bar(pet.mood(), countdown, pet.frame_index());
            lines.push(field(
                "Hungry in",
                format!("{} {bar}", format_elapsed(countdown)),
                theme,
            ));
        }
        lines
    }

    pub fn render<N: RenderNotifier>(
        &self,
        frame: &mut Frame,
        area: Rect,
        pet: &Pet<N>,
        now: Timestamp,
        theme: &Theme,
    ) {
        let body = Paragraph::new(Text::from(self.lines(pet, now, theme))).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme.accent)
                .title(Span::styled(" Tuxagotchi ", theme.accent)),
        );
        frame.render_widget(body, area);
    }
}

fn field(label: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.highlight),
        Span::styled(value, theme.text),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    use crate::config::Colors;
    use crate::model::{CommitRecord, PollOutcome};
    use crate::pet::tests::CountingNotifier;

    fn t() -> Timestamp {
        "2025-06-10T12:00:00Z".parse().unwrap()
    }

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    fn panel_text(pet: &Pet<CountingNotifier>) -> Vec<String> {
        let frames = FrameCache::builtin();
        let panel = PetPanel {
            frames: &frames,
            repo: "tux",
        };
        let theme = Theme::from_colors(&Colors::default());
        text_of(&panel.lines(pet, t(), &theme))
    }

    fn pet_with_commit(age: SignedDuration) -> Pet<CountingNotifier> {
        let mut pet = Pet::new(CountingNotifier::default());
        let at = t() - age;
        pet.apply_outcome(
            &PollOutcome::Fetched(vec![CommitRecord {
                author_time: at,
                committer_time: at,
            }]),
            t(),
        );
        pet
    }

    #[test]
    fn unknown_commit_shows_unknown_without_countdown() {
        let text = panel_text(&Pet::new(CountingNotifier::default()));
        assert!(text.contains(&"Mood: NEUTRAL".to_string()));
        assert!(text.contains(&"Committed: Unknown".to_string()));
        assert!(!text.iter().any(|l| l.starts_with("Hungry in")));
    }

    #[test]
    fn happy_pet_shows_countdown() {
        let text = panel_text(&pet_with_commit(SignedDuration::from_hours(3)));
        assert!(text.contains(&"Mood: HAPPY".to_string()));
        assert!(text.contains(&"Committed: 3h ago".to_string()));
        assert!(text.contains(&"Commits: 1 today, 1 this week".to_string()));
        assert!(text.iter().any(|l| l.starts_with("Hungry in: 1h ")));
    }

    #[test]
    fn sad_pet_has_no_countdown() {
        let text = panel_text(&pet_with_commit(SignedDuration::from_hours(30)));
        assert!(text.contains(&"Mood: SAD".to_string()));
        assert!(!text.iter().any(|l| l.starts_with("Hungry in")));
    }
}
