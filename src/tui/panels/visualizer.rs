//! Visualizer panel: the latest bar frame, or why there isn't one.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::theme::Theme;
use crate::visualizer::render_bars;

/// What the panel has to show.
pub enum VisualizerView {
    /// Turned off with `--no-visualizer`.
    Disabled,

    /// The subprocess could not be started.
    Unavailable(String),

    /// Running; the newest bar heights (empty until the first frame).
    Bars(Vec<u8>),
}

impl VisualizerView {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let line = match self {
            VisualizerView::Disabled => Line::from(Span::styled("visualizer off", theme.muted)),
            VisualizerView::Unavailable(reason) => Line::from(Span::styled(
                format!("visualizer unavailable: {reason}"),
                theme.muted,
            )),
            VisualizerView::Bars(bars) => Line::from(Span::styled(render_bars(bars), theme.text)),
        };

        let panel = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme.muted)
                .title(" ♫ "),
        );
        frame.render_widget(panel, area);
    }
}
