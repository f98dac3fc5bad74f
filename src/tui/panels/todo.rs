//! Todo panel: an in-memory list with vim-ish navigation.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph};

use crate::tui::theme::Theme;

/// Whether keystrokes go to the input line or drive the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoMode {
    Insert,
    Navigate,
}

/// The todo list. Lives only as long as the process.
pub struct TodoList {
    items: Vec<String>,
    selected: usize,
    input: String,
    mode: TodoMode,
}

impl TodoList {
    /// Starts in insert mode so typing works immediately.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            input: String::new(),
            mode: TodoMode::Insert,
        }
    }

    pub fn mode(&self) -> TodoMode {
        self.mode
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    // ── Insert mode ──

    pub fn on_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn on_backspace(&mut self) {
        self.input.pop();
    }

    /// Append the input as a new item and select it. Blank input is ignored.
    pub fn submit(&mut self) {
        let text = self.input.trim();
        if !text.is_empty() {
            self.items.push(text.to_string());
            self.selected = self.items.len() - 1;
        }
        self.input.clear();
    }

    pub fn leave_insert(&mut self) {
        self.mode = TodoMode::Navigate;
    }

    // ── Navigate mode ──

    pub fn enter_insert(&mut self) {
        self.mode = TodoMode::Insert;
    }

    /// Move down, wrapping to the top.
    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    /// Delete the selected item; the selection moves up one.
    pub fn delete_selected(&mut self) {
        if self.selected < self.items.len() {
            self.items.remove(self.selected);
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [list_area, input_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.selected {
                    ListItem::new(Line::from(vec![
                        Span::styled("► ◦ ", theme.highlight),
                        Span::styled(item.as_str(), theme.highlight),
                    ]))
                } else {
                    ListItem::new(Line::from(Span::styled(format!("  ◦ {item}"), theme.text)))
                }
            })
            .collect();

        let title = if self.items().is_empty() {
            " TODO ".to_string()
        } else {
            format!(" TODO {}/{} ", self.selected() + 1, self.items().len())
        };
        let list = List::new(items).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme.todo_border)
                .title(title),
        );
        frame.render_widget(list, list_area);

        let (line, border) = match self.mode {
            TodoMode::Insert => (
                Line::from(vec![
                    Span::styled(self.input.as_str(), theme.text),
                    Span::styled("▏", theme.highlight),
                ]),
                theme.highlight,
            ),
            TodoMode::Navigate if self.input.is_empty() => {
                (Line::from(Span::styled("TODO:", theme.muted)), theme.muted)
            }
            TodoMode::Navigate => (
                Line::from(Span::styled(self.input.as_str(), theme.muted)),
                theme.muted,
            ),
        };
        let input = Paragraph::new(line).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
        frame.render_widget(input, input_area);
    }
}
