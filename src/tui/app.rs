//! Application loop: timers, input, and drawing.
//!
//! This thread owns the pet. Fetches and visualizer frames arrive from
//! other threads as channel messages and are applied here.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use jiff::Timestamp;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use crate::config::Config;
use crate::frames::FrameCache;
use crate::observe::CommitSource;
use crate::pet::{Pet, RedrawFlag};
use crate::poll::PollScheduler;
use crate::visualizer::{self, Visualizer};

use super::panels::{PetPanel, TodoList, TodoMode, VisualizerView};
use super::theme::Theme;

/// How long to wait for input before checking timers.
const INPUT_POLL: Duration = Duration::from_millis(100);

const PET_WIDTH: u16 = 60;
const VISUALIZER_HEIGHT: u16 = 5;

const KEYBINDS: &str =
    "【q ➡ Quit】【a ➡ Insert】【x ➡ Delete】【j/k ➡ Up/Down】【esc ➡ Navigate】";

/// Whether the loop should keep going after a key.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Everything the loop draws from.
struct App<S> {
    pet: Pet<RedrawFlag>,
    redraw: RedrawFlag,
    scheduler: PollScheduler<S>,
    frames: FrameCache,
    repo: String,
    theme: Theme,
    todo: TodoList,
    visualizer: Option<Visualizer>,
    view: VisualizerView,
}

/// Runs the TUI event loop until the user quits.
pub fn run<S: CommitSource>(
    config: &Config,
    frames: FrameCache,
    source: S,
    with_visualizer: bool,
) -> io::Result<()> {
    let redraw = RedrawFlag::default();
    let (visualizer, view) = if with_visualizer {
        match Visualizer::spawn(visualizer::CAVA) {
            Ok(v) => (Some(v), VisualizerView::Bars(Vec::new())),
            Err(e) => {
                tracing::warn!(error = %e, "visualizer unavailable");
                (None, VisualizerView::Unavailable(e.to_string()))
            }
        }
    } else {
        (None, VisualizerView::Disabled)
    };

    let mut app = App {
        pet: Pet::new(redraw.clone()),
        redraw,
        scheduler: PollScheduler::new(Arc::new(source), config.timing.debounce()),
        frames,
        repo: config.github.repo.clone(),
        theme: Theme::from_colors(&config.colors),
        todo: TodoList::new(),
        visualizer,
        view,
    };

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, config);
    ratatui::restore();
    result
}

fn event_loop<S: CommitSource>(
    terminal: &mut DefaultTerminal,
    app: &mut App<S>,
    config: &Config,
) -> io::Result<()> {
    let animation_interval = config.timing.animation_interval();
    let poll_interval = config.timing.poll_interval();
    let mut last_animation = Instant::now();
    let mut last_poll = Instant::now();

    // Poll once at startup rather than waiting out the first interval.
    app.scheduler.tick(&mut app.pet, Timestamp::now());
    let mut dirty = true;

    loop {
        if app.redraw.take() || dirty {
            let now = Timestamp::now();
            terminal.draw(|frame| app.render(frame, now))?;
            dirty = false;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) == Flow::Quit {
                        return Ok(());
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if last_animation.elapsed() >= animation_interval {
            app.pet.advance_frame(Timestamp::now());
            last_animation = Instant::now();
        }

        if last_poll.elapsed() >= poll_interval {
            app.scheduler.tick(&mut app.pet, Timestamp::now());
            last_poll = Instant::now();
        }

        // A finished fetch is applied as soon as it lands, still on this thread.
        app.scheduler.drain(&mut app.pet, Timestamp::now());

        if let Some(bars) = app.visualizer.as_ref().and_then(Visualizer::latest) {
            app.view = VisualizerView::Bars(bars);
            dirty = true;
        }
    }
}

impl<S: CommitSource> App<S> {
    fn on_key(&mut self, key: KeyEvent) -> Flow {
        match self.todo.mode() {
            TodoMode::Insert => match key.code {
                KeyCode::Esc => self.todo.leave_insert(),
                KeyCode::Enter => self.todo.submit(),
                KeyCode::Backspace => self.todo.on_backspace(),
                KeyCode::Char(c) => self.todo.on_char(c),
                _ => {}
            },
            TodoMode::Navigate => match key.code {
                KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char('j') | KeyCode::Down => self.todo.move_down(),
                KeyCode::Char('k') | KeyCode::Up => self.todo.move_up(),
                KeyCode::Char('x') => self.todo.delete_selected(),
                KeyCode::Char('a' | 'i') => self.todo.enter_insert(),
                _ => {}
            },
        }
        Flow::Continue
    }

    fn render(&self, frame: &mut Frame, now: Timestamp) {
        let [visualizer_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(VISUALIZER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [pet_area, todo_area] =
            Layout::horizontal([Constraint::Length(PET_WIDTH), Constraint::Min(20)])
                .areas(main_area);

        self.view.render(frame, visualizer_area, &self.theme);

        let panel = PetPanel {
            frames: &self.frames,
            repo: &self.repo,
        };
        panel.render(frame, pet_area, &self.pet, now, &self.theme);

        self.todo.render(frame, todo_area, &self.theme);

        let mut help = vec![Span::styled(KEYBINDS, self.theme.muted)];
        if self.scheduler.in_flight() {
            help.push(Span::styled(" fetching…", self.theme.muted));
        }
        let help = Paragraph::new(Line::from(help));
        frame.render_widget(help, help_area);
    }
}
