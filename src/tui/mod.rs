//! Fullscreen terminal UI (TUI).
//!
//! One UI thread drives everything: it drains finished generation requests,
//! advances the typewriter title, and handles keys. Requests run as tasks on the
//! tokio runtime and report back through a channel.

pub(crate) mod animation;
pub(crate) mod input;
pub(crate) mod screens;
pub(crate) mod state;
pub(crate) mod theme;
pub(crate) mod widgets;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use crate::config::Config;
use state::*;
use theme::Theme;

const FRAME_TIME: Duration = Duration::from_millis(16);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub(crate) fn run_tui(rt: &tokio::runtime::Runtime, config: Config) -> Result<()> {
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    tracing::info!(endpoint = %app.client.endpoint(), "terminal UI started");

    loop {
        terminal.draw(|f| draw(f.area(), f, &app))?;

        app.drain_completions();

        if let Some(action) = app.pending_action.take() {
            match action {
                Action::Generate => input::handle_generate(rt.handle(), &mut app),
                Action::Download => input::handle_download(&mut app),
            }
            continue;
        }

        let timeout = FRAME_TIME.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if input::handle_key(&mut app, key)? {
                    break;
                }
            }
        }

        if app.last_tick.elapsed() >= FRAME_TIME {
            let now = Instant::now();
            app.last_tick = now;
            app.animation.advance();
            app.title.tick(now);
        }
    }

    tracing::info!(quit = app.exit, "terminal UI closed");
    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame, app: &App) {
    let theme = Theme::default();

    // Top header bar + content area
    let outer_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // content
        ])
        .split(area);

    let context = (!app.title.is_running()).then_some("paused");
    widgets::header::draw_header(
        outer_layout[0],
        f,
        &theme,
        app.title.visible(),
        context,
    );

    let inner = outer_layout[1];
    screens::generator::draw_generator(inner, f, app, theme);
    if app.modal.is_some() {
        screens::modal::draw_modal(inner, f, app, theme);
    }
}
