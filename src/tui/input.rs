//! TUI keyboard input handling.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::art::{self, GenerationRequest};

use super::state::*;

const SCROLL_PAGE: i32 = 10;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.exit = true;
        return Ok(true);
    }

    if app.modal.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.modal = None;
        }
        return Ok(false);
    }

    if ctrl {
        match key.code {
            KeyCode::Char('s') => app.pending_action = Some(Action::Download),
            KeyCode::Char('t') => toggle_title(app),
            KeyCode::Char('u') if app.focus == Focus::Text => app.text_input.clear(),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            app.exit = true;
            return Ok(true);
        }
        KeyCode::Enter => app.pending_action = Some(Action::Generate),
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggle(),
        KeyCode::PageUp => app.scroll_result(-SCROLL_PAGE),
        KeyCode::PageDown => app.scroll_result(SCROLL_PAGE),
        _ => match app.focus {
            Focus::Text => handle_text_key(app, key),
            Focus::Style => handle_style_key(app, key),
        },
    }
    Ok(false)
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.text_input.push(c),
        KeyCode::Backspace => {
            app.text_input.pop();
        }
        KeyCode::Up => app.scroll_result(-1),
        KeyCode::Down => app.scroll_result(1),
        _ => {}
    }
}

fn handle_style_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Up => app.prev_style(),
        KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => app.next_style(),
        _ => {}
    }
}

fn toggle_title(app: &mut App) {
    if app.title.is_running() {
        app.title.stop();
    } else {
        app.title.start(std::time::Instant::now());
    }
}

/// Spawn a generation request for the current input. Earlier requests keep
/// running, but their completions will be discarded.
pub(crate) fn handle_generate(rt: &tokio::runtime::Handle, app: &mut App) {
    let request = GenerationRequest::new(app.text_input.clone(), app.style());
    let id = app.sequencer.issue();
    let client = app.client.clone();
    let tx = app.completions_tx.clone();

    tracing::info!(id = ?id, style = %request.style, "submitting generation request");
    rt.spawn(async move {
        let outcome = client.generate(&request).await;
        // The receiver only goes away when the UI is shutting down.
        let _ = tx.send(Completion { id, outcome });
    });
}

/// Save the displayed result to `ascii_art.txt`.
pub(crate) fn handle_download(app: &mut App) {
    if !app.result.download_enabled() {
        app.set_info(
            "Nothing to download",
            "Generate some art first. Errors can't be downloaded.",
        );
        return;
    }

    let dir = app.config.export.resolved_directory();
    match art::export_art(app.result.text(), &dir) {
        Ok(path) => {
            if app.config.export.open_after_save {
                art::open_exported(&path);
            }
            app.set_info("Saved", format!("Art saved to:\n{}", path.display()));
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "export failed");
            app.set_error("Download failed", format!("{err:#}"));
        }
    }
}
