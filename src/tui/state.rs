//! TUI application state types.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use anyhow::Result;

use crate::api::{ApiError, ArtClient, RequestId, RequestSequencer};
use crate::art::{GenerationResult, ResultView};
use crate::config::Config;

use super::animation::TitleAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Text,
    Style,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Text => Focus::Style,
            Focus::Style => Focus::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ModalState {
    pub title: String,
    pub message: String,
    pub kind: ModalKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalKind {
    Error,
    Info,
}

/// Outcome of one submission, sent back to the UI loop by its task.
#[derive(Debug)]
pub(crate) struct Completion {
    pub id: RequestId,
    pub outcome: Result<GenerationResult, ApiError>,
}

#[derive(Debug)]
pub(crate) enum Action {
    Generate,
    Download,
}

pub(crate) struct AnimationState {
    pub tick: u64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[(self.tick as usize / 6) % FRAMES.len()]
    }
}

pub(crate) struct App {
    pub config: Config,
    pub client: ArtClient,
    pub title: TitleAnimator,
    pub text_input: String,
    pub style_index: usize,
    pub focus: Focus,
    pub result: ResultView,
    pub result_scroll: u16,
    pub sequencer: RequestSequencer,
    pub completions_tx: mpsc::Sender<Completion>,
    completions_rx: mpsc::Receiver<Completion>,
    pub modal: Option<ModalState>,
    pub pending_action: Option<Action>,
    pub exit: bool,
    pub last_tick: Instant,
    pub animation: AnimationState,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = ArtClient::from_config(&config.api);
        let mut title = TitleAnimator::from_config(&config.title)?;
        let now = Instant::now();
        title.start(now);
        let (completions_tx, completions_rx) = mpsc::channel();

        Ok(Self {
            style_index: config.styles.default_index(),
            config,
            client,
            title,
            text_input: String::new(),
            focus: Focus::Text,
            result: ResultView::default(),
            result_scroll: 0,
            sequencer: RequestSequencer::new(),
            completions_tx,
            completions_rx,
            modal: None,
            pending_action: None,
            exit: false,
            last_tick: now,
            animation: AnimationState::new(),
        })
    }

    pub fn style(&self) -> &str {
        self.config
            .styles
            .available
            .get(self.style_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn next_style(&mut self) {
        let len = self.config.styles.available.len().max(1);
        self.style_index = (self.style_index + 1) % len;
    }

    pub fn prev_style(&mut self) {
        let len = self.config.styles.available.len().max(1);
        self.style_index = if self.style_index == 0 {
            len - 1
        } else {
            self.style_index - 1
        };
    }

    pub fn is_generating(&self) -> bool {
        self.sequencer.pending()
    }

    /// Show a completion if it answers the latest submission.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        if !self.sequencer.settle(completion.id) {
            tracing::debug!(id = ?completion.id, "discarding stale completion");
            return false;
        }
        self.result.apply(&completion.outcome);
        self.result_scroll = 0;
        tracing::debug!(
            id = ?completion.id,
            download_enabled = self.result.download_enabled(),
            "applied completion"
        );
        true
    }

    /// Apply every completion that arrived since the last frame.
    pub fn drain_completions(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.completions_rx.try_recv() {
                Ok(completion) => changed |= self.apply_completion(completion),
                Err(TryRecvError::Empty) => break,
                // App holds a sender, so this only happens during teardown.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    pub fn scroll_result(&mut self, delta: i32) {
        let lines = self.result.text().lines().count();
        let max = u16::try_from(lines).unwrap_or(u16::MAX);
        let next = (i32::from(self.result_scroll) + delta).clamp(0, i32::from(max));
        self.result_scroll = u16::try_from(next).unwrap_or(max);
    }

    pub fn set_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(ModalState {
            title: title.into(),
            message: message.into(),
            kind: ModalKind::Error,
        });
    }

    pub fn set_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(ModalState {
            title: title.into(),
            message: message.into(),
            kind: ModalKind::Info,
        });
    }
}
