//! TUI animation helpers (typewriter title).

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::TitleConfig;

/// Upper bound on steps replayed by one `tick` after the loop stalled.
const MAX_CATCH_UP_STEPS: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum AnimationError {
    #[error("title list is empty")]
    NoTitles,

    #[error("typing delay ({typing:?}) must be longer than deleting delay ({deleting:?})")]
    TypingNotSlower { typing: Duration, deleting: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TitleTiming {
    pub typing: Duration,
    pub deleting: Duration,
    pub pause: Duration,
}

impl TitleTiming {
    pub fn new(
        typing: Duration,
        deleting: Duration,
        pause: Duration,
    ) -> Result<Self, AnimationError> {
        if typing <= deleting {
            return Err(AnimationError::TypingNotSlower { typing, deleting });
        }
        Ok(Self {
            typing,
            deleting,
            pause,
        })
    }
}

impl Default for TitleTiming {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(200),
            deleting: Duration::from_millis(100),
            pause: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Typing,
    PausedAtFull,
    Deleting,
}

/// Typewriter effect over a fixed list of titles.
///
/// Each step reveals or removes one character. A fully typed title is held for
/// the pause delay, then deleted twice as fast as it was typed, and the next
/// title starts. `char_index` always stays within the current title.
#[derive(Debug, Clone)]
pub(crate) struct TitleAnimator {
    titles: Vec<String>,
    title_index: usize,
    char_index: usize,
    phase: Phase,
    timing: TitleTiming,
    next_due: Option<Instant>,
}

impl TitleAnimator {
    pub fn new(titles: Vec<String>, timing: TitleTiming) -> Result<Self, AnimationError> {
        if titles.is_empty() {
            return Err(AnimationError::NoTitles);
        }
        Ok(Self {
            titles,
            title_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            timing,
            next_due: None,
        })
    }

    pub fn from_config(config: &TitleConfig) -> Result<Self, AnimationError> {
        let timing = TitleTiming::new(
            Duration::from_millis(config.typing_ms),
            Duration::from_millis(config.deleting_ms),
            Duration::from_millis(config.pause_ms),
        )?;
        Self::new(config.titles.clone(), timing)
    }

    #[cfg(test)]
    pub fn title_index(&self) -> usize {
        self.title_index
    }

    #[cfg(test)]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Prefix of the current title that is on screen.
    pub fn visible(&self) -> &str {
        let title = &self.titles[self.title_index];
        match title.char_indices().nth(self.char_index) {
            Some((byte, _)) => &title[..byte],
            None => title,
        }
    }

    fn current_len(&self) -> usize {
        self.titles[self.title_index].chars().count()
    }

    /// Advance by one character and return the delay before the next step.
    pub fn step(&mut self) -> Duration {
        match self.phase {
            Phase::Typing => {
                let len = self.current_len();
                if self.char_index < len {
                    self.char_index += 1;
                }
                if self.char_index >= len {
                    self.phase = Phase::PausedAtFull;
                    return self.timing.pause;
                }
                self.timing.typing
            }
            Phase::PausedAtFull => {
                self.phase = Phase::Deleting;
                self.delete_one()
            }
            Phase::Deleting => self.delete_one(),
        }
    }

    fn delete_one(&mut self) -> Duration {
        self.char_index = self.char_index.saturating_sub(1);
        if self.char_index == 0 {
            self.phase = Phase::Typing;
            self.title_index = (self.title_index + 1) % self.titles.len();
            return self.timing.typing;
        }
        self.timing.deleting
    }

    /// Schedule the first step at `now`. Restarting keeps the current text.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now);
        }
    }

    /// Freeze the animation on its current text.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Run every step that is due at `now`. Returns whether the text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_due else {
            return false;
        };

        let mut steps = 0;
        while due <= now && steps < MAX_CATCH_UP_STEPS {
            due += self.step();
            steps += 1;
        }
        if due < now {
            due = now;
        }
        self.next_due = Some(due);
        steps > 0
    }
}
