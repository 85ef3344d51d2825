//! TUI screen drawing functions.

pub(crate) mod generator;
pub(crate) mod modal;
