//! API module
//!
//! HTTP client for the ASCII art generation service.

mod client;
mod sequence;

pub use client::{ApiError, ArtClient};
pub use sequence::{RequestId, RequestSequencer};
