//! Generation request/result types and the result region state.

mod export;

pub use export::{export_art, open_exported, EXPORT_FILE_NAME};

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Prefix shown before a message the service rejected the request with.
pub const REJECTED_PREFIX: &str = "Error: ";
/// Prefix shown when the request could not be completed or understood.
pub const TRANSPORT_PREFIX: &str = "Error connecting to server: ";

/// Body of a `POST /generate` call. Values are sent as typed, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub text: String,
    pub style: String,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }
}

/// What the service answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Art(String),
    /// The service understood the request but refused it.
    Rejected(String),
}

/// Wire shape of a response. The service always emits `art`, and adds a non-empty
/// `error` when it refuses a request.
#[derive(Debug, Deserialize)]
pub(crate) struct RawGenerationResponse {
    #[serde(default)]
    art: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RawGenerationResponse> for GenerationResult {
    type Error = ApiError;

    fn try_from(raw: RawGenerationResponse) -> Result<Self, Self::Error> {
        if let Some(error) = raw.error.filter(|e| !e.is_empty()) {
            return Ok(GenerationResult::Rejected(error));
        }
        match raw.art {
            Some(art) => Ok(GenerationResult::Art(art)),
            None => Err(ApiError::Transport(
                "response carried neither `art` nor `error`".to_string(),
            )),
        }
    }
}

/// Decode a response body into a [`GenerationResult`].
pub fn decode_response(body: &[u8]) -> Result<GenerationResult, ApiError> {
    let raw: RawGenerationResponse = serde_json::from_slice(body)
        .map_err(|err| ApiError::Transport(format!("invalid response body: {err}")))?;
    GenerationResult::try_from(raw)
}

/// Text currently displayed in the result region plus the download toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    text: String,
    download_enabled: bool,
}

impl ResultView {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn download_enabled(&self) -> bool {
        self.download_enabled
    }

    /// Replace the region with the outcome of a submission.
    pub fn apply(&mut self, outcome: &Result<GenerationResult, ApiError>) {
        match outcome {
            Ok(GenerationResult::Art(art)) => {
                self.text = art.clone();
                self.download_enabled = true;
            }
            Ok(GenerationResult::Rejected(message)) => {
                self.text = format!("{REJECTED_PREFIX}{message}");
                self.download_enabled = false;
            }
            Err(err) => {
                self.text = format!("{TRANSPORT_PREFIX}{err}");
                self.download_enabled = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn art_response_enables_download() {
        let mut view = ResultView::default();
        view.apply(&decode_response(br#"{"art": "X"}"#));
        assert_eq!(view.text(), "X");
        assert!(view.download_enabled());
    }

    #[test]
    fn rejected_response_is_prefixed_and_disables_download() {
        let mut view = ResultView::default();
        view.apply(&decode_response(br#"{"art": "X"}"#));
        view.apply(&decode_response(br#"{"error": "bad style"}"#));
        assert_eq!(view.text(), "Error: bad style");
        assert!(!view.download_enabled());
    }

    #[test]
    fn transport_failure_uses_connection_prefix() {
        let mut view = ResultView::default();
        view.apply(&Err(ApiError::Transport("timeout".to_string())));
        assert_eq!(view.text(), "Error connecting to server: timeout");
        assert!(!view.download_enabled());
    }

    #[test]
    fn error_wins_over_empty_art() {
        // The service serializes `art` even on refusals.
        let result = decode_response(br#"{"art": "", "error": "Invalid style selected"}"#);
        assert_eq!(
            result.unwrap(),
            GenerationResult::Rejected("Invalid style selected".to_string())
        );
    }

    #[test]
    fn empty_error_falls_through_to_art() {
        let result = decode_response(br#"{"art": " _ \n", "error": ""}"#);
        assert_eq!(result.unwrap(), GenerationResult::Art(" _ \n".to_string()));
    }

    #[test]
    fn malformed_bodies_are_transport_errors() {
        assert!(matches!(
            decode_response(b"<html>502</html>"),
            Err(ApiError::Transport(_))
        ));
        assert!(matches!(
            decode_response(br#"{"status": "ok"}"#),
            Err(ApiError::Transport(_))
        ));
        assert!(matches!(
            decode_response(br#"{"art": 42}"#),
            Err(ApiError::Transport(_))
        ));
    }

    #[test]
    fn request_serializes_text_and_style() {
        let body = serde_json::to_value(GenerationRequest::new("Hi", "shadow")).unwrap();
        assert_eq!(body, serde_json::json!({"text": "Hi", "style": "shadow"}));
    }
}
