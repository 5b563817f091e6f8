//! Writing-suggestion boundary.
//!
//! # Responsibility
//! - Turn (context, instruction) into one prompt for a generative-text service.
//! - Absorb every service failure into friendly placeholder text.
//!
//! # Invariants
//! - `SuggestionClient::suggest` never returns an error and never panics.
//! - Failure detail goes to logs only; prompt text and credentials are never
//!   logged.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;
mod gemini;

pub use client::{
    build_prompt, SuggestionClient, EMPTY_SUGGESTION_PLACEHOLDER, FAILURE_FALLBACK,
};
pub use gemini::{GeminiBackend, DEFAULT_API_BASE_URL, DEFAULT_MODEL};

/// Transport-level failure raised by a suggestion backend.
#[derive(Debug)]
pub enum SuggestionError {
    /// Request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// Service answered with a non-success status.
    Status { code: u16, body: String },
    /// Service answered with a body that does not match the expected shape.
    MalformedResponse(String),
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status { code, body } => write!(f, "service returned status {code}: {body}"),
            Self::MalformedResponse(details) => write!(f, "malformed service response: {details}"),
        }
    }
}

impl Error for SuggestionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } | Self::MalformedResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for SuggestionError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Raw generative-text transport: one prompt in, one text out.
#[async_trait::async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestionError>;
}
