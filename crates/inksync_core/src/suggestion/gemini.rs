//! Gemini `generateContent` transport.

use super::{SuggestionBackend, SuggestionError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// HTTP backend for the Gemini generative-text API.
///
/// A missing credential is not rejected here; the service refuses the call
/// and the client falls back.
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_MODEL, DEFAULT_API_BASE_URL)
    }

    pub fn with_endpoint(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_str()
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait::async_trait]
impl SuggestionBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestionError> {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SuggestionError::Status {
                code: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        extract_text(&text)
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, SuggestionError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| SuggestionError::MalformedResponse(err.to_string()))?;

    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}
