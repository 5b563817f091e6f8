use super::SuggestionBackend;
use log::{info, warn};
use std::time::Instant;

/// Returned when the service answers with no usable text.
pub const EMPTY_SUGGESTION_PLACEHOLDER: &str = "I couldn't think of anything right now. ✨";
/// Returned when the service call fails for any reason.
pub const FAILURE_FALLBACK: &str = "The muse is taking a nap. Try again in a second! ☁️";

/// Builds the single combined prompt sent to the service.
pub fn build_prompt(context: &str, instruction: &str) -> String {
    format!(
        "You are a helpful writing assistant for InkSync.\n\
         The current context is: \"{context}\".\n\
         The user wants you to: \"{instruction}\".\n\
         Please provide a concise, creative completion or suggestion. \
         Keep the tone friendly and helpful."
    )
}

/// Suggestion facade that always yields usable text.
pub struct SuggestionClient<B: SuggestionBackend> {
    backend: B,
}

impl<B: SuggestionBackend> SuggestionClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Requests a suggestion for `instruction` given the trailing `context`.
    ///
    /// # Contract
    /// - Service text is returned as received, whitespace included.
    /// - Blank service text yields `EMPTY_SUGGESTION_PLACEHOLDER`.
    /// - Any error yields `FAILURE_FALLBACK`; no retries are attempted.
    pub async fn suggest(&self, context: &str, instruction: &str) -> String {
        let started_at = Instant::now();
        let prompt = build_prompt(context, instruction);

        match self.backend.generate(&prompt).await {
            Ok(text) => {
                let blank = text.trim().is_empty();
                info!(
                    "event=suggestion module=suggestion status=ok duration_ms={} context_chars={} empty={}",
                    started_at.elapsed().as_millis(),
                    context.chars().count(),
                    blank
                );
                if blank {
                    EMPTY_SUGGESTION_PLACEHOLDER.to_string()
                } else {
                    text
                }
            }
            Err(err) => {
                warn!(
                    "event=suggestion module=suggestion status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                FAILURE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_prompt;

    #[test]
    fn prompt_embeds_context_and_instruction() {
        let prompt = build_prompt("Once upon a time", "continue");
        assert!(prompt.contains("InkSync"));
        assert!(prompt.contains("\"Once upon a time\""));
        assert!(prompt.contains("\"continue\""));
        assert!(prompt.contains("friendly and helpful"));
    }
}
