//! Editor controller: binds the active document to editable fields and runs
//! the suggestion flow.
//!
//! # Responsibility
//! - Forward title/content edits to the active document.
//! - Drive the `Idle -> AwaitingSuggestion -> Idle` cycle.
//!
//! # Invariants
//! - At most one suggestion is in flight per controller.
//! - Blank instructions never leave `Idle`.
//! - A suggestion is appended to the document that was active when it was
//!   requested, even if the selection moved since.
//! - Every `begin_suggestion` that returns a request is closed by the
//!   matching `complete_suggestion`.

use crate::effects::{noop_effects, SharedEffects};
use crate::model::document::DocumentId;
use crate::service::document_store::DocumentStore;
use crate::storage::DocumentStorage;
use crate::suggestion::{SuggestionBackend, SuggestionClient};
use log::{debug, info};

/// Number of trailing content characters sent as suggestion context.
pub const CONTEXT_WINDOW_CHARS: usize = 800;
/// Separator placed between existing content and an appended suggestion.
pub const SUGGESTION_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    Idle,
    AwaitingSuggestion,
}

/// Snapshot captured when a suggestion is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    ticket: u64,
    /// Document the result will be appended to.
    pub document_id: DocumentId,
    /// Trailing window of the document content.
    pub context: String,
    pub instruction: String,
}

pub struct EditorController {
    state: SuggestionState,
    instruction: String,
    next_ticket: u64,
    pending_ticket: Option<u64>,
    effects: SharedEffects,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    pub fn new() -> Self {
        Self::with_effects(noop_effects())
    }

    pub fn with_effects(effects: SharedEffects) -> Self {
        Self {
            state: SuggestionState::Idle,
            instruction: String::new(),
            next_ticket: 0,
            pending_ticket: None,
            effects,
        }
    }

    pub fn state(&self) -> SuggestionState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SuggestionState::AwaitingSuggestion
    }

    pub fn instruction(&self) -> &str {
        self.instruction.as_str()
    }

    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_awaiting() && !self.instruction.trim().is_empty()
    }

    /// Replaces the active document's title. Returns `false` with no active
    /// document.
    pub fn edit_title<S: DocumentStorage>(
        &self,
        store: &mut DocumentStore<S>,
        title: impl Into<String>,
    ) -> bool {
        match store.active_id().map(str::to_owned) {
            Some(id) => store.update_title(&id, title),
            None => false,
        }
    }

    /// Replaces the active document's content. Returns `false` with no
    /// active document.
    pub fn edit_content<S: DocumentStorage>(
        &self,
        store: &mut DocumentStore<S>,
        content: impl Into<String>,
    ) -> bool {
        match store.active_id().map(str::to_owned) {
            Some(id) => store.update_content(&id, content),
            None => false,
        }
    }

    /// Enters `AwaitingSuggestion` and captures what to send.
    ///
    /// Returns `None` (staying idle or awaiting) when the instruction is
    /// blank, a suggestion is already in flight, or nothing is selected.
    pub fn begin_suggestion<S: DocumentStorage>(
        &mut self,
        store: &DocumentStore<S>,
    ) -> Option<SuggestionRequest> {
        if self.is_awaiting() {
            debug!("event=suggestion_begin module=editor status=skipped reason=in_flight");
            return None;
        }
        if self.instruction.trim().is_empty() {
            debug!("event=suggestion_begin module=editor status=skipped reason=blank_instruction");
            return None;
        }
        let document = store.active_document()?;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_ticket = Some(ticket);
        self.state = SuggestionState::AwaitingSuggestion;
        self.effects.suggestion_started();

        info!(
            "event=suggestion_begin module=editor status=ok ticket={} content_chars={}",
            ticket,
            document.content.chars().count()
        );
        Some(SuggestionRequest {
            ticket,
            document_id: document.id.clone(),
            context: trailing_window(&document.content, CONTEXT_WINDOW_CHARS).to_string(),
            instruction: self.instruction.clone(),
        })
    }

    /// Appends `suggestion` to the requested document and returns to `Idle`.
    ///
    /// Returns whether the text was applied; a request that is not the one
    /// in flight is ignored, and a target deleted meanwhile is a no-op.
    pub fn complete_suggestion<S: DocumentStorage>(
        &mut self,
        store: &mut DocumentStore<S>,
        request: SuggestionRequest,
        suggestion: &str,
    ) -> bool {
        if self.pending_ticket != Some(request.ticket) {
            debug!(
                "event=suggestion_complete module=editor status=skipped reason=stale_ticket ticket={}",
                request.ticket
            );
            return false;
        }

        let applied = match store.get(&request.document_id) {
            Some(document) => {
                let merged = append_suggestion(&document.content, suggestion);
                store.update_content(&request.document_id, merged)
            }
            None => false,
        };

        self.instruction.clear();
        self.pending_ticket = None;
        self.state = SuggestionState::Idle;
        self.effects.suggestion_finished();

        info!(
            "event=suggestion_complete module=editor status=ok ticket={} applied={}",
            request.ticket, applied
        );
        applied
    }

    /// Runs the whole flow, awaiting the client between the two halves.
    pub async fn suggest_inline<S, B>(
        &mut self,
        store: &mut DocumentStore<S>,
        client: &SuggestionClient<B>,
    ) -> bool
    where
        S: DocumentStorage,
        B: SuggestionBackend,
    {
        let Some(request) = self.begin_suggestion(store) else {
            return false;
        };
        let suggestion = client.suggest(&request.context, &request.instruction).await;
        self.complete_suggestion(store, request, &suggestion)
    }
}

/// Whether a key press is the submit shortcut (Ctrl+Enter or Cmd+Enter).
pub fn is_submit_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    key == "Enter" && (ctrl || meta)
}

/// Returns at most the last `max_chars` characters of `content`.
pub fn trailing_window(content: &str, max_chars: usize) -> &str {
    let total = content.chars().count();
    if total <= max_chars {
        return content;
    }
    content
        .char_indices()
        .nth(total - max_chars)
        .map_or(content, |(start, _)| &content[start..])
}

/// Joins existing content and a suggestion with a blank line.
pub fn append_suggestion(content: &str, suggestion: &str) -> String {
    if content.is_empty() {
        suggestion.to_string()
    } else {
        format!("{content}{SUGGESTION_SEPARATOR}{suggestion}")
    }
}
