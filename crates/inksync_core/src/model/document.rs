//! Document domain model.
//!
//! # Responsibility
//! - Define the canonical record edited by the editor and listed by the sidebar.
//! - Fix the serialized shape used by the durable storage blob.
//!
//! # Invariants
//! - `id` is assigned at creation time and never changes.
//! - `last_edited` is Unix epoch milliseconds and never moves backwards for
//!   one document.

use serde::{Deserialize, Serialize};

/// Stable identifier for every document.
///
/// Kept as a string because persisted collections carry ids minted by older
/// builds (`"1"` for the seeded welcome document).
pub type DocumentId = String;

/// Id of the document seeded into an empty workspace.
pub const WELCOME_DOCUMENT_ID: &str = "1";
/// Title of the seeded welcome document.
pub const WELCOME_TITLE: &str = "Welcome ✨";
/// Body of the seeded welcome document.
pub const WELCOME_CONTENT: &str = "This is your creative space. Type here to begin your story, or use the AI tool below to get inspired!";
/// Title shown for documents whose title is blank.
pub const UNTITLED_DISPLAY_TITLE: &str = "Untitled Magic";

/// A titled unit of text content.
///
/// Serialized as `{ "id", "title", "content", "lastEdited" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Unix epoch milliseconds of the last title or content mutation.
    pub last_edited: i64,
}

impl Document {
    /// Creates an empty document with a caller-provided id.
    pub fn new(id: impl Into<DocumentId>, now_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            content: String::new(),
            last_edited: now_ms,
        }
    }

    /// Creates the default document seeded into an empty workspace.
    pub fn welcome(now_ms: i64) -> Self {
        Self {
            id: WELCOME_DOCUMENT_ID.to_string(),
            title: WELCOME_TITLE.to_string(),
            content: WELCOME_CONTENT.to_string(),
            last_edited: now_ms,
        }
    }

    /// Returns the title to show in lists, substituting a placeholder for
    /// blank titles.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_DISPLAY_TITLE
        } else {
            self.title.as_str()
        }
    }

    /// Refreshes `last_edited`, keeping it monotonic.
    pub(crate) fn touch(&mut self, now_ms: i64) {
        self.last_edited = self.last_edited.max(now_ms);
    }
}
