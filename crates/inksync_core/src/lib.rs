//! Core domain logic for InkSync.
//! This crate is the single source of truth for workspace invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod effects;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod suggestion;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, SPLASH_DELAY_MS};
pub use effects::{NoopEffects, PresentationEffects, SharedEffects};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::collaborator::{default_collaborators, Collaborator};
pub use model::document::{Document, DocumentId};
pub use service::document_store::DocumentStore;
pub use service::editor::{EditorController, SuggestionRequest, SuggestionState};
pub use service::sidebar::{SidebarController, SidebarItem, SidebarView};
pub use storage::{
    DocumentStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult, STORAGE_KEY,
};
pub use suggestion::{GeminiBackend, SuggestionBackend, SuggestionClient, SuggestionError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
