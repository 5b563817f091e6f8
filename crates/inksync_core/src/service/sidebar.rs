//! Sidebar controller: document list projection and select/delete relay.
//!
//! # Invariants
//! - Items mirror store order; the controller keeps no copy of documents.
//! - Deletion happens only through `confirm_delete` after `request_delete`.

use crate::effects::{noop_effects, SharedEffects};
use crate::model::collaborator::{default_collaborators, Collaborator};
use crate::model::document::DocumentId;
use crate::service::document_store::DocumentStore;
use crate::storage::DocumentStorage;
use chrono::{DateTime, Local, TimeZone};
use log::debug;
use std::fmt;

/// Confirmation prompt shown before deleting a draft.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Delete this draft permanently?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: DocumentId,
    /// Display title ("Untitled Magic" for blank titles).
    pub title: String,
    /// `YYYY-MM-DD` of the last edit in the local time zone.
    pub edited_on: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub items: Vec<SidebarItem>,
    pub collaborators: Vec<Collaborator>,
}

pub struct SidebarController {
    pending_delete: Option<DocumentId>,
    effects: SharedEffects,
}

impl Default for SidebarController {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarController {
    pub fn new() -> Self {
        Self::with_effects(noop_effects())
    }

    pub fn with_effects(effects: SharedEffects) -> Self {
        Self {
            pending_delete: None,
            effects,
        }
    }

    /// Projects the store into list items, highlighting the selection.
    pub fn view<S: DocumentStorage>(&self, store: &DocumentStore<S>) -> SidebarView {
        let active = store.active_id();
        let items = store
            .documents()
            .iter()
            .map(|doc| SidebarItem {
                id: doc.id.clone(),
                title: doc.display_title().to_string(),
                edited_on: format_epoch_date(doc.last_edited),
                is_active: active == Some(doc.id.as_str()),
            })
            .collect();

        SidebarView {
            items,
            collaborators: default_collaborators(),
        }
    }

    pub fn select<S: DocumentStorage>(&self, store: &mut DocumentStore<S>, id: &str) -> bool {
        store.select(id)
    }

    pub fn new_document<S: DocumentStorage>(&self, store: &mut DocumentStore<S>) -> DocumentId {
        let id = store.create();
        self.effects.list_changed(store.len());
        id
    }

    /// Starts the delete confirmation for `id`, returning the prompt text.
    ///
    /// Unknown ids yield `None` and leave no pending confirmation.
    pub fn request_delete<S: DocumentStorage>(
        &mut self,
        store: &DocumentStore<S>,
        id: &str,
    ) -> Option<&'static str> {
        if !store.contains(id) {
            self.pending_delete = None;
            return None;
        }
        self.pending_delete = Some(id.to_string());
        Some(DELETE_CONFIRMATION_PROMPT)
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Deletes the pending document, if any.
    pub fn confirm_delete<S: DocumentStorage>(&mut self, store: &mut DocumentStore<S>) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        let deleted = store.delete(&id);
        if deleted {
            self.effects.list_changed(store.len());
        }
        deleted
    }

    pub fn cancel_delete(&mut self) {
        if self.pending_delete.take().is_some() {
            debug!("event=document_delete module=sidebar status=cancelled");
        }
    }
}

/// Formats Unix epoch milliseconds as a calendar date in the local zone.
pub fn format_epoch_date(epoch_ms: i64) -> String {
    format_epoch_date_in(epoch_ms, &Local)
}

/// Formats Unix epoch milliseconds as a calendar date in `tz`.
///
/// Timestamps outside chrono's range render as an empty label.
pub fn format_epoch_date_in<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| utc.with_timezone(tz).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::format_epoch_date_in;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn formats_known_utc_dates() {
        assert_eq!(format_epoch_date_in(0, &Utc), "1970-01-01");
        assert_eq!(format_epoch_date_in(951_782_400_000, &Utc), "2000-02-29");
        assert_eq!(format_epoch_date_in(1_700_000_000_000, &Utc), "2023-11-14");
        assert_eq!(format_epoch_date_in(-1, &Utc), "1969-12-31");
    }

    #[test]
    fn date_follows_the_zone_offset() {
        // 2023-11-14T03:00:00Z is still the 13th on the US west coast.
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_epoch_date_in(1_699_930_800_000, &pacific), "2023-11-13");
        assert_eq!(format_epoch_date_in(1_699_930_800_000, &Utc), "2023-11-14");
        assert_eq!(format_epoch_date_in(1_699_995_600_000, &tokyo), "2023-11-15");
    }

    #[test]
    fn out_of_range_timestamp_renders_empty() {
        assert_eq!(format_epoch_date_in(i64::MAX, &Utc), "");
    }
}
