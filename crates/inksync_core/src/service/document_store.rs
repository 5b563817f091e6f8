//! Document store: the ordered in-memory collection plus its storage mirror.
//!
//! # Responsibility
//! - Own the document collection and the active selection.
//! - Persist the full collection after every successful mutation.
//! - Recover from missing or malformed storage by seeding a welcome document.
//! - Keep a copy of any blob that could not be fully decoded.
//!
//! # Invariants
//! - Document ids are unique within the collection at all times.
//! - `active_id`, when set, always names a document in the collection.
//! - New documents are prepended; edits never reorder the collection.
//! - Persistence failures are logged and never abort the mutation.

use crate::clock::{Clock, SystemClock};
use crate::model::document::{Document, DocumentId};
use crate::storage::DocumentStorage;
use log::{debug, info, warn};
use std::collections::HashSet;
use uuid::Uuid;

/// Ordered document collection synchronized to durable storage.
pub struct DocumentStore<S: DocumentStorage> {
    documents: Vec<Document>,
    active_id: Option<DocumentId>,
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: DocumentStorage> DocumentStore<S> {
    /// Loads the collection from `storage` using the system clock.
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, Box::new(SystemClock))
    }

    /// Loads the collection from `storage`.
    ///
    /// # Contract
    /// - Missing storage, or a blob that is not a JSON array, seeds one
    ///   welcome document and persists it immediately.
    /// - A failed read seeds the welcome document in memory only.
    /// - Records that fail to decode are dropped one by one; the rest load.
    /// - A blob that lost anything while decoding is first copied aside with
    ///   `save_unreadable`; if that copy fails the original is never
    ///   overwritten during load.
    /// - A well-formed empty collection stays empty.
    /// - Duplicate ids keep their first occurrence.
    /// - The first document (if any) becomes the active selection.
    pub fn load_with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let mut read_failed = false;
        let (loaded, lossy_blob) = match storage.load() {
            Ok(Some(blob)) => {
                let decoded = decode_blob(&blob);
                let lossy = decoded.is_lossy().then_some(blob);
                (decoded.documents, lossy)
            }
            Ok(None) => (None, None),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=storage_read_failed error={err}"
                );
                read_failed = true;
                (None, None)
            }
        };

        let backed_up = match &lossy_blob {
            Some(blob) => match storage.save_unreadable(blob) {
                Ok(()) => {
                    info!("event=store_backup module=store status=ok bytes={}", blob.len());
                    true
                }
                Err(err) => {
                    warn!(
                        "event=store_backup module=store status=error error_code=backup_failed error={err}"
                    );
                    false
                }
            },
            None => true,
        };

        let seeded = loaded.is_none();
        let rewrite = seeded || lossy_blob.is_some();
        let documents = loaded.unwrap_or_else(|| vec![Document::welcome(clock.now_ms())]);
        let active_id = documents.first().map(|doc| doc.id.clone());

        let store = Self {
            documents,
            active_id,
            storage,
            clock,
        };
        if rewrite && backed_up && !read_failed {
            store.persist(if seeded { "seed" } else { "salvage" });
        }

        info!(
            "event=store_load module=store status=ok seeded={} salvaged={} documents={}",
            seeded,
            lossy_blob.is_some() && !seeded,
            store.documents.len()
        );
        store
    }

    /// Documents in display order (most recently created first).
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Access to the storage backend, mainly for diagnostics.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates an empty document at the front and selects it.
    pub fn create(&mut self) -> DocumentId {
        let mut id = Uuid::new_v4().to_string();
        while self.contains(&id) {
            id = Uuid::new_v4().to_string();
        }

        let document = Document::new(id.clone(), self.clock.now_ms());
        self.documents.insert(0, document);
        self.active_id = Some(id.clone());
        debug!(
            "event=document_create module=store status=ok documents={}",
            self.documents.len()
        );
        self.persist("create");
        id
    }

    /// Selects `id` when it exists.
    ///
    /// Returns `false` and keeps the current selection for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            debug!("event=document_select module=store status=skipped reason=unknown_id");
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    /// Replaces the content of `id`; returns `false` when `id` is unknown.
    pub fn update_content(&mut self, id: &str, content: impl Into<String>) -> bool {
        let content = content.into();
        self.mutate(id, "update_content", |doc| doc.content = content)
    }

    /// Replaces the title of `id`; returns `false` when `id` is unknown.
    pub fn update_title(&mut self, id: &str, title: impl Into<String>) -> bool {
        let title = title.into();
        self.mutate(id, "update_title", |doc| doc.title = title)
    }

    /// Removes `id`; when it was active, selection moves to the new first
    /// document or clears.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.documents.iter().position(|doc| doc.id == id) else {
            debug!("event=document_delete module=store status=skipped reason=unknown_id");
            return false;
        };

        self.documents.remove(index);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.documents.first().map(|doc| doc.id.clone());
        }
        debug!(
            "event=document_delete module=store status=ok documents={}",
            self.documents.len()
        );
        self.persist("delete");
        true
    }

    fn mutate(&mut self, id: &str, op: &str, apply: impl FnOnce(&mut Document)) -> bool {
        let now_ms = self.clock.now_ms();
        let Some(document) = self.documents.iter_mut().find(|doc| doc.id == id) else {
            debug!("event=document_{op} module=store status=skipped reason=unknown_id");
            return false;
        };

        apply(document);
        document.touch(now_ms);
        self.persist(op);
        true
    }

    fn persist(&self, op: &str) {
        let blob = match serde_json::to_string(&self.documents) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=error op={op} error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        if let Err(err) = self.storage.save(&blob) {
            warn!(
                "event=store_persist module=store status=error op={op} error_code=storage_write_failed error={err}"
            );
        }
    }
}

/// Outcome of decoding a stored blob.
struct DecodedBlob {
    /// `None` when nothing usable was found and the workspace must be seeded.
    documents: Option<Vec<Document>>,
    dropped: usize,
    unreadable: bool,
}

impl DecodedBlob {
    fn is_lossy(&self) -> bool {
        self.unreadable || self.dropped > 0
    }
}

fn decode_blob(blob: &str) -> DecodedBlob {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(blob) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=store_load module=store status=error error_code=malformed_blob error={err}"
            );
            return DecodedBlob {
                documents: None,
                dropped: 0,
                unreadable: true,
            };
        }
    };

    let total = records.len();
    let mut documents = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Document>(record) {
            Ok(document) => documents.push(document),
            Err(err) => warn!(
                "event=store_load module=store status=degraded error_code=malformed_record index={index} error={err}"
            ),
        }
    }

    if documents.is_empty() && total > 0 {
        // Nothing decoded: handled like an unreadable blob.
        return DecodedBlob {
            documents: None,
            dropped: total,
            unreadable: false,
        };
    }

    let documents = dedupe_ids(documents);
    DecodedBlob {
        dropped: total - documents.len(),
        documents: Some(documents),
        unreadable: false,
    }
}

fn dedupe_ids(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    let before = documents.len();
    let unique: Vec<Document> = documents
        .into_iter()
        .filter(|doc| seen.insert(doc.id.clone()))
        .collect();

    if unique.len() != before {
        warn!(
            "event=store_load module=store status=degraded error_code=duplicate_ids dropped={}",
            before - unique.len()
        );
    }
    unique
}
