//! Domain model for the InkSync workspace.
//!
//! # Responsibility
//! - Define the document record that is persisted and edited.
//! - Define the presentational collaborator roster.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod collaborator;
pub mod document;
