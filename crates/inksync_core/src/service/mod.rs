//! Core use-case controllers.
//!
//! # Responsibility
//! - Own workspace state (`DocumentStore`) and drive it from UI events.
//! - Keep UI layers decoupled from storage and transport details.

pub mod document_store;
pub mod editor;
pub mod sidebar;
