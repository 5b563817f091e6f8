//! Presentation-effects seam.
//!
//! Animations and other cosmetic reactions hang off these hooks. The core
//! calls them at state transitions but never depends on them for correctness.

use std::sync::Arc;

/// Hooks invoked by controllers at visible state transitions.
pub trait PresentationEffects: Send + Sync {
    fn splash_shown(&self) {}
    /// The sidebar list changed length (create or delete).
    fn list_changed(&self, _documents: usize) {}
    fn suggestion_started(&self) {}
    fn suggestion_finished(&self) {}
}

/// Effects sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl PresentationEffects for NoopEffects {}

/// Shared handle passed to controllers.
pub type SharedEffects = Arc<dyn PresentationEffects>;

pub fn noop_effects() -> SharedEffects {
    Arc::new(NoopEffects)
}
