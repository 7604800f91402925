//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use leaf_renderer::Renderer;
use leaf_storage::Storage;

/// Application state shared across all handlers.
///
/// Immutable after startup; the only state shared between requests beyond
/// this is the page files themselves.
pub(crate) struct AppState {
    /// Storage backend for page files.
    pub(crate) storage: Arc<dyn Storage>,
    /// Renderer for the view and edit templates.
    pub(crate) renderer: Renderer,
    /// Title that `/` redirects to.
    pub(crate) front_page: String,
}
