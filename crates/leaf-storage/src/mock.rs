//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::page::Page;
use crate::storage::{Storage, StorageError, StorageErrorKind};
use crate::title::validate_title;

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores pages in memory. Use the builder methods to configure the mock
/// with test data or to simulate failing saves.
///
/// # Example
///
/// ```ignore
/// use leaf_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_page("Home", "Welcome");
///
/// let page = storage.load("Home").unwrap();
/// assert_eq!(page.content, b"Welcome");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<HashMap<String, Vec<u8>>>,
    fail_saves: bool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stored page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(title.into(), content.into());
        self
    }

    /// Make every subsequent save fail with a permission error.
    #[must_use]
    pub fn with_failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Raw stored content for a title, bypassing validation.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }
}

impl Storage for MockStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        validate_title(title).map_err(|e| e.with_backend(BACKEND))?;
        self.pages
            .read()
            .unwrap()
            .get(title)
            .map(|content| Page::new(title, content.clone()))
            .ok_or_else(|| StorageError::not_found(title).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        validate_title(&page.title).map_err(|e| e.with_backend(BACKEND))?;
        if self.fail_saves {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(page.title.as_str())
                .with_backend(BACKEND));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.content.clone());
        Ok(())
    }
}
