//! The page entity.

use std::borrow::Cow;

/// A single page: a title and its raw content.
///
/// Pages live for one request. They are either loaded from storage or
/// created empty, and their content is only ever replaced wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Page title (storage key and file name stem).
    pub title: String,
    /// Raw page body.
    pub content: Vec<u8>,
}

impl Page {
    /// Create a page with the given title and content.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Create a page with no content.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Content as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn content_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}
