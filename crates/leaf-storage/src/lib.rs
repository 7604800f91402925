//! Page storage for the Leaf page editor.
//!
//! This crate provides a [`Storage`] trait for loading and saving [`Page`]s
//! keyed by title. This enables:
//!
//! - **Unit testing** of request handlers without touching the real filesystem
//! - **Clean separation** between HTTP handling and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`], the unit of content (title + raw bytes)
//! - [`Storage`] trait with `load()` and `save()` methods
//! - [`FsStorage`] implementation storing one `<title>.txt` file per page
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`validate_title`] guarding every title before it becomes a file name
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use leaf_storage::{FsStorage, Page, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("pages"));
//! storage.save(&Page::new("HelloWorld", "Hello World"))?;
//! let page = storage.load("HelloWorld")?;
//! assert_eq!(page.content, b"Hello World");
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;
mod title;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use page::Page;
pub use storage::{Storage, StorageError, StorageErrorKind};
pub use title::validate_title;
