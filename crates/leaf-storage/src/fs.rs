//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`], which keeps one `<title>.txt` file per page in a
//! single pages directory.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::page::Page;
use crate::storage::{Storage, StorageError};
use crate::title::validate_title;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Extension appended to a title to form its file name.
const PAGE_EXTENSION: &str = "txt";

/// Filesystem storage implementation.
///
/// Page content is stored as raw bytes with owner-only read/write permissions.
/// Saves write a temporary file next to the target and rename it into place,
/// so a concurrent reader sees either the old or the new content in full.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use leaf_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("."));
/// let page = storage.load("FrontPage")?;
/// ```
pub struct FsStorage {
    /// Directory holding page files.
    pages_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `pages_dir`.
    #[must_use]
    pub fn new(pages_dir: PathBuf) -> Self {
        Self { pages_dir }
    }

    /// Resolve a validated title to its file path.
    fn page_path(&self, title: &str) -> Result<PathBuf, StorageError> {
        validate_title(title).map_err(|e| e.with_backend(BACKEND))?;
        Ok(self.pages_dir.join(format!("{title}.{PAGE_EXTENSION}")))
    }

    /// Write `content` to a fresh temporary file in the pages directory.
    fn write_temp(&self, content: &[u8]) -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix(".leaf-")
            .suffix(".tmp")
            .tempfile_in(&self.pages_dir)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(content)?;
        file.as_file().sync_all()?;
        Ok(file)
    }
}

impl Storage for FsStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let path = self.page_path(title)?;
        let content = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;

        tracing::debug!(title, bytes = content.len(), "Loaded page");
        Ok(Page::new(title, content))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.page_path(&page.title)?;

        let file = self
            .write_temp(&page.content)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        file.persist(&path)
            .map_err(|e| StorageError::io(e.error, Some(path.clone())).with_backend(BACKEND))?;

        tracing::info!(title = %page.title, bytes = page.content.len(), "Saved page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_load_existing_page() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("HelloWorld.txt"), "Hello World").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let page = storage.load("HelloWorld").unwrap();

        assert_eq!(page, Page::new("HelloWorld", "Hello World"));
    }

    #[test]
    fn test_load_missing_page() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.load("Missing").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path.as_deref(),
            Some(temp_dir.path().join("Missing.txt").as_path())
        );
    }

    #[test]
    fn test_load_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/leaf-pages"));
        let err = storage.load("Home").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_creates_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage
            .save(&Page::new("HelloWorld", "Hello World"))
            .unwrap();

        let stored = fs::read(temp_dir.path().join("HelloWorld.txt")).unwrap();
        assert_eq!(stored, b"Hello World");
    }

    #[test]
    fn test_save_then_load_round_trip_bytes() {
        let temp_dir = create_test_dir();
        let content = vec![0u8, 1, 2, 0xff, b'\n', b'\r', b'x'];

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&Page::new("Binary", content.clone())).unwrap();
        let page = storage.load("Binary").unwrap();

        assert_eq!(page.content, content);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Notes.txt"), "a much longer old body").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&Page::new("Notes", "new")).unwrap();

        assert_eq!(storage.load("Notes").unwrap().content, b"new");
    }

    #[test]
    fn test_save_same_content_twice() {
        let temp_dir = create_test_dir();
        let page = Page::new("Twice", "same body");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&page).unwrap();
        storage.save(&page).unwrap();

        assert_eq!(storage.load("Twice").unwrap(), page);
    }

    #[test]
    fn test_save_empty_content() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&Page::empty("Blank")).unwrap();

        assert!(storage.load("Blank").unwrap().content.is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&Page::new("Clean", "body")).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Clean.txt".to_owned()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.save(&Page::new("Private", "secret")).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Private.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_missing_dir_fails() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/leaf-pages"));
        let err = storage.save(&Page::new("Home", "body")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path.as_deref(),
            Some(Path::new("/nonexistent/leaf-pages/Home.txt"))
        );
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        let pages_dir = temp_dir.path().join("pages");
        fs::create_dir(&pages_dir).unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "outside").unwrap();

        let storage = FsStorage::new(pages_dir);
        let err = storage.load("../secret").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_save_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        let pages_dir = temp_dir.path().join("pages");
        fs::create_dir(&pages_dir).unwrap();

        let storage = FsStorage::new(pages_dir);
        let err = storage.save(&Page::new("../escape", "x")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_load_overlong_title_is_invalid_not_io_error() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load(&"a".repeat(300)).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_concurrent_saves_leave_one_complete_body() {
        let temp_dir = create_test_dir();
        let storage = std::sync::Arc::new(FsStorage::new(temp_dir.path().to_path_buf()));
        let bodies: Vec<Vec<u8>> = (0..8u8).map(|i| vec![b'a' + i; 4096]).collect();

        let handles: Vec<_> = bodies
            .iter()
            .cloned()
            .map(|body| {
                let storage = std::sync::Arc::clone(&storage);
                std::thread::spawn(move || storage.save(&Page::new("Race", body)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = storage.load("Race").unwrap().content;
        assert!(bodies.contains(&stored));
    }
}
