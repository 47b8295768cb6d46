//! Photo storage for the web server
//!
//! Uploaded photos are written straight into a single flat directory. The
//! on-disk name is the only metadata kept: `<YYYYMMDD_HHMMSS>_<client name>`.

use chrono::{DateTime, Local};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Timestamp prefix format of stored filenames
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Extensions counted as photos by [`PhotoStore::count_photos`]
const PHOTO_EXTENSIONS: [&[u8]; 2] = [b".jpg", b".jpeg"];

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Upload path is not a directory: {0}")]
    InvalidRoot(PathBuf),
}

/// A photo written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Computed on-disk filename
    pub filename: String,
    /// Full path of the written file
    pub path: PathBuf,
    /// Size in bytes, measured from disk after the write
    pub size: u64,
}

/// Flat directory of uploaded photos
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Open the store, creating the directory if it does not exist yet
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();

        if root.exists() && !root.is_dir() {
            return Err(StoreError::InvalidRoot(root));
        }
        std::fs::create_dir_all(&root)?;

        // The landing page and banner show this path, so resolve it once
        let root = std::fs::canonicalize(&root)?;

        Ok(Self { root })
    }

    /// Absolute path of the upload directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save an upload using the current local time for its name
    pub async fn save(&self, client_filename: &str, data: &[u8]) -> Result<StoredPhoto, StoreError> {
        self.save_at(Local::now(), client_filename, data).await
    }

    /// Save an upload named after the given time.
    ///
    /// An existing file with the same computed name is overwritten.
    pub async fn save_at(
        &self,
        at: DateTime<Local>,
        client_filename: &str,
        data: &[u8],
    ) -> Result<StoredPhoto, StoreError> {
        let filename = photo_filename(&at, client_filename);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data).await?;
        let size = tokio::fs::metadata(&path).await?.len();

        Ok(StoredPhoto {
            filename,
            path,
            size,
        })
    }

    /// Count stored `.jpg` / `.jpeg` files (case-sensitive, non-recursive).
    ///
    /// Symlinks are followed and dotfiles are included. An unreadable
    /// directory counts as empty.
    pub async fn count_photos(&self) -> usize {
        match self.try_count_photos().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", self.root.display(), e);
                0
            }
        }
    }

    async fn try_count_photos(&self) -> io::Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut count = 0;

        while let Some(entry) = entries.next_entry().await? {
            if !is_photo_name(&entry.file_name()) {
                continue;
            }
            // Dangling links are skipped rather than failing the count
            let is_file = tokio::fs::metadata(entry.path())
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if is_file {
                count += 1;
            }
        }

        Ok(count)
    }
}

/// Build the on-disk name `<YYYYMMDD_HHMMSS>_<client filename>`
pub fn photo_filename(at: &DateTime<Local>, client_filename: &str) -> String {
    format!("{}_{}", at.format(FILENAME_TIMESTAMP_FORMAT), client_filename)
}

fn is_photo_name(name: &OsStr) -> bool {
    let name = name.as_encoded_bytes();
    PHOTO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap()
    }

    #[test]
    fn test_photo_filename_format() {
        assert_eq!(
            photo_filename(&fixed_time(), "IMG_0001.jpg"),
            "20240309_070502_IMG_0001.jpg"
        );
    }

    #[test]
    fn test_photo_filename_keeps_client_name_verbatim() {
        assert_eq!(
            photo_filename(&fixed_time(), "my photo (1).JPG"),
            "20240309_070502_my photo (1).JPG"
        );
    }

    #[test]
    fn test_is_photo_name() {
        let check = |name: &str| is_photo_name(OsStr::new(name));
        assert!(check("a.jpg"));
        assert!(check("a.jpeg"));
        assert!(check(".hidden.jpg"));
        assert!(!check("a.JPG"));
        assert!(!check("a.png"));
        assert!(!check("a.jpg.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_photo_name_non_utf8() {
        use std::os::unix::ffi::OsStrExt;

        assert!(is_photo_name(OsStr::from_bytes(b"caf\xe9.jpg")));
        assert!(!is_photo_name(OsStr::from_bytes(b"caf\xe9.png")));
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("backend_uploads");
        assert!(!root.exists());

        let store = PhotoStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert!(store.root().is_absolute());
    }

    #[test]
    fn test_open_existing_directory() {
        let dir = tempdir().unwrap();
        PhotoStore::open(dir.path()).unwrap();
        // Second open must not fail on an existing directory
        PhotoStore::open(dir.path()).unwrap();
    }

    #[test]
    fn test_open_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();

        let err = PhotoStore::open(&file).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRoot(_)));
    }

    #[tokio::test]
    async fn test_save_writes_bytes() {
        let dir = tempdir().unwrap();
        let store = PhotoStore::open(dir.path()).unwrap();

        let photo = store.save_at(fixed_time(), "test.jpg", b"abc").await.unwrap();

        assert_eq!(photo.filename, "20240309_070502_test.jpg");
        assert_eq!(photo.size, 3);
        assert_eq!(photo.path, store.root().join("20240309_070502_test.jpg"));
        assert_eq!(std::fs::read(&photo.path).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_save_empty_payload() {
        let dir = tempdir().unwrap();
        let store = PhotoStore::open(dir.path()).unwrap();

        let photo = store.save_at(fixed_time(), "empty.jpg", b"").await.unwrap();

        assert_eq!(photo.size, 0);
        assert!(std::fs::read(&photo.path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_same_second_overwrites() {
        let dir = tempdir().unwrap();
        let store = PhotoStore::open(dir.path()).unwrap();

        let first = store.save_at(fixed_time(), "dup.jpg", b"first").await.unwrap();
        let second = store.save_at(fixed_time(), "dup.jpg", b"second!").await.unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(second.size, 7);
        assert_eq!(std::fs::read(&second.path).unwrap(), b"second!");
        assert_eq!(std::fs::read_dir(store.root()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_count_photos() {
        let dir = tempdir().unwrap();
        let store = PhotoStore::open(dir.path()).unwrap();
        assert_eq!(store.count_photos().await, 0);

        store.save_at(fixed_time(), "photo.jpg", b"1").await.unwrap();
        store.save_at(fixed_time(), "photo.jpeg", b"2").await.unwrap();
        store.save_at(fixed_time(), "photo.txt", b"3").await.unwrap();
        store.save_at(fixed_time(), "photo.JPG", b"4").await.unwrap();
        std::fs::create_dir(store.root().join("nested.jpg")).unwrap();
        std::fs::write(store.root().join("nested.jpg").join("inner.jpg"), b"5").unwrap();

        assert_eq!(store.count_photos().await, 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_count_photos_includes_dotfiles_and_links() {
        let dir = tempdir().unwrap();
        let store = PhotoStore::open(dir.path()).unwrap();
        let root = store.root();

        std::fs::write(root.join(".a.jpg"), b"1").unwrap();
        std::fs::write(root.join("b.jpg"), b"2").unwrap();
        std::os::unix::fs::symlink(root.join("b.jpg"), root.join("c.jpg")).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), root.join("dangling.jpg")).unwrap();

        assert_eq!(store.count_photos().await, 3);
    }

    #[tokio::test]
    async fn test_count_photos_missing_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("gone");
        let store = PhotoStore::open(&root).unwrap();
        std::fs::remove_dir(&root).unwrap();

        assert_eq!(store.count_photos().await, 0);
    }
}
