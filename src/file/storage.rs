//! Blob storage for strongbox.
//!
//! Blobs live in a sharded directory tree keyed by server-generated storage
//! keys:
//!
//! ```text
//! {base_path}/
//! ├── ab/
//! │   └── ab12cd34-5678-90ab-cdef-123456789012.txt
//! ├── cd/
//! │   └── cd90ab12-3456-7890-abcd-ef1234567890.bin
//! └── ...
//! ```
//!
//! Error messages carry the storage key and the failed operation, never the
//! on-disk path.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{Result, StrongboxError};

/// Sharded on-disk blob store.
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// Base directory for blob storage.
    base_path: PathBuf,
}

impl BlobStore {
    /// Create a new BlobStore rooted at the given base path.
    ///
    /// The base directory is created if it does not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generate a fresh storage key for an upload.
    ///
    /// The key is `{uuid_v4}.{extension}` where the extension comes from the
    /// original name ("bin" when there is none). The user-supplied path never
    /// contributes anything else to the key.
    pub fn generate_key(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }

    /// Write blob content under the given storage key.
    pub async fn put(&self, key: &str, content: &[u8]) -> Result<()> {
        let blob_path = self.blob_path(key);

        if let Some(parent) = blob_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StrongboxError::Storage(format!("create shard for {key}: {e}")))?;
        }

        fs::write(&blob_path, content)
            .await
            .map_err(|e| StrongboxError::Storage(format!("write {key}: {e}")))?;

        Ok(())
    }

    /// Open a blob for reading.
    ///
    /// A missing blob is reported as [`StrongboxError::NotFoundOnStorage`],
    /// distinct from a missing metadata record.
    pub async fn open(&self, key: &str) -> Result<fs::File> {
        let blob_path = self.blob_path(key);

        match fs::File::open(&blob_path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StrongboxError::NotFoundOnStorage("File".to_string()))
            }
            Err(e) => Err(StrongboxError::Storage(format!("open {key}: {e}"))),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let blob_path = self.blob_path(key);

        match fs::remove_file(&blob_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StrongboxError::Storage(format!("delete {key}: {e}"))),
        }
    }

    /// Check if a blob exists.
    pub async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.blob_path(key)).await.unwrap_or(false)
    }

    /// Full on-disk path for a storage key: {base_path}/{shard}/{key}.
    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(Self::shard(key)).join(key)
    }

    /// Shard directory name: the first 2 characters of the key.
    fn shard(key: &str) -> &str {
        if key.len() >= 2 {
            &key[..2]
        } else {
            key
        }
    }

    /// Extract the file extension from a filename, defaulting to "bin".
    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, BlobStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = BlobStore::new(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    async fn read_all(file: &mut fs::File) -> Vec<u8> {
        use tokio::io::AsyncReadExt;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.unwrap();
        buf
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("blobs");

        assert!(!store_path.exists());

        let store = BlobStore::new(&store_path).unwrap();

        assert!(store_path.exists());
        assert_eq!(store.base_path(), store_path);
    }

    #[tokio::test]
    async fn test_put_and_open() {
        let (_temp_dir, store) = setup_store();
        let content = b"Hello, World!";

        let key = BlobStore::generate_key("test.txt");
        store.put(&key, content).await.unwrap();

        let mut file = store.open(&key).await.unwrap();
        assert_eq!(read_all(&mut file).await, content);
    }

    #[tokio::test]
    async fn test_put_creates_shard_directory() {
        let (_temp_dir, store) = setup_store();

        let key = BlobStore::generate_key("test.txt");
        store.put(&key, b"data").await.unwrap();

        let shard_dir = store.base_path().join(&key[..2]);
        assert!(shard_dir.is_dir());
    }

    #[tokio::test]
    async fn test_open_not_found() {
        let (_temp_dir, store) = setup_store();

        let result = store.open("nonexistent.txt").await;

        assert!(matches!(result, Err(StrongboxError::NotFoundOnStorage(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, store) = setup_store();

        let key = BlobStore::generate_key("delete.txt");
        store.put(&key, b"to delete").await.unwrap();
        assert!(store.exists(&key).await);

        assert!(store.delete(&key).await.unwrap());
        assert!(!store.exists(&key).await);
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let (_temp_dir, store) = setup_store();

        let deleted = store.delete("nonexistent.txt").await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_binary_content() {
        let (_temp_dir, store) = setup_store();

        let content: Vec<u8> = (0..=255).collect();
        let key = BlobStore::generate_key("binary.bin");
        store.put(&key, &content).await.unwrap();

        let mut file = store.open(&key).await.unwrap();
        assert_eq!(read_all(&mut file).await, content);
    }

    #[test]
    fn test_generate_key_unique() {
        let key1 = BlobStore::generate_key("test.txt");
        let key2 = BlobStore::generate_key("test.txt");

        assert_ne!(key1, key2);
        assert!(key1.ends_with(".txt"));
        // UUID (36 chars) + extension
        assert!(key1.len() > 36);
    }

    #[test]
    fn test_generate_key_ignores_path_components() {
        let key = BlobStore::generate_key("../../etc/passwd.txt");
        assert!(key.ends_with(".txt"));
        assert!(!key.contains('/'));
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_extract_extension() {
        assert_eq!(BlobStore::extract_extension("test.txt"), "txt");
        assert_eq!(BlobStore::extract_extension("document.PDF"), "PDF");
        assert_eq!(BlobStore::extract_extension("no_ext"), "bin");
        assert_eq!(BlobStore::extract_extension("file.tar.gz"), "gz");
        assert_eq!(BlobStore::extract_extension(".hidden"), "bin");
    }

    #[test]
    fn test_shard() {
        assert_eq!(BlobStore::shard("abcdef.txt"), "ab");
        assert_eq!(BlobStore::shard("12-345.bin"), "12");
        assert_eq!(BlobStore::shard("x"), "x");
        assert_eq!(BlobStore::shard(""), "");
    }
}
