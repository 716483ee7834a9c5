use std::fs;
use std::io;
use std::path::PathBuf;

/// Flat-directory store for binary files, keyed by filename.
///
/// Filenames must already be sanitized; the store only ever joins them
/// directly onto its root. Writes overwrite silently (no versioning) and
/// nothing is ever deleted.
#[derive(Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Opens the store, creating its root directory if absent.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn put(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.root.join(filename), bytes)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.root.join(filename).is_file()
    }

    pub fn read(&self, filename: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn put_read_exists_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = BlobStore::open(dir.path().join("blobs")).unwrap();

        assert!(!store.exists("a.png"));
        store.put("a.png", b"hello").unwrap();
        assert!(store.exists("a.png"));
        assert_eq!(store.read("a.png").unwrap(), b"hello");
    }

    #[test]
    fn put_overwrites_silently() {
        let dir = TempDir::new().unwrap();
        let store = BlobStore::open(dir.path().join("blobs")).unwrap();

        store.put("a.png", b"first").unwrap();
        store.put("a.png", b"second").unwrap();
        assert_eq!(store.read("a.png").unwrap(), b"second");
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = BlobStore::open(dir.path().join("blobs")).unwrap();

        let err = store.read("nope.png").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
