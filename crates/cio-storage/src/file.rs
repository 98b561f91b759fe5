//! File-backed storage: one JSON document per domain.
//!
//! Each domain lives at `<root>/<domain>.json` as an object mapping raw key
//! names to tagged values:
//!
//! ```json
//! {
//!   "identifiedProfileId": { "string": "profile-1" },
//!   "httpRequestsPauseEnds": { "date": 1654873363.101 }
//! }
//! ```
//!
//! A missing file is an empty domain. Doubles and dates must be finite to be
//! written. Every write rewrites the whole document
//! through a temp file in the same directory followed by a rename, so readers
//! never see a half-written domain.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::kv::{KvStore, validate_domain, validate_key, validate_value};
use crate::value::StoredValue;

/// Contents of one domain file.
type Document = BTreeMap<String, StoredValue>;

/// Persistent [`KvStore`] rooted at a directory.
///
/// Read-modify-write cycles are serialized within the process. Writers in
/// other processes are not coordinated: the last rename wins.
#[derive(Debug)]
pub struct FileKvStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKvStore {
    /// Open a store at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// The directory holding the domain files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `domain`.
    #[must_use]
    pub fn domain_path(&self, domain: &str) -> PathBuf {
        self.root.join(format!("{domain}.json"))
    }

    fn read_document(&self, domain: &str) -> StorageResult<Document> {
        let path = self.domain_path(domain);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!("{}: {e}", path.display()))
        })
    }

    fn write_document(&self, domain: &str, document: &Document) -> StorageResult<()> {
        let path = self.domain_path(domain);
        if document.is_empty() {
            return remove_if_present(&path);
        }

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut staged =
            tempfile::NamedTempFile::new_in(&self.root).map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;
        staged
            .write_all(&bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| StorageError::Io {
                path: staged.path().to_path_buf(),
                source,
            })?;
        staged.persist(&path).map_err(|e| StorageError::Io {
            path: path.clone(),
            source: e.error,
        })?;
        debug!(path = %path.display(), keys = document.len(), "wrote domain file");
        Ok(())
    }

    /// Run a read-modify-write cycle on `domain` under the write lock.
    fn update<T>(
        &self,
        domain: &str,
        apply: impl FnOnce(&mut Document) -> T,
    ) -> StorageResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let mut document = self.read_document(domain)?;
        let out = apply(&mut document);
        self.write_document(domain, &document)?;
        Ok(out)
    }
}

fn remove_if_present(path: &Path) -> StorageResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed domain file");
            Ok(())
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl KvStore for FileKvStore {
    fn get(&self, domain: &str, key: &str) -> StorageResult<Option<StoredValue>> {
        validate_domain(domain)?;
        validate_key(key)?;
        Ok(self.read_document(domain)?.remove(key))
    }

    fn set(&self, domain: &str, key: &str, value: StoredValue) -> StorageResult<()> {
        validate_domain(domain)?;
        validate_key(key)?;
        validate_value(&value)?;
        self.update(domain, |doc| {
            doc.insert(key.to_owned(), value);
        })
    }

    fn delete(&self, domain: &str, key: &str) -> StorageResult<bool> {
        validate_domain(domain)?;
        validate_key(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let mut document = self.read_document(domain)?;
        if document.remove(key).is_none() {
            return Ok(false);
        }
        self.write_document(domain, &document)?;
        Ok(true)
    }

    fn list_keys(&self, domain: &str) -> StorageResult<Vec<String>> {
        validate_domain(domain)?;
        Ok(self.read_document(domain)?.into_keys().collect())
    }

    /// Removes the domain file. An unreadable document is still removed and
    /// counts as zero keys.
    fn clear_domain(&self, domain: &str) -> StorageResult<u64> {
        validate_domain(domain)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let count = match self.read_document(domain) {
            Ok(document) => document.len() as u64,
            Err(StorageError::Serialization(error)) => {
                warn!(domain, %error, "clearing unreadable domain file");
                0
            },
            Err(e) => return Err(e),
        };
        remove_if_present(&self.domain_path(domain))?;
        Ok(count)
    }
}
