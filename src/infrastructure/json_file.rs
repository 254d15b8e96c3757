use crate::domain::ports::MessageStore;
use crate::domain::submission::{NewSubmission, Submission};
use crate::error::{PortfolioError, Result};
use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// Layout version written into every message file.
pub const STORE_VERSION: u32 = 1;

#[derive(Deserialize)]
struct Document {
    version: u32,
    messages: Vec<Submission>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    messages: &'a [Submission],
}

/// A persistent message store backed by a single JSON file.
///
/// Appends are serialized twice: an async mutex orders writers inside this
/// process, and an exclusive advisory lock on `<file>.lock` orders writers
/// across processes. Each append rewrites the whole document into a temporary
/// file next to the target and renames it into place, so readers only ever
/// see complete documents.
///
/// This struct is thread-safe (`Clone` shares the underlying writer mutex).
#[derive(Clone)]
pub struct JsonFileMessageStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    lock_path: PathBuf,
    writer: Mutex<()>,
}

impl JsonFileMessageStore {
    /// Opens the message file at `path`, creating its parent directory if needed.
    ///
    /// The file itself is created on the first append. An existing file is
    /// decoded once up front so that a corrupt store is reported at startup.
    ///
    /// # Arguments
    ///
    /// * `path` - The JSON file holding the messages.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let Some(file_name) = path.file_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("message store path {} does not name a file", path.display()),
            )
            .into());
        };

        let mut lock_name = OsString::from(file_name);
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        std::fs::create_dir_all(parent_dir(&path))?;
        let existing = read_messages(&path)?;
        debug!(path = %path.display(), messages = existing.len(), "opened message file");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                lock_path,
                writer: Mutex::new(()),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

#[async_trait]
impl MessageStore for JsonFileMessageStore {
    async fn append(&self, entry: NewSubmission) -> Result<Submission> {
        let _writer = self.inner.writer.lock().await;
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || append_locked(&inner.path, &inner.lock_path, entry))
            .await
            .map_err(|e| PortfolioError::InternalError(format!("append task failed: {e}")))?
    }

    async fn list(&self) -> Result<Vec<Submission>> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || read_messages(&inner.path))
            .await
            .map_err(|e| PortfolioError::InternalError(format!("list task failed: {e}")))?
    }
}

fn append_locked(path: &Path, lock_path: &Path, entry: NewSubmission) -> Result<Submission> {
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)?;
    // Released when `lock_file` is dropped.
    lock_file.lock_exclusive()?;

    let mut messages = read_messages(path)?;
    let submission = Submission::stamp(entry, Utc::now());
    messages.push(submission.clone());
    write_messages(path, &messages)?;

    debug!(path = %path.display(), messages = messages.len(), "appended submission");
    Ok(submission)
}

/// Reads the whole collection. Only a missing (or blank) file counts as empty.
fn read_messages(path: &Path) -> Result<Vec<Submission>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    decode(path, &contents)
}

fn decode(path: &Path, contents: &str) -> Result<Vec<Submission>> {
    let corrupt = |source| PortfolioError::CorruptStore {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(contents).map_err(corrupt)?;

    // Unversioned files are a bare array of records.
    if value.is_array() {
        return serde_json::from_value(value).map_err(corrupt);
    }

    let document: Document = serde_json::from_value(value).map_err(corrupt)?;
    if document.version > STORE_VERSION {
        return Err(PortfolioError::UnsupportedStoreVersion {
            path: path.to_path_buf(),
            version: document.version,
        });
    }
    Ok(document.messages)
}

fn write_messages(path: &Path, messages: &[Submission]) -> Result<()> {
    let document = DocumentRef {
        version: STORE_VERSION,
        messages,
    };
    let bytes = serde_json::to_vec_pretty(&document).map_err(io::Error::from)?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
