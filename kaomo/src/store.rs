//! JsonFileStore - file-backed `EntryStoreApi`
//!
//! Three pretty-printed JSON arrays live side by side in the data dir:
//! user entries, the copy history and favorites. Every mutation is a
//! read-modify-write cycle ending in an atomic replace, so a crash leaves
//! either the old file or the new one, never a torn write.
//!
//! Concurrency Model:
//! - Blocking file work runs on tokio::spawn_blocking threads
//! - A process-wide mutex serializes read-modify-write cycles
//! - A file that fails to parse is moved aside and treated as empty

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::interface::{Entry, EntryStoreApi};

pub const USER_ENTRIES_FILE: &str = "kaomojis.user.json";
pub const RECENTS_FILE: &str = "kaomojis.recents.json";
pub const FAVORITES_FILE: &str = "kaomojis.favorites.json";

/// Persisted copy history length
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No data directory available on this platform")]
    DataDirUnavailable,
    #[error("Store task failed: {0}")]
    Join(String),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

struct Inner {
    dir: PathBuf,
    history_capacity: usize,
    lock: Mutex<()>,
}

/// Thread-safe JSON store rooted at one directory
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_history_capacity(dir, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(dir: impl Into<PathBuf>, history_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                dir: dir.into(),
                history_capacity: history_capacity.max(1),
                lock: Mutex::new(()),
            }),
        }
    }

    /// `<platform data dir>/kaomo`
    pub fn default_dir() -> StoreResult<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join("kaomo"))
            .ok_or(StoreError::DataDirUnavailable)
    }

    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    pub fn history_capacity(&self) -> usize {
        self.inner.history_capacity
    }

    async fn blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Inner) -> StoreResult<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let _guard = inner.lock.lock();
            f(&inner)
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))?
    }
}

impl Inner {
    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_list(&self, file: &str) -> StoreResult<Vec<Entry>> {
        let path = self.path(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Store file corrupt, starting empty");
                backup_corrupt(&path);
                Ok(Vec::new())
            }
        }
    }

    fn write_list(&self, file: &str, list: &[Entry]) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(list)?;
        atomic_save(&self.path(file), &content)
    }
}

/// Move an unreadable file to `<name>.corrupt.<unix_secs>.bak` so the next
/// write starts clean without destroying what was there.
fn backup_corrupt(path: &Path) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kaomo".to_string());
    let backup = path.with_file_name(format!("{file_name}.corrupt.{}.bak", Utc::now().timestamp()));

    match fs::rename(path, &backup) {
        Ok(()) => warn!(backup = %backup.display(), "Backed up corrupt store file"),
        Err(rename_err) => match fs::copy(path, &backup) {
            Ok(_) => {
                if let Err(e) = fs::remove_file(path) {
                    warn!(backup = %backup.display(), error = %e, "Backed up corrupt store file by copy, original left in place");
                } else {
                    warn!(backup = %backup.display(), "Backed up corrupt store file by copy");
                }
            }
            Err(copy_err) => {
                warn!(path = %path.display(), %rename_err, %copy_err, "Failed to back up corrupt store file");
            }
        },
    }
}

/// Write `content` to `path` via a synced temp file and a rename.
/// The temp file is removed whatever the outcome.
fn atomic_save(path: &Path, content: &str) -> StoreResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kaomo".to_string());
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let tmp_path = path.with_file_name(format!("{file_name}.{}.{nanos}.tmp", std::process::id()));

    let result = write_and_replace(&tmp_path, path, content);
    let _ = fs::remove_file(&tmp_path);
    result
}

fn write_and_replace(tmp_path: &Path, path: &Path, content: &str) -> StoreResult<()> {
    {
        let mut file = File::create(tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(tmp_path, path)?;

    // Best effort: persist the rename itself
    if let Some(dir) = path.parent() {
        if let Ok(dir) = File::open(dir) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl EntryStoreApi for JsonFileStore {
    // ─────────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────────

    async fn load_user_entries(&self) -> StoreResult<Vec<Entry>> {
        self.blocking(|inner| inner.read_list(USER_ENTRIES_FILE)).await
    }

    async fn load_recents(&self) -> StoreResult<Vec<Entry>> {
        self.blocking(|inner| inner.read_list(RECENTS_FILE)).await
    }

    async fn load_favorites(&self) -> StoreResult<Vec<Entry>> {
        self.blocking(|inner| inner.read_list(FAVORITES_FILE)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Upsert by glyph: an existing record keeps its position and takes the
    /// new tags and category
    async fn save_entry(&self, entry: &Entry) -> StoreResult<()> {
        if entry.glyph.trim().is_empty() {
            return Err(StoreError::InvalidEntry("glyph cannot be empty".to_string()));
        }
        let entry = entry.clone();
        self.blocking(move |inner| {
            let mut list = inner.read_list(USER_ENTRIES_FILE)?;
            match list.iter_mut().find(|e| e.glyph == entry.glyph) {
                Some(existing) => {
                    existing.tags = entry.tags;
                    existing.category = entry.category;
                }
                None => list.push(entry),
            }
            inner.write_list(USER_ENTRIES_FILE, &list)?;
            debug!(count = list.len(), "Saved user entries");
            Ok(())
        })
        .await
    }

    async fn save_recent(&self, entry: &Entry) -> StoreResult<()> {
        let entry = entry.clone();
        self.blocking(move |inner| {
            let mut list = inner.read_list(RECENTS_FILE)?;
            list.retain(|e| e.glyph != entry.glyph);
            list.insert(0, entry);
            list.truncate(inner.history_capacity);
            inner.write_list(RECENTS_FILE, &list)
        })
        .await
    }

    async fn toggle_favorite(&self, entry: &Entry) -> StoreResult<bool> {
        let entry = entry.clone();
        self.blocking(move |inner| {
            let mut list = inner.read_list(FAVORITES_FILE)?;
            let is_favorite = match list.iter().position(|e| e.glyph == entry.glyph) {
                Some(idx) => {
                    list.remove(idx);
                    false
                }
                None => {
                    list.push(entry);
                    true
                }
            };
            inner.write_list(FAVORITES_FILE, &list)?;
            Ok(is_favorite)
        })
        .await
    }
}
