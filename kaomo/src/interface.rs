//! Kaomo Interface Definition
//!
//! Shared records exchanged with collaborators, the session-level error type,
//! and the two service seams the engine consumes: entry persistence and
//! clipboard writes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::store::StoreError;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// One searchable kaomoji.
///
/// `glyph` is the identity key: two entries with the same glyph are the same
/// logical item. The glyph is opaque text and may span several lines.
///
/// Field names on the wire match the persisted record shape
/// (`Character` / `Tags` / `Category`) so existing user files load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "Character")]
    pub glyph: String,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
    #[serde(rename = "Category", default)]
    pub category: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Which predicate a structured query token applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Tag,
}

/// Which clipboard path delivered a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

/// Signal emitted by every copy commit.
///
/// `result_index` is the position in the result set the copy originated
/// from, when known, so the UI can flash the right cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyEvent {
    Copied {
        glyph: String,
        result_index: Option<usize>,
        via: CopyPath,
    },
    Failed {
        glyph: String,
        result_index: Option<usize>,
        reason: String,
    },
}

impl CopyEvent {
    pub fn is_success(&self) -> bool {
        matches!(self, CopyEvent::Copied { .. })
    }

    pub fn glyph(&self) -> &str {
        match self {
            CopyEvent::Copied { glyph, .. } | CopyEvent::Failed { glyph, .. } => glyph,
        }
    }
}

/// Error type for Kaomo session operations
#[derive(Debug, Error)]
pub enum KaomoError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Nothing selected")]
    NothingSelected,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACES
// ═══════════════════════════════════════════════════════════════════════════════

/// Durable storage for user entries, the copy history and favorites.
///
/// Every method must be callable when no prior data exists; a missing file
/// is an empty list, never an error.
#[async_trait::async_trait]
pub trait EntryStoreApi: Send + Sync {
    /// Previously saved user entries, in save order
    async fn load_user_entries(&self) -> Result<Vec<Entry>, StoreError>;

    /// Persist one entry, overwriting any saved entry with the same glyph.
    /// Must be durable before returning `Ok`.
    async fn save_entry(&self, entry: &Entry) -> Result<(), StoreError>;

    /// Push an entry onto the persisted copy history (most recent first)
    async fn save_recent(&self, entry: &Entry) -> Result<(), StoreError>;

    /// The persisted copy history, most recent first
    async fn load_recents(&self) -> Result<Vec<Entry>, StoreError>;

    async fn load_favorites(&self) -> Result<Vec<Entry>, StoreError>;

    /// Add or remove a favorite. Returns whether the entry is now a favorite.
    async fn toggle_favorite(&self, entry: &Entry) -> Result<bool, StoreError>;
}

/// A single clipboard write path
#[async_trait::async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
