//! Session - the single owner of all mutable search state
//!
//! Query, result set and cursor are derived state: every input that can
//! change the results goes through `refresh`, which recomputes the result set
//! and then re-clamps the cursor before returning. Navigation never sees a
//! cursor that is out of range for the current results.
//!
//! Collaborator I/O (store, clipboard) happens behind `&mut self`, so at most
//! one operation is ever in flight per session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::copy::CopyOrchestrator;
use crate::interface::{ClipboardWriter, CopyEvent, Entry, EntryStoreApi, KaomoError};
use crate::ranking::RankingOptions;
use crate::recency::{RecencyTracker, DEFAULT_RECENT_CAPACITY};
use crate::search::{Ranker, ResultSet};
use crate::selection::{NavKey, SelectionCursor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub ranking: RankingOptions,
    pub recent_capacity: usize,
    pub grid_columns: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ranking: RankingOptions::default(),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            grid_columns: 1,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            ranking: config.ranking_options(),
            recent_capacity: config.session.recent_capacity,
            grid_columns: config.session.grid_columns,
        }
    }
}

pub struct Session {
    catalog: Catalog,
    ranker: Ranker,
    query: String,
    results: ResultSet,
    selection: SelectionCursor,
    copier: CopyOrchestrator,
    favorites: Vec<Entry>,
    store: Arc<dyn EntryStoreApi>,
}

impl Session {
    /// Start a session over `catalog` (normally the bundled one). The session
    /// is usable immediately; user entries arrive later via
    /// `merge_user_entries`.
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn EntryStoreApi>,
        primary: Arc<dyn ClipboardWriter>,
        fallback: Arc<dyn ClipboardWriter>,
        options: SessionOptions,
    ) -> Self {
        let mut session = Self {
            catalog,
            ranker: Ranker::new(options.ranking),
            query: String::new(),
            results: ResultSet::default(),
            selection: SelectionCursor::new(0, options.grid_columns),
            copier: CopyOrchestrator::new(
                primary,
                fallback,
                RecencyTracker::new(options.recent_capacity),
            ),
            favorites: Vec::new(),
            store,
        };
        session.refresh();
        session
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────────────────────

    /// Recompute the result set for the current query and catalog, then
    /// re-clamp the cursor against it.
    fn refresh(&mut self) {
        self.results = self.ranker.resolve(&self.catalog, &self.query);
        self.selection.on_result_set_changed(self.results.len());
    }

    pub fn set_query(&mut self, raw: impl Into<String>) {
        self.query = raw.into();
        self.refresh();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn result_set(&self) -> &ResultSet {
        &self.results
    }

    pub fn results(&self) -> Vec<&Entry> {
        self.results.entries(&self.catalog).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn set_columns(&mut self, columns: usize) {
        self.selection.set_columns(columns);
    }

    /// Apply one navigation input; returns the new cursor
    pub fn handle_key(&mut self, key: NavKey) -> usize {
        self.selection.apply(key);
        self.selection.cursor()
    }

    pub fn select(&mut self, index: usize) -> usize {
        self.handle_key(NavKey::To(index))
    }

    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    pub fn selection(&self) -> SelectionCursor {
        self.selection
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.results.entry(&self.catalog, self.selection.cursor())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog mutation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Append stored user entries not already in the catalog. A load failure
    /// leaves the catalog as it was. Returns the number of entries added.
    pub async fn merge_user_entries(&mut self) -> usize {
        match self.store.load_user_entries().await {
            Ok(entries) => {
                let added = self.catalog.merge(entries);
                info!(added, total = self.catalog.len(), "Merged user entries");
                self.refresh();
                added
            }
            Err(e) => {
                warn!(error = %e, "Failed to load user entries, continuing with bundled catalog");
                0
            }
        }
    }

    /// Sanitize and persist `entry`, then upsert it into the catalog.
    ///
    /// The catalog only changes after the store confirmed the write; on any
    /// error the session is left untouched. Returns the catalog position.
    pub async fn save_entry(&mut self, entry: Entry) -> Result<usize, KaomoError> {
        let entry = entry.sanitized()?;
        if let Err(e) = self.store.save_entry(&entry).await {
            warn!(glyph = %entry.glyph, error = %e, "Failed to save entry");
            return Err(e.into());
        }
        let position = self.catalog.upsert(entry);
        debug!(position, "Applied saved entry");
        self.refresh();
        Ok(position)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────────────

    /// Copy the entry under the cursor
    pub async fn commit_selected(&mut self) -> Result<CopyEvent, KaomoError> {
        let entry = self.selected().cloned().ok_or(KaomoError::NothingSelected)?;
        let index = self.selection.cursor();
        Ok(self.commit(&entry, Some(index)).await)
    }

    /// Copy any entry, e.g. one picked from the recent list. On success the
    /// persisted history is updated too; failing to persist it is logged
    /// and does not change the outcome.
    pub async fn commit(&mut self, entry: &Entry, result_index: Option<usize>) -> CopyEvent {
        let event = self.copier.commit(entry, result_index).await;
        if event.is_success() {
            if let Err(e) = self.store.save_recent(entry).await {
                warn!(glyph = %entry.glyph, error = %e, "Failed to persist copy history");
            }
        }
        event
    }

    pub fn recent(&self) -> &[Entry] {
        self.copier.recency().items()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Favorites
    // ─────────────────────────────────────────────────────────────────────────────

    /// Replace the in-memory favorites with the stored list; failures are
    /// logged and leave the current list.
    pub async fn load_favorites(&mut self) -> usize {
        match self.store.load_favorites().await {
            Ok(favorites) => {
                self.favorites = favorites;
                self.favorites.len()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorites");
                self.favorites.len()
            }
        }
    }

    /// Toggle `entry` in the store, then mirror the confirmed state.
    /// Returns whether it is now a favorite.
    pub async fn toggle_favorite(&mut self, entry: &Entry) -> Result<bool, KaomoError> {
        let now_favorite = self.store.toggle_favorite(entry).await?;
        self.favorites.retain(|f| f.glyph != entry.glyph);
        if now_favorite {
            self.favorites.push(entry.clone());
        }
        Ok(now_favorite)
    }

    pub fn favorites(&self) -> &[Entry] {
        &self.favorites
    }

    pub fn is_favorite(&self, glyph: &str) -> bool {
        self.favorites.iter().any(|f| f.glyph == glyph)
    }
}
