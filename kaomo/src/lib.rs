//! Kaomo Core - kaomoji search and selection engine
//!
//! Turns a raw query into an ordered result set (structured `cat:` / `tag:`
//! filters, then field-weighted fuzzy ranking) and keeps a grid-aware cursor
//! valid across every re-query. Copy commits go through a primary and a
//! fallback clipboard writer and feed a bounded recency list.
//!
//! All state for one user lives in a [`Session`]; storage and clipboard
//! access are injected through [`EntryStoreApi`] and [`ClipboardWriter`].

pub mod bundled;
pub(crate) mod candidate;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod interface;
pub mod models;
pub mod query;
pub mod ranking;
pub mod recency;
pub mod search;
pub mod selection;
pub mod session;
pub mod store;

pub use catalog::Catalog;
pub use clipboard::ClipboardError;
pub use config::{Config, ConfigError};
pub use interface::*;
pub use models::Category;
pub use search::{Ranker, ResultSet};
pub use selection::{NavKey, SelectionCursor};
pub use session::{Session, SessionOptions};
pub use store::{JsonFileStore, StoreError};
