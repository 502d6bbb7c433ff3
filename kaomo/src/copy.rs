//! Copy commits: primary clipboard write, one fallback, recency on success.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::interface::{ClipboardWriter, CopyEvent, CopyPath, Entry};
use crate::recency::RecencyTracker;

pub struct CopyOrchestrator {
    primary: Arc<dyn ClipboardWriter>,
    fallback: Arc<dyn ClipboardWriter>,
    recency: RecencyTracker,
}

impl CopyOrchestrator {
    pub fn new(
        primary: Arc<dyn ClipboardWriter>,
        fallback: Arc<dyn ClipboardWriter>,
        recency: RecencyTracker,
    ) -> Self {
        Self {
            primary,
            fallback,
            recency,
        }
    }

    pub fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    /// Write `entry.glyph` to the clipboard. The fallback path runs at most
    /// once, and only after the primary failed. Recency is updated only when
    /// one of the two writes succeeded.
    pub async fn commit(&mut self, entry: &Entry, result_index: Option<usize>) -> CopyEvent {
        let via = match self.primary.write_text(&entry.glyph).await {
            Ok(()) => CopyPath::Primary,
            Err(primary_err) => {
                warn!(error = %primary_err, "Primary clipboard write failed, trying fallback");
                match self.fallback.write_text(&entry.glyph).await {
                    Ok(()) => CopyPath::Fallback,
                    Err(fallback_err) => {
                        warn!(error = %fallback_err, "Fallback clipboard write failed");
                        return CopyEvent::Failed {
                            glyph: entry.glyph.clone(),
                            result_index,
                            reason: format!("{primary_err}; fallback: {fallback_err}"),
                        };
                    }
                }
            }
        };

        self.recency.record(entry.clone());
        debug!(glyph = %entry.glyph, ?via, "Copied");
        CopyEvent::Copied {
            glyph: entry.glyph.clone(),
            result_index,
            via,
        }
    }
}
