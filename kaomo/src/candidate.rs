//! Search candidate with memoized derived state.
//!
//! Module isolation ensures no code outside this module can reach the
//! borrowed entry mutably, so the `OnceLock` caches can never go stale.

use std::sync::OnceLock;

use crate::interface::Entry;
use crate::ranking::MatchField;
use crate::search::tokenize_words;

/// One catalog entry being ranked. Lowercased field texts and their word
/// tokens are computed on first access and shared between phrase and
/// per-word scoring.
#[derive(Debug)]
pub struct SearchCandidate<'a> {
    /// Position in the catalog, the ranking tiebreaker
    pub position: usize,
    entry: &'a Entry,
    tag_texts: OnceLock<Vec<String>>,
    category_text: OnceLock<[String; 1]>,
    glyph_text: OnceLock<[String; 1]>,
    tag_words: OnceLock<Vec<String>>,
    category_words: OnceLock<Vec<String>>,
    glyph_words: OnceLock<Vec<String>>,
}

impl<'a> SearchCandidate<'a> {
    pub fn new(position: usize, entry: &'a Entry) -> Self {
        Self {
            position,
            entry,
            tag_texts: OnceLock::new(),
            category_text: OnceLock::new(),
            glyph_text: OnceLock::new(),
            tag_words: OnceLock::new(),
            category_words: OnceLock::new(),
            glyph_words: OnceLock::new(),
        }
    }

    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    /// Lowercased whole-field texts (one per tag)
    pub fn field_texts(&self, field: MatchField) -> &[String] {
        match field {
            MatchField::Tags => self
                .tag_texts
                .get_or_init(|| self.entry.tags.iter().map(|t| t.to_lowercase()).collect())
                .as_slice(),
            MatchField::Category => self
                .category_text
                .get_or_init(|| [self.entry.category.to_lowercase()])
                .as_slice(),
            MatchField::Glyph => self
                .glyph_text
                .get_or_init(|| [self.entry.glyph.to_lowercase()])
                .as_slice(),
        }
    }

    /// Word tokens across the field's texts
    pub fn field_words(&self, field: MatchField) -> &[String] {
        let cell = match field {
            MatchField::Tags => &self.tag_words,
            MatchField::Category => &self.category_words,
            MatchField::Glyph => &self.glyph_words,
        };
        cell.get_or_init(|| {
            self.field_texts(field)
                .iter()
                .flat_map(|text| tokenize_words(text).into_iter().map(|(_, _, w)| w))
                .collect()
        })
    }
}
