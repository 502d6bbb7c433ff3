//! Core data models for Kaomo
//!
//! `Entry` itself lives in `interface.rs` because it crosses the collaborator
//! boundary; this module holds its behavior and the category vocabulary.

use crate::interface::{Entry, KaomoError};

// ─────────────────────────────────────────────────────────────────────────────
// ENTRY
// ─────────────────────────────────────────────────────────────────────────────

impl Entry {
    pub fn new<G, C, I, T>(glyph: G, tags: I, category: C) -> Self
    where
        G: Into<String>,
        C: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            glyph: glyph.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            category: category.into(),
        }
    }

    /// Normalize an entry coming from a user form before it is saved.
    ///
    /// The glyph is trimmed and must stay non-empty. Tags are trimmed and
    /// lowercased with empty tags dropped; the category is trimmed.
    pub fn sanitized(self) -> Result<Self, KaomoError> {
        let glyph = self.glyph.trim().to_string();
        if glyph.is_empty() {
            return Err(KaomoError::InvalidInput(
                "kaomoji glyph cannot be empty".to_string(),
            ));
        }

        let tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self {
            glyph,
            tags,
            category: self.category.trim().to_string(),
        })
    }

    /// Exact, case-insensitive category predicate used by `cat:` filters.
    /// `value` is expected already lowercased by the query parser.
    pub fn in_category(&self, value: &str) -> bool {
        self.category.to_lowercase() == value
    }

    /// Exact, case-insensitive tag predicate used by `tag:` filters.
    pub fn has_tag(&self, value: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase() == value)
    }

    /// The known category this entry belongs to, if any
    pub fn known_category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CATEGORIES
// ─────────────────────────────────────────────────────────────────────────────

/// Categories the bundled collection is organized by.
///
/// The set is open at the data layer: entries may carry any category label,
/// and `Category::parse` returns `None` for labels outside this list so the
/// caller can render them generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Joy,
    Love,
    Embarrassment,
    Sympathy,
    Dissatisfaction,
    Anger,
    Sadness,
    Fear,
    Indifference,
    Confusion,
    Surprise,
    Greeting,
    Hugging,
    Winking,
    Sleeping,
    Cat,
    Bear,
    Dog,
    Rabbit,
    Friends,
    Weapons,
    Magic,
    Food,
    Music,
    Special,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Joy,
        Category::Love,
        Category::Embarrassment,
        Category::Sympathy,
        Category::Dissatisfaction,
        Category::Anger,
        Category::Sadness,
        Category::Fear,
        Category::Indifference,
        Category::Confusion,
        Category::Surprise,
        Category::Greeting,
        Category::Hugging,
        Category::Winking,
        Category::Sleeping,
        Category::Cat,
        Category::Bear,
        Category::Dog,
        Category::Rabbit,
        Category::Friends,
        Category::Weapons,
        Category::Magic,
        Category::Food,
        Category::Music,
        Category::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Joy => "Joy",
            Category::Love => "Love",
            Category::Embarrassment => "Embarrassment",
            Category::Sympathy => "Sympathy",
            Category::Dissatisfaction => "Dissatisfaction",
            Category::Anger => "Anger",
            Category::Sadness => "Sadness",
            Category::Fear => "Fear",
            Category::Indifference => "Indifference",
            Category::Confusion => "Confusion",
            Category::Surprise => "Surprise",
            Category::Greeting => "Greeting",
            Category::Hugging => "Hugging",
            Category::Winking => "Winking",
            Category::Sleeping => "Sleeping",
            Category::Cat => "Cat",
            Category::Bear => "Bear",
            Category::Dog => "Dog",
            Category::Rabbit => "Rabbit",
            Category::Friends => "Friends",
            Category::Weapons => "Weapons",
            Category::Magic => "Magic",
            Category::Food => "Food",
            Category::Music => "Music",
            Category::Special => "Special",
        }
    }

    /// Case-insensitive lookup of a category label
    pub fn parse(label: &str) -> Option<Category> {
        let needle = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
