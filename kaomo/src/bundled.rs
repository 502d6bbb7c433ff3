//! The catalog every session starts from, before user entries are merged.

use bundled_kaomoji::{BundledKaomoji, BUNDLED_KAOMOJI};

use crate::catalog::Catalog;
use crate::interface::Entry;

impl From<&BundledKaomoji> for Entry {
    fn from(k: &BundledKaomoji) -> Self {
        Entry::new(k.glyph, k.tags.iter().copied(), k.category)
    }
}

pub fn bundled_entries() -> impl Iterator<Item = Entry> {
    BUNDLED_KAOMOJI.iter().map(Entry::from)
}

pub fn bundled_catalog() -> Catalog {
    Catalog::from_entries(bundled_entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Ranker;

    #[test]
    fn test_catalog_keeps_table_order() {
        let catalog = bundled_catalog();
        assert_eq!(catalog.len(), BUNDLED_KAOMOJI.len());
        for (entry, k) in catalog.entries().iter().zip(BUNDLED_KAOMOJI) {
            assert_eq!(entry.glyph, k.glyph);
        }
    }

    #[test]
    fn test_every_bundled_category_is_known() {
        for entry in bundled_catalog().entries() {
            assert!(
                entry.known_category().is_some(),
                "unknown category {:?} on {}",
                entry.category,
                entry.glyph
            );
        }
    }

    #[test]
    fn test_bundled_searches() {
        let catalog = bundled_catalog();
        let ranker = Ranker::default();

        let results = ranker.resolve(&catalog, "tableflip");
        assert_eq!(results.entry(&catalog, 0).unwrap().glyph, "(╯°□°）╯︵ ┻━┻");

        let joy = ranker.resolve(&catalog, "cat:joy");
        assert!(!joy.is_empty());
        assert!(joy.entries(&catalog).all(|e| e.category == "Joy"));
    }
}
