//! The session catalog: every entry searchable in this session, deduplicated
//! by glyph.
//!
//! Two mutation paths exist and both keep the glyph-uniqueness invariant:
//! - `merge` appends user entries at startup, first-loaded wins
//! - `upsert` replaces in place or appends, after the store confirmed a save

use std::collections::HashMap;

use crate::interface::Entry;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    /// glyph -> position in `entries`
    positions: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an ordered list; later duplicates are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut catalog = Self::new();
        catalog.merge(entries);
        catalog
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, glyph: &str) -> Option<&Entry> {
        self.position(glyph).map(|i| &self.entries[i])
    }

    pub fn position(&self, glyph: &str) -> Option<usize> {
        self.positions.get(glyph).copied()
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.positions.contains_key(glyph)
    }

    /// Append every entry whose glyph is not already present.
    ///
    /// Existing entries are never modified, even when the incoming record
    /// disagrees on tags or category. Returns the number of entries added.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Entry>) -> usize {
        let mut added = 0;
        for entry in incoming {
            if self.positions.contains_key(&entry.glyph) {
                continue;
            }
            self.positions.insert(entry.glyph.clone(), self.entries.len());
            self.entries.push(entry);
            added += 1;
        }
        added
    }

    /// Replace the entry with the same glyph in place, or append it.
    /// Returns the entry's position.
    pub fn upsert(&mut self, entry: Entry) -> usize {
        match self.positions.get(&entry.glyph) {
            Some(&i) => {
                self.entries[i] = entry;
                i
            }
            None => {
                let i = self.entries.len();
                self.positions.insert(entry.glyph.clone(), i);
                self.entries.push(entry);
                i
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(catalog: &Catalog) -> Vec<&str> {
        catalog.entries().iter().map(|e| e.glyph.as_str()).collect()
    }

    #[test]
    fn test_from_entries_dedupes_first_wins() {
        let catalog = Catalog::from_entries(vec![
            Entry::new("(◕‿◕)", ["happy"], "Joy"),
            Entry::new("(T_T)", ["sad"], "Sadness"),
            Entry::new("(◕‿◕)", ["other"], "Love"),
        ]);
        assert_eq!(glyphs(&catalog), vec!["(◕‿◕)", "(T_T)"]);
        assert_eq!(catalog.get("(◕‿◕)").unwrap().category, "Joy");
    }

    #[test]
    fn test_merge_appends_new_preserving_order() {
        let mut catalog = Catalog::from_entries(vec![
            Entry::new("a", ["x"], "Joy"),
            Entry::new("b", ["y"], "Joy"),
        ]);
        let added = catalog.merge(vec![
            Entry::new("c", ["z"], "Love"),
            Entry::new("a", ["changed"], "Anger"),
            Entry::new("d", ["w"], "Love"),
        ]);
        assert_eq!(added, 2);
        assert_eq!(glyphs(&catalog), vec!["a", "b", "c", "d"]);
        // Bundled record wins over a conflicting user record
        assert_eq!(catalog.get("a").unwrap().tags, vec!["x"]);
    }

    #[test]
    fn test_upsert_existing_replaces_in_place() {
        let mut catalog = Catalog::from_entries(vec![
            Entry::new("a", ["x"], "Joy"),
            Entry::new("b", ["y"], "Joy"),
            Entry::new("c", ["z"], "Joy"),
        ]);
        let pos = catalog.upsert(Entry::new("b", ["new", "tags"], "Love"));
        assert_eq!(pos, 1);
        assert_eq!(catalog.len(), 3);
        assert_eq!(glyphs(&catalog), vec!["a", "b", "c"]);
        let b = catalog.get("b").unwrap();
        assert_eq!(b.tags, vec!["new", "tags"]);
        assert_eq!(b.category, "Love");
    }

    #[test]
    fn test_upsert_new_appends() {
        let mut catalog = Catalog::from_entries(vec![Entry::new("a", ["x"], "Joy")]);
        let pos = catalog.upsert(Entry::new("z", ["new"], "Love"));
        assert_eq!(pos, 1);
        assert_eq!(glyphs(&catalog), vec!["a", "z"]);
        assert_eq!(catalog.position("z"), Some(1));
    }
}
