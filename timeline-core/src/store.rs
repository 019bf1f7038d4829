use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::search::entry_matches;

/// Danh sách có thứ tự, sở hữu mọi entry của timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Thay toàn bộ danh sách.
    pub fn set_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Entry>,
    {
        self.entries.clear();
        self.entries.extend(entries);
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
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

    /// Từng entry kèm chỉ số trong store.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate()
    }

    /// Các entry khớp từ khoá, theo thứ tự trong store.
    pub fn matching<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (usize, &'a Entry)> {
        self.indexed()
            .filter(move |(_, entry)| entry_matches(entry, query))
    }

    /// Các tag khác nhau theo thứ tự xuất hiện đầu tiên.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for tag in self.entries.iter().flat_map(|entry| entry.tags.iter()) {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Side;

    #[test]
    fn vocabulary_keeps_first_appearance_order() {
        let store = EntryStore::from_entries(vec![
            Entry::new(Side::Left, "A", "one").with_tags(["LATE", "LONG"]),
            Entry::new(Side::Right, "A", "two").with_tags(["PACE", "LATE"]),
        ]);
        assert_eq!(store.tag_vocabulary(), vec!["LATE", "LONG", "PACE"]);
    }

    #[test]
    fn set_entries_replaces_previous_content() {
        let mut store = EntryStore::from_entries(vec![Entry::new(Side::Left, "A", "old")]);
        store.set_entries(vec![Entry::new(Side::Right, "B", "new")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].title, "new");
    }
}
