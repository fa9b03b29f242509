use crate::model::HistoryEntry;

/// Maximum number of recent searches kept.
pub const MAX_HISTORY: usize = 4;

/// Bounded recent-search list: most-recent-first, at most one entry per
/// city name (case-sensitive exact match), capped at [`MAX_HISTORY`].
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    /// Record a search: drop any prior entry for the same city, prepend,
    /// truncate to the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| existing.city != entry.city);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// City names, most recent first.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.city.as_str())
    }
}
