//! Browsing history: per-user, recency-ordered, deduplicated, size-capped
//! list of recently viewed SKUs.
//!
//! Invariants held by every [`BrowsingHistory`]:
//! - each SKU appears at most once;
//! - the list never holds more than [`HistoryLimit`] entries;
//! - index 0 is the most recently recorded SKU.
//!
//! Stores apply the same transition atomically on their side (see the
//! `HistoryStore` port in `storefront-app`); this type is the in-memory
//! model of it.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::SkuId;

/// Maximum number of SKUs kept in a user's browsing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct HistoryLimit(NonZeroUsize);

impl HistoryLimit {
    /// Default capacity when nothing is configured.
    pub const DEFAULT: usize = 5;

    /// Build a limit from a configured value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHistoryLimit`] when `value` is zero.
    pub fn new(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(ValidationError::InvalidHistoryLimit)
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Index of the last kept element, as used by range-trim commands.
    #[must_use]
    pub fn last_index(self) -> usize {
        self.0.get() - 1
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(NonZeroUsize::new(Self::DEFAULT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for HistoryLimit {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HistoryLimit> for usize {
    fn from(limit: HistoryLimit) -> usize {
        limit.get()
    }
}

/// A user's browsing history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BrowsingHistory {
    items: Vec<SkuId>,
}

impl BrowsingHistory {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from a sequence read back from a store.
    ///
    /// Keeps the first occurrence of each SKU and at most `limit` entries,
    /// so a list written under a larger limit is still returned within
    /// bounds.
    #[must_use]
    pub fn from_stored(items: impl IntoIterator<Item = SkuId>, limit: HistoryLimit) -> Self {
        let mut kept: Vec<SkuId> = Vec::with_capacity(limit.get());
        for sku in items {
            if kept.len() == limit.get() {
                break;
            }
            if !kept.contains(&sku) {
                kept.push(sku);
            }
        }
        Self { items: kept }
    }

    /// Record a view: drop any earlier occurrence of `sku`, put it first,
    /// and evict the oldest entries beyond `limit`.
    pub fn record(&mut self, sku: SkuId, limit: HistoryLimit) {
        self.items.retain(|existing| *existing != sku);
        self.items.insert(0, sku);
        self.items.truncate(limit.get());
    }

    #[must_use]
    pub fn items(&self) -> &[SkuId] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<SkuId> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(raw: i64) -> SkuId {
        SkuId::new(raw).unwrap()
    }

    fn raw(history: &BrowsingHistory) -> Vec<i64> {
        history.items().iter().map(|id| id.get()).collect()
    }

    #[test]
    fn should_default_to_five_entries() {
        assert_eq!(HistoryLimit::default().get(), 5);
        assert_eq!(HistoryLimit::default().last_index(), 4);
    }

    #[test]
    fn should_reject_zero_limit() {
        assert_eq!(
            HistoryLimit::new(0),
            Err(ValidationError::InvalidHistoryLimit)
        );
    }

    #[test]
    fn should_start_empty() {
        let history = BrowsingHistory::new();
        assert!(history.is_empty());
    }

    #[test]
    fn should_put_latest_view_first() {
        let mut history = BrowsingHistory::new();
        history.record(sku(1), HistoryLimit::default());
        history.record(sku(2), HistoryLimit::default());
        assert_eq!(raw(&history), vec![2, 1]);
    }

    #[test]
    fn should_move_repeated_view_to_front() {
        let limit = HistoryLimit::default();
        let mut history = BrowsingHistory::new();
        for id in [3, 1, 2] {
            history.record(sku(id), limit);
        }
        assert_eq!(raw(&history), vec![2, 1, 3]);

        history.record(sku(1), limit);
        assert_eq!(raw(&history), vec![1, 2, 3]);
    }

    #[test]
    fn should_evict_oldest_beyond_limit() {
        let limit = HistoryLimit::default();
        let mut history = BrowsingHistory::new();
        for id in 1..=7 {
            history.record(sku(id), limit);
        }
        assert_eq!(raw(&history), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn should_hold_single_entry_after_repeating_same_view() {
        let limit = HistoryLimit::default();
        let mut history = BrowsingHistory::new();
        for _ in 0..10 {
            history.record(sku(9), limit);
        }
        assert_eq!(raw(&history), vec![9]);
    }

    #[test]
    fn should_never_hold_duplicates_for_arbitrary_sequences() {
        let limit = HistoryLimit::new(4).unwrap();
        let mut history = BrowsingHistory::new();
        for id in [1, 2, 1, 3, 3, 4, 2, 5, 1, 6, 6, 2] {
            history.record(sku(id), limit);
            let mut seen = raw(&history);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), history.len());
            assert!(history.len() <= limit.get());
            assert_eq!(history.items()[0], sku(id));
        }
        assert_eq!(raw(&history), vec![2, 6, 1, 5]);
    }

    #[test]
    fn should_clamp_stored_list_to_limit_and_drop_duplicates() {
        let stored = [5, 4, 5, 3, 2, 1].into_iter().map(sku);
        let history = BrowsingHistory::from_stored(stored, HistoryLimit::new(3).unwrap());
        assert_eq!(raw(&history), vec![5, 4, 3]);
    }

    #[test]
    fn should_serialize_as_plain_array() {
        let mut history = BrowsingHistory::new();
        history.record(sku(8), HistoryLimit::default());
        assert_eq!(serde_json::to_string(&history).unwrap(), "[8]");
    }
}
