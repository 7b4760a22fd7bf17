//! View-log deduplication and the "recently viewed" list.

use chrono::Duration;

use crate::types::{DbId, Timestamp};

/// A repeat view of the same recipe by the same user inside this window is
/// not logged again.
pub const VIEW_LOG_DEDUP_MINUTES: i64 = 5;

/// Number of recipes shown in the "recently viewed" table.
pub const RECENT_LIMIT: usize = 5;

/// Whether a view at `now` should be logged, given the user's most recent
/// logged view of the same recipe.
pub fn should_record_view(last_view: Option<Timestamp>, now: Timestamp) -> bool {
    match last_view {
        Some(last) => last <= now - Duration::minutes(VIEW_LOG_DEDUP_MINUTES),
        None => true,
    }
}

/// Collects the first `limit` distinct recipes from a most-recent-first
/// stream of view-log rows.
#[derive(Debug)]
pub struct RecentList<T> {
    limit: usize,
    ids: Vec<DbId>,
    items: Vec<T>,
}

impl<T> RecentList<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ids: Vec::with_capacity(limit),
            items: Vec::with_capacity(limit),
        }
    }

    /// Offer the next row. Repeats of an already collected recipe are
    /// ignored. Returns `true` once the list is full and the caller can stop
    /// reading.
    pub fn push(&mut self, recipe_id: DbId, item: T) -> bool {
        if !self.is_full() && !self.ids.contains(&recipe_id) {
            self.ids.push(recipe_id);
            self.items.push(item);
        }
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
