//! Ordering a batch by detected volume number.

use serde::Serialize;
use tracing::{debug, info};

use crate::book::BookItem;
use crate::volume::extract_volume;

/// Anything that carries a title the sorter can read.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for BookItem {
    fn title(&self) -> &str {
        &self.title
    }
}

impl<I, S: AsRef<str>> Titled for (I, S) {
    fn title(&self) -> &str {
        self.1.as_ref()
    }
}

/// An item paired with the volume number used to order it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeEntry<T> {
    pub item: T,
    pub volume: u64,
}

/// Volume of a title, 0 when none is recognised.
pub fn resolve_volume(title: &str) -> u64 {
    extract_volume(title).map_or(0, |m| m.volume)
}

/// Sorts by ascending volume. Items without a volume count as 0 and come
/// first; equal volumes keep their input order.
pub fn sort_by_volume<T: Titled>(items: impl IntoIterator<Item = T>) -> Vec<VolumeEntry<T>> {
    let mut entries: Vec<VolumeEntry<T>> = items
        .into_iter()
        .map(|item| {
            let volume = resolve_volume(item.title());
            VolumeEntry { item, volume }
        })
        .collect();
    entries.sort_by_key(|e| e.volume);
    info!(count = entries.len(), "sorted batch by volume");
    entries
}

/// Swaps the items at `from` and `to`, as the up/down buttons of a list
/// would. Returns `false` and leaves the slice alone if either index is out
/// of range.
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        debug!(from, to, len = items.len(), "move out of range");
        return false;
    }
    items.swap(from, to);
    true
}
