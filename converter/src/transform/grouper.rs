//! Group normalized items into ordered buckets.
//!
//! Groups come out in the order their key was first seen in the input,
//! never sorted alphabetically:
//!
//! ```text
//! rows (flat)                        groups (first-seen order)
//! ┌──────────────────────┐          ┌────────────────────────┐
//! │ kids        / Dress  │          │ kids:        [Dress,   │
//! │ collections / Coat   │   →      │               Shirt]   │
//! │ kids        / Shirt  │          │ collections: [Coat]    │
//! └──────────────────────┘          └────────────────────────┘
//! ```
//!
//! Buckets are [`IndexMap`]s, which iterate and serialize in insertion order.

use indexmap::IndexMap;

/// Group key → items, in first-seen key order.
pub type Groups<T> = IndexMap<String, Vec<T>>;

/// Group items by a key, preserving arrival order inside each group.
pub fn group_by<T>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> String) -> Groups<T> {
    let mut groups = Groups::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Total number of items across all groups.
pub fn item_count<T>(groups: &Groups<T>) -> usize {
    groups.values().map(Vec::len).sum()
}

/// Stable ascending sort by an integer key; equal keys keep input order.
pub fn sort_stable_by_order<T>(items: &mut [T], order: impl Fn(&T) -> i64) {
    items.sort_by_key(|item| order(item));
}
