// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zonemap Selection: ordered selection bookkeeping.
//!
//! This crate tracks _which_ things are selected and in what order they were
//! selected. It does not know how things are drawn or hit-tested; callers map
//! clicks into keys and ask the container to toggle them.
//!
//! The core type is [`Selection`], which keeps:
//! - The selected keys, unique by equality, in the order they were added.
//! - A monotonically increasing **revision** counter that bumps only when the
//!   contents actually change.
//!
//! Order matters for undo: [`Selection::pop_last`] removes the most recently
//! selected key, which is how a map can step back through a run of clicks.
//!
//! ## Minimal example
//!
//! ```rust
//! use zonemap_selection::Selection;
//!
//! let mut zones = Selection::<&str>::new();
//!
//! // Click a zone: it becomes selected.
//! assert!(zones.toggle("zone-7"));
//! // Click another zone.
//! assert!(zones.toggle("zone-9"));
//! // Click the first one again: it is deselected.
//! assert!(!zones.toggle("zone-7"));
//! assert_eq!(zones.items(), &["zone-9"]);
//!
//! // Undo the most recent selection.
//! assert_eq!(zones.pop_last(), Some("zone-9"));
//! assert!(zones.is_empty());
//! ```
//!
//! Keys need only `PartialEq`; no hashing or ordering is required, so opaque
//! identifiers from a renderer can be used directly.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// An ordered, duplicate-free set of selected keys plus a revision counter.
///
/// Keys are stored in a `Vec` in the order they were added and uniqueness is
/// enforced by scanning, which suits the handful of items a map selection
/// typically holds.
#[derive(Clone, Debug)]
pub struct Selection<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected keys, oldest first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the selected keys, oldest first.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the most recently selected key, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Removes and returns the most recently selected key.
    pub fn pop_last(&mut self) -> Option<T> {
        let key = self.items.pop()?;
        self.bump_revision();
        Some(key)
    }

    /// Returns the revision counter.
    ///
    /// It is bumped only when the contents change, so observers can compare
    /// revisions instead of contents. No-op calls leave it unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Keeps only the keys for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let before = self.items.len();
        self.items.retain(|k| keep(k));
        if self.items.len() != before {
            self.bump_revision();
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Selection<T>
where
    T: PartialEq,
{
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.position_of(key).is_some()
    }

    /// Selects `key` if it is not already selected.
    ///
    /// Returns `true` if the key was newly added. An already-selected key keeps
    /// its original position.
    pub fn add(&mut self, key: T) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.items.push(key);
        self.bump_revision();
        true
    }

    /// Deselects `key`, returning it if it was selected.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let idx = self.position_of(key)?;
        let removed = self.items.remove(idx);
        self.bump_revision();
        Some(removed)
    }

    /// Toggles `key` and returns whether it is selected afterwards.
    ///
    /// Toggling the same key twice restores the previous contents.
    pub fn toggle(&mut self, key: T) -> bool {
        if let Some(idx) = self.position_of(&key) {
            self.items.remove(idx);
            self.bump_revision();
            false
        } else {
            self.items.push(key);
            self.bump_revision();
            true
        }
    }

    fn position_of(&self, key: &T) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }
}

#[cfg(feature = "hashbrown")]
impl<T> Selection<T>
where
    T: core::hash::Hash + Eq,
{
    /// Replaces the selection with `keys`, de-duplicating by hash.
    ///
    /// First occurrences keep their input order, so the last unique key becomes
    /// [`Selection::last`]. This is linear in the input, whereas building the same selection
    /// with [`Selection::add`] scans on every insert. The revision is bumped only
    /// if the result differs from the current contents.
    pub fn replace_with_hashed<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
    {
        use core::hash::BuildHasher;
        use hashbrown::{DefaultHashBuilder, HashTable};

        let hasher = DefaultHashBuilder::default();
        let iter = keys.into_iter();
        let mut items: Vec<T> = Vec::with_capacity(iter.size_hint().0);
        let mut seen: HashTable<usize> = HashTable::with_capacity(items.capacity());

        for key in iter {
            let hash = hasher.hash_one(&key);
            if seen.find(hash, |&idx| items[idx] == key).is_some() {
                continue;
            }
            seen.insert_unique(hash, items.len(), |&idx| hasher.hash_one(&items[idx]));
            items.push(key);
        }

        if items != self.items {
            self.items = items;
            self.bump_revision();
        }
    }
}

impl<'a, T> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
