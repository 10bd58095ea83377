// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `zonemap_selection` crate.
//!
//! These exercise the `Selection<T>` API with a focus on insertion order and
//! how the revision counter reacts to real changes versus no-ops.

use zonemap_selection::Selection;

#[test]
fn empty_selection_basics() {
    let sel = Selection::<u32>::new();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
    assert_eq!(sel.last(), None);
    assert_eq!(sel.revision(), 0);
}

#[test]
fn toggle_twice_restores_original_contents() {
    let mut sel = Selection::new();
    sel.add(1);
    sel.add(2);
    let before: Vec<u32> = sel.items().to_vec();

    assert!(sel.toggle(3));
    assert!(!sel.toggle(3));
    assert_eq!(sel.items(), before.as_slice());

    assert!(!sel.toggle(1));
    assert!(sel.toggle(1));
    // Re-added keys move to the end: they are now the most recent.
    assert_eq!(sel.items(), &[2, 1]);
}

#[test]
fn add_ignores_duplicates_without_bumping_revision() {
    let mut sel = Selection::new();
    assert!(sel.add("a"));
    let rev = sel.revision();
    assert!(!sel.add("a"));
    assert_eq!(sel.revision(), rev);
    assert_eq!(sel.len(), 1);
}

#[test]
fn pop_last_walks_back_through_insertion_order() {
    let mut sel = Selection::new();
    sel.toggle(10);
    sel.toggle(20);
    sel.toggle(30);
    sel.toggle(20);

    assert_eq!(sel.last(), Some(&30));
    assert_eq!(sel.pop_last(), Some(30));
    assert_eq!(sel.pop_last(), Some(10));
    assert_eq!(sel.pop_last(), None);
}

#[test]
fn remove_returns_the_key_and_tolerates_absent_keys() {
    let mut sel = Selection::new();
    sel.add(5);
    assert_eq!(sel.remove(&5), Some(5));
    let rev = sel.revision();
    assert_eq!(sel.remove(&5), None);
    assert_eq!(sel.revision(), rev);
}

#[test]
fn retain_bumps_revision_only_when_something_is_dropped() {
    let mut sel = Selection::new();
    for k in 0..6 {
        sel.add(k);
    }
    let rev = sel.revision();
    sel.retain(|_| true);
    assert_eq!(sel.revision(), rev);

    sel.retain(|k| k % 2 == 0);
    assert_eq!(sel.items(), &[0, 2, 4]);
    assert!(sel.revision() > rev);
}

#[test]
fn clear_bumps_revision_only_on_change() {
    let mut sel = Selection::<u8>::new();
    sel.clear();
    assert_eq!(sel.revision(), 0);

    sel.add(1);
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.revision(), 2);
}

#[test]
fn iteration_matches_items() {
    let mut sel = Selection::new();
    sel.add('x');
    sel.add('y');
    let collected: Vec<char> = (&sel).into_iter().copied().collect();
    assert_eq!(collected, sel.items());
    assert!(sel.iter().eq(sel.items().iter()));
}

#[test]
fn last_is_the_most_recent_key() {
    let mut sel = Selection::new();
    assert_eq!(sel.last(), None);
    sel.add('a');
    sel.add('b');
    assert_eq!(sel.last(), Some(&'b'));
    sel.toggle('b');
    assert_eq!(sel.last(), Some(&'a'));
}

#[test]
fn default_does_not_require_default_keys() {
    // Opaque ids from a renderer rarely have a meaningful default.
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct FeatureId(u32);

    let mut sel = Selection::<FeatureId>::default();
    assert!(sel.is_empty());
    assert_eq!(sel.revision(), 0);
    assert!(sel.toggle(FeatureId(4)));
    assert_eq!(sel.items(), &[FeatureId(4)]);
}

#[cfg(feature = "hashbrown")]
#[test]
fn replace_with_hashed_keeps_first_occurrences() {
    let mut sel = Selection::new();
    sel.replace_with_hashed([3, 1, 3, 2, 1]);
    assert_eq!(sel.items(), &[3, 1, 2]);
    assert_eq!(sel.last(), Some(&2));

    let rev = sel.revision();
    sel.replace_with_hashed([3, 3, 1, 2]);
    assert_eq!(sel.revision(), rev, "same contents do not bump the revision");

    sel.replace_with_hashed(core::iter::empty());
    assert!(sel.is_empty());
    assert_ne!(sel.revision(), rev);
}
