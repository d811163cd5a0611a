// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Roving: roving-tabindex navigation primitives.
//!
//! List-like widgets (menus, tabs, listboxes) keep their container as the
//! single tab stop and move one internal focus position with the arrow
//! keys. This crate models that position as an `Option<usize>` over a
//! caller-built snapshot of the current item sequence and provides the
//! traversal rules:
//!
//! - [`move_next`] / [`move_prev`] advance or retreat, skipping disabled
//!   entries (which still occupy sequence positions), wrapping at the ends
//!   under [`Wrap::Cycle`] or pinning under [`Wrap::Clamp`].
//! - [`move_first`] / [`move_last`] jump to the first or last enabled entry.
//! - [`sanitize`] clamps a structurally invalid position (out of range, or
//!   resting on a disabled entry) to the nearest valid target, the defense
//!   consuming controllers apply against misbehaving override reducers.
//! - [`TypeaheadBuffer`](typeahead::TypeaheadBuffer) accumulates typed
//!   characters within an idle window and finds the next entry whose match
//!   text has that prefix.
//!
//! An empty sequence, or one where every entry is disabled, has no valid
//! position: every operation yields `None` and the container stays
//! focusable but inert. The Tab key never changes the position; leaving the
//! region is the rendering layer's concern, encoded by the prop getters.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_roving::{NavEntry, NavSpace, Wrap, move_first, move_next, move_prev};
//!
//! let entries = [
//!     NavEntry::new(10_u32, "Cut"),
//!     NavEntry::new(11_u32, "Copy").disabled(),
//!     NavEntry::new(12_u32, "Paste"),
//! ];
//! let space = NavSpace::new(&entries);
//!
//! let first = move_first(&space);
//! assert_eq!(first, Some(0));
//! // "Copy" is disabled and gets skipped.
//! assert_eq!(move_next(&space, first, Wrap::Cycle), Some(2));
//! // Wrapping backwards from the first entry lands on the last enabled one.
//! assert_eq!(move_prev(&space, first, Wrap::Cycle), Some(2));
//! ```
//!
//! The snapshot types are generic over the item identifier `K`, so callers
//! can use any small, copyable handle. Match text is borrowed: the engine
//! never owns item content, it only reads it for the duration of a call.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod typeahead;

pub use typeahead::TypeaheadBuffer;

/// A single entry in a navigable item sequence.
///
/// Disabled entries occupy a sequence position (indices are stable across
/// enable/disable) but are never navigation targets.
#[derive(Copy, Clone, Debug)]
pub struct NavEntry<'a, K> {
    /// Caller-owned identifier, unique within the sequence.
    pub id: K,
    /// Whether this entry is excluded from being a target.
    pub disabled: bool,
    /// Text used for typeahead matching, typically the item's label.
    pub match_text: &'a str,
}

impl<'a, K> NavEntry<'a, K> {
    /// Create an enabled entry.
    pub fn new(id: K, match_text: &'a str) -> Self {
        Self {
            id,
            disabled: false,
            match_text,
        }
    }

    /// Mark this entry disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// A read-only snapshot of the current item sequence.
///
/// Built fresh by the caller for each operation; the engine holds no item
/// state between calls.
#[derive(Copy, Clone, Debug)]
pub struct NavSpace<'a, K> {
    entries: &'a [NavEntry<'a, K>],
}

impl<'a, K> NavSpace<'a, K> {
    /// Wrap a slice of entries.
    pub fn new(entries: &'a [NavEntry<'a, K>]) -> Self {
        Self { entries }
    }

    /// All entries, in sequence order.
    pub fn entries(&self) -> &'a [NavEntry<'a, K>] {
        self.entries
    }

    /// Number of entries, disabled included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the sequence has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, if in range.
    pub fn entry(&self, index: usize) -> Option<&'a NavEntry<'a, K>> {
        self.entries.get(index)
    }

    /// Returns `true` if `index` is in range and enabled.
    pub fn is_target(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| !e.disabled)
    }

    /// Index of the first enabled entry.
    pub fn first_enabled(&self) -> Option<usize> {
        self.entries.iter().position(|e| !e.disabled)
    }

    /// Index of the last enabled entry.
    pub fn last_enabled(&self) -> Option<usize> {
        self.entries.iter().rposition(|e| !e.disabled)
    }
}

impl<'a, K: PartialEq> NavSpace<'a, K> {
    /// Sequence position of the entry with the given id.
    pub fn position_of(&self, id: &K) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }
}

/// End-of-sequence behavior for [`move_next`] and [`move_prev`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// Wrap around to the other end. The default for roving lists.
    #[default]
    Cycle,
    /// Stop at the last target in the direction of travel.
    Clamp,
}

/// Advance to the next enabled entry after `from`.
///
/// With `from == None` the first enabled entry is selected. At the end of
/// the sequence, [`Wrap::Cycle`] wraps to the first enabled entry and
/// [`Wrap::Clamp`] pins to the last one. Yields `None` only when no entry
/// is enabled.
pub fn move_next<K>(space: &NavSpace<'_, K>, from: Option<usize>, wrap: Wrap) -> Option<usize> {
    let first = space.first_enabled()?;
    let Some(anchor) = from else {
        return Some(first);
    };
    match next_target_after(space, anchor) {
        Some(i) => Some(i),
        None => match wrap {
            Wrap::Cycle => Some(first),
            Wrap::Clamp => space.last_enabled(),
        },
    }
}

/// Retreat to the previous enabled entry before `from`.
///
/// With `from == None` the last enabled entry is selected. At the start of
/// the sequence, [`Wrap::Cycle`] wraps to the last enabled entry and
/// [`Wrap::Clamp`] pins to the first one. Yields `None` only when no entry
/// is enabled.
pub fn move_prev<K>(space: &NavSpace<'_, K>, from: Option<usize>, wrap: Wrap) -> Option<usize> {
    let last = space.last_enabled()?;
    let Some(anchor) = from else {
        return Some(last);
    };
    match prev_target_before(space, anchor) {
        Some(i) => Some(i),
        None => match wrap {
            Wrap::Cycle => Some(last),
            Wrap::Clamp => space.first_enabled(),
        },
    }
}

/// Jump to the first enabled entry.
pub fn move_first<K>(space: &NavSpace<'_, K>) -> Option<usize> {
    space.first_enabled()
}

/// Jump to the last enabled entry.
pub fn move_last<K>(space: &NavSpace<'_, K>) -> Option<usize> {
    space.last_enabled()
}

/// Clamp a possibly invalid position to the nearest valid target.
///
/// A position produced outside this crate (an override reducer, a stale
/// snapshot) may be out of range or rest on a disabled entry. `sanitize`
/// maps it to the nearest enabled entry, preferring the following one, and
/// to `None` when the sequence has no target at all. Valid positions pass
/// through untouched, so callers can detect clamping by comparing input
/// and output.
pub fn sanitize<K>(space: &NavSpace<'_, K>, position: Option<usize>) -> Option<usize> {
    let candidate = position?;
    if space.is_target(candidate) {
        return Some(candidate);
    }
    if candidate >= space.len() {
        return space.last_enabled();
    }
    next_target_after(space, candidate).or_else(|| prev_target_before(space, candidate))
}

fn next_target_after<K>(space: &NavSpace<'_, K>, anchor: usize) -> Option<usize> {
    space
        .entries()
        .iter()
        .enumerate()
        .skip(anchor.saturating_add(1))
        .find_map(|(i, e)| (!e.disabled).then_some(i))
}

fn prev_target_before<K>(space: &NavSpace<'_, K>, anchor: usize) -> Option<usize> {
    space
        .entries()
        .iter()
        .enumerate()
        .take(anchor)
        .rev()
        .find_map(|(i, e)| (!e.disabled).then_some(i))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn space_of<'a>(entries: &'a [NavEntry<'a, u32>]) -> NavSpace<'a, u32> {
        NavSpace::new(entries)
    }

    #[test]
    fn empty_sequence_is_inert() {
        let entries: [NavEntry<'_, u32>; 0] = [];
        let space = space_of(&entries);

        assert_eq!(move_next(&space, None, Wrap::Cycle), None);
        assert_eq!(move_prev(&space, Some(0), Wrap::Cycle), None);
        assert_eq!(move_first(&space), None);
        assert_eq!(move_last(&space), None);
    }

    #[test]
    fn all_disabled_stays_none_for_any_move() {
        let entries = [
            NavEntry::new(1_u32, "a").disabled(),
            NavEntry::new(2, "b").disabled(),
        ];
        let space = space_of(&entries);

        assert_eq!(move_next(&space, None, Wrap::Cycle), None);
        assert_eq!(move_next(&space, Some(0), Wrap::Clamp), None);
        assert_eq!(move_prev(&space, Some(1), Wrap::Cycle), None);
        assert_eq!(move_first(&space), None);
        assert_eq!(move_last(&space), None);
    }

    #[test]
    fn wrap_cycles_through_every_enabled_index() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b").disabled(),
            NavEntry::new(3, "c"),
            NavEntry::new(4, "d"),
        ];
        let space = space_of(&entries);

        let mut position = None;
        let mut visited = Vec::new();
        for _ in 0..6 {
            position = move_next(&space, position, Wrap::Cycle);
            visited.push(position.unwrap());
        }
        // Two full cycles over the enabled indices, never landing on 1.
        assert_eq!(visited, [0, 2, 3, 0, 2, 3]);
    }

    #[test]
    fn prev_with_wrap_from_first_lands_on_last() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b"),
            NavEntry::new(3, "c"),
        ];
        let space = space_of(&entries);

        let first = move_first(&space);
        assert_eq!(first, Some(0));
        assert_eq!(move_prev(&space, first, Wrap::Cycle), Some(2));
    }

    #[test]
    fn clamp_pins_at_the_edges() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b"),
            NavEntry::new(3, "c").disabled(),
        ];
        let space = space_of(&entries);

        // Forward from the last enabled entry stays put.
        assert_eq!(move_next(&space, Some(1), Wrap::Clamp), Some(1));
        // Backward from the first stays put.
        assert_eq!(move_prev(&space, Some(0), Wrap::Clamp), Some(0));
    }

    #[test]
    fn moves_skip_disabled_in_both_directions() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b").disabled(),
            NavEntry::new(3, "c"),
        ];
        let space = space_of(&entries);

        assert_eq!(move_next(&space, Some(0), Wrap::Cycle), Some(2));
        assert_eq!(move_prev(&space, Some(2), Wrap::Cycle), Some(0));
    }

    #[test]
    fn sanitize_passes_valid_positions_through() {
        let entries = [NavEntry::new(1_u32, "a"), NavEntry::new(2, "b")];
        let space = space_of(&entries);

        assert_eq!(sanitize(&space, None), None);
        assert_eq!(sanitize(&space, Some(1)), Some(1));
    }

    #[test]
    fn sanitize_clamps_out_of_range_to_last_enabled() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b"),
            NavEntry::new(3, "c").disabled(),
        ];
        let space = space_of(&entries);

        assert_eq!(sanitize(&space, Some(17)), Some(1));
    }

    #[test]
    fn sanitize_moves_off_disabled_entries() {
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b").disabled(),
            NavEntry::new(3, "c"),
        ];
        let space = space_of(&entries);

        // Prefers the following target…
        assert_eq!(sanitize(&space, Some(1)), Some(2));

        // …and falls back to the preceding one at the end of the sequence.
        let entries = [
            NavEntry::new(1_u32, "a"),
            NavEntry::new(2, "b").disabled(),
        ];
        let space = space_of(&entries);
        assert_eq!(sanitize(&space, Some(1)), Some(0));
    }

    #[test]
    fn sanitize_yields_none_when_nothing_is_enabled() {
        let entries = [NavEntry::new(1_u32, "a").disabled()];
        let space = space_of(&entries);

        assert_eq!(sanitize(&space, Some(0)), None);
    }

    #[test]
    fn position_of_finds_ids() {
        let entries = [NavEntry::new(7_u32, "a"), NavEntry::new(9, "b")];
        let space = space_of(&entries);

        assert_eq!(space.position_of(&9), Some(1));
        assert_eq!(space.position_of(&8), None);
    }
}
