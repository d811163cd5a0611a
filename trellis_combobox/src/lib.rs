// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Combobox: the state machine behind a filtered, keyboard-driven
//! option list attached to a text input.
//!
//! The machine is two-phased, `Closed` and `Open`, with an optional
//! highlight while open. Its state snapshot ([`ComboboxState`]) holds the
//! interaction-relevant fields only: open flag, current input text, the
//! highlighted position, the committed selection, and the ids of the
//! currently filtered items. Item content stays with the caller; every
//! transition receives a fresh [`NavSpace`] snapshot of the full item
//! sequence and a [`ComboConfig`] describing filtering and behavior flags.
//!
//! Transitions are free functions from `&state` to a new state, replaced
//! wholesale, so they compose directly with a reducer store:
//!
//! - [`set_input`] re-filters, opens, and resets the highlight (to the
//!   first match under [`ComboFlags::HIGHLIGHT_FIRST`], else to none).
//! - [`move_highlight`] reuses roving-tabindex semantics over the filtered
//!   sequence; unlike a roving list it clamps at the ends by default
//!   ([`ComboFlags::WRAP`] opts into cycling). An arrow press on a closed
//!   list opens it without moving the highlight.
//! - [`select`] / [`select_highlighted`] commit: the selection id is
//!   recorded, the input and committed text become the item's match text,
//!   and the list closes.
//! - [`escape`] closes and reverts the input to the last committed text
//!   (the empty string when nothing was ever committed), unless
//!   [`ComboFlags::KEEP_INPUT_ON_ESCAPE`] is set.
//! - [`focus`] / [`blur`] honor [`ComboFlags::OPEN_ON_FOCUS`],
//!   [`ComboFlags::CLOSE_ON_BLUR`], and [`ComboFlags::COMMIT_ON_BLUR`].
//! - [`sync_items`] re-filters after the caller's item sequence changed,
//!   remapping the highlight to the highlighted item's new position or
//!   dropping it — the highlight is always `None` or a valid index into
//!   the *current* filtered sequence.
//!
//! When filtering is backed by an asynchronous source, responses can
//! arrive out of order. The [`query`] module issues monotonically numbered
//! tickets; only the most recently issued ticket is accepted, and
//! [`apply_query`] with a superseded ticket's results must simply not be
//! called (the widget layer guards this and reports the drop). See
//! [`query::QuerySeq`].
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_combobox::{ComboConfig, ComboboxState, Move};
//! use trellis_roving::{NavEntry, NavSpace};
//!
//! let entries = [
//!     NavEntry::new(1_u32, "Apple"),
//!     NavEntry::new(2, "Banana"),
//!     NavEntry::new(3, "Cherry"),
//! ];
//! let space = NavSpace::new(&entries);
//! let config = ComboConfig::default();
//!
//! let state = ComboboxState::new();
//! let state = trellis_combobox::set_input(&state, "an", &space, &config);
//! assert!(state.open);
//! assert_eq!(state.filtered, vec![2]);
//! assert_eq!(state.highlighted, None);
//!
//! let state = trellis_combobox::move_highlight(&state, Move::Next, &space, &config);
//! assert_eq!(state.highlighted, Some(0));
//!
//! let state = trellis_combobox::select_highlighted(&state, &space, &config);
//! assert!(!state.open);
//! assert_eq!(state.input, "Banana");
//! assert_eq!(state.selected, Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;
use trellis_roving::{NavEntry, NavSpace, Wrap};

pub mod query;

pub use query::{QueryOutcome, QuerySeq, QueryTicket};

bitflags::bitflags! {
    /// Behavior flags fixed at widget construction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ComboFlags: u8 {
        /// Highlight movement wraps at the ends of the filtered sequence.
        /// Off by default: autocomplete lists conventionally clamp.
        const WRAP = 0b0000_0001;
        /// Receiving input focus opens the list.
        const OPEN_ON_FOCUS = 0b0000_0010;
        /// Losing focus outside the widget closes the list without commit.
        const CLOSE_ON_BLUR = 0b0000_0100;
        /// Losing focus commits the highlighted item, if any.
        const COMMIT_ON_BLUR = 0b0000_1000;
        /// Escape keeps the in-progress input instead of reverting to the
        /// last committed text.
        const KEEP_INPUT_ON_ESCAPE = 0b0001_0000;
        /// Re-filtering highlights the first match instead of nothing.
        const HIGHLIGHT_FIRST = 0b0010_0000;
    }
}

impl Default for ComboFlags {
    fn default() -> Self {
        Self::CLOSE_ON_BLUR
    }
}

/// Predicate deciding whether an item (by match text) survives filtering
/// for the given input text.
pub type FilterFn = fn(&str, &str) -> bool;

/// The default filter: case-insensitive substring containment. An empty
/// input keeps everything.
pub fn substring_filter(match_text: &str, input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    let haystack: String = match_text.chars().flat_map(char::to_lowercase).collect();
    let needle: String = input.chars().flat_map(char::to_lowercase).collect();
    haystack.contains(needle.as_str())
}

/// Filtering and behavior configuration, fixed at construction.
#[derive(Clone, Debug)]
pub struct ComboConfig {
    /// Behavior flags.
    pub flags: ComboFlags,
    /// Item filter predicate.
    pub filter: FilterFn,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            flags: ComboFlags::default(),
            filter: substring_filter,
        }
    }
}

/// Immutable combobox state snapshot, replaced wholesale on each
/// transition.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboboxState<K> {
    /// Whether the option list is open.
    pub open: bool,
    /// Current input text, committed or in progress.
    pub input: String,
    /// Highlighted position within [`ComboboxState::filtered`].
    pub highlighted: Option<usize>,
    /// Id of the committed selection, if any.
    pub selected: Option<K>,
    /// Display text of the committed selection; the empty string when
    /// nothing was ever committed. Escape reverts the input to this.
    pub committed_text: String,
    /// Ids of the currently filtered items, in sequence order.
    pub filtered: Vec<K>,
}

impl<K> ComboboxState<K> {
    /// Closed, empty state: no input, no selection, nothing filtered.
    pub fn new() -> Self {
        Self {
            open: false,
            input: String::new(),
            highlighted: None,
            selected: None,
            committed_text: String::new(),
            filtered: Vec::new(),
        }
    }
}

impl<K> Default for ComboboxState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Highlight movement intents, resolved with roving semantics over the
/// filtered sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Arrow down.
    Next,
    /// Arrow up.
    Prev,
    /// Home.
    First,
    /// End.
    Last,
}

/// Change the input text: re-filter, open, reset the highlight.
pub fn set_input<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    text: &str,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    let filtered = filtered_ids(space, text, config);
    let highlighted = initial_highlight(&filtered, space, config);
    ComboboxState {
        open: true,
        input: text.to_string(),
        highlighted,
        filtered,
        ..state.clone()
    }
}

/// Open the list without changing the input.
pub fn open<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    if state.open {
        return state.clone();
    }
    let filtered = filtered_ids(space, &state.input, config);
    let highlighted = initial_highlight(&filtered, space, config);
    ComboboxState {
        open: true,
        highlighted,
        filtered,
        ..state.clone()
    }
}

/// Close the list without committing.
pub fn close<K: Clone>(state: &ComboboxState<K>) -> ComboboxState<K> {
    ComboboxState {
        open: false,
        highlighted: None,
        ..state.clone()
    }
}

/// Move the highlight over the filtered sequence.
///
/// On a closed list the first press only opens it; the highlight starts
/// moving from the next press.
pub fn move_highlight<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    intent: Move,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    if !state.open {
        return open(state, space, config);
    }
    let view = nav_view(&state.filtered, space);
    let vspace = NavSpace::new(&view);
    let wrap = if config.flags.contains(ComboFlags::WRAP) {
        Wrap::Cycle
    } else {
        Wrap::Clamp
    };
    let highlighted = match intent {
        Move::Next => trellis_roving::move_next(&vspace, state.highlighted, wrap),
        Move::Prev => trellis_roving::move_prev(&vspace, state.highlighted, wrap),
        Move::First => trellis_roving::move_first(&vspace),
        Move::Last => trellis_roving::move_last(&vspace),
    };
    ComboboxState {
        highlighted,
        ..state.clone()
    }
}

/// Commit the item with the given id.
///
/// A missing or disabled id leaves the state unchanged.
pub fn select<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    id: &K,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    let Some(position) = space.position_of(id) else {
        return state.clone();
    };
    if !space.is_target(position) {
        return state.clone();
    }
    let text = space.entries()[position].match_text;
    ComboboxState {
        open: false,
        input: text.to_string(),
        highlighted: None,
        selected: Some(id.clone()),
        committed_text: text.to_string(),
        filtered: filtered_ids(space, text, config),
    }
}

/// Commit the highlighted item, if there is one.
pub fn select_highlighted<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    match state.highlighted.and_then(|h| state.filtered.get(h)) {
        Some(id) => select(state, &id.clone(), space, config),
        None => state.clone(),
    }
}

/// Escape: close, clear the highlight, revert the input to the last
/// committed text unless configured to keep it.
pub fn escape<K: Clone>(state: &ComboboxState<K>, config: &ComboConfig) -> ComboboxState<K> {
    let input = if config.flags.contains(ComboFlags::KEEP_INPUT_ON_ESCAPE) {
        state.input.clone()
    } else {
        state.committed_text.clone()
    };
    ComboboxState {
        open: false,
        highlighted: None,
        input,
        ..state.clone()
    }
}

/// The input received focus.
pub fn focus<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    if config.flags.contains(ComboFlags::OPEN_ON_FOCUS) {
        open(state, space, config)
    } else {
        state.clone()
    }
}

/// Focus left the widget.
pub fn blur<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    if !state.open {
        return state.clone();
    }
    if config.flags.contains(ComboFlags::COMMIT_ON_BLUR)
        && state.highlighted.is_some()
    {
        return select_highlighted(state, space, config);
    }
    if config.flags.contains(ComboFlags::CLOSE_ON_BLUR) {
        return close(state);
    }
    state.clone()
}

/// Re-filter after the caller's item sequence changed.
///
/// The highlight follows its item to the item's new filtered position and
/// is dropped when the item left the sequence (or became disabled).
pub fn sync_items<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    let filtered = filtered_ids(space, &state.input, config);
    let highlighted = remap_highlight(state, &filtered, space);
    ComboboxState {
        filtered,
        highlighted,
        ..state.clone()
    }
}

/// Replace the filtered sequence with an asynchronous query's results.
///
/// Callers must only pass results whose ticket was accepted as fresh by
/// [`QuerySeq::accept`]; stale results are dropped before reaching state.
/// Ids unknown to the current item snapshot are kept (the snapshot may
/// trail the source), they are just never highlightable.
pub fn apply_query<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    ids: &[K],
    space: &NavSpace<'_, K>,
) -> ComboboxState<K> {
    let filtered: Vec<K> = ids.to_vec();
    let highlighted = remap_highlight(state, &filtered, space);
    ComboboxState {
        filtered,
        highlighted,
        ..state.clone()
    }
}

fn filtered_ids<K: Clone>(
    space: &NavSpace<'_, K>,
    input: &str,
    config: &ComboConfig,
) -> Vec<K> {
    space
        .entries()
        .iter()
        .filter(|e| (config.filter)(e.match_text, input))
        .map(|e| e.id.clone())
        .collect()
}

/// Roving view over the filtered ids, aligned index-for-index with
/// `filtered`. Ids missing from the snapshot become disabled placeholders
/// so positions stay stable.
fn nav_view<'a, K: Clone + PartialEq>(
    filtered: &[K],
    space: &NavSpace<'a, K>,
) -> SmallVec<[NavEntry<'a, K>; 8]> {
    filtered
        .iter()
        .map(|id| match space.position_of(id) {
            Some(position) => {
                let entry = &space.entries()[position];
                NavEntry {
                    id: id.clone(),
                    disabled: entry.disabled,
                    match_text: entry.match_text,
                }
            }
            None => NavEntry {
                id: id.clone(),
                disabled: true,
                match_text: "",
            },
        })
        .collect()
}

fn initial_highlight<K: Clone + PartialEq>(
    filtered: &[K],
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> Option<usize> {
    if !config.flags.contains(ComboFlags::HIGHLIGHT_FIRST) {
        return None;
    }
    let view = nav_view(filtered, space);
    trellis_roving::move_first(&NavSpace::new(&view))
}

fn remap_highlight<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    filtered: &[K],
    space: &NavSpace<'_, K>,
) -> Option<usize> {
    let id = state.highlighted.and_then(|h| state.filtered.get(h))?;
    let position = filtered.iter().position(|x| x == id)?;
    let view = nav_view(filtered, space);
    NavSpace::new(&view).is_target(position).then_some(position)
}
