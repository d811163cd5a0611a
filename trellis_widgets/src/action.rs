// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed set of dispatchable intents.
//!
//! Actions are the only way to mutate widget state. Intents a widget does
//! not understand reduce to the unchanged state; dispatching `MoveNext` at
//! a disclosure is a silent no-op, not an error.
//!
//! Two groups exist beyond the obvious user intents:
//!
//! - `Focus` / `Blur` carry focus transitions into widgets whose behavior
//!   depends on them (combobox open-on-focus, close/commit-on-blur).
//! - `SyncItems` / `ApplyQuery` carry data-source changes: an external
//!   item-sequence change and an asynchronous filter response. They enter
//!   through the same dispatch path as user input so the override layer
//!   observes every mutation source.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_combobox::QueryTicket;

/// A dispatchable intent, generic over the caller's item identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<K> {
    /// Flip a disclosure or modal between open and closed.
    Toggle,
    /// Open a disclosure, modal, or option list.
    Open,
    /// Close. For a combobox this carries Escape semantics: the highlight
    /// clears and the input reverts to the last committed text (unless
    /// configured to keep it). Blur-driven closing goes through
    /// [`Action::Blur`] instead and never reverts.
    Close,
    /// Move the roving position or highlight forward.
    MoveNext,
    /// Move the roving position or highlight backward.
    MovePrev,
    /// Jump to the first enabled entry.
    MoveFirst,
    /// Jump to the last enabled entry.
    MoveLast,
    /// Activate or commit the item with this id.
    Select(K),
    /// Replace the combobox input text.
    SetInput(String),
    /// A typed character for typeahead, with its event timestamp.
    Typeahead {
        /// The typed character.
        ch: char,
        /// Event time in milliseconds; drives the idle-window reset.
        now_ms: u64,
    },
    /// Activate a modal's focus trap (alias of [`Action::Open`] for
    /// modals).
    ActivateTrap,
    /// Deactivate a modal's focus trap (alias of [`Action::Close`] for
    /// modals).
    DeactivateTrap,
    /// The widget's primary element received focus.
    Focus,
    /// Focus left the widget entirely.
    Blur,
    /// The caller's item sequence changed; re-derive filtered state.
    SyncItems,
    /// An asynchronous filter response. Only dispatched by
    /// [`ComboboxWidget::apply_query_results`](crate::ComboboxWidget::apply_query_results)
    /// after staleness has been ruled out.
    ApplyQuery {
        /// Ticket of the query this response answers.
        ticket: QueryTicket,
        /// The resulting item ids, in order.
        ids: Vec<K>,
    },
}
