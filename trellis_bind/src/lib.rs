// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Bind: the declarative contract between widget state and a
//! rendering layer.
//!
//! A prop getter is a pure function from a widget's current state to a
//! [`Props`] value: a set of attributes to put on an element plus a set of
//! handlers binding event names to the action each event should dispatch.
//! Getters perform no side effects and are idempotent — equal states
//! produce equal prop sets (content equality, not identity), so a
//! rendering layer may diff successive outputs.
//!
//! Handlers are *data*, not closures: an entry like
//! `("keydown:ArrowDown", Action::MoveNext)` tells the host which action
//! to dispatch when that event fires. The host dispatches against the
//! widget, which always reduces over its latest state — no captured,
//! potentially stale state is involved anywhere.
//!
//! Event names follow a small convention: plain DOM-ish event names
//! (`"click"`, `"focus"`, `"blur"`, `"input"`) and `"keydown:<Key>"` with
//! the key's `KeyboardEvent.key` value (`"keydown:Enter"`,
//! `"keydown:ArrowDown"`, with `"Space"` spelled out for readability).
//!
//! ```rust
//! use trellis_bind::{AttrValue, Props};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Action {
//!     Toggle,
//! }
//!
//! let expanded = true;
//! let props = Props::new()
//!     .attr("aria-expanded", expanded)
//!     .attr("aria-controls", "menu-1")
//!     .on("click", Action::Toggle)
//!     .on("keydown:Enter", Action::Toggle);
//!
//! assert_eq!(props.attr_value("aria-expanded"), Some(&AttrValue::Bool(true)));
//! assert_eq!(props.action_for("click"), Some(&Action::Toggle));
//! ```
//!
//! The [`announce`] module carries the one side-channel the engine owns:
//! a text/priority pair fanned out to externally registered sinks.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;

pub mod announce;

pub use announce::{Announcer, AnnouncementSink, Priority};

/// An attribute value, as a rendering layer would serialize it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrValue {
    /// `"true"` / `"false"` attributes such as `aria-expanded`.
    Bool(bool),
    /// Numeric attributes such as `tabindex`.
    Int(i64),
    /// String attributes such as `role` or id references.
    Str(String),
    /// Valueless presence attributes such as `hidden`.
    Flag,
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A ready-to-bind set of attributes and event-to-action handlers.
///
/// Fully determined by the state it was derived from; carries no identity
/// and no behavior of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Props<A> {
    attrs: HashMap<&'static str, AttrValue>,
    handlers: HashMap<&'static str, A>,
}

impl<A> Props<A> {
    /// An empty prop set.
    pub fn new() -> Self {
        Self {
            attrs: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    /// Add a valueless presence attribute (for example `hidden`).
    #[must_use]
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.insert(name, AttrValue::Flag);
        self
    }

    /// Bind an event name to the action it should dispatch.
    #[must_use]
    pub fn on(mut self, event: &'static str, action: A) -> Self {
        self.handlers.insert(event, action);
        self
    }

    /// All attributes.
    pub fn attrs(&self) -> &HashMap<&'static str, AttrValue> {
        &self.attrs
    }

    /// All handlers.
    pub fn handlers(&self) -> &HashMap<&'static str, A> {
        &self.handlers
    }

    /// The value of one attribute, if present.
    pub fn attr_value(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// The action bound to one event name, if any.
    pub fn action_for(&self, event: &str) -> Option<&A> {
        self.handlers.get(event)
    }
}

impl<A> Default for Props<A> {
    fn default() -> Self {
        Self::new()
    }
}
