// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Widgets: headless widget composition over the engine crates.
//!
//! Each widget here owns one reducer [`Store`](trellis_store::Store) and
//! composes the specialized controllers — roving traversal, focus trap,
//! combobox machine — into a complete interaction pattern, exposed through
//! role-scoped prop getters:
//!
//! - [`Disclosure`]: binary show/hide (toggle button, accordion panel).
//! - [`ListNav`]: roving-tabindex list usable as a menu, tab list, or
//!   listbox, with typeahead.
//! - [`ComboboxWidget`]: filtered option list on a text input, with
//!   stale-query sequencing for asynchronous sources.
//! - [`Modal`]: focus-trapped region with restoration and scroll-lock
//!   boundary hooks.
//!
//! ## The action surface
//!
//! State is mutated exclusively by dispatching an [`Action`] — there are
//! no setters. Every dispatch runs through the store's override layer, so
//! a caller can intercept any intent on any widget. Per-event context (the
//! current item snapshot, a resolved typeahead target) is threaded to the
//! reducers as arguments; nothing captures state ambiently.
//!
//! ## Compound ("namespace") widgets
//!
//! A compound pattern like tabs-with-panels is one widget instance whose
//! role getters are bound to different elements: `list.container_props()`
//! on the tab strip, `list.item_props(i)` on each tab. The instance is
//! passed explicitly wherever a role getter is needed; there is no
//! implicit context lookup.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_widgets::{Action, Disclosure};
//!
//! let mut disclosure = Disclosure::<u32>::new("faq-1");
//! assert!(!disclosure.state().open);
//!
//! disclosure.dispatch(&Action::Toggle);
//! assert!(disclosure.state().open);
//!
//! let trigger = disclosure.trigger_props();
//! assert_eq!(trigger.action_for("click"), Some(&Action::Toggle));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod combobox;
pub mod disclosure;
pub mod list;
pub mod modal;

pub use action::Action;
pub use combobox::ComboboxWidget;
pub use disclosure::{Disclosure, DisclosureState};
pub use list::{ListNav, ListState};
pub use modal::{Modal, ModalEffects, ModalState};
