// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure: binary show/hide.
//!
//! The smallest widget, and the reference shape for the others: a state
//! snapshot, a pure context-free reducer, and two role getters (trigger
//! and panel) sharing one store.

use alloc::format;
use alloc::string::String;

use trellis_bind::Props;
use trellis_store::{ConfigError, Diagnostic, Store, StoreBuilder};

use crate::action::Action;

/// Disclosure state snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisclosureState {
    /// Whether the panel is shown.
    pub open: bool,
}

fn reduce<K>(state: &DisclosureState, action: &Action<K>) -> DisclosureState {
    match action {
        Action::Toggle => DisclosureState { open: !state.open },
        Action::Open => DisclosureState { open: true },
        Action::Close => DisclosureState { open: false },
        _ => *state,
    }
}

/// A headless disclosure widget.
#[derive(Debug)]
pub struct Disclosure<K = ()> {
    store: Store<DisclosureState, Action<K>>,
    id: String,
}

impl<K> Disclosure<K> {
    /// An uncontrolled disclosure, initially closed. `id` namespaces the
    /// generated element ids.
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id)
            .build()
            .expect("uncontrolled default construction cannot fail")
    }

    /// Full configuration surface.
    pub fn builder(id: impl Into<String>) -> DisclosureBuilder<K> {
        DisclosureBuilder {
            store: StoreBuilder::new(reduce::<K>),
            initialized: false,
            id: id.into(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> DisclosureState {
        *self.store.state()
    }

    /// Dispatch an intent; returns the effective state afterwards.
    pub fn dispatch(&mut self, action: &Action<K>) -> DisclosureState {
        self.store.dispatch(action)
    }

    /// Controlled write-back path; see
    /// [`Store::set_external`](trellis_store::Store::set_external).
    pub fn set_external(&mut self, state: DisclosureState) {
        self.store.set_external(state);
    }

    /// Props for the toggle trigger element.
    pub fn trigger_props(&self) -> Props<Action<K>>
    where
        K: Clone,
    {
        Props::new()
            .attr("aria-expanded", self.state().open)
            .attr("aria-controls", self.panel_id())
            .on("click", Action::Toggle)
            .on("keydown:Enter", Action::Toggle)
            .on("keydown:Space", Action::Toggle)
    }

    /// Props for the disclosed panel element.
    pub fn panel_props(&self) -> Props<Action<K>>
    where
        K: Clone,
    {
        let props = Props::new()
            .attr("id", self.panel_id())
            .attr("role", "region");
        if self.state().open {
            props
        } else {
            props.flag("hidden")
        }
    }

    fn panel_id(&self) -> String {
        format!("{}-panel", self.id)
    }
}

/// Builder for [`Disclosure`].
#[derive(Debug)]
pub struct DisclosureBuilder<K> {
    store: StoreBuilder<DisclosureState, Action<K>>,
    initialized: bool,
    id: String,
}

impl<K> DisclosureBuilder<K> {
    /// Initial open state for an uncontrolled instance.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.store = self.store.default_value(DisclosureState { open });
        self.initialized = true;
        self
    }

    /// Externally controlled open state.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.store = self.store.value(DisclosureState { open });
        self.initialized = true;
        self
    }

    /// Listener for committed or proposed state changes.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&DisclosureState) + 'static) -> Self {
        self.store = self.store.on_change(listener);
        self
    }

    /// Interpose a reducer on every dispatch.
    #[must_use]
    pub fn override_reducer(
        mut self,
        reducer: impl Fn(
                &DisclosureState,
                &Action<K>,
                &dyn Fn(&DisclosureState, &Action<K>) -> DisclosureState,
            ) -> DisclosureState
            + 'static,
    ) -> Self {
        self.store = self.store.override_reducer(reducer);
        self
    }

    /// Sink for non-fatal diagnostics.
    #[must_use]
    pub fn diagnostics(mut self, sink: impl FnMut(&Diagnostic) + 'static) -> Self {
        self.store = self.store.diagnostics(sink);
        self
    }

    /// Build the widget.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`ConfigError`]s; a controlled `open` still
    /// requires `on_change`.
    pub fn build(mut self) -> Result<Disclosure<K>, ConfigError> {
        if !self.initialized {
            self.store = self.store.default_value(DisclosureState::default());
        }
        Ok(Disclosure {
            store: self.store.build()?,
            id: self.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use trellis_bind::AttrValue;

    use super::*;

    #[test]
    fn toggle_toggles_and_back() {
        let mut disclosure = Disclosure::<u32>::new("faq");

        assert_eq!(
            disclosure.dispatch(&Action::Toggle),
            DisclosureState { open: true }
        );
        assert_eq!(
            disclosure.dispatch(&Action::Toggle),
            DisclosureState { open: false }
        );
    }

    #[test]
    fn irrelevant_intents_are_silent_no_ops() {
        let mut disclosure = Disclosure::<u32>::new("faq");
        disclosure.dispatch(&Action::MoveNext);
        disclosure.dispatch(&Action::Select(3));
        assert!(!disclosure.state().open);
    }

    #[test]
    fn trigger_props_track_state() {
        let mut disclosure = Disclosure::<u32>::new("faq");

        let closed = disclosure.trigger_props();
        assert_eq!(
            closed.attr_value("aria-expanded"),
            Some(&AttrValue::Bool(false))
        );
        assert_eq!(
            closed.attr_value("aria-controls"),
            Some(&AttrValue::Str("faq-panel".into()))
        );

        disclosure.dispatch(&Action::Open);
        let open = disclosure.trigger_props();
        assert_eq!(
            open.attr_value("aria-expanded"),
            Some(&AttrValue::Bool(true))
        );
        // Same state, same props.
        assert_eq!(open, disclosure.trigger_props());
    }

    #[test]
    fn panel_is_hidden_only_while_closed() {
        let mut disclosure = Disclosure::<u32>::new("faq");
        assert_eq!(
            disclosure.panel_props().attr_value("hidden"),
            Some(&AttrValue::Flag)
        );

        disclosure.dispatch(&Action::Open);
        assert_eq!(disclosure.panel_props().attr_value("hidden"), None);
    }

    #[test]
    fn controlled_disclosure_proposes_instead_of_applying() {
        let proposals: Rc<RefCell<Vec<DisclosureState>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = proposals.clone();
        let mut disclosure = Disclosure::<u32>::builder("faq")
            .open(false)
            .on_change(move |s: &DisclosureState| seen.borrow_mut().push(*s))
            .build()
            .unwrap();

        disclosure.dispatch(&Action::Toggle);
        assert!(!disclosure.state().open, "controlled state must not move");
        assert_eq!(
            proposals.borrow().as_slice(),
            &[DisclosureState { open: true }]
        );

        disclosure.set_external(DisclosureState { open: true });
        assert!(disclosure.state().open);
    }

    #[test]
    fn override_can_pin_the_panel_open() {
        let mut disclosure = Disclosure::<u32>::builder("faq")
            .default_open(true)
            .override_reducer(|state, action, default| {
                let next = default(state, action);
                if state.open && !next.open {
                    *state
                } else {
                    next
                }
            })
            .build()
            .unwrap();

        disclosure.dispatch(&Action::Close);
        disclosure.dispatch(&Action::Toggle);
        assert!(disclosure.state().open);
    }
}
