// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combobox widget: a filtered option list on a text input.
//!
//! Composes the combobox state machine with a reducer store and exposes
//! the three role getters (`input`, `listbox`, `option`). Input text
//! changes enter as [`Action::SetInput`] — the rendering layer forwards
//! the field's current value; a handler entry cannot carry future text.
//!
//! Asynchronous filtering goes through the query API:
//! [`ComboboxWidget::issue_query`] before each request,
//! [`ComboboxWidget::apply_query_results`] with the response's ticket.
//! Responses for superseded tickets are dropped before they can touch
//! state and reported as [`Diagnostic::StaleQueryDropped`].

use alloc::format;
use alloc::string::String;

use trellis_bind::{Announcer, AnnouncementSink, Priority, Props};
use trellis_combobox::{
    ComboConfig, ComboFlags, ComboboxState, FilterFn, Move, QueryOutcome, QuerySeq, QueryTicket,
};
use trellis_roving::NavSpace;
use trellis_store::{ConfigError, Diagnostic, Store, StoreBuilder};

use crate::action::Action;

/// Context-free fallback reducer; every combobox intent needs the item
/// snapshot, so direct store dispatches change nothing.
fn reduce_inert<K: Clone>(state: &ComboboxState<K>, _action: &Action<K>) -> ComboboxState<K> {
    state.clone()
}

fn reduce_with<K: Clone + PartialEq>(
    state: &ComboboxState<K>,
    action: &Action<K>,
    space: &NavSpace<'_, K>,
    config: &ComboConfig,
) -> ComboboxState<K> {
    match action {
        Action::SetInput(text) => trellis_combobox::set_input(state, text, space, config),
        Action::MoveNext => trellis_combobox::move_highlight(state, Move::Next, space, config),
        Action::MovePrev => trellis_combobox::move_highlight(state, Move::Prev, space, config),
        Action::MoveFirst => trellis_combobox::move_highlight(state, Move::First, space, config),
        Action::MoveLast => trellis_combobox::move_highlight(state, Move::Last, space, config),
        Action::Select(id) => trellis_combobox::select(state, id, space, config),
        Action::Open => trellis_combobox::open(state, space, config),
        // Close carries Escape semantics; blur-driven closing never
        // reverts the input and arrives as `Blur`.
        Action::Close => trellis_combobox::escape(state, config),
        Action::Toggle => {
            if state.open {
                trellis_combobox::escape(state, config)
            } else {
                trellis_combobox::open(state, space, config)
            }
        }
        Action::Focus => trellis_combobox::focus(state, space, config),
        Action::Blur => trellis_combobox::blur(state, space, config),
        Action::SyncItems => trellis_combobox::sync_items(state, space, config),
        Action::ApplyQuery { ids, .. } => trellis_combobox::apply_query(state, ids, space),
        _ => state.clone(),
    }
}

/// A headless combobox/autocomplete widget.
#[derive(Debug)]
pub struct ComboboxWidget<K> {
    store: Store<ComboboxState<K>, Action<K>>,
    config: ComboConfig,
    queries: QuerySeq,
    announcer: Announcer,
    id: String,
}

impl<K: Clone + PartialEq> ComboboxWidget<K> {
    /// An uncontrolled combobox with default behavior flags and the
    /// case-insensitive substring filter. `id` namespaces the generated
    /// element ids.
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id)
            .build()
            .expect("uncontrolled default construction cannot fail")
    }

    /// Full configuration surface.
    pub fn builder(id: impl Into<String>) -> ComboboxBuilder<K> {
        ComboboxBuilder {
            store: StoreBuilder::new(reduce_inert::<K>),
            initialized: false,
            id: id.into(),
            config: ComboConfig::default(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &ComboboxState<K> {
        self.store.state()
    }

    /// The highlighted position, validated against the current filtered
    /// sequence.
    pub fn highlighted(&self) -> Option<usize> {
        let state = self.store.state();
        state.highlighted.filter(|&h| h < state.filtered.len())
    }

    /// Register a subscriber for announcements (result counts).
    pub fn subscribe_announcements(&mut self, sink: impl AnnouncementSink + 'static) {
        self.announcer.subscribe(sink);
    }

    /// Dispatch an intent against the current item snapshot.
    pub fn dispatch(&mut self, action: &Action<K>, space: &NavSpace<'_, K>) -> ComboboxState<K> {
        let config = self.config.clone();
        let next = self
            .store
            .dispatch_with(action, |s, a| reduce_with(s, a, space, &config));

        if let Some(h) = next.highlighted
            && h >= next.filtered.len()
        {
            self.store.diagnose(&Diagnostic::OverrideOutOfRange {
                index: h,
                len: next.filtered.len(),
            });
        }

        if matches!(action, Action::SetInput(_)) && !self.announcer.is_empty() {
            let text = match next.filtered.len() {
                1 => String::from("1 result available"),
                n => format!("{n} results available"),
            };
            self.announcer.announce(&text, Priority::Polite);
        }
        next
    }

    /// Controlled write-back path; see
    /// [`Store::set_external`](trellis_store::Store::set_external).
    pub fn set_external(&mut self, state: ComboboxState<K>) {
        self.store.set_external(state);
    }

    /// Issue a filter query, invalidating all previously issued tickets.
    pub fn issue_query(&mut self) -> QueryTicket {
        self.queries.issue()
    }

    /// Apply an asynchronous filter response.
    ///
    /// A response for a superseded ticket is dropped without touching
    /// state and reported through the diagnostic sink; only the newest
    /// ticket's results are dispatched.
    pub fn apply_query_results(
        &mut self,
        ticket: QueryTicket,
        ids: &[K],
        space: &NavSpace<'_, K>,
    ) -> QueryOutcome {
        match self.queries.accept(ticket) {
            outcome @ QueryOutcome::Stale { issued, newest } => {
                self.store
                    .diagnose(&Diagnostic::StaleQueryDropped { issued, newest });
                outcome
            }
            QueryOutcome::Fresh => {
                self.dispatch(
                    &Action::ApplyQuery {
                        ticket,
                        ids: ids.to_vec(),
                    },
                    space,
                );
                QueryOutcome::Fresh
            }
        }
    }

    /// Props for the text input element.
    pub fn input_props(&self) -> Props<Action<K>> {
        let state = self.store.state();
        let mut props = Props::new()
            .attr("id", format!("{}-input", self.id))
            .attr("role", "combobox")
            .attr("aria-expanded", state.open)
            .attr("aria-autocomplete", "list")
            .attr("aria-haspopup", "listbox")
            .attr("aria-controls", self.listbox_id())
            .on("keydown:ArrowDown", Action::MoveNext)
            .on("keydown:ArrowUp", Action::MovePrev)
            .on("keydown:Escape", Action::Close)
            .on("focus", Action::Focus)
            .on("blur", Action::Blur);
        if let Some(h) = self.highlighted() {
            props = props.attr(
                "aria-activedescendant",
                format!("{}-option-{h}", self.id),
            );
            if let Some(item) = state.filtered.get(h) {
                props = props.on("keydown:Enter", Action::Select(item.clone()));
            }
        }
        props
    }

    /// Props for the popup listbox element.
    pub fn listbox_props(&self) -> Props<Action<K>> {
        let props = Props::new()
            .attr("id", self.listbox_id())
            .attr("role", "listbox");
        if self.store.state().open {
            props
        } else {
            props.flag("hidden")
        }
    }

    /// Props for the option at `index` in the *filtered* sequence.
    pub fn option_props(&self, space: &NavSpace<'_, K>, index: usize) -> Props<Action<K>> {
        let state = self.store.state();
        let mut props = Props::new()
            .attr("id", format!("{}-option-{index}", self.id))
            .attr("role", "option");
        let Some(item) = state.filtered.get(index) else {
            return props;
        };
        props = props.attr("aria-selected", self.highlighted() == Some(index));
        match space.position_of(item) {
            Some(position) if space.is_target(position) => {
                props.on("click", Action::Select(item.clone()))
            }
            Some(_) => props.attr("aria-disabled", true),
            None => props,
        }
    }

    fn listbox_id(&self) -> String {
        format!("{}-listbox", self.id)
    }
}

/// Builder for [`ComboboxWidget`].
#[derive(Debug)]
pub struct ComboboxBuilder<K> {
    store: StoreBuilder<ComboboxState<K>, Action<K>>,
    initialized: bool,
    id: String,
    config: ComboConfig,
}

impl<K: Clone> ComboboxBuilder<K> {
    /// Behavior flags; see [`ComboFlags`].
    #[must_use]
    pub fn flags(mut self, flags: ComboFlags) -> Self {
        self.config.flags = flags;
        self
    }

    /// Item filter predicate, replacing the substring default.
    #[must_use]
    pub fn filter(mut self, filter: FilterFn) -> Self {
        self.config.filter = filter;
        self
    }

    /// Initial state for an uncontrolled instance.
    #[must_use]
    pub fn default_state(mut self, state: ComboboxState<K>) -> Self {
        self.store = self.store.default_value(state);
        self.initialized = true;
        self
    }

    /// Externally controlled state.
    #[must_use]
    pub fn value(mut self, state: ComboboxState<K>) -> Self {
        self.store = self.store.value(state);
        self.initialized = true;
        self
    }

    /// Listener for committed or proposed state changes.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&ComboboxState<K>) + 'static) -> Self {
        self.store = self.store.on_change(listener);
        self
    }

    /// Interpose a reducer on every dispatch.
    #[must_use]
    pub fn override_reducer(
        mut self,
        reducer: impl Fn(
                &ComboboxState<K>,
                &Action<K>,
                &dyn Fn(&ComboboxState<K>, &Action<K>) -> ComboboxState<K>,
            ) -> ComboboxState<K>
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
    /// Propagates the store's [`ConfigError`]s; a controlled `value`
    /// still requires `on_change`.
    pub fn build(mut self) -> Result<ComboboxWidget<K>, ConfigError> {
        if !self.initialized {
            self.store = self.store.default_value(ComboboxState::new());
        }
        Ok(ComboboxWidget {
            store: self.store.build()?,
            config: self.config,
            queries: QuerySeq::new(),
            announcer: Announcer::new(),
            id: self.id,
        })
    }
}
