// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Store: a minimal reducer-based state container per widget instance.
//!
//! Each widget instance owns one [`Store`]. The store holds an immutable
//! state snapshot that is replaced wholesale on every transition; the only
//! way to produce a transition is to dispatch an action through a reducer.
//!
//! Three concerns live here:
//!
//! - **Reduction**: a pure default reducer per widget kind maps
//!   `(state, action)` to the next state.
//! - **Override layer**: a caller may interpose its own reducer. The
//!   override receives `(state, action, default_reducer)` and must return a
//!   state; it can delegate to the default for the actions it does not care
//!   about. This allows selective interception ("ignore toggle-off") without
//!   reimplementing the machine.
//! - **Controlled/uncontrolled resolution**: a store constructed with an
//!   external `value` is *controlled* for its whole lifetime. Dispatches on
//!   a controlled store never apply locally; the proposed next state is
//!   forwarded to the `on_change` listener and the external owner writes it
//!   back (or not) via [`Store::set_external`]. A store constructed from
//!   `default_value` is *uncontrolled* and applies dispatches directly.
//!
//! The store performs no widget-semantic validation. An override reducer
//! returning a structurally invalid state (for example an out-of-range
//! index) flows through unchanged; downstream controllers re-validate and
//! clamp defensively, reporting through the [`Diagnostic`] sink.
//!
//! ## Minimal example
//!
//! A disclosure (show/hide) machine:
//!
//! ```rust
//! use trellis_store::StoreBuilder;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Disclosure {
//!     open: bool,
//! }
//!
//! enum Action {
//!     Toggle,
//! }
//!
//! fn reduce(state: &Disclosure, action: &Action) -> Disclosure {
//!     match action {
//!         Action::Toggle => Disclosure { open: !state.open },
//!     }
//! }
//!
//! let mut store = StoreBuilder::new(reduce)
//!     .default_value(Disclosure { open: false })
//!     .build()
//!     .unwrap();
//!
//! store.dispatch(&Action::Toggle);
//! assert!(store.state().open);
//! store.dispatch(&Action::Toggle);
//! assert!(!store.state().open);
//! ```
//!
//! ## Context-dependent reducers
//!
//! Widgets whose transitions depend on per-event context (an item snapshot,
//! a timestamp resolution) dispatch through [`Store::dispatch_with`],
//! passing a default reducer built for that one event. The override layer
//! still sees the raw action and the per-event default, so interception
//! composes with context:
//!
//! ```rust
//! use trellis_store::StoreBuilder;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter(i32);
//!
//! enum Action {
//!     Add,
//! }
//!
//! fn frozen(state: &Counter, _action: &Action) -> Counter {
//!     state.clone()
//! }
//!
//! let mut store = StoreBuilder::new(frozen)
//!     .default_value(Counter(0))
//!     .build()
//!     .unwrap();
//!
//! // Per-event context: the step size arrives with the event.
//! let step = 3;
//! let next = store.dispatch_with(&Action::Add, |s, _| Counter(s.0 + step));
//! assert_eq!(next, Counter(3));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;

pub mod diag;

pub use diag::{ConfigError, Diagnostic, DiagnosticSink};

/// A pure default state-transition function.
///
/// Default reducers must be total: an action that does not apply in the
/// current state returns the state unchanged rather than failing.
pub type DefaultReducer<S, A> = fn(&S, &A) -> S;

/// A caller-supplied reducer interposed on every dispatch.
///
/// The third argument is the default reducer for this dispatch; the
/// override may call it to delegate unhandled actions.
pub type OverrideReducer<S, A> = Box<dyn Fn(&S, &A, &dyn Fn(&S, &A) -> S) -> S>;

/// Listener notified with every committed (uncontrolled) or proposed
/// (controlled) state change.
pub type ChangeListener<S> = Box<dyn FnMut(&S)>;

/// Whether internal or external state is authoritative for an instance.
///
/// The mode is decided at construction and can only ever move from
/// [`ControlMode::Uncontrolled`] to [`ControlMode::Controlled`] (a late
/// switch, which is diagnosed as likely misuse). It never flips back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// Internal state is authoritative; dispatches apply directly.
    Uncontrolled,
    /// External state is authoritative; dispatches only notify.
    Controlled,
}

/// Reducer-based state container for a single widget instance.
///
/// See the [crate docs](crate) for the dispatch and control-mode contract.
pub struct Store<S, A> {
    state: S,
    mode: ControlMode,
    default_reducer: DefaultReducer<S, A>,
    override_reducer: Option<OverrideReducer<S, A>>,
    on_change: Option<ChangeListener<S>>,
    diagnostics: Option<DiagnosticSink>,
}

impl<S: core::fmt::Debug, A> core::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("has_override", &self.override_reducer.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + PartialEq,
{
    /// Current effective state snapshot.
    ///
    /// For controlled stores this is the externally supplied value as of the
    /// last [`Store::set_external`]; for uncontrolled stores it is the last
    /// committed state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The instance's control mode.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Returns `true` if external state is authoritative.
    pub fn is_controlled(&self) -> bool {
        self.mode == ControlMode::Controlled
    }

    /// Dispatch an action through the construction-time default reducer.
    ///
    /// Returns the effective state after the dispatch: the newly committed
    /// state when uncontrolled, the unchanged current state when controlled
    /// (the proposed state having been forwarded to `on_change`).
    pub fn dispatch(&mut self, action: &A) -> S {
        let default = self.default_reducer;
        self.dispatch_with(action, default)
    }

    /// Dispatch an action with a per-event default reducer.
    ///
    /// The override layer, controlled-mode routing, and change notification
    /// behave exactly as in [`Store::dispatch`]; only the default used for
    /// this one event differs. This is how widgets thread per-event context
    /// (item snapshots, resolved typeahead targets) into reduction while the
    /// override still observes the raw action.
    pub fn dispatch_with<F>(&mut self, action: &A, default: F) -> S
    where
        F: Fn(&S, &A) -> S,
    {
        let proposed = match &self.override_reducer {
            Some(interpose) => interpose(&self.state, action, &default),
            None => default(&self.state, action),
        };
        if proposed != self.state {
            if let Some(listener) = &mut self.on_change {
                listener(&proposed);
            }
            if self.mode == ControlMode::Uncontrolled {
                self.state = proposed;
            }
        }
        self.state.clone()
    }

    /// Write back an externally owned state value.
    ///
    /// This is the normal update path for controlled stores. Calling it on
    /// an uncontrolled store permanently switches the instance to controlled
    /// mode and emits [`Diagnostic::LateControlledSwitch`], since mixing a
    /// fixed initial value with later external values usually indicates
    /// misuse.
    ///
    /// No `on_change` notification is emitted: the value came from the
    /// external owner, which already knows it.
    pub fn set_external(&mut self, value: S) {
        if self.mode == ControlMode::Uncontrolled {
            self.mode = ControlMode::Controlled;
            self.diagnose(&Diagnostic::LateControlledSwitch);
        }
        self.state = value;
    }

    /// Forward a diagnostic to the instance's sink, if one is installed.
    ///
    /// Downstream controllers (roving clamp, stale-query drop) report
    /// through the same sink as the store itself.
    pub fn diagnose(&mut self, diagnostic: &Diagnostic) {
        if let Some(sink) = &mut self.diagnostics {
            sink(diagnostic);
        }
    }
}

/// Builder for [`Store`].
///
/// Exactly one of [`StoreBuilder::default_value`] (uncontrolled) or
/// [`StoreBuilder::value`] (controlled) must be supplied; a controlled store
/// additionally requires [`StoreBuilder::on_change`], since without a
/// listener its dispatches would be unobservable.
pub struct StoreBuilder<S, A> {
    default_reducer: DefaultReducer<S, A>,
    override_reducer: Option<OverrideReducer<S, A>>,
    on_change: Option<ChangeListener<S>>,
    diagnostics: Option<DiagnosticSink>,
    default_value: Option<S>,
    value: Option<S>,
}

impl<S: core::fmt::Debug, A> core::fmt::Debug for StoreBuilder<S, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreBuilder")
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<S, A> StoreBuilder<S, A> {
    /// Start a builder around the widget kind's default reducer.
    pub fn new(default_reducer: DefaultReducer<S, A>) -> Self {
        Self {
            default_reducer,
            override_reducer: None,
            on_change: None,
            diagnostics: None,
            default_value: None,
            value: None,
        }
    }

    /// Initial state for an uncontrolled instance.
    pub fn default_value(mut self, state: S) -> Self {
        self.default_value = Some(state);
        self
    }

    /// External state for a controlled instance.
    ///
    /// Supplying this fixes the instance to [`ControlMode::Controlled`] for
    /// its lifetime and requires [`StoreBuilder::on_change`].
    pub fn value(mut self, state: S) -> Self {
        self.value = Some(state);
        self
    }

    /// Interpose a reducer on every dispatch.
    pub fn override_reducer(
        mut self,
        reducer: impl Fn(&S, &A, &dyn Fn(&S, &A) -> S) -> S + 'static,
    ) -> Self {
        self.override_reducer = Some(Box::new(reducer));
        self
    }

    /// Listener for committed (uncontrolled) or proposed (controlled)
    /// state changes.
    pub fn on_change(mut self, listener: impl FnMut(&S) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Sink for non-fatal diagnostics.
    pub fn diagnostics(mut self, sink: impl FnMut(&Diagnostic) + 'static) -> Self {
        self.diagnostics = Some(Box::new(sink));
        self
    }

    /// Build the store.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingInitialValue`] when neither `default_value`
    ///   nor `value` was supplied.
    /// - [`ConfigError::ControlledWithoutOnChange`] when `value` was
    ///   supplied without an `on_change` listener.
    pub fn build(self) -> Result<Store<S, A>, ConfigError> {
        let Self {
            default_reducer,
            override_reducer,
            on_change,
            mut diagnostics,
            default_value,
            value,
        } = self;

        if value.is_some() && on_change.is_none() {
            return Err(ConfigError::ControlledWithoutOnChange);
        }
        if value.is_some()
            && default_value.is_some()
            && let Some(sink) = &mut diagnostics
        {
            sink(&Diagnostic::ConflictingInitialValues);
        }

        let (state, mode) = match (value, default_value) {
            // An external value wins over a default when both are present.
            (Some(external), _) => (external, ControlMode::Controlled),
            (None, Some(initial)) => (initial, ControlMode::Uncontrolled),
            (None, None) => return Err(ConfigError::MissingInitialValue),
        };

        Ok(Store {
            state,
            mode,
            default_reducer,
            override_reducer,
            on_change,
            diagnostics,
        })
    }
}
