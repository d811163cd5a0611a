// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal: a disclosure whose open phase traps focus.
//!
//! The widget couples a two-state store (`open`) with a
//! [`FocusTrap`]: opening activates the trap, closing deactivates it and
//! yields the restoration candidates. Because the engine owns no focus
//! side effects, every dispatch returns [`ModalEffects`] describing what
//! the rendering layer should do — move focus into the region, or resolve
//! a [`RestoreChain`] against the live document.
//!
//! The `on_activate`/`on_deactivate` hooks fire exactly at the trap
//! boundary; scroll locking and background inerting hang off them.
//!
//! While open, the host routes Tab/Shift+Tab through
//! [`Modal::handle_tab`] and every focus event through [`Modal::retrap`],
//! which pulls externally caused escapes back into the region.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use trellis_bind::Props;
use trellis_store::{ConfigError, Diagnostic, Store, StoreBuilder};
use trellis_trap::{FocusTrap, RestoreChain, TrapSpace};

use crate::action::Action;

/// Modal state snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModalState {
    /// Whether the dialog is open (and the trap active).
    pub open: bool,
}

fn reduce<K>(state: &ModalState, action: &Action<K>) -> ModalState {
    match action {
        Action::Toggle => ModalState { open: !state.open },
        Action::Open | Action::ActivateTrap => ModalState { open: true },
        Action::Close | Action::DeactivateTrap => ModalState { open: false },
        _ => *state,
    }
}

/// What the rendering layer should do after a modal transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModalEffects<K> {
    /// Move focus to this handle (the trap just activated).
    pub focus: Option<K>,
    /// Resolve this chain and move focus to the result (the trap just
    /// deactivated).
    pub restore: Option<RestoreChain<K>>,
}

impl<K> ModalEffects<K> {
    const NONE: Self = Self {
        focus: None,
        restore: None,
    };
}

/// A headless focus-trapping modal widget.
pub struct Modal<K> {
    store: Store<ModalState, Action<K>>,
    trap: FocusTrap<K>,
    on_activate: Option<Box<dyn FnMut()>>,
    on_deactivate: Option<Box<dyn FnMut()>>,
    id: String,
}

impl<K: core::fmt::Debug> core::fmt::Debug for Modal<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Modal")
            .field("state", self.store.state())
            .field("trap", &self.trap)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> Modal<K> {
    /// An uncontrolled, initially closed modal. `container` is the region
    /// handle, the final restoration fallback; `id` namespaces the
    /// generated element ids.
    pub fn new(id: impl Into<String>, container: K) -> Self {
        Self::builder(id, container)
            .build()
            .expect("uncontrolled default construction cannot fail")
    }

    /// Full configuration surface.
    pub fn builder(id: impl Into<String>, container: K) -> ModalBuilder<K> {
        ModalBuilder {
            store: StoreBuilder::new(reduce::<K>),
            initialized: false,
            id: id.into(),
            trap: FocusTrap::new(container),
            on_activate: None,
            on_deactivate: None,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ModalState {
        *self.store.state()
    }

    /// Returns `true` while the focus trap is active.
    pub fn is_trapping(&self) -> bool {
        self.trap.is_active()
    }

    /// Dispatch an intent.
    ///
    /// `currently_focused` is captured for restoration if this dispatch
    /// activates the trap. The returned effects are what the rendering
    /// layer must apply.
    pub fn dispatch(
        &mut self,
        action: &Action<K>,
        space: &TrapSpace<'_, K>,
        currently_focused: Option<K>,
    ) -> (ModalState, ModalEffects<K>) {
        let next = self.store.dispatch(action);
        let effects = self.reconcile(next.open, space, currently_focused);
        (next, effects)
    }

    /// Controlled write-back path; reconciles the trap with the new open
    /// state and returns the resulting effects.
    pub fn set_external(
        &mut self,
        state: ModalState,
        space: &TrapSpace<'_, K>,
        currently_focused: Option<K>,
    ) -> ModalEffects<K> {
        self.store.set_external(state);
        self.reconcile(state.open, space, currently_focused)
    }

    /// Answer a Tab (`backward == false`) or Shift+Tab press while open.
    pub fn handle_tab(
        &self,
        space: &TrapSpace<'_, K>,
        current: Option<K>,
        backward: bool,
    ) -> Option<K> {
        self.trap.next(space, current, backward)
    }

    /// Correct an externally caused focus escape; call on every focus
    /// event while open.
    pub fn retrap(&self, space: &TrapSpace<'_, K>, focused: Option<K>) -> Option<K> {
        self.trap.retrap(space, focused)
    }

    /// Props for the element that opens the dialog.
    pub fn trigger_props(&self) -> Props<Action<K>> {
        Props::new()
            .attr("aria-haspopup", "dialog")
            .attr("aria-expanded", self.state().open)
            .attr("aria-controls", self.dialog_id())
            .on("click", Action::Open)
    }

    /// Props for the dialog region element.
    pub fn dialog_props(&self) -> Props<Action<K>> {
        let props = Props::new()
            .attr("id", self.dialog_id())
            .attr("role", "dialog")
            .attr("aria-modal", true)
            .on("keydown:Escape", Action::Close);
        if self.state().open {
            props
        } else {
            props.flag("hidden")
        }
    }

    fn dialog_id(&self) -> String {
        format!("{}-dialog", self.id)
    }

    fn reconcile(
        &mut self,
        open: bool,
        space: &TrapSpace<'_, K>,
        currently_focused: Option<K>,
    ) -> ModalEffects<K> {
        if open && !self.trap.is_active() {
            let focus = self.trap.activate(space, currently_focused);
            if let Some(hook) = &mut self.on_activate {
                hook();
            }
            return ModalEffects {
                focus,
                restore: None,
            };
        }
        if !open && self.trap.is_active() {
            let restore = self.trap.deactivate();
            if let Some(hook) = &mut self.on_deactivate {
                hook();
            }
            return ModalEffects {
                focus: None,
                restore,
            };
        }
        ModalEffects::NONE
    }
}

/// Builder for [`Modal`].
pub struct ModalBuilder<K> {
    store: StoreBuilder<ModalState, Action<K>>,
    initialized: bool,
    id: String,
    trap: FocusTrap<K>,
    on_activate: Option<Box<dyn FnMut()>>,
    on_deactivate: Option<Box<dyn FnMut()>>,
}

impl<K: core::fmt::Debug + Copy + Eq> core::fmt::Debug for ModalBuilder<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModalBuilder")
            .field("id", &self.id)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> ModalBuilder<K> {
    /// Explicit initial focus target inside the region.
    #[must_use]
    pub fn initial_focus(mut self, target: Option<K>) -> Self {
        self.trap.set_initial_target(target);
        self
    }

    /// The trigger element, second entry in the restoration chain.
    #[must_use]
    pub fn trigger(mut self, trigger: Option<K>) -> Self {
        self.trap.set_trigger(trigger);
        self
    }

    /// Initial open state for an uncontrolled instance.
    ///
    /// An initially open modal still needs a first dispatch (or
    /// [`Modal::set_external`]) to activate its trap, since activation
    /// must observe the currently focused element.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.store = self.store.default_value(ModalState { open });
        self.initialized = true;
        self
    }

    /// Externally controlled open state.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.store = self.store.value(ModalState { open });
        self.initialized = true;
        self
    }

    /// Hook fired when the trap activates; the scroll-lock boundary.
    #[must_use]
    pub fn on_activate(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(hook));
        self
    }

    /// Hook fired when the trap deactivates.
    #[must_use]
    pub fn on_deactivate(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_deactivate = Some(Box::new(hook));
        self
    }

    /// Listener for committed or proposed state changes.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&ModalState) + 'static) -> Self {
        self.store = self.store.on_change(listener);
        self
    }

    /// Interpose a reducer on every dispatch.
    #[must_use]
    pub fn override_reducer(
        mut self,
        reducer: impl Fn(&ModalState, &Action<K>, &dyn Fn(&ModalState, &Action<K>) -> ModalState) -> ModalState
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
    pub fn build(mut self) -> Result<Modal<K>, ConfigError> {
        if !self.initialized {
            self.store = self.store.default_value(ModalState::default());
        }
        Ok(Modal {
            store: self.store.build()?,
            trap: self.trap,
            on_activate: self.on_activate,
            on_deactivate: self.on_deactivate,
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
    use trellis_trap::{Restore, TrapEntry};

    use super::*;

    fn dialog_entries() -> [TrapEntry<u32>; 3] {
        [TrapEntry::new(10), TrapEntry::new(11), TrapEntry::new(12)]
    }

    #[test]
    fn open_traps_and_close_restores() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::new("settings", 1_u32);

        let (state, effects) = modal.dispatch(&Action::Open, &space, Some(5));
        assert!(state.open);
        assert!(modal.is_trapping());
        assert_eq!(effects.focus, Some(10));

        let (state, effects) = modal.dispatch(&Action::Close, &space, Some(11));
        assert!(!state.open);
        assert!(!modal.is_trapping());
        let chain = effects.restore.unwrap();
        assert_eq!(chain.resolve(|_| true), Restore::Previous(5));
    }

    #[test]
    fn trap_action_aliases_behave_like_open_and_close() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::new("settings", 1_u32);

        let (state, effects) = modal.dispatch(&Action::ActivateTrap, &space, Some(5));
        assert!(state.open && effects.focus.is_some());

        let (state, effects) = modal.dispatch(&Action::DeactivateTrap, &space, None);
        assert!(!state.open && effects.restore.is_some());
    }

    #[test]
    fn reopening_does_not_double_activate() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::new("settings", 1_u32);

        modal.dispatch(&Action::Open, &space, Some(5));
        let (_, effects) = modal.dispatch(&Action::Open, &space, Some(10));
        assert_eq!(effects, ModalEffects::NONE);

        // The original capture survives the redundant open.
        let (_, effects) = modal.dispatch(&Action::Close, &space, None);
        assert_eq!(
            effects.restore.unwrap().resolve(|_| true),
            Restore::Previous(5)
        );
    }

    #[test]
    fn hooks_fire_exactly_at_the_trap_boundary() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let on_open = log.clone();
        let on_close = log.clone();
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::builder("settings", 1_u32)
            .on_activate(move || on_open.borrow_mut().push("lock"))
            .on_deactivate(move || on_close.borrow_mut().push("unlock"))
            .build()
            .unwrap();

        modal.dispatch(&Action::Open, &space, None);
        modal.dispatch(&Action::Open, &space, None);
        modal.dispatch(&Action::Close, &space, None);
        modal.dispatch(&Action::Close, &space, None);

        assert_eq!(log.borrow().as_slice(), &["lock", "unlock"]);
    }

    #[test]
    fn tab_and_retrap_route_through_the_trap() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::builder("settings", 1_u32)
            .initial_focus(Some(11))
            .build()
            .unwrap();

        let (_, effects) = modal.dispatch(&Action::Open, &space, Some(5));
        assert_eq!(effects.focus, Some(11));

        assert_eq!(modal.handle_tab(&space, Some(12), false), Some(10));
        assert_eq!(modal.handle_tab(&space, Some(10), true), Some(12));
        assert_eq!(modal.retrap(&space, Some(99)), Some(11));
        assert_eq!(modal.retrap(&space, Some(12)), None);
    }

    #[test]
    fn restoration_falls_back_when_the_opener_disappears() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::builder("settings", 1_u32)
            .trigger(Some(7))
            .build()
            .unwrap();

        modal.dispatch(&Action::Open, &space, Some(5));
        let (_, effects) = modal.dispatch(&Action::Close, &space, None);
        let chain = effects.restore.unwrap();

        assert_eq!(chain.resolve(|&id| id != 5), Restore::Trigger(7));
    }

    #[test]
    fn dialog_props_track_state() {
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::new("settings", 1_u32);

        let closed = modal.dialog_props();
        assert_eq!(closed.attr_value("hidden"), Some(&AttrValue::Flag));
        assert_eq!(
            closed.attr_value("role"),
            Some(&AttrValue::Str("dialog".into()))
        );

        modal.dispatch(&Action::Open, &space, None);
        assert_eq!(modal.dialog_props().attr_value("hidden"), None);
        assert_eq!(
            modal.trigger_props().attr_value("aria-expanded"),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn controlled_modal_moves_only_through_external_writes() {
        let proposals: Rc<RefCell<Vec<ModalState>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = proposals.clone();
        let entries = dialog_entries();
        let space = TrapSpace::new(&entries);
        let mut modal = Modal::builder("settings", 1_u32)
            .open(false)
            .on_change(move |s: &ModalState| seen.borrow_mut().push(*s))
            .build()
            .unwrap();

        let (state, effects) = modal.dispatch(&Action::Open, &space, Some(5));
        assert!(!state.open, "controlled state must not move");
        assert!(!modal.is_trapping());
        assert_eq!(effects, ModalEffects::NONE);
        assert_eq!(proposals.borrow().as_slice(), &[ModalState { open: true }]);

        // The owner echoes the proposal; now the trap engages.
        let effects = modal.set_external(ModalState { open: true }, &space, Some(5));
        assert!(modal.is_trapping());
        assert_eq!(effects.focus, Some(10));
    }
}
