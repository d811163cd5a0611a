// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving-tabindex list: menus, tab strips, listboxes.
//!
//! The container is the widget's single tab stop; arrow keys move one
//! internal position over the caller's item snapshot, skipping disabled
//! items, with typeahead over the item labels. The rendered pattern is
//! selected by the container `role` ("listbox", "menu", "tablist"), which
//! only affects the emitted attributes, never the state machine.
//!
//! Every dispatch receives the current item snapshot; the widget holds no
//! item state of its own, only the active position. When an override
//! reducer produces a position the snapshot cannot honor, reads clamp it
//! to the nearest valid target and the dispatch reports
//! [`Diagnostic::OverrideOutOfRange`].

use alloc::format;
use alloc::string::String;

use trellis_bind::Props;
use trellis_roving::{NavSpace, TypeaheadBuffer, Wrap, typeahead};
use trellis_store::{ConfigError, Diagnostic, Store, StoreBuilder};

use crate::action::Action;

/// Roving list state snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListState {
    /// Position owning primary focus, or `None` when the list is empty or
    /// fully disabled.
    pub active: Option<usize>,
}

/// Context-free fallback reducer; every list intent needs the snapshot,
/// so direct store dispatches change nothing.
fn reduce_inert<K>(state: &ListState, _action: &Action<K>) -> ListState {
    *state
}

fn reduce_with<K: PartialEq>(
    state: &ListState,
    action: &Action<K>,
    space: &NavSpace<'_, K>,
    wrap: Wrap,
    typeahead_target: Option<usize>,
) -> ListState {
    let active = match action {
        Action::MoveNext => trellis_roving::move_next(space, state.active, wrap),
        Action::MovePrev => trellis_roving::move_prev(space, state.active, wrap),
        Action::MoveFirst => trellis_roving::move_first(space),
        Action::MoveLast => trellis_roving::move_last(space),
        Action::Select(id) => match space.position_of(id) {
            Some(position) if space.is_target(position) => Some(position),
            _ => state.active,
        },
        Action::Typeahead { .. } => typeahead_target.or(state.active),
        Action::SyncItems => trellis_roving::sanitize(space, state.active),
        _ => state.active,
    };
    ListState { active }
}

/// A headless roving-tabindex list widget.
#[derive(Debug)]
pub struct ListNav<K> {
    store: Store<ListState, Action<K>>,
    typeahead: TypeaheadBuffer,
    wrap: Wrap,
    role: &'static str,
    id: String,
}

impl<K: Clone + PartialEq> ListNav<K> {
    /// An uncontrolled list with wrap-around, listbox roles, and the
    /// default typeahead window. `id` namespaces the generated element
    /// ids.
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id)
            .build()
            .expect("uncontrolled default construction cannot fail")
    }

    /// Full configuration surface.
    pub fn builder(id: impl Into<String>) -> ListNavBuilder<K> {
        ListNavBuilder {
            store: StoreBuilder::new(reduce_inert::<K>),
            initialized: false,
            id: id.into(),
            wrap: Wrap::Cycle,
            role: "listbox",
            typeahead_timeout_ms: typeahead::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Raw state snapshot, as last reduced.
    pub fn state(&self) -> ListState {
        *self.store.state()
    }

    /// The active position, clamped against the given snapshot.
    pub fn active(&self, space: &NavSpace<'_, K>) -> Option<usize> {
        trellis_roving::sanitize(space, self.store.state().active)
    }

    /// Dispatch an intent against the current item snapshot.
    ///
    /// Returns the effective state with the active position clamped; any
    /// non-[`Action::Typeahead`] intent clears the typeahead buffer.
    pub fn dispatch(&mut self, action: &Action<K>, space: &NavSpace<'_, K>) -> ListState {
        let typeahead_target = match action {
            Action::Typeahead { ch, now_ms } => {
                let from = trellis_roving::sanitize(space, self.store.state().active);
                self.typeahead.push(*ch, *now_ms, space, from)
            }
            _ => {
                self.typeahead.reset();
                None
            }
        };
        let wrap = self.wrap;
        let next = self.store.dispatch_with(action, |s, a| {
            reduce_with(s, a, space, wrap, typeahead_target)
        });

        let clamped = trellis_roving::sanitize(space, next.active);
        if clamped != next.active
            && let Some(index) = next.active
        {
            self.store.diagnose(&Diagnostic::OverrideOutOfRange {
                index,
                len: space.len(),
            });
        }
        ListState { active: clamped }
    }

    /// Controlled write-back path; see
    /// [`Store::set_external`](trellis_store::Store::set_external).
    pub fn set_external(&mut self, state: ListState) {
        self.store.set_external(state);
    }

    /// Props for the container element: the single tab stop.
    pub fn container_props(&self) -> Props<Action<K>> {
        Props::new()
            .attr("id", self.id.clone())
            .attr("role", self.role)
            .attr("tabindex", 0_i64)
            .on("keydown:ArrowDown", Action::MoveNext)
            .on("keydown:ArrowUp", Action::MovePrev)
            .on("keydown:ArrowRight", Action::MoveNext)
            .on("keydown:ArrowLeft", Action::MovePrev)
            .on("keydown:Home", Action::MoveFirst)
            .on("keydown:End", Action::MoveLast)
    }

    /// Props for the item at `index` in the snapshot.
    ///
    /// Exactly the active item carries `tabindex` 0; all others are
    /// reachable only through the roving position.
    pub fn item_props(&self, space: &NavSpace<'_, K>, index: usize) -> Props<Action<K>> {
        let active = self.active(space);
        let is_active = active == Some(index);
        let mut props = Props::new()
            .attr("id", format!("{}-item-{index}", self.id))
            .attr("role", item_role(self.role))
            .attr("tabindex", if is_active { 0_i64 } else { -1_i64 });
        if item_role(self.role) != "menuitem" {
            props = props.attr("aria-selected", is_active);
        }
        match space.entry(index) {
            Some(entry) if !entry.disabled => {
                props.on("click", Action::Select(entry.id.clone()))
            }
            Some(_) => props.attr("aria-disabled", true),
            None => props,
        }
    }
}

fn item_role(container_role: &str) -> &'static str {
    match container_role {
        "menu" => "menuitem",
        "tablist" => "tab",
        _ => "option",
    }
}

/// Builder for [`ListNav`].
#[derive(Debug)]
pub struct ListNavBuilder<K> {
    store: StoreBuilder<ListState, Action<K>>,
    initialized: bool,
    id: String,
    wrap: Wrap,
    role: &'static str,
    typeahead_timeout_ms: u64,
}

impl<K> ListNavBuilder<K> {
    /// End-of-sequence behavior for arrow movement.
    #[must_use]
    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Container role: "listbox" (default), "menu", or "tablist".
    #[must_use]
    pub fn role(mut self, role: &'static str) -> Self {
        self.role = role;
        self
    }

    /// Idle window for the typeahead buffer.
    #[must_use]
    pub fn typeahead_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.typeahead_timeout_ms = timeout_ms;
        self
    }

    /// Initial active position for an uncontrolled instance.
    #[must_use]
    pub fn default_active(mut self, active: Option<usize>) -> Self {
        self.store = self.store.default_value(ListState { active });
        self.initialized = true;
        self
    }

    /// Externally controlled active position.
    #[must_use]
    pub fn active(mut self, active: Option<usize>) -> Self {
        self.store = self.store.value(ListState { active });
        self.initialized = true;
        self
    }

    /// Listener for committed or proposed state changes.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&ListState) + 'static) -> Self {
        self.store = self.store.on_change(listener);
        self
    }

    /// Interpose a reducer on every dispatch.
    #[must_use]
    pub fn override_reducer(
        mut self,
        reducer: impl Fn(&ListState, &Action<K>, &dyn Fn(&ListState, &Action<K>) -> ListState) -> ListState
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
    /// Propagates the store's [`ConfigError`]s; a controlled `active`
    /// still requires `on_change`.
    pub fn build(mut self) -> Result<ListNav<K>, ConfigError> {
        if !self.initialized {
            self.store = self.store.default_value(ListState::default());
        }
        Ok(ListNav {
            store: self.store.build()?,
            typeahead: TypeaheadBuffer::new(self.typeahead_timeout_ms),
            wrap: self.wrap,
            role: self.role,
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
    use trellis_roving::NavEntry;

    use super::*;

    fn menu_entries() -> [NavEntry<'static, u32>; 3] {
        [
            NavEntry::new(10, "Cut"),
            NavEntry::new(11, "Copy"),
            NavEntry::new(12, "Paste"),
        ]
    }

    #[test]
    fn first_then_prev_wraps_to_the_end() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");
        assert_eq!(list.state().active, None);

        assert_eq!(list.dispatch(&Action::MoveFirst, &space).active, Some(0));
        assert_eq!(list.dispatch(&Action::MovePrev, &space).active, Some(2));
    }

    #[test]
    fn clamp_configuration_stops_at_the_edges() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::builder("menu")
            .wrap(Wrap::Clamp)
            .build()
            .unwrap();

        list.dispatch(&Action::MoveLast, &space);
        assert_eq!(list.dispatch(&Action::MoveNext, &space).active, Some(2));
    }

    #[test]
    fn fully_disabled_list_stays_inert() {
        let entries = [
            NavEntry::new(10_u32, "Cut").disabled(),
            NavEntry::new(11, "Copy").disabled(),
        ];
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");

        for action in [Action::MoveNext, Action::MovePrev, Action::MoveFirst] {
            assert_eq!(list.dispatch(&action, &space).active, None);
        }
    }

    #[test]
    fn select_activates_enabled_items_only() {
        let entries = [
            NavEntry::new(10_u32, "Cut"),
            NavEntry::new(11, "Copy").disabled(),
        ];
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");

        assert_eq!(list.dispatch(&Action::Select(10), &space).active, Some(0));
        assert_eq!(list.dispatch(&Action::Select(11), &space).active, Some(0));
        assert_eq!(list.dispatch(&Action::Select(99), &space).active, Some(0));
    }

    #[test]
    fn typeahead_moves_and_arrows_clear_the_buffer() {
        let entries = [
            NavEntry::new(1_u32, "Banana"),
            NavEntry::new(2, "Blueberry"),
            NavEntry::new(3, "Lime"),
        ];
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("fruit");

        let state = list.dispatch(&Action::Typeahead { ch: 'b', now_ms: 0 }, &space);
        assert_eq!(state.active, Some(0));

        // An arrow press clears the accumulation…
        list.dispatch(&Action::MoveNext, &space);
        // …so 'l' starts fresh and finds "Lime", not "Blueberry" via "bl".
        let state = list.dispatch(&Action::Typeahead { ch: 'l', now_ms: 50 }, &space);
        assert_eq!(state.active, Some(2));
    }

    #[test]
    fn unmatched_typeahead_keeps_the_position() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");

        list.dispatch(&Action::MoveFirst, &space);
        let state = list.dispatch(&Action::Typeahead { ch: 'z', now_ms: 0 }, &space);
        assert_eq!(state.active, Some(0));
    }

    #[test]
    fn exactly_one_item_is_the_tab_stop() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");
        list.dispatch(&Action::MoveNext, &space);

        assert_eq!(
            list.container_props().attr_value("tabindex"),
            Some(&AttrValue::Int(0))
        );
        let stops: Vec<i64> = (0..space.len())
            .map(|i| match list.item_props(&space, i).attr_value("tabindex") {
                Some(AttrValue::Int(v)) => *v,
                _ => panic!("every item carries a tabindex"),
            })
            .collect();
        assert_eq!(stops, [0, -1, -1]);
    }

    #[test]
    fn menu_role_maps_items_to_menuitem() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let list = ListNav::<u32>::builder("menu").role("menu").build().unwrap();

        let props = list.item_props(&space, 0);
        assert_eq!(
            props.attr_value("role"),
            Some(&AttrValue::Str("menuitem".into()))
        );
        assert_eq!(props.attr_value("aria-selected"), None);
    }

    #[test]
    fn disabled_items_expose_no_click_handler() {
        let entries = [
            NavEntry::new(10_u32, "Cut"),
            NavEntry::new(11, "Copy").disabled(),
        ];
        let space = NavSpace::new(&entries);
        let list = ListNav::<u32>::new("menu");

        assert!(list.item_props(&space, 0).action_for("click").is_some());
        let disabled = list.item_props(&space, 1);
        assert!(disabled.action_for("click").is_none());
        assert_eq!(
            disabled.attr_value("aria-disabled"),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn out_of_range_override_is_clamped_and_diagnosed() {
        let diags: Rc<RefCell<Vec<Diagnostic>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = diags.clone();
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::builder("menu")
            .override_reducer(|_, _, _| ListState { active: Some(99) })
            .diagnostics(move |d: &Diagnostic| seen.borrow_mut().push(d.clone()))
            .build()
            .unwrap();

        let state = list.dispatch(&Action::MoveNext, &space);
        assert_eq!(state.active, Some(2), "clamped to the last enabled item");
        assert_eq!(list.active(&space), Some(2));
        assert_eq!(
            diags.borrow().as_slice(),
            &[Diagnostic::OverrideOutOfRange { index: 99, len: 3 }]
        );
    }

    #[test]
    fn sync_items_reclamps_after_the_sequence_shrinks() {
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::new("menu");
        list.dispatch(&Action::MoveLast, &space);
        assert_eq!(list.state().active, Some(2));

        let shorter = [NavEntry::new(10_u32, "Cut")];
        let space = NavSpace::new(&shorter);
        let state = list.dispatch(&Action::SyncItems, &space);
        assert_eq!(state.active, Some(0));
    }

    #[test]
    fn controlled_list_proposes_instead_of_applying() {
        let proposals: Rc<RefCell<Vec<ListState>>> = Rc::new(RefCell::new(Vec::new()));
        let seen = proposals.clone();
        let entries = menu_entries();
        let space = NavSpace::new(&entries);
        let mut list = ListNav::<u32>::builder("menu")
            .active(Some(0))
            .on_change(move |s: &ListState| seen.borrow_mut().push(*s))
            .build()
            .unwrap();

        list.dispatch(&Action::MoveNext, &space);
        assert_eq!(list.state().active, Some(0), "controlled state must not move");
        assert_eq!(proposals.borrow().as_slice(), &[ListState { active: Some(1) }]);
    }
}
