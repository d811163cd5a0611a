// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Trap: focus trapping and restoration for modal regions.
//!
//! A [`FocusTrap`] cycles keyboard focus within a region's focusable set
//! while active and restores focus to the previously focused element on
//! deactivation. It owns no focus side effects: every operation returns the
//! handle the caller should move focus to (or `None` for "leave focus
//! alone"), and the focusable set arrives as a caller-built snapshot per
//! call, so the engine never holds live element references.
//!
//! The machine has two phases, `Inactive` and `Active`, reused across any
//! number of activations:
//!
//! - [`FocusTrap::activate`] captures the currently focused handle and
//!   selects the initial target: the configured one if it is a focusable
//!   member of the region, else the region's first focusable. An empty
//!   region still activates (so a later deactivation restores correctly)
//!   but yields no target.
//! - [`FocusTrap::next`] answers Tab and Shift+Tab while active, wrapping
//!   at both ends of the region's focusable set.
//! - [`FocusTrap::retrap`] corrects externally caused escapes: if the
//!   newly focused element is outside the region, it returns the handle to
//!   pull focus back to.
//! - [`FocusTrap::deactivate`] hands back a [`RestoreChain`]; resolving it
//!   against a caller predicate yields the restoration target in the
//!   documented fallback order: previously focused element, then the
//!   region's trigger, then the region container, then nothing.
//!
//! Side effects at the activation boundary (scroll locking, inert-ing the
//! background) belong to the caller; the widget layer exposes hooks at the
//! same boundary.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_trap::{FocusTrap, Restore, TrapEntry, TrapSpace};
//!
//! let entries = [TrapEntry::new(10_u32), TrapEntry::new(11), TrapEntry::new(12)];
//! let space = TrapSpace::new(&entries);
//! let mut trap = FocusTrap::new(1_u32);
//!
//! // Focus was on the opener (5); activation moves it into the region.
//! assert_eq!(trap.activate(&space, Some(5)), Some(10));
//! // Tab cycles, wrapping at the end…
//! assert_eq!(trap.next(&space, Some(12), false), Some(10));
//! // …and Shift+Tab wraps the other way.
//! assert_eq!(trap.next(&space, Some(10), true), Some(12));
//!
//! // Deactivation restores focus to the opener.
//! let chain = trap.deactivate().unwrap();
//! assert_eq!(chain.resolve(|_| true), Restore::Previous(5));
//! ```
//!
//! This crate is `no_std` and allocation-free: snapshots are borrowed
//! slices and the trap state is a handful of handles.

#![no_std]

/// A focusable element inside the trapped region.
#[derive(Copy, Clone, Debug)]
pub struct TrapEntry<K> {
    /// Caller-owned element handle.
    pub id: K,
    /// Whether the element can receive focus right now.
    pub enabled: bool,
}

impl<K> TrapEntry<K> {
    /// Create an enabled entry.
    pub fn new(id: K) -> Self {
        Self { id, enabled: true }
    }

    /// Mark this entry as not currently focusable.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Read-only snapshot of the region's focusable set, in document order.
#[derive(Copy, Clone, Debug)]
pub struct TrapSpace<'a, K> {
    entries: &'a [TrapEntry<K>],
}

impl<'a, K> TrapSpace<'a, K> {
    /// Wrap a slice of entries.
    pub fn new(entries: &'a [TrapEntry<K>]) -> Self {
        Self { entries }
    }

    /// All entries in document order.
    pub fn entries(&self) -> &'a [TrapEntry<K>] {
        self.entries
    }

    /// Returns `true` if the region has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, K: Copy + Eq> TrapSpace<'a, K> {
    /// First focusable handle in document order.
    pub fn first_target(&self) -> Option<K> {
        self.entries.iter().find(|e| e.enabled).map(|e| e.id)
    }

    /// Last focusable handle in document order.
    pub fn last_target(&self) -> Option<K> {
        self.entries.iter().rev().find(|e| e.enabled).map(|e| e.id)
    }

    /// Returns `true` if `id` is a focusable member of the region.
    pub fn is_target(&self, id: K) -> bool {
        self.entries.iter().any(|e| e.enabled && e.id == id)
    }

    fn position_of(&self, id: K) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

/// Where focus should go when a trap deactivates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Restore<K> {
    /// The element focused before activation is still there; return to it.
    Previous(K),
    /// The previous element is gone; fall back to the region's trigger.
    Trigger(K),
    /// Neither survives; fall back to the region container itself.
    Container(K),
    /// Nothing focusable remains; leave focus alone.
    NoTarget,
}

/// The raw candidates for restoration, in fallback order.
///
/// Whether a handle still exists and accepts focus is a question only the
/// rendering layer can answer, so resolution takes a predicate instead of
/// the trap guessing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RestoreChain<K> {
    /// The handle focused at activation time, if any.
    pub previous: Option<K>,
    /// The configured trigger element, if any.
    pub trigger: Option<K>,
    /// The region container.
    pub container: K,
}

impl<K: Copy> RestoreChain<K> {
    /// Resolve the chain against "does this handle still accept focus".
    pub fn resolve(&self, still_focusable: impl Fn(&K) -> bool) -> Restore<K> {
        if let Some(previous) = self.previous
            && still_focusable(&previous)
        {
            return Restore::Previous(previous);
        }
        if let Some(trigger) = self.trigger
            && still_focusable(&trigger)
        {
            return Restore::Trigger(trigger);
        }
        if still_focusable(&self.container) {
            return Restore::Container(self.container);
        }
        Restore::NoTarget
    }
}

/// Focus trap state machine for one region.
#[derive(Clone, Debug)]
pub struct FocusTrap<K> {
    container: K,
    active: bool,
    previously_focused: Option<K>,
    initial: Option<K>,
    trigger: Option<K>,
}

impl<K: Copy + Eq> FocusTrap<K> {
    /// Create an inactive trap for the region owned by `container`.
    pub fn new(container: K) -> Self {
        Self {
            container,
            active: false,
            previously_focused: None,
            initial: None,
            trigger: None,
        }
    }

    /// Explicit initial focus target, used instead of the region's first
    /// focusable when it is a focusable member at activation time.
    pub fn set_initial_target(&mut self, initial: Option<K>) {
        self.initial = initial;
    }

    /// The element that opened the region; second entry in the restoration
    /// fallback chain.
    pub fn set_trigger(&mut self, trigger: Option<K>) {
        self.trigger = trigger;
    }

    /// Returns `true` while the trap owns focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The region container handle.
    pub fn container(&self) -> K {
        self.container
    }

    /// The handle captured at activation, while active.
    pub fn previously_focused(&self) -> Option<K> {
        self.previously_focused
    }

    /// Activate the trap.
    ///
    /// Captures `currently_focused` for later restoration and returns the
    /// handle to move focus to. Returns `None` without capturing when the
    /// trap is already active, and `None` (but still activating) when the
    /// region has no focusable entry.
    pub fn activate(&mut self, space: &TrapSpace<'_, K>, currently_focused: Option<K>) -> Option<K> {
        if self.active {
            return None;
        }
        self.active = true;
        self.previously_focused = currently_focused;
        self.initial_target(space)
    }

    /// Answer a Tab (`backward == false`) or Shift+Tab (`backward == true`)
    /// press while active, wrapping at both ends.
    ///
    /// A `current` handle outside the region (or `None`) resolves to the
    /// first or last focusable, matching the travel direction. Returns
    /// `None` when inactive or when the region has no focusable entry.
    pub fn next(&self, space: &TrapSpace<'_, K>, current: Option<K>, backward: bool) -> Option<K> {
        if !self.active {
            return None;
        }
        let anchor = current.and_then(|id| space.position_of(id));
        let entries = space.entries();
        let len = entries.len();
        match anchor {
            None => {
                if backward {
                    space.last_target()
                } else {
                    space.first_target()
                }
            }
            Some(position) => {
                // Walk the cycle starting beside the anchor; at most one
                // full lap, so an all-disabled region terminates.
                (1..=len)
                    .map(|step| {
                        if backward {
                            (position + len - (step % len)) % len
                        } else {
                            (position + step) % len
                        }
                    })
                    .find(|&i| entries[i].enabled)
                    .map(|i| entries[i].id)
            }
        }
    }

    /// Correct an externally caused focus escape.
    ///
    /// Call on every focus event while active: if `focused` is a focusable
    /// member of the region the answer is `None` (leave it alone),
    /// otherwise the handle to pull focus back to.
    pub fn retrap(&self, space: &TrapSpace<'_, K>, focused: Option<K>) -> Option<K> {
        if !self.active {
            return None;
        }
        match focused {
            Some(id) if space.is_target(id) => None,
            _ => self.initial_target(space),
        }
    }

    /// Deactivate the trap.
    ///
    /// Returns the restoration candidates, or `None` if the trap was not
    /// active. The captured previously-focused handle is consumed either
    /// way the chain resolves.
    pub fn deactivate(&mut self) -> Option<RestoreChain<K>> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(RestoreChain {
            previous: self.previously_focused.take(),
            trigger: self.trigger,
            container: self.container,
        })
    }

    fn initial_target(&self, space: &TrapSpace<'_, K>) -> Option<K> {
        self.initial
            .filter(|&id| space.is_target(id))
            .or_else(|| space.first_target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> [TrapEntry<u32>; 3] {
        [TrapEntry::new(10), TrapEntry::new(11), TrapEntry::new(12)]
    }

    #[test]
    fn activate_then_deactivate_restores_exactly() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);

        trap.activate(&space, Some(5));
        let chain = trap.deactivate().unwrap();

        assert_eq!(chain.resolve(|_| true), Restore::Previous(5));
        assert!(!trap.is_active());
    }

    #[test]
    fn activation_prefers_the_configured_initial_target() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.set_initial_target(Some(11));

        assert_eq!(trap.activate(&space, Some(5)), Some(11));
    }

    #[test]
    fn unfocusable_initial_target_falls_back_to_first() {
        let entries = [
            TrapEntry::new(10_u32),
            TrapEntry::new(11).disabled(),
            TrapEntry::new(12),
        ];
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.set_initial_target(Some(11));

        assert_eq!(trap.activate(&space, None), Some(10));
    }

    #[test]
    fn tab_cycles_and_wraps_both_ends() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.activate(&space, None);

        assert_eq!(trap.next(&space, Some(10), false), Some(11));
        assert_eq!(trap.next(&space, Some(12), false), Some(10));
        assert_eq!(trap.next(&space, Some(10), true), Some(12));
        assert_eq!(trap.next(&space, Some(11), true), Some(10));
    }

    #[test]
    fn tab_skips_unfocusable_entries() {
        let entries = [
            TrapEntry::new(10_u32),
            TrapEntry::new(11).disabled(),
            TrapEntry::new(12),
        ];
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.activate(&space, None);

        assert_eq!(trap.next(&space, Some(10), false), Some(12));
        assert_eq!(trap.next(&space, Some(12), true), Some(10));
    }

    #[test]
    fn next_from_outside_the_region_enters_by_direction() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.activate(&space, None);

        assert_eq!(trap.next(&space, Some(99), false), Some(10));
        assert_eq!(trap.next(&space, None, true), Some(12));
    }

    #[test]
    fn retrap_corrects_escapes_and_tolerates_inside_focus() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.activate(&space, Some(5));

        assert_eq!(trap.retrap(&space, Some(11)), None);
        assert_eq!(trap.retrap(&space, Some(99)), Some(10));
        assert_eq!(trap.retrap(&space, None), Some(10));
    }

    #[test]
    fn inactive_trap_answers_nothing() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);

        assert_eq!(trap.next(&space, Some(10), false), None);
        assert_eq!(trap.retrap(&space, Some(99)), None);
        assert_eq!(trap.deactivate(), None);
    }

    #[test]
    fn double_activation_does_not_recapture() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);

        trap.activate(&space, Some(5));
        // Focus has moved inside; a second activate must not overwrite the
        // captured handle with an in-region one.
        assert_eq!(trap.activate(&space, Some(10)), None);

        let chain = trap.deactivate().unwrap();
        assert_eq!(chain.resolve(|_| true), Restore::Previous(5));
    }

    #[test]
    fn empty_region_still_activates_and_restores() {
        let entries: [TrapEntry<u32>; 0] = [];
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);

        assert_eq!(trap.activate(&space, Some(5)), None);
        assert!(trap.is_active());
        assert_eq!(trap.retrap(&space, Some(5)), None);

        let chain = trap.deactivate().unwrap();
        assert_eq!(chain.resolve(|_| true), Restore::Previous(5));
    }

    #[test]
    fn restore_falls_back_through_trigger_and_container() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);
        trap.set_trigger(Some(7));
        trap.activate(&space, Some(5));
        let chain = trap.deactivate().unwrap();

        // Previous element gone: trigger.
        assert_eq!(chain.resolve(|&id| id != 5), Restore::Trigger(7));
        // Previous and trigger gone: container.
        assert_eq!(chain.resolve(|&id| id != 5 && id != 7), Restore::Container(1));
        // Nothing accepts focus: no-op.
        assert_eq!(chain.resolve(|_| false), Restore::NoTarget);
    }

    #[test]
    fn restoration_state_does_not_leak_across_activations() {
        let entries = region();
        let space = TrapSpace::new(&entries);
        let mut trap = FocusTrap::new(1_u32);

        trap.activate(&space, Some(5));
        trap.deactivate();

        // Second activation with nothing focused: no stale capture.
        trap.activate(&space, None);
        let chain = trap.deactivate().unwrap();
        assert_eq!(chain.resolve(|_| true), Restore::Container(1));
    }
}
