// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-reader announcement side-channel.
//!
//! Widgets sometimes need to say something that no attribute change
//! expresses ("12 results available"). The engine's whole involvement is
//! the [`Announcer::announce`] call: an external subscriber registry
//! receives the text and priority, and delivery (live regions, platform
//! APIs) happens entirely outside. Keeping the registry explicit and
//! per-engine avoids a global mutable event bus.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// How urgently an announcement should interrupt the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Read at the next graceful opportunity.
    Polite,
    /// Interrupt current speech.
    Assertive,
}

/// A subscriber that delivers announcements.
pub trait AnnouncementSink {
    /// Deliver one announcement.
    fn announce(&mut self, text: &str, priority: Priority);
}

impl<F: FnMut(&str, Priority)> AnnouncementSink for F {
    fn announce(&mut self, text: &str, priority: Priority) {
        self(text, priority);
    }
}

/// Explicit subscriber registry; one per engine or widget group.
#[derive(Default)]
pub struct Announcer {
    sinks: Vec<Box<dyn AnnouncementSink>>,
}

impl core::fmt::Debug for Announcer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Announcer")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Announcer {
    /// A registry with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber.
    pub fn subscribe(&mut self, sink: impl AnnouncementSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Fan one announcement out to every subscriber, in registration
    /// order.
    pub fn announce(&mut self, text: &str, priority: Priority) {
        for sink in &mut self.sinks {
            sink.announce(text, priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn announcements_reach_every_sink_in_order() {
        let heard: Rc<RefCell<Vec<(String, Priority)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut announcer = Announcer::new();

        for tag in ["a", "b"] {
            let log = heard.clone();
            announcer.subscribe(move |text: &str, priority| {
                log.borrow_mut().push((alloc::format!("{tag}:{text}"), priority));
            });
        }

        announcer.announce("3 results", Priority::Polite);

        assert_eq!(
            heard.borrow().as_slice(),
            &[
                ("a:3 results".to_string(), Priority::Polite),
                ("b:3 results".to_string(), Priority::Polite),
            ]
        );
    }

    #[test]
    fn empty_registry_is_a_quiet_no_op() {
        let mut announcer = Announcer::new();
        assert!(announcer.is_empty());
        announcer.announce("nobody hears this", Priority::Assertive);
    }
}
