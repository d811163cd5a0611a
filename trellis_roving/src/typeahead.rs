// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead matching over a navigable item sequence.
//!
//! Typing printable characters inside a roving list accumulates them into a
//! short buffer and moves the position to the next entry whose match text
//! starts with that buffer, case-insensitively. The buffer resets after a
//! caller-configured idle window; the engine never reads a clock, the
//! caller passes the event timestamp in milliseconds with each character,
//! in the same way pointer state machines receive their event times.
//!
//! The search starts *after* the current position for a fresh buffer (a
//! single character moves you to the *next* match, cycling through entries
//! sharing an initial) and *at* the current position for a continuation
//! (typing more of the current entry's label keeps you on it). It wraps
//! around the sequence exactly once.
//!
//! Any non-character navigation action should clear the buffer via
//! [`TypeaheadBuffer::reset`]; accumulation across an interleaved arrow
//! press would match against stale intent.
//!
//! ```rust
//! use trellis_roving::{NavEntry, NavSpace, TypeaheadBuffer};
//!
//! let entries = [
//!     NavEntry::new(1_u32, "Apple"),
//!     NavEntry::new(2, "Banana"),
//!     NavEntry::new(3, "Blueberry"),
//! ];
//! let space = NavSpace::new(&entries);
//! let mut buffer = TypeaheadBuffer::default();
//!
//! // 'b' from the top finds "Banana"…
//! assert_eq!(buffer.push('b', 1_000, &space, None), Some(1));
//! // …and 'l' within the idle window narrows to "Blueberry".
//! assert_eq!(buffer.push('l', 1_200, &space, Some(1)), Some(2));
//! ```

use alloc::string::String;

use crate::NavSpace;

/// Idle window after which the buffer resets, used by
/// [`TypeaheadBuffer::default`].
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Accumulating, timestamp-windowed typeahead buffer.
#[derive(Clone, Debug)]
pub struct TypeaheadBuffer {
    buffer: String,
    last_input_ms: Option<u64>,
    timeout_ms: u64,
}

impl TypeaheadBuffer {
    /// Create a buffer with the given idle window in milliseconds.
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            last_input_ms: None,
            timeout_ms,
        }
    }

    /// The accumulated (lowercased) prefix.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Clear the accumulated prefix.
    ///
    /// Call this when any non-character action is handled.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_input_ms = None;
    }

    /// Feed one typed character and search for a match.
    ///
    /// `now_ms` is the event timestamp; if more than the idle window has
    /// elapsed since the previous character, the buffer restarts with this
    /// one. `from` is the current roving position, used as the search
    /// anchor. Returns the matched position, or `None` when nothing
    /// matches (the buffer is kept, the position should not move).
    pub fn push<K>(
        &mut self,
        ch: char,
        now_ms: u64,
        space: &NavSpace<'_, K>,
        from: Option<usize>,
    ) -> Option<usize> {
        if let Some(last) = self.last_input_ms
            && now_ms.saturating_sub(last) > self.timeout_ms
        {
            self.buffer.clear();
        }
        self.last_input_ms = Some(now_ms);

        let continuation = !self.buffer.is_empty();
        self.buffer.extend(ch.to_lowercase());

        let len = space.len();
        if len == 0 {
            return None;
        }
        let start = match from {
            Some(anchor) if continuation => anchor,
            Some(anchor) => (anchor + 1) % len,
            None => 0,
        };
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| space.is_target(i) && has_prefix(space.entries()[i].match_text, &self.buffer))
    }
}

impl Default for TypeaheadBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

/// Case-insensitive prefix test; `prefix` is already lowercased.
fn has_prefix(text: &str, prefix: &str) -> bool {
    let mut lowered = text.chars().flat_map(char::to_lowercase);
    prefix.chars().all(|p| lowered.next() == Some(p))
}
