// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stale-result sequencing for asynchronous item filtering.
//!
//! When filtering is backed by an asynchronous source, issuing a new query
//! invalidates every query before it. Responses carry the ticket of the
//! query they answer; a response whose ticket is no longer the newest is
//! classified [`QueryOutcome::Stale`] and its payload must never reach
//! state. Cancellation of the underlying request is the caller's
//! best-effort concern; the guarantee here is only that a superseded
//! result is unobservable.
//!
//! ```rust
//! use trellis_combobox::query::{QueryOutcome, QuerySeq};
//!
//! let mut queries = QuerySeq::new();
//! let old = queries.issue();
//! let new = queries.issue();
//!
//! assert!(matches!(queries.accept(old), QueryOutcome::Stale { .. }));
//! assert_eq!(queries.accept(new), QueryOutcome::Fresh);
//! ```

/// Ticket identifying one issued query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    /// The ticket's monotonically increasing sequence number.
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Classification of an arriving response.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryOutcome {
    /// The response answers the newest issued query; apply it.
    Fresh,
    /// A newer query was issued meanwhile; drop the response.
    Stale {
        /// Sequence number the response answers.
        issued: u64,
        /// Sequence number of the newest issued query.
        newest: u64,
    },
}

/// Monotonic query sequencer for one combobox instance.
#[derive(Clone, Debug, Default)]
pub struct QuerySeq {
    newest: u64,
}

impl QuerySeq {
    /// A sequencer with no queries issued yet.
    pub fn new() -> Self {
        Self { newest: 0 }
    }

    /// Issue a new query, invalidating all earlier tickets.
    pub fn issue(&mut self) -> QueryTicket {
        self.newest += 1;
        QueryTicket(self.newest)
    }

    /// Sequence number of the newest issued query (0 before any).
    pub fn newest(&self) -> u64 {
        self.newest
    }

    /// Returns `true` if the ticket is still the newest.
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.0 == self.newest
    }

    /// Classify a response for the given ticket.
    pub fn accept(&self, ticket: QueryTicket) -> QueryOutcome {
        if self.is_current(ticket) {
            QueryOutcome::Fresh
        } else {
            QueryOutcome::Stale {
                issued: ticket.0,
                newest: self.newest,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_are_monotonic() {
        let mut queries = QuerySeq::new();
        let a = queries.issue();
        let b = queries.issue();
        let c = queries.issue();
        assert!(a.seq() < b.seq(), "tickets must increase");
        assert!(b.seq() < c.seq(), "tickets must increase");
    }

    #[test]
    fn only_the_newest_ticket_is_current() {
        let mut queries = QuerySeq::new();
        let a = queries.issue();
        assert!(queries.is_current(a));

        let b = queries.issue();
        assert!(!queries.is_current(a));
        assert!(queries.is_current(b));
    }

    #[test]
    fn stale_outcome_reports_both_sequence_numbers() {
        let mut queries = QuerySeq::new();
        let a = queries.issue();
        let _b = queries.issue();

        assert_eq!(
            queries.accept(a),
            QueryOutcome::Stale {
                issued: 1,
                newest: 2,
            }
        );
    }
}
