//! Test utilities for contig development.
//!
//! Provides element types that record their own lifetime events so tests
//! can assert "no leak, no double drop" after a panic unwinds through a
//! container:
//!
//! - [`Ledger`] / [`Tracked`]: per-test counters shared through an `Rc`,
//!   with a clone budget that makes the N-th clone panic.
//! - [`fixtures::FlakyDefault`]: a `Default` type whose construction
//!   panics once a thread-local budget runs out.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Message carried by the panic injected through [`Ledger::fail_after_clones`].
pub const INJECTED_CLONE_PANIC: &str = "injected clone failure";

#[derive(Default)]
struct Counts {
    cloned: usize,
    dropped: usize,
    double_drops: usize,
    next_serial: u64,
    live: HashSet<u64>,
    /// Clones still allowed before the next one panics.
    clone_budget: Option<usize>,
}

/// Shared record of every [`Tracked`] value created from it.
///
/// Each value gets a unique serial. Dropping a serial that is not live
/// counts as a double drop instead of panicking, so the check survives
/// unwinding.
#[derive(Default)]
pub struct Ledger {
    counts: RefCell<Counts>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create a fresh tracked value.
    pub fn make(self: &Rc<Self>, value: i32) -> Tracked {
        let serial = self.register();
        Tracked {
            value,
            serial,
            ledger: Rc::clone(self),
        }
    }

    /// Allow `successes` more clones; the one after that panics with
    /// [`INJECTED_CLONE_PANIC`]. The budget is then cleared.
    pub fn fail_after_clones(&self, successes: usize) {
        self.counts.borrow_mut().clone_budget = Some(successes);
    }

    /// Remove any pending clone failure.
    pub fn disarm(&self) {
        self.counts.borrow_mut().clone_budget = None;
    }

    /// Values currently alive.
    pub fn live(&self) -> usize {
        self.counts.borrow().live.len()
    }

    /// Successful clones.
    pub fn clones(&self) -> usize {
        self.counts.borrow().cloned
    }

    /// Drops of live values.
    pub fn drops(&self) -> usize {
        self.counts.borrow().dropped
    }

    /// Drops of values that were already dropped.
    pub fn double_drops(&self) -> usize {
        self.counts.borrow().double_drops
    }

    fn register(&self) -> u64 {
        let mut counts = self.counts.borrow_mut();
        let serial = counts.next_serial;
        counts.next_serial += 1;
        counts.live.insert(serial);
        serial
    }

    /// Consume one unit of clone budget. Returns `false` if this clone
    /// must fail.
    fn admit_clone(&self) -> bool {
        let mut counts = self.counts.borrow_mut();
        match counts.clone_budget {
            Some(0) => {
                counts.clone_budget = None;
                false
            }
            Some(remaining) => {
                counts.clone_budget = Some(remaining - 1);
                true
            }
            None => true,
        }
    }

    fn release(&self, serial: u64) {
        let mut counts = self.counts.borrow_mut();
        if counts.live.remove(&serial) {
            counts.dropped += 1;
        } else {
            counts.double_drops += 1;
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts.borrow();
        f.debug_struct("Ledger")
            .field("live", &counts.live.len())
            .field("cloned", &counts.cloned)
            .field("dropped", &counts.dropped)
            .field("double_drops", &counts.double_drops)
            .finish()
    }
}

/// An `i32` payload whose construction, clones and drops are recorded in
/// a [`Ledger`].
///
/// Equality compares payloads only, so a clone equals its original.
pub struct Tracked {
    value: i32,
    serial: u64,
    ledger: Rc<Ledger>,
}

impl Tracked {
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        // The ledger borrow is released before panicking.
        if !self.ledger.admit_clone() {
            panic!("{INJECTED_CLONE_PANIC}");
        }
        let serial = self.ledger.register();
        self.ledger.counts.borrow_mut().cloned += 1;
        Self {
            value: self.value,
            serial,
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.release(self.serial);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
