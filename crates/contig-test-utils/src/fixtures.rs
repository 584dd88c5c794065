//! Value-initialisation fixtures.
//!
//! [`FlakyDefault`] counts its live instances in thread-local state and
//! can be told to panic on a future `Default::default()` call. Tests run
//! on separate threads, so the state never leaks between tests.

use std::cell::Cell;

/// Message carried by the panic injected through [`FlakyDefault::fail_after`].
pub const INJECTED_DEFAULT_PANIC: &str = "injected default failure";

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Element whose `Default` can be made to fail on demand.
///
/// Defaults to payload `0`; [`new`](Self::new) builds explicit payloads
/// and never fails.
#[derive(Debug, PartialEq, Eq)]
pub struct FlakyDefault(u32);

impl FlakyDefault {
    pub fn new(value: u32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Allow `successes` more default constructions on this thread; the
    /// next one panics with [`INJECTED_DEFAULT_PANIC`] and clears the
    /// budget.
    pub fn fail_after(successes: usize) {
        BUDGET.with(|budget| budget.set(Some(successes)));
    }

    /// Instances currently alive on this thread.
    pub fn live() -> usize {
        LIVE.with(Cell::get)
    }
}

impl Default for FlakyDefault {
    fn default() -> Self {
        let admit = BUDGET.with(|budget| match budget.get() {
            Some(0) => {
                budget.set(None);
                false
            }
            Some(remaining) => {
                budget.set(Some(remaining - 1));
                true
            }
            None => true,
        });
        if !admit {
            panic!("{INJECTED_DEFAULT_PANIC}");
        }
        Self::new(0)
    }
}

impl Clone for FlakyDefault {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for FlakyDefault {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}
