//! Integration test: panics unwinding through array operations.
//!
//! Uses lifetime-tracking elements to check that every operation leaves
//! the array valid with no leaked and no doubly-dropped element, and that
//! the strong-guarantee operations leave it exactly as before.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::thread;

use contig_array::{Duplicate, DynamicArray};
use contig_test_utils::fixtures::{FlakyDefault, INJECTED_DEFAULT_PANIC};
use contig_test_utils::{Ledger, Tracked, INJECTED_CLONE_PANIC};

const CONSTRUCTOR_PANIC: &str = "constructor failed";

// ── Helpers ──────────────────────────────────────────────────────────

/// Message of the panic caught in `result`. Fails the test if the
/// operation returned normally.
fn panic_message<T>(result: thread::Result<T>) -> String {
    let payload = match result {
        Ok(_) => panic!("operation was expected to panic"),
        Err(payload) => payload,
    };
    if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        String::from("<non-string panic payload>")
    }
}

fn tracked_array(ledger: &Rc<Ledger>, values: &[i32]) -> DynamicArray<Tracked, Duplicate> {
    let mut arr = DynamicArray::new_in(Duplicate);
    for &v in values {
        arr.push_back(ledger.make(v));
    }
    arr
}

fn values<R>(arr: &DynamicArray<Tracked, R>) -> Vec<i32> {
    arr.iter().map(Tracked::value).collect()
}

// ── Strong guarantee ─────────────────────────────────────────────────

#[test]
fn suffix_relocation_failure_during_growth_leaves_array_untouched() {
    let ledger = Ledger::new();
    let mut arr = tracked_array(&ledger, &[0, 1, 2, 3]);
    assert_eq!(arr.capacity(), 4);
    let ptr = arr.as_ptr();
    let live = ledger.live();

    // Insert at 1: one prefix clone, then the suffix. The second suffix
    // element fails.
    ledger.fail_after_clones(2);
    let value = ledger.make(99);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.insert(1, value);
    }));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(values(&arr), vec![0, 1, 2, 3]);
    assert_eq!(arr.len(), 4);
    assert_eq!(arr.capacity(), 4);
    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(ledger.live(), live);
    assert_eq!(ledger.double_drops(), 0);

    drop(arr);
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.double_drops(), 0);
}

#[test]
fn prefix_relocation_failure_during_growth_leaves_array_untouched() {
    let ledger = Ledger::new();
    let mut arr = tracked_array(&ledger, &[10, 20]);
    assert_eq!(arr.capacity(), 2);
    let live = ledger.live();

    ledger.fail_after_clones(1);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.push_back(ledger.make(30));
    }));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(values(&arr), vec![10, 20]);
    assert_eq!(arr.capacity(), 2);
    assert_eq!(ledger.live(), live);
    assert_eq!(ledger.double_drops(), 0);
}

#[test]
fn panicking_constructor_during_growth_leaves_array_untouched() {
    let ledger = Ledger::new();
    let mut arr = tracked_array(&ledger, &[1, 2]);
    let live = ledger.live();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.emplace_with(1, || panic!("{CONSTRUCTOR_PANIC}"));
    }));

    assert_eq!(panic_message(result), CONSTRUCTOR_PANIC);
    assert_eq!(values(&arr), vec![1, 2]);
    assert_eq!(arr.capacity(), 2);
    assert_eq!(ledger.live(), live);
}

#[test]
fn panicking_constructor_with_spare_capacity_leaves_array_untouched() {
    let ledger = Ledger::new();
    let mut arr = DynamicArray::with_capacity_in(8, Duplicate);
    arr.extend([ledger.make(1), ledger.make(2), ledger.make(3)]);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.emplace_with(1, || panic!("{CONSTRUCTOR_PANIC}"));
    }));

    assert_eq!(panic_message(result), CONSTRUCTOR_PANIC);
    assert_eq!(values(&arr), vec![1, 2, 3]);
    assert_eq!(ledger.live(), 3);
}

#[test]
fn reserve_failure_rolls_back() {
    let ledger = Ledger::new();
    let mut arr = tracked_array(&ledger, &[1, 2, 3]);
    let cap = arr.capacity();
    let live = ledger.live();

    ledger.fail_after_clones(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| arr.reserve(64)));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(values(&arr), vec![1, 2, 3]);
    assert_eq!(arr.capacity(), cap);
    assert_eq!(ledger.live(), live);
    assert_eq!(ledger.double_drops(), 0);
}

#[test]
fn clone_from_into_smaller_storage_is_strong() {
    let ledger = Ledger::new();
    let mut dst = tracked_array(&ledger, &[100]);
    let src = tracked_array(&ledger, &[1, 2, 3]);
    let live = ledger.live();

    ledger.fail_after_clones(1);
    let result = panic::catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(values(&dst), vec![100]);
    assert_eq!(dst.capacity(), 1);
    assert_eq!(ledger.live(), live);
}

#[test]
fn failed_clone_releases_partial_copy() {
    let ledger = Ledger::new();
    let arr = tracked_array(&ledger, &[1, 2, 3, 4]);
    ledger.fail_after_clones(3);
    let result = panic::catch_unwind(AssertUnwindSafe(|| arr.clone()));
    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(ledger.live(), 4);
    assert_eq!(ledger.double_drops(), 0);
}

// ── Basic guarantee ──────────────────────────────────────────────────

#[test]
fn mid_insert_shift_failure_keeps_array_valid() {
    let ledger = Ledger::new();
    let mut arr = DynamicArray::with_capacity_in(8, Duplicate);
    arr.extend((0..4).map(|v| ledger.make(v)));

    // The last element is duplicated into the spare slot, then the
    // first backward shift fails.
    ledger.fail_after_clones(1);
    let value = ledger.make(99);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.insert(1, value);
    }));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    // Partially shifted, but every slot is a live, owned element.
    assert_eq!(values(&arr), vec![0, 1, 2, 3, 3]);
    assert_eq!(ledger.live(), arr.len());
    assert_eq!(ledger.double_drops(), 0);

    drop(arr);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn erase_shift_failure_keeps_array_valid() {
    let ledger = Ledger::new();
    let mut arr = tracked_array(&ledger, &[0, 1, 2, 3]);

    ledger.fail_after_clones(1);
    let result = panic::catch_unwind(AssertUnwindSafe(|| arr.erase(0)));

    assert_eq!(panic_message(result), INJECTED_CLONE_PANIC);
    assert_eq!(values(&arr), vec![1, 1, 2, 3]);
    assert_eq!(ledger.live(), arr.len());
    assert_eq!(ledger.double_drops(), 0);
}

#[test]
fn resize_failure_keeps_len_and_drops_partial_tail() {
    let mut arr: DynamicArray<FlakyDefault> = DynamicArray::new();
    arr.push_back(FlakyDefault::new(1));
    arr.push_back(FlakyDefault::new(2));

    FlakyDefault::fail_after(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| arr.resize(6)));

    assert_eq!(panic_message(result), INJECTED_DEFAULT_PANIC);
    assert_eq!(arr.len(), 2);
    let payloads: Vec<u32> = arr.iter().map(FlakyDefault::value).collect();
    assert_eq!(payloads, vec![1, 2]);
    // The reallocation that preceded the failure is kept.
    assert_eq!(arr.capacity(), 6);
    assert_eq!(FlakyDefault::live(), 2);

    drop(arr);
    assert_eq!(FlakyDefault::live(), 0);
}

#[test]
fn with_len_failure_leaks_nothing() {
    FlakyDefault::fail_after(3);
    let result = panic::catch_unwind(|| DynamicArray::<FlakyDefault>::with_len(5));
    assert_eq!(panic_message(result), INJECTED_DEFAULT_PANIC);
    assert_eq!(FlakyDefault::live(), 0);
}

// ── Relocation policy ────────────────────────────────────────────────

#[test]
fn bitwise_policy_never_clones_on_growth_or_shift() {
    let ledger = Ledger::new();
    let mut arr: DynamicArray<Tracked> = DynamicArray::new();
    for v in 0..33 {
        arr.push_back(ledger.make(v));
    }
    arr.insert(3, ledger.make(-1));
    arr.erase(0);
    arr.reserve(1000);

    assert_eq!(ledger.clones(), 0);
    assert_eq!(ledger.live(), arr.len());
    assert_eq!(ledger.drops(), 1);
    drop(arr);
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.double_drops(), 0);
}

#[test]
fn duplicate_policy_clones_then_releases_originals() {
    let ledger = Ledger::new();
    let arr = tracked_array(&ledger, &[1, 2, 3]);
    // Growth 1 -> 2 relocates one element, 2 -> 4 relocates two.
    assert_eq!(ledger.clones(), 3);
    assert_eq!(ledger.live(), 3);
    assert_eq!(ledger.drops(), 3);
    drop(arr);
    assert_eq!(ledger.double_drops(), 0);
}
