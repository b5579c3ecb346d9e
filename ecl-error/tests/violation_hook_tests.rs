//! Tests for the process-wide violation hook.
//!
//! The hook is global, so everything that swaps it lives in one test
//! function to keep the harness from interleaving installs.

use core::sync::atomic::{AtomicUsize, Ordering};

use ecl_error::{
    helpers,
    violation::{self, reset_violation_hook, set_violation_hook, violation_hook},
    Error, ErrorCategory,
};

static VIOLATIONS: AtomicUsize = AtomicUsize::new(0);
static LAST_CODE: AtomicUsize = AtomicUsize::new(0);

fn counting_hook(error: &Error) {
    VIOLATIONS.fetch_add(1, Ordering::SeqCst);
    LAST_CODE.store(usize::from(error.code), Ordering::SeqCst);
}

#[test]
fn test_hook_lifecycle() {
    // Nothing installed: violations terminate.
    assert_eq!(violation_hook() as usize, violation::DEFAULT_HOOK as usize);
    #[cfg(feature = "std")]
    assert_eq!(violation::DEFAULT_HOOK as usize, violation::abort as usize);
    #[cfg(not(feature = "std"))]
    assert_eq!(violation::DEFAULT_HOOK as usize, violation::halt as usize);

    let previous = set_violation_hook(counting_hook);
    assert_eq!(previous as usize, violation::DEFAULT_HOOK as usize);
    assert_eq!(violation_hook() as usize, counting_hook as usize);

    let _ = violation::raise(helpers::pool_exhausted("no slots"));
    let _ = violation::raise(helpers::invalid_release("foreign handle"));
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), 2);
    assert_eq!(
        LAST_CODE.load(Ordering::SeqCst),
        usize::from(ecl_error::codes::INVALID_RELEASE)
    );

    // Configuration errors are not violations.
    let error = violation::raise(helpers::zero_bucket_count("zero"));
    assert_eq!(error.category, ErrorCategory::Configuration);
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), 2);

    // Opting out keeps the returned error as the only signal.
    set_violation_hook(violation::ignore);
    let error = violation::raise(helpers::capacity_exceeded("too long"));
    assert_eq!(error.category, ErrorCategory::Capacity);
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), 2);

    let replaced = reset_violation_hook();
    assert_eq!(replaced as usize, violation::ignore as usize);
    assert_eq!(violation_hook() as usize, violation::DEFAULT_HOOK as usize);
}
