// ECL - ecl-error
// Module: Contract Violation Channel
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// The hook cell stores a fn pointer in an `AtomicPtr`; reading it back is the
// only unsafe operation in this crate.
#![allow(unsafe_code)]

//! Process-wide hook observing every contract violation.
//!
//! A violating operation stops, builds an [`Error`], passes it through
//! [`raise`] and returns it. `raise` first hands the error to the installed
//! hook, which may log it, count it, or terminate the process.
//!
//! Until a hook is installed, violations terminate: [`abort`] with `std`,
//! [`halt`] without it (a panic, which is final in builds using
//! `panic = "abort"`). Install [`ignore`] to make the returned `Err` the only
//! signal.
//!
//! ```
//! use core::sync::atomic::{AtomicUsize, Ordering};
//! use ecl_error::{helpers, violation};
//!
//! static SEEN: AtomicUsize = AtomicUsize::new(0);
//!
//! fn count(_: &ecl_error::Error) {
//!     SEEN.fetch_add(1, Ordering::Relaxed);
//! }
//!
//! let previous = violation::set_violation_hook(count);
//! let _ = violation::raise(helpers::pool_exhausted("pool full"));
//! violation::set_violation_hook(previous);
//!
//! assert_eq!(SEEN.load(Ordering::Relaxed), 1);
//! ```

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use crate::Error;

/// Signature of a violation hook.
pub type ViolationHook = fn(&Error);

/// Null means "use [`DEFAULT_HOOK`]".
static HOOK: AtomicPtr<()> = AtomicPtr::new(ptr::null_mut());

/// Hook in effect while none is installed.
#[cfg(feature = "std")]
pub const DEFAULT_HOOK: ViolationHook = abort;

/// Hook in effect while none is installed.
#[cfg(not(feature = "std"))]
pub const DEFAULT_HOOK: ViolationHook = halt;

/// Installs `hook` and returns the previously installed one.
pub fn set_violation_hook(hook: ViolationHook) -> ViolationHook {
    decode(HOOK.swap(hook as *mut (), Ordering::AcqRel))
}

/// Restores the default hook and returns the previously installed one.
pub fn reset_violation_hook() -> ViolationHook {
    decode(HOOK.swap(ptr::null_mut(), Ordering::AcqRel))
}

/// Returns the currently installed hook.
#[must_use]
pub fn violation_hook() -> ViolationHook {
    decode(HOOK.load(Ordering::Acquire))
}

/// Reports `error` to the installed hook and hands it back.
///
/// Configuration errors bypass the hook: they are ordinary construction
/// failures, not contract violations.
#[must_use = "the returned error must be propagated"]
pub fn raise(error: Error) -> Error {
    if error.category.is_violation() {
        violation_hook()(&error);
    }
    error
}

/// Hook that observes nothing; the returned `Err` is the only signal.
pub fn ignore(_error: &Error) {}

/// Hook that panics on the first violation.
#[allow(clippy::panic)]
pub fn halt(error: &Error) {
    panic!("contract violation: {error}");
}

/// Hook that terminates the process on the first violation.
#[cfg(feature = "std")]
pub fn abort(error: &Error) {
    std::eprintln!("contract violation: {error}");
    std::process::abort();
}

fn decode(raw: *mut ()) -> ViolationHook {
    if raw.is_null() {
        return DEFAULT_HOOK;
    }
    // SAFETY: the only non-null values ever stored in `HOOK` are
    // `ViolationHook` fn pointers cast in `set_violation_hook`, and fn
    // pointers have the same size and representation as `*mut ()`.
    unsafe { core::mem::transmute::<*mut (), ViolationHook>(raw) }
}
