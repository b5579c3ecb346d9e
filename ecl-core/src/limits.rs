// ECL - ecl-core
// Module: Compile-time limits and defaults
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Compile-time defaults for the container engines.
//!
//! Values that depend on the target's memory budget come from a platform
//! profile selected by feature flag:
//!
//! - `embedded-small`: MCU targets with a few KiB for containers
//! - Default: targets with ample memory
//!
//! # Usage
//!
//! ```rust
//! use ecl_core::limits;
//!
//! let buckets = limits::platform::DEFAULT_BUCKET_COUNT;
//! assert!(buckets.is_power_of_two());
//! ```

/// Growth law of the dynamic strategy (not platform-dependent)
pub mod growth {
    /// Capacities handed out by `reserve` are multiples of this step
    pub const ROUND_STEP: usize = 8;

    /// `reserve` grows to at least this multiple of the current capacity
    pub const FACTOR: usize = 2;
}

pub use growth::{FACTOR as GROWTH_FACTOR, ROUND_STEP as GROWTH_ROUND_STEP};

/// Platform profile for embedded microcontrollers
#[cfg(feature = "embedded-small")]
pub mod platform {
    /// Bucket count of a hash table built without an explicit count
    pub const DEFAULT_BUCKET_COUNT: usize = 8;
}

/// Default platform profile
#[cfg(not(feature = "embedded-small"))]
pub mod platform {
    /// Bucket count of a hash table built without an explicit count
    pub const DEFAULT_BUCKET_COUNT: usize = 32;
}

pub use platform::DEFAULT_BUCKET_COUNT;

/// Default maximum load factor of a hash table, as `(numerator, denominator)`.
///
/// One item per bucket on average.
pub const DEFAULT_MAX_LOAD_FACTOR: (u32, u32) = (1, 1);
