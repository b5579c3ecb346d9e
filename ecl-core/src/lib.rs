// ECL - ecl-core
// Module: Crate root
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Container engines for embedded targets.
//!
//! This crate provides the substrate that fixed-capacity and growable
//! containers are built from. It works without an allocator; heap-backed
//! storage is an opt-in feature.
//!
//! - [`strategy`]: memory strategies ([`Fixed`](strategy::Fixed),
//!   [`Dynamic`](strategy::Dynamic)) mutating a [`StorageProxy`]
//! - [`contiguous`]: a vector over any memory strategy
//! - [`pool`]: node allocators with move-only handles and LIFO reuse
//! - [`sorted`]: lower-bound positioning, unique and stable multi insertion
//! - [`hash_table`]: bucket array plus pooled chains with load-factor rehash
//! - [`ring`]: logical-to-physical translation for circular buffers
//!
//! Every contract violation is returned as an [`Error`] after passing
//! through the violation hook of [`ecl_error::violation`]. Not-found results
//! are ordinary `Option` or `bool` values.
//!
//! # Feature Flags
//!
//! - `std`: Enables standard library support (implies `alloc`)
//! - `alloc`: Enables [`strategy::Dynamic`] and [`pool::HeapNodes`]
//!   (default)
//! - `tracing`: Structured events and spans via the `tracing` crate
//! - `embedded-small`: Smaller defaults in [`limits`]

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod macros;

/// Compile-time defaults and growth constants
pub mod limits;
/// Storage proxy shared by containers and strategies
pub mod storage;
/// Fixed and dynamic memory strategies
pub mod strategy;
/// Strategy-backed contiguous storage
pub mod contiguous;
/// Key extraction, ordering and equality policies
pub mod key;
/// Node allocators
pub mod pool;
/// Sorted engine
pub mod sorted;
/// Hash table engine
pub mod hash_table;
/// Ring buffer and index translator
pub mod ring;
/// Tracing integration
pub mod tracing;

/// Prelude module for consistent imports
pub mod prelude;

#[cfg(test)]
pub(crate) mod test_support {
    /// Lets tests observe violations as plain `Err` values.
    pub(crate) fn ignore_violations() {
        ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
    }
}

pub use ecl_error::{codes, Error, ErrorCategory, Result};
pub use storage::StorageProxy;
