// ECL - ecl-error
// Module: ECL Error Handling
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! ECL error handling library
//!
//! Every fallible operation of the container core reports through the
//! [`Error`] type defined here. Errors are small `Copy` values carrying a
//! category, a numeric code and a static message, so they can be created and
//! returned on targets without an allocator.
//!
//! # Error Categories
//!
//! ## Capacity Errors (1000-1999)
//! - Fixed storage too small for a requested length
//! - Fixed bucket storage too small to restore the load factor
//!
//! ## Resource Errors (2000-2999)
//! - Node pool exhausted
//! - Allocator returned no memory
//!
//! ## Misuse Errors (3000-3999)
//! - Release of a handle the pool does not own
//! - Access at an end position or outside the live range
//! - Conflicting borrows of a shared pool
//!
//! ## Configuration Errors (4000-4999)
//! - Zero bucket count, zero load-factor ratio
//!
//! Not-found outcomes are not errors and never appear here.
//!
//! # Contract violations
//!
//! Capacity, resource and misuse errors are contract violations. They are
//! created through [`violation::raise`], which hands them to the installed
//! violation hook before they are returned:
//!
//! ```
//! use ecl_error::{helpers, violation, Error, ErrorCategory};
//!
//! fn reserve(len: usize, capacity: usize) -> ecl_error::Result<()> {
//!     if len > capacity {
//!         return Err(violation::raise(helpers::capacity_exceeded("buffer too small")));
//!     }
//!     Ok(())
//! }
//!
//! // Report through the returned value only; the default hook terminates.
//! violation::set_violation_hook(violation::ignore);
//!
//! let err = reserve(9, 8).unwrap_err();
//! assert_eq!(err.category, ErrorCategory::Capacity);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

// Standard library support
#[cfg(feature = "std")]
extern crate std;

/// Error codes for ECL
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Constructors for the common violation kinds
pub mod helpers;
/// The configurable contract-violation hook
pub mod violation;

// Re-export key types
pub use errors::{Error, ErrorCategory};
pub use violation::{raise, set_violation_hook, ViolationHook};

/// A specialized `Result` type for ECL operations.
pub type Result<T> = core::result::Result<T, Error>;
