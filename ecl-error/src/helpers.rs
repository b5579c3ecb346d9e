// ECL - ecl-error
// Module: ECL Error Helpers
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error helper functions for common error patterns.
//!
//! These only build the value; callers route violations through
//! [`crate::violation::raise`].

use crate::{codes, Error, ErrorCategory};

/// Create a fixed-capacity exceeded error
#[must_use]
pub const fn capacity_exceeded(message: &'static str) -> Error {
    Error::new(ErrorCategory::Capacity, codes::CAPACITY_EXCEEDED, message)
}

/// Create a bucket capacity exceeded error
#[must_use]
pub const fn bucket_capacity_exceeded(message: &'static str) -> Error {
    Error::new(ErrorCategory::Capacity, codes::BUCKET_CAPACITY_EXCEEDED, message)
}

/// Create an element-wise swap capacity error
#[must_use]
pub const fn swap_capacity_exceeded(message: &'static str) -> Error {
    Error::new(ErrorCategory::Capacity, codes::SWAP_CAPACITY_EXCEEDED, message)
}

/// Create a ring full error
#[must_use]
pub const fn ring_full(message: &'static str) -> Error {
    Error::new(ErrorCategory::Capacity, codes::RING_FULL, message)
}

/// Create a pool exhausted error
#[must_use]
pub const fn pool_exhausted(message: &'static str) -> Error {
    Error::new(ErrorCategory::Resource, codes::POOL_EXHAUSTED, message)
}

/// Create an allocation failure error
#[must_use]
pub const fn allocation_failed(message: &'static str) -> Error {
    Error::new(ErrorCategory::Resource, codes::ALLOCATION_FAILED, message)
}

/// Create a layout overflow error
#[must_use]
pub const fn layout_overflow(message: &'static str) -> Error {
    Error::new(ErrorCategory::Resource, codes::LAYOUT_OVERFLOW, message)
}

/// Create an invalid release error
#[must_use]
pub const fn invalid_release(message: &'static str) -> Error {
    Error::new(ErrorCategory::Misuse, codes::INVALID_RELEASE, message)
}

/// Create an out-of-range access error
#[must_use]
pub const fn out_of_range(message: &'static str) -> Error {
    Error::new(ErrorCategory::Misuse, codes::OUT_OF_RANGE, message)
}

/// Create a shared pool busy error
#[must_use]
pub const fn shared_pool_busy(message: &'static str) -> Error {
    Error::new(ErrorCategory::Misuse, codes::SHARED_POOL_BUSY, message)
}

/// Create an invalid configuration error
#[must_use]
pub const fn invalid_configuration(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::INVALID_CONFIGURATION, message)
}

/// Create a zero bucket count error
#[must_use]
pub const fn zero_bucket_count(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::ZERO_BUCKET_COUNT, message)
}

/// Create an invalid load factor error
#[must_use]
pub const fn invalid_load_factor(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::INVALID_LOAD_FACTOR, message)
}
