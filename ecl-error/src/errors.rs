// ECL - ecl-error
// Module: ECL Error Types
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for the container core.

use core::fmt;

use crate::codes;

/// `Error` categories for ECL operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Fixed storage or fixed bucket storage insufficient
    Capacity      = 1,
    /// Pool exhaustion and allocator failures
    Resource      = 2,
    /// Double or foreign release, end-position access, borrow conflicts
    Misuse        = 3,
    /// Invalid construction parameters
    Configuration = 4,
}

impl ErrorCategory {
    /// Whether errors of this category are contract violations.
    ///
    /// Configuration errors are reported at construction time and are
    /// returned without passing through the violation hook.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

/// ECL `Error` type
///
/// Small enough to be returned by value from every engine operation; the
/// message is always a static string so no allocation is needed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// Fixed capacity exceeded
    pub const CAPACITY_EXCEEDED: Self = Self::new(
        ErrorCategory::Capacity,
        codes::CAPACITY_EXCEEDED,
        "Requested length exceeds fixed capacity",
    );
    /// Pool exhausted
    pub const POOL_EXHAUSTED: Self = Self::new(
        ErrorCategory::Resource,
        codes::POOL_EXHAUSTED,
        "No free node slot available",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    /// Check if this is a capacity error
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        self.category == ErrorCategory::Capacity
    }

    /// Check if this is a resource error
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        self.category == ErrorCategory::Resource
    }

    /// Check if this is a misuse error
    #[must_use]
    pub fn is_misuse_error(&self) -> bool {
        self.category == ErrorCategory::Misuse
    }

    /// Check if this is a configuration error
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        self.category == ErrorCategory::Configuration
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
