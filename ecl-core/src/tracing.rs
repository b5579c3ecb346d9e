// ECL - ecl-core
// Module: Tracing integration
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tracing support for the container engines
//!
//! Structured spans for the few operations whose cost is not constant:
//! buffer reallocation, rehashing and ring construction. Works with both
//! std and no_std subscribers.

#![cfg(feature = "tracing")]

pub use tracing::{debug, error, info, trace, warn};
pub use tracing::{debug_span, info_span, trace_span, Level, Span};

/// Trace spans for memory strategies
#[derive(Debug, Clone)]
pub struct StrategyTrace;

impl StrategyTrace {
    /// Create a span for moving a buffer to a new capacity
    #[inline]
    pub fn reallocating(from: usize, to: usize, element_size: usize) -> Span {
        debug_span!("buffer_realloc", from = %from, to = %to, element_size = %element_size)
    }
}

/// Trace spans for node pools
#[derive(Debug, Clone)]
pub struct PoolTrace;

impl PoolTrace {
    /// Create a span for claiming a node slot
    #[inline]
    pub fn acquiring(capacity: usize, in_use: usize) -> Span {
        trace_span!("pool_acquire", capacity = %capacity, in_use = %in_use)
    }
}

/// Trace spans for the bucket engine
#[derive(Debug, Clone)]
pub struct TableTrace;

impl TableTrace {
    /// Create a span for redistributing all nodes over new buckets
    #[inline]
    pub fn rehashing(from: usize, to: usize, items: usize) -> Span {
        debug_span!("table_rehash", from = %from, to = %to, items = %items)
    }
}

/// Trace spans for ring buffers
#[derive(Debug, Clone)]
pub struct RingTrace;

impl RingTrace {
    /// Create a span for binding ring storage
    #[inline]
    pub fn binding(capacity: usize) -> Span {
        trace_span!("ring_bind", capacity = %capacity)
    }
}
