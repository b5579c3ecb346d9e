// ECL - ecl-error
// Module: ECL Error Codes
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for ECL

// Capacity error codes (1000-1999)
/// Requested length exceeds the fixed capacity of a storage buffer
pub const CAPACITY_EXCEEDED: u16 = 1000;
/// Bucket storage cannot grow far enough to restore the load factor
pub const BUCKET_CAPACITY_EXCEEDED: u16 = 1001;
/// Element-wise swap impossible because one side is too small
pub const SWAP_CAPACITY_EXCEEDED: u16 = 1002;
/// Ring buffer is full
pub const RING_FULL: u16 = 1003;

// Resource error codes (2000-2999)
/// No free node slot left in a pool
pub const POOL_EXHAUSTED: u16 = 2000;
/// The backing allocator returned no memory
pub const ALLOCATION_FAILED: u16 = 2001;
/// Requested length cannot be expressed as a memory layout
pub const LAYOUT_OVERFLOW: u16 = 2002;

// Misuse error codes (3000-3999)
/// A handle was released that does not name an in-use slot of this pool
pub const INVALID_RELEASE: u16 = 3000;
/// Access or erase at a position outside the live range
pub const OUT_OF_RANGE: u16 = 3001;
/// A shared pool is borrowed elsewhere
pub const SHARED_POOL_BUSY: u16 = 3002;

// Configuration error codes (4000-4999)
/// Construction parameter outside its valid domain
pub const INVALID_CONFIGURATION: u16 = 4000;
/// Bucket count of zero
pub const ZERO_BUCKET_COUNT: u16 = 4001;
/// Load factor with a zero numerator or denominator
pub const INVALID_LOAD_FACTOR: u16 = 4002;
