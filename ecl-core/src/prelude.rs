// ECL - ecl-core
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for ecl-core
//!
//! Re-exports the engine types and the traits whose methods callers use, so
//! a single glob import is enough to build and drive any container.

pub use ecl_error::{Error, ErrorCategory, Result};

pub use crate::contiguous::Contiguous;
pub use crate::hash_table::{
    Bucket, BucketMap, BucketSet, HashNode, HashTable, LoadFactor, EMPTY_BUCKET,
};
pub use crate::key::{
    Comparator, Identity, KeyEq, KeyOf, NaturalEq, NaturalOrder, OrderBy, PairKey, ReverseOrder,
};
#[cfg(feature = "alloc")]
pub use crate::pool::HeapNodes;
pub use crate::pool::{Access, NodeAllocator, NodeHandle, NodeIndex, Pool, SharedPool};
pub use crate::ring::{Cursor, Ring, RingIndex};
pub use crate::sorted::{Sorted, SortedMap, SortedSeq, SortedSet};
pub use crate::storage::StorageProxy;
#[cfg(feature = "alloc")]
pub use crate::strategy::Dynamic;
pub use crate::strategy::{Fixed, Handle, MemoryStrategy};
