// ECL - ecl-core
// Module: Contiguous - strategy-backed vector storage
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for in-place element shifting
#![allow(unsafe_code)]

//! Contiguous element storage over a memory strategy.
//!
//! `Contiguous<T, S>` pairs a [`StorageProxy`] with the [`MemoryStrategy`]
//! that manages it. The same container type works over a fixed buffer or a
//! growable heap buffer; only `S` changes.
//!
//! # Characteristics
//!
//! - **Strategy-agnostic**: push, insert, remove behave alike for all `S`
//! - **Stable fixed storage**: with [`Fixed`](crate::strategy::Fixed) the data
//!   pointer never changes
//! - **RAII cleanup**: dropping the container runs the strategy's cleanup

use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr;

use ecl_error::{helpers, violation, Result};

use crate::storage::StorageProxy;
use crate::strategy::{Handle, MemoryStrategy};

/// A vector whose buffer is governed by a memory strategy.
///
/// # Invariants
///
/// 1. `len() <= capacity() <= max_capacity()`
/// 2. Elements `[0, len())` are initialized and owned by the container
///
/// # Examples
///
/// ```
/// use ecl_core::contiguous::Contiguous;
/// use ecl_core::strategy::Dynamic;
///
/// let mut values = Contiguous::new(Dynamic::new());
/// values.push(3)?;
/// values.insert(0, 1)?;
/// assert_eq!(values.as_slice(), &[1, 3]);
/// assert_eq!(values.remove(1)?, 3);
/// # Ok::<(), ecl_error::Error>(())
/// ```
pub struct Contiguous<T, S: MemoryStrategy<T>> {
    /// Location, size and capacity of the buffer
    proxy: StorageProxy<T>,

    /// Capacity policy mutating `proxy`
    strategy: S,
}

impl<T, S: MemoryStrategy<T>> Contiguous<T, S> {
    /// Creates an empty container. No storage is bound until first use.
    pub fn new(strategy: S) -> Self {
        Self { proxy: StorageProxy::new(), strategy }
    }

    /// Creates an empty container with room for `capacity` elements.
    pub fn with_capacity(strategy: S, capacity: usize) -> Result<Self> {
        let mut container = Self::new(strategy);
        container.reserve_exact(capacity)?;
        Ok(container)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.proxy.size()
    }

    /// Whether the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.proxy.size() == 0
    }

    /// Number of slots currently bound.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.proxy.capacity()
    }

    /// Largest capacity the strategy can provide.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.strategy.max_capacity()
    }

    /// Raw pointer to the first slot, null when unbound.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.proxy.as_ptr()
    }

    /// Identity of the strategy's memory source.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.strategy.handle()
    }

    /// The storage proxy.
    #[inline]
    pub fn proxy(&self) -> &StorageProxy<T> {
        &self.proxy
    }

    /// The memory strategy.
    #[inline]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.proxy.as_slice()
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.proxy.as_mut_slice()
    }

    /// Ensures room for `additional` more elements, with headroom.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let len = self.required(additional)?;
        self.strategy.reserve(&mut self.proxy, len)
    }

    /// Ensures room for `additional` more elements, without headroom.
    pub fn reserve_exact(&mut self, additional: usize) -> Result<()> {
        let len = self.required(additional)?;
        self.strategy.reserve_exactly(&mut self.proxy, len)
    }

    /// Releases surplus capacity where the strategy can.
    pub fn shrink_to_fit(&mut self) {
        self.strategy.shrink_to_fit(&mut self.proxy);
    }

    /// Appends `value`.
    ///
    /// # Errors
    ///
    /// Capacity or resource violation when no slot can be provided. The
    /// container is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<()> {
        let len = self.len();
        if len == self.capacity() {
            self.reserve(1)?;
        }
        // SAFETY: len < capacity after the reserve; the slot is vacant.
        unsafe { self.proxy.slot(len).write(value) };
        self.proxy.set_size(len + 1);
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len().checked_sub(1)?;
        self.proxy.set_size(len);
        // SAFETY: the slot held the last live element and is now outside
        // the live range, so it is read exactly once.
        Some(unsafe { self.proxy.slot(len).read() })
    }

    /// Inserts `value` at `index`, shifting later elements back.
    ///
    /// # Errors
    ///
    /// Misuse violation when `index > len()`; capacity or resource violation
    /// when no slot can be provided.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(violation::raise(helpers::out_of_range("Insert position past the end")));
        }
        if len == self.capacity() {
            self.reserve(1)?;
        }
        // SAFETY: index <= len < capacity. The tail moves one slot back into
        // the vacant slot at `len`, then the hole at `index` is filled.
        unsafe {
            let hole = self.proxy.slot(index);
            ptr::copy(hole, hole.add(1), len - index);
            hole.write(value);
        }
        self.proxy.set_size(len + 1);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// forward.
    ///
    /// # Errors
    ///
    /// Misuse violation when `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(violation::raise(helpers::out_of_range("Remove position out of range")));
        }
        // SAFETY: index < len. The element is read out, then the tail closes
        // the hole; the last slot becomes vacant.
        let value = unsafe {
            let hole = self.proxy.slot(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, len - index - 1);
            value
        };
        self.proxy.set_size(len - 1);
        Ok(value)
    }

    /// Destroys elements past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.proxy.truncate_to(len);
    }

    /// Destroys all elements. Capacity is kept.
    pub fn clear(&mut self) {
        self.proxy.truncate_to(0);
    }

    /// Resizes to `len`, filling with values produced by `fill`.
    pub fn resize_with<F: FnMut() -> T>(&mut self, len: usize, fill: F) -> Result<()> {
        self.strategy.resize_with(&mut self.proxy, len, fill)
    }

    /// Resizes to `len`, filling with default values.
    pub fn resize(&mut self, len: usize) -> Result<()>
    where
        T: Default,
    {
        self.strategy.resize(&mut self.proxy, len)
    }

    /// Resizes to `len`, filling with clones of `value`.
    pub fn resize_fill(&mut self, len: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.strategy.resize_fill(&mut self.proxy, len, value)
    }

    /// Exchanges contents with `other`.
    ///
    /// When both strategies draw from the same memory source the buffers are
    /// exchanged in O(1). Otherwise elements are swapped one by one, which
    /// requires each side to fit the other's length.
    ///
    /// # Errors
    ///
    /// Capacity violation when an element-wise swap cannot fit; both
    /// containers are unchanged.
    pub fn swap_with(&mut self, other: &mut Self) -> Result<()> {
        if self.handle() == other.handle() {
            core::mem::swap(&mut self.proxy, &mut other.proxy);
            return Ok(());
        }
        if self.max_capacity() < other.len() || other.max_capacity() < self.len() {
            return Err(violation::raise(helpers::swap_capacity_exceeded(
                "Element-wise swap does not fit",
            )));
        }
        let (self_len, other_len) = (self.len(), other.len());
        self.strategy.reserve_exactly(&mut self.proxy, other_len)?;
        other.strategy.reserve_exactly(&mut other.proxy, self_len)?;

        let common = self_len.min(other_len);
        self.as_mut_slice()[..common].swap_with_slice(&mut other.as_mut_slice()[..common]);
        let (longer, shorter) = if self_len > other_len { (self, other) } else { (other, self) };
        let surplus = longer.len() - common;
        // SAFETY: `shorter` has room for `longer.len()` elements after the
        // reserves above. The surplus is moved bitwise and `longer` forgets
        // it by shrinking its size.
        unsafe {
            ptr::copy_nonoverlapping(longer.proxy.slot(common), shorter.proxy.slot(common), surplus);
        }
        longer.proxy.set_size(common);
        shorter.proxy.set_size(common + surplus);
        Ok(())
    }

    fn required(&self, additional: usize) -> Result<usize> {
        self.len().checked_add(additional).ok_or_else(|| {
            violation::raise(helpers::capacity_exceeded("Requested length overflows"))
        })
    }
}

impl<T, S: MemoryStrategy<T>> Drop for Contiguous<T, S> {
    fn drop(&mut self) {
        self.strategy.cleanup(&mut self.proxy);
    }
}

impl<T, S: MemoryStrategy<T>> Deref for Contiguous<T, S> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: MemoryStrategy<T>> DerefMut for Contiguous<T, S> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, S: MemoryStrategy<T>> fmt::Debug for Contiguous<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, S: MemoryStrategy<T>> PartialEq<[T]> for Contiguous<T, S> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<'a, T, S: MemoryStrategy<T>> IntoIterator for &'a Contiguous<T, S> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
