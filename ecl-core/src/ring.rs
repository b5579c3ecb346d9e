// ECL - ecl-core
// Module: Ring - circular buffer over logical offsets
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for slot-level construction in the bound buffer
#![allow(unsafe_code)]

//! Ring buffer and its index translator.
//!
//! [`RingIndex`] maps logical offsets (0 = front) to physical slots:
//!
//! ```text
//! physical = (front + logical) % capacity
//! ```
//!
//! [`Ring`] uses it over a buffer obtained from a memory strategy. All access
//! goes through the translation; callers never see physical indices.
//!
//! # Examples
//!
//! ```
//! use core::mem::MaybeUninit;
//! use ecl_core::ring::Ring;
//! use ecl_core::strategy::Fixed;
//!
//! let mut slots = [MaybeUninit::<u8>::uninit(); 4];
//! let mut ring = Ring::new(Fixed::new(&mut slots), 4)?;
//! for v in 1..=4 {
//!     ring.push_back(v)?;
//! }
//! // Report violations as plain errors instead of aborting.
//! ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
//! assert!(ring.push_back(5).is_err());
//! assert_eq!(ring.push_back_overwrite(5), Some(1));
//! assert!(ring.iter().copied().eq([2, 3, 4, 5]));
//! # Ok::<(), ecl_error::Error>(())
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use ecl_error::{helpers, violation, Result};

use crate::macros::enter_span;
use crate::storage::StorageProxy;
use crate::strategy::MemoryStrategy;

/// Logical-to-physical index translation for a circular buffer.
///
/// # Invariants
///
/// 1. `size <= capacity`
/// 2. `front < capacity` whenever `capacity > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingIndex {
    capacity: usize,
    front: usize,
    size: usize,
}

impl RingIndex {
    /// An empty translator over `capacity` slots.
    pub const fn new(capacity: usize) -> Self {
        Self { capacity, front: 0, size: 0 }
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live elements.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Physical slot of the front element.
    #[inline]
    pub const fn front_physical(&self) -> usize {
        self.front
    }

    /// Whether no slot is free.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    /// Physical slot for `logical`. Offsets up to `capacity` wrap.
    #[inline]
    pub const fn physical_of(&self, logical: usize) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        (self.front + logical % self.capacity) % self.capacity
    }

    /// Claims the slot past the logical end and returns it.
    fn grow_back(&mut self) -> usize {
        let slot = self.physical_of(self.size);
        self.size += 1;
        slot
    }

    /// Claims the slot before the front and returns it.
    fn grow_front(&mut self) -> usize {
        self.front = self.physical_of(self.capacity - 1);
        self.size += 1;
        self.front
    }

    /// Releases the front slot and returns it.
    fn shrink_front(&mut self) -> usize {
        let slot = self.front;
        self.front = self.physical_of(1);
        self.size -= 1;
        slot
    }

    /// Releases the back slot and returns it.
    fn shrink_back(&mut self) -> usize {
        self.size -= 1;
        self.physical_of(self.size)
    }
}

/// Fixed-capacity double-ended ring.
///
/// The capacity is fixed when the ring is built. Pushing into a full ring is
/// a capacity violation; [`push_back_overwrite`](Self::push_back_overwrite)
/// is the explicit way to evict the oldest element instead.
pub struct Ring<T, S: MemoryStrategy<T>> {
    /// Bound buffer; its size stays 0, the ring tracks liveness itself
    proxy: StorageProxy<T>,
    strategy: S,
    index: RingIndex,
}

impl<T, S: MemoryStrategy<T>> Ring<T, S> {
    /// Binds a buffer of `capacity` slots from `strategy`.
    ///
    /// # Errors
    ///
    /// Configuration error for a zero capacity; capacity or resource
    /// violation when the strategy cannot provide the slots.
    pub fn new(mut strategy: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(violation::raise(helpers::invalid_configuration(
                "Ring capacity must be non-zero",
            )));
        }
        enter_span!(crate::tracing::RingTrace::binding(capacity));
        let mut proxy = StorageProxy::new();
        strategy.reserve_exactly(&mut proxy, capacity)?;
        Ok(Self { proxy, strategy, index: RingIndex::new(capacity) })
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.size()
    }

    /// Whether the ring is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }

    /// Whether the ring is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.index.is_full()
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// The index translator.
    #[inline]
    pub fn translator(&self) -> &RingIndex {
        &self.index
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    ///
    /// Capacity violation when the ring is full.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.ensure_room()?;
        let slot = self.index.grow_back();
        // SAFETY: the slot was outside the live range and is < capacity.
        unsafe { self.proxy.slot(slot).write(value) };
        Ok(())
    }

    /// Prepends `value` at the front.
    ///
    /// # Errors
    ///
    /// Capacity violation when the ring is full.
    pub fn push_front(&mut self, value: T) -> Result<()> {
        self.ensure_room()?;
        let slot = self.index.grow_front();
        // SAFETY: as in `push_back`.
        unsafe { self.proxy.slot(slot).write(value) };
        Ok(())
    }

    /// Appends `value`, evicting and returning the front element if full.
    pub fn push_back_overwrite(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() { self.pop_front() } else { None };
        let slot = self.index.grow_back();
        // SAFETY: a slot is free after the eviction above.
        unsafe { self.proxy.slot(slot).write(value) };
        evicted
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.index.shrink_front();
        // SAFETY: the slot held the front element and just left the live
        // range, so it is read exactly once.
        Some(unsafe { self.proxy.slot(slot).read() })
    }

    /// Removes and returns the back element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.index.shrink_back();
        // SAFETY: as in `pop_front`.
        Some(unsafe { self.proxy.slot(slot).read() })
    }

    /// Element at logical offset `offset`.
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len() {
            return None;
        }
        // SAFETY: offset is inside the live range, so the slot is
        // initialized.
        Some(unsafe { &*self.proxy.slot(self.index.physical_of(offset)) })
    }

    /// Element at logical offset `offset`, mutably.
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.len() {
            return None;
        }
        // SAFETY: as in `get`; `&mut self` guarantees exclusivity.
        Some(unsafe { &mut *self.proxy.slot(self.index.physical_of(offset)) })
    }

    /// The front element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// The back element.
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Destroys every element.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Cursor at logical offset `offset`, clamped to `len()`.
    pub fn cursor(&self, offset: usize) -> Cursor<'_, T, S> {
        Cursor { ring: self, offset: offset.min(self.len()) }
    }

    /// Cursor at the front.
    pub fn begin(&self) -> Cursor<'_, T, S> {
        self.cursor(0)
    }

    /// Cursor one past the back.
    pub fn end(&self) -> Cursor<'_, T, S> {
        self.cursor(self.len())
    }

    /// Elements front to back.
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter { ring: self, head: 0, tail: self.len() }
    }

    fn ensure_room(&self) -> Result<()> {
        if self.is_full() {
            return Err(violation::raise(helpers::ring_full("Ring buffer is full")));
        }
        Ok(())
    }
}

impl<T, S: MemoryStrategy<T>> Drop for Ring<T, S> {
    fn drop(&mut self) {
        self.clear();
        self.strategy.cleanup(&mut self.proxy);
    }
}

impl<T: fmt::Debug, S: MemoryStrategy<T>> fmt::Debug for Ring<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, S: MemoryStrategy<T>> IntoIterator for &'a Ring<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Position in a ring, held as a logical offset.
///
/// Moving a cursor only changes the offset; dereferencing translates it.
/// Cursors compare and subtract by offset.
pub struct Cursor<'a, T, S: MemoryStrategy<T>> {
    ring: &'a Ring<T, S>,
    offset: usize,
}

impl<'a, T, S: MemoryStrategy<T>> Cursor<'a, T, S> {
    /// Logical offset from the front.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Element under the cursor; `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.ring.get(self.offset)
    }

    /// Moves `n` elements toward the back, stopping at the end position.
    pub fn advance(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.ring.len());
    }

    /// Moves `n` elements toward the front, stopping at the front.
    pub fn retreat(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Signed number of elements from `origin` to `self`.
    pub fn distance_from(&self, origin: &Self) -> isize {
        if self.offset >= origin.offset {
            isize::try_from(self.offset - origin.offset).unwrap_or(isize::MAX)
        } else {
            isize::try_from(origin.offset - self.offset).map_or(isize::MIN, |d| -d)
        }
    }
}

impl<T, S: MemoryStrategy<T>> Clone for Cursor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: MemoryStrategy<T>> Copy for Cursor<'_, T, S> {}

impl<T, S: MemoryStrategy<T>> PartialEq for Cursor<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.ring, other.ring) && self.offset == other.offset
    }
}

impl<T, S: MemoryStrategy<T>> Eq for Cursor<'_, T, S> {}

impl<T, S: MemoryStrategy<T>> PartialOrd for Cursor<'_, T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        core::ptr::eq(self.ring, other.ring).then(|| self.offset.cmp(&other.offset))
    }
}

impl<T, S: MemoryStrategy<T>> fmt::Debug for Cursor<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("offset", &self.offset).finish()
    }
}

/// Front-to-back iterator over a [`Ring`].
pub struct Iter<'a, T, S: MemoryStrategy<T>> {
    ring: &'a Ring<T, S>,
    head: usize,
    tail: usize,
}

impl<'a, T, S: MemoryStrategy<T>> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        let item = self.ring.get(self.head);
        self.head += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<'a, T, S: MemoryStrategy<T>> DoubleEndedIterator for Iter<'a, T, S> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        self.ring.get(self.tail)
    }
}

impl<T, S: MemoryStrategy<T>> ExactSizeIterator for Iter<'_, T, S> {}

impl<T, S: MemoryStrategy<T>> FusedIterator for Iter<'_, T, S> {}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    fn verify_translation_in_bounds() {
        let capacity: usize = kani::any();
        let front: usize = kani::any();
        let logical: usize = kani::any();
        kani::assume(capacity > 0 && capacity <= 64);
        kani::assume(front < capacity);
        kani::assume(logical <= capacity);

        let index = RingIndex { capacity, front, size: 0 };
        assert!(index.physical_of(logical) < capacity);
    }
}

// ============================================================================
// Tests
// ============================================================================
