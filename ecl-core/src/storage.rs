// ECL - ecl-core
// Module: Storage Proxy - view of a contiguous element buffer
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for raw buffer access (every block carries a SAFETY note)
#![allow(unsafe_code)]

//! The storage proxy shared by containers and their memory strategy.
//!
//! A [`StorageProxy`] records where a container's elements live, how many are
//! live and how many fit. Containers read it; only the bound
//! [`MemoryStrategy`](crate::strategy::MemoryStrategy) writes it.
//!
//! # Invariants
//!
//! 1. `size <= capacity`
//! 2. `data.is_none()` exactly when `capacity == 0`
//! 3. Slots `[0, size)` hold initialized elements, slots `[size, capacity)`
//!    are uninitialized

use core::fmt;
use core::ptr::{self, NonNull};
use core::slice;

/// Data location, live length and capacity of a contiguous buffer.
pub struct StorageProxy<T> {
    /// First slot of the buffer, `None` while nothing is bound
    data: Option<NonNull<T>>,

    /// Number of initialized elements at the start of the buffer
    size: usize,

    /// Number of slots the buffer provides
    capacity: usize,
}

impl<T> StorageProxy<T> {
    /// Creates an unbound proxy.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: None, size: 0, capacity: 0 }
    }

    /// Location of the first slot, if a buffer is bound.
    #[inline]
    pub fn data(&self) -> Option<NonNull<T>> {
        self.data
    }

    /// Raw pointer to the first slot, null when unbound.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.map_or(ptr::null(), |data| data.as_ptr().cast_const())
    }

    /// Number of live elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots in the bound buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.data {
            // SAFETY: slots [0, size) are initialized (invariant 3) and the
            // buffer outlives the proxy borrow.
            Some(data) => unsafe { slice::from_raw_parts(data.as_ptr(), self.size) },
            None => &[],
        }
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.data {
            // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
            Some(data) => unsafe { slice::from_raw_parts_mut(data.as_ptr(), self.size) },
            None => &mut [],
        }
    }

    /// Binds a buffer of `capacity` slots. A zero capacity unbinds.
    pub(crate) fn bind(&mut self, data: Option<NonNull<T>>, capacity: usize) {
        self.data = if capacity == 0 { None } else { data };
        self.capacity = capacity;
        debug_assert!(self.size <= self.capacity);
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        debug_assert!(size <= self.capacity);
        self.size = size;
    }

    /// Raw pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// A buffer must be bound and `index <= capacity`.
    #[inline]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        match self.data {
            // SAFETY: caller keeps `index` within the bound buffer.
            Some(data) => unsafe { data.as_ptr().add(index) },
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// Constructs elements with `fill` until `size == len`.
    ///
    /// Size is committed after each element so a panicking `fill` leaves
    /// every constructed element owned by the proxy.
    pub(crate) fn fill_to<F: FnMut() -> T>(&mut self, len: usize, mut fill: F) {
        debug_assert!(len <= self.capacity);
        while self.size < len {
            // SAFETY: size < len <= capacity, so the slot is in bounds and
            // uninitialized.
            unsafe { self.slot(self.size).write(fill()) };
            self.size += 1;
        }
    }

    /// Destroys the elements in `[len, size)` and shortens to `len`.
    pub(crate) fn truncate_to(&mut self, len: usize) {
        if len >= self.size {
            return;
        }
        let tail = self.size - len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.size = len;
        // SAFETY: slots [len, len + tail) were initialized and are now
        // outside the live range.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slot(len), tail));
        }
    }
}

impl<T> Default for StorageProxy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for StorageProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageProxy")
            .field("data", &self.as_ptr())
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;

    #[test]
    fn test_unbound_proxy() {
        let proxy: StorageProxy<u32> = StorageProxy::new();
        assert!(proxy.data().is_none());
        assert!(proxy.as_ptr().is_null());
        assert_eq!(proxy.size(), 0);
        assert_eq!(proxy.capacity(), 0);
        assert!(proxy.as_slice().is_empty());
    }

    #[test]
    fn test_fill_and_truncate() {
        let mut buffer = [MaybeUninit::<u32>::uninit(); 4];
        let mut proxy = StorageProxy::new();
        proxy.bind(NonNull::new(buffer.as_mut_ptr().cast::<u32>()), 4);

        let mut next = 0;
        proxy.fill_to(3, || {
            next += 1;
            next
        });
        assert_eq!(proxy.as_slice(), &[1, 2, 3]);

        proxy.truncate_to(1);
        assert_eq!(proxy.as_slice(), &[1]);

        // Truncating to a larger length is a no-op
        proxy.truncate_to(3);
        assert_eq!(proxy.size(), 1);
    }

    #[test]
    fn test_zero_capacity_unbinds() {
        let mut buffer = [MaybeUninit::<u8>::uninit(); 2];
        let mut proxy = StorageProxy::new();
        proxy.bind(NonNull::new(buffer.as_mut_ptr().cast::<u8>()), 0);
        assert!(proxy.data().is_none());
    }
}
