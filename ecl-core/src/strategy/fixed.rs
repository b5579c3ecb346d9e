// ECL - ecl-core
// Module: Fixed Strategy - caller-supplied, never-moving storage
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-capacity memory strategy.
//!
//! `Fixed` borrows a buffer of uninitialized slots for its whole lifetime.
//! The buffer is bound to the proxy on first use and never replaced, so the
//! data location is stable for as long as the container lives.

use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

use ecl_error::{helpers, violation, Result};

use super::{Handle, MemoryStrategy, Sealed};
use crate::storage::StorageProxy;

/// Memory strategy over a borrowed slot buffer of fixed size.
///
/// # Examples
///
/// ```
/// use core::mem::MaybeUninit;
/// use ecl_core::contiguous::Contiguous;
/// use ecl_core::strategy::Fixed;
///
/// let mut slots = [MaybeUninit::<u32>::uninit(); 4];
/// let mut values = Contiguous::new(Fixed::new(&mut slots));
/// for v in 0..4 {
///     values.push(v)?;
/// }
/// ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
/// assert!(values.push(4).is_err());
/// # Ok::<(), ecl_error::Error>(())
/// ```
#[derive(Debug)]
pub struct Fixed<'a, T> {
    /// Start of the borrowed buffer
    data: NonNull<T>,

    /// Number of slots in the buffer
    capacity: usize,

    /// Ties the strategy to the buffer borrow
    _buffer: PhantomData<&'a mut [MaybeUninit<T>]>,
}

impl<'a, T> Fixed<'a, T> {
    /// Creates a strategy over `buffer`.
    pub fn new(buffer: &'a mut [MaybeUninit<T>]) -> Self {
        let capacity = buffer.len();
        let data = NonNull::from(buffer).cast::<T>();
        Self { data, capacity, _buffer: PhantomData }
    }

    /// Number of slots in the borrowed buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn bind(&self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()> {
        if len > self.capacity {
            return Err(violation::raise(helpers::capacity_exceeded(
                "Requested length exceeds fixed capacity",
            )));
        }
        if proxy.capacity() != self.capacity {
            proxy.bind(Some(self.data), self.capacity);
        }
        Ok(())
    }
}

impl<T> Sealed for Fixed<'_, T> {}

impl<T> MemoryStrategy<T> for Fixed<'_, T> {
    fn max_capacity(&self) -> usize {
        self.capacity
    }

    fn reserve_exactly(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()> {
        self.bind(proxy, len)
    }

    fn reserve(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()> {
        self.bind(proxy, len)
    }

    fn shrink_to_fit(&mut self, proxy: &mut StorageProxy<T>) {
        // The buffer cannot shrink; capacity is restored to the full buffer.
        proxy.bind(Some(self.data), self.capacity);
    }

    fn resize_with<F: FnMut() -> T>(
        &mut self,
        proxy: &mut StorageProxy<T>,
        len: usize,
        fill: F,
    ) -> Result<()> {
        self.bind(proxy, len)?;
        if len > proxy.size() {
            proxy.fill_to(len, fill);
        } else {
            proxy.truncate_to(len);
        }
        Ok(())
    }

    fn cleanup(&mut self, proxy: &mut StorageProxy<T>) {
        proxy.truncate_to(0);
    }

    fn handle(&self) -> Handle {
        Handle::of(self.data.as_ptr())
    }
}
