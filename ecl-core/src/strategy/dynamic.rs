// ECL - ecl-core
// Module: Dynamic Strategy - allocator-backed growable storage
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for raw allocation and element relocation
#![allow(unsafe_code)]

//! Growable memory strategy.
//!
//! `Dynamic` obtains buffers from a [`BufferAllocator`] and relocates the
//! live elements on every capacity change. Growth through `reserve` follows
//! a fixed law so capacities are predictable:
//!
//! ```text
//! new_capacity = round_up(max(len, 2 * capacity), 8)
//! ```

use core::alloc::Layout;
use core::mem;
use core::ptr::{self, NonNull};

use ecl_error::{helpers, violation, Result};

use super::{round_up_step, Handle, MemoryStrategy, Sealed};
use crate::limits::GROWTH_FACTOR;
use crate::macros::{enter_span, trace_event};
use crate::storage::StorageProxy;

/// Source of raw buffers for [`Dynamic`].
///
/// # Safety
///
/// `allocate` must return memory valid for `layout` until it is passed back
/// to `deallocate` with the same layout.
pub unsafe trait BufferAllocator {
    /// Whether every instance draws from one shared source.
    ///
    /// Containers whose strategies share a source exchange buffers on swap
    /// instead of swapping element by element.
    const SHARED: bool;

    /// Allocates a block for `layout`. `layout.size()` is never zero.
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>>;

    /// Returns a block obtained from `allocate`.
    ///
    /// # Safety
    ///
    /// `block` must come from `allocate` on this allocator with `layout`.
    unsafe fn deallocate(&mut self, block: NonNull<u8>, layout: Layout);
}

/// The global heap allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

/// Marker whose address identifies every shared allocator.
static SHARED_SOURCE: u8 = 0;

// SAFETY: forwards to the global allocator with unchanged layouts.
unsafe impl BufferAllocator for Global {
    const SHARED: bool = true;

    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: callers never pass a zero-sized layout.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&mut self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { alloc::alloc::dealloc(block.as_ptr(), layout) }
    }
}

/// Memory strategy that grows by reallocation.
///
/// # Examples
///
/// ```
/// use ecl_core::contiguous::Contiguous;
/// use ecl_core::strategy::Dynamic;
///
/// let mut values = Contiguous::new(Dynamic::new());
/// values.push(1u32)?;
/// assert_eq!(values.capacity(), 8);
/// # Ok::<(), ecl_error::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Dynamic<A: BufferAllocator = Global> {
    allocator: A,
}

impl Dynamic<Global> {
    /// Creates a strategy over the global heap.
    #[must_use]
    pub const fn new() -> Self {
        Self { allocator: Global }
    }
}

impl<A: BufferAllocator> Dynamic<A> {
    /// Creates a strategy over `allocator`.
    pub const fn with_allocator(allocator: A) -> Self {
        Self { allocator }
    }

    /// The underlying allocator.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    fn slot_limit<T>() -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => (usize::MAX >> 1) / size,
        }
    }

    fn allocate_slots<T>(&mut self, capacity: usize) -> Result<Option<NonNull<T>>> {
        if capacity == 0 {
            return Ok(None);
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| violation::raise(helpers::layout_overflow("Buffer layout overflows")))?;
        if layout.size() == 0 {
            return Ok(Some(NonNull::dangling()));
        }
        match self.allocator.allocate(layout) {
            Some(block) => Ok(Some(block.cast::<T>())),
            None => {
                trace_event!(warn, "allocation failed", bytes = layout.size());
                Err(violation::raise(helpers::allocation_failed(
                    "Allocator returned no memory",
                )))
            }
        }
    }

    fn release_slots<T>(&mut self, data: Option<NonNull<T>>, capacity: usize) {
        let Some(data) = data else { return };
        let Ok(layout) = Layout::array::<T>(capacity) else { return };
        if layout.size() != 0 {
            // SAFETY: `data` was allocated by `allocate_slots` with this
            // very layout.
            unsafe { self.allocator.deallocate(data.cast::<u8>(), layout) };
        }
    }

    /// Moves the live elements into a fresh buffer of `capacity` slots.
    fn reallocate<T>(&mut self, proxy: &mut StorageProxy<T>, capacity: usize) -> Result<()> {
        enter_span!(crate::tracing::StrategyTrace::reallocating(
            proxy.capacity(),
            capacity,
            mem::size_of::<T>()
        ));
        let fresh = self.allocate_slots::<T>(capacity)?;
        let keep = proxy.size().min(capacity);
        proxy.truncate_to(keep);
        if let (Some(old), Some(new)) = (proxy.data(), fresh) {
            // SAFETY: both buffers hold at least `keep` slots and are
            // distinct allocations; the old slots are treated as moved-from.
            unsafe { ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), keep) };
        }
        let (old, old_capacity) = (proxy.data(), proxy.capacity());
        proxy.bind(fresh, capacity);
        self.release_slots(old, old_capacity);
        trace_event!(debug, "buffer reallocated", from = old_capacity, to = capacity);
        Ok(())
    }
}

impl<A: BufferAllocator> Sealed for Dynamic<A> {}

impl<T, A: BufferAllocator> MemoryStrategy<T> for Dynamic<A> {
    fn max_capacity(&self) -> usize {
        Self::slot_limit::<T>()
    }

    fn reserve_exactly(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()> {
        if len <= proxy.capacity() {
            return Ok(());
        }
        if len > Self::slot_limit::<T>() {
            return Err(violation::raise(helpers::layout_overflow(
                "Requested length exceeds addressable capacity",
            )));
        }
        self.reallocate(proxy, len)
    }

    fn reserve(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()> {
        if len <= proxy.capacity() {
            return Ok(());
        }
        let limit = Self::slot_limit::<T>();
        if len > limit {
            return Err(violation::raise(helpers::layout_overflow(
                "Requested length exceeds addressable capacity",
            )));
        }
        let goal = len.max(proxy.capacity().saturating_mul(GROWTH_FACTOR));
        let target = round_up_step(goal).map_or(limit, |rounded| rounded.min(limit));
        self.reallocate(proxy, target)
    }

    fn shrink_to_fit(&mut self, proxy: &mut StorageProxy<T>) {
        let size = proxy.size();
        // A failed shrink keeps the larger buffer.
        if proxy.capacity() > size && self.reallocate(proxy, size).is_err() {
            trace_event!(debug, "shrink skipped", capacity = proxy.capacity());
        }
    }

    fn resize_with<F: FnMut() -> T>(
        &mut self,
        proxy: &mut StorageProxy<T>,
        len: usize,
        fill: F,
    ) -> Result<()> {
        if len > proxy.size() {
            self.reserve(proxy, len)?;
            proxy.fill_to(len, fill);
        } else {
            proxy.truncate_to(len);
        }
        Ok(())
    }

    fn cleanup(&mut self, proxy: &mut StorageProxy<T>) {
        proxy.truncate_to(0);
        let (data, capacity) = (proxy.data(), proxy.capacity());
        proxy.bind(None, 0);
        self.release_slots(data, capacity);
    }

    fn handle(&self) -> Handle {
        if A::SHARED {
            Handle::of(&SHARED_SOURCE)
        } else {
            Handle::of(&self.allocator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ignore_violations;
    use ecl_error::ErrorCategory;

    fn filled(len: usize) -> (Dynamic, StorageProxy<u64>) {
        let mut strategy = Dynamic::new();
        let mut proxy = StorageProxy::new();
        let mut next = 0;
        strategy
            .resize_with(&mut proxy, len, || {
                next += 1;
                next
            })
            .unwrap();
        (strategy, proxy)
    }

    #[test]
    fn test_growth_law() -> Result<()> {
        let mut strategy = Dynamic::new();
        let mut proxy: StorageProxy<u8> = StorageProxy::new();

        strategy.reserve(&mut proxy, 1)?;
        assert_eq!(proxy.capacity(), 8);
        strategy.reserve(&mut proxy, 9)?;
        assert_eq!(proxy.capacity(), 16);
        strategy.reserve(&mut proxy, 17)?;
        assert_eq!(proxy.capacity(), 32);
        strategy.reserve(&mut proxy, 100)?;
        assert_eq!(proxy.capacity(), 104);

        strategy.cleanup(&mut proxy);
        Ok(())
    }

    #[test]
    fn test_reserve_exactly_has_no_headroom() -> Result<()> {
        let mut strategy = Dynamic::new();
        let mut proxy: StorageProxy<u32> = StorageProxy::new();

        strategy.reserve_exactly(&mut proxy, 3)?;
        assert_eq!(proxy.capacity(), 3);
        strategy.reserve_exactly(&mut proxy, 2)?;
        assert_eq!(proxy.capacity(), 3);

        strategy.cleanup(&mut proxy);
        Ok(())
    }

    #[test]
    fn test_reallocation_preserves_elements() -> Result<()> {
        let (mut strategy, mut proxy) = filled(5);
        strategy.reserve(&mut proxy, 40)?;
        assert_eq!(proxy.as_slice(), &[1, 2, 3, 4, 5]);

        strategy.shrink_to_fit(&mut proxy);
        assert_eq!(proxy.capacity(), 5);
        assert_eq!(proxy.as_slice(), &[1, 2, 3, 4, 5]);

        strategy.cleanup(&mut proxy);
        assert!(proxy.data().is_none());
        assert_eq!(proxy.capacity(), 0);
        Ok(())
    }

    #[test]
    fn test_resize_grows_through_reserve() -> Result<()> {
        let (mut strategy, mut proxy) = filled(3);
        assert_eq!(proxy.capacity(), 8);

        strategy.resize(&mut proxy, 10)?;
        assert_eq!(proxy.capacity(), 16);
        assert_eq!(&proxy.as_slice()[..4], &[1, 2, 3, 0]);

        strategy.resize(&mut proxy, 1)?;
        assert_eq!(proxy.as_slice(), &[1]);
        assert_eq!(proxy.capacity(), 16);

        strategy.cleanup(&mut proxy);
        Ok(())
    }

    #[test]
    fn test_zero_sized_elements() -> Result<()> {
        let mut strategy = Dynamic::new();
        let mut proxy: StorageProxy<()> = StorageProxy::new();

        strategy.resize(&mut proxy, 1000)?;
        assert_eq!(proxy.size(), 1000);
        assert_eq!(MemoryStrategy::<()>::max_capacity(&strategy), usize::MAX);

        strategy.cleanup(&mut proxy);
        Ok(())
    }

    #[test]
    fn test_oversized_request_is_resource_violation() {
        ignore_violations();
        let mut strategy = Dynamic::new();
        let mut proxy: StorageProxy<u64> = StorageProxy::new();

        let err = strategy.reserve(&mut proxy, usize::MAX).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Resource);
        assert_eq!(proxy.capacity(), 0);
    }

    #[test]
    fn test_global_strategies_share_handle() {
        let a = Dynamic::new();
        let b = Dynamic::new();
        assert_eq!(
            MemoryStrategy::<u8>::handle(&a),
            MemoryStrategy::<u8>::handle(&b)
        );
    }
}
