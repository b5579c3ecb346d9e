// ECL - ecl-core
// Module: Memory Strategies - capacity management for contiguous storage
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Memory strategies decide where a container's elements live.
//!
//! A strategy owns a capacity policy and mutates the [`StorageProxy`] bound
//! to it. Two strategies exist:
//!
//! - [`Fixed`]: a caller-supplied buffer that never moves and never grows
//! - [`Dynamic`]: a buffer obtained from a [`BufferAllocator`], grown by
//!   doubling and rounded to multiples of [`GROWTH_ROUND_STEP`]
//!
//! The set is closed; [`MemoryStrategy`] is sealed.
//!
//! [`GROWTH_ROUND_STEP`]: crate::limits::GROWTH_ROUND_STEP

mod fixed;
pub use fixed::Fixed;

#[cfg(feature = "alloc")]
mod dynamic;
#[cfg(feature = "alloc")]
pub use dynamic::{BufferAllocator, Dynamic, Global};

use ecl_error::Result;

use crate::storage::StorageProxy;

mod sealed {
    pub trait Sealed {}
}
pub(crate) use sealed::Sealed;

/// Identity of the backing memory source of a strategy.
///
/// Two strategies with equal handles draw from the same source, so their
/// buffers may be exchanged wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub(crate) fn of<U: ?Sized>(source: *const U) -> Self {
        Self(source.cast::<()>() as usize)
    }
}

/// Capacity policy for one container's contiguous buffer.
///
/// Every operation either succeeds or reports a capacity or resource
/// violation and leaves the proxy unchanged.
pub trait MemoryStrategy<T>: Sealed {
    /// Largest capacity this strategy can ever provide.
    fn max_capacity(&self) -> usize;

    /// Ensures `capacity >= len` without extra headroom.
    fn reserve_exactly(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()>;

    /// Ensures `capacity >= len`, possibly with headroom.
    fn reserve(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()>;

    /// Reduces capacity toward the live size where the strategy can.
    fn shrink_to_fit(&mut self, proxy: &mut StorageProxy<T>);

    /// Sets the live size to `len`, constructing new elements with `fill`
    /// or destroying the surplus.
    fn resize_with<F: FnMut() -> T>(
        &mut self,
        proxy: &mut StorageProxy<T>,
        len: usize,
        fill: F,
    ) -> Result<()>;

    /// Sets the live size to `len`, filling with default values.
    fn resize(&mut self, proxy: &mut StorageProxy<T>, len: usize) -> Result<()>
    where
        T: Default,
    {
        self.resize_with(proxy, len, T::default)
    }

    /// Sets the live size to `len`, filling with clones of `value`.
    fn resize_fill(&mut self, proxy: &mut StorageProxy<T>, len: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.resize_with(proxy, len, || value.clone())
    }

    /// Destroys all live elements and returns any owned buffer.
    fn cleanup(&mut self, proxy: &mut StorageProxy<T>);

    /// Identity of the memory source.
    fn handle(&self) -> Handle;
}

/// Rounds `len` up to the next multiple of the growth step.
///
/// Returns `None` on overflow.
#[inline]
pub(crate) fn round_up_step(len: usize) -> Option<usize> {
    let step = crate::limits::GROWTH_ROUND_STEP;
    len.checked_add(step - 1).map(|padded| padded / step * step)
}
