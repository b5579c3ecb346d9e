// ECL - ecl-core
// Module: SharedPool - one pool serving several containers
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A pool shared between containers.
//!
//! The caller owns the `RefCell<Pool>` and hands each container a
//! [`SharedPool`] pointing at it. There is no process-wide registry: the
//! sharing relation is visible in the code that builds the containers.
//!
//! ```
//! use core::cell::RefCell;
//! use ecl_core::pool::{NodeAllocator, Pool, SharedPool};
//!
//! let cell = RefCell::new(Pool::<u16, 3>::new());
//! let mut left = SharedPool::new(&cell);
//! let mut right = SharedPool::new(&cell);
//!
//! let a = left.acquire(1)?;
//! let b = right.acquire(2)?;
//! assert_eq!(cell.borrow().in_use(), 2);
//! left.release(a)?;
//! right.release(b)?;
//! # Ok::<(), ecl_error::Error>(())
//! ```

use core::cell::{Ref, RefCell, RefMut};

use ecl_error::{helpers, violation, Result};

use super::{Access, NodeAllocator, NodeHandle, NodeIndex, Pool};

/// Handle to a caller-owned pool shared by several containers.
///
/// Node borrows are `RefCell` guards; holding one while acquiring through
/// another handle to the same pool is reported as a misuse violation.
#[derive(Debug)]
pub struct SharedPool<'p, T, const N: usize> {
    cell: &'p RefCell<Pool<T, N>>,
}

impl<'p, T, const N: usize> SharedPool<'p, T, N> {
    /// Creates a handle to `cell`.
    pub const fn new(cell: &'p RefCell<Pool<T, N>>) -> Self {
        Self { cell }
    }

    /// Whether both handles refer to the same pool.
    pub fn shares_with(&self, other: &Self) -> bool {
        core::ptr::eq(self.cell, other.cell)
    }

    fn pool_mut(&self) -> Result<RefMut<'p, Pool<T, N>>> {
        self.cell.try_borrow_mut().map_err(|_| busy())
    }
}

fn busy() -> ecl_error::Error {
    violation::raise(helpers::shared_pool_busy("Shared pool already borrowed"))
}

impl<T, const N: usize> Clone for SharedPool<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for SharedPool<'_, T, N> {}

impl<'p, T, const N: usize> NodeAllocator<T> for SharedPool<'p, T, N> {
    type Ref<'a> = Ref<'a, T> where Self: 'a;
    type RefMut<'a> = RefMut<'a, T> where Self: 'a;

    fn acquire_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<NodeHandle> {
        self.pool_mut()?.acquire_with(init)
    }

    fn release(&mut self, handle: NodeHandle) -> Result<T> {
        self.pool_mut()?.release(handle)
    }

    fn node(&self, index: NodeIndex) -> Option<Ref<'_, T>> {
        let pool = self.cell.try_borrow().ok()?;
        Ref::filter_map(pool, |pool| pool.get(index)).ok()
    }

    fn node_mut(&mut self, index: NodeIndex) -> Option<RefMut<'_, T>> {
        let pool = self.cell.try_borrow_mut().ok()?;
        RefMut::filter_map(pool, |pool| pool.get_mut(index)).ok()
    }

    fn check_access(&self, access: Access) -> Result<()> {
        let free = match access {
            Access::Shared => self.cell.try_borrow().is_ok(),
            Access::Exclusive => self.cell.try_borrow_mut().is_ok(),
        };
        if free { Ok(()) } else { Err(busy()) }
    }

    fn capacity(&self) -> usize {
        N
    }

    fn in_use(&self) -> usize {
        self.cell.try_borrow().map_or(N, |pool| pool.in_use())
    }
}
