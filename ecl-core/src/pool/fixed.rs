// ECL - ecl-core
// Module: Pool - inline node pool with LIFO reuse
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-capacity node pool with inline storage.

use ecl_error::{helpers, violation, Result};

use super::{pop_free, vacate, NodeAllocator, NodeHandle, NodeIndex, Slot};
use crate::macros::{enter_span, trace_event};

/// A pool of `N` node slots.
///
/// Slots are claimed in index order until all `N` have been handed out once;
/// after that, released slots are reused most-recently-released first.
///
/// # Invariants
///
/// 1. `claimed <= N`
/// 2. Every slot below `claimed` is either occupied or on the free list
/// 3. `in_use + free-list length == claimed`
///
/// # Examples
///
/// ```
/// use ecl_core::pool::{NodeAllocator, Pool};
///
/// let mut pool = Pool::<u32, 2>::new();
/// let a = pool.acquire(10)?;
/// let b = pool.acquire(20)?;
/// ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
/// assert!(pool.acquire(30).is_err());
///
/// let slot = a.index();
/// assert_eq!(pool.release(a)?, 10);
/// let c = pool.acquire(40)?;
/// assert_eq!(c.index(), slot);
/// # drop((b, c));
/// # Ok::<(), ecl_error::Error>(())
/// ```
#[derive(Debug)]
pub struct Pool<T, const N: usize> {
    /// Inline slot storage
    slots: [Slot<T>; N],

    /// Most recently released slot
    free_head: Option<usize>,

    /// Number of slots ever handed out (high-water mark)
    claimed: usize,

    /// Number of occupied slots
    in_use: usize,
}

impl<T, const N: usize> Pool<T, N> {
    /// Creates a pool with all slots unclaimed.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::Unused),
            free_head: None,
            claimed: 0,
            in_use: 0,
        }
    }

    /// Number of slots handed out at least once.
    #[inline]
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    /// Borrows the node at `index`, if live.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&T> {
        self.slots.get(index.get()).and_then(Slot::as_ref)
    }

    /// Mutably borrows the node at `index`, if live.
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.slots.get_mut(index.get()).and_then(Slot::as_mut)
    }

    fn next_slot(&mut self) -> Option<usize> {
        if let Some(index) = pop_free(&self.slots, &mut self.free_head) {
            return Some(index);
        }
        if self.claimed < N {
            self.claimed += 1;
            return Some(self.claimed - 1);
        }
        None
    }
}

impl<T, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> NodeAllocator<T> for Pool<T, N> {
    type Ref<'a> = &'a T where Self: 'a;
    type RefMut<'a> = &'a mut T where Self: 'a;

    fn acquire_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<NodeHandle> {
        enter_span!(crate::tracing::PoolTrace::acquiring(N, self.in_use));
        let Some(index) = self.next_slot() else {
            trace_event!(debug, "pool exhausted", capacity = N);
            return Err(violation::raise(helpers::pool_exhausted("No free node slot available")));
        };
        self.slots[index] = Slot::Occupied(init());
        self.in_use += 1;
        Ok(NodeHandle::new(index))
    }

    fn release(&mut self, handle: NodeHandle) -> Result<T> {
        let index = handle.index().get();
        let value = vacate(&mut self.slots, &mut self.free_head, index).ok_or_else(|| {
            violation::raise(helpers::invalid_release("Handle does not own a live node"))
        })?;
        self.in_use -= 1;
        Ok(value)
    }

    fn node(&self, index: NodeIndex) -> Option<&T> {
        self.get(index)
    }

    fn node_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.get_mut(index)
    }

    fn capacity(&self) -> usize {
        N
    }

    fn in_use(&self) -> usize {
        self.in_use
    }
}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_exhaustion_and_reuse() {
        ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
        let mut pool: Pool<u8, 2> = Pool::new();
        let a = pool.acquire(1).unwrap();
        let _b = pool.acquire(2).unwrap();
        assert!(pool.acquire(3).is_err());

        let slot = a.index();
        assert!(pool.release(a).is_ok());
        let c = pool.acquire(4).unwrap();
        assert!(c.index() == slot);
    }
}

// ============================================================================
// Tests
// ============================================================================
