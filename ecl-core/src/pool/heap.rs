// ECL - ecl-core
// Module: HeapNodes - growable node slab
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Node allocator that grows on demand.

use alloc::vec::Vec;

use ecl_error::{helpers, violation, Result};

use super::{pop_free, vacate, NodeAllocator, NodeHandle, NodeIndex, Slot};

/// Node slab over the global heap.
///
/// Same LIFO reuse as [`Pool`](super::Pool), but a fresh slot is appended
/// whenever the free list is empty. Only a failing heap can exhaust it.
#[derive(Debug)]
pub struct HeapNodes<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    in_use: usize,
}

impl<T> HeapNodes<T> {
    /// Creates an empty slab.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new(), free_head: None, in_use: 0 }
    }

    /// Number of slots allocated so far.
    pub fn claimed(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for HeapNodes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeAllocator<T> for HeapNodes<T> {
    type Ref<'a> = &'a T where Self: 'a;
    type RefMut<'a> = &'a mut T where Self: 'a;

    fn acquire_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<NodeHandle> {
        let index = match pop_free(&self.slots, &mut self.free_head) {
            Some(index) => {
                self.slots[index] = Slot::Occupied(init());
                index
            }
            None => {
                self.slots.try_reserve(1).map_err(|_| {
                    violation::raise(helpers::allocation_failed("Node slab cannot grow"))
                })?;
                self.slots.push(Slot::Occupied(init()));
                self.slots.len() - 1
            }
        };
        self.in_use += 1;
        Ok(NodeHandle::new(index))
    }

    fn release(&mut self, handle: NodeHandle) -> Result<T> {
        let value = vacate(&mut self.slots, &mut self.free_head, handle.index().get())
            .ok_or_else(|| {
                violation::raise(helpers::invalid_release("Handle does not own a live node"))
            })?;
        self.in_use -= 1;
        Ok(value)
    }

    fn node(&self, index: NodeIndex) -> Option<&T> {
        self.slots.get(index.get()).and_then(Slot::as_ref)
    }

    fn node_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.slots.get_mut(index.get()).and_then(Slot::as_mut)
    }

    fn capacity(&self) -> usize {
        usize::MAX
    }

    fn in_use(&self) -> usize {
        self.in_use
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_and_reuses() -> Result<()> {
        let mut nodes = HeapNodes::new();
        let handles: Vec<NodeHandle> =
            (0..100u32).map(|v| nodes.acquire(v)).collect::<Result<_>>()?;
        assert_eq!(nodes.in_use(), 100);
        assert!(!nodes.is_exhausted());

        let mut handles = handles.into_iter();
        let first = handles.next().map(|h| nodes.release(h));
        assert_eq!(first, Some(Ok(0)));

        let again = nodes.acquire(500)?;
        assert_eq!(again.index().get(), 0);
        assert_eq!(nodes.claimed(), 100);
        drop(again);
        Ok(())
    }
}
