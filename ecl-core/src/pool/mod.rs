// ECL - ecl-core
// Module: Node pools - fixed-size node allocation
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Node allocation for node-based engines.
//!
//! Node-based engines (the bucket engine) never allocate nodes themselves.
//! They draw them from a [`NodeAllocator`]:
//!
//! - [`Pool`]: `N` inline slots, claimed lazily, reused LIFO
//! - [`SharedPool`]: one `Pool` shared by several containers through a
//!   `RefCell` the caller owns
//! - [`HeapNodes`]: a growable slab over the heap (feature `alloc`)
//!
//! Acquiring a node yields a [`NodeHandle`], a move-only token. Releasing
//! consumes the token, so a node cannot be released twice through safe code.
//! Engines link nodes through copyable [`NodeIndex`] values.

mod fixed;
mod shared;

#[cfg(feature = "alloc")]
mod heap;

pub use fixed::Pool;
#[cfg(feature = "alloc")]
pub use heap::HeapNodes;
pub use shared::SharedPool;

use core::ops::{Deref, DerefMut};

use ecl_error::Result;

/// Position of a node inside its allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw slot number.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Ownership token for one acquired node.
///
/// Not `Clone`: whoever holds the handle is the only party that may release
/// the node.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a handle leaks its node until the pool is dropped"]
pub struct NodeHandle(NodeIndex);

impl NodeHandle {
    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        Self(NodeIndex(slot))
    }

    /// The node this handle owns.
    #[inline]
    pub const fn index(&self) -> NodeIndex {
        self.0
    }
}

/// Kind of node borrow a container is about to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reads through [`NodeAllocator::node`]
    Shared,
    /// Writes through [`NodeAllocator::node_mut`], acquire or release
    Exclusive,
}

/// Source of fixed-size nodes for node-based containers.
pub trait NodeAllocator<T> {
    /// Shared borrow of a live node.
    type Ref<'a>: Deref<Target = T>
    where
        Self: 'a;

    /// Exclusive borrow of a live node.
    type RefMut<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    /// Claims a slot and constructs the node with `init`.
    ///
    /// `init` runs only after a slot is secured.
    ///
    /// # Errors
    ///
    /// Resource violation when no slot is available.
    fn acquire_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<NodeHandle>;

    /// Claims a slot for `value`.
    fn acquire(&mut self, value: T) -> Result<NodeHandle> {
        self.acquire_with(move || value)
    }

    /// Returns the node owned by `handle` to the free list.
    ///
    /// # Errors
    ///
    /// Misuse violation when the handle's slot is not live here.
    fn release(&mut self, handle: NodeHandle) -> Result<T>;

    /// Borrows the node at `index`, if live.
    fn node(&self, index: NodeIndex) -> Option<Self::Ref<'_>>;

    /// Mutably borrows the node at `index`, if live.
    fn node_mut(&mut self, index: NodeIndex) -> Option<Self::RefMut<'_>>;

    /// Checks that nodes can be borrowed with `access` right now.
    ///
    /// Containers call this before a multi-step relink so that a refused
    /// borrow leaves them untouched. Allocators that own their slots always
    /// succeed.
    ///
    /// # Errors
    ///
    /// Misuse violation while a conflicting borrow is live.
    fn check_access(&self, access: Access) -> Result<()> {
        let _ = access;
        Ok(())
    }

    /// Total number of node slots.
    fn capacity(&self) -> usize;

    /// Number of live nodes.
    fn in_use(&self) -> usize;

    /// Number of nodes that can still be acquired.
    fn available(&self) -> usize {
        self.capacity().saturating_sub(self.in_use())
    }

    /// Whether the next acquisition would fail.
    fn is_exhausted(&self) -> bool {
        self.available() == 0
    }
}

/// State of one node slot.
#[derive(Debug)]
enum Slot<T> {
    /// Never claimed
    Unused,
    /// Released; links to the next free slot
    Free { next: Option<usize> },
    /// Holds a live node
    Occupied(T),
}

impl<T> Slot<T> {
    fn as_ref(&self) -> Option<&T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Unused | Slot::Free { .. } => None,
        }
    }

    fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Unused | Slot::Free { .. } => None,
        }
    }
}

/// Pops the most recently freed slot.
fn pop_free<T>(slots: &[Slot<T>], head: &mut Option<usize>) -> Option<usize> {
    let index = (*head)?;
    *head = match slots.get(index) {
        Some(Slot::Free { next }) => *next,
        // A corrupted list is cut here rather than followed.
        _ => None,
    };
    Some(index)
}

/// Moves the node out of `slots[index]` and pushes the slot onto the free
/// list. Returns `None` if the slot is not live.
fn vacate<T>(slots: &mut [Slot<T>], head: &mut Option<usize>, index: usize) -> Option<T> {
    let slot = slots.get_mut(index)?;
    if slot.as_ref().is_none() {
        return None;
    }
    match core::mem::replace(slot, Slot::Free { next: *head }) {
        Slot::Occupied(value) => {
            *head = Some(index);
            Some(value)
        }
        Slot::Unused | Slot::Free { .. } => None,
    }
}
