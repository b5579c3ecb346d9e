// ECL - ecl-core
// Module: Hash Table Engine - bucket array with pooled chains
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Hash table engine for hashed sets and maps.
//!
//! A [`HashTable`] combines two independently supplied resources:
//!
//! - a bucket array, a [`Contiguous`] over any [`MemoryStrategy`]
//! - a node allocator, any [`NodeAllocator`] (pool, shared pool, heap slab)
//!
//! Each bucket holds the head of a singly linked chain of nodes. A bucket
//! slot or a node's `next` field owns the [`NodeHandle`] of the following
//! node, so every live node is owned by exactly one link.
//!
//! # Load factor
//!
//! The maximum load factor is an integer ratio. An insertion that would push
//! `len / bucket_count` above it first rehashes to the smallest bucket count
//! that restores the ratio, but at least twice the current count, clamped to
//! what the bucket strategy can hold. If the clamp cannot restore the ratio
//! the insertion fails before any node is acquired.
//!
//! Rehashing relinks the existing nodes; items never move.
//!
//! # Examples
//!
//! ```
//! use ecl_core::contiguous::Contiguous;
//! use ecl_core::hash_table::BucketSet;
//! use ecl_core::pool::Pool;
//! use ecl_core::strategy::Dynamic;
//!
//! let mut set: BucketSet<u32, _, _> = BucketSet::new(Dynamic::new(), Pool::<_, 16>::new(), 4)?;
//! assert!(set.insert(7)?.1);
//! assert!(!set.insert(7)?.1);
//! assert!(set.contains(&7)?);
//! assert_eq!(set.erase(&7)?, Some(7));
//! # Ok::<(), ecl_error::Error>(())
//! ```

use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ops::{Deref, DerefMut};

use ecl_error::{helpers, violation, Error, Result};
use rustc_hash::FxHasher;

use crate::contiguous::Contiguous;
use crate::key::{Identity, KeyEq, KeyOf, NaturalEq, PairKey};
use crate::limits::{DEFAULT_BUCKET_COUNT, DEFAULT_MAX_LOAD_FACTOR, GROWTH_FACTOR};
use crate::macros::{enter_span, trace_event};
use crate::pool::{Access, NodeAllocator, NodeHandle, NodeIndex};
use crate::strategy::MemoryStrategy;

/// Hasher used when none is given.
pub type DefaultHashBuilder = BuildHasherDefault<FxHasher>;

/// One bucket: the handle of its chain head, if any.
pub type Bucket = Option<NodeHandle>;

/// An uninitialized bucket slot, for declaring fixed bucket buffers:
/// `[EMPTY_BUCKET; 64]`.
pub const EMPTY_BUCKET: MaybeUninit<Bucket> = MaybeUninit::uninit();

/// Hashed set over a bucket strategy `B` and node allocator `A`.
pub type BucketSet<T, A, B> = HashTable<T, A, B>;

/// Hashed map of `(key, value)` pairs.
pub type BucketMap<K, V, A, B> = HashTable<(K, V), A, B, PairKey>;

/// A chain node: the item, its cached hash and the link to the next node.
#[derive(Debug)]
pub struct HashNode<T> {
    item: T,
    hash: u64,
    next: Option<NodeHandle>,
}

impl<T> HashNode<T> {
    /// The stored item.
    pub fn item(&self) -> &T {
        &self.item
    }
}

/// Maximum ratio of items to buckets, as `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadFactor {
    numerator: u32,
    denominator: u32,
}

impl LoadFactor {
    /// One item per bucket.
    pub const ONE: Self = Self { numerator: 1, denominator: 1 };

    /// Creates a ratio.
    ///
    /// # Errors
    ///
    /// Configuration error when either part is zero.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(violation::raise(helpers::invalid_load_factor(
                "Load factor parts must be non-zero",
            )));
        }
        Ok(Self { numerator, denominator })
    }

    /// Numerator of the ratio.
    pub const fn numerator(self) -> u32 {
        self.numerator
    }

    /// Denominator of the ratio.
    pub const fn denominator(self) -> u32 {
        self.denominator
    }

    /// Whether `items` fit into `buckets` under this ratio.
    pub fn admits(self, items: usize, buckets: usize) -> bool {
        items as u128 * u128::from(self.denominator) <= buckets as u128 * u128::from(self.numerator)
    }

    /// Smallest bucket count admitting `items`, at least one.
    pub fn buckets_for(self, items: usize) -> usize {
        let scaled = items as u128 * u128::from(self.denominator);
        let needed = scaled.div_ceil(u128::from(self.numerator));
        usize::try_from(needed).unwrap_or(usize::MAX).max(1)
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        let (numerator, denominator) = DEFAULT_MAX_LOAD_FACTOR;
        Self { numerator, denominator }
    }
}

/// Shared borrow of an item stored in a node.
pub struct ItemRef<R>(R);

impl<T, R: Deref<Target = HashNode<T>>> Deref for ItemRef<R> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0.item
    }
}

impl<T: fmt::Debug, R: Deref<Target = HashNode<T>>> fmt::Debug for ItemRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Exclusive borrow of an item stored in a node.
///
/// The item's key must not be changed through it.
pub struct ItemMut<R>(R);

impl<T, R: Deref<Target = HashNode<T>>> Deref for ItemMut<R> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0.item
    }
}

impl<T, R: DerefMut<Target = HashNode<T>>> DerefMut for ItemMut<R> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0.item
    }
}

/// Chained hash table.
///
/// # Invariants
///
/// 1. Every live node is reachable from exactly one bucket chain
/// 2. A node lives in bucket `hash % bucket_count()`
/// 3. `len() / bucket_count() <= max_load_factor()` after every successful
///    insertion
/// 4. `bucket_count() >= 1`
///
/// # Shared pools
///
/// With a [`SharedPool`](crate::pool::SharedPool) another container may hold
/// a node borrow while this one is called. Every operation that has to
/// borrow a node then fails with a misuse violation and leaves the table as
/// it was; relinking operations check the borrow before detaching anything.
pub struct HashTable<T, A, B, P = Identity, H = DefaultHashBuilder, E = NaturalEq>
where
    A: NodeAllocator<HashNode<T>>,
    B: MemoryStrategy<Bucket>,
{
    buckets: Contiguous<Bucket, B>,
    nodes: A,
    len: usize,
    max_load: LoadFactor,
    hasher: H,
    key_eq: E,
    _key: PhantomData<fn() -> (T, P)>,
}

impl<T, A, B, P, H, E> HashTable<T, A, B, P, H, E>
where
    A: NodeAllocator<HashNode<T>>,
    B: MemoryStrategy<Bucket>,
{
    /// Creates a table with `bucket_count` empty buckets.
    ///
    /// # Errors
    ///
    /// Configuration error for a zero bucket count; capacity or resource
    /// violation if the bucket strategy cannot hold `bucket_count` buckets.
    pub fn new(bucket_strategy: B, nodes: A, bucket_count: usize) -> Result<Self>
    where
        H: Default,
        E: Default,
    {
        Self::with_parts(bucket_strategy, nodes, bucket_count, H::default(), E::default())
    }

    /// Creates a table with the platform's default bucket count.
    pub fn with_default_buckets(bucket_strategy: B, nodes: A) -> Result<Self>
    where
        H: Default,
        E: Default,
    {
        Self::new(bucket_strategy, nodes, DEFAULT_BUCKET_COUNT)
    }

    /// Creates a table with an explicit hasher and key equality.
    pub fn with_parts(
        bucket_strategy: B,
        nodes: A,
        bucket_count: usize,
        hasher: H,
        key_eq: E,
    ) -> Result<Self> {
        if bucket_count == 0 {
            return Err(violation::raise(helpers::zero_bucket_count(
                "Hash table needs at least one bucket",
            )));
        }
        let mut buckets = Contiguous::new(bucket_strategy);
        buckets.resize_with(bucket_count, || None)?;
        Ok(Self {
            buckets,
            nodes,
            len: 0,
            max_load: LoadFactor::default(),
            hasher,
            key_eq,
            _key: PhantomData,
        })
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Current load as `(items, buckets)`.
    pub fn load_factor(&self) -> (usize, usize) {
        (self.len, self.buckets.len())
    }

    /// Maximum load factor.
    pub fn max_load_factor(&self) -> LoadFactor {
        self.max_load
    }

    /// Sets the maximum load factor. Takes effect at the next insertion.
    pub fn set_max_load_factor(&mut self, max_load: LoadFactor) {
        self.max_load = max_load;
    }

    /// The node allocator.
    pub fn nodes(&self) -> &A {
        &self.nodes
    }

    /// Number of nodes chained in bucket `bucket`.
    ///
    /// # Errors
    ///
    /// Misuse violation when a shared pool refuses the node borrow.
    pub fn bucket_size(&self, bucket: usize) -> Result<usize> {
        let mut cursor = self.buckets.get(bucket).and_then(head_index);
        let mut size = 0;
        while let Some(index) = cursor {
            size += 1;
            let node = self.nodes.node(index).ok_or_else(unavailable)?;
            cursor = head_index(&node.next);
        }
        Ok(size)
    }

    /// Items in bucket order, then chain order.
    ///
    /// Iteration stops early, after raising a misuse violation, if a shared
    /// pool refuses a node borrow.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cursor: None,
            remaining: self.len,
            _item: PhantomData,
        }
    }

    /// Removes every item, returning all nodes to the allocator.
    ///
    /// # Errors
    ///
    /// Misuse violation when a shared pool is borrowed elsewhere; no item
    /// is removed.
    pub fn clear(&mut self) -> Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        self.nodes.check_access(Access::Exclusive)?;
        for slot in self.buckets.iter_mut() {
            let mut cursor = slot.take();
            while let Some(handle) = cursor {
                cursor = self.nodes.node_mut(handle.index()).and_then(|mut node| node.next.take());
                drop(self.nodes.release(handle));
            }
        }
        self.len = 0;
        Ok(())
    }

    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len().max(1) as u64) as usize
    }

    /// Moves every node to bucket `hash % target`.
    fn rehash_to(&mut self, target: usize) -> Result<()> {
        let previous = self.buckets.len();
        if target == previous {
            return Ok(());
        }
        if self.len > 0 {
            self.nodes.check_access(Access::Exclusive)?;
        }
        enter_span!(crate::tracing::TableTrace::rehashing(previous, target, self.len));

        // Gather all chains into one detached list. Access was granted above,
        // so every chained node can be borrowed.
        let mut detached: Option<NodeHandle> = None;
        for slot in self.buckets.iter_mut() {
            let mut cursor = slot.take();
            while let Some(handle) = cursor {
                let Some(mut node) = self.nodes.node_mut(handle.index()) else { break };
                cursor = mem::replace(&mut node.next, detached.take());
                drop(node);
                detached = Some(handle);
            }
        }

        // On failure the old, now empty, bucket array is reused.
        let outcome = self.buckets.resize_with(target, || None);
        let modulus = self.buckets.len().max(1) as u64;

        while let Some(handle) = detached {
            let Some(mut node) = self.nodes.node_mut(handle.index()) else { break };
            let bucket = (node.hash % modulus) as usize;
            let Some(slot) = self.buckets.get_mut(bucket) else { break };
            detached = mem::replace(&mut node.next, slot.take());
            drop(node);
            *slot = Some(handle);
        }

        trace_event!(debug, "rehash", from = previous, to = self.buckets.len(), items = self.len);
        outcome
    }

    /// Rehashes if `items` would exceed the maximum load factor.
    fn grow_for(&mut self, items: usize) -> Result<()> {
        let count = self.buckets.len();
        if self.max_load.admits(items, count) {
            return Ok(());
        }
        let required = self.max_load.buckets_for(items);
        let target =
            required.max(count.saturating_mul(GROWTH_FACTOR)).min(self.buckets.max_capacity());
        if target < required {
            trace_event!(warn, "bucket storage exhausted", buckets = count, required = required);
            return Err(violation::raise(helpers::bucket_capacity_exceeded(
                "Bucket storage cannot restore the load factor",
            )));
        }
        self.rehash_to(target)
    }

    /// Shrinks the bucket array so that another table's bucket storage,
    /// which holds at most `limit` buckets, can take it over.
    fn compact_for(&mut self, limit: usize) -> Result<()> {
        if self.buckets.len() <= limit {
            return Ok(());
        }
        self.rehash_to(limit)
    }
}

impl<T, A, B, P, H, E> HashTable<T, A, B, P, H, E>
where
    A: NodeAllocator<HashNode<T>>,
    B: MemoryStrategy<Bucket>,
    P: KeyOf<T>,
    P::Key: Hash,
    H: BuildHasher,
    E: KeyEq<P::Key>,
{
    /// Bucket that holds, or would hold, `key`.
    pub fn bucket_of(&self, key: &P::Key) -> usize {
        self.bucket_index(self.hasher.hash_one(key))
    }

    /// Inserts `item` unless an item with an equal key exists.
    ///
    /// Returns the node holding the key and whether it was inserted.
    ///
    /// # Errors
    ///
    /// Capacity violation when the bucket storage cannot keep the load
    /// factor; resource violation when the node allocator is exhausted;
    /// misuse violation when a shared pool is borrowed elsewhere. The table
    /// is unchanged on failure.
    pub fn insert(&mut self, item: T) -> Result<(NodeIndex, bool)> {
        let hash = self.hasher.hash_one(P::key_of(&item));
        if let Some((_, index)) = self.locate(hash, P::key_of(&item))? {
            return Ok((index, false));
        }
        self.link_new(item, hash).map(|index| (index, true))
    }

    /// Inserts `item`, replacing any item with an equal key.
    ///
    /// Returns the node holding the key and the displaced item.
    pub fn insert_or_replace(&mut self, item: T) -> Result<(NodeIndex, Option<T>)> {
        let hash = self.hasher.hash_one(P::key_of(&item));
        if let Some((_, index)) = self.locate(hash, P::key_of(&item))? {
            let mut node = self.nodes.node_mut(index).ok_or_else(unavailable)?;
            let displaced = mem::replace(&mut node.item, item);
            return Ok((index, Some(displaced)));
        }
        self.link_new(item, hash).map(|index| (index, None))
    }

    /// The item with key `key`.
    ///
    /// # Errors
    ///
    /// Misuse violation when a shared pool refuses the node borrow.
    pub fn find(&self, key: &P::Key) -> Result<Option<ItemRef<A::Ref<'_>>>> {
        let Some((_, index)) = self.locate(self.hasher.hash_one(key), key)? else {
            return Ok(None);
        };
        self.nodes.node(index).map(|node| Some(ItemRef(node))).ok_or_else(unavailable)
    }

    /// The item with key `key`, mutably.
    pub fn find_mut(&mut self, key: &P::Key) -> Result<Option<ItemMut<A::RefMut<'_>>>> {
        let Some((_, index)) = self.locate(self.hasher.hash_one(key), key)? else {
            return Ok(None);
        };
        self.nodes.node_mut(index).map(|node| Some(ItemMut(node))).ok_or_else(unavailable)
    }

    /// Whether an item with key `key` exists.
    pub fn contains(&self, key: &P::Key) -> Result<bool> {
        Ok(self.locate(self.hasher.hash_one(key), key)?.is_some())
    }

    /// Removes and returns the item with key `key`.
    ///
    /// An absent key is `Ok(None)` and raises nothing.
    ///
    /// # Errors
    ///
    /// Misuse violation when a shared pool is borrowed elsewhere; the item
    /// stays in place.
    pub fn erase(&mut self, key: &P::Key) -> Result<Option<T>> {
        let hash = self.hasher.hash_one(key);
        let Some((previous, index)) = self.locate(hash, key)? else {
            return Ok(None);
        };
        self.nodes.check_access(Access::Exclusive)?;

        // Splice the successor into the link that owns the matched node.
        let successor = self.nodes.node_mut(index).ok_or_else(unavailable)?.next.take();
        let bucket = self.bucket_index(hash);
        let link = match previous {
            None => self.buckets.get_mut(bucket).map(|slot| mem::replace(slot, successor)),
            Some(previous) => self
                .nodes
                .node_mut(previous)
                .map(|mut node| mem::replace(&mut node.next, successor)),
        };
        let handle = link.flatten().ok_or_else(unavailable)?;
        let node = self.nodes.release(handle)?;
        self.len -= 1;
        Ok(Some(node.item))
    }

    /// Redistributes all nodes over `bucket_count` buckets, or over the
    /// smallest count that keeps the load factor if that is larger.
    ///
    /// # Errors
    ///
    /// Capacity violation when the bucket strategy cannot hold the count.
    pub fn rehash(&mut self, bucket_count: usize) -> Result<()> {
        let target = bucket_count.max(self.max_load.buckets_for(self.len));
        if target > self.buckets.max_capacity() {
            return Err(violation::raise(helpers::bucket_capacity_exceeded(
                "Bucket storage cannot hold the requested count",
            )));
        }
        self.rehash_to(target)
    }

    /// Rehashes so that `items` items fit without exceeding the load factor.
    pub fn reserve(&mut self, items: usize) -> Result<()> {
        let needed = self.max_load.buckets_for(items);
        if needed > self.buckets.len() {
            self.rehash(needed)
        } else {
            Ok(())
        }
    }

    /// Exchanges contents with `other`.
    ///
    /// Chains stay with their node allocator, so no item is rehashed or
    /// moved. The bucket arrays are exchanged in O(1) when both bucket
    /// strategies share a memory source and bucket by bucket otherwise. A
    /// bucket array the other side cannot hold is first compacted to that
    /// side's maximum.
    ///
    /// # Errors
    ///
    /// Capacity violation when a side's items need more buckets than the
    /// other side can hold at its load factor. Both tables keep their items
    /// on failure.
    pub fn swap_with(&mut self, other: &mut Self) -> Result<()> {
        let (own_limit, other_limit) = (self.buckets.max_capacity(), other.buckets.max_capacity());
        if self.max_load.buckets_for(self.len) > other_limit
            || other.max_load.buckets_for(other.len) > own_limit
        {
            return Err(violation::raise(helpers::swap_capacity_exceeded(
                "Bucket storage cannot take the other table's items",
            )));
        }
        self.compact_for(other_limit)?;
        other.compact_for(own_limit)?;
        self.buckets.swap_with(&mut other.buckets)?;

        mem::swap(&mut self.nodes, &mut other.nodes);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.max_load, &mut other.max_load);
        mem::swap(&mut self.hasher, &mut other.hasher);
        mem::swap(&mut self.key_eq, &mut other.key_eq);
        trace_event!(debug, "tables swapped", left = self.len, right = other.len);
        Ok(())
    }

    /// Replaces the contents of `target` with clones of this table's items.
    ///
    /// `target` keeps its own hasher and allocators and takes this table's
    /// maximum load factor. Items are read one at a time, so both tables may
    /// draw from the same shared pool.
    ///
    /// # Errors
    ///
    /// Any insertion error of `target`; it then holds the items copied so far.
    pub fn try_clone_into(&self, target: &mut Self) -> Result<()>
    where
        T: Clone,
    {
        target.clear()?;
        target.max_load = self.max_load;
        target.rehash(self.bucket_count().min(target.buckets.max_capacity()))?;

        for bucket in 0..self.buckets.len() {
            let mut cursor = self.buckets.get(bucket).and_then(head_index);
            while let Some(index) = cursor {
                let (item, next) = {
                    let node = self.nodes.node(index).ok_or_else(unavailable)?;
                    (node.item.clone(), head_index(&node.next))
                };
                let hash = target.hasher.hash_one(P::key_of(&item));
                target.link_new(item, hash)?;
                cursor = next;
            }
        }
        Ok(())
    }

    /// Clones this table into fresh bucket storage and node allocator.
    pub fn try_clone_with(&self, bucket_strategy: B, nodes: A) -> Result<Self>
    where
        T: Clone,
        H: Clone,
        E: Clone,
    {
        let mut copy =
            Self::with_parts(bucket_strategy, nodes, 1, self.hasher.clone(), self.key_eq.clone())?;
        self.try_clone_into(&mut copy)?;
        Ok(copy)
    }

    /// Finds the node holding `key` and the node linking to it, if any.
    fn locate(&self, hash: u64, key: &P::Key) -> Result<Option<(Option<NodeIndex>, NodeIndex)>> {
        let mut previous = None;
        let mut cursor = self.buckets.get(self.bucket_index(hash)).and_then(head_index);
        while let Some(index) = cursor {
            let node = self.nodes.node(index).ok_or_else(unavailable)?;
            if node.hash == hash && self.key_eq.eq(P::key_of(&node.item), key) {
                return Ok(Some((previous, index)));
            }
            previous = Some(index);
            cursor = head_index(&node.next);
        }
        Ok(None)
    }

    fn link_new(&mut self, item: T, hash: u64) -> Result<NodeIndex> {
        self.grow_for(self.len.saturating_add(1))?;
        let bucket = self.bucket_index(hash);

        // The chain head moves into the node only once a slot is secured.
        let buckets = &mut self.buckets;
        let handle = self.nodes.acquire_with(|| HashNode {
            item,
            hash,
            next: buckets.get_mut(bucket).and_then(Option::take),
        })?;
        let index = handle.index();
        if let Some(slot) = self.buckets.get_mut(bucket) {
            *slot = Some(handle);
        }
        self.len += 1;
        Ok(index)
    }
}

impl<T, A, B, P, H, E> Drop for HashTable<T, A, B, P, H, E>
where
    A: NodeAllocator<HashNode<T>>,
    B: MemoryStrategy<Bucket>,
{
    fn drop(&mut self) {
        // A refused borrow has been raised; the nodes then stay in the
        // shared pool until the pool itself is dropped.
        let _ = self.clear();
    }
}

impl<T, A, B, P, H, E> fmt::Debug for HashTable<T, A, B, P, H, E>
where
    T: fmt::Debug,
    A: NodeAllocator<HashNode<T>>,
    B: MemoryStrategy<Bucket>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

fn head_index(link: &Option<NodeHandle>) -> Option<NodeIndex> {
    link.as_ref().map(NodeHandle::index)
}

/// Raised when the node allocator refuses a borrow.
fn unavailable() -> Error {
    violation::raise(helpers::shared_pool_busy("Node allocator is borrowed elsewhere"))
}

/// Iterator over the items of a [`HashTable`].
pub struct Iter<'a, T, A: NodeAllocator<HashNode<T>> + 'a> {
    buckets: core::slice::Iter<'a, Bucket>,
    nodes: &'a A,
    cursor: Option<NodeIndex>,
    remaining: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T, A: NodeAllocator<HashNode<T>> + 'a> Iterator for Iter<'a, T, A> {
    type Item = ItemRef<A::Ref<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a A = self.nodes;
        loop {
            if let Some(index) = self.cursor {
                let Some(node) = nodes.node(index) else {
                    let _ = unavailable();
                    self.cursor = None;
                    self.buckets = Default::default();
                    self.remaining = 0;
                    return None;
                };
                self.cursor = head_index(&node.next);
                self.remaining = self.remaining.saturating_sub(1);
                return Some(ItemRef(node));
            }
            self.cursor = head_index(self.buckets.next()?);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a, T, A, B, P, H, E> IntoIterator for &'a HashTable<T, A, B, P, H, E>
where
    A: NodeAllocator<HashNode<T>> + 'a,
    B: MemoryStrategy<Bucket>,
{
    type Item = ItemRef<A::Ref<'a>>;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
