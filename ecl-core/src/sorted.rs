// ECL - ecl-core
// Module: Sorted Engine - ordered positioning over a sequence
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Sorted engine for ordered sets, maps and multimaps.
//!
//! [`Sorted`] keeps a sequence non-decreasing under a comparator applied to
//! each item's key. Positions are plain indices into the sequence.
//!
//! # Characteristics
//!
//! - **Lower-bound search**: [`Sorted::find_sorted_position`] is `O(log n)`
//! - **Stable multi-insert**: equal keys stay in insertion order
//! - **Matcher search**: [`Sorted::find_matching_in`] scans linearly for
//!   predicates the ordering cannot serve
//!
//! The comparator must be a strict weak ordering. This is not checked.
//!
//! # Examples
//!
//! ```
//! use ecl_core::contiguous::Contiguous;
//! use ecl_core::sorted::Sorted;
//! use ecl_core::strategy::Dynamic;
//!
//! let mut set: Sorted<u32, _> = Sorted::new(Contiguous::new(Dynamic::new()));
//! for key in [5, 1, 3, 1, 4] {
//!     set.insert_unique(key)?;
//! }
//! assert!(set.iter().copied().eq([1, 3, 4, 5]));
//! assert_eq!(set.find_sorted_position(&2), (1, false));
//! # Ok::<(), ecl_error::Error>(())
//! ```

use core::cmp::Ordering;
use core::marker::PhantomData;
use core::ops::Range;

use ecl_error::{helpers, violation, Result};

use crate::contiguous::Contiguous;
use crate::key::{Comparator, Identity, KeyOf, NaturalOrder, PairKey};
use crate::strategy::MemoryStrategy;

/// Positional sequence the sorted engine maintains.
pub trait SortedSeq<T> {
    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `position`.
    fn item(&self, position: usize) -> Option<&T>;

    /// Mutable item at `position`.
    fn item_mut(&mut self, position: usize) -> Option<&mut T>;

    /// Inserts `item` before `position`.
    fn insert_at(&mut self, position: usize, item: T) -> Result<()>;

    /// Removes the item at `position`.
    fn remove_at(&mut self, position: usize) -> Result<T>;

    /// Drops every item from `len` on. No effect if `len >= self.len()`.
    fn truncate(&mut self, len: usize);

    /// Drops every item.
    fn clear(&mut self) {
        self.truncate(0);
    }
}

impl<T, S: MemoryStrategy<T>> SortedSeq<T> for Contiguous<T, S> {
    fn len(&self) -> usize {
        Contiguous::len(self)
    }

    fn item(&self, position: usize) -> Option<&T> {
        self.as_slice().get(position)
    }

    fn item_mut(&mut self, position: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(position)
    }

    fn insert_at(&mut self, position: usize, item: T) -> Result<()> {
        self.insert(position, item)
    }

    fn remove_at(&mut self, position: usize) -> Result<T> {
        self.remove(position)
    }

    fn truncate(&mut self, len: usize) {
        Contiguous::truncate(self, len);
    }
}

/// Ordered sequence of items keyed by `P` and ordered by `C`.
///
/// # Invariants
///
/// 1. Keys are non-decreasing under `C` across positions
/// 2. Items inserted with [`insert_unique`](Self::insert_unique) have
///    pairwise distinct keys
/// 3. Items with equal keys inserted with
///    [`insert_multi`](Self::insert_multi) keep insertion order
pub struct Sorted<T, Q, P = Identity, C = NaturalOrder> {
    seq: Q,
    order: C,
    _item: PhantomData<fn() -> (T, P)>,
}

/// Ordered set over contiguous storage.
pub type SortedSet<T, S> = Sorted<T, Contiguous<T, S>>;

/// Ordered map over contiguous `(key, value)` storage.
pub type SortedMap<K, V, S> = Sorted<(K, V), Contiguous<(K, V), S>, PairKey>;

impl<T, Q, P, C> Sorted<T, Q, P, C>
where
    Q: SortedSeq<T>,
    P: KeyOf<T>,
    C: Comparator<P::Key>,
{
    /// Wraps `seq`, which must already be sorted (an empty sequence is).
    pub fn new(seq: Q) -> Self
    where
        C: Default,
    {
        Self::with_order(seq, C::default())
    }

    /// Wraps `seq` with an explicit comparator.
    pub fn with_order(seq: Q, order: C) -> Self {
        Self { seq, order, _item: PhantomData }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Whether there are no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Item at `position`.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.seq.item(position)
    }

    /// Items front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.seq.len()).filter_map(move |position| self.seq.item(position))
    }

    /// The underlying sequence.
    pub fn as_inner(&self) -> &Q {
        &self.seq
    }

    /// Unwraps the underlying sequence.
    pub fn into_inner(self) -> Q {
        self.seq
    }

    /// The comparator.
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.seq.clear();
    }

    /// First position whose key is not less than `key`, and whether the
    /// key there equals `key`.
    pub fn find_sorted_position(&self, key: &P::Key) -> (usize, bool) {
        let position = self.partition_point(key, Ordering::is_lt);
        let exact = self
            .seq
            .item(position)
            .is_some_and(|item| self.order.compare(P::key_of(item), key).is_eq());
        (position, exact)
    }

    /// First position whose key is greater than `key`.
    pub fn find_upper_position(&self, key: &P::Key) -> usize {
        self.partition_point(key, Ordering::is_le)
    }

    /// Positions of all items whose key equals `key`.
    pub fn equal_range(&self, key: &P::Key) -> Range<usize> {
        let (start, exact) = self.find_sorted_position(key);
        if exact {
            start..self.find_upper_position(key)
        } else {
            start..start
        }
    }

    /// Number of items whose key equals `key`.
    pub fn count(&self, key: &P::Key) -> usize {
        self.equal_range(key).len()
    }

    /// Position of the first item with key `key`.
    pub fn find(&self, key: &P::Key) -> Option<usize> {
        match self.find_sorted_position(key) {
            (position, true) => Some(position),
            (_, false) => None,
        }
    }

    /// Whether an item with key `key` exists.
    pub fn contains(&self, key: &P::Key) -> bool {
        self.find_sorted_position(key).1
    }

    /// First item with key `key`.
    pub fn get_by_key(&self, key: &P::Key) -> Option<&T> {
        self.find(key).and_then(|position| self.seq.item(position))
    }

    /// First item with key `key`, mutably. The key must not be changed.
    pub fn get_by_key_mut(&mut self, key: &P::Key) -> Option<&mut T> {
        let position = self.find(key)?;
        self.seq.item_mut(position)
    }

    /// Inserts `item` unless an item with an equal key exists.
    ///
    /// Returns the item's position and whether it was inserted.
    pub fn insert_unique(&mut self, item: T) -> Result<(usize, bool)> {
        let (position, exact) = self.find_sorted_position(P::key_of(&item));
        if exact {
            return Ok((position, false));
        }
        self.seq.insert_at(position, item)?;
        Ok((position, true))
    }

    /// Inserts `item` after every item with an equal key.
    pub fn insert_multi(&mut self, item: T) -> Result<usize> {
        let position = self.find_upper_position(P::key_of(&item));
        self.seq.insert_at(position, item)?;
        Ok(position)
    }

    /// Inserts `item`, or replaces the item with an equal key in place.
    ///
    /// Returns the position and whether a new item was inserted.
    pub fn insert_or_assign(&mut self, item: T) -> Result<(usize, bool)> {
        let (position, exact) = self.find_sorted_position(P::key_of(&item));
        if exact {
            if let Some(slot) = self.seq.item_mut(position) {
                *slot = item;
            }
            return Ok((position, false));
        }
        self.seq.insert_at(position, item)?;
        Ok((position, true))
    }

    /// Builds and inserts an item for `key` only if the key is absent.
    ///
    /// `make` must produce an item whose key equals `key`.
    pub fn emplace_with<F: FnOnce() -> T>(
        &mut self,
        key: &P::Key,
        make: F,
    ) -> Result<(usize, bool)> {
        let (position, exact) = self.find_sorted_position(key);
        if exact {
            return Ok((position, false));
        }
        let item = make();
        debug_assert!(self.order.compare(P::key_of(&item), key).is_eq());
        self.seq.insert_at(position, item)?;
        Ok((position, true))
    }

    /// The item with key `key`, inserting one built by `make` if absent.
    pub fn get_or_insert_with<F: FnOnce() -> T>(
        &mut self,
        key: &P::Key,
        make: F,
    ) -> Result<&mut T> {
        let (position, _) = self.emplace_with(key, make)?;
        self.seq
            .item_mut(position)
            .ok_or_else(|| violation::raise(helpers::out_of_range("Sorted position vanished")))
    }

    /// Removes every item with key `key` and returns how many were removed.
    pub fn erase(&mut self, key: &P::Key) -> Result<usize> {
        let range = self.equal_range(key);
        let removed = range.len();
        for _ in 0..removed {
            self.seq.remove_at(range.start)?;
        }
        Ok(removed)
    }

    /// Removes and returns the item at `position`.
    ///
    /// # Errors
    ///
    /// Misuse violation when `position` is not a live position.
    pub fn erase_at(&mut self, position: usize) -> Result<T> {
        self.seq.remove_at(position)
    }

    /// First position whose item satisfies `matches`.
    pub fn find_matching<F: FnMut(&T) -> bool>(&self, matches: F) -> Option<usize> {
        self.find_matching_in(0, self.seq.len(), matches)
    }

    /// First position in `[start, end)` whose item satisfies `matches`.
    ///
    /// `end` is clamped to the sequence length.
    pub fn find_matching_in<F: FnMut(&T) -> bool>(
        &self,
        start: usize,
        end: usize,
        mut matches: F,
    ) -> Option<usize> {
        let end = end.min(self.seq.len());
        (start..end).find(|&position| self.seq.item(position).is_some_and(&mut matches))
    }

    fn partition_point(&self, key: &P::Key, before: fn(Ordering) -> bool) -> usize {
        let (mut low, mut high) = (0, self.seq.len());
        while low < high {
            let mid = low + (high - low) / 2;
            let goes_before = self
                .seq
                .item(mid)
                .is_some_and(|item| before(self.order.compare(P::key_of(item), key)));
            if goes_before {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }
}

impl<K, V, Q, C> Sorted<(K, V), Q, PairKey, C>
where
    Q: SortedSeq<(K, V)>,
    C: Comparator<K>,
{
    /// Value stored under `key`.
    pub fn value(&self, key: &K) -> Option<&V> {
        self.get_by_key(key).map(|(_, value)| value)
    }

    /// Value stored under `key`, mutably.
    pub fn value_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_by_key_mut(key).map(|(_, value)| value)
    }

    /// Value stored under `key`, inserting a default value if absent.
    pub fn value_or_default(&mut self, key: &K) -> Result<&mut V>
    where
        K: Clone,
        V: Default,
    {
        let (_, value) = self.get_or_insert_with(key, || (key.clone(), V::default()))?;
        Ok(value)
    }
}

impl<T, Q, P, C> core::fmt::Debug for Sorted<T, Q, P, C>
where
    T: core::fmt::Debug,
    Q: SortedSeq<T>,
    P: KeyOf<T>,
    C: Comparator<P::Key>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{OrderBy, ReverseOrder};
    use crate::strategy::Fixed;
    use crate::test_support::ignore_violations;
    use core::mem::MaybeUninit;
    use ecl_error::ErrorCategory;

    #[test]
    fn test_unique_insert_keeps_order() -> Result<()> {
        let mut slots = [MaybeUninit::<u32>::uninit(); 8];
        let mut set: SortedSet<u32, _> = Sorted::new(Contiguous::new(Fixed::new(&mut slots)));

        assert_eq!(set.insert_unique(5)?, (0, true));
        assert_eq!(set.insert_unique(1)?, (0, true));
        assert_eq!(set.insert_unique(3)?, (1, true));
        assert_eq!(set.insert_unique(1)?, (0, false));
        assert_eq!(set.insert_unique(4)?, (2, true));

        assert_eq!(set.as_inner().as_slice(), &[1, 3, 4, 5]);
        assert_eq!(set.find_sorted_position(&3), (1, true));
        assert_eq!(set.find_sorted_position(&2), (1, false));
        assert_eq!(set.find_sorted_position(&9), (4, false));
        Ok(())
    }

    #[test]
    fn test_multi_insert_is_stable() -> Result<()> {
        let mut slots = [MaybeUninit::<(u8, char)>::uninit(); 4];
        let mut multi: Sorted<(u8, char), _, PairKey> =
            Sorted::new(Contiguous::new(Fixed::new(&mut slots)));

        multi.insert_multi((2, 'a'))?;
        multi.insert_multi((1, 'b'))?;
        multi.insert_multi((2, 'c'))?;

        assert_eq!(multi.as_inner().as_slice(), &[(1, 'b'), (2, 'a'), (2, 'c')]);
        assert_eq!(multi.equal_range(&2), 1..3);
        assert_eq!(multi.count(&2), 2);
        assert_eq!(multi.count(&7), 0);

        assert_eq!(multi.erase(&2)?, 2);
        assert_eq!(multi.as_inner().as_slice(), &[(1, 'b')]);
        Ok(())
    }

    #[test]
    fn test_map_upserts() -> Result<()> {
        let mut slots = [MaybeUninit::<(&str, u32)>::uninit(); 4];
        let mut map: SortedMap<&str, u32, _> =
            Sorted::new(Contiguous::new(Fixed::new(&mut slots)));

        assert_eq!(map.insert_or_assign(("b", 1))?, (0, true));
        assert_eq!(map.insert_or_assign(("b", 2))?, (0, false));
        assert_eq!(map.value(&"b"), Some(&2));

        let (_, inserted) = map.emplace_with(&"a", || ("a", 10))?;
        assert!(inserted);
        let (_, inserted) = map.emplace_with(&"a", || ("a", 99))?;
        assert!(!inserted);
        assert_eq!(map.value(&"a"), Some(&10));

        *map.value_or_default(&"c")? += 5;
        *map.value_or_default(&"c")? += 5;
        assert_eq!(map.value(&"c"), Some(&10));
        assert_eq!(map.len(), 3);

        if let Some(value) = map.value_mut(&"a") {
            *value = 11;
        }
        assert_eq!(map.get_by_key(&"a"), Some(&("a", 11)));
        Ok(())
    }

    #[test]
    fn test_matcher_search() -> Result<()> {
        let mut slots = [MaybeUninit::<i32>::uninit(); 8];
        let mut set: SortedSet<i32, _> = Sorted::new(Contiguous::new(Fixed::new(&mut slots)));
        for v in [10, 20, 30, 40, 50] {
            set.insert_unique(v)?;
        }

        assert_eq!(set.find_matching(|v| v % 20 == 0), Some(1));
        assert_eq!(set.find_matching_in(2, 5, |v| v % 20 == 0), Some(3));
        assert_eq!(set.find_matching_in(2, 3, |v| v % 20 == 0), None);
        assert_eq!(set.find_matching_in(4, 100, |v| *v == 50), Some(4));
        assert_eq!(set.find_matching(|v| *v > 60), None);
        Ok(())
    }

    #[test]
    fn test_erase_and_find() -> Result<()> {
        ignore_violations();
        let mut slots = [MaybeUninit::<u8>::uninit(); 4];
        let mut set: SortedSet<u8, _> = Sorted::new(Contiguous::new(Fixed::new(&mut slots)));
        set.insert_unique(1)?;
        set.insert_unique(2)?;

        assert_eq!(set.erase(&1)?, 1);
        assert_eq!(set.find(&1), None);
        assert_eq!(set.erase(&1)?, 0);
        assert!(set.contains(&2));

        assert_eq!(set.erase_at(0)?, 2);
        let err = set.erase_at(0).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Misuse);
        Ok(())
    }

    #[test]
    fn test_capacity_violation_leaves_sequence_intact() -> Result<()> {
        ignore_violations();
        let mut slots = [MaybeUninit::<u8>::uninit(); 2];
        let mut set: SortedSet<u8, _> = Sorted::new(Contiguous::new(Fixed::new(&mut slots)));
        set.insert_unique(3)?;
        set.insert_unique(1)?;

        let err = set.insert_unique(2).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Capacity);
        assert_eq!(set.as_inner().as_slice(), &[1, 3]);
        // Duplicates are not insertions and never hit capacity
        assert_eq!(set.insert_unique(3)?, (1, false));
        Ok(())
    }

    #[test]
    fn test_custom_orders() -> Result<()> {
        let mut slots = [MaybeUninit::<i32>::uninit(); 4];
        let mut desc: Sorted<i32, _, Identity, ReverseOrder> =
            Sorted::new(Contiguous::new(Fixed::new(&mut slots)));
        for v in [1, 3, 2] {
            desc.insert_unique(v)?;
        }
        assert!(desc.iter().copied().eq([3, 2, 1]));

        let mut more = [MaybeUninit::<i32>::uninit(); 4];
        let by_abs = OrderBy::new(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        let mut abs = Sorted::<i32, _, Identity, _>::with_order(
            Contiguous::new(Fixed::new(&mut more)),
            by_abs,
        );
        abs.insert_unique(-3)?;
        abs.insert_unique(1)?;
        assert_eq!(abs.insert_unique(3)?, (1, false));
        assert!(abs.iter().copied().eq([1, -3]));
        Ok(())
    }
}
