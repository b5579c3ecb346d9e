// ECL - ecl-core
// Module: Keys - extraction, ordering and equality policies
//
// Copyright (c) 2025 The ECL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Key policies shared by the sorted and bucket engines.
//!
//! An engine stores items of type `T` but orders or hashes them by a key.
//! [`KeyOf`] says where the key lives inside the item: the item itself for
//! sets ([`Identity`]), the first tuple field for maps ([`PairKey`]).

use core::cmp::Ordering;
use core::marker::PhantomData;

/// Extracts the key of an item.
pub trait KeyOf<T> {
    /// The key type.
    type Key: ?Sized;

    /// Borrows the key of `item`.
    fn key_of(item: &T) -> &Self::Key;
}

/// The item is its own key (sets).
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key_of(item: &T) -> &T {
        item
    }
}

/// The key is the first field of a `(key, value)` pair (maps).
#[derive(Debug, Default, Clone, Copy)]
pub struct PairKey;

impl<K, V> KeyOf<(K, V)> for PairKey {
    type Key = K;

    #[inline]
    fn key_of(item: &(K, V)) -> &K {
        &item.0
    }
}

/// Strict weak ordering over keys.
pub trait Comparator<K: ?Sized> {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Ordering from the key's `Ord` implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reversed `Ord` ordering.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Ordering given by a closure.
///
/// ```
/// use ecl_core::key::{Comparator, OrderBy};
///
/// let by_len = OrderBy::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert!(by_len.compare(&"ab", &"abc").is_lt());
/// ```
pub struct OrderBy<K: ?Sized, F> {
    order: F,
    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> OrderBy<K, F> {
    /// Wraps `order`.
    pub const fn new(order: F) -> Self {
        Self { order, _key: PhantomData }
    }
}

impl<K: ?Sized, F: Clone> Clone for OrderBy<K, F> {
    fn clone(&self) -> Self {
        Self { order: self.order.clone(), _key: PhantomData }
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparator<K> for OrderBy<K, F> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.order)(a, b)
    }
}

/// Equality over keys, consistent with the hash the engine uses.
pub trait KeyEq<K: ?Sized> {
    /// Whether `a` and `b` denote the same key.
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// Equality from the key's `Eq` implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalEq;

impl<K: Eq + ?Sized> KeyEq<K> for NaturalEq {
    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}
