// Integration tests for node pools

use std::cell::RefCell;
use std::collections::HashSet;

use ecl_core::hash_table::{BucketSet, HashNode, HashTable, EMPTY_BUCKET};
use ecl_core::pool::{NodeAllocator, NodeHandle, Pool, SharedPool};
use ecl_core::strategy::Fixed;
use ecl_error::{ErrorCategory, Result};

mod common;
use common::{ignore_violations, DropLedger};

#[test]
fn test_lifo_reuse_for_every_slot() -> Result<()> {
    ignore_violations();
    const N: usize = 6;
    for k in 0..N {
        let mut pool = Pool::<usize, N>::new();
        let mut handles: Vec<NodeHandle> = (0..N).map(|v| pool.acquire(v)).collect::<Result<_>>()?;

        let distinct: HashSet<usize> = handles.iter().map(|h| h.index().get()).collect();
        assert_eq!(distinct.len(), N);

        let err = pool.acquire(N).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Resource);

        let released = handles.remove(k);
        let slot = released.index();
        assert_eq!(pool.release(released)?, k);
        let again = pool.acquire(100)?;
        assert_eq!(again.index(), slot);
        handles.push(again);

        for handle in handles {
            pool.release(handle)?;
        }
        assert_eq!(pool.in_use(), 0);
    }
    Ok(())
}

#[test]
fn test_pool_drops_live_nodes_on_teardown() -> Result<()> {
    let ledger = DropLedger::new();
    {
        let mut pool = Pool::<common::Tracked, 4>::new();
        let a = pool.acquire(ledger.track(1))?;
        let _b = pool.acquire(ledger.track(2))?;
        drop(pool.release(a)?);
        assert_eq!(ledger.drops(), 1);
    }
    assert_eq!(ledger.drops(), 2);
    Ok(())
}

#[test]
fn test_shared_pool_serves_two_tables() -> Result<()> {
    ignore_violations();
    let cell = RefCell::new(Pool::<HashNode<u32>, 6>::new());
    let mut left_buckets = [EMPTY_BUCKET; 8];
    let mut right_buckets = [EMPTY_BUCKET; 8];

    let mut left: BucketSet<u32, SharedPool<'_, HashNode<u32>, 6>, _> =
        HashTable::new(Fixed::new(&mut left_buckets), SharedPool::new(&cell), 8)?;
    let mut right: BucketSet<u32, SharedPool<'_, HashNode<u32>, 6>, _> =
        HashTable::new(Fixed::new(&mut right_buckets), SharedPool::new(&cell), 8)?;

    for v in 0..4 {
        left.insert(v)?;
    }
    right.insert(100)?;
    right.insert(101)?;

    // Exhaustion in one table is felt by the other
    let err = left.insert(4).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Resource);
    assert_eq!(cell.borrow().in_use(), 6);

    assert_eq!(right.erase(&100)?, Some(100));
    left.insert(4)?;
    assert!(left.contains(&4)?);

    drop(left);
    assert_eq!(cell.borrow().in_use(), 1);
    drop(right);
    assert_eq!(cell.borrow().in_use(), 0);
    Ok(())
}

#[test]
fn test_borrowed_pool_blocks_rehash_without_losing_items() -> Result<()> {
    ignore_violations();
    let cell = RefCell::new(Pool::<HashNode<u32>, 8>::new());
    let mut left_buckets = [EMPTY_BUCKET; 8];
    let mut right_buckets = [EMPTY_BUCKET; 8];
    let mut left: BucketSet<u32, SharedPool<'_, HashNode<u32>, 8>, _> =
        HashTable::new(Fixed::new(&mut left_buckets), SharedPool::new(&cell), 2)?;
    let mut right: BucketSet<u32, SharedPool<'_, HashNode<u32>, 8>, _> =
        HashTable::new(Fixed::new(&mut right_buckets), SharedPool::new(&cell), 2)?;
    left.insert(10)?;
    left.insert(11)?;
    right.insert(20)?;

    {
        let held = right.find(&20)?;
        assert_eq!(held.as_deref(), Some(&20));

        // A third item forces a rehash of the two existing chains.
        let err = left.insert(12).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Misuse);
        assert_eq!(left.len(), 2);
        assert_eq!(left.bucket_count(), 2);
        assert_eq!(cell.borrow().in_use(), 3);

        assert!(left.erase(&10).unwrap_err().is_misuse_error());
        assert!(left.clear().unwrap_err().is_misuse_error());
    }

    assert!(left.contains(&10)? && left.contains(&11)?);
    left.insert(12)?;
    assert_eq!(left.iter().count(), 3);
    assert_eq!(cell.borrow().in_use(), 4);
    Ok(())
}

#[cfg(feature = "alloc")]
#[test]
fn test_heap_nodes_never_exhaust() -> Result<()> {
    use ecl_core::pool::HeapNodes;

    let mut nodes = HeapNodes::new();
    let handles: Vec<NodeHandle> = (0..1000u32).map(|v| nodes.acquire(v)).collect::<Result<_>>()?;
    assert_eq!(nodes.in_use(), 1000);
    assert!(!nodes.is_exhausted());
    for handle in handles {
        nodes.release(handle)?;
    }
    assert_eq!(nodes.in_use(), 0);
    Ok(())
}
