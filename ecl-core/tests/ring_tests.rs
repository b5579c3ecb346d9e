// Integration tests for the ring engine

use std::mem::MaybeUninit;

use ecl_core::ring::{Ring, RingIndex};
use ecl_core::strategy::Fixed;
use ecl_error::Result;

mod common;
use common::{ignore_violations, DropLedger};

#[test]
fn test_wrap_reads_in_logical_order() -> Result<()> {
    ignore_violations();
    let mut slots = [MaybeUninit::<u32>::uninit(); 4];
    let mut ring = Ring::new(Fixed::new(&mut slots), 4)?;
    for v in 1..=4 {
        ring.push_back(v)?;
    }
    assert!(ring.push_back(5).unwrap_err().is_capacity_error());

    assert_eq!(ring.pop_front(), Some(1));
    assert_eq!(ring.pop_front(), Some(2));
    ring.push_back(5)?;
    ring.push_back(6)?;

    assert!(ring.iter().copied().eq([3, 4, 5, 6]));
    assert!(ring.iter().rev().copied().eq([6, 5, 4, 3]));
    assert_eq!(ring.translator().physical_of(0), 2);
    assert_eq!((ring.front(), ring.back()), (Some(&3), Some(&6)));
    Ok(())
}

#[test]
fn test_both_ends() -> Result<()> {
    let mut slots = [MaybeUninit::<i32>::uninit(); 3];
    let mut ring = Ring::new(Fixed::new(&mut slots), 3)?;
    ring.push_front(2)?;
    ring.push_front(1)?;
    ring.push_back(3)?;
    assert!(ring.iter().copied().eq([1, 2, 3]));

    assert_eq!(ring.pop_back(), Some(3));
    assert_eq!(ring.pop_front(), Some(1));
    assert_eq!(ring.pop_back(), Some(2));
    assert_eq!(ring.pop_back(), None);
    assert_eq!(ring.pop_front(), None);
    Ok(())
}

#[test]
fn test_overwrite_evicts_oldest() -> Result<()> {
    let mut slots = [MaybeUninit::<u8>::uninit(); 3];
    let mut ring = Ring::new(Fixed::new(&mut slots), 3)?;
    let evicted: Vec<Option<u8>> = (0..6).map(|v| ring.push_back_overwrite(v)).collect();
    assert_eq!(evicted, [None, None, None, Some(0), Some(1), Some(2)]);
    assert!(ring.iter().copied().eq([3, 4, 5]));
    Ok(())
}

#[test]
fn test_cursors_measure_distance() -> Result<()> {
    let mut slots = [MaybeUninit::<u8>::uninit(); 5];
    let mut ring = Ring::new(Fixed::new(&mut slots), 5)?;
    for v in 0..7 {
        ring.push_back_overwrite(v);
    }

    let begin = ring.begin();
    let end = ring.end();
    assert_eq!(end.distance_from(&begin), 5);
    assert_eq!(begin.distance_from(&end), -5);

    let mut cursor = begin;
    cursor.advance(3);
    assert_eq!(cursor.get(), Some(&5));
    cursor.retreat(1);
    assert_eq!(cursor.get(), Some(&4));
    assert!(begin < cursor && cursor < end);
    assert_eq!(end.get(), None);
    Ok(())
}

#[test]
fn test_zero_capacity_is_configuration_error() {
    ignore_violations();
    let mut slots = [MaybeUninit::<u8>::uninit(); 2];
    let err = Ring::new(Fixed::new(&mut slots), 0).unwrap_err();
    assert!(err.is_configuration_error());

    let mut slots = [MaybeUninit::<u8>::uninit(); 2];
    let err = Ring::new(Fixed::new(&mut slots), 3).unwrap_err();
    assert!(err.is_capacity_error());
}

#[test]
fn test_live_elements_dropped_once() -> Result<()> {
    let ledger = DropLedger::new();
    {
        let mut slots: [MaybeUninit<common::Tracked>; 4] =
            std::array::from_fn(|_| MaybeUninit::uninit());
        let mut ring = Ring::new(Fixed::new(&mut slots), 4)?;
        for key in 0..4 {
            ring.push_back(ledger.track(key))?;
        }
        drop(ring.push_back_overwrite(ledger.track(4)));
        assert_eq!(ledger.drops(), 1);
        drop(ring.pop_back());
        assert_eq!(ledger.drops(), 2);
    }
    assert_eq!(ledger.drops(), 5);
    Ok(())
}

#[test]
fn test_translator_follows_front() -> Result<()> {
    let mut slots = [MaybeUninit::<u8>::uninit(); 4];
    let mut ring = Ring::new(Fixed::new(&mut slots), 4)?;
    for v in 0..3 {
        ring.push_back(v)?;
    }
    ring.pop_front();
    ring.pop_front();
    ring.push_back(3)?;
    ring.push_front(1)?;

    let index: &RingIndex = ring.translator();
    assert_eq!(index.size(), 3);
    assert_eq!(index.front_physical(), 1);
    let physical: Vec<usize> = (0..index.size()).map(|o| index.physical_of(o)).collect();
    assert_eq!(physical, [1, 2, 3]);
    assert!(ring.iter().copied().eq([1, 2, 3]));
    Ok(())
}

#[cfg(feature = "alloc")]
#[test]
fn test_dynamic_ring_reserves_exactly() -> Result<()> {
    use ecl_core::strategy::Dynamic;

    let mut ring = Ring::new(Dynamic::new(), 5)?;
    assert_eq!(ring.capacity(), 5);
    for v in 0..12 {
        ring.push_back_overwrite(v);
    }
    assert!(ring.iter().copied().eq(7..12));
    Ok(())
}
