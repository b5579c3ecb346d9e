// Integration tests for memory strategies and contiguous storage

use std::mem::MaybeUninit;

use ecl_core::contiguous::Contiguous;
use ecl_core::strategy::Fixed;
use ecl_error::{ErrorCategory, Result};
use proptest::prelude::*;

mod common;
use common::{ignore_violations, DropLedger};

#[test]
fn test_fixed_location_never_changes() -> Result<()> {
    ignore_violations();
    let mut slots = [MaybeUninit::<u64>::uninit(); 8];
    let start = slots.as_ptr().cast::<u64>();
    let mut values = Contiguous::new(Fixed::new(&mut slots));

    for round in 0..3u64 {
        for v in 0..8 {
            values.push(round * 10 + v)?;
            assert_eq!(values.as_ptr(), start);
        }
        assert!(values.push(99).is_err());
        values.remove(3)?;
        values.insert(0, 1)?;
        values.shrink_to_fit();
        values.truncate(2);
        values.resize(5)?;
        assert_eq!(values.as_ptr(), start);
        assert!(values.len() <= 8);
        values.clear();
    }
    Ok(())
}

#[test]
fn test_fixed_growth_beyond_capacity_is_violation() {
    ignore_violations();
    let mut slots = [MaybeUninit::<u8>::uninit(); 4];
    let mut values = Contiguous::new(Fixed::new(&mut slots));

    let err = values.resize_fill(5, &0).unwrap_err();
    assert!(err.is_capacity_error());
    assert!(values.is_empty());

    let err = values.reserve(5).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Capacity);
}

#[test]
fn test_teardown_drops_each_live_element_once() -> Result<()> {
    let ledger = DropLedger::new();
    {
        let mut slots: [MaybeUninit<common::Tracked>; 6] = std::array::from_fn(|_| MaybeUninit::uninit());
        let mut values = Contiguous::new(Fixed::new(&mut slots));
        for key in 0..6 {
            values.push(ledger.track(key))?;
        }
        drop(values.remove(0)?);
        values.truncate(3);
        assert_eq!(ledger.drops(), 3);
    }
    assert_eq!(ledger.drops(), 6);
    Ok(())
}

#[cfg(feature = "alloc")]
mod dynamic {
    use super::*;
    use ecl_core::strategy::Dynamic;

    #[test]
    fn test_capacity_sequence() -> Result<()> {
        let mut values = Contiguous::new(Dynamic::new());
        let mut seen = Vec::new();
        for v in 0..40u32 {
            values.push(v)?;
            if seen.last() != Some(&values.capacity()) {
                seen.push(values.capacity());
            }
        }
        assert_eq!(seen, [8, 16, 32, 64]);

        values.shrink_to_fit();
        assert_eq!(values.capacity(), 40);
        values.clear();
        values.shrink_to_fit();
        assert_eq!(values.capacity(), 0);
        assert!(values.as_ptr().is_null());
        Ok(())
    }

    #[test]
    fn test_teardown_drops_after_reallocation() -> Result<()> {
        let ledger = DropLedger::new();
        {
            let mut values = Contiguous::new(Dynamic::new());
            for key in 0..50 {
                values.push(ledger.track(key))?;
            }
            // Relocation moves elements without dropping them
            assert_eq!(ledger.drops(), 0);
        }
        assert_eq!(ledger.drops(), 50);
        Ok(())
    }

    #[test]
    fn test_swap_with_shared_source() -> Result<()> {
        let mut left = Contiguous::new(Dynamic::new());
        let mut right = Contiguous::new(Dynamic::new());
        left.resize_fill(3, &'l')?;
        right.resize_fill(10, &'r')?;

        left.swap_with(&mut right)?;
        assert_eq!(left.len(), 10);
        assert_eq!(right.as_slice(), &['l', 'l', 'l']);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_reserve_growth_law(initial in 0usize..200, request in 1usize..5000) {
            let mut values: Contiguous<u16, _> = Contiguous::new(Dynamic::new());
            values.reserve_exact(initial).unwrap();
            let before = values.capacity();
            values.reserve(request).unwrap();
            let after = values.capacity();

            prop_assert!(after >= request);
            if request > before {
                prop_assert_eq!(after % 8, 0);
                prop_assert_eq!(after, (request.max(2 * before) + 7) & !7);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
