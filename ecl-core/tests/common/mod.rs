// Shared fixtures for ecl-core integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Lets a test observe violations as plain `Err` values.
pub fn ignore_violations() {
    ecl_error::violation::set_violation_hook(ecl_error::violation::ignore);
}

/// Counts how many times its payload destructor ran.
#[derive(Debug, Clone, Default)]
pub struct DropLedger(Rc<Cell<usize>>);

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an element whose drop is recorded here.
    pub fn track(&self, key: u32) -> Tracked {
        Tracked { key, ledger: Rc::clone(&self.0) }
    }

    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

/// Element type that records its own destruction.
#[derive(Debug)]
pub struct Tracked {
    pub key: u32,
    ledger: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.set(self.ledger.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for Tracked {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
