//! Per-record lock wrapper
//!
//! [`LockableBook`] pairs one [`BookRecord`] with its own reader/writer
//! lock: any number of concurrent readers, or exactly one writer. This is
//! the fine-grained level of the two-level protocol. The catalogue-level
//! lock freezes the key set; a record's lock guards that record's fields.
//!
//! We use `parking_lot::RwLock` rather than `std::sync::RwLock`: no
//! poisoning to cascade a panic into every later caller, and its queued
//! locking policy keeps writers from starving under a read-heavy load.
//! The lock is not re-entrant; the protocol never takes the same record
//! lock twice in one call path (inputs are de-duplicated per ISBN before
//! acquisition), so re-entrancy is never needed.

use crate::record::BookRecord;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A book record guarded by its own reader/writer lock
///
/// Guards returned by [`read`](LockableBook::read) and
/// [`write`](LockableBook::write) release on drop, so every exit path
/// (including panics between acquisition and the natural release) gives
/// the lock back.
#[derive(Debug)]
pub struct LockableBook {
    inner: RwLock<BookRecord>,
}

impl LockableBook {
    /// Wrap a record
    pub fn new(record: BookRecord) -> Self {
        Self {
            inner: RwLock::new(record),
        }
    }

    /// Acquire this record's lock shared, for field reads
    pub fn read(&self) -> RwLockReadGuard<'_, BookRecord> {
        self.inner.read()
    }

    /// Acquire this record's lock exclusive, for field writes
    pub fn write(&self) -> RwLockWriteGuard<'_, BookRecord> {
        self.inner.write()
    }
}
