//! Catalogue engine for folio
//!
//! This crate holds the concurrency core:
//! - BookRecord: one book's live state, no synchronization of its own
//! - LockableBook: a record paired with its per-record reader/writer lock
//! - Catalogue: the ISBN map, the catalogue-level lock, and every public
//!   operation of both capability surfaces
//!
//! The engine is the only component that knows about locks. Everything it
//! returns is a value copy from `folio-core`; callers can never reach a
//! live record.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalogue;
pub mod lockable;
pub mod record;

pub use catalogue::Catalogue;
pub use lockable::LockableBook;
pub use record::BookRecord;
