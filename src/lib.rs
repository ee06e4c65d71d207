//! # Folio
//!
//! An in-memory bookstore catalogue with two-level reader/writer locking:
//! many fine-grained per-record operations in parallel, safe exclusive
//! reconfiguration of the catalogue as a whole.
//!
//! Folio services two clients at once over one shared collection of book
//! records keyed by ISBN: a purchasing front-end (the [`BookStore`]
//! surface) and an inventory manager (the [`StockManager`] surface).
//!
//! # Quick Start
//!
//! ```
//! use folio::{BookCopy, Catalogue, Isbn, StockBook};
//!
//! fn main() -> folio::FolioResult<()> {
//!     let catalogue = Catalogue::new();
//!
//!     // Admit a book with five copies
//!     let isbn = Isbn::new(3_044_560);
//!     catalogue.add_books(&[StockBook::new(isbn, "Histories", "Herodotus", 10.0, 5)])?;
//!
//!     // Sell three of them
//!     catalogue.buy_books(&[BookCopy::new(isbn, 3)])?;
//!     assert_eq!(catalogue.get_books()[0].num_copies, 2);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! Share one catalogue between any number of threads behind an `Arc`; every
//! operation takes `&self`. Operations touching disjoint ISBN sets run fully
//! in parallel; overlapping operations serialise per record under
//! reader/writer semantics; structural changes (admit, remove, clear)
//! exclude everything else for their duration.
//!
//! # Architecture
//!
//! - `folio-core`: boundary value types and the error taxonomy
//! - `folio-engine`: records, per-record locks, the catalogue
//! - `folio-api`: the two capability traits
//!
//! Only the surface re-exported here is stable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use folio_api::{BookStore, StockManager};
pub use folio_core::{
    Book, BookCopy, BookEditorPick, BookFieldReason, BookRating, FolioError, FolioResult, Isbn,
    StockBook, UNRATED,
};
pub use folio_engine::Catalogue;
