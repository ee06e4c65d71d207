//! Core value types for the folio catalogue
//!
//! This module defines the descriptors that cross the catalogue boundary:
//! - Isbn: the integer catalogue key
//! - Book: client-visible projection of a record
//! - StockBook: operator-visible view of a record (also the add input)
//! - BookCopy, BookEditorPick, BookRating: per-record operation inputs
//!
//! All of these are plain value types. They carry no synchronization and
//! the catalogue only ever hands out copies, so a caller can never reach
//! the live record through them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel average rating for a book that has never been rated.
pub const UNRATED: f64 = -1.0;

/// Catalogue key for a book record
///
/// An Isbn wraps a signed integer so that out-of-range client input
/// (zero, negatives) is representable and can be rejected by validation
/// instead of being silently unconstructible. A valid Isbn is `>= 1`.
///
/// The derived `Ord` is the total order used by the locking protocol:
/// per-record locks are always acquired in ascending Isbn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Isbn(i64);

impl Isbn {
    /// Create an Isbn from a raw integer
    ///
    /// Does not validate; the catalogue validates on every operation.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Check whether this is a well-formed catalogue key (`>= 1`)
    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }
}

impl From<i64> for Isbn {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Record projections
// ============================================================================

/// Client-visible projection of a book record
///
/// Carries only what the purchasing front-end is allowed to see. Snapshots
/// returned by the catalogue are copies taken under the record's read lock,
/// so a `Book` is always internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Catalogue key
    pub isbn: Isbn,
    /// Title, never empty
    pub title: String,
    /// Author, never empty
    pub author: String,
    /// Sale price, non-negative
    pub price: f64,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISBN = {}, Title = {}, Author = {}, Price = {}",
            self.isbn, self.title, self.author, self.price
        )
    }
}

/// Operator-visible view of a book record
///
/// The full attribute set: everything in [`Book`] plus the stock-management
/// counters. Doubles as the input descriptor for `add_books`, where
/// [`StockBook::new`] builds a fresh entry with zeroed counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// Catalogue key
    pub isbn: Isbn,
    /// Title, never empty
    pub title: String,
    /// Author, never empty
    pub author: String,
    /// Sale price, non-negative
    pub price: f64,
    /// Copies available for sale
    pub num_copies: u64,
    /// Copies clients tried to buy while unavailable
    pub num_sale_misses: u64,
    /// Sum of all ratings received, each in 0..=5
    pub total_rating: u64,
    /// Number of ratings received
    pub num_times_rated: u64,
    /// Editorial curation flag
    pub editor_pick: bool,
}

impl StockBook {
    /// Build a fresh catalogue entry: zero misses, zero ratings, not picked.
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        num_copies: u64,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            num_sale_misses: 0,
            total_rating: 0,
            num_times_rated: 0,
            editor_pick: false,
        }
    }

    /// Average rating, or [`UNRATED`] when the book was never rated.
    pub fn average_rating(&self) -> f64 {
        if self.num_times_rated == 0 {
            UNRATED
        } else {
            self.total_rating as f64 / self.num_times_rated as f64
        }
    }

    /// The client-visible projection of this view.
    pub fn to_book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

impl fmt::Display for StockBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISBN = {}, Title = {}, Author = {}, Price = {}, Copies = {}",
            self.isbn, self.title, self.author, self.price, self.num_copies
        )
    }
}

// ============================================================================
// Operation inputs
// ============================================================================

/// A copy delta: buy or restock `num_copies` of one book
///
/// A well-formed delta has `num_copies >= 1`; the catalogue rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookCopy {
    /// Catalogue key
    pub isbn: Isbn,
    /// Number of copies, at least 1
    pub num_copies: u64,
}

impl BookCopy {
    /// Create a copy delta
    pub fn new(isbn: Isbn, num_copies: u64) -> Self {
        Self { isbn, num_copies }
    }
}

/// An editor-pick update for one book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEditorPick {
    /// Catalogue key
    pub isbn: Isbn,
    /// New value of the curation flag
    pub editor_pick: bool,
}

impl BookEditorPick {
    /// Create an editor-pick update
    pub fn new(isbn: Isbn, editor_pick: bool) -> Self {
        Self { isbn, editor_pick }
    }
}

/// A rating submission for one book
///
/// A well-formed rating is in 0..=5; the catalogue rejects anything above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRating {
    /// Catalogue key
    pub isbn: Isbn,
    /// Rating in 0..=5
    pub rating: u8,
}

impl BookRating {
    /// Create a rating submission
    pub fn new(isbn: Isbn, rating: u8) -> Self {
        Self { isbn, rating }
    }
}
