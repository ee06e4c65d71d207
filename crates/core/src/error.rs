//! Error types for the folio catalogue
//!
//! A single [`FolioError`] enum is the unified error type for both
//! capability surfaces. We use `thiserror` for the `Display` and `Error`
//! trait implementations.
//!
//! ## Propagation model
//!
//! Every catalogue operation validates its whole input before touching any
//! record, and the first element that fails validation (in input iteration
//! order) aborts the call. With one exception, [`FolioError::OutOfStock`],
//! which records sale-miss bookkeeping before signalling, a returned error
//! means the catalogue is exactly as it was before the call.

use crate::types::Isbn;
use std::fmt;
use thiserror::Error;

/// Result type alias for catalogue operations
pub type FolioResult<T> = std::result::Result<T, FolioError>;

/// Which field of an added book failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookFieldReason {
    /// Title is empty
    EmptyTitle,
    /// Author is empty
    EmptyAuthor,
    /// Price is negative or not a finite number
    InvalidPrice,
}

impl BookFieldReason {
    /// Canonical string form, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            BookFieldReason::EmptyTitle => "empty title",
            BookFieldReason::EmptyAuthor => "empty author",
            BookFieldReason::InvalidPrice => "invalid price",
        }
    }
}

impl fmt::Display for BookFieldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for all catalogue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FolioError {
    /// The ISBN is not a positive integer
    #[error("invalid ISBN {isbn}")]
    InvalidIsbn {
        /// The offending key
        isbn: Isbn,
    },

    /// A book descriptor has an empty title, empty author, or a bad price
    #[error("invalid book {isbn}: {reason}")]
    InvalidBookFields {
        /// Key of the offending descriptor
        isbn: Isbn,
        /// Which field was at fault
        reason: BookFieldReason,
    },

    /// Inserting an ISBN that is already in the catalogue
    #[error("duplicate ISBN {isbn}")]
    DuplicateIsbn {
        /// The offending key
        isbn: Isbn,
    },

    /// Referencing an ISBN with no record in the catalogue
    #[error("ISBN {isbn} not in the catalogue")]
    IsbnNotPresent {
        /// The offending key
        isbn: Isbn,
    },

    /// A copy delta with a count below 1
    #[error("invalid copy count {num_copies} for ISBN {isbn}")]
    InvalidCopyCount {
        /// Key of the offending delta
        isbn: Isbn,
        /// The rejected count
        num_copies: u64,
    },

    /// A rating outside 0..=5
    #[error("invalid rating {rating} for ISBN {isbn}")]
    InvalidRating {
        /// Key of the offending submission
        isbn: Isbn,
        /// The rejected rating
        rating: u8,
    },

    /// A purchase requested more copies than were available
    ///
    /// The only error that leaves a trace: sale-miss counters of the
    /// short records were updated before the call failed.
    #[error("requested copies not available")]
    OutOfStock,
}

impl FolioError {
    /// True when the failed call still mutated catalogue state
    ///
    /// Only [`FolioError::OutOfStock`] does: the per-ISBN sale-miss
    /// bookkeeping is applied before the error surfaces. Every other
    /// error guarantees the catalogue is untouched.
    pub fn left_bookkeeping(&self) -> bool {
        matches!(self, FolioError::OutOfStock)
    }
}
