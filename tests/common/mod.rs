//! Shared test utilities for the catalogue integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's
//! main.rs.

#![allow(dead_code)]

use folio::{Catalogue, Isbn, StockBook};
use std::sync::Arc;

/// The default test book: five copies, nothing rated, nothing picked.
pub const DEFAULT_ISBN: i64 = 3_044_560;
pub const DEFAULT_COPIES: u64 = 5;

/// Build the default test book.
pub fn default_book() -> StockBook {
    StockBook::new(
        Isbn::new(DEFAULT_ISBN),
        "Harry Potter and JUnit",
        "JK Unit",
        10.0,
        DEFAULT_COPIES,
    )
}

/// A catalogue pre-loaded with the default book.
pub fn catalogue_with_default_book() -> Catalogue {
    let catalogue = Catalogue::new();
    catalogue
        .add_books(&[default_book()])
        .expect("default book must be admissible");
    catalogue
}

/// Build `n` distinct books, ISBNs `1..=n`, each with `copies` copies.
pub fn shelf(n: i64, copies: u64) -> Vec<StockBook> {
    (1..=n)
        .map(|i| {
            StockBook::new(
                Isbn::new(i),
                format!("Book {i}"),
                format!("Author {i}"),
                5.0 + i as f64,
                copies,
            )
        })
        .collect()
}

/// A shared catalogue pre-loaded with a `shelf(n, copies)`.
pub fn shared_catalogue(n: i64, copies: u64) -> Arc<Catalogue> {
    let catalogue = Catalogue::new();
    catalogue
        .add_books(&shelf(n, copies))
        .expect("shelf must be admissible");
    Arc::new(catalogue)
}
