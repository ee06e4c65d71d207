//! State invariants checked over sequences of operations
//!
//! Copy conservation, sale-miss accounting, restock resets, and the
//! equivalence of the whole-catalogue and by-ISBN read paths.

use crate::common::{catalogue_with_default_book, shelf, DEFAULT_COPIES, DEFAULT_ISBN};
use folio::{BookCopy, Catalogue, Isbn, StockBook};

#[test]
fn copies_never_go_negative_under_failed_buys() {
    let catalogue = catalogue_with_default_book();
    let isbn = Isbn::new(DEFAULT_ISBN);

    for _ in 0..10 {
        let _ = catalogue.buy_books(&[BookCopy::new(isbn, DEFAULT_COPIES * 3)]);
        let copies = catalogue.get_books_by_isbn(&[isbn]).unwrap()[0].num_copies;
        assert_eq!(copies, DEFAULT_COPIES);
    }
}

#[test]
fn restock_deltas_accumulate() {
    let catalogue = catalogue_with_default_book();
    let isbn = Isbn::new(DEFAULT_ISBN);

    catalogue.add_copies(&[BookCopy::new(isbn, 3)]).unwrap();
    catalogue
        .add_copies(&[BookCopy::new(isbn, 2), BookCopy::new(isbn, 4)])
        .unwrap();

    let copies = catalogue.get_books_by_isbn(&[isbn]).unwrap()[0].num_copies;
    assert_eq!(copies, DEFAULT_COPIES + 3 + 2 + 4);
}

#[test]
fn purchases_and_restocks_conserve_copies() {
    let catalogue = catalogue_with_default_book();
    let isbn = Isbn::new(DEFAULT_ISBN);
    let mut bought = 0u64;
    let mut added = 0u64;

    for round in 1..=6u64 {
        catalogue.add_copies(&[BookCopy::new(isbn, round)]).unwrap();
        added += round;
        catalogue.buy_books(&[BookCopy::new(isbn, 1)]).unwrap();
        bought += 1;
    }

    let copies = catalogue.get_books_by_isbn(&[isbn]).unwrap()[0].num_copies;
    assert_eq!(copies + bought, DEFAULT_COPIES + added);
}

#[test]
fn each_failed_buy_adds_exactly_the_shortfall() {
    let catalogue = catalogue_with_default_book();
    let isbn = Isbn::new(DEFAULT_ISBN);

    // Shortfall of (requested - available) per failed call: 2, then 7.
    let _ = catalogue.buy_books(&[BookCopy::new(isbn, DEFAULT_COPIES + 2)]);
    let _ = catalogue.buy_books(&[BookCopy::new(isbn, DEFAULT_COPIES + 7)]);

    let misses = catalogue.get_books_by_isbn(&[isbn]).unwrap()[0].num_sale_misses;
    assert_eq!(misses, 2 + 7);
}

#[test]
fn restock_resets_the_miss_counter_to_zero() {
    let catalogue = catalogue_with_default_book();
    let isbn = Isbn::new(DEFAULT_ISBN);

    let _ = catalogue.buy_books(&[BookCopy::new(isbn, DEFAULT_COPIES + 4)]);
    assert_eq!(
        catalogue.get_books_by_isbn(&[isbn]).unwrap()[0].num_sale_misses,
        4
    );

    catalogue.add_copies(&[BookCopy::new(isbn, 1)]).unwrap();
    let book = &catalogue.get_books_by_isbn(&[isbn]).unwrap()[0];
    assert_eq!(book.num_sale_misses, 0);
    assert_eq!(book.num_copies, DEFAULT_COPIES + 1);
}

#[test]
fn whole_catalogue_and_by_isbn_reads_agree() {
    let catalogue = Catalogue::new();
    catalogue.add_books(&shelf(7, 3)).unwrap();

    let mut all = catalogue.get_books();
    let isbns: Vec<Isbn> = all.iter().map(|b| b.isbn).collect();
    let mut by_isbn = catalogue.get_books_by_isbn(&isbns).unwrap();

    all.sort_by_key(|b| b.isbn);
    by_isbn.sort_by_key(|b| b.isbn);
    assert_eq!(all, by_isbn);
}

#[test]
fn rating_totals_stay_within_bounds() {
    use folio::BookRating;

    let catalogue = Catalogue::new();
    catalogue.add_books(&shelf(1, 1)).unwrap();
    let isbn = Isbn::new(1);

    for rating in [0u8, 5, 3, 5, 1] {
        catalogue.rate_books(&[BookRating::new(isbn, rating)]).unwrap();
    }

    let book: StockBook = catalogue.get_books_by_isbn(&[isbn]).unwrap().remove(0);
    assert_eq!(book.num_times_rated, 5);
    assert_eq!(book.total_rating, 14);
    assert!(book.total_rating <= 5 * book.num_times_rated);
    assert!((book.average_rating() - 2.8).abs() < f64::EPSILON);
}
