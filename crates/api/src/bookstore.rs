//! Purchase capability: the client-facing surface
//!
//! What the purchasing front-end is allowed to do: buy, browse the client
//! projection, and rate. Stock counters and curation controls are not
//! reachable from here; those live on the
//! [`StockManager`](crate::stock::StockManager) surface.

use folio_core::{Book, BookCopy, BookRating, FolioResult, Isbn};
use folio_engine::Catalogue;

/// Client-facing operations of the catalogue
///
/// A remote proxy forwards purchase requests to exactly these methods.
/// All methods take `&self`; implementations must be safe for arbitrary
/// concurrent use.
pub trait BookStore: Send + Sync {
    /// Purchase copies, atomically across the whole input
    ///
    /// On [`FolioError::OutOfStock`](folio_core::FolioError::OutOfStock)
    /// the only state change is the sale-miss bookkeeping for the short
    /// ISBNs.
    fn buy_books(&self, copies: &[BookCopy]) -> FolioResult<()>;

    /// Snapshot the requested books in request order, client view
    fn get_books_for_clients(&self, isbns: &[Isbn]) -> FolioResult<Vec<Book>>;

    /// Up to `count` editor picks, sampled uniformly without replacement
    fn get_editor_picks(&self, count: usize) -> Vec<Book>;

    /// The `count` best-rated books; ties broken by ascending ISBN
    fn get_top_rated_books(&self, count: usize) -> Vec<Book>;

    /// Rate books, each rating in 0..=5
    fn rate_books(&self, ratings: &[BookRating]) -> FolioResult<()>;
}

impl BookStore for Catalogue {
    fn buy_books(&self, copies: &[BookCopy]) -> FolioResult<()> {
        Catalogue::buy_books(self, copies)
    }

    fn get_books_for_clients(&self, isbns: &[Isbn]) -> FolioResult<Vec<Book>> {
        Catalogue::get_books_for_clients(self, isbns)
    }

    fn get_editor_picks(&self, count: usize) -> Vec<Book> {
        Catalogue::get_editor_picks(self, count)
    }

    fn get_top_rated_books(&self, count: usize) -> Vec<Book> {
        Catalogue::get_top_rated_books(self, count)
    }

    fn rate_books(&self, ratings: &[BookRating]) -> FolioResult<()> {
        Catalogue::rate_books(self, ratings)
    }
}
