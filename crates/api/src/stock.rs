//! Stock-management capability: the operator-facing surface
//!
//! The inventory manager's view: admit and remove records, restock,
//! curate, and read the full operator projection including sale-miss
//! counters.

use folio_core::{BookCopy, BookEditorPick, FolioResult, Isbn, StockBook};
use folio_engine::Catalogue;

/// Operator-facing operations of the catalogue
///
/// One catalogue object serves this surface and
/// [`BookStore`](crate::bookstore::BookStore) simultaneously; the split
/// only controls what each client is handed.
pub trait StockManager: Send + Sync {
    /// Admit new books, all-or-nothing
    fn add_books(&self, books: &[StockBook]) -> FolioResult<()>;

    /// Restock copies of existing books; resets their sale-miss counters
    fn add_copies(&self, copies: &[BookCopy]) -> FolioResult<()>;

    /// Set or clear the editor-pick flag on existing books
    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> FolioResult<()>;

    /// Snapshot every record, operator view
    fn get_books(&self) -> Vec<StockBook>;

    /// Snapshot the requested records in request order, operator view
    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> FolioResult<Vec<StockBook>>;

    /// Every record whose sale-miss counter is above zero
    fn get_books_in_demand(&self) -> Vec<StockBook>;

    /// Remove the given records, all-or-nothing
    fn remove_books(&self, isbns: &[Isbn]) -> FolioResult<()>;

    /// Empty the catalogue
    fn remove_all_books(&self);
}

impl StockManager for Catalogue {
    fn add_books(&self, books: &[StockBook]) -> FolioResult<()> {
        Catalogue::add_books(self, books)
    }

    fn add_copies(&self, copies: &[BookCopy]) -> FolioResult<()> {
        Catalogue::add_copies(self, copies)
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> FolioResult<()> {
        Catalogue::update_editor_picks(self, picks)
    }

    fn get_books(&self) -> Vec<StockBook> {
        Catalogue::get_books(self)
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> FolioResult<Vec<StockBook>> {
        Catalogue::get_books_by_isbn(self, isbns)
    }

    fn get_books_in_demand(&self) -> Vec<StockBook> {
        Catalogue::get_books_in_demand(self)
    }

    fn remove_books(&self, isbns: &[Isbn]) -> FolioResult<()> {
        Catalogue::remove_books(self, isbns)
    }

    fn remove_all_books(&self) {
        Catalogue::remove_all_books(self)
    }
}
