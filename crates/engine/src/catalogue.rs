//! The catalogue: ISBN map plus the two-level locking protocol
//!
//! ## Locking protocol
//!
//! Two lock levels, with a fixed acquisition discipline:
//!
//! 1. **Catalogue level**: one reader/writer lock over the ISBN map.
//!    Structural changes (insert, remove, clear) hold it exclusive and
//!    need no per-record locks, since nothing else can be in flight.
//!    Every other operation holds it shared, which freezes the key set
//!    for the duration of the call.
//! 2. **Record level**: each record's own lock, taken only while the
//!    catalogue-level lock is held shared. Multi-record operations
//!    acquire record locks in ascending ISBN order and release them in
//!    reverse order.
//!
//! The ascending-ISBN total order plus the level ordering (catalogue
//! before record, never the other way) rules out lock cycles. No call
//! path takes a record lock without the catalogue read lock, and no call
//! path takes the catalogue write lock while holding a record lock.
//!
//! ## Atomicity
//!
//! Every operation validates its entire input before mutating anything;
//! the first offending element (in input iteration order) aborts the call
//! with no observable effect. `buy_books` is the one partial exception:
//! when stock is short it records per-ISBN sale-miss counts, under the
//! same write guards, before failing.
//!
//! Each operation follows: catalogue lock → validate → record locks
//! (ascending) → apply → record locks released (descending) → catalogue
//! lock released. All locks are drop-released guards, so early returns
//! and panics cannot leak a lock.

use crate::lockable::LockableBook;
use crate::record::BookRecord;
use folio_core::{
    Book, BookCopy, BookEditorPick, BookRating, FolioError, FolioResult, Isbn, StockBook,
};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rand::seq::index;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

type BookMap = BTreeMap<Isbn, LockableBook>;

/// In-memory bookstore catalogue, safe for arbitrary concurrent use
///
/// One `Catalogue` serves both capability surfaces: the purchasing
/// front-end and the stock manager. All operations take `&self`; share the
/// catalogue between threads behind an `Arc`.
///
/// The `BTreeMap` keyed by [`Isbn`] is deliberate: its iteration order is
/// exactly the ascending-ISBN lock order, so "acquire in map order" and
/// "acquire in lock order" are the same thing.
#[derive(Debug, Default)]
pub struct Catalogue {
    books: RwLock<BookMap>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the catalogue
    ///
    /// Touches no record fields, so the catalogue-level read lock alone
    /// suffices.
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// True iff the catalogue holds no records
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }

    // ========================================================================
    // Mode A - catalogue-exclusive operations
    // ========================================================================

    /// Admit a set of new books
    ///
    /// All-or-nothing: every descriptor is validated (well-formed ISBN,
    /// non-empty title and author, finite non-negative price, no duplicate
    /// against the catalogue or within the batch) before any is inserted.
    pub fn add_books(&self, books: &[StockBook]) -> FolioResult<()> {
        let mut map = self.books.write();

        let mut batch: HashSet<Isbn> = HashSet::with_capacity(books.len());
        for book in books {
            Self::validate_new_book(&map, &batch, book)?;
            batch.insert(book.isbn);
        }
        for book in books {
            map.insert(
                book.isbn,
                LockableBook::new(BookRecord::from_stock_book(book)),
            );
        }

        debug!(count = books.len(), "admitted books");
        Ok(())
    }

    /// Remove a set of books
    ///
    /// All-or-nothing: every ISBN must be well-formed and present, or
    /// nothing is removed.
    pub fn remove_books(&self, isbns: &[Isbn]) -> FolioResult<()> {
        let mut map = self.books.write();

        for &isbn in isbns {
            if !isbn.is_valid() {
                return Err(FolioError::InvalidIsbn { isbn });
            }
            if !map.contains_key(&isbn) {
                return Err(FolioError::IsbnNotPresent { isbn });
            }
        }
        for isbn in isbns {
            map.remove(isbn);
        }

        debug!(count = isbns.len(), "removed books");
        Ok(())
    }

    /// Remove every book in the catalogue
    pub fn remove_all_books(&self) {
        let mut map = self.books.write();
        let count = map.len();
        map.clear();
        debug!(count, "cleared catalogue");
    }

    // ========================================================================
    // Mode B - catalogue-shared + per-record operations
    // ========================================================================

    /// Restock copies of existing books
    ///
    /// Applies each delta under its record's write lock; restocking resets
    /// the record's sale-miss counter.
    pub fn add_copies(&self, copies: &[BookCopy]) -> FolioResult<()> {
        let map = self.books.read();
        let touched = Self::validate_copies(&map, copies)?;

        let mut guards = Self::write_guards(&touched);
        for copy in copies {
            let record = guards
                .get_mut(&copy.isbn)
                .expect("write guard held for every validated ISBN");
            record.add_copies(copy.num_copies);
        }
        Self::release_reverse_keyed(guards);
        Ok(())
    }

    /// Purchase copies of existing books, atomically across the input
    ///
    /// Either every requested purchase succeeds, or the call fails with
    /// [`FolioError::OutOfStock`] and the only mutation is the sale-miss
    /// bookkeeping: each short ISBN's counter grows by `requested -
    /// available`, measured under the very write guards the purchase would
    /// have used. Multiple deltas for one ISBN are summed and must be
    /// satisfiable together.
    pub fn buy_books(&self, copies: &[BookCopy]) -> FolioResult<()> {
        let map = self.books.read();
        let touched = Self::validate_copies(&map, copies)?;

        let mut requested: BTreeMap<Isbn, u64> = BTreeMap::new();
        for copy in copies {
            *requested.entry(copy.isbn).or_insert(0) += copy.num_copies;
        }

        let mut guards = Self::write_guards(&touched);

        // Shortage snapshot, taken under the write guards so no concurrent
        // buyer or restock can move the counts between check and apply.
        let mut shortfalls: Vec<(Isbn, u64)> = Vec::new();
        for (&isbn, &wanted) in &requested {
            let record = guards
                .get(&isbn)
                .expect("write guard held for every validated ISBN");
            if !record.copies_available(wanted) {
                shortfalls.push((isbn, wanted - record.num_copies()));
            }
        }

        let result = if shortfalls.is_empty() {
            for (&isbn, &wanted) in &requested {
                let record = guards
                    .get_mut(&isbn)
                    .expect("write guard held for every validated ISBN");
                let bought = record.buy(wanted);
                debug_assert!(bought, "availability was checked under this guard");
            }
            Ok(())
        } else {
            for &(isbn, short) in &shortfalls {
                let record = guards
                    .get_mut(&isbn)
                    .expect("write guard held for every short ISBN");
                record.add_sale_miss(short);
            }
            debug!(short_isbns = shortfalls.len(), "purchase rejected, sale misses recorded");
            Err(FolioError::OutOfStock)
        };

        Self::release_reverse_keyed(guards);
        result
    }

    /// Rate existing books
    ///
    /// Each rating must be in 0..=5; all ratings are applied under the
    /// same set of write guards.
    pub fn rate_books(&self, ratings: &[BookRating]) -> FolioResult<()> {
        let map = self.books.read();

        let mut touched: BTreeMap<Isbn, &LockableBook> = BTreeMap::new();
        for rating in ratings {
            let entry = Self::entry(&map, rating.isbn)?;
            if rating.rating > 5 {
                return Err(FolioError::InvalidRating {
                    isbn: rating.isbn,
                    rating: rating.rating,
                });
            }
            touched.insert(rating.isbn, entry);
        }

        let mut guards = Self::write_guards(&touched);
        for rating in ratings {
            let record = guards
                .get_mut(&rating.isbn)
                .expect("write guard held for every validated ISBN");
            record.add_rating(rating.rating);
        }
        Self::release_reverse_keyed(guards);
        Ok(())
    }

    /// Update the editor-pick flag of existing books
    pub fn update_editor_picks(&self, picks: &[BookEditorPick]) -> FolioResult<()> {
        let map = self.books.read();

        let mut touched: BTreeMap<Isbn, &LockableBook> = BTreeMap::new();
        for pick in picks {
            touched.insert(pick.isbn, Self::entry(&map, pick.isbn)?);
        }

        let mut guards = Self::write_guards(&touched);
        for pick in picks {
            let record = guards
                .get_mut(&pick.isbn)
                .expect("write guard held for every validated ISBN");
            record.set_editor_pick(pick.editor_pick);
        }
        Self::release_reverse_keyed(guards);
        Ok(())
    }

    /// Snapshot every record, operator view
    pub fn get_books(&self) -> Vec<StockBook> {
        let map = self.books.read();
        let guards: Vec<RwLockReadGuard<'_, BookRecord>> =
            map.values().map(|book| book.read()).collect();
        let books = guards.iter().map(|record| record.stock_book()).collect();
        Self::release_reverse(guards);
        books
    }

    /// Snapshot the requested records in request order, operator view
    pub fn get_books_by_isbn(&self, isbns: &[Isbn]) -> FolioResult<Vec<StockBook>> {
        self.snapshot_by_isbn(isbns, BookRecord::stock_book)
    }

    /// Snapshot the requested records in request order, client view
    pub fn get_books_for_clients(&self, isbns: &[Isbn]) -> FolioResult<Vec<Book>> {
        self.snapshot_by_isbn(isbns, BookRecord::book)
    }

    /// Up to `count` editor picks, sampled uniformly without replacement
    ///
    /// When the catalogue holds `count` or fewer picked books, all of them
    /// are returned; otherwise a uniform sample of `count` distinct picks.
    /// The sample order is unspecified.
    pub fn get_editor_picks(&self, count: usize) -> Vec<Book> {
        let map = self.books.read();
        let guards: Vec<RwLockReadGuard<'_, BookRecord>> =
            map.values().map(|book| book.read()).collect();
        let picks: Vec<Book> = guards
            .iter()
            .filter(|record| record.editor_pick())
            .map(|record| record.book())
            .collect();
        Self::release_reverse(guards);

        if picks.len() <= count {
            return picks;
        }
        let mut rng = rand::thread_rng();
        index::sample(&mut rng, picks.len(), count)
            .into_iter()
            .map(|i| picks[i].clone())
            .collect()
    }

    /// The `count` best-rated books, client view
    ///
    /// Unrated books are excluded. Sorted by average rating descending,
    /// ties broken by ascending ISBN. Returns every rated book when fewer
    /// than `count` exist.
    pub fn get_top_rated_books(&self, count: usize) -> Vec<Book> {
        let map = self.books.read();
        let guards: Vec<RwLockReadGuard<'_, BookRecord>> =
            map.values().map(|book| book.read()).collect();
        let mut rated: Vec<(f64, Isbn, Book)> = guards
            .iter()
            .filter(|record| record.num_times_rated() > 0)
            .map(|record| (record.average_rating(), record.isbn(), record.book()))
            .collect();
        Self::release_reverse(guards);

        rated.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        rated.truncate(count);
        rated.into_iter().map(|(_, _, book)| book).collect()
    }

    /// Snapshot every record that has recorded sale misses, operator view
    pub fn get_books_in_demand(&self) -> Vec<StockBook> {
        let map = self.books.read();
        let guards: Vec<RwLockReadGuard<'_, BookRecord>> =
            map.values().map(|book| book.read()).collect();
        let books = guards
            .iter()
            .filter(|record| record.had_sale_miss())
            .map(|record| record.stock_book())
            .collect();
        Self::release_reverse(guards);
        books
    }

    // ========================================================================
    // Validation helpers - run under the catalogue-level lock, before any
    // record lock is taken. They read the map only, never record fields.
    // ========================================================================

    fn validate_new_book(
        books: &BookMap,
        batch: &HashSet<Isbn>,
        book: &StockBook,
    ) -> FolioResult<()> {
        use folio_core::BookFieldReason::*;

        if !book.isbn.is_valid() {
            return Err(FolioError::InvalidIsbn { isbn: book.isbn });
        }
        if book.title.is_empty() {
            return Err(FolioError::InvalidBookFields {
                isbn: book.isbn,
                reason: EmptyTitle,
            });
        }
        if book.author.is_empty() {
            return Err(FolioError::InvalidBookFields {
                isbn: book.isbn,
                reason: EmptyAuthor,
            });
        }
        if !book.price.is_finite() || book.price < 0.0 {
            return Err(FolioError::InvalidBookFields {
                isbn: book.isbn,
                reason: InvalidPrice,
            });
        }
        if books.contains_key(&book.isbn) || batch.contains(&book.isbn) {
            return Err(FolioError::DuplicateIsbn { isbn: book.isbn });
        }
        Ok(())
    }

    /// Well-formed and present, or the matching error
    fn entry<'a>(books: &'a BookMap, isbn: Isbn) -> FolioResult<&'a LockableBook> {
        if !isbn.is_valid() {
            return Err(FolioError::InvalidIsbn { isbn });
        }
        books.get(&isbn).ok_or(FolioError::IsbnNotPresent { isbn })
    }

    fn validate_copies<'a>(
        books: &'a BookMap,
        copies: &[BookCopy],
    ) -> FolioResult<BTreeMap<Isbn, &'a LockableBook>> {
        let mut touched = BTreeMap::new();
        for copy in copies {
            let entry = Self::entry(books, copy.isbn)?;
            if copy.num_copies < 1 {
                return Err(FolioError::InvalidCopyCount {
                    isbn: copy.isbn,
                    num_copies: copy.num_copies,
                });
            }
            touched.insert(copy.isbn, entry);
        }
        Ok(touched)
    }

    // ========================================================================
    // Lock choreography - ascending acquisition, descending release
    // ========================================================================

    /// Acquire write guards for every touched record, in ascending ISBN
    /// order (the `BTreeMap` iteration order).
    fn write_guards<'a>(
        touched: &BTreeMap<Isbn, &'a LockableBook>,
    ) -> BTreeMap<Isbn, RwLockWriteGuard<'a, BookRecord>> {
        touched
            .iter()
            .map(|(&isbn, book)| (isbn, book.write()))
            .collect()
    }

    /// Acquire read guards for every touched record, in ascending ISBN
    /// order.
    fn read_guards<'a>(
        touched: &BTreeMap<Isbn, &'a LockableBook>,
    ) -> BTreeMap<Isbn, RwLockReadGuard<'a, BookRecord>> {
        touched
            .iter()
            .map(|(&isbn, book)| (isbn, book.read()))
            .collect()
    }

    /// Release keyed guards from the highest ISBN down.
    fn release_reverse_keyed<G>(mut guards: BTreeMap<Isbn, G>) {
        while guards.pop_last().is_some() {}
    }

    /// Release guards in the reverse of their acquisition order.
    fn release_reverse<G>(mut guards: Vec<G>) {
        while guards.pop().is_some() {}
    }

    fn snapshot_by_isbn<T>(
        &self,
        isbns: &[Isbn],
        snapshot: impl Fn(&BookRecord) -> T,
    ) -> FolioResult<Vec<T>> {
        let map = self.books.read();

        let mut touched: BTreeMap<Isbn, &LockableBook> = BTreeMap::new();
        for &isbn in isbns {
            touched.insert(isbn, Self::entry(&map, isbn)?);
        }

        let guards = Self::read_guards(&touched);
        let books = isbns
            .iter()
            .map(|isbn| {
                let record = guards
                    .get(isbn)
                    .expect("read guard held for every requested ISBN");
                snapshot(record)
            })
            .collect();
        Self::release_reverse_keyed(guards);
        Ok(books)
    }
}
