//! Capability surfaces for the folio catalogue
//!
//! One catalogue object satisfies two trait surfaces simultaneously:
//! - [`BookStore`]: the purchasing front-end (buy, browse, rate)
//! - [`StockManager`]: the inventory back-end (admit, restock, curate,
//!   remove, operator reads)
//!
//! A transport layer hands each remote client a `dyn` reference to the
//! surface it is entitled to; the engine underneath is shared.
//!
//! ```
//! use std::sync::Arc;
//! use folio_api::{BookStore, StockManager};
//! use folio_engine::Catalogue;
//!
//! let catalogue = Arc::new(Catalogue::new());
//! let store: Arc<dyn BookStore> = catalogue.clone();
//! let manager: Arc<dyn StockManager> = catalogue;
//! assert!(manager.get_books().is_empty());
//! assert!(store.get_editor_picks(3).is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bookstore;
pub mod stock;

pub use bookstore::BookStore;
pub use stock::StockManager;
