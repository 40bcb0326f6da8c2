//! # Store Data
//!
//! `store_data` holds the canonical store-side record types (products and
//! sales transactions) and the read-only [`SalesStore`] interface that the
//! forecasting pipeline consumes as its history source.
//!
//! The store is a collaborator, never owned by the pipeline: implementations
//! here are an in-memory store (also the test double) and CSV ingestion into
//! it. A seeded synthetic-history generator is provided for demos and tests.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use store_data::{InMemoryStore, ProductRecord, SalesRecord, SalesStore};
//!
//! let mut store = InMemoryStore::new();
//! store.add_product(ProductRecord::new("P0001", "Espresso Beans 1kg", Some("Beverages"), 14.5, 120));
//! store.add_sale(SalesRecord {
//!     transaction_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//!     product_id: "P0001".to_string(),
//!     quantity_sold: 3,
//!     unit_price_at_sale: 14.5,
//!     discount_applied: 0.0,
//!     promotion_marker: false,
//! });
//!
//! let rows = store
//!     .sales_between(
//!         &["P0001".to_string()],
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod ingest;
mod memory;
pub mod synthetic;

pub use memory::InMemoryStore;

/// Errors that can occur while querying or loading store data
#[derive(Error, Debug)]
pub enum StoreError {
    /// A query could not be answered
    #[error("Store query error: {0}")]
    Query(String),

    /// A record failed validation on the way in
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with the store error
pub type Result<T> = std::result::Result<T, StoreError>;

/// A product as the store currently knows it.
///
/// `current_stock` and `unit_price` reflect present state, not state at any
/// historical sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Store-wide product identifier
    pub product_id: String,
    /// Display name
    pub name: String,
    /// Category name, if the product is categorized
    pub category: Option<String>,
    /// Current list price
    pub unit_price: f64,
    /// Units currently on hand
    pub current_stock: u32,
    /// Latest observed competitor price, if tracked
    #[serde(default)]
    pub competitor_price: Option<f64>,
}

impl ProductRecord {
    /// Convenience constructor for the common fields.
    pub fn new(
        product_id: &str,
        name: &str,
        category: Option<&str>,
        unit_price: f64,
        current_stock: u32,
    ) -> Self {
        Self {
            product_id: product_id.to_string(),
            name: name.to_string(),
            category: category.map(|c| c.to_string()),
            unit_price,
            current_stock,
            competitor_price: None,
        }
    }
}

/// One sales transaction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the transaction
    pub transaction_date: NaiveDate,
    /// Product sold
    pub product_id: String,
    /// Units sold in this transaction
    pub quantity_sold: u32,
    /// Price charged per unit at sale time
    pub unit_price_at_sale: f64,
    /// Discount applied to this transaction
    pub discount_applied: f64,
    /// Whether the sale happened under a promotion
    pub promotion_marker: bool,
}

/// Read-only interface over the transactional store.
///
/// The forecasting pipeline consumes this and nothing else; it never writes
/// back. Implementations must return sales ordered by transaction date.
pub trait SalesStore {
    /// Product rows for the given ids. Ids with no matching product are
    /// silently absent from the result; callers decide whether an empty
    /// result is an error.
    fn products(&self, product_ids: &[String]) -> Result<Vec<ProductRecord>>;

    /// Sales for the given products with `start <= transaction_date <= end`,
    /// ordered by transaction date.
    fn sales_between(
        &self,
        product_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SalesRecord>>;

    /// Total units sold for one product over the half-open window
    /// `[start, end_exclusive)`.
    fn units_sold_between(
        &self,
        product_id: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<f64>;
}

impl<S: SalesStore + ?Sized> SalesStore for &S {
    fn products(&self, product_ids: &[String]) -> Result<Vec<ProductRecord>> {
        (**self).products(product_ids)
    }

    fn sales_between(
        &self,
        product_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SalesRecord>> {
        (**self).sales_between(product_ids, start, end)
    }

    fn units_sold_between(
        &self,
        product_id: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<f64> {
        (**self).units_sold_between(product_id, start, end_exclusive)
    }
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
