//! CSV ingestion into the in-memory store

use crate::{InMemoryStore, ProductRecord, Result, SalesRecord};
use std::fs::File;
use std::path::Path;

impl InMemoryStore {
    /// Load a store from two CSV files: one with product rows, one with
    /// sales rows. Headers must match the record field names
    /// (`product_id`, `unit_price`, ... / `transaction_date`,
    /// `quantity_sold`, ...); dates are ISO `YYYY-MM-DD`.
    pub fn from_csv_files<P: AsRef<Path>, Q: AsRef<Path>>(
        products_path: P,
        sales_path: Q,
    ) -> Result<Self> {
        let mut store = InMemoryStore::new();

        let mut products = csv::Reader::from_reader(File::open(products_path)?);
        for record in products.deserialize() {
            let product: ProductRecord = record?;
            store.add_product(product);
        }

        let mut sales = csv::Reader::from_reader(File::open(sales_path)?);
        for record in sales.deserialize() {
            let sale: SalesRecord = record?;
            store.add_sale(sale);
        }

        Ok(store)
    }
}
