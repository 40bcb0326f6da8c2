//! In-memory store implementation, also the test double for the pipeline

use crate::{ProductRecord, Result, SalesRecord, SalesStore};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// In-memory [`SalesStore`] backed by a product map and a sales list.
///
/// Products iterate in id order, so query results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    products: BTreeMap<String, ProductRecord>,
    sales: Vec<SalesRecord>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product.
    pub fn add_product(&mut self, product: ProductRecord) {
        self.products.insert(product.product_id.clone(), product);
    }

    /// Append a sales transaction.
    pub fn add_sale(&mut self, sale: SalesRecord) {
        self.sales.push(sale);
    }

    /// Append many sales transactions.
    pub fn add_sales(&mut self, sales: impl IntoIterator<Item = SalesRecord>) {
        self.sales.extend(sales);
    }

    /// Number of products known to the store.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Number of sales rows in the store.
    pub fn sales_count(&self) -> usize {
        self.sales.len()
    }
}

impl SalesStore for InMemoryStore {
    fn products(&self, product_ids: &[String]) -> Result<Vec<ProductRecord>> {
        Ok(self
            .products
            .values()
            .filter(|p| product_ids.contains(&p.product_id))
            .cloned()
            .collect())
    }

    fn sales_between(
        &self,
        product_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SalesRecord>> {
        let mut rows: Vec<SalesRecord> = self
            .sales
            .iter()
            .filter(|s| {
                product_ids.contains(&s.product_id)
                    && s.transaction_date >= start
                    && s.transaction_date <= end
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        Ok(rows)
    }

    fn units_sold_between(
        &self,
        product_id: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<f64> {
        Ok(self
            .sales
            .iter()
            .filter(|s| {
                s.product_id == product_id
                    && s.transaction_date >= start
                    && s.transaction_date < end_exclusive
            })
            .map(|s| f64::from(s.quantity_sold))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(product_id: &str, day: NaiveDate, qty: u32) -> SalesRecord {
        SalesRecord {
            transaction_date: day,
            product_id: product_id.to_string(),
            quantity_sold: qty,
            unit_price_at_sale: 10.0,
            discount_applied: 0.0,
            promotion_marker: false,
        }
    }

    #[test]
    fn products_come_back_in_id_order() {
        let mut store = InMemoryStore::new();
        store.add_product(ProductRecord::new("P0002", "B", None, 1.0, 1));
        store.add_product(ProductRecord::new("P0001", "A", None, 1.0, 1));

        let ids = vec!["P0002".to_string(), "P0001".to_string()];
        let products = store.products(&ids).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, "P0001");
    }

    #[test]
    fn units_sold_window_is_half_open() {
        let mut store = InMemoryStore::new();
        store.add_sale(sale("P0001", date(2024, 3, 1), 5));
        store.add_sale(sale("P0001", date(2024, 3, 10), 7));

        // End date itself is excluded.
        let total = store
            .units_sold_between("P0001", date(2024, 3, 1), date(2024, 3, 10))
            .unwrap();
        assert_eq!(total, 5.0);
    }
}
