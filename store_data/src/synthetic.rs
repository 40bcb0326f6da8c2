//! Seeded synthetic sales history for demos and tests

use crate::{ProductRecord, SalesRecord};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a deterministic sales history for the given products.
///
/// One transaction is emitted per product per day with probability
/// `activity`, with quantities drawn uniformly from `1..=max_daily_units`.
/// Promotion days get a discount and a quantity bump. The same seed always
/// produces the same rows.
pub fn seeded_history(
    products: &[ProductRecord],
    start: NaiveDate,
    days: u32,
    max_daily_units: u32,
    activity: f64,
    seed: u64,
) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for product in products {
        for offset in 0..days {
            if rng.gen::<f64>() > activity {
                continue;
            }

            let promotion = rng.gen::<f64>() < 0.1;
            let base_qty = rng.gen_range(1..=max_daily_units.max(1));
            let quantity = if promotion { base_qty * 2 } else { base_qty };
            let discount = if promotion {
                (product.unit_price * 0.15 * 100.0).round() / 100.0
            } else {
                0.0
            };

            rows.push(SalesRecord {
                transaction_date: start + Duration::days(i64::from(offset)),
                product_id: product.product_id.clone(),
                quantity_sold: quantity,
                unit_price_at_sale: product.unit_price - discount,
                discount_applied: discount,
                promotion_marker: promotion,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_history() {
        let products = vec![ProductRecord::new("P0001", "A", Some("Snacks"), 3.5, 50)];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let a = seeded_history(&products, start, 30, 8, 0.7, 42);
        let b = seeded_history(&products, start, 30, 8, 0.7, 42);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.transaction_date, y.transaction_date);
            assert_eq!(x.quantity_sold, y.quantity_sold);
        }
    }

    #[test]
    fn quantities_stay_in_range() {
        let products = vec![ProductRecord::new("P0001", "A", None, 2.0, 10)];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for row in seeded_history(&products, start, 60, 5, 1.0, 7) {
            assert!(row.quantity_sold >= 1 && row.quantity_sold <= 10);
        }
    }
}
