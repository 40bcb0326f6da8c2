//! History collection: canonical per-day observations and the trailing
//! demand signal

use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use store_data::SalesStore;

/// Default lookback window for history collection, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

/// Window for the trailing moving-average demand signal, in days.
pub const DEMAND_WINDOW_DAYS: i64 = 30;

/// Placeholder weather value stamped on every observation; the store keeps
/// no weather data, but the trained schemas expect the column.
pub const WEATHER_PLACEHOLDER: &str = "Normal";

/// Placeholder seasonality value, same situation as weather.
pub const SEASONALITY_PLACEHOLDER: &str = "Regular";

/// One canonical history row: a sales transaction joined with the product's
/// *current* inventory and category. Inventory reflects present state, not
/// state at sale time.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Product identifier
    pub product_id: String,
    /// Category name; `None` only for rows built outside the collector
    pub category: Option<String>,
    /// Product's current stock level
    pub inventory_level: f64,
    /// Unit price at sale time (current list price for placeholder rows)
    pub price: f64,
    /// Discount applied
    pub discount: f64,
    /// Whether the row was sold under a promotion
    pub promotion: bool,
    /// Units sold
    pub units_sold: f64,
    /// Scaled trailing demand signal for the product
    pub demand_signal: f64,
    /// Weather placeholder column
    pub weather: String,
    /// Seasonality placeholder column
    pub seasonality: String,
}

/// Trailing moving-average of units sold, computed independently of any
/// model and injected as an input feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandSignalEstimator;

impl DemandSignalEstimator {
    /// Average daily units over `[reference - window_days, reference)`,
    /// rounded to 2 decimals. The reference date itself is excluded; missing
    /// data contributes zero.
    pub fn estimate<S: SalesStore>(
        store: &S,
        product_id: &str,
        reference: NaiveDate,
        window_days: i64,
    ) -> Result<f64> {
        if window_days <= 0 {
            return Err(ForecastError::Validation(format!(
                "Demand window must be positive, got {}",
                window_days
            )));
        }

        let start = reference - Duration::days(window_days);
        let total = store.units_sold_between(product_id, start, reference)?;
        Ok(round2(total / window_days as f64))
    }
}

/// Reads raw sales for a set of products over a lookback window and
/// normalizes them into [`Observation`] rows.
#[derive(Debug)]
pub struct HistoryCollector<S> {
    store: S,
    lookback_days: i64,
}

impl<S: SalesStore> HistoryCollector<S> {
    /// Collector with the default 90-day lookback.
    pub fn new(store: S) -> Self {
        Self {
            store,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Override the lookback window.
    pub fn with_lookback_days(mut self, lookback_days: i64) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Collect observations for `product_ids` over the window ending at
    /// `as_of`.
    ///
    /// Products with no sales in the window get exactly one placeholder row
    /// dated `as_of` with zero units at the current list price. The demand
    /// signal is computed once per product as of `as_of` and scaled by the
    /// horizon's calibration factor before being stamped on every row.
    ///
    /// Fails with [`ForecastError::DataAbsent`] when none of the ids match a
    /// product.
    pub fn collect(
        &self,
        product_ids: &[String],
        horizon: Horizon,
        as_of: NaiveDate,
    ) -> Result<Vec<Observation>> {
        let products = self.store.products(product_ids)?;
        if products.is_empty() {
            return Err(ForecastError::DataAbsent(format!(
                "No products found with IDs: {:?}",
                product_ids
            )));
        }

        let mut demand_signals = BTreeMap::new();
        for product in &products {
            let daily_average = DemandSignalEstimator::estimate(
                &self.store,
                &product.product_id,
                as_of,
                DEMAND_WINDOW_DAYS,
            )?;
            demand_signals.insert(
                product.product_id.clone(),
                daily_average * horizon.demand_scale(),
            );
        }

        let start = as_of - Duration::days(self.lookback_days);
        let sales = self.store.sales_between(product_ids, start, as_of)?;

        let by_id: BTreeMap<&str, &store_data::ProductRecord> = products
            .iter()
            .map(|p| (p.product_id.as_str(), p))
            .collect();

        let mut observations = Vec::with_capacity(sales.len());
        let mut seen: HashSet<&str> = HashSet::new();

        for sale in &sales {
            let product = match by_id.get(sale.product_id.as_str()) {
                Some(p) => p,
                None => continue,
            };
            seen.insert(product.product_id.as_str());

            observations.push(Observation {
                date: sale.transaction_date,
                product_id: sale.product_id.clone(),
                category: Some(category_name(product)),
                inventory_level: f64::from(product.current_stock),
                price: sale.unit_price_at_sale,
                discount: sale.discount_applied,
                promotion: sale.promotion_marker,
                units_sold: f64::from(sale.quantity_sold),
                demand_signal: demand_signals
                    .get(&sale.product_id)
                    .copied()
                    .unwrap_or(0.0),
                weather: WEATHER_PLACEHOLDER.to_string(),
                seasonality: SEASONALITY_PLACEHOLDER.to_string(),
            });
        }

        for product in &products {
            if seen.contains(product.product_id.as_str()) {
                continue;
            }
            observations.push(Observation {
                date: as_of,
                product_id: product.product_id.clone(),
                category: Some(category_name(product)),
                inventory_level: f64::from(product.current_stock),
                price: product.unit_price,
                discount: 0.0,
                promotion: false,
                units_sold: 0.0,
                demand_signal: demand_signals
                    .get(&product.product_id)
                    .copied()
                    .unwrap_or(0.0),
                weather: WEATHER_PLACEHOLDER.to_string(),
                seasonality: SEASONALITY_PLACEHOLDER.to_string(),
            });
        }

        observations.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then_with(|| a.date.cmp(&b.date))
        });

        Ok(observations)
    }
}

fn category_name(product: &store_data::ProductRecord) -> String {
    product
        .category
        .clone()
        .unwrap_or_else(|| "Unknown".to_string())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
