//! # Shelfcast
//!
//! Umbrella crate for the shelfcast workspace: per-product unit-sales
//! forecasting at daily, weekly, and monthly granularity.
//!
//! The workspace is split into two member crates:
//!
//! - [`store_data`] — canonical store-side records (products, sales) and the
//!   read-only `SalesStore` collaborator used as the history source.
//! - [`demand_forecast`] — the feature-construction and multi-horizon
//!   prediction pipeline: history collection, temporal aggregation, feature
//!   building, model registry, and prediction summarization.
//!
//! ## Example
//!
//! ```no_run
//! use demand_forecast::{Horizon, ModelRegistry, SalesPredictor};
//! use store_data::InMemoryStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let store = InMemoryStore::from_csv_files("products.csv", "sales.csv").unwrap();
//! let registry = Arc::new(ModelRegistry::load(Path::new("artifacts"), 1));
//! let predictor = SalesPredictor::new(store, registry);
//!
//! let summaries = predictor
//!     .predict(&["P0001".to_string()], Horizon::Weekly, 4, None)
//!     .unwrap();
//! for summary in summaries {
//!     println!("{}: {} units", summary.product_id, summary.total_predicted_units);
//! }
//! ```

pub use demand_forecast;
pub use store_data;

#[cfg(test)]
mod tests {
    #[test]
    fn members_are_reachable() {
        assert!(!demand_forecast::VERSION.is_empty());
        assert_eq!(demand_forecast::NAME, "demand_forecast");
    }
}
