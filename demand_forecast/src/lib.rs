//! # Demand Forecast
//!
//! Multi-horizon unit-sales forecasting over externally trained regression
//! models. The crate turns raw transaction history into fixed-schema
//! feature vectors and routes them to horizon-specific model artifacts.
//!
//! ## Pipeline
//!
//! - History collection: raw sales joined with current product state into
//!   canonical observations, stamped with a trailing demand signal.
//! - Temporal aggregation: daily observations collapsed into ISO-week or
//!   calendar-month buckets for the non-daily horizons.
//! - Feature building: lag, rolling, calendar, and carry-forward features,
//!   encoded and aligned to the artifact's frozen column schema.
//! - Model registry: one loaded artifact per horizon, predictions clamped
//!   to ≥ 0.
//! - Summarization: per-period predictions rolled up to one record per
//!   (product, horizon).
//!
//! Models arrive as already-fit artifacts; this crate loads and invokes
//! them but never trains.
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::{Horizon, ModelRegistry, SalesPredictor};
//! use store_data::InMemoryStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! // Load the per-horizon artifacts once at startup.
//! let registry = Arc::new(ModelRegistry::load(Path::new("artifacts"), 1));
//!
//! let store = InMemoryStore::from_csv_files("products.csv", "sales.csv").unwrap();
//! let predictor = SalesPredictor::new(store, registry);
//!
//! let summaries = predictor
//!     .predict(&["P0001".to_string()], Horizon::Weekly, 4, None)
//!     .unwrap();
//! ```

pub mod aggregate;
pub mod artifact;
pub mod error;
pub mod features;
pub mod history;
pub mod horizon;
pub mod predictor;
pub mod registry;
pub mod summary;

// Re-export commonly used types
pub use crate::aggregate::{aggregate, PeriodBucket};
pub use crate::artifact::{
    CategoricalEncoder, DecisionTree, FeatureSchema, HorizonArtifact, RegressionModel, TreeNode,
};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeatureBuilder, FeatureRow, FeatureValue, FeatureVector, ProductVector};
pub use crate::history::{DemandSignalEstimator, HistoryCollector, Observation};
pub use crate::horizon::Horizon;
pub use crate::predictor::{PredictResponse, SalesPredictor};
pub use crate::registry::ModelRegistry;
pub use crate::summary::{summarize, PredictionRecord, SummaryRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
