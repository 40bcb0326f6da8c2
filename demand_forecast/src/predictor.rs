//! Request-scoped orchestration: history → features → model → summaries

use crate::aggregate::aggregate;
use crate::error::{ForecastError, Result};
use crate::features::{FeatureBuilder, FeatureVector};
use crate::history::{HistoryCollector, DEFAULT_LOOKBACK_DAYS};
use crate::horizon::Horizon;
use crate::registry::ModelRegistry;
use crate::summary::{summarize, PredictionRecord, SummaryRecord};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use store_data::SalesStore;

/// Serving-boundary shape: either the summaries or a structured error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    /// Successful prediction
    Summaries(Vec<SummaryRecord>),
    /// Pipeline failure, reported as `{"error": "..."}`
    Error { error: String },
}

/// Runs the full prediction pipeline for a batch of products.
///
/// Each call is request-scoped and synchronous; the registry is shared
/// read-only state loaded once at process start. One product's failure
/// fails the whole batch.
#[derive(Debug)]
pub struct SalesPredictor<S> {
    store: S,
    registry: Arc<ModelRegistry>,
    lookback_days: i64,
}

impl<S: SalesStore> SalesPredictor<S> {
    /// Predictor over a store and a loaded registry, with the default
    /// 90-day history lookback.
    pub fn new(store: S, registry: Arc<ModelRegistry>) -> Self {
        Self {
            store,
            registry,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Override the history lookback window.
    pub fn with_lookback_days(mut self, lookback_days: i64) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Predict with the history window ending today.
    pub fn predict(
        &self,
        product_ids: &[String],
        horizon: Horizon,
        periods: u32,
        last_known_date: Option<NaiveDate>,
    ) -> Result<Vec<SummaryRecord>> {
        self.predict_as_of(
            product_ids,
            horizon,
            periods,
            last_known_date,
            Utc::now().date_naive(),
        )
    }

    /// Predict with an explicit reference date for history collection.
    ///
    /// Forecast dates start one period after `last_known_date` (or
    /// `as_of`): +1 day, +1 week, or +30 days per period — the monthly step
    /// is a fixed 30-day stride. The model predicts one aggregate value per
    /// product, which is split evenly across the periods.
    pub fn predict_as_of(
        &self,
        product_ids: &[String],
        horizon: Horizon,
        periods: u32,
        last_known_date: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> Result<Vec<SummaryRecord>> {
        if periods == 0 {
            return Err(ForecastError::Validation(
                "Forecast period count must be at least 1".to_string(),
            ));
        }

        // Resolve the artifact before touching the store so an unusable
        // horizon fails without a query.
        let artifact = self.registry.artifact(horizon)?;

        let collector =
            HistoryCollector::new(&self.store).with_lookback_days(self.lookback_days);
        let observations = collector.collect(product_ids, horizon, as_of)?;
        let buckets = aggregate(&observations, horizon);

        let base = last_known_date.unwrap_or(as_of);
        let builder = FeatureBuilder::new(horizon, artifact);
        let product_vectors = builder.build(&buckets, Some(base));

        let vectors: Vec<FeatureVector> =
            product_vectors.iter().map(|p| p.vector.clone()).collect();
        let totals = self.registry.predict(horizon, &vectors)?;

        let dates: Vec<NaiveDate> = (1..=periods)
            .map(|i| horizon.forecast_date(base, i))
            .collect();

        let mut records = Vec::with_capacity(product_vectors.len() * dates.len());
        for (product, total) in product_vectors.iter().zip(totals.iter()) {
            let per_period = total / f64::from(periods);
            for date in &dates {
                records.push(PredictionRecord {
                    date: *date,
                    product_id: product.product_id.clone(),
                    predicted_units: per_period,
                    horizon,
                });
            }
        }

        Ok(summarize(&records))
    }

    /// String-typed entry point for the serving layer. Validates the
    /// horizon, period count, and date shape before any store access.
    pub fn predict_request(
        &self,
        product_ids: &[String],
        horizon: &str,
        periods: u32,
        last_known_date: Option<&str>,
    ) -> Result<Vec<SummaryRecord>> {
        let horizon: Horizon = horizon.parse()?;
        let last_known_date = last_known_date
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                    ForecastError::Validation(format!("Malformed date '{}': {}", s, e))
                })
            })
            .transpose()?;

        self.predict(product_ids, horizon, periods, last_known_date)
    }

    /// Outermost boundary: any pipeline error becomes the serving error
    /// shape instead of propagating.
    pub fn predict_response(
        &self,
        product_ids: &[String],
        horizon: &str,
        periods: u32,
        last_known_date: Option<&str>,
    ) -> PredictResponse {
        match self.predict_request(product_ids, horizon, periods, last_known_date) {
            Ok(summaries) if summaries.is_empty() => PredictResponse::Error {
                error: "No predictions could be generated".to_string(),
            },
            Ok(summaries) => PredictResponse::Summaries(summaries),
            Err(e) => PredictResponse::Error {
                error: e.to_string(),
            },
        }
    }
}
