//! Aggregation of per-period predictions into serving summaries

use crate::horizon::Horizon;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One raw model prediction attributed to a forecast date. Never persisted;
/// rebuilt per request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    /// Resolved forecast date
    pub date: NaiveDate,
    /// Product the prediction is for
    pub product_id: String,
    /// Predicted units for this period
    pub predicted_units: f64,
    /// Horizon that produced the prediction
    pub horizon: Horizon,
}

/// Terminal pipeline output: one row per (product, horizon). Field names
/// serialize exactly as the serving layer expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    /// Product identifier
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    /// Rounded total of the group's predictions
    #[serde(rename = "Total_Predicted_Units_Sold")]
    pub total_predicted_units: i64,
    /// Number of distinct forecast dates in the group
    #[serde(rename = "Forecast_Periods")]
    pub forecast_periods: usize,
    /// Horizon label
    #[serde(rename = "Model_Type")]
    pub model_type: Horizon,
    /// Period count converted to days (1/7/30 per period)
    #[serde(rename = "Actual_Forecast_Days")]
    pub actual_forecast_days: i64,
}

/// Collapse prediction records into one summary per (product, horizon),
/// ordered by product id. Empty input yields empty output.
pub fn summarize(records: &[PredictionRecord]) -> Vec<SummaryRecord> {
    let mut groups: BTreeMap<(String, Horizon), (f64, BTreeSet<NaiveDate>)> = BTreeMap::new();

    for record in records {
        let entry = groups
            .entry((record.product_id.clone(), record.horizon))
            .or_insert_with(|| (0.0, BTreeSet::new()));
        entry.0 += record.predicted_units;
        entry.1.insert(record.date);
    }

    groups
        .into_iter()
        .map(|((product_id, horizon), (total, dates))| {
            let forecast_periods = dates.len();
            SummaryRecord {
                product_id,
                total_predicted_units: total.round() as i64,
                forecast_periods,
                model_type: horizon,
                actual_forecast_days: forecast_periods as i64 * horizon.period_days(),
            }
        })
        .collect()
}
