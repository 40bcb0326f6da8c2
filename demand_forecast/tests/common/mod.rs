#![allow(dead_code)]

use chrono::NaiveDate;
use demand_forecast::{
    FeatureSchema, HorizonArtifact, Observation, RegressionModel,
};
use store_data::{ProductRecord, SalesRecord, SalesStore, StoreError};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Canonical observation with sensible defaults for the fields a test does
/// not care about.
pub fn obs(product_id: &str, day: NaiveDate, units: f64) -> Observation {
    Observation {
        date: day,
        product_id: product_id.to_string(),
        category: Some("Beverages".to_string()),
        inventory_level: 50.0,
        price: 10.0,
        discount: 0.0,
        promotion: false,
        units_sold: units,
        demand_signal: 1.2,
        weather: "Normal".to_string(),
        seasonality: "Regular".to_string(),
    }
}

pub fn schema(columns: &[&str], static_categorical: &[&str], categorical: &[&str]) -> FeatureSchema {
    FeatureSchema {
        columns: columns.iter().map(|s| s.to_string()).collect(),
        static_categorical: static_categorical.iter().map(|s| s.to_string()).collect(),
        time_varying_categorical: Vec::new(),
        categorical_columns: categorical.iter().map(|s| s.to_string()).collect(),
        date_features: Vec::new(),
    }
}

/// Linear model with all-zero coefficients: predicts `intercept` for every
/// input, which makes pipeline arithmetic easy to assert on.
pub fn constant_model(schema: &FeatureSchema, intercept: f64) -> RegressionModel {
    RegressionModel::Linear {
        intercept,
        coefficients: vec![0.0; schema.columns.len()],
    }
}

/// Encoder-less artifact over the given numeric columns, predicting a
/// constant.
pub fn constant_artifact(columns: &[&str], intercept: f64) -> HorizonArtifact {
    let schema = schema(columns, &["Category"], &[]);
    let model = constant_model(&schema, intercept);
    HorizonArtifact::new(model, schema, None).unwrap()
}

pub fn product(product_id: &str, category: Option<&str>, unit_price: f64, stock: u32) -> ProductRecord {
    ProductRecord::new(product_id, product_id, category, unit_price, stock)
}

pub fn sale(product_id: &str, day: NaiveDate, qty: u32) -> SalesRecord {
    SalesRecord {
        transaction_date: day,
        product_id: product_id.to_string(),
        quantity_sold: qty,
        unit_price_at_sale: 10.0,
        discount_applied: 0.0,
        promotion_marker: false,
    }
}

/// A store that must never be queried; validation failures are supposed to
/// happen before any store access.
pub struct UnreachableStore;

impl SalesStore for UnreachableStore {
    fn products(
        &self,
        _product_ids: &[String],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        panic!("store was queried before validation finished");
    }

    fn sales_between(
        &self,
        _product_ids: &[String],
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<SalesRecord>, StoreError> {
        panic!("store was queried before validation finished");
    }

    fn units_sold_between(
        &self,
        _product_id: &str,
        _start: NaiveDate,
        _end_exclusive: NaiveDate,
    ) -> Result<f64, StoreError> {
        panic!("store was queried before validation finished");
    }
}
