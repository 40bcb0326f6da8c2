//! End-to-end demo: synthetic store history, an in-code artifact, and a
//! multi-horizon prediction.
//!
//! Run with: cargo run --example basic_forecast

use chrono::{Duration, Utc};
use demand_forecast::{
    FeatureSchema, Horizon, HorizonArtifact, ModelRegistry, RegressionModel, SalesPredictor,
};
use std::sync::Arc;
use store_data::{synthetic, InMemoryStore, ProductRecord};

fn daily_artifact() -> HorizonArtifact {
    // A small linear model over a handful of schema columns. Real
    // deployments load these from JSON artifact files instead.
    let schema = FeatureSchema {
        columns: vec![
            "UnitsSold_lag_1".to_string(),
            "UnitsSold_roll_mean_7_lag1".to_string(),
            "Demand Forecast_t+1".to_string(),
        ],
        static_categorical: vec!["Category".to_string()],
        time_varying_categorical: Vec::new(),
        categorical_columns: Vec::new(),
        date_features: Vec::new(),
    };
    let model = RegressionModel::Linear {
        intercept: 1.0,
        coefficients: vec![0.4, 0.4, 0.2],
    };
    HorizonArtifact::new(model, schema, None).expect("artifact is consistent")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let products = vec![
        ProductRecord::new("P0001", "Espresso Beans 1kg", Some("Beverages"), 14.5, 120),
        ProductRecord::new("P0002", "Paper Towels 6pk", Some("Household"), 4.2, 300),
    ];

    let today = Utc::now().date_naive();
    let history_start = today - Duration::days(89);

    let mut store = InMemoryStore::new();
    for product in &products {
        store.add_product(product.clone());
    }
    store.add_sales(synthetic::seeded_history(
        &products,
        history_start,
        90,
        8,
        0.7,
        42,
    ));

    let registry = Arc::new(ModelRegistry::empty().with_artifact(Horizon::Daily, daily_artifact()));
    let predictor = SalesPredictor::new(store, registry);

    let ids: Vec<String> = products.iter().map(|p| p.product_id.clone()).collect();
    let summaries = predictor.predict(&ids, Horizon::Daily, 7, None)?;

    println!("7-day forecast:");
    for summary in &summaries {
        println!(
            "  {}: {} units over {} periods ({} days)",
            summary.product_id,
            summary.total_predicted_units,
            summary.forecast_periods,
            summary.actual_forecast_days
        );
    }

    Ok(())
}
