//! Artifact loading demo: write per-horizon JSON artifacts the way a
//! training pipeline would, then load them through the registry.
//!
//! Run with: cargo run --example artifact_files

use demand_forecast::{FeatureVector, Horizon, ModelRegistry};
use serde_json::json;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("demand_forecast_artifacts");
    fs::create_dir_all(&dir)?;

    // A weekly artifact: model, frozen schema, categorical encoder.
    fs::write(
        dir.join("weekly_store_1_model.json"),
        json!({
            "kind": "linear",
            "intercept": 3.0,
            "coefficients": [0.5, 0.25, 2.0, 0.0]
        })
        .to_string(),
    )?;
    fs::write(
        dir.join("weekly_store_1_features.json"),
        json!({
            "columns": [
                "UnitsSold_lag_1_week",
                "UnitsSold_roll_mean_4_week",
                "Category_Beverages",
                "Category_Household"
            ],
            "static_categorical": ["Category"],
            "categorical_columns": ["Category"]
        })
        .to_string(),
    )?;
    fs::write(
        dir.join("weekly_store_1_encoder.json"),
        json!({
            "kind": "one_hot",
            "columns": ["Category"],
            "categories": [["Beverages", "Household"]]
        })
        .to_string(),
    )?;

    let registry = ModelRegistry::load(&dir, 1);
    for horizon in Horizon::ALL {
        println!("{}: loaded = {}", horizon, registry.is_loaded(horizon));
    }

    // One hand-aligned vector: 12 units last week, rolling mean 8, Beverages.
    let vector = FeatureVector {
        values: vec![12.0, 8.0, 1.0, 0.0],
    };
    let predictions = registry.predict(Horizon::Weekly, &[vector])?;
    println!("weekly prediction: {:.1} units", predictions[0]);

    Ok(())
}
