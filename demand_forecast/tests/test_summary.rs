mod common;

use common::date;
use demand_forecast::{summarize, Horizon, PredictionRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn record(product_id: &str, day: chrono::NaiveDate, units: f64, horizon: Horizon) -> PredictionRecord {
    PredictionRecord {
        date: day,
        product_id: product_id.to_string(),
        predicted_units: units,
        horizon,
    }
}

#[test]
fn four_daily_periods_sum_to_the_total() {
    let records: Vec<PredictionRecord> = (0..4)
        .map(|i| record("P0001", date(2024, 3, 11 + i), 10.0, Horizon::Daily))
        .collect();

    let summaries = summarize(&records);

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.product_id, "P0001");
    assert_eq!(summary.total_predicted_units, 40);
    assert_eq!(summary.forecast_periods, 4);
    assert_eq!(summary.actual_forecast_days, 4);
    assert_eq!(summary.model_type, Horizon::Daily);
}

#[rstest]
#[case::daily(Horizon::Daily, 1)]
#[case::weekly(Horizon::Weekly, 7)]
#[case::monthly(Horizon::Monthly, 30)]
fn forecast_days_scale_with_the_horizon(#[case] horizon: Horizon, #[case] days_per_period: i64) {
    let records = vec![
        record("P0001", date(2024, 3, 11), 5.0, horizon),
        record("P0001", date(2024, 3, 18), 5.0, horizon),
        record("P0001", date(2024, 3, 25), 5.0, horizon),
    ];

    let summaries = summarize(&records);
    assert_eq!(
        summaries[0].actual_forecast_days,
        summaries[0].forecast_periods as i64 * days_per_period
    );
}

#[test]
fn totals_round_to_integers() {
    let records = vec![
        record("P0001", date(2024, 3, 11), 3.4, Horizon::Daily),
        record("P0001", date(2024, 3, 12), 3.4, Horizon::Daily),
    ];

    let summaries = summarize(&records);
    // 6.8 rounds to 7.
    assert_eq!(summaries[0].total_predicted_units, 7);
}

#[test]
fn groups_split_by_product_and_sort_by_id() {
    let records = vec![
        record("P0002", date(2024, 3, 11), 1.0, Horizon::Weekly),
        record("P0001", date(2024, 3, 11), 2.0, Horizon::Weekly),
    ];

    let summaries = summarize(&records);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].product_id, "P0001");
    assert_eq!(summaries[1].product_id, "P0002");
}

#[test]
fn serialized_field_names_match_the_serving_contract() {
    let records = vec![record("P0001", date(2024, 3, 11), 12.0, Horizon::Weekly)];
    let summaries = summarize(&records);

    let json = serde_json::to_value(&summaries[0]).unwrap();
    assert_eq!(json["Product_ID"], "P0001");
    assert_eq!(json["Total_Predicted_Units_Sold"], 12);
    assert_eq!(json["Forecast_Periods"], 1);
    assert_eq!(json["Model_Type"], "weekly");
    assert_eq!(json["Actual_Forecast_Days"], 7);
}
