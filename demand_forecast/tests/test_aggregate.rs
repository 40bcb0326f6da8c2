mod common;

use assert_approx_eq::assert_approx_eq;
use chrono::Duration;
use common::{date, obs};
use demand_forecast::{aggregate, Horizon, Observation};
use pretty_assertions::assert_eq;

#[test]
fn ten_days_spanning_two_iso_weeks_make_two_buckets() {
    // Thursday 2024-03-07 through Saturday 2024-03-16: 4 days in the week
    // of Monday 2024-03-04 and 6 days in the week of Monday 2024-03-11.
    let start = date(2024, 3, 7);
    let observations: Vec<Observation> = (0..10)
        .map(|i| obs("P0001", start + Duration::days(i), 2.0))
        .collect();

    let buckets = aggregate(&observations, Horizon::Weekly);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].period_start, date(2024, 3, 4));
    assert_eq!(buckets[0].units_sold, 8.0);
    assert_eq!(buckets[1].period_start, date(2024, 3, 11));
    assert_eq!(buckets[1].units_sold, 12.0);

    // Each bucket's sum equals days-in-bucket x 2.
    for bucket in &buckets {
        let days = (bucket.as_of - bucket.period_start).num_days() + 1;
        assert!(bucket.units_sold <= days as f64 * 2.0 + f64::EPSILON);
    }
}

#[test]
fn weekly_bucket_key_and_bounds() {
    let observations = vec![obs("P0001", date(2024, 3, 7), 2.0)];
    let buckets = aggregate(&observations, Horizon::Weekly);

    assert_eq!(buckets[0].period_key, "2024-W10");
    assert_eq!(buckets[0].period_start, date(2024, 3, 4));
    assert_eq!(buckets[0].period_end, date(2024, 3, 10));
}

#[test]
fn monthly_bucket_spans_the_calendar_month() {
    let observations = vec![
        obs("P0001", date(2024, 2, 3), 1.0),
        obs("P0001", date(2024, 2, 20), 4.0),
    ];
    let buckets = aggregate(&observations, Horizon::Monthly);

    assert_eq!(buckets.len(), 1);
    let bucket = &buckets[0];
    assert_eq!(bucket.period_key, "2024-02");
    assert_eq!(bucket.period_start, date(2024, 2, 1));
    assert_eq!(bucket.period_end, date(2024, 2, 29));
    assert_eq!(bucket.as_of, date(2024, 2, 20));
    assert_eq!(bucket.units_sold, 5.0);
}

#[test]
fn means_promotion_or_and_mode() {
    let mut first = obs("P0001", date(2024, 2, 3), 2.0);
    first.price = 10.0;
    first.discount = 1.0;
    first.promotion = false;
    first.weather = "Rainy".to_string();

    let mut second = obs("P0001", date(2024, 2, 4), 4.0);
    second.price = 14.0;
    second.discount = 0.0;
    second.promotion = true;
    second.weather = "Sunny".to_string();

    let mut third = obs("P0001", date(2024, 2, 5), 0.0);
    third.price = 12.0;
    third.discount = 0.5;
    third.weather = "Sunny".to_string();

    let buckets = aggregate(&[first, second, third], Horizon::Monthly);
    let bucket = &buckets[0];

    assert_eq!(bucket.units_sold, 6.0);
    assert_approx_eq!(bucket.price, 12.0);
    assert_approx_eq!(bucket.discount, 0.5);
    assert!(bucket.promotion);
    assert_eq!(bucket.weather, "Sunny");
}

#[test]
fn mode_tie_resolves_to_first_encountered() {
    let mut first = obs("P0001", date(2024, 2, 3), 1.0);
    first.weather = "Rainy".to_string();
    let mut second = obs("P0001", date(2024, 2, 4), 1.0);
    second.weather = "Sunny".to_string();

    let buckets = aggregate(&[first, second], Horizon::Monthly);
    assert_eq!(buckets[0].weather, "Rainy");
}

#[test]
fn daily_aggregation_is_identity_on_per_day_rows() {
    let observations = vec![
        obs("P0001", date(2024, 3, 4), 3.0),
        obs("P0001", date(2024, 3, 5), 5.0),
    ];
    let buckets = aggregate(&observations, Horizon::Daily);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].period_start, date(2024, 3, 4));
    assert_eq!(buckets[0].period_end, date(2024, 3, 4));
    assert_eq!(buckets[0].units_sold, 3.0);
    assert_eq!(buckets[1].units_sold, 5.0);
}

#[test]
fn products_are_kept_apart() {
    let observations = vec![
        obs("P0001", date(2024, 3, 4), 3.0),
        obs("P0002", date(2024, 3, 4), 7.0),
    ];
    let buckets = aggregate(&observations, Horizon::Weekly);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].product_id, "P0001");
    assert_eq!(buckets[1].product_id, "P0002");
}

#[test]
fn empty_input_yields_no_buckets() {
    assert!(aggregate(&[], Horizon::Weekly).is_empty());
}
