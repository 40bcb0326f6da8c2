//! Temporal aggregation of daily observations into period buckets

use crate::history::Observation;
use crate::horizon::Horizon;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Observations collapsed over one period (day, ISO week, or calendar
/// month) for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    /// Product identifier
    pub product_id: String,
    /// Category carried from the product's first observed row
    pub category: Option<String>,
    /// Human-readable bucket identity ("2024-03-04", "2024-W10", "2024-03")
    pub period_key: String,
    /// First day of the period
    pub period_start: NaiveDate,
    /// Last day of the period
    pub period_end: NaiveDate,
    /// Latest contributing observation date (the bucket's as-of date)
    pub as_of: NaiveDate,
    /// Summed units sold
    pub units_sold: f64,
    /// Mean demand signal
    pub demand_signal: f64,
    /// Mean price
    pub price: f64,
    /// Mean discount
    pub discount: f64,
    /// Mean inventory level
    pub inventory_level: f64,
    /// True when any day in the bucket had a promotion
    pub promotion: bool,
    /// Modal weather value
    pub weather: String,
    /// Modal seasonality value
    pub seasonality: String,
}

/// Collapse observations into per-product period buckets.
///
/// Aggregation rules: units are summed; demand signal, price, discount, and
/// inventory are averaged; promotion is a logical OR; weather and
/// seasonality take the modal value with ties broken by first encounter;
/// the bucket's as-of date is the latest contributing day. Daily granularity
/// buckets by the calendar date itself, the identity on canonical per-day
/// rows. Output is sorted by (product, period start).
pub fn aggregate(observations: &[Observation], horizon: Horizon) -> Vec<PeriodBucket> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        let period_start = horizon.anchor(obs.date);
        groups
            .entry((obs.product_id.clone(), period_start))
            .or_default()
            .push(obs);
    }

    groups
        .into_iter()
        .map(|((product_id, period_start), rows)| {
            let n = rows.len() as f64;
            let category = rows.iter().find_map(|o| o.category.clone());

            PeriodBucket {
                product_id,
                category,
                period_key: period_key(horizon, period_start),
                period_start,
                period_end: period_end(horizon, period_start),
                as_of: rows.iter().map(|o| o.date).max().unwrap(),
                units_sold: rows.iter().map(|o| o.units_sold).sum(),
                demand_signal: rows.iter().map(|o| o.demand_signal).sum::<f64>() / n,
                price: rows.iter().map(|o| o.price).sum::<f64>() / n,
                discount: rows.iter().map(|o| o.discount).sum::<f64>() / n,
                inventory_level: rows.iter().map(|o| o.inventory_level).sum::<f64>() / n,
                promotion: rows.iter().any(|o| o.promotion),
                weather: mode(rows.iter().map(|o| o.weather.as_str())),
                seasonality: mode(rows.iter().map(|o| o.seasonality.as_str())),
            }
        })
        .collect()
}

fn period_key(horizon: Horizon, period_start: NaiveDate) -> String {
    match horizon {
        Horizon::Daily => period_start.format("%Y-%m-%d").to_string(),
        Horizon::Weekly => {
            let iso = period_start.iso_week();
            format!("{}-W{:02}", iso.year(), iso.week())
        }
        Horizon::Monthly => period_start.format("%Y-%m").to_string(),
    }
}

fn period_end(horizon: Horizon, period_start: NaiveDate) -> NaiveDate {
    match horizon {
        Horizon::Daily => period_start,
        Horizon::Weekly => period_start + Duration::days(6),
        Horizon::Monthly => horizon.next_period(period_start) - Duration::days(1),
    }
}

/// Most frequent value; ties resolve to the first-encountered value.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        // Strictly greater keeps the first-encountered value on ties.
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}
