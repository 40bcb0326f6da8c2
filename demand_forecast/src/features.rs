//! Feature construction: lag, rolling, calendar, and carry-forward features
//! aligned to a frozen model schema.
//!
//! One generic builder covers all three horizons; the per-horizon
//! differences (lag counts, window sizes, column suffixes, calendar
//! features) are data on [`Horizon`] plus one monthly-only block. Statistical
//! gaps are not errors: absent lags and empty windows resolve to 0, absent
//! categorical values to `"Missing"`.

use crate::aggregate::PeriodBucket;
use crate::artifact::HorizonArtifact;
use crate::horizon::Horizon;
use chrono::{Datelike, NaiveDate, Utc};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};

/// Columns carried forward from the latest historical bucket into the
/// target period, under a horizon-specific suffix.
pub const CARRY_FORWARD_BASES: [&str; 6] = [
    "Demand Forecast",
    "Price",
    "Discount",
    "Weather Condition",
    "Holiday/Promotion",
    "Seasonality",
];

/// Months treated as high season by the monthly model.
const HIGH_SEASON_MONTHS: [u32; 4] = [11, 12, 1, 7];

/// A single feature value before categorical encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Text(_) => None,
        }
    }

    /// Stringified view used by categorical encoders. Whole numbers render
    /// without a fractional part ("1", not "1.0") so encoded column names
    /// match the training-time ones.
    pub fn as_category(&self) -> String {
        match self {
            FeatureValue::Text(s) => s.clone(),
            FeatureValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

/// Ordered named feature values for one product, before encoding and
/// schema alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Product the row was built for
    pub product_id: String,
    values: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    fn new(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            values: Vec::new(),
        }
    }

    fn push_num(&mut self, name: String, value: f64) {
        self.values.push((name, FeatureValue::Number(value)));
    }

    fn push_text(&mut self, name: String, value: String) {
        self.values.push((name, FeatureValue::Text(value)));
    }

    /// Value of a named column, if present.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Numeric value of a named column, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_number)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }
}

/// A feature row encoded and aligned to a frozen schema: exactly one value
/// per schema column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

/// An aligned vector tagged with the product it belongs to.
#[derive(Debug, Clone)]
pub struct ProductVector {
    pub product_id: String,
    pub vector: FeatureVector,
}

/// Builds model-ready feature vectors from aggregated history.
#[derive(Debug)]
pub struct FeatureBuilder<'a> {
    horizon: Horizon,
    artifact: &'a HorizonArtifact,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(horizon: Horizon, artifact: &'a HorizonArtifact) -> Self {
        Self { horizon, artifact }
    }

    /// Resolve the target period anchor: a supplied date snaps to the
    /// horizon's anchor; otherwise one period after the latest bucket;
    /// otherwise the current period.
    pub fn target_period(
        &self,
        buckets: &[PeriodBucket],
        requested: Option<NaiveDate>,
    ) -> NaiveDate {
        match requested {
            Some(date) => self.horizon.anchor(date),
            None => buckets
                .iter()
                .map(|b| b.period_start)
                .max()
                .map(|latest| self.horizon.next_period(latest))
                .unwrap_or_else(|| self.horizon.anchor(Utc::now().date_naive())),
        }
    }

    /// Named feature rows, one per distinct product in `buckets`, ordered
    /// by product id.
    pub fn build_rows(
        &self,
        buckets: &[PeriodBucket],
        requested_target: Option<NaiveDate>,
    ) -> Vec<FeatureRow> {
        let target = self.target_period(buckets, requested_target);

        let mut by_product: BTreeMap<&str, Vec<&PeriodBucket>> = BTreeMap::new();
        for bucket in buckets {
            by_product
                .entry(bucket.product_id.as_str())
                .or_default()
                .push(bucket);
        }

        by_product
            .into_iter()
            .map(|(product_id, mut history)| {
                history.sort_by_key(|b| b.period_start);
                self.product_row(product_id, &history, target)
            })
            .collect()
    }

    /// Encoded, schema-aligned vectors, one per distinct product in
    /// `buckets`, ordered by product id.
    pub fn build(
        &self,
        buckets: &[PeriodBucket],
        requested_target: Option<NaiveDate>,
    ) -> Vec<ProductVector> {
        self.build_rows(buckets, requested_target)
            .into_iter()
            .map(|row| ProductVector {
                vector: self.align(&row),
                product_id: row.product_id,
            })
            .collect()
    }

    fn product_row(
        &self,
        product_id: &str,
        history: &[&PeriodBucket],
        target: NaiveDate,
    ) -> FeatureRow {
        let mut row = FeatureRow::new(product_id);
        let latest = history.last().copied();

        for col in &self.artifact.schema.static_categorical {
            let value = match (col.as_str(), latest) {
                ("Category", Some(bucket)) => bucket
                    .category
                    .clone()
                    .unwrap_or_else(|| "Missing".to_string()),
                _ => "Missing".to_string(),
            };
            row.push_text(col.clone(), value);
        }

        for i in 1..=self.horizon.lag_count() {
            let lag_start = self.horizon.periods_back(target, i);
            row.push_num(self.lag_column(i), units_at(history, lag_start));
        }

        match self.horizon {
            Horizon::Daily => {
                let window = self.window_units(history, target, 7);
                row.push_num("UnitsSold_roll_mean_7_lag1".to_string(), window_mean(&window, 7));
                row.push_num("UnitsSold_roll_std_7_lag1".to_string(), sample_std(&window));
                row.push_num(
                    "InventoryLevel_t".to_string(),
                    latest.map_or(0.0, |b| b.inventory_level),
                );

                let dow = f64::from(target.weekday().num_days_from_monday());
                row.push_num("t+1_DayOfWeek".to_string(), dow);
                row.push_num("t+1_Month".to_string(), f64::from(target.month()));
                row.push_num("t+1_Year".to_string(), f64::from(target.year()));
                row.push_num("t+1_DayOfYear".to_string(), f64::from(target.ordinal()));
                row.push_num(
                    "t+1_WeekOfYear".to_string(),
                    f64::from(target.iso_week().week()),
                );
                row.push_num("t+1_IsWeekend".to_string(), if dow >= 5.0 { 1.0 } else { 0.0 });
            }
            Horizon::Weekly => {
                let window = self.window_units(history, target, 4);
                row.push_num("UnitsSold_roll_mean_4_week".to_string(), window_mean(&window, 4));
                row.push_num("UnitsSold_roll_std_4_week".to_string(), sample_std(&window));
                row.push_num(
                    "InventoryLevel_current_week".to_string(),
                    latest.map_or(0.0, |b| b.inventory_level),
                );

                row.push_num("next_week_Month".to_string(), f64::from(target.month()));
                row.push_num("next_week_Year".to_string(), f64::from(target.year()));
                row.push_num(
                    "next_week_WeekOfYear".to_string(),
                    f64::from(target.iso_week().week()),
                );
                row.push_num(
                    "next_week_Quarter".to_string(),
                    f64::from(quarter(target.month())),
                );
            }
            Horizon::Monthly => {
                self.monthly_block(&mut row, history, target, latest);
            }
        }

        if let Some(bucket) = latest {
            let suffix = self.carry_suffix();
            row.push_num(format!("Demand Forecast{}", suffix), bucket.demand_signal);
            row.push_num(format!("Price{}", suffix), bucket.price);
            row.push_num(format!("Discount{}", suffix), bucket.discount);
            row.push_text(format!("Weather Condition{}", suffix), bucket.weather.clone());
            row.push_num(
                format!("Holiday/Promotion{}", suffix),
                if bucket.promotion { 1.0 } else { 0.0 },
            );
            row.push_text(format!("Seasonality{}", suffix), bucket.seasonality.clone());
        }

        row
    }

    fn monthly_block(
        &self,
        row: &mut FeatureRow,
        history: &[&PeriodBucket],
        target: NaiveDate,
        latest: Option<&PeriodBucket>,
    ) {
        // The same-month lag a year back is the 12-month lag under its
        // seasonal label.
        let last_year = self.horizon.periods_back(target, 12);
        row.push_num(
            "UnitsSold_same_month_last_year".to_string(),
            units_at(history, last_year),
        );

        let window3 = self.window_units(history, target, 3);
        row.push_num("UnitsSold_roll_mean_3_month".to_string(), window_mean(&window3, 3));
        row.push_num("UnitsSold_roll_std_3_month".to_string(), sample_std(&window3));

        let window6 = self.window_units(history, target, 6);
        row.push_num("UnitsSold_roll_mean_6_month".to_string(), window_mean(&window6, 6));
        let roll_max = if window6.is_empty() {
            0.0
        } else {
            Statistics::max(window6.iter())
        };
        row.push_num("UnitsSold_roll_max_6_month".to_string(), roll_max);

        let window12 = self.window_units(history, target, 12);
        row.push_num(
            "UnitsSold_roll_mean_12_month".to_string(),
            window_mean(&window12, 12),
        );

        row.push_num("UnitsSold_mom_change".to_string(), change_back(history, 1));
        row.push_num(
            "UnitsSold_mom_change_lag1".to_string(),
            lagged_change_back(history, 1),
        );
        row.push_num("UnitsSold_qoq_change".to_string(), change_back(history, 3));

        let inventory = latest.map_or(0.0, |b| b.inventory_level);
        row.push_num("Inventory_Level_current".to_string(), inventory);
        let ratio = match latest {
            Some(b) if b.units_sold > 0.0 => b.inventory_level / b.units_sold,
            _ => 0.0,
        };
        row.push_num("Inventory_to_Sales_Ratio".to_string(), ratio);

        row.push_num("next_month_Month".to_string(), f64::from(target.month()));
        row.push_num("next_month_Year".to_string(), f64::from(target.year()));
        row.push_num(
            "next_month_Quarter".to_string(),
            f64::from(quarter(target.month())),
        );
        let high_season = HIGH_SEASON_MONTHS.contains(&target.month());
        row.push_num(
            "next_month_IsHighSeason".to_string(),
            if high_season { 1.0 } else { 0.0 },
        );
    }

    /// Units for the buckets in `[target - window_len periods, target)`,
    /// oldest first. Only observed buckets appear; callers decide how gaps
    /// are treated.
    fn window_units(
        &self,
        history: &[&PeriodBucket],
        target: NaiveDate,
        window_len: u32,
    ) -> Vec<f64> {
        let window_start = self.horizon.periods_back(target, window_len);
        history
            .iter()
            .filter(|b| b.period_start >= window_start && b.period_start < target)
            .map(|b| b.units_sold)
            .collect()
    }

    fn lag_column(&self, i: u32) -> String {
        match self.horizon {
            Horizon::Daily => format!("UnitsSold_lag_{}", i),
            Horizon::Weekly => format!("UnitsSold_lag_{}_week", i),
            Horizon::Monthly => format!("UnitsSold_lag_{}_month", i),
        }
    }

    fn carry_suffix(&self) -> &'static str {
        match self.horizon {
            Horizon::Daily => "_t+1",
            Horizon::Weekly => "_next_week",
            Horizon::Monthly => "_next_month",
        }
    }

    /// Encode categoricals and project onto the frozen schema: schema
    /// columns absent from the row become 0, nothing else leaks through.
    fn align(&self, row: &FeatureRow) -> FeatureVector {
        let encoder_columns: &[String] = self
            .artifact
            .encoder
            .as_ref()
            .map(|e| e.columns())
            .unwrap_or(&[]);

        let mut named: HashMap<String, f64> = HashMap::new();
        for (name, value) in &row.values {
            if encoder_columns.contains(name) {
                continue;
            }
            // Text columns outside the encoder cannot enter the numeric
            // vector; alignment zero-fills whatever the schema expected.
            if let FeatureValue::Number(n) = value {
                named.insert(name.clone(), *n);
            }
        }

        if let Some(encoder) = &self.artifact.encoder {
            for (name, value) in encoder.encode(|col| row.get(col).map(|v| v.as_category())) {
                named.insert(name, value);
            }
        }

        FeatureVector {
            values: self
                .artifact
                .schema
                .columns
                .iter()
                .map(|col| named.get(col).copied().unwrap_or(0.0))
                .collect(),
        }
    }
}

fn units_at(history: &[&PeriodBucket], period_start: NaiveDate) -> f64 {
    history
        .iter()
        .find(|b| b.period_start == period_start)
        .map_or(0.0, |b| b.units_sold)
}

/// Window mean over the full window length: absent periods count as zero.
fn window_mean(observed: &[f64], window_len: u32) -> f64 {
    if window_len == 0 {
        return 0.0;
    }
    observed.iter().sum::<f64>() / f64::from(window_len)
}

/// Sample standard deviation of the observed points; fewer than two points
/// yield 0.
fn sample_std(observed: &[f64]) -> f64 {
    if observed.len() < 2 {
        return 0.0;
    }
    Statistics::std_dev(observed.iter())
}

/// Relative change between the latest bucket and the one `offset` buckets
/// before it: `(latest - earlier) / earlier`, 0 when the earlier value is
/// not positive or history is too short.
fn change_back(history: &[&PeriodBucket], offset: usize) -> f64 {
    if history.len() < offset + 1 {
        return 0.0;
    }
    let latest = history[history.len() - 1].units_sold;
    let earlier = history[history.len() - 1 - offset].units_sold;
    if earlier > 0.0 {
        (latest - earlier) / earlier
    } else {
        0.0
    }
}

/// The month-over-month change as it stood one bucket earlier.
fn lagged_change_back(history: &[&PeriodBucket], offset: usize) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    change_back(&history[..history.len() - 1], offset)
}

fn quarter(month: u32) -> u32 {
    (month - 1) / 3 + 1
}
