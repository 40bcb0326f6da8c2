//! Prediction horizons and their calendar behavior

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prediction granularity. Each horizon has its own trained model, frozen
/// feature schema, and calendar conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// One-day periods
    Daily,
    /// ISO weeks, anchored on Monday
    Weekly,
    /// Calendar months, anchored on the 1st
    Monthly,
}

impl Horizon {
    /// All horizons, in model order.
    pub const ALL: [Horizon; 3] = [Horizon::Daily, Horizon::Weekly, Horizon::Monthly];

    /// The lowercase label used for artifact keys and serving output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Daily => "daily",
            Horizon::Weekly => "weekly",
            Horizon::Monthly => "monthly",
        }
    }

    /// Equivalent day count of one forecast period, used when summaries
    /// convert period counts to days.
    pub fn period_days(&self) -> i64 {
        match self {
            Horizon::Daily => 1,
            Horizon::Weekly => 7,
            Horizon::Monthly => 30,
        }
    }

    /// Calibration factor applied to the trailing demand signal before it is
    /// stamped onto history rows. These are tuning constants, not unit
    /// conversions.
    pub fn demand_scale(&self) -> f64 {
        match self {
            Horizon::Daily => 1.5,
            Horizon::Weekly => 7.5,
            Horizon::Monthly => 30.0,
        }
    }

    /// Number of lag features the horizon's model was trained with.
    pub fn lag_count(&self) -> u32 {
        match self {
            Horizon::Daily => 7,
            Horizon::Weekly => 4,
            Horizon::Monthly => 12,
        }
    }

    /// Snap a date to the horizon's period anchor: the date itself for
    /// daily, the Monday of its ISO week for weekly, the 1st of its month
    /// for monthly.
    pub fn anchor(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Horizon::Daily => date,
            Horizon::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Horizon::Monthly => date.with_day(1).unwrap(),
        }
    }

    /// The anchor one period after `anchor` (calendar-aware for months).
    pub fn next_period(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Horizon::Daily => anchor + Duration::days(1),
            Horizon::Weekly => anchor + Duration::weeks(1),
            Horizon::Monthly => anchor
                .checked_add_months(Months::new(1))
                .unwrap()
                .with_day(1)
                .unwrap(),
        }
    }

    /// The anchor `periods` periods before `anchor` (calendar-aware for
    /// months). Used for lag and rolling-window lookups.
    pub fn periods_back(&self, anchor: NaiveDate, periods: u32) -> NaiveDate {
        match self {
            Horizon::Daily => anchor - Duration::days(i64::from(periods)),
            Horizon::Weekly => anchor - Duration::weeks(i64::from(periods)),
            Horizon::Monthly => anchor
                .checked_sub_months(Months::new(periods))
                .unwrap()
                .with_day(1)
                .unwrap(),
        }
    }

    /// The i-th resolved forecast date after `base` (1-based). Note the
    /// monthly step is a fixed 30-day stride, not a calendar month.
    pub fn forecast_date(&self, base: NaiveDate, i: u32) -> NaiveDate {
        match self {
            Horizon::Daily => base + Duration::days(i64::from(i)),
            Horizon::Weekly => base + Duration::weeks(i64::from(i)),
            Horizon::Monthly => base + Duration::days(30 * i64::from(i)),
        }
    }
}

impl FromStr for Horizon {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Horizon::Daily),
            "weekly" => Ok(Horizon::Weekly),
            "monthly" => Ok(Horizon::Monthly),
            other => Err(ForecastError::Validation(format!(
                "Unknown time horizon '{}' (expected daily, weekly, or monthly)",
                other
            ))),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
