pub mod date;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::RidgelineScaleError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// 1970-01-01T00:00:00
fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// Fractional days since the Unix epoch for a calendar date
pub fn days_from_date(date: &NaiveDate) -> f64 {
    date.signed_duration_since(epoch().date()).num_days() as f64
}

/// Fractional days since the Unix epoch for a date-time
pub fn days_from_datetime(datetime: &NaiveDateTime) -> f64 {
    let duration = datetime.signed_duration_since(epoch());
    duration.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Inverse of [`days_from_datetime`], truncated to millisecond precision
pub fn datetime_from_days(days: f64) -> Result<NaiveDateTime, RidgelineScaleError> {
    if !days.is_finite() {
        return Err(RidgelineScaleError::DateOutOfRange(days));
    }
    let millis = (days * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(RidgelineScaleError::DateOutOfRange(days));
    }
    epoch()
        .checked_add_signed(chrono::Duration::milliseconds(millis as i64))
        .ok_or(RidgelineScaleError::DateOutOfRange(days))
}

/// Reject strftime patterns chrono cannot format
pub fn validate_date_format(pattern: &str) -> Result<(), RidgelineScaleError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(RidgelineScaleError::InvalidDateFormat(pattern.to_string()));
    }
    Ok(())
}
