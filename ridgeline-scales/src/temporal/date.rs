use chrono::{Datelike, NaiveDate, Weekday};

use super::{datetime_from_days, days_from_date, validate_date_format};
use crate::error::RidgelineScaleError;

/// Calendar interval used to place date ticks
pub trait DateInterval: Send + Sync + std::fmt::Debug {
    fn floor(&self, date: &NaiveDate) -> NaiveDate;
    fn offset(&self, date: NaiveDate, step: i64) -> Option<NaiveDate>;

    /// Default label pattern for ticks placed on this interval
    fn default_format(&self) -> &'static str;

    /// Whether `date` falls on a multiple of `step` intervals, so that ticks
    /// land on the same calendar positions regardless of the domain start
    fn aligned(&self, date: &NaiveDate, step: i64) -> bool;

    fn ceil(&self, date: &NaiveDate) -> Option<NaiveDate> {
        let floored = self.floor(date);
        if &floored == date {
            Some(*date)
        } else {
            self.offset(floored, 1)
        }
    }
}

pub mod interval {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct DayInterval;
    #[derive(Debug, Clone)]
    pub struct WeekInterval {
        weekday: Weekday,
    }
    #[derive(Debug, Clone)]
    pub struct MonthInterval;
    #[derive(Debug, Clone)]
    pub struct YearInterval;

    impl WeekInterval {
        pub fn new(weekday: Weekday) -> Self {
            Self { weekday }
        }
    }

    impl DateInterval for DayInterval {
        fn floor(&self, date: &NaiveDate) -> NaiveDate {
            *date
        }

        fn offset(&self, date: NaiveDate, step: i64) -> Option<NaiveDate> {
            date.checked_add_signed(chrono::Duration::days(step))
        }

        fn default_format(&self) -> &'static str {
            "%Y-%m-%d"
        }

        fn aligned(&self, date: &NaiveDate, step: i64) -> bool {
            (days_from_date(date) as i64).rem_euclid(step) == 0
        }
    }

    impl DateInterval for WeekInterval {
        fn floor(&self, date: &NaiveDate) -> NaiveDate {
            let days_from_sunday = date.weekday().num_days_from_sunday();
            let target_from_sunday = self.weekday.num_days_from_sunday();
            let days_to_subtract = (days_from_sunday + 7 - target_from_sunday) % 7;
            *date - chrono::Duration::days(days_to_subtract as i64)
        }

        fn offset(&self, date: NaiveDate, step: i64) -> Option<NaiveDate> {
            date.checked_add_signed(chrono::Duration::weeks(step))
        }

        fn default_format(&self) -> &'static str {
            "%Y-%m-%d"
        }

        fn aligned(&self, date: &NaiveDate, step: i64) -> bool {
            ((days_from_date(date) as i64).div_euclid(7)).rem_euclid(step) == 0
        }
    }

    impl DateInterval for MonthInterval {
        fn floor(&self, date: &NaiveDate) -> NaiveDate {
            date.with_day(1).unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDate, step: i64) -> Option<NaiveDate> {
            let total_months = date.year() as i64 * 12 + date.month0() as i64 + step;
            let year = i32::try_from(total_months.div_euclid(12)).ok()?;
            let month = total_months.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
        }

        fn default_format(&self) -> &'static str {
            "%Y-%m"
        }

        fn aligned(&self, date: &NaiveDate, step: i64) -> bool {
            (date.month0() as i64).rem_euclid(step) == 0
        }
    }

    impl DateInterval for YearInterval {
        fn floor(&self, date: &NaiveDate) -> NaiveDate {
            NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDate, step: i64) -> Option<NaiveDate> {
            let year = i32::try_from(date.year() as i64 + step).ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }

        fn default_format(&self) -> &'static str {
            "%Y"
        }

        fn aligned(&self, date: &NaiveDate, step: i64) -> bool {
            (date.year() as i64).rem_euclid(step) == 0
        }
    }

    pub fn day() -> Box<dyn DateInterval> {
        Box::new(DayInterval)
    }

    pub fn week_monday() -> Box<dyn DateInterval> {
        Box::new(WeekInterval::new(Weekday::Mon))
    }

    pub fn month() -> Box<dyn DateInterval> {
        Box::new(MonthInterval)
    }

    pub fn year() -> Box<dyn DateInterval> {
        Box::new(YearInterval)
    }
}

/// Candidate tick spacings as (interval, step, approximate length in days)
fn tick_intervals() -> Vec<(Box<dyn DateInterval>, i64, f64)> {
    vec![
        (interval::day(), 1, 1.0),
        (interval::day(), 2, 2.0),
        (interval::week_monday(), 1, 7.0),
        (interval::week_monday(), 2, 14.0),
        (interval::month(), 1, 30.0),
        (interval::month(), 2, 61.0),
        (interval::month(), 3, 91.0),
        (interval::month(), 6, 182.0),
        (interval::year(), 1, 365.0),
    ]
}

/// A scale that maps days since the Unix epoch to a numeric range, with
/// calendar-aligned ticks
#[derive(Clone, Debug)]
pub struct DateScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f32,
    range_end: f32,
}

impl DateScale {
    /// Creates a new date scale over the given day domain and default range [0, 1]
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: 0.0,
            range_end: 1.0,
        }
    }

    pub fn range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn get_domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn get_range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    /// Maps a day offset from domain to range
    pub fn scale(&self, days: f64) -> f32 {
        if self.domain_start == self.domain_end {
            return self.range_start;
        }
        let t = (days - self.domain_start) / (self.domain_end - self.domain_start);
        (self.range_start as f64 + t * (self.range_end - self.range_start) as f64) as f32
    }

    fn pick_interval(&self, count: usize) -> (Box<dyn DateInterval>, i64) {
        let span_days = (self.domain_end - self.domain_start).abs();
        let target_step = span_days / count.max(1) as f64;
        tick_intervals()
            .into_iter()
            .find(|(_, _, step_days)| *step_days >= target_step)
            .map(|(interval, step, _)| (interval, step))
            .unwrap_or_else(|| (interval::year(), (target_step / 365.0).ceil() as i64))
    }

    /// Calendar-aligned ticks inside the domain, plus the default label
    /// pattern for the chosen spacing
    pub fn ticks(&self, count: Option<usize>) -> Result<(Vec<NaiveDate>, &'static str), RidgelineScaleError> {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let start = datetime_from_days(lo)?.date();
        let (interval, step) = self.pick_interval(count.unwrap_or(7));
        let step = step.max(1);

        let mut ticks = Vec::new();
        let mut tick = Some(interval.floor(&start));
        while let Some(t) = tick {
            let days = days_from_date(&t);
            if days > hi {
                break;
            }
            if days >= lo && interval.aligned(&t, step) {
                ticks.push(t);
            }
            tick = interval.offset(t, 1);
        }
        Ok((ticks, interval.default_format()))
    }
}

/// Format dates with a strftime pattern
pub fn format_dates(dates: &[NaiveDate], pattern: &str) -> Result<Vec<String>, RidgelineScaleError> {
    validate_date_format(pattern)?;
    Ok(dates
        .iter()
        .map(|d| d.format(pattern).to_string())
        .collect())
}
