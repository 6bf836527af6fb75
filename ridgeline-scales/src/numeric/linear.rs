use ridgeline_common::value::{ScalarOrArray, ScalarOrArrayRef};

use crate::array;

use super::ContinuousNumericScale;

#[derive(Clone, Debug)]
pub struct LinearNumericScaleConfig {
    pub domain: (f64, f64),
    pub range: (f32, f32),
    pub clamp: bool,
}

impl Default for LinearNumericScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }
}

/// A linear scale that maps numeric input values from a domain to a range.
///
/// The domain is kept in `f64` and the mapping is evaluated before narrowing
/// to `f32`, so domains far from zero (epoch seconds) keep their resolution.
#[derive(Clone, Debug)]
pub struct LinearNumericScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f32,
    range_end: f32,
    clamp: bool,
}

impl LinearNumericScale {
    pub fn new(config: &LinearNumericScaleConfig) -> Self {
        Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
        }
    }

    fn is_degenerate_domain(&self) -> bool {
        self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
    }

    fn range_extent(&self) -> (f64, f64) {
        let (a, b) = (self.range_start as f64, self.range_end as f64);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl ContinuousNumericScale<f64> for LinearNumericScale {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    /// Maps input values from domain to range
    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f64>>) -> ScalarOrArray<f32> {
        // Degenerate domains collapse onto the start of the range (d3 behavior)
        if self.is_degenerate_domain() || self.range_start.is_nan() || self.range_end.is_nan() {
            return values.into().map(|_| self.range_start);
        }

        let range_start = self.range_start as f64;
        let ratio = (self.range_end as f64 - range_start) / (self.domain_end - self.domain_start);
        let map = |v: f64| range_start + ratio * (v - self.domain_start);

        if self.clamp {
            let (range_min, range_max) = self.range_extent();
            values
                .into()
                .map(|v| map(*v).clamp(range_min, range_max) as f32)
        } else {
            values.into().map(|v| map(*v) as f32)
        }
    }

    /// Generates evenly spaced tick values within the domain
    fn ticks(&self, count: Option<f32>) -> Vec<f64> {
        array::ticks(
            self.domain_start,
            self.domain_end,
            count.unwrap_or(10.0) as f64,
        )
    }
}
