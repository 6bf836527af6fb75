use super::numeric::make_numeric_axis_marks;
use super::opts::AxisConfig;
use super::{layout_axis, AxisTicks};
use crate::error::RidgelineGuidesError;
use ridgeline_scales::numeric::linear::LinearNumericScale;
use ridgeline_scales::numeric::ContinuousNumericScale;
use ridgeline_scales::temporal::date::{format_dates, DateScale};
use ridgeline_scales::temporal::days_from_date;
use ridgeline_scenegraph::marks::group::SceneGroup;

/// Scale of the time axis: calendar dates or plain numbers
#[derive(Debug, Clone)]
pub enum TimeAxisScale {
    Temporal(DateScale),
    Numeric(LinearNumericScale),
}

impl TimeAxisScale {
    /// Map a time coordinate (days for temporal scales) to the range
    pub fn scale(&self, value: f64) -> f32 {
        match self {
            TimeAxisScale::Temporal(scale) => scale.scale(value),
            TimeAxisScale::Numeric(scale) => scale.scale_scalar(value),
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            TimeAxisScale::Temporal(scale) => scale.get_range(),
            TimeAxisScale::Numeric(scale) => scale.range(),
        }
    }
}

/// Build the time axis as a group of rule and text marks.
///
/// Temporal labels use `config.format` when set, otherwise a pattern that
/// matches the tick spacing.
#[tracing::instrument(skip_all)]
pub fn make_time_axis_marks(
    scale: &TimeAxisScale,
    config: &AxisConfig,
) -> Result<SceneGroup, RidgelineGuidesError> {
    match scale {
        TimeAxisScale::Numeric(scale) => {
            let mut group = make_numeric_axis_marks(scale, config);
            group.name = "x_axis".to_string();
            Ok(group)
        }
        TimeAxisScale::Temporal(scale) => {
            let (dates, default_format) = scale.ticks(config.tick_count)?;
            let pattern = config.format.as_deref().unwrap_or(default_format);
            let labels = format_dates(&dates, pattern)?;
            let positions = dates
                .iter()
                .map(|d| scale.scale(days_from_date(d)))
                .collect();
            tracing::debug!("{} temporal ticks with pattern {pattern:?}", dates.len());
            Ok(layout_axis(
                "x_axis",
                AxisTicks { positions, labels },
                scale.get_range(),
                config,
            ))
        }
    }
}
