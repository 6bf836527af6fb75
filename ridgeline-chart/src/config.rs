use std::collections::HashSet;
use std::str::FromStr;

use ridgeline_scales::color::Colormap;
use ridgeline_scales::temporal::validate_date_format;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::RidgelineChartError;

/// Reference maximum that values are divided by
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Normalization {
    /// Dataset-wide maximum; every series is bounded by 1
    #[default]
    Overall,
    /// Per-group maximum; every series peaks at 1
    Group,
}

impl Normalization {
    pub fn from_name(name: &str) -> Result<Self, RidgelineChartError> {
        Self::from_str(name).map_err(|_| {
            RidgelineChartError::InvalidConfig(format!(
                "unknown normalization `{name}`, expected one of {:?}",
                Self::VARIANTS
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RidgelineConfig {
    pub norm: Normalization,
    /// Share of a group's rows used for each local smoothing fit
    pub frac: f64,
    /// Vertical lane compression: lanes are `1 / scale` apart
    pub scale: f64,
    pub colormap: Colormap,
    /// Sub-range of the colormap that group colors are sampled from
    pub color_range: (f32, f32),
    pub alpha: f32,
    /// Explicit rank order of the group labels
    pub sort_groups: Option<Vec<String>>,
    /// Horizontal offset of each group label from its anchor, in points
    pub label_offset: f32,
    /// strftime pattern for temporal tick labels
    pub time_format: Option<String>,
    pub robustness_iterations: usize,
}

impl Default for RidgelineConfig {
    fn default() -> Self {
        Self {
            norm: Normalization::Overall,
            frac: 0.1,
            scale: 3.0,
            colormap: Colormap::Autumn,
            color_range: (0.0, 1.0),
            alpha: 0.5,
            sort_groups: None,
            label_offset: -70.0,
            time_format: None,
            robustness_iterations: 3,
        }
    }
}

impl RidgelineConfig {
    pub fn with_norm(mut self, norm: Normalization) -> Self {
        self.norm = norm;
        self
    }

    /// Set the normalization mode by name (`overall` or `group`)
    pub fn with_norm_name(self, name: &str) -> Result<Self, RidgelineChartError> {
        Ok(self.with_norm(Normalization::from_name(name)?))
    }

    pub fn with_frac(mut self, frac: f64) -> Self {
        self.frac = frac;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Set the colormap by name, e.g. `afmhot`
    pub fn with_colormap_name(self, name: &str) -> Result<Self, RidgelineChartError> {
        let colormap = Colormap::from_name(name)
            .map_err(|err| RidgelineChartError::InvalidConfig(err.to_string()))?;
        Ok(self.with_colormap(colormap))
    }

    pub fn with_color_range(mut self, lo: f32, hi: f32) -> Self {
        self.color_range = (lo, hi);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_sort_groups<S: Into<String>>(mut self, groups: impl IntoIterator<Item = S>) -> Self {
        self.sort_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_label_offset(mut self, offset: f32) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = Some(pattern.into());
        self
    }

    pub fn with_robustness_iterations(mut self, iterations: usize) -> Self {
        self.robustness_iterations = iterations;
        self
    }

    pub fn validate(&self) -> Result<(), RidgelineChartError> {
        let invalid = |msg: String| Err(RidgelineChartError::InvalidConfig(msg));
        if !(self.frac.is_finite() && self.frac > 0.0 && self.frac <= 1.0) {
            return invalid(format!("frac must be in (0, 1], received {}", self.frac));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid(format!("scale must be positive, received {}", self.scale));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha <= 1.0) {
            return invalid(format!("alpha must be in (0, 1], received {}", self.alpha));
        }
        let (lo, hi) = self.color_range;
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo < hi && hi <= 1.0) {
            return invalid(format!(
                "color_range must satisfy 0 <= lo < hi <= 1, received ({lo}, {hi})"
            ));
        }
        if !self.label_offset.is_finite() {
            return invalid(format!(
                "label_offset must be finite, received {}",
                self.label_offset
            ));
        }
        if let Some(pattern) = &self.time_format {
            validate_date_format(pattern)
                .map_err(|err| RidgelineChartError::InvalidConfig(err.to_string()))?;
        }
        if let Some(groups) = &self.sort_groups {
            let mut seen = HashSet::new();
            if let Some(dup) = groups.iter().find(|g| !seen.insert(g.as_str())) {
                return invalid(format!("sort_groups lists `{dup}` more than once"));
            }
        }
        Ok(())
    }
}
