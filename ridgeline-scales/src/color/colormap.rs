use crate::color::interpolator::{ColorInterpolator, ColorStop, SrgbaColorInterpolator};
use crate::error::RidgelineScaleError;
use ridgeline_common::types::{parse_hex, Rgba};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, VariantNames};

/// Named sequential colormaps
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
pub enum Colormap {
    Afmhot,
    #[default]
    Autumn,
    Hot,
    Cool,
    Spring,
    Summer,
    Winter,
    Greys,
    Viridis,
    Magma,
    Inferno,
    Plasma,
}

// The perceptually uniform maps below are 9-10 evenly spaced samples of the
// 256-entry matplotlib tables, so colors between stops are close
// approximations rather than exact table lookups.
const VIRIDIS: [&str; 9] = [
    "#440154", "#472c7a", "#3b518b", "#2c718e", "#21908d", "#27ad81", "#5cc863", "#aadc32",
    "#fde725",
];
const MAGMA: [&str; 9] = [
    "#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55964", "#fb8761", "#fec287",
    "#fcfdbf",
];
const INFERNO: [&str; 9] = [
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
    "#fcffa4",
];
const PLASMA: [&str; 10] = [
    "#0d0887", "#47039f", "#7301a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

/// ColorBrewer 9-class Greys, the table matplotlib's `Greys` interpolates
const GREYS: [&str; 9] = [
    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];

fn evenly_spaced(hex: &[&str]) -> Vec<ColorStop> {
    let last = hex.len().saturating_sub(1).max(1) as f32;
    hex.iter()
        .enumerate()
        .filter_map(|(i, h)| parse_hex(h).map(|c| (i as f32 / last, c)))
        .collect()
}

impl Colormap {
    /// Look up a colormap by name, case-insensitively
    pub fn from_name(name: &str) -> Result<Self, RidgelineScaleError> {
        Self::from_str(&name.trim().to_lowercase())
            .map_err(|_| RidgelineScaleError::UnknownColormap(name.to_string()))
    }

    pub fn stops(&self) -> Vec<ColorStop> {
        match self {
            Colormap::Afmhot => vec![
                (0.0, [0.0, 0.0, 0.0, 1.0]),
                (0.25, [0.5, 0.0, 0.0, 1.0]),
                (0.5, [1.0, 0.5, 0.0, 1.0]),
                (0.75, [1.0, 1.0, 0.5, 1.0]),
                (1.0, [1.0, 1.0, 1.0, 1.0]),
            ],
            Colormap::Autumn => vec![(0.0, [1.0, 0.0, 0.0, 1.0]), (1.0, [1.0, 1.0, 0.0, 1.0])],
            Colormap::Hot => vec![
                (0.0, [0.0416, 0.0, 0.0, 1.0]),
                (0.365079, [1.0, 0.0, 0.0, 1.0]),
                (0.746032, [1.0, 1.0, 0.0, 1.0]),
                (1.0, [1.0, 1.0, 1.0, 1.0]),
            ],
            Colormap::Cool => vec![(0.0, [0.0, 1.0, 1.0, 1.0]), (1.0, [1.0, 0.0, 1.0, 1.0])],
            Colormap::Spring => vec![(0.0, [1.0, 0.0, 1.0, 1.0]), (1.0, [1.0, 1.0, 0.0, 1.0])],
            Colormap::Summer => vec![(0.0, [0.0, 0.5, 0.4, 1.0]), (1.0, [1.0, 1.0, 0.4, 1.0])],
            Colormap::Winter => vec![(0.0, [0.0, 0.0, 1.0, 1.0]), (1.0, [0.0, 1.0, 0.5, 1.0])],
            Colormap::Greys => evenly_spaced(&GREYS),
            Colormap::Viridis => evenly_spaced(&VIRIDIS),
            Colormap::Magma => evenly_spaced(&MAGMA),
            Colormap::Inferno => evenly_spaced(&INFERNO),
            Colormap::Plasma => evenly_spaced(&PLASMA),
        }
    }

    /// Color at position `t` in [0, 1]; values outside are clamped
    pub fn sample(&self, t: f32) -> Rgba {
        self.sample_many(&[t])
            .pop()
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    pub fn sample_many(&self, values: &[f32]) -> Vec<Rgba> {
        SrgbaColorInterpolator.interpolate(&self.stops(), values)
    }

    /// `n` colors sampled at evenly spaced positions from `lo` to `hi` inclusive.
    ///
    /// A single color is sampled at `lo`.
    pub fn linspace(&self, lo: f32, hi: f32, n: usize) -> Result<Vec<Rgba>, RidgelineScaleError> {
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo < hi && hi <= 1.0) {
            return Err(RidgelineScaleError::InvalidColorRange { lo, hi });
        }
        let positions: Vec<f32> = match n {
            0 => return Ok(Vec::new()),
            1 => vec![lo],
            _ => {
                let step = (hi - lo) / (n - 1) as f32;
                (0..n).map(|i| lo + step * i as f32).collect()
            }
        };
        Ok(self.sample_many(&positions))
    }
}
