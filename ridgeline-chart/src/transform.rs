use indexmap::IndexMap;
use itertools::Itertools;
use ridgeline_common::types::Rgba;
use lowess::prelude::{
    Batch, Bisquare, Lowess, NoBoundary, ReturnOriginal, Tricube, MAR,
};
use tracing::debug;

use crate::config::{Normalization, RidgelineConfig};
use crate::dataset::{read_columns, RidgelineColumns, SeriesColumns, TimeKind};
use crate::error::RidgelineChartError;
use arrow::record_batch::RecordBatch;

/// Groups with fewer finite points than this are not smoothed
pub const MIN_SMOOTHING_POINTS: usize = 2;

/// One input row with its derived plot coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RidgelineRow {
    pub time: f64,
    pub group: String,
    pub value: f64,
    pub normalized: f64,
    /// LOWESS estimate of `normalized`, clamped at zero
    pub smoothed: f64,
    /// Lane baseline, `(rank + 1) / scale`
    pub offset: f64,
    /// `smoothed + offset`, the drawn upper edge
    pub top: f64,
    /// `normalized + offset`
    pub raw_top: f64,
}

/// Derived rows plus the per-group lookups needed for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct RidgelineFrame {
    /// Rows sorted by (group, time)
    pub rows: Vec<RidgelineRow>,
    /// Group label to rank, in rank order
    pub ranks: IndexMap<String, usize>,
    /// One color per group, in rank order
    pub colors: Vec<Rgba>,
    /// Group labels in paint order (highest rank first)
    pub draw_order: Vec<String>,
    pub time_kind: TimeKind,
    /// Minimum and maximum time over the whole dataset
    pub time_domain: (f64, f64),
}

impl RidgelineFrame {
    pub fn group_rows<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a RidgelineRow> + 'a {
        self.rows.iter().filter(move |r| r.group == group)
    }

    pub fn rank(&self, group: &str) -> Option<usize> {
        self.ranks.get(group).copied()
    }

    pub fn color(&self, group: &str) -> Option<Rgba> {
        self.rank(group).and_then(|r| self.colors.get(r).copied())
    }

    pub fn num_groups(&self) -> usize {
        self.ranks.len()
    }
}

fn finite_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::max)
}

/// Divide every value by the reference maximum selected by `norm`
fn normalize(data: &SeriesColumns, norm: Normalization) -> Result<Vec<f64>, RidgelineChartError> {
    let check = |max: Option<f64>, label: &str| match max {
        Some(m) if m > 0.0 => Ok(m),
        _ => Err(RidgelineChartError::ZeroReference(label.to_string())),
    };
    match norm {
        Normalization::Overall => {
            let max = check(finite_max(data.value.iter().copied()), "overall")?;
            Ok(data.value.iter().map(|v| v / max).collect())
        }
        Normalization::Group => {
            let mut maxima: IndexMap<&str, Option<f64>> = IndexMap::new();
            for (g, v) in data.group.iter().zip(&data.value) {
                let entry = maxima.entry(g.as_str()).or_insert(None);
                if v.is_finite() {
                    *entry = Some(entry.map_or(*v, |m| m.max(*v)));
                }
            }
            let mut references = IndexMap::new();
            for (g, max) in maxima {
                references.insert(g, check(max, &format!("group `{g}`"))?);
            }
            Ok(data
                .group
                .iter()
                .zip(&data.value)
                .map(|(g, v)| v / references[g.as_str()])
                .collect())
        }
    }
}

/// LOWESS-smooth one group's time-sorted series, clamping at zero.
///
/// Rows with a missing value stay NaN and are left out of the fit.
fn smooth_group(
    time: &[f64],
    normalized: &[f64],
    config: &RidgelineConfig,
) -> Result<Vec<f64>, RidgelineChartError> {
    let finite: Vec<usize> = (0..time.len()).filter(|i| normalized[*i].is_finite()).collect();
    let mut smoothed = vec![f64::NAN; time.len()];
    if finite.len() < MIN_SMOOTHING_POINTS {
        for i in finite {
            smoothed[i] = normalized[i].max(0.0);
        }
        return Ok(smoothed);
    }
    let x: Vec<f64> = finite.iter().map(|i| time[*i]).collect();
    let y: Vec<f64> = finite.iter().map(|i| normalized[*i]).collect();
    let fitted = Lowess::new()
        .fraction(config.frac)
        .iterations(config.robustness_iterations)
        .delta(0.0)
        .weight_function(Tricube)
        .robustness_method(Bisquare)
        .scaling_method(MAR)
        .boundary_policy(NoBoundary)
        .zero_weight_fallback(ReturnOriginal)
        .adapter(Batch)
        .build()?
        .fit(&x, &y)?;
    for (i, f) in finite.into_iter().zip(fitted.y) {
        smoothed[i] = f.max(0.0);
    }
    Ok(smoothed)
}

/// Map each group label to its rank
fn rank_groups(
    sorted_groups: &[&str],
    sort_groups: Option<&[String]>,
) -> Result<IndexMap<String, usize>, RidgelineChartError> {
    let present: Vec<&str> = sorted_groups.iter().copied().dedup().collect();
    let ordered: Vec<&str> = match sort_groups {
        None => present,
        Some(order) => {
            let listed: Vec<&str> = order
                .iter()
                .map(String::as_str)
                .filter(|g| present.contains(g))
                .collect();
            if let Some(missing) = present.iter().find(|g| !listed.contains(*g)) {
                return Err(RidgelineChartError::DataShape(format!(
                    "group `{missing}` is not listed in sort_groups"
                )));
            }
            listed
        }
    };
    Ok(ordered
        .into_iter()
        .enumerate()
        .map(|(rank, g)| (g.to_string(), rank))
        .collect())
}

/// Normalize, sort, smooth, offset and color the rows of `dataset`.
///
/// Pure: `dataset` is only read and the result is a new frame.
#[tracing::instrument(skip_all, fields(rows = dataset.num_rows()))]
pub fn transform(
    dataset: &RecordBatch,
    columns: &RidgelineColumns,
    config: &RidgelineConfig,
) -> Result<RidgelineFrame, RidgelineChartError> {
    config.validate()?;
    let data = read_columns(dataset, columns)?;
    if data.is_empty() {
        return Err(RidgelineChartError::DataShape(
            "dataset has no rows".to_string(),
        ));
    }
    if !data.value.iter().any(|v| v.is_finite()) {
        return Err(RidgelineChartError::DataShape(format!(
            "value column `{}` has no values",
            columns.value
        )));
    }

    let normalized = normalize(&data, config.norm)?;

    let order: Vec<usize> = (0..data.len())
        .sorted_by(|a, b| {
            data.group[*a]
                .cmp(&data.group[*b])
                .then(data.time[*a].total_cmp(&data.time[*b]))
        })
        .collect();
    let sorted_groups: Vec<&str> = order.iter().map(|i| data.group[*i].as_str()).collect();

    let ranks = rank_groups(&sorted_groups, config.sort_groups.as_deref())?;
    let (lo, hi) = config.color_range;
    let colors = config.colormap.linspace(lo, hi, ranks.len())?;

    let mut rows = Vec::with_capacity(data.len());
    for (group, chunk) in &order.iter().chunk_by(|i| data.group[**i].as_str()) {
        let indices: Vec<usize> = chunk.copied().collect();
        let time: Vec<f64> = indices.iter().map(|i| data.time[*i]).collect();
        let norm: Vec<f64> = indices.iter().map(|i| normalized[*i]).collect();
        let smoothed = smooth_group(&time, &norm, config)?;
        let offset = (ranks[group] + 1) as f64 / config.scale;
        for (k, i) in indices.iter().enumerate() {
            rows.push(RidgelineRow {
                time: time[k],
                group: group.to_string(),
                value: data.value[*i],
                normalized: norm[k],
                smoothed: smoothed[k],
                offset,
                top: smoothed[k] + offset,
                raw_top: norm[k] + offset,
            });
        }
    }

    let draw_order: Vec<String> = ranks.keys().rev().cloned().collect();
    let time_domain = data
        .time
        .iter()
        .copied()
        .minmax()
        .into_option()
        .unwrap_or((0.0, 0.0));
    debug!(
        "{} groups, time domain {:?}, draw order {:?}",
        ranks.len(),
        time_domain,
        draw_order
    );

    Ok(RidgelineFrame {
        rows,
        ranks,
        colors,
        draw_order,
        time_kind: data.time_kind,
        time_domain,
    })
}
