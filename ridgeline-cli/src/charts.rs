//! Figure assembly shared by the `render` and `batch` commands, and the
//! JSON chart-set format.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use log::info;
use ridgeline_chart::{
    save_figure, Figure, RidgelineColumns, RidgelineConfig, RidgelineRenderer, TitleLocation,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::source::{lowercase_columns, DEFAULT_DELIMITER};

pub const DEFAULT_DPI: f32 = 200.0;

/// Text placed at figure fractions, written `x,y,text` on the command line
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoteSpec {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl FromStr for NoteSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        let (Some(x), Some(y), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected `x,y,text`, received `{s}`"));
        };
        let coord = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid note coordinate `{v}`: {e}"))
        };
        Ok(Self {
            x: coord(x)?,
            y: coord(y)?,
            text: text.to_string(),
        })
    }
}

/// Page size in inches and output resolution
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub dpi: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 8.0,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Everything drawn around the ridgelines themselves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    pub title: Option<String>,
    pub title_location: TitleLocation,
    pub notes: Vec<NoteSpec>,
}

/// Render the aggregated dataset into a new figure
pub fn draw(
    dataset: &RecordBatch,
    columns: &RidgelineColumns,
    config: RidgelineConfig,
    page: &PageSpec,
    decorations: &Decorations,
) -> Result<Figure> {
    let mut figure = Figure::from_inches(page.width, page.height);
    RidgelineRenderer::new(config).render(dataset, columns, &mut figure)?;
    if let Some(title) = &decorations.title {
        figure.set_title(title.clone(), decorations.title_location);
    }
    for note in &decorations.notes {
        figure.add_note(note.x, note.y, note.text.clone());
    }
    Ok(figure)
}

pub fn write(figure: &Figure, output: &Path, dpi: f32) -> Result<()> {
    save_figure(figure, output, Some(dpi))
        .with_context(|| format!("failed to save {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

/// One chart of a [`ChartSet`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSpec {
    pub value_column: String,
    pub output: PathBuf,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_location: TitleLocation,
    /// Overrides applied on top of the set's shared config
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub notes: Vec<NoteSpec>,
}

/// Several charts drawn from one CSV input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSet {
    pub input: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub time_column: String,
    pub group_column: String,
    #[serde(default)]
    pub page: PageSpec,
    /// Config fields shared by every chart
    #[serde(default)]
    pub config: Map<String, Value>,
    /// Notes added to every chart
    #[serde(default)]
    pub notes: Vec<NoteSpec>,
    pub charts: Vec<ChartSpec>,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl ChartSet {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid chart set {}", path.display()))
    }

    /// Column names as they appear in the lowercased table
    pub fn columns(&self, chart: &ChartSpec) -> RidgelineColumns {
        lowercase_columns(&RidgelineColumns::new(
            &self.time_column,
            &self.group_column,
            &chart.value_column,
        ))
    }

    /// Shared config with the chart's overrides merged in
    pub fn config(&self, chart: &ChartSpec) -> Result<RidgelineConfig> {
        let mut merged = self.config.clone();
        merged.extend(chart.config.clone());
        let config: RidgelineConfig = serde_json::from_value(Value::Object(merged))
            .with_context(|| format!("invalid config for {}", chart.output.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn decorations(&self, chart: &ChartSpec) -> Decorations {
        Decorations {
            title: chart.title.clone(),
            title_location: chart.title_location,
            notes: self.notes.iter().chain(&chart.notes).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use ridgeline_chart::Normalization;
    use ridgeline_scales::color::Colormap;

    const RIVM: &str = include_str!("../../demos/rivm_charts.json");

    #[test]
    fn test_note_from_str() {
        let note: NoteSpec = "0.043, 0.05,Data: RIVM, 2021".parse().unwrap();
        assert_approx_eq!(f32, note.x, 0.043);
        assert_approx_eq!(f32, note.y, 0.05);
        assert_eq!(note.text, "Data: RIVM, 2021");
        assert!("0.1,Data".parse::<NoteSpec>().is_err());
        assert!("left,0.1,Data".parse::<NoteSpec>().is_err());
    }

    #[test]
    fn test_rivm_chart_set() {
        let set: ChartSet = serde_json::from_str(RIVM).unwrap();
        assert_eq!(set.delimiter, ';');
        assert_approx_eq!(f32, set.page.dpi, 200.0);
        assert_eq!(set.charts.len(), 3);

        let scales: Vec<f64> = set
            .charts
            .iter()
            .map(|c| set.config(c).unwrap().scale)
            .collect();
        assert_eq!(scales, vec![3.0, 4.0, 6.5]);

        let config = set.config(&set.charts[1]).unwrap();
        assert_eq!(config.norm, Normalization::Overall);
        assert_eq!(config.colormap, Colormap::Afmhot);
        assert_eq!(config.color_range, (0.0, 0.6));
        assert_approx_eq!(f64, config.frac, 0.08);
        assert_approx_eq!(f32, config.alpha, 0.55);
        assert_eq!(config.time_format.as_deref(), Some("%b %Y"));

        let columns = set.columns(&set.charts[2]);
        assert_eq!(columns.value, "hospital_admission");
        let decorations = set.decorations(&set.charts[0]);
        assert_eq!(decorations.notes[0].text, "Data: RIVM");
        assert_eq!(decorations.title_location, TitleLocation::Center);
    }

    #[test]
    fn test_chart_override_rejected() {
        let set: ChartSet = serde_json::from_value(serde_json::json!({
            "input": "covid.csv",
            "time_column": "date",
            "group_column": "province",
            "config": {"scale": 3.0},
            "charts": [
                {"value_column": "a", "output": "a.png", "config": {"scale": -1.0}},
                {"value_column": "b", "output": "b.png", "config": {"shade": 1}}
            ]
        }))
        .unwrap();
        assert_eq!(set.delimiter, ';');
        assert!(set.config(&set.charts[0]).is_err());
        assert!(set.config(&set.charts[1]).is_err());
    }
}
