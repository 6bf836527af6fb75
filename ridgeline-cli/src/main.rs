mod charts;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use ridgeline_chart::{RidgelineColumns, RidgelineConfig, TitleLocation};

use crate::charts::{ChartSet, Decorations, NoteSpec, PageSpec, DEFAULT_DPI};
use crate::source::{aggregate, lowercase_columns, read_csv, InputSource, DEFAULT_DELIMITER};

/// Ridgeline plots of time series per group
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart from a CSV file or URL
    Render(RenderArgs),

    /// Render every chart listed in a JSON chart-set file
    Batch {
        /// Path to the chart-set file
        file_path: PathBuf,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// CSV path or http(s) URL
    #[arg(short, long)]
    input: String,

    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    #[arg(long, default_value = "date_of_publication")]
    time_column: String,

    #[arg(long, default_value = "province")]
    group_column: String,

    /// Column summed per (time, group) and drawn
    #[arg(long)]
    value_column: String,

    /// JSON file with a base ridgeline config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// `overall` or `group`
    #[arg(long)]
    norm: Option<String>,

    #[arg(long)]
    frac: Option<f64>,

    #[arg(long)]
    scale: Option<f64>,

    #[arg(long)]
    colormap: Option<String>,

    /// Colormap sub-range as `lo,hi`
    #[arg(long, value_parser = parse_range)]
    color_range: Option<(f32, f32)>,

    #[arg(long)]
    alpha: Option<f32>,

    /// Group labels in rank order, comma separated
    #[arg(long, value_delimiter = ',')]
    sort_groups: Option<Vec<String>>,

    #[arg(long, allow_hyphen_values = true)]
    label_offset: Option<f32>,

    /// strftime pattern for date tick labels
    #[arg(long)]
    time_format: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long, default_value_t = TitleLocation::Center)]
    title_location: TitleLocation,

    /// Figure text as `x,y,text` in figure fractions; may be repeated
    #[arg(long)]
    note: Vec<NoteSpec>,

    /// Figure width in inches
    #[arg(long, default_value_t = 12.0)]
    width: f32,

    /// Figure height in inches
    #[arg(long, default_value_t = 8.0)]
    height: f32,

    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: f32,

    /// Output path, `.png` or `.svg`
    #[arg(short, long, default_value = "ridgeline.png")]
    output: PathBuf,
}

fn parse_range(s: &str) -> Result<(f32, f32), String> {
    let (lo, hi) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lo,hi`, received `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<f32>().map_err(|e| format!("`{v}`: {e}"));
    Ok((parse(lo)?, parse(hi)?))
}

impl RenderArgs {
    fn config(&self) -> Result<RidgelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => RidgelineConfig::default(),
        };
        if let Some(norm) = &self.norm {
            config = config.with_norm_name(norm)?;
        }
        if let Some(frac) = self.frac {
            config = config.with_frac(frac);
        }
        if let Some(scale) = self.scale {
            config = config.with_scale(scale);
        }
        if let Some(colormap) = &self.colormap {
            config = config.with_colormap_name(colormap)?;
        }
        if let Some((lo, hi)) = self.color_range {
            config = config.with_color_range(lo, hi);
        }
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(groups) = &self.sort_groups {
            config = config.with_sort_groups(groups.iter().cloned());
        }
        if let Some(offset) = self.label_offset {
            config = config.with_label_offset(offset);
        }
        if let Some(pattern) = &self.time_format {
            config = config.with_time_format(pattern.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let config = args.config()?;
    let columns = lowercase_columns(&RidgelineColumns::new(
        &args.time_column,
        &args.group_column,
        &args.value_column,
    ));
    let source: InputSource = args.input.parse()?;
    let table = read_csv(&source.fetch()?, args.delimiter)?;
    let dataset = aggregate(&table, &columns)?;

    let page = PageSpec {
        width: args.width,
        height: args.height,
        dpi: args.dpi,
    };
    let decorations = Decorations {
        title: args.title,
        title_location: args.title_location,
        notes: args.note,
    };
    let figure = charts::draw(&dataset, &columns, config, &page, &decorations)?;
    charts::write(&figure, &args.output, page.dpi)
}

fn batch(file_path: PathBuf) -> Result<()> {
    let set = ChartSet::from_path(&file_path)?;
    // Validate every chart's config before downloading anything
    let configs = set
        .charts
        .iter()
        .map(|chart| set.config(chart))
        .collect::<Result<Vec<_>>>()?;

    let source: InputSource = set.input.parse()?;
    let table = read_csv(&source.fetch()?, set.delimiter)?;
    info!("loaded {} rows from {source}", table.num_rows());

    for (chart, config) in set.charts.iter().zip(configs) {
        let columns = set.columns(chart);
        let dataset = aggregate(&table, &columns)?;
        let figure = charts::draw(&dataset, &columns, config, &set.page, &set.decorations(chart))
            .with_context(|| format!("failed to draw {}", chart.output.display()))?;
        charts::write(&figure, &chart.output, set.page.dpi)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render(args),
        Commands::Batch { file_path } => batch(file_path),
    };
    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }
}
