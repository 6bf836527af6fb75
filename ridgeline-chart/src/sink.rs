use std::path::Path;

use ridgeline_common::canvas::CanvasDimensions;
use ridgeline_image::{scene_to_svg, svg_to_png};

use crate::error::RidgelineChartError;
use crate::figure::Figure;

/// Resolution used when a PNG is saved without an explicit dpi
pub const DEFAULT_DPI: f32 = 100.0;

/// Persists a figure to a file
pub trait FigureSink {
    fn save(&self, figure: &Figure, path: &Path) -> Result<(), RidgelineChartError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgSink;

impl SvgSink {
    pub fn render(&self, figure: &Figure) -> Result<String, RidgelineChartError> {
        Ok(scene_to_svg(&figure.to_scene_graph()?)?)
    }
}

impl FigureSink for SvgSink {
    fn save(&self, figure: &Figure, path: &Path) -> Result<(), RidgelineChartError> {
        std::fs::write(path, self.render(figure)?)?;
        Ok(())
    }
}

/// Raster output at `dpi` pixels per inch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PngSink {
    pub dpi: f32,
}

impl Default for PngSink {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}

impl PngSink {
    pub fn new(dpi: f32) -> Self {
        Self { dpi }
    }

    pub fn dimensions(&self, figure: &Figure) -> CanvasDimensions {
        CanvasDimensions::from_dpi([figure.width(), figure.height()], self.dpi)
    }

    pub fn render(&self, figure: &Figure) -> Result<Vec<u8>, RidgelineChartError> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(RidgelineChartError::InvalidConfig(format!(
                "dpi must be positive, received {}",
                self.dpi
            )));
        }
        let svg = SvgSink.render(figure)?;
        Ok(svg_to_png(&svg, self.dimensions(figure).scale)?)
    }
}

impl FigureSink for PngSink {
    fn save(&self, figure: &Figure, path: &Path) -> Result<(), RidgelineChartError> {
        std::fs::write(path, self.render(figure)?)?;
        Ok(())
    }
}

/// Save with the sink matching the file extension (`png` or `svg`)
#[tracing::instrument(skip(figure))]
pub fn save_figure(figure: &Figure, path: &Path, dpi: Option<f32>) -> Result<(), RidgelineChartError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => PngSink::new(dpi.unwrap_or(DEFAULT_DPI)).save(figure, path),
        "svg" => SvgSink.save(figure, path),
        _ => Err(RidgelineChartError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}
