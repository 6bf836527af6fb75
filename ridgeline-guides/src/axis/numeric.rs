use super::opts::{AxisConfig, AxisOrientation};
use super::{layout_axis, AxisTicks};
use ridgeline_scales::numeric::ContinuousNumericScale;
use ridgeline_scenegraph::marks::group::SceneGroup;

/// Decimal places needed to tell ticks spaced `step` apart
fn precision(step: f64) -> usize {
    if !step.is_finite() || step == 0.0 || step.abs() >= 1.0 {
        return 0;
    }
    (-(step.abs().log10() + 1e-4).floor()).max(0.0) as usize
}

/// Format numeric tick values with a shared precision
pub fn format_numeric_ticks(ticks: &[f64]) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    let digits = precision(step);
    ticks
        .iter()
        .map(|t| {
            let s = format!("{t:.digits$}");
            // Avoid "-0"
            if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
                s.trim_start_matches('-').to_string()
            } else {
                s
            }
        })
        .collect()
}

pub fn make_numeric_axis_marks(
    scale: &impl ContinuousNumericScale<f64>,
    config: &AxisConfig,
) -> SceneGroup {
    let count = config.tick_count.map(|c| c as f32);
    let values = scale.ticks(count);
    let labels = format_numeric_ticks(&values);
    let positions = scale.scale(&values).as_vec(values.len(), None);
    let name = match config.orientation {
        AxisOrientation::Bottom { .. } => "x_axis",
        AxisOrientation::Left => "y_axis",
    };
    layout_axis(name, AxisTicks { positions, labels }, scale.range(), config)
}
