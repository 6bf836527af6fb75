use ridgeline_common::types::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisOrientation {
    /// Axis below a plot area of the given height
    Bottom { height: f32 },
    Left,
}

impl AxisOrientation {
    pub fn name(&self) -> &'static str {
        match self {
            AxisOrientation::Bottom { .. } => "bottom",
            AxisOrientation::Left => "left",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Approximate number of ticks
    pub tick_count: Option<usize>,
    /// Label pattern; strftime for temporal axes
    pub format: Option<String>,
    pub tick_size: f32,
    pub label_padding: f32,
    pub font_size: f32,
    pub line_width: f32,
    pub color: Rgba,
    pub show_domain: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Left,
            tick_count: None,
            format: None,
            tick_size: 3.5,
            label_padding: 3.5,
            font_size: 10.0,
            line_width: 0.8,
            color: [0.0, 0.0, 0.0, 1.0],
            show_domain: true,
        }
    }
}
