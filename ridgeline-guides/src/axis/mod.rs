pub mod numeric;
pub mod opts;
pub mod time;

use crate::axis::opts::{AxisConfig, AxisOrientation};
use ridgeline_common::types::ColorOrGradient;
use ridgeline_common::value::ScalarOrArray;
use ridgeline_scenegraph::marks::group::SceneGroup;
use ridgeline_scenegraph::marks::rule::SceneRuleMark;
use ridgeline_scenegraph::marks::text::{SceneTextMark, TextAlignSpec, TextBaselineSpec};

/// Tick positions (in range coordinates) and their labels
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub positions: Vec<f32>,
    pub labels: Vec<String>,
}

/// Lay out the domain line, tick rules and tick labels of an axis spanning
/// `range` along its orientation.
pub(crate) fn layout_axis(
    name: &str,
    ticks: AxisTicks,
    range: (f32, f32),
    config: &AxisConfig,
) -> SceneGroup {
    let (lower, upper) = if range.0 <= range.1 {
        (range.0, range.1)
    } else {
        (range.1, range.0)
    };
    let stroke: ColorOrGradient = config.color.into();
    let n = ticks.positions.len() as u32;
    let label_offset = config.tick_size + config.label_padding;
    let positions = ScalarOrArray::new_array(ticks.positions);

    let (origin, domain, tick_rules, labels) = match config.orientation {
        AxisOrientation::Bottom { height } => {
            // Offset by a half point so the domain line sits on pixel centers
            let y = 0.5;
            let domain = SceneRuleMark {
                name: format!("{name}_domain"),
                x: ScalarOrArray::Scalar(lower),
                x2: ScalarOrArray::Scalar(upper),
                y: ScalarOrArray::Scalar(y),
                y2: ScalarOrArray::Scalar(y),
                ..Default::default()
            };
            let tick_rules = SceneRuleMark {
                name: format!("{name}_ticks"),
                len: n,
                x: positions.clone(),
                x2: positions.clone(),
                y: ScalarOrArray::Scalar(y),
                y2: ScalarOrArray::Scalar(y + config.tick_size),
                ..Default::default()
            };
            let labels = SceneTextMark {
                name: format!("{name}_labels"),
                len: n,
                text: ticks.labels.into(),
                x: positions,
                y: ScalarOrArray::Scalar(y + label_offset),
                align: ScalarOrArray::Scalar(TextAlignSpec::Center),
                baseline: ScalarOrArray::Scalar(TextBaselineSpec::Top),
                ..Default::default()
            };
            ([0.0, height], domain, tick_rules, labels)
        }
        AxisOrientation::Left => {
            let x = -0.5;
            let domain = SceneRuleMark {
                name: format!("{name}_domain"),
                x: ScalarOrArray::Scalar(x),
                x2: ScalarOrArray::Scalar(x),
                y: ScalarOrArray::Scalar(lower),
                y2: ScalarOrArray::Scalar(upper),
                ..Default::default()
            };
            let tick_rules = SceneRuleMark {
                name: format!("{name}_ticks"),
                len: n,
                x: ScalarOrArray::Scalar(x),
                x2: ScalarOrArray::Scalar(x - config.tick_size),
                y: positions.clone(),
                y2: positions.clone(),
                ..Default::default()
            };
            let labels = SceneTextMark {
                name: format!("{name}_labels"),
                len: n,
                text: ticks.labels.into(),
                x: ScalarOrArray::Scalar(x - label_offset),
                y: positions,
                align: ScalarOrArray::Scalar(TextAlignSpec::Right),
                baseline: ScalarOrArray::Scalar(TextBaselineSpec::Middle),
                ..Default::default()
            };
            ([0.0, 0.0], domain, tick_rules, labels)
        }
    };

    let mut group = SceneGroup {
        name: name.to_string(),
        origin,
        ..Default::default()
    };
    if config.show_domain {
        group.marks.push(
            SceneRuleMark {
                clip: false,
                stroke: ScalarOrArray::Scalar(stroke.clone()),
                stroke_width: ScalarOrArray::Scalar(config.line_width),
                ..domain
            }
            .into(),
        );
    }
    group.marks.push(
        SceneRuleMark {
            clip: false,
            stroke: ScalarOrArray::Scalar(stroke),
            stroke_width: ScalarOrArray::Scalar(config.line_width),
            ..tick_rules
        }
        .into(),
    );
    group.marks.push(
        SceneTextMark {
            clip: false,
            color: ScalarOrArray::Scalar(config.color),
            font_size: ScalarOrArray::Scalar(config.font_size),
            ..labels
        }
        .into(),
    );
    group
}
