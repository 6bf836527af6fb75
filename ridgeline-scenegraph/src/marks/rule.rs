use crate::error::RidgelineSceneGraphError;
use crate::marks::mark::{check_len, SceneMark};
use itertools::izip;
use ridgeline_common::types::{ColorOrGradient, StrokeCap};
use ridgeline_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

/// Straight line segments from `(x, y)` to `(x2, y2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRuleMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub stroke_dash: Option<Vec<f32>>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_width: ScalarOrArray<f32>,
    pub stroke_cap: StrokeCap,
    pub zindex: Option<i32>,
}

impl SceneRuleMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, None)
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, None)
    }
    pub fn x2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x2.as_iter(self.len as usize, None)
    }
    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize, None)
    }
    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &ColorOrGradient> + '_> {
        self.stroke.as_iter(self.len as usize, None)
    }
    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width.as_iter(self.len as usize, None)
    }

    /// Segment endpoints as `[x, y, x2, y2]`
    pub fn segments(&self) -> Vec<[f32; 4]> {
        izip!(self.x_iter(), self.y_iter(), self.x2_iter(), self.y2_iter())
            .map(|(x, y, x2, y2)| [*x, *y, *x2, *y2])
            .collect()
    }

    pub fn validate(&self) -> Result<(), RidgelineSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", &self.x, len)?;
        check_len(&self.name, "y", &self.y, len)?;
        check_len(&self.name, "x2", &self.x2, len)?;
        check_len(&self.name, "y2", &self.y2, len)?;
        check_len(&self.name, "stroke", &self.stroke, len)?;
        check_len(&self.name, "stroke_width", &self.stroke_width, len)
    }
}

impl Default for SceneRuleMark {
    fn default() -> Self {
        Self {
            name: "rule_mark".to_string(),
            clip: true,
            len: 1,
            stroke_dash: None,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            x2: ScalarOrArray::Scalar(0.0),
            y2: ScalarOrArray::Scalar(0.0),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke_width: ScalarOrArray::Scalar(1.0),
            stroke_cap: Default::default(),
            zindex: None,
        }
    }
}

impl From<SceneRuleMark> for SceneMark {
    fn from(mark: SceneRuleMark) -> Self {
        SceneMark::Rule(mark)
    }
}
