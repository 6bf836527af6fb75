use crate::error::RidgelineSceneGraphError;
use crate::marks::mark::{check_len, SceneMark};
use itertools::izip;
use ridgeline_common::types::{ColorOrGradient, StrokeCap, StrokeJoin};
use ridgeline_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

/// Filled region between an upper curve `(x, y)` and a lower curve `(x, y2)`.
///
/// Instances are the vertices of one polygon, ordered along x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneAreaMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub defined: ScalarOrArray<bool>,
    pub fill: ColorOrGradient,
    pub stroke: ColorOrGradient,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_dash: Option<Vec<f32>>,
    pub zindex: Option<i32>,
}

impl SceneAreaMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, None)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, None)
    }

    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize, None)
    }

    pub fn defined_iter(&self) -> Box<dyn Iterator<Item = &bool> + '_> {
        self.defined.as_iter(self.len as usize, None)
    }

    /// Split the area into runs of consecutive defined, finite vertices.
    ///
    /// Each run is a list of `(x, y, y2)` triples; runs shorter than two
    /// vertices cannot enclose any area and are dropped.
    pub fn segments(&self) -> Vec<Vec<[f32; 3]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f32; 3]> = Vec::new();
        for (x, y, y2, defined) in izip!(
            self.x_iter(),
            self.y_iter(),
            self.y2_iter(),
            self.defined_iter()
        ) {
            if *defined && x.is_finite() && y.is_finite() && y2.is_finite() {
                current.push([*x, *y, *y2]);
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments.retain(|s| s.len() > 1);
        segments
    }

    pub fn validate(&self) -> Result<(), RidgelineSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", &self.x, len)?;
        check_len(&self.name, "y", &self.y, len)?;
        check_len(&self.name, "y2", &self.y2, len)?;
        check_len(&self.name, "defined", &self.defined, len)
    }
}

impl Default for SceneAreaMark {
    fn default() -> Self {
        Self {
            name: "area_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            y2: ScalarOrArray::Scalar(0.0),
            defined: ScalarOrArray::Scalar(true),
            fill: ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0]),
            stroke: ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0]),
            stroke_width: 1.0,
            stroke_cap: Default::default(),
            stroke_join: Default::default(),
            stroke_dash: None,
            zindex: None,
        }
    }
}

impl From<SceneAreaMark> for SceneMark {
    fn from(mark: SceneAreaMark) -> Self {
        SceneMark::Area(mark)
    }
}
