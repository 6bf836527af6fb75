use crate::error::RidgelineSceneGraphError;
use crate::marks::mark::{check_len, SceneMark};
use ridgeline_common::types::Rgba;
use ridgeline_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub align: ScalarOrArray<TextAlignSpec>,
    pub baseline: ScalarOrArray<TextBaselineSpec>,
    pub angle: ScalarOrArray<f32>,
    pub color: ScalarOrArray<Rgba>,
    pub font: ScalarOrArray<String>,
    pub font_size: ScalarOrArray<f32>,
    pub font_weight: ScalarOrArray<FontWeightSpec>,
    pub font_style: ScalarOrArray<FontStyleSpec>,
    pub indices: Option<Vec<usize>>,
    pub zindex: Option<i32>,
}

impl SceneTextMark {
    pub fn text_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.text.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn align_iter(&self) -> Box<dyn Iterator<Item = &TextAlignSpec> + '_> {
        self.align.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn baseline_iter(&self) -> Box<dyn Iterator<Item = &TextBaselineSpec> + '_> {
        self.baseline
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn angle_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.angle.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.color.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.font.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.font_size
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_weight_iter(&self) -> Box<dyn Iterator<Item = &FontWeightSpec> + '_> {
        self.font_weight
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_style_iter(&self) -> Box<dyn Iterator<Item = &FontStyleSpec> + '_> {
        self.font_style
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn validate(&self) -> Result<(), RidgelineSceneGraphError> {
        if self.indices.is_some() {
            // channels are indexed, lengths are independent of len
            return Ok(());
        }
        let len = self.len as usize;
        check_len(&self.name, "text", &self.text, len)?;
        check_len(&self.name, "x", &self.x, len)?;
        check_len(&self.name, "y", &self.y, len)?;
        check_len(&self.name, "color", &self.color, len)
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            clip: true,
            len: 1,
            text: ScalarOrArray::Scalar(String::new()),
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            align: ScalarOrArray::Scalar(TextAlignSpec::Left),
            baseline: ScalarOrArray::Scalar(TextBaselineSpec::Alphabetic),
            angle: ScalarOrArray::Scalar(0.0),
            color: ScalarOrArray::Scalar([0.0, 0.0, 0.0, 1.0]),
            font: ScalarOrArray::Scalar("sans-serif".to_string()),
            font_size: ScalarOrArray::Scalar(10.0),
            font_weight: ScalarOrArray::Scalar(FontWeightSpec::Name(FontWeightNameSpec::Normal)),
            font_style: ScalarOrArray::Scalar(FontStyleSpec::Normal),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(Arc::new(mark))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignSpec {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignSpec {
    pub fn as_svg_anchor(&self) -> &'static str {
        match self {
            TextAlignSpec::Left => "start",
            TextAlignSpec::Center => "middle",
            TextAlignSpec::Right => "end",
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBaselineSpec {
    Alphabetic,
    Top,
    Middle,
    #[default]
    Bottom,
}

impl TextBaselineSpec {
    pub fn as_svg_baseline(&self) -> &'static str {
        match self {
            TextBaselineSpec::Alphabetic => "alphabetic",
            TextBaselineSpec::Top => "hanging",
            TextBaselineSpec::Middle => "central",
            TextBaselineSpec::Bottom => "text-after-edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeightSpec {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl Default for FontWeightSpec {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

impl FontWeightSpec {
    pub fn as_svg(&self) -> String {
        match self {
            FontWeightSpec::Name(FontWeightNameSpec::Normal) => "normal".to_string(),
            FontWeightSpec::Name(FontWeightNameSpec::Bold) => "bold".to_string(),
            FontWeightSpec::Number(n) => format!("{}", n.round() as i32),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyleSpec {
    #[default]
    Normal,
    Italic,
}

impl FontStyleSpec {
    pub fn as_svg(&self) -> &'static str {
        match self {
            FontStyleSpec::Normal => "normal",
            FontStyleSpec::Italic => "italic",
        }
    }
}
