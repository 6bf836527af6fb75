//! The drawing surface a ridgeline is rendered onto.
//!
//! A [`Figure`] is a fixed-size page in points holding one [`Axes`] plus an
//! optional title and free-text notes. Nothing is drawn until
//! [`Figure::to_scene_graph`] lays the page out as a mark tree.

use ridgeline_common::types::{ColorOrGradient, Rgba};
use ridgeline_common::value::ScalarOrArray;
use ridgeline_guides::axis::numeric::make_numeric_axis_marks;
use ridgeline_guides::axis::opts::{AxisConfig, AxisOrientation};
use ridgeline_guides::axis::time::{make_time_axis_marks, TimeAxisScale};
use ridgeline_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use ridgeline_scales::numeric::ContinuousNumericScale;
use ridgeline_scales::temporal::date::DateScale;
use ridgeline_scenegraph::marks::area::SceneAreaMark;
use ridgeline_scenegraph::marks::group::{Clip, SceneGroup};
use ridgeline_scenegraph::marks::mark::SceneMark;
use ridgeline_scenegraph::marks::rule::SceneRuleMark;
use ridgeline_scenegraph::marks::text::{
    FontWeightNameSpec, FontWeightSpec, SceneTextMark, TextAlignSpec, TextBaselineSpec,
};
use ridgeline_scenegraph::scene_graph::SceneGraph;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::dataset::TimeKind;
use crate::error::RidgelineChartError;

/// 12 x 8 inches at 72 points per inch
pub const DEFAULT_WIDTH: f32 = 864.0;
pub const DEFAULT_HEIGHT: f32 = 576.0;

/// Share of the data span added on each side of auto-scaled limits
const AXES_MARGIN: f64 = 0.05;
const TITLE_PAD: f32 = 6.0;
const TITLE_FONT_SIZE: f32 = 15.0;
const TEXT_FONT_SIZE: f32 = 10.0;
const FRAME_WIDTH: f32 = 0.8;
const AREA_ZINDEX: i32 = 1;
const TEXT_ZINDEX: i32 = 3;
const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TitleLocation {
    Left,
    #[default]
    Center,
    Right,
}

/// Plot-area edges as fractions of the figure size, measured from the
/// left and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotParams {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
        }
    }
}

/// Filled region between `y` and `y2` over `x`, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct FillBetween {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub y2: Vec<f64>,
    /// Fill color including opacity
    pub fill: Rgba,
    pub edge_color: Rgba,
    pub edge_width: f32,
}

/// Text anchored at a data position and shifted by a fixed offset
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub xy: (f64, f64),
    /// Offset in points, positive y pointing up
    pub offset: [f32; 2],
    pub font_size: f32,
    pub color: Rgba,
}

impl Annotation {
    pub fn new(text: impl Into<String>, xy: (f64, f64), offset: [f32; 2]) -> Self {
        Self {
            text: text.into(),
            xy,
            offset,
            font_size: TEXT_FONT_SIZE,
            color: BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Area(FillBetween),
    Annotation(Annotation),
}

/// Plot area state: drawn series, limits and axis presentation
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    artists: Vec<Artist>,
    x_limits: Option<(f64, f64)>,
    y_limits: Option<(f64, f64)>,
    x_kind: TimeKind,
    x_format: Option<String>,
    y_visible: bool,
    frame_visible: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            artists: Vec::new(),
            x_limits: None,
            y_limits: None,
            x_kind: TimeKind::Numeric,
            x_format: None,
            y_visible: true,
            frame_visible: true,
        }
    }
}

fn pad_limits((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - AXES_MARGIN * span, hi + AXES_MARGIN * span)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn extend(limits: &mut Option<(f64, f64)>, values: &[f64]) {
    for v in values.iter().filter(|v| v.is_finite()) {
        *limits = Some(match *limits {
            None => (*v, *v),
            Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
        });
    }
}

impl Axes {
    pub fn fill_between(&mut self, area: FillBetween) {
        self.artists.push(Artist::Area(area));
    }

    pub fn annotate(&mut self, annotation: Annotation) {
        self.artists.push(Artist::Annotation(annotation));
    }

    /// Artists in the order they were added
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn set_xlim(&mut self, limits: (f64, f64)) {
        self.x_limits = Some(limits);
    }

    pub fn set_ylim(&mut self, limits: (f64, f64)) {
        self.y_limits = Some(limits);
    }

    /// Data extent of the filled areas as `(x, y)` ranges
    pub fn data_limits(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let (mut x, mut y) = (None, None);
        for artist in &self.artists {
            if let Artist::Area(area) = artist {
                extend(&mut x, &area.x);
                extend(&mut y, &area.y);
                extend(&mut y, &area.y2);
            }
        }
        (x, y)
    }

    /// Explicit x limits, or the padded data extent
    pub fn x_limits(&self) -> (f64, f64) {
        self.x_limits
            .unwrap_or_else(|| self.data_limits().0.map_or((0.0, 1.0), pad_limits))
    }

    /// Explicit y limits, or the padded data extent
    pub fn y_limits(&self) -> (f64, f64) {
        self.y_limits
            .unwrap_or_else(|| self.data_limits().1.map_or((0.0, 1.0), pad_limits))
    }

    pub fn set_x_kind(&mut self, kind: TimeKind) {
        self.x_kind = kind;
    }

    pub fn x_kind(&self) -> TimeKind {
        self.x_kind
    }

    pub fn set_x_format(&mut self, pattern: Option<String>) {
        self.x_format = pattern;
    }

    pub fn x_format(&self) -> Option<&str> {
        self.x_format.as_deref()
    }

    pub fn set_y_visible(&mut self, visible: bool) {
        self.y_visible = visible;
    }

    pub fn y_visible(&self) -> bool {
        self.y_visible
    }

    pub fn set_frame_visible(&mut self, visible: bool) {
        self.frame_visible = visible;
    }

    pub fn frame_visible(&self) -> bool {
        self.frame_visible
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub location: TitleLocation,
    pub font_size: f32,
}

/// Free text placed in figure fractions, origin bottom-left
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: f32,
    height: f32,
    pub subplot: SubplotParams,
    pub background: Rgba,
    axes: Axes,
    title: Option<Title>,
    notes: Vec<Note>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Figure {
    /// A blank figure of the given size in points
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            subplot: SubplotParams::default(),
            background: [1.0, 1.0, 1.0, 1.0],
            axes: Axes::default(),
            title: None,
            notes: Vec::new(),
        }
    }

    pub fn from_inches(width: f32, height: f32) -> Self {
        Self::new(width * 72.0, height * 72.0)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }

    pub fn set_title(&mut self, text: impl Into<String>, location: TitleLocation) {
        self.title = Some(Title {
            text: text.into(),
            location,
            font_size: TITLE_FONT_SIZE,
        });
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Add text at figure fractions `(x, y)` measured from the bottom-left
    pub fn add_note(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.notes.push(Note {
            x,
            y,
            text: text.into(),
            font_size: TEXT_FONT_SIZE,
        });
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Plot area as `[x, y, width, height]` in points from the top-left
    pub fn plot_area(&self) -> [f32; 4] {
        let p = &self.subplot;
        let x = p.left * self.width;
        let y = (1.0 - p.top) * self.height;
        [
            x,
            y,
            (p.right - p.left) * self.width,
            (p.top - p.bottom) * self.height,
        ]
    }

    fn validate(&self) -> Result<(), RidgelineChartError> {
        let p = &self.subplot;
        let size_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !size_ok {
            return Err(RidgelineChartError::InvalidConfig(format!(
                "figure size must be positive, received {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0 <= p.left && p.left < p.right && p.right <= 1.0)
            || !(0.0 <= p.bottom && p.bottom < p.top && p.top <= 1.0)
        {
            return Err(RidgelineChartError::InvalidConfig(format!(
                "invalid subplot parameters {p:?}"
            )));
        }
        Ok(())
    }

    /// Lay out the figure as a scene graph in points
    #[tracing::instrument(skip_all)]
    pub fn to_scene_graph(&self) -> Result<SceneGraph, RidgelineChartError> {
        self.validate()?;
        let [px, py, pw, ph] = self.plot_area();
        let axes = &self.axes;

        let x_limits = axes.x_limits();
        let x_scale = match axes.x_kind {
            TimeKind::Temporal => TimeAxisScale::Temporal(DateScale::new(x_limits).range((0.0, pw))),
            TimeKind::Numeric => TimeAxisScale::Numeric(LinearNumericScale::new(
                &LinearNumericScaleConfig {
                    domain: x_limits,
                    range: (0.0, pw),
                    ..Default::default()
                },
            )),
        };
        let (y0, y1) = axes.y_limits();
        let y_scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (y0, y1),
            range: (ph, 0.0),
            ..Default::default()
        });
        let sx = |v: &f64| x_scale.scale(*v);
        let sy = |v: &f64| y_scale.scale_scalar(*v);

        let mut plot = SceneGroup {
            name: "plot".to_string(),
            origin: [px, py],
            clip: Clip::Rect {
                x: 0.0,
                y: 0.0,
                width: pw,
                height: ph,
            },
            ..Default::default()
        };
        for artist in &axes.artists {
            let mark: SceneMark = match artist {
                Artist::Area(area) => SceneAreaMark {
                    name: area.name.clone(),
                    len: area.x.len() as u32,
                    x: area.x.iter().map(sx).collect::<Vec<_>>().into(),
                    y: area.y.iter().map(sy).collect::<Vec<_>>().into(),
                    y2: area.y2.iter().map(sy).collect::<Vec<_>>().into(),
                    fill: ColorOrGradient::Color(area.fill),
                    stroke: ColorOrGradient::Color(area.edge_color),
                    stroke_width: area.edge_width,
                    zindex: Some(AREA_ZINDEX),
                    ..Default::default()
                }
                .into(),
                Artist::Annotation(note) => SceneTextMark {
                    name: "annotation".to_string(),
                    clip: false,
                    len: 1,
                    text: ScalarOrArray::Scalar(note.text.clone()),
                    x: ScalarOrArray::Scalar(sx(&note.xy.0) + note.offset[0]),
                    y: ScalarOrArray::Scalar(sy(&note.xy.1) - note.offset[1]),
                    align: ScalarOrArray::Scalar(TextAlignSpec::Left),
                    baseline: ScalarOrArray::Scalar(TextBaselineSpec::Alphabetic),
                    color: ScalarOrArray::Scalar(note.color),
                    font_size: ScalarOrArray::Scalar(note.font_size),
                    zindex: Some(TEXT_ZINDEX),
                    ..Default::default()
                }
                .into(),
            };
            plot.marks.push(mark);
        }

        let mut root = SceneGroup {
            name: "figure".to_string(),
            clip: Clip::Rect {
                x: 0.0,
                y: 0.0,
                width: self.width,
                height: self.height,
            },
            fill: Some(ColorOrGradient::Color(self.background)),
            marks: vec![plot.into()],
            ..Default::default()
        };

        if axes.frame_visible {
            root.marks.push(
                SceneRuleMark {
                    name: "frame".to_string(),
                    clip: false,
                    len: 4,
                    x: vec![px, px + pw, px, px].into(),
                    y: vec![py, py, py, py + ph].into(),
                    x2: vec![px + pw, px + pw, px, px + pw].into(),
                    y2: vec![py, py + ph, py + ph, py + ph].into(),
                    stroke: ScalarOrArray::Scalar(ColorOrGradient::Color(BLACK)),
                    stroke_width: ScalarOrArray::Scalar(FRAME_WIDTH),
                    ..Default::default()
                }
                .into(),
            );
        }

        let mut x_axis = make_time_axis_marks(
            &x_scale,
            &AxisConfig {
                orientation: AxisOrientation::Bottom { height: ph },
                format: axes.x_format.clone(),
                show_domain: false,
                ..Default::default()
            },
        )?;
        x_axis.origin = [x_axis.origin[0] + px, x_axis.origin[1] + py];
        root.marks.push(x_axis.into());

        if axes.y_visible {
            let mut y_axis = make_numeric_axis_marks(
                &y_scale,
                &AxisConfig {
                    orientation: AxisOrientation::Left,
                    show_domain: false,
                    ..Default::default()
                },
            );
            y_axis.origin = [y_axis.origin[0] + px, y_axis.origin[1] + py];
            root.marks.push(y_axis.into());
        }

        if let Some(title) = &self.title {
            let (x, align) = match title.location {
                TitleLocation::Left => (px, TextAlignSpec::Left),
                TitleLocation::Center => (px + pw / 2.0, TextAlignSpec::Center),
                TitleLocation::Right => (px + pw, TextAlignSpec::Right),
            };
            root.marks.push(
                SceneTextMark {
                    name: "title".to_string(),
                    clip: false,
                    len: 1,
                    text: ScalarOrArray::Scalar(title.text.clone()),
                    x: ScalarOrArray::Scalar(x),
                    y: ScalarOrArray::Scalar(py - TITLE_PAD),
                    align: ScalarOrArray::Scalar(align),
                    baseline: ScalarOrArray::Scalar(TextBaselineSpec::Alphabetic),
                    color: ScalarOrArray::Scalar(BLACK),
                    font_size: ScalarOrArray::Scalar(title.font_size),
                    font_weight: ScalarOrArray::Scalar(FontWeightSpec::Name(
                        FontWeightNameSpec::Normal,
                    )),
                    ..Default::default()
                }
                .into(),
            );
        }

        if !self.notes.is_empty() {
            let notes = &self.notes;
            root.marks.push(
                SceneTextMark {
                    name: "notes".to_string(),
                    clip: false,
                    len: notes.len() as u32,
                    text: notes.iter().map(|n| n.text.clone()).collect::<Vec<_>>().into(),
                    x: notes.iter().map(|n| n.x * self.width).collect::<Vec<_>>().into(),
                    y: notes
                        .iter()
                        .map(|n| (1.0 - n.y) * self.height)
                        .collect::<Vec<_>>()
                        .into(),
                    align: ScalarOrArray::Scalar(TextAlignSpec::Left),
                    baseline: ScalarOrArray::Scalar(TextBaselineSpec::Alphabetic),
                    color: ScalarOrArray::Scalar(BLACK),
                    font_size: notes.iter().map(|n| n.font_size).collect::<Vec<_>>().into(),
                    ..Default::default()
                }
                .into(),
            );
        }

        let scene = SceneGraph {
            marks: vec![root.into()],
            width: self.width,
            height: self.height,
            origin: [0.0, 0.0],
        };
        scene.validate()?;
        Ok(scene)
    }
}
