//! Scene graph to SVG document serialization.
//!
//! Coordinates are written in scene units (points), so the document's user
//! space matches the figure and rasterization only needs a uniform scale.

use std::fmt::Write;

use itertools::Itertools;
use ridgeline_common::types::{rgb_hex, ColorOrGradient, Rgba, StrokeCap, StrokeJoin};
use ridgeline_scenegraph::marks::area::SceneAreaMark;
use ridgeline_scenegraph::marks::group::{Clip, SceneGroup};
use ridgeline_scenegraph::marks::mark::SceneMark;
use ridgeline_scenegraph::marks::rule::SceneRuleMark;
use ridgeline_scenegraph::marks::text::SceneTextMark;
use ridgeline_scenegraph::scene_graph::SceneGraph;

use crate::error::RidgelineImageError;

/// Serialize a scene graph to a standalone SVG document
#[tracing::instrument(skip_all)]
pub fn scene_to_svg(scene: &SceneGraph) -> Result<String, RidgelineImageError> {
    scene.validate()?;
    let mut writer = SvgWriter::default();
    let (w, h) = (num(scene.width), num(scene.height));
    writeln!(
        writer.out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    let [ox, oy] = scene.origin;
    writeln!(writer.out, r#"<g transform="translate({},{})">"#, num(ox), num(oy))?;
    let mut marks: Vec<&SceneMark> = scene.marks.iter().collect();
    marks.sort_by_key(|m| m.zindex().unwrap_or(0));
    for mark in marks {
        writer.write_mark(mark)?;
    }
    writer.out.push_str("</g>\n</svg>\n");
    Ok(writer.out)
}

#[derive(Default)]
struct SvgWriter {
    out: String,
    next_clip_id: usize,
}

impl SvgWriter {
    fn write_mark(&mut self, mark: &SceneMark) -> Result<(), RidgelineImageError> {
        match mark {
            SceneMark::Area(area) => self.write_area(area),
            SceneMark::Rule(rule) => self.write_rule(rule),
            SceneMark::Text(text) => self.write_text(text),
            SceneMark::Group(group) => self.write_group(group),
        }
    }

    fn write_group(&mut self, group: &SceneGroup) -> Result<(), RidgelineImageError> {
        let [x, y] = group.origin;
        let name = escape(&group.name);
        writeln!(
            self.out,
            r#"<g class="{name}" transform="translate({},{})">"#,
            num(x),
            num(y)
        )?;

        let clip_id = match &group.clip {
            Clip::None => None,
            Clip::Rect {
                x,
                y,
                width,
                height,
            } => {
                if let Some(fill) = &group.fill {
                    write!(
                        self.out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}" {}"#,
                        num(*x),
                        num(*y),
                        num(*width),
                        num(*height),
                        paint("fill", fill)
                    )?;
                    if let Some(stroke) = &group.stroke {
                        write!(
                            self.out,
                            r#" {} stroke-width="{}""#,
                            paint("stroke", stroke),
                            num(group.stroke_width.unwrap_or(1.0))
                        )?;
                    }
                    self.out.push_str("/>\n");
                }
                let id = format!("clip{}", self.next_clip_id);
                self.next_clip_id += 1;
                writeln!(
                    self.out,
                    r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height)
                )?;
                Some(id)
            }
        };

        for mark in group.marks_in_paint_order() {
            let clipped = match mark {
                SceneMark::Area(m) => m.clip,
                SceneMark::Rule(m) => m.clip,
                SceneMark::Text(m) => m.clip,
                SceneMark::Group(_) => true,
            };
            match clip_id.as_deref() {
                Some(id) if clipped => {
                    writeln!(self.out, r#"<g clip-path="url(#{id})">"#)?;
                    self.write_mark(mark)?;
                    self.out.push_str("</g>\n");
                }
                _ => self.write_mark(mark)?,
            }
        }
        self.out.push_str("</g>\n");
        Ok(())
    }

    fn write_area(&mut self, area: &SceneAreaMark) -> Result<(), RidgelineImageError> {
        let style = stroke_style(
            &area.stroke,
            area.stroke_width,
            Some(area.stroke_cap),
            Some(area.stroke_join),
            area.stroke_dash.as_deref(),
        );
        let fill = paint("fill", &area.fill);
        for segment in area.segments() {
            let upper = segment.iter().map(|[x, y, _]| format!("{},{}", num(*x), num(*y)));
            let lower = segment
                .iter()
                .rev()
                .map(|[x, _, y2]| format!("{},{}", num(*x), num(*y2)));
            let d = upper.chain(lower).join(" L");
            writeln!(
                self.out,
                r#"<path class="{}" d="M{d} Z" {fill}{style}/>"#,
                escape(&area.name)
            )?;
        }
        Ok(())
    }

    fn write_rule(&mut self, rule: &SceneRuleMark) -> Result<(), RidgelineImageError> {
        for ([x, y, x2, y2], (stroke, width)) in rule
            .segments()
            .into_iter()
            .zip(rule.stroke_iter().zip(rule.stroke_width_iter()))
        {
            let style = stroke_style(
                stroke,
                *width,
                Some(rule.stroke_cap),
                None,
                rule.stroke_dash.as_deref(),
            );
            writeln!(
                self.out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{style}/>"#,
                num(x),
                num(y),
                num(x2),
                num(y2)
            )?;
        }
        Ok(())
    }

    fn write_text(&mut self, text: &SceneTextMark) -> Result<(), RidgelineImageError> {
        let instances = itertools::izip!(
            text.text_iter(),
            text.x_iter(),
            text.y_iter(),
            text.align_iter(),
            text.baseline_iter(),
            text.angle_iter(),
            text.color_iter(),
            text.font_iter(),
            text.font_size_iter(),
            text.font_weight_iter(),
            text.font_style_iter()
        );
        for (content, x, y, align, baseline, angle, color, font, size, weight, style) in instances {
            if content.is_empty() {
                continue;
            }
            let (x, y) = (num(*x), num(*y));
            write!(
                self.out,
                r#"<text x="{x}" y="{y}" text-anchor="{}" dominant-baseline="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" {}"#,
                align.as_svg_anchor(),
                baseline.as_svg_baseline(),
                escape(font),
                num(*size),
                weight.as_svg(),
                style.as_svg(),
                color_paint("fill", color),
            )?;
            if *angle != 0.0 {
                write!(self.out, r#" transform="rotate({},{x},{y})""#, num(*angle))?;
            }
            writeln!(self.out, ">{}</text>", escape(content))?;
        }
        Ok(())
    }
}

/// Compact decimal formatting for coordinates
fn num(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

fn color_paint(attr: &str, color: &Rgba) -> String {
    if color[3] <= 0.0 {
        return format!(r#"{attr}="none""#);
    }
    let mut s = format!(r#"{attr}="{}""#, rgb_hex(color));
    if color[3] < 1.0 {
        let _ = write!(s, r#" {attr}-opacity="{}""#, num(color[3]));
    }
    s
}

fn paint(attr: &str, color: &ColorOrGradient) -> String {
    color_paint(attr, &color.color_or_transparent())
}

fn stroke_style(
    stroke: &ColorOrGradient,
    width: f32,
    cap: Option<StrokeCap>,
    join: Option<StrokeJoin>,
    dash: Option<&[f32]>,
) -> String {
    if stroke.is_transparent() || width <= 0.0 {
        return String::new();
    }
    let mut s = format!(" {} stroke-width=\"{}\"", paint("stroke", stroke), num(width));
    if let Some(cap) = cap {
        let _ = write!(s, r#" stroke-linecap="{}""#, cap.as_svg());
    }
    if let Some(join) = join {
        let _ = write!(s, r#" stroke-linejoin="{}""#, join.as_svg());
    }
    if let Some(dash) = dash.filter(|d| !d.is_empty()) {
        let _ = write!(
            s,
            r#" stroke-dasharray="{}""#,
            dash.iter().map(|d| num(*d)).join(",")
        );
    }
    s
}

/// Escape text for use in XML content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
