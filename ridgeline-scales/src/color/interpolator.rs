use palette::{Mix, Srgba};
use ridgeline_common::types::Rgba;
use std::fmt::Debug;

/// Color stop: position in [0, 1] and the color at that position
pub type ColorStop = (f32, Rgba);

pub trait ColorInterpolator: Debug + Send + Sync + 'static {
    /// Interpolate between ascending color stops at each normalized value
    fn interpolate(&self, stops: &[ColorStop], values: &[f32]) -> Vec<Rgba>;
}

/// Interpolation in gamma-encoded sRGB, which reproduces the piecewise-linear
/// channel definitions of the classic colormaps exactly
#[derive(Clone, Debug, Default)]
pub struct SrgbaColorInterpolator;

impl ColorInterpolator for SrgbaColorInterpolator {
    fn interpolate(&self, stops: &[ColorStop], values: &[f32]) -> Vec<Rgba> {
        let colors: Vec<(f32, Srgba)> = stops
            .iter()
            .map(|(offset, c)| (*offset, Srgba::new(c[0], c[1], c[2], c[3])))
            .collect();
        interpolate_color(&colors, values)
    }
}

fn to_rgba(color: Srgba) -> Rgba {
    let (r, g, b, a) = color.into_components();
    [r, g, b, a]
}

/// Interpolate between positioned stops using palette's `Mix` trait
fn interpolate_color(stops: &[(f32, Srgba)], values: &[f32]) -> Vec<Rgba> {
    let Some(((first_offset, first), (last_offset, last))) = stops.first().zip(stops.last())
    else {
        return vec![[0.0, 0.0, 0.0, 0.0]; values.len()];
    };

    values
        .iter()
        .map(|v| {
            let v = v.clamp(0.0, 1.0);
            if v <= *first_offset {
                return to_rgba(*first);
            }
            if v >= *last_offset {
                return to_rgba(*last);
            }
            // First stop strictly above v; guaranteed to exist and be > 0 here
            let upper = stops.partition_point(|(offset, _)| *offset <= v);
            let (lo_offset, lo_color) = stops[upper - 1];
            let (hi_offset, hi_color) = stops[upper];
            let span = hi_offset - lo_offset;
            if span <= 0.0 {
                return to_rgba(hi_color);
            }
            to_rgba(lo_color.mix(hi_color, (v - lo_offset) / span))
        })
        .collect()
}
