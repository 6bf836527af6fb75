use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use strum::VariantNames;

/// Straight (non-premultiplied) RGBA color with components in [0, 1]
pub type Rgba = [f32; 4];

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn as_svg(&self) -> &'static str {
        match self {
            StrokeCap::Butt => "butt",
            StrokeCap::Round => "round",
            StrokeCap::Square => "square",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeJoin {
    Bevel,
    #[default]
    Miter,
    Round,
}

impl StrokeJoin {
    pub fn as_svg(&self) -> &'static str {
        match self {
            StrokeJoin::Bevel => "bevel",
            StrokeJoin::Miter => "miter",
            StrokeJoin::Round => "round",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorOrGradient {
    Color(Rgba),
}

impl Hash for ColorOrGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ColorOrGradient::Color(c) => c.iter().for_each(|v| OrderedFloat::from(*v).hash(state)),
        }
    }
}

impl ColorOrGradient {
    pub const WHITE: Self = ColorOrGradient::Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = ColorOrGradient::Color([0.0, 0.0, 0.0, 1.0]);

    pub fn transparent() -> Self {
        ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])
    }

    pub fn color_or_transparent(&self) -> Rgba {
        match self {
            ColorOrGradient::Color(c) => *c,
        }
    }

    /// Replace the alpha channel
    pub fn with_alpha(&self, alpha: f32) -> Self {
        let [r, g, b, _] = self.color_or_transparent();
        ColorOrGradient::Color([r, g, b, alpha])
    }

    pub fn is_transparent(&self) -> bool {
        self.color_or_transparent()[3] <= 0.0
    }
}

impl From<Rgba> for ColorOrGradient {
    fn from(value: Rgba) -> Self {
        ColorOrGradient::Color(value)
    }
}

/// Format the RGB part of a color as `#rrggbb`
pub fn rgb_hex(color: &Rgba) -> String {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        to_u8(color[0]),
        to_u8(color[1]),
        to_u8(color[2])
    )
}

/// Parse `#rgb` or `#rrggbb` into an opaque color
pub fn parse_hex(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_hex_roundtrip() {
        let c = parse_hex("#440154").unwrap();
        assert_eq!(rgb_hex(&c), "#440154");
        assert_approx_eq!(f32, c[3], 1.0);
    }

    #[test]
    fn test_short_hex_and_invalid() {
        assert_eq!(parse_hex("#fff"), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(parse_hex("fff"), None);
        assert_eq!(parse_hex("#ggg"), None);
    }

    #[test]
    fn test_with_alpha() {
        let c = ColorOrGradient::WHITE.with_alpha(0.5);
        assert_eq!(c.color_or_transparent(), [1.0, 1.0, 1.0, 0.5]);
        assert!(ColorOrGradient::transparent().is_transparent());
    }
}
