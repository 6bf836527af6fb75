/// Logical size of a drawing surface plus the scale used when rasterizing it.
///
/// Sizes are in points (1/72 inch), so a scale of `dpi / 72` produces an image
/// at the requested resolution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasDimensions {
    pub size: [f32; 2],
    pub scale: f32,
}

impl CanvasDimensions {
    pub const POINTS_PER_INCH: f32 = 72.0;

    pub fn from_dpi(size: [f32; 2], dpi: f32) -> Self {
        Self {
            size,
            scale: dpi / Self::POINTS_PER_INCH,
        }
    }

    pub fn to_physical_width(&self) -> u32 {
        (self.size[0] * self.scale).round() as u32
    }

    pub fn to_physical_height(&self) -> u32 {
        (self.size[1] * self.scale).round() as u32
    }
}
