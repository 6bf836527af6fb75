pub mod error;
pub mod serialize;
pub mod svg;

use error::RidgelineImageError;

pub use serialize::scene_to_svg;
pub use svg::svg_to_png;

/// Decode PNG bytes into an RGBA8 image
pub fn decode_png(data: &[u8]) -> Result<image::RgbaImage, RidgelineImageError> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)?;
    Ok(img.into_rgba8())
}
