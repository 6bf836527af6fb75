use lazy_static::lazy_static;
use resvg::render;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use usvg::fontdb::Database;

use crate::error::RidgelineImageError;

lazy_static! {
    pub static ref FONT_DB: Mutex<usvg::fontdb::Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> usvg::fontdb::Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    tracing::debug!("loaded {} font faces", font_database.len());
    font_database
}

/// Rasterize an SVG document to PNG bytes.
///
/// SVG user units are points; `scale` is the number of pixels per point,
/// so a figure saved at 200 dpi uses `200 / 72`.
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, RidgelineImageError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RidgelineImageError::InvalidScale(scale));
    }
    let fontdb = {
        let font_database = FONT_DB.lock().map_err(|err| {
            RidgelineImageError::InternalError(format!("Failed to acquire fontdb lock: {err}"))
        })?;
        Arc::new(font_database.clone())
    };

    // catch_unwind so that a panic inside usvg/resvg surfaces as an error
    let response = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Vec<u8>, RidgelineImageError> {
        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
        let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

        let width = (rtree.size().width() * scale).round().max(1.0) as u32;
        let height = (rtree.size().height() * scale).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RidgelineImageError::InternalError(format!(
                "Failed to allocate {width}x{height} pixmap"
            ))
        })?;

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        render(&rtree, transform, &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| RidgelineImageError::InternalError(format!("PNG encoding failed: {err}")))
    }));
    match response {
        Ok(result) => result,
        Err(_) => Err(RidgelineImageError::InternalError(
            "SVG rasterization panicked".to_string(),
        )),
    }
}
