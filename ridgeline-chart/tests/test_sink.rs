mod utils;

use std::path::PathBuf;

use ridgeline_chart::error::RidgelineChartError;
use ridgeline_chart::{save_figure, Figure, PngSink, RidgelineRenderer, SvgSink, TitleLocation};
use ridgeline_image::decode_png;
use rstest::rstest;
use utils::{columns, north_south};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ridgeline-{}-{name}", std::process::id()))
}

fn ridgeline_figure() -> Figure {
    let mut figure = Figure::default();
    RidgelineRenderer::default()
        .render(&north_south(), &columns(), &mut figure)
        .unwrap();
    figure.set_title("Hospital admissions", TitleLocation::Left);
    figure
}

#[test]
fn test_save_svg() {
    let path = scratch_path("chart.svg");
    save_figure(&ridgeline_figure(), &path, None).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="864""#));
    assert!(svg.contains("Hospital admissions"));
    assert!(svg.contains(">North</text>"));
    assert_eq!(svg.matches("<path").count(), 2);
}

#[rstest]
#[case(72.0, 864, 576)]
#[case(200.0, 2400, 1600)]
fn test_save_png(#[case] dpi: f32, #[case] width: u32, #[case] height: u32) {
    let path = scratch_path(&format!("chart-{dpi}.png"));
    save_figure(&ridgeline_figure(), &path, Some(dpi)).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let image = decode_png(&bytes).unwrap();
    assert_eq!(image.dimensions(), (width, height));
}

#[test]
fn test_png_dimensions() {
    let dims = PngSink::default().dimensions(&Figure::default());
    assert_eq!(dims.to_physical_width(), 1200);
    assert_eq!(dims.to_physical_height(), 800);
}

#[test]
fn test_unsupported_extension() {
    let path = scratch_path("chart.pdf");
    let result = save_figure(&ridgeline_figure(), &path, None);
    assert!(matches!(result, Err(RidgelineChartError::UnsupportedFormat(_))));
    assert!(!path.exists());
}

#[test]
fn test_invalid_dpi() {
    let result = PngSink::new(0.0).render(&ridgeline_figure());
    assert!(matches!(result, Err(RidgelineChartError::InvalidConfig(_))));
}

#[test]
fn test_svg_render_matches_scene() {
    let figure = ridgeline_figure();
    let svg = SvgSink.render(&figure).unwrap();
    assert!(svg.contains("clipPath"));
}
