mod utils;

use float_cmp::assert_approx_eq;
use ridgeline_chart::error::RidgelineChartError;
use ridgeline_chart::figure::Artist;
use ridgeline_chart::{Figure, RidgelineConfig, RidgelineRenderer, TitleLocation};
use ridgeline_scenegraph::marks::mark::SceneMark;
use ridgeline_scenegraph::scene_graph::SceneGraph;
use ridgeline_chart::TimeKind;
use utils::{columns, make_numeric_batch, three_groups};

fn rendered(config: RidgelineConfig) -> (Figure, ridgeline_chart::RidgelineFrame) {
    let mut figure = Figure::default();
    let frame = RidgelineRenderer::new(config)
        .render(&three_groups(), &columns(), &mut figure)
        .unwrap();
    (figure, frame)
}

fn root_names(scene: &SceneGraph) -> Vec<String> {
    scene.children()[0]
        .children()
        .iter()
        .map(|m| m.name().to_string())
        .collect()
}

#[test]
fn test_one_area_and_label_per_group() {
    let (figure, frame) = rendered(RidgelineConfig::default().with_alpha(0.55));
    let artists = figure.axes().artists();
    assert_eq!(artists.len(), 6);

    let areas: Vec<_> = artists
        .iter()
        .filter_map(|a| match a {
            Artist::Area(area) => Some(area),
            _ => None,
        })
        .collect();
    let names: Vec<&str> = areas.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Zeeland", "Utrecht", "Drenthe"]);

    for area in areas {
        let rows: Vec<_> = frame.group_rows(&area.name).collect();
        assert_eq!(area.x, rows.iter().map(|r| r.time).collect::<Vec<_>>());
        assert_eq!(area.y, rows.iter().map(|r| r.top).collect::<Vec<_>>());
        assert!(area.y2.iter().all(|y2| *y2 == rows[0].offset));
        assert_approx_eq!(f32, area.fill[3], 0.55);
        assert_eq!(area.edge_color, [1.0, 1.0, 1.0, 1.0]);
    }

    for artist in artists {
        if let Artist::Annotation(label) = artist {
            let rows: Vec<_> = frame.group_rows(&label.text).collect();
            assert_eq!(label.xy, (rows[0].time, rows[0].offset));
            assert_eq!(label.offset, [-70.0, 0.0]);
        }
    }
}

#[test]
fn test_axes_presentation() {
    let (figure, frame) = rendered(RidgelineConfig::default().with_time_format("%b %Y"));
    let axes = figure.axes();
    assert!(!axes.y_visible());
    assert!(!axes.frame_visible());
    assert_eq!(axes.x_limits(), frame.time_domain);
    assert_eq!(axes.x_format(), Some("%b %Y"));
}

#[test]
fn test_scene_graph_layout() {
    let (mut figure, _) = rendered(RidgelineConfig::default());
    figure.set_title("Daily cases", TitleLocation::Left);
    figure.add_note(0.043, 0.05, "Data: RIVM");
    let scene = figure.to_scene_graph().unwrap();

    let names = root_names(&scene);
    assert!(names.contains(&"plot".to_string()));
    assert!(names.contains(&"x_axis".to_string()));
    assert!(names.contains(&"title".to_string()));
    assert!(names.contains(&"notes".to_string()));
    assert!(!names.contains(&"y_axis".to_string()));
    assert!(!names.contains(&"frame".to_string()));

    let plot = scene.find_group("plot").unwrap();
    let painted = plot.marks_in_paint_order();
    let first_text = painted
        .iter()
        .position(|m| matches!(m, SceneMark::Text(_)))
        .unwrap();
    assert_eq!(first_text, 3);
    assert!(painted[first_text..]
        .iter()
        .all(|m| matches!(m, SceneMark::Text(_))));

    // Each label sits 70 points left of its ridge's first vertex
    for (area, label) in plot.marks.iter().step_by(2).zip(plot.marks.iter().skip(1).step_by(2)) {
        let (SceneMark::Area(area), SceneMark::Text(label)) = (area, label) else {
            panic!("expected area followed by label");
        };
        let x0 = *area.x_iter().next().unwrap();
        let label_x = *label.x.as_iter(1, None).next().unwrap();
        assert_approx_eq!(f32, label_x, x0 - 70.0, epsilon = 1e-3);
        assert!(!label.clip);
    }

    let SceneMark::Text(notes) = scene.children()[0]
        .children()
        .iter()
        .find(|m| m.name() == "notes")
        .unwrap()
    else {
        panic!("notes should be a text mark");
    };
    assert_approx_eq!(f32, *notes.x.as_iter(1, None).next().unwrap(), 0.043 * 864.0, epsilon = 1e-3);
    assert_approx_eq!(f32, *notes.y.as_iter(1, None).next().unwrap(), 0.95 * 576.0, epsilon = 1e-3);
}

#[test]
fn test_epoch_second_ridges_spread_across_plot() {
    let start = 1_000_000_000i64;
    let rows: Vec<(i64, &str, Option<f64>)> = (0..20)
        .flat_map(|i| {
            let v = 1.0 + (i % 5) as f64;
            [(start + i, "Noord", Some(v)), (start + i, "Zuid", Some(2.0 * v))]
        })
        .collect();
    let mut figure = Figure::default();
    let frame = RidgelineRenderer::default()
        .render(&make_numeric_batch(&rows), &columns(), &mut figure)
        .unwrap();
    assert_eq!(frame.time_kind, TimeKind::Numeric);

    let scene = figure.to_scene_graph().unwrap();
    let plot = scene.find_group("plot").unwrap();
    let [_, _, width, _] = figure.plot_area();
    for mark in &plot.marks {
        if let SceneMark::Area(area) = mark {
            let xs: Vec<f32> = area.x_iter().copied().collect();
            assert_eq!(xs.len(), 20);
            assert!(xs.windows(2).all(|w| w[1] - w[0] > 1.0));
            assert_approx_eq!(f32, xs[0], 0.0, epsilon = 1e-3);
            assert_approx_eq!(f32, xs[19], width, epsilon = 1e-2);
        }
    }
    assert!(root_names(&scene).contains(&"x_axis".to_string()));
}

#[test]
fn test_frame_and_y_axis_when_enabled() {
    let (mut figure, _) = rendered(RidgelineConfig::default());
    figure.axes_mut().set_frame_visible(true);
    figure.axes_mut().set_y_visible(true);
    let names = root_names(&figure.to_scene_graph().unwrap());
    assert!(names.contains(&"frame".to_string()));
    assert!(names.contains(&"y_axis".to_string()));
}

#[test]
fn test_rejected_input_leaves_figure_untouched() {
    let mut figure = Figure::default();
    figure.set_title("Untouched", TitleLocation::Center);
    let before = figure.clone();

    let renderer = RidgelineRenderer::new(RidgelineConfig::default().with_scale(-1.0));
    let result = renderer.render(&three_groups(), &columns(), &mut figure);
    assert!(matches!(result, Err(RidgelineChartError::InvalidConfig(_))));
    assert_eq!(figure, before);

    let missing = ridgeline_chart::RidgelineColumns::new("date", "province", "deaths");
    let result = RidgelineRenderer::default().render(&three_groups(), &missing, &mut figure);
    assert!(matches!(result, Err(RidgelineChartError::DataShape(_))));
    assert_eq!(figure, before);
}

#[test]
fn test_invalid_figure_size() {
    let figure = Figure::new(0.0, 576.0);
    assert!(matches!(
        figure.to_scene_graph(),
        Err(RidgelineChartError::InvalidConfig(_))
    ));
}
