use ridgeline_scenegraph::marks::area::SceneAreaMark;
use ridgeline_scenegraph::marks::group::SceneGroup;
use ridgeline_scenegraph::marks::mark::SceneMark;
use ridgeline_scenegraph::marks::text::SceneTextMark;
use ridgeline_scenegraph::scene_graph::SceneGraph;

fn make_scene() -> SceneGraph {
    let inner = SceneGroup {
        name: "plot".to_string(),
        origin: [10.0, 20.0],
        marks: vec![
            SceneAreaMark {
                name: "ridge_b".to_string(),
                zindex: Some(1),
                ..Default::default()
            }
            .into(),
            SceneAreaMark {
                name: "ridge_a".to_string(),
                ..Default::default()
            }
            .into(),
        ],
        ..Default::default()
    };
    let outer = SceneGroup {
        name: "figure".to_string(),
        origin: [5.0, 5.0],
        marks: vec![
            SceneTextMark {
                text: "title".to_string().into(),
                ..Default::default()
            }
            .into(),
            inner.into(),
        ],
        ..Default::default()
    };
    SceneGraph {
        marks: vec![outer.into()],
        width: 200.0,
        height: 100.0,
        origin: [0.0, 0.0],
    }
}

#[test]
fn test_group_paths_and_origins() {
    let scene = make_scene();
    assert_eq!(scene.group_paths(), vec![vec![0], vec![0, 1]]);
    assert_eq!(scene.get_absolute_origin(&[0, 1]), Some([15.0, 25.0]));
    assert_eq!(scene.get_absolute_origin(&[0, 0]), None);
}

#[test]
fn test_find_group_by_name() {
    let scene = make_scene();
    let plot = scene.find_group("plot").expect("plot group");
    assert_eq!(plot.marks.len(), 2);
    assert!(scene.find_group("missing").is_none());
}

#[test]
fn test_paint_order_respects_zindex() {
    let scene = make_scene();
    let plot = scene.find_group("plot").unwrap();
    let names: Vec<&str> = plot
        .marks_in_paint_order()
        .into_iter()
        .map(SceneMark::name)
        .collect();
    assert_eq!(names, vec!["ridge_a", "ridge_b"]);
}

#[test]
fn test_serde_roundtrip() {
    let scene = make_scene();
    let json = serde_json::to_string(&scene).unwrap();
    let parsed: SceneGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, scene);
}
