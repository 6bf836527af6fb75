mod utils;

use float_cmp::assert_approx_eq;
use ridgeline_chart::error::RidgelineChartError;
use ridgeline_chart::transform::MIN_SMOOTHING_POINTS;
use ridgeline_chart::{Normalization, RidgelineConfig, RidgelineRenderer, TimeKind};
use ridgeline_scales::color::Colormap;
use rstest::rstest;
use utils::{columns, day, hourly, make_batch, make_numeric_batch, north_south, three_groups};

fn max_by_group(frame: &ridgeline_chart::RidgelineFrame, group: &str, f: fn(&ridgeline_chart::RidgelineRow) -> f64) -> f64 {
    frame.group_rows(group).map(f).fold(f64::NEG_INFINITY, f64::max)
}

#[test]
fn test_overall_normalization_bounded_by_one() {
    let frame = RidgelineRenderer::default()
        .transform(&three_groups(), &columns())
        .unwrap();
    let max = frame.rows.iter().map(|r| r.normalized).fold(f64::NEG_INFINITY, f64::max);
    assert_approx_eq!(f64, max, 1.0);
    assert!(frame.rows.iter().all(|r| r.normalized <= 1.0));
    assert_eq!(frame.rows.len(), 60);
}

#[test]
fn test_group_normalization_peaks_at_one() {
    let config = RidgelineConfig::default().with_norm(Normalization::Group);
    let frame = RidgelineRenderer::new(config)
        .transform(&three_groups(), &columns())
        .unwrap();
    for group in ["Drenthe", "Utrecht", "Zeeland"] {
        assert_approx_eq!(f64, max_by_group(&frame, group, |r| r.normalized), 1.0);
    }
}

#[test]
fn test_north_south_scenario() {
    let frame = RidgelineRenderer::default()
        .transform(&north_south(), &columns())
        .unwrap();
    assert_approx_eq!(f64, max_by_group(&frame, "North", |r| r.normalized), 1.0);
    assert_approx_eq!(f64, max_by_group(&frame, "South", |r| r.normalized), 0.5);
    for (north, south) in frame.group_rows("North").zip(frame.group_rows("South")) {
        assert_eq!(north.time, south.time);
        assert_approx_eq!(f64, north.normalized, 2.0 * south.normalized);
    }
}

#[rstest]
#[case(3.0, vec![1.0 / 3.0, 2.0 / 3.0, 1.0])]
#[case(2.0, vec![0.5, 1.0, 1.5])]
fn test_offsets_follow_rank(#[case] scale: f64, #[case] expected: Vec<f64>) {
    let config = RidgelineConfig::default().with_scale(scale);
    let frame = RidgelineRenderer::new(config)
        .transform(&three_groups(), &columns())
        .unwrap();
    let groups: Vec<&String> = frame.ranks.keys().collect();
    assert_eq!(groups, vec!["Drenthe", "Utrecht", "Zeeland"]);
    for (group, offset) in groups.iter().zip(&expected) {
        assert!(frame.group_rows(group).all(|r| r.offset == *offset));
    }
}

#[test]
fn test_two_groups_scale_two() {
    let config = RidgelineConfig::default().with_scale(2.0);
    let frame = RidgelineRenderer::new(config)
        .transform(&north_south(), &columns())
        .unwrap();
    assert!(frame.group_rows("North").all(|r| r.offset == 0.5));
    assert!(frame.group_rows("South").all(|r| r.offset == 1.0));
}

#[test]
fn test_rows_sorted_and_coordinates_consistent() {
    let frame = RidgelineRenderer::default()
        .transform(&three_groups(), &columns())
        .unwrap();
    assert!(frame
        .rows
        .windows(2)
        .all(|w| (w[0].group.as_str(), w[0].time) <= (w[1].group.as_str(), w[1].time)));
    for row in &frame.rows {
        assert_eq!(row.top, row.smoothed + row.offset);
        assert_eq!(row.raw_top, row.normalized + row.offset);
    }
    assert_eq!(frame.time_kind, TimeKind::Temporal);
    assert_eq!(
        frame.time_domain,
        (day(2020, 3, 1) as f64, day(2020, 3, 20) as f64)
    );
}

#[test]
fn test_smoothed_never_negative() {
    // Spikes next to zeros pull the local linear fits below zero
    let start = day(2020, 3, 1);
    let rows: Vec<(i32, &str, Option<f64>)> = (0..30)
        .map(|i| {
            let v = if i % 10 == 5 { 100.0 } else { 0.0 };
            (start + i, "Limburg", Some(v))
        })
        .collect();
    let config = RidgelineConfig::default()
        .with_frac(0.2)
        .with_robustness_iterations(0);
    let frame = RidgelineRenderer::new(config)
        .transform(&make_batch(&rows), &columns())
        .unwrap();
    assert!(frame.rows.iter().all(|r| r.smoothed >= 0.0));
    assert!(frame.rows.iter().any(|r| r.smoothed > 0.0));
}

#[test]
fn test_draw_order_reverses_rank_and_colors_follow_rank() {
    let config = RidgelineConfig::default()
        .with_colormap(Colormap::Afmhot)
        .with_color_range(0.0, 0.6)
        .with_sort_groups(["Zeeland", "Drenthe", "Utrecht"]);
    let frame = RidgelineRenderer::new(config)
        .transform(&three_groups(), &columns())
        .unwrap();
    assert_eq!(frame.rank("Zeeland"), Some(0));
    assert_eq!(frame.rank("Utrecht"), Some(2));
    assert_eq!(frame.draw_order, vec!["Utrecht", "Drenthe", "Zeeland"]);

    let expected = Colormap::Afmhot.sample_many(&[0.0, 0.3, 0.6]);
    for (group, color) in ["Zeeland", "Drenthe", "Utrecht"].iter().zip(&expected) {
        let actual = frame.color(group).unwrap();
        for ch in 0..4 {
            assert_approx_eq!(f32, actual[ch], color[ch], epsilon = 1e-6);
        }
    }
}

#[test]
fn test_sort_groups_extra_labels_ignored() {
    let config = RidgelineConfig::default().with_sort_groups(["South", "Atlantis", "North"]);
    let frame = RidgelineRenderer::new(config)
        .transform(&north_south(), &columns())
        .unwrap();
    assert_eq!(frame.rank("South"), Some(0));
    assert_eq!(frame.rank("North"), Some(1));
    assert_eq!(frame.num_groups(), 2);
    assert_eq!(frame.colors.len(), 2);
}

#[test]
fn test_sort_groups_missing_group() {
    let config = RidgelineConfig::default().with_sort_groups(["South"]);
    let result = RidgelineRenderer::new(config).transform(&north_south(), &columns());
    assert!(matches!(result, Err(RidgelineChartError::DataShape(_))));
}

#[test]
fn test_idempotent() {
    let renderer = RidgelineRenderer::default();
    let batch = three_groups();
    let before = batch.clone();
    let first = renderer.transform(&batch, &columns()).unwrap();
    let second = renderer.transform(&batch, &columns()).unwrap();
    assert_eq!(first, second);
    assert_eq!(batch, before);
}

#[test]
fn test_single_row_group_passes_through() {
    let d = day(2020, 5, 1);
    let batch = make_batch(&[
        (d, "Flevoland", Some(3.0)),
        (d, "Gelderland", Some(6.0)),
        (d + 1, "Gelderland", Some(4.0)),
    ]);
    assert!(MIN_SMOOTHING_POINTS > 1);
    let frame = RidgelineRenderer::default().transform(&batch, &columns()).unwrap();
    let row = frame.group_rows("Flevoland").next().unwrap();
    assert_approx_eq!(f64, row.normalized, 0.5);
    assert_approx_eq!(f64, row.smoothed, 0.5);
}

#[test]
fn test_missing_values_carried_as_nan() {
    let d = day(2020, 5, 1);
    let batch = make_batch(&[
        (d, "Groningen", Some(2.0)),
        (d + 1, "Groningen", None),
        (d + 2, "Groningen", Some(4.0)),
        (d + 3, "Groningen", Some(3.0)),
    ]);
    let frame = RidgelineRenderer::default().transform(&batch, &columns()).unwrap();
    let rows: Vec<_> = frame.group_rows("Groningen").collect();
    assert!(rows[1].normalized.is_nan());
    assert!(rows[1].smoothed.is_nan());
    assert_approx_eq!(f64, rows[2].normalized, 1.0);
    assert!(rows[0].smoothed.is_finite());
}

#[test]
fn test_zero_reference_rejected() {
    let d = day(2020, 5, 1);
    let zeros = make_batch(&[(d, "Noord", Some(0.0)), (d + 1, "Noord", Some(0.0))]);
    let result = RidgelineRenderer::default().transform(&zeros, &columns());
    assert!(matches!(result, Err(RidgelineChartError::ZeroReference(ref g)) if g == "overall"));

    let mixed = make_batch(&[
        (d, "Noord", Some(1.0)),
        (d, "Zuid", Some(0.0)),
        (d + 1, "Zuid", Some(0.0)),
    ]);
    let config = RidgelineConfig::default().with_norm(Normalization::Group);
    let result = RidgelineRenderer::new(config).transform(&mixed, &columns());
    assert!(matches!(result, Err(RidgelineChartError::ZeroReference(ref g)) if g.contains("Zuid")));
}

#[test]
fn test_data_shape_errors() {
    let renderer = RidgelineRenderer::default();
    let empty = make_batch(&[]);
    assert!(matches!(
        renderer.transform(&empty, &columns()),
        Err(RidgelineChartError::DataShape(_))
    ));

    let d = day(2020, 5, 1);
    let all_missing = make_batch(&[(d, "Noord", None)]);
    assert!(matches!(
        renderer.transform(&all_missing, &columns()),
        Err(RidgelineChartError::DataShape(_))
    ));

    let wrong = ridgeline_chart::RidgelineColumns::new("date", "region", "cases");
    assert!(matches!(
        renderer.transform(&north_south(), &wrong),
        Err(RidgelineChartError::DataShape(_))
    ));
}

#[test]
fn test_config_errors_before_data() {
    let config = RidgelineConfig::default().with_frac(0.0);
    // Even an unusable dataset reports the configuration problem first
    let result = RidgelineRenderer::new(config).transform(&make_batch(&[]), &columns());
    assert!(matches!(result, Err(RidgelineChartError::InvalidConfig(_))));
}

#[rstest]
#[case(0)]
#[case(3)]
fn test_smoothing_invariant_to_time_shift(#[case] iterations: usize) {
    let renderer = RidgelineRenderer::new(
        RidgelineConfig::default()
            .with_frac(0.2)
            .with_robustness_iterations(iterations),
    );
    let near_zero = renderer.transform(&hourly(0), &columns()).unwrap();
    let epoch = renderer.transform(&hourly(1_600_000_000), &columns()).unwrap();
    assert_eq!(epoch.time_kind, TimeKind::Numeric);
    assert_eq!(near_zero.rows.len(), epoch.rows.len());
    for (a, b) in near_zero.rows.iter().zip(&epoch.rows) {
        assert_eq!(a.group, b.group);
        assert_eq!(b.time - a.time, 1_600_000_000.0);
        assert_approx_eq!(f64, a.smoothed, b.smoothed, epsilon = 1e-6);
    }
}

#[test]
fn test_linear_series_reproduced_at_epoch_seconds() {
    let start = 1_600_000_000i64;
    let rows: Vec<(i64, &str, Option<f64>)> = (0..30)
        .map(|i| (start + 86_400 * i, "Friesland", Some(10.0 + i as f64)))
        .collect();
    let config = RidgelineConfig::default()
        .with_frac(0.3)
        .with_robustness_iterations(0);
    let frame = RidgelineRenderer::new(config)
        .transform(&make_numeric_batch(&rows), &columns())
        .unwrap();
    assert_eq!(frame.time_domain, (start as f64, (start + 86_400 * 29) as f64));
    for row in &frame.rows {
        assert_approx_eq!(f64, row.smoothed, row.normalized, epsilon = 1e-6);
    }
}
