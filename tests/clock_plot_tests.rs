//! Integration tests for the clock figure pipeline, from timing frame to
//! rendered output.

use polars::prelude::*;
use plotters::prelude::*;

use circadian_viz::transformations::columns;
use circadian_viz::{build_clock_figure, clock_plot, ClockPlotConfig, PlotError};

/// Two subjects over two dates, split across weekday/weekend, with two lux
/// thresholds per person-day. Sunrise 06:30 and sunset 18:30, stored as
/// timezone-naive timestamps.
fn timing_frame() -> DataFrame {
    let n = 8;
    let day_types = ["Weekday", "Weekday", "Weekend", "Weekend"].repeat(2);
    let sunrise = Series::new(columns::SUNRISE, &vec![390i64 * 60 * 1000; n])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let sunset = Series::new(columns::SUNSET, &vec![1110i64 * 60 * 1000; n])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    DataFrame::new(vec![
        Series::new(columns::UID, &["a", "a", "a", "a", "b", "b", "b", "b"]),
        Series::new(
            columns::DATE,
            &[
                "2024-06-03",
                "2024-06-03",
                "2024-06-08",
                "2024-06-08",
                "2024-06-03",
                "2024-06-03",
                "2024-06-08",
                "2024-06-08",
            ],
        ),
        Series::new(columns::THRESHOLD, &[10i64, 100, 10, 100, 10, 100, 10, 100]),
        Series::new("Day type", &day_types),
        sunrise,
        sunset,
        Series::new(
            columns::SLEEP_ONSET,
            &[1380.0f64, 1380.0, 1395.0, 1395.0, 1350.0, 1350.0, 1410.0, 1410.0],
        ),
        Series::new(
            columns::SLEEP_OFFSET,
            &[420.0f64, 420.0, 435.0, 435.0, 390.0, 390.0, 450.0, 450.0],
        ),
        Series::new(
            columns::FIRST_LIGHT,
            &[120.0f64, 180.0, 135.0, 195.0, 150.0, 210.0, 165.0, 225.0],
        ),
        Series::new(
            columns::LAST_LIGHT,
            &[960.0f64, 900.0, 975.0, 915.0, 990.0, 930.0, 1005.0, 945.0],
        ),
    ])
    .unwrap()
}

#[test]
fn test_one_face_per_group_in_appearance_order() {
    let figure =
        build_clock_figure(&timing_frame(), "Day type", &ClockPlotConfig::default()).unwrap();
    assert_eq!(figure.faces.len(), 2);
    assert_eq!(figure.faces[0].group_value, "Weekday");
    assert_eq!(figure.faces[1].group_value, "Weekend");
    assert!(figure.faces[0].title.starts_with("Day type=Weekday:"));
}

#[test]
fn test_explicit_thresholds_set_band_count() {
    let config = ClockPlotConfig {
        thresholds: vec![10.0],
        ..Default::default()
    };
    let figure = build_clock_figure(&timing_frame(), "Day type", &config).unwrap();
    // one threshold: onset + offset bands plus the two sleep bands
    for face in &figure.faces {
        assert_eq!(face.bands.len(), 4);
    }
}

#[test]
fn test_faces_use_only_their_groups_rows() {
    let figure =
        build_clock_figure(&timing_frame(), "Day type", &ClockPlotConfig::default()).unwrap();
    // each group covers one date per subject
    assert!(figure.faces[0]
        .title
        .ends_with("2 subjects, 1 dates, 2 person-days"));
    assert!(figure.faces[1]
        .title
        .ends_with("2 subjects, 1 dates, 2 person-days"));
}

#[test]
fn test_grouping_by_uid_uses_subject_values() {
    let figure =
        build_clock_figure(&timing_frame(), columns::UID, &ClockPlotConfig::default()).unwrap();
    assert_eq!(figure.faces.len(), 2);
    assert!(figure.faces[0].title.starts_with("UID=a:"));
}

#[test]
fn test_unknown_group_column_is_schema_error() {
    let err = build_clock_figure(&timing_frame(), "Cohort", &ClockPlotConfig::default())
        .unwrap_err();
    match err {
        PlotError::Schema(message) => assert!(message.contains("Cohort")),
        other => panic!("expected schema error, got {other}"),
    }
}

#[test]
fn test_timezone_enables_night_shading_on_every_face() {
    let config = ClockPlotConfig {
        timezone: Some("America/Denver".to_string()),
        ..Default::default()
    };
    let figure = build_clock_figure(&timing_frame(), "Day type", &config).unwrap();
    for face in &figure.faces {
        let night = face.night.as_ref().unwrap();
        assert_eq!(night.pre_dawn.len(), 390);
        assert_eq!(night.post_dusk.len(), 330);
    }
}

#[test]
fn test_renders_to_svg_with_titles_and_legend() {
    let figure =
        build_clock_figure(&timing_frame(), "Day type", &ClockPlotConfig::default()).unwrap();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (640, 1040)).into_drawing_area();
        circadian_viz::render::clock::draw(&figure, &root).unwrap();
        root.present().unwrap();
    }
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Day type=Weekday"));
    assert!(svg.contains("Day type=Weekend"));
    assert!(svg.contains("Sleep "));
    // hour labels on the dial
    assert!(svg.contains("12:00"));
}

#[test]
fn test_clock_plot_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.svg");
    let figure =
        clock_plot(&timing_frame(), "Day type", &ClockPlotConfig::default(), &path).unwrap();
    assert_eq!(figure.faces.len(), 2);
    let written = std::fs::metadata(&path).unwrap();
    assert!(written.len() > 0);
}
