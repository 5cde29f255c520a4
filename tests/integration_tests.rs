/*
 * Integration tests for Actuation Curve
 *
 * These tests drive the public API the way a front end would: seed a model,
 * drag points around, then export the evaluator.
 */

use actuation_curve::app::App;
use actuation_curve::config::{load_config_from, write_config, EditorConfig};
use actuation_curve::curves::{ControlPoint, CurveLimits, CurveModel};
use actuation_curve::emitter::{emit, emit_function, segments};
use actuation_curve::logger;
use actuation_curve::script::DragCommand;
use actuation_curve::CurveError;
use serial_test::serial;
use tempfile::TempDir;

fn diagonal() -> CurveModel {
    CurveModel::new(
        [(0.0, 0.0), (33.0, 33.0), (66.0, 66.0), (100.0, 100.0)],
        CurveLimits::default(),
    )
    .unwrap()
}

fn is_valid(points: &[ControlPoint]) -> bool {
    points.iter().all(|p| (0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y))
        && points.windows(2).all(|w| w[0].x < w[1].x && w[0].y < w[1].y)
}

#[test]
fn test_cascading_repair_scenario() {
    let mut model = diagonal();
    model.begin_drag(2).unwrap();
    let accepted = model.update_drag(66.0, 20.0).unwrap();
    model.end_drag();

    assert!(accepted.y >= model.points()[1].y + 1.0);
    assert_eq!(accepted.y, 34.0);
    assert!(is_valid(model.points()));
}

#[test]
fn test_wild_drag_sequence_keeps_invariants() {
    let mut model = diagonal();
    // Deterministic sweep over indices and far out-of-range coordinates
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let index = (seed % 4) as usize;
        let x = ((seed >> 8) % 1_000) as f64 - 450.0;
        let y = ((seed >> 24) % 1_000) as f64 - 450.0;

        model.begin_drag(index).unwrap();
        model.update_drag(x, y);
        model.end_drag();

        let pts = model.points();
        assert!(is_valid(pts), "invalid after dragging {} to ({}, {}): {:?}", index, x, y, pts);
        assert_eq!(pts[0].x, 0.0);
        assert_eq!(pts[3].x, 100.0);
    }
}

#[test]
fn test_endpoint_drag_keeps_x() {
    let mut model = diagonal();
    for index in [0, 3] {
        model.begin_drag(index).unwrap();
        for x in [-1000.0, 25.0, 50.0, 1000.0] {
            let before_x = model.points()[index].x;
            let p = model.update_drag(x, 40.0).unwrap();
            assert_eq!(p.x, before_x);
        }
        model.end_drag();
    }
    assert_eq!(model.points()[0].x, 0.0);
    assert_eq!(model.points()[3].x, 100.0);
}

#[test]
fn test_end_drag_without_drag() {
    let mut model = diagonal();
    let before = model.snapshot();
    model.end_drag();
    model.end_drag();
    assert_eq!(model.snapshot(), before);
    assert_eq!(model.update_drag(1.0, 1.0), None);
}

#[test]
fn test_invalid_index_is_error() {
    let mut model = diagonal();
    let err = model.begin_drag(4).unwrap_err();
    assert!(matches!(err, CurveError::IndexOutOfRange { index: 4, len: 4 }));
}

#[test]
fn test_emit_reference_points() {
    let points = [
        ControlPoint::new(0.0, 1.0),
        ControlPoint::new(25.0, 33.0),
        ControlPoint::new(75.0, 66.0),
        ControlPoint::new(100.0, 99.0),
    ];
    let lines = emit(&points).unwrap();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("if (x <= 25.000000) return 1.280000 * x"));
    assert!(lines[1].starts_with("else if (x <= 75.000000) return 0.660000 * x"));
    assert!(lines[2].starts_with("else if (x <= 100.000000) return 1.320000 * x"));
    assert_eq!(lines[3], "else return x;");

    for seg in segments(&points).unwrap() {
        let expected_b = points[seg.index].y - seg.slope * points[seg.index].x;
        assert!((seg.intercept - expected_b).abs() < 1e-12);
    }
}

#[test]
fn test_emit_rejects_equal_x() {
    let points = [ControlPoint::new(0.0, 0.0), ControlPoint::new(0.0, 50.0), ControlPoint::new(100.0, 100.0)];
    let err = emit(&points).unwrap_err();
    assert!(matches!(err, CurveError::DegenerateSegment { index: 0, .. }));
}

#[test]
fn test_emitted_function_matches_interpolation() {
    let mut model = diagonal();
    model.begin_drag(1).unwrap();
    model.update_drag(20.0, 60.0);
    model.end_drag();

    let segs = segments(model.points()).unwrap();
    for step in 0..=100 {
        let x = step as f64;
        let seg = segs.iter().find(|s| x <= s.end_x).unwrap();
        assert!((seg.eval(x) - model.value_at(x)).abs() < 1e-9, "mismatch at {}", x);
    }

    let lines = emit_function("curve", model.points()).unwrap();
    assert_eq!(lines.first().unwrap(), "double curve(double x) {");
    assert_eq!(lines.last().unwrap(), "}");
}

#[test]
fn test_config_driven_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let cfg = EditorConfig {
        points: vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(50.0, 50.0), ControlPoint::new(100.0, 100.0)],
        min_separation: 5.0,
        function_name: "actuation".to_string(),
        ..EditorConfig::default()
    };
    write_config(&path, &cfg).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let mut app = App::new(loaded).unwrap();
    let p = app.apply(&DragCommand { index: 1, x: 99.0, y: 2.0 }).unwrap();
    assert_eq!(p, ControlPoint::new(95.0, 5.0));

    let lines = app.export_lines().unwrap();
    assert_eq!(lines[0], "double actuation(double x) {");
    assert_eq!(lines.len(), 5);
}

#[test]
#[serial]
fn test_logged_session() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("logs.json");
    logger::init_logging(Some(log_path.as_path())).unwrap();

    let mut app = App::new(EditorConfig::default()).unwrap().with_logging(true);
    app.run_script(&["1:20,10".parse().unwrap(), "2:70,80".parse().unwrap()]).unwrap();
    app.export_lines().unwrap();
    logger::shutdown_logging();

    let text = std::fs::read_to_string(&log_path).unwrap();
    let records: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    let events: Vec<&str> = records.iter().map(|r| r["event"].as_str().unwrap()).collect();
    assert_eq!(events, vec!["drag_begin", "drag_end", "drag_begin", "drag_end", "export"]);

    let segments = records[4]["data"]["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["index"], 0);
    assert_eq!(segments[0]["end_x"], 20.0);
    assert_eq!(segments[0]["slope"], 0.5);
}
