use std::{fs, path::PathBuf};

use gesturekit::GestureConfig;
use touch_replay::{load_config, parse_expected_kinds, parse_trace, replay};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn replay_kinds(config: GestureConfig, trace: &str) -> Vec<&'static str> {
    let rows = parse_trace(&fixture(trace)).expect("fixture trace should parse");
    replay(config, &rows)
        .iter()
        .map(|emitted| emitted.event.name())
        .collect()
}

fn assert_fixture(trace: &str, expect: &str) {
    let expected = parse_expected_kinds(&fixture(expect)).expect("expect file should parse");
    assert_eq!(
        replay_kinds(GestureConfig::default(), trace),
        expected,
        "{trace} replayed to an unexpected sequence"
    );
}

#[test]
fn tap_trace() {
    assert_fixture("tap.csv", "tap.expect");
}

#[test]
fn double_tap_trace() {
    assert_fixture("double_tap.csv", "double_tap.expect");
}

#[test]
fn press_trace() {
    assert_fixture("press.csv", "press.expect");
}

#[test]
fn press_then_pan_trace() {
    assert_fixture("press_then_pan.csv", "press_then_pan.expect");
}

#[test]
fn flick_trace() {
    assert_fixture("flick.csv", "flick.expect");
}

#[test]
fn pinch_trace() {
    assert_fixture("pinch.csv", "pinch.expect");
}

#[test]
fn cancelled_touch_emits_nothing() {
    assert_fixture("cancel.csv", "cancel.expect");
}

#[test]
fn profile_narrows_flick_window() {
    let config = load_config(&fixture("slow_flick.toml")).expect("profile should load");
    assert_eq!(config.flick_max_ms, 50);
    assert_eq!(config.press_delay_ms, GestureConfig::default().press_delay_ms);

    let expected = parse_expected_kinds(&fixture("flick_slow.expect")).expect("expect file");
    assert_eq!(replay_kinds(config, "flick.csv"), expected);
}

#[test]
fn invalid_profile_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "move_threshold_px = -3.0\n").expect("write profile");

    let err = load_config(&path).expect_err("negative threshold must be rejected");
    assert!(format!("{err:#}").contains("invalid gesture profile"));
}

#[test]
fn unknown_expected_kind_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.expect");
    fs::write(&path, "tap\nswipe\n").expect("write expect file");

    let err = parse_expected_kinds(&path).expect_err("swipe is not a gesture kind");
    assert!(err.to_string().contains("bad.expect:2"));
}
