#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn no_vars_gives_defaults() {
    let cfg = EditorConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.zoom.min_scale, 0.1);
    assert_eq!(cfg.zoom.max_scale, 3.0);
    assert_eq!(cfg.drag.threshold_px, 3.0);
    assert_eq!(cfg.drag.release_delay_ms, 50.0);
    assert_eq!(cfg.resize.release_delay_ms, 100.0);
    assert_eq!(cfg.resize.min_size, Size::new(300.0, 200.0));
    assert_eq!(cfg.fit_padding, 100.0);
    assert_eq!(cfg.header_inset, 64.0);
}

#[test]
fn overrides_are_parsed() {
    let cfg = EditorConfig::from_vars(vars(&[
        ("FLOORPLAN_MAX_SCALE", "4"),
        ("FLOORPLAN_DRAG_THRESHOLD", " 5.5 "),
        ("FLOORPLAN_MIN_ROOM_WIDTH", "250"),
        ("FLOORPLAN_FLOOR_MAX_WIDTH", "4000"),
        ("FLOORPLAN_HEADER_INSET", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.zoom.max_scale, 4.0);
    assert_eq!(cfg.drag.threshold_px, 5.5);
    assert_eq!(cfg.resize.min_size.width, 250.0);
    assert_eq!(cfg.floor_limits.max_width, 4000.0);
    assert_eq!(cfg.header_inset, 0.0);
}

#[test]
fn garbage_number_is_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_GRID_SIZE", "forty")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: "FLOORPLAN_GRID_SIZE", value: "forty".into() });
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn non_finite_number_is_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_ZOOM_FACTOR", "inf")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}

#[test]
fn inverted_scale_range_is_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_MIN_SCALE", "5")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange(_)));
    assert_eq!(err.error_code(), "E_CONFIG_RANGE");
}

#[test]
fn zero_min_scale_is_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_MIN_SCALE", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange(_)));
}

#[test]
fn unordered_tiers_are_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_TIER_TEXT", "0.9")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange(_)));
}

#[test]
fn inverted_floor_limits_are_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_FLOOR_MIN_HEIGHT", "5000")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange(_)));
}

#[test]
fn negative_padding_is_rejected() {
    let err = EditorConfig::from_vars(vars(&[("FLOORPLAN_ROOM_PADDING", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange(msg) if msg.contains("room padding")));
}

// =============================================================================
// Environment reads
// =============================================================================

#[test]
fn unset_variable_falls_back_to_default() {
    assert_eq!(env_value(Err(VarError::NotPresent)), None);
    assert_eq!(env_value(Ok("2.5".into())), Some("2.5".to_string()));
}

#[cfg(unix)]
#[test]
fn non_utf8_variable_is_rejected_not_ignored() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'4', 0xff]);
    let value = env_value(Err(VarError::NotUnicode(raw)));
    assert_eq!(value.as_deref(), Some("4\u{fffd}"));

    let err = EditorConfig::from_vars(|key| (key == "FLOORPLAN_MAX_SCALE").then(|| value.clone()).flatten())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "FLOORPLAN_MAX_SCALE", .. }));
}
