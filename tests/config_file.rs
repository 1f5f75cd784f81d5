use scribbler::{ConfigError, ConfigLayer, Rgba, ScribblerConfig, StackLayer};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let layer = ConfigLayer::load_from_file(&path).unwrap();
    assert_eq!(layer, ConfigLayer::defaults());
    assert!(path.exists());

    let reloaded = ConfigLayer::load_from_file(&path).unwrap();
    assert_eq!(reloaded, layer);
}

#[test]
fn file_values_sit_between_env_and_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "stroke_color = \"#00ff00\"\nline_width = 6.0\nactive_layer = \"top\"\n",
    )
    .unwrap();

    let file = ConfigLayer::load_from_file(&path).unwrap();
    let env = ConfigLayer::from_vars([("SCRIBBLER_LINE_WIDTH", "1.5")]).unwrap();
    let config = ScribblerConfig::resolve(&[env, file]).unwrap();

    assert_eq!(config.line_width, 1.5);
    assert_eq!(config.stroke_color, Rgba::new(0, 255, 0, 255));
    assert_eq!(config.active_layer, StackLayer::Top);
    assert_eq!(config.inactive_layer, StackLayer::Bottom);
    assert_eq!(config.surface_id, "scribbler");
}

#[test]
fn unknown_keys_are_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "stroke_colour = \"red\"\n").unwrap();

    let err = ConfigLayer::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn saved_layer_round_trips_partial_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let layer = ConfigLayer {
        toggle_key: Some("F12".into()),
        ..Default::default()
    };
    layer.save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("toggle_key"));
    assert!(!text.contains("stroke_color"));
    assert_eq!(ConfigLayer::load_from_file(&path).unwrap(), layer);
}
