use bevy_lindenmayer::{LSystemError, TurtleConfig};

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = TurtleConfig::from_toml_str("hue_step = 12.0\ncone_sides = 7\n").unwrap();

    assert_eq!(config.hue_step, 12.0);
    assert_eq!(config.cone_sides, 7);
    assert_eq!(config.max_triangles, TurtleConfig::default().max_triangles);
    assert_eq!(config.initial_hsv, [26.3, 0.7, 0.315]);
}

#[test]
fn test_empty_toml_is_default() {
    let config = TurtleConfig::from_toml_str("").unwrap();
    assert_eq!(config, TurtleConfig::default());
}

#[test]
fn test_invalid_toml_is_reported() {
    let err = TurtleConfig::from_toml_str("cone_sides = \"many\"").unwrap_err();
    assert!(matches!(err, LSystemError::Config(_)), "got {err:?}");
}

#[test]
fn test_missing_config_file() {
    let path = std::env::temp_dir().join(format!("lsys-{}-missing.toml", std::process::id()));
    assert!(matches!(
        TurtleConfig::load(&path),
        Err(LSystemError::Io { .. })
    ));
}

#[test]
fn test_sides_are_clamped() {
    assert_eq!(TurtleConfig::default().sides(), 11);
    assert_eq!(TurtleConfig::default().with_cone_sides(0).sides(), 3);
    assert_eq!(TurtleConfig::default().with_cone_sides(500).sides(), 64);
}
