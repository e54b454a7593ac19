use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use image_stack::config::{self, Configuration};
use image_stack::Error;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
images: [/slides/1.png, /slides/2.png]
image-aspect-ratio: 1.5
fade-duration: 250ms
layer-spacing: 0.2
camera:
  z: 9
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.images, vec![PathBuf::from("/slides/1.png"), PathBuf::from("/slides/2.png")]);
    assert!((cfg.image_aspect_ratio - 1.5).abs() < f32::EPSILON);
    assert_eq!(cfg.fade_duration, Duration::from_millis(250));
    assert!((cfg.layer_spacing - 0.2).abs() < f32::EPSILON);
    assert_eq!(cfg.camera.z, 9.0);
    assert_eq!(cfg.camera.fov, 60.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn parse_overlay_with_defaults() {
    let yaml = r#"
images: [a.png]
overlay:
  path: frame.png
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let overlay = cfg.overlay.unwrap();
    assert_eq!(overlay.path, PathBuf::from("frame.png"));
    assert!((overlay.depth_offset - 0.01).abs() < f32::EPSILON);
    assert_eq!(overlay.draw_order_margin, 10);
}

#[test]
fn file_paths_resolve_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack.yaml");
    fs::write(
        &path,
        "images: [1.png, 2.png]\noverlay:\n  path: top.png\nwindow:\n  background: \"#102030\"\n",
    )
    .unwrap();

    let cfg = config::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.images[0], dir.path().join("1.png"));
    assert_eq!(cfg.overlay.as_ref().unwrap().path, dir.path().join("top.png"));
    assert_eq!(cfg.window.background_rgb(), Some([0x10, 0x20, 0x30]));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        "images: [a.png]\nimage-aspect-ratio: 0",
        "images: [a.png]\nlayer-spacing: -1",
        "images: [a.png]\ncamera:\n  fov: 0",
        "images: [a.png]\ncamera:\n  z: -2",
        "images: [a.png]\nwindow:\n  fps: 0",
        "images: [a.png]\nwindow:\n  background: teal",
    ];
    for yaml in cases {
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(cfg.validate(), Err(Error::Config(_))), "accepted: {yaml}");
    }
}

#[test]
fn unknown_duration_format_fails_to_parse() {
    let result: Result<Configuration, _> = serde_yaml::from_str("fade-duration: soon");
    assert!(result.is_err());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = config::from_yaml_file(&dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}
