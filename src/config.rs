use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::compositing::{OverlaySpec, StackComposition};
use crate::constants::*;
use crate::error::{Error, Result};
use crate::layout::Camera;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Ordered stack, first image on top.
    pub images: Vec<PathBuf>,
    pub image_aspect_ratio: f32,
    #[serde(with = "humantime_serde")]
    pub fade_duration: Duration,
    pub layer_spacing: f32,
    pub camera: CameraConfig,
    pub overlay: Option<OverlayConfig>,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CameraConfig {
    pub z: f32,
    pub fov: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverlayConfig {
    pub path: PathBuf,
    #[serde(default = "OverlayConfig::default_depth_offset")]
    pub depth_offset: f32,
    #[serde(default = "OverlayConfig::default_draw_order_margin")]
    pub draw_order_margin: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub background: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            image_aspect_ratio: IMAGE_ASPECT_RATIO,
            fade_duration: Duration::from_millis(FADE_DURATION_MS),
            layer_spacing: LAYER_SPACING,
            camera: CameraConfig::default(),
            overlay: None,
            window: WindowConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { z: CAMERA_Z, fov: CAMERA_FOV }
    }
}

impl OverlayConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            depth_offset: Self::default_depth_offset(),
            draw_order_margin: Self::default_draw_order_margin(),
        }
    }

    pub fn spec(&self) -> OverlaySpec {
        OverlaySpec {
            depth_offset: self.depth_offset,
            draw_order_margin: self.draw_order_margin,
        }
    }

    fn default_depth_offset() -> f32 {
        OVERLAY_DEPTH_OFFSET
    }

    fn default_draw_order_margin() -> i32 {
        OVERLAY_DRAW_ORDER_MARGIN
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            background: BACKGROUND_COLOR.to_string(),
        }
    }
}

impl From<CameraConfig> for Camera {
    fn from(c: CameraConfig) -> Self {
        Camera { z: c.z, fov: c.fov }
    }
}

/// Parses `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(raw: &str) -> Option<[u8; 3]> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

impl WindowConfig {
    pub fn background_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.background)
    }
}

impl Configuration {
    /// Makes relative image and overlay paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for image in self.images.iter_mut() {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.path.is_relative() {
                overlay.path = base.join(&overlay.path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::Config(msg));

        if self.images.is_empty() {
            return invalid("no images configured".into());
        }
        if !(self.image_aspect_ratio.is_finite() && self.image_aspect_ratio > 0.0) {
            return invalid(format!("image-aspect-ratio must be positive, got {}", self.image_aspect_ratio));
        }
        if !(self.layer_spacing.is_finite() && self.layer_spacing >= 0.0) {
            return invalid(format!("layer-spacing must not be negative, got {}", self.layer_spacing));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return invalid(format!("camera fov must be within (0, 180), got {}", self.camera.fov));
        }

        // Every plane must sit in front of the camera.
        let composition = self.composition();
        let nearest = composition.depth_offset(0).max(
            self.overlay.as_ref().map_or(f32::NEG_INFINITY, |o| o.depth_offset),
        );
        if !(self.camera.z > nearest) {
            return invalid(format!(
                "camera z {} must be in front of every layer (nearest at {})",
                self.camera.z, nearest
            ));
        }

        if self.window.width <= 0 || self.window.height <= 0 {
            return invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if self.window.fps == 0 {
            return invalid("window fps must be positive".into());
        }
        if self.window.background_rgb().is_none() {
            return invalid(format!("background must be #RRGGBB, got {:?}", self.window.background));
        }
        Ok(())
    }

    pub fn composition(&self) -> StackComposition {
        let composition = StackComposition::new(self.images.len()).with_layer_spacing(self.layer_spacing);
        match &self.overlay {
            Some(o) => composition.with_overlay(o.spec()),
            None => composition,
        }
    }
}

/// Loads a configuration file; relative paths inside it resolve against its directory.
pub fn from_yaml_file(path: &Path) -> Result<Configuration> {
    let raw = fs::read_to_string(path)?;
    let mut cfg: Configuration = serde_yaml::from_str(&raw)?;
    if let Some(base) = path.parent() {
        cfg.resolve_paths(base);
    }
    Ok(cfg)
}
