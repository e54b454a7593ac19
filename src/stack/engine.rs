use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use raylib::prelude::*;
use tracing::{info, warn};

use crate::compositing::{Layer, LayerKind, StackComposition};
use crate::config::Configuration;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::layout::{compute_plane_size, Camera, Viewport};
use crate::sequencer::{Sequencer, Tick};
use crate::texture_loader::load_texture_with_exif_rotation;

pub struct StackEngine {
    config: Configuration,
    camera: Camera,
    background: Color,

    textures: Vec<Texture2D>,
    overlay: Option<Texture2D>,

    sequencer: Sequencer,
    composition: StackComposition,

    reported_layout_errors: HashSet<u8>,
}

impl StackEngine {
    pub fn new(config: Configuration) -> Self {
        let [r, g, b] = config.window.background_rgb().unwrap_or([0, 0, 0]);
        Self {
            camera: config.camera.into(),
            background: Color::new(r, g, b, 255),
            textures: Vec::new(),
            overlay: None,
            sequencer: Sequencer::new(0, config.fade_duration),
            composition: StackComposition::new(0),
            reported_layout_errors: HashSet::new(),
            config,
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    fn texture_for(&self, kind: LayerKind) -> Option<&Texture2D> {
        match kind {
            LayerKind::Stack(i) => self.textures.get(i),
            LayerKind::Overlay => self.overlay.as_ref(),
        }
    }

    fn tint(layer: &Layer) -> Color {
        Color::new(255, 255, 255, (layer.opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Engine for StackEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, paths: Vec<PathBuf>) -> Result<usize> {
        for path in &paths {
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => self.textures.push(texture),
                Err(e) => warn!(error = %e, "skipping image"),
            }
        }
        if self.textures.is_empty() {
            let dir = paths
                .first()
                .and_then(|p| p.parent())
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            return Err(Error::NoImages(dir));
        }

        let mut composition = StackComposition::new(self.textures.len())
            .with_layer_spacing(self.config.layer_spacing);

        if let Some(overlay) = &self.config.overlay {
            match load_texture_with_exif_rotation(rl, thread, &overlay.path) {
                Ok(texture) => {
                    self.overlay = Some(texture);
                    composition = composition.with_overlay(overlay.spec());
                }
                Err(e) => warn!(error = %e, "overlay disabled"),
            }
        }

        self.composition = composition;
        self.sequencer = Sequencer::new(self.textures.len(), self.config.fade_duration);
        info!(
            images = self.textures.len(),
            overlay = self.overlay.is_some(),
            layer_spacing = self.config.layer_spacing,
            "image stack ready"
        );
        Ok(self.textures.len())
    }

    fn handle_input(&mut self, rl: &RaylibHandle) {
        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            || rl.is_gesture_detected(Gesture::GESTURE_TAP);
        if clicked {
            self.sequencer.advance();
        }
    }

    fn render_frame(&mut self, now: Instant, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if let Tick::Committed(index) = self.sequencer.tick(now) {
            info!(index, total = self.sequencer.len(), "showing image");
        }

        let viewport = Viewport::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let layers = self.composition.layers(&self.sequencer);

        let camera = Camera3D::perspective(
            Vector3::new(0.0, 0.0, self.camera.z),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            self.camera.fov,
        );

        let mut d = rl.begin_drawing(thread);
        d.clear_background(self.background);

        let mut d3 = d.begin_mode3D(camera);
        // Draw order, not depth, decides which plane ends up on top.
        // EndMode3D flushes the batch before depth testing comes back.
        unsafe { raylib::ffi::rlDisableDepthTest() };

        for layer in &layers {
            let size = match compute_plane_size(viewport, self.camera, self.config.image_aspect_ratio, layer.depth_offset) {
                Ok(size) => size,
                Err(e) => {
                    if self.reported_layout_errors.insert(e.kind()) {
                        warn!(error = %e, "layer not drawn");
                    }
                    continue;
                }
            };
            let Some(texture) = self.texture_for(layer.kind) else {
                continue;
            };

            d3.draw_billboard_rec(
                camera,
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Vector3::new(0.0, 0.0, layer.depth_offset),
                Vector2::new(size.width, size.height),
                Self::tint(layer),
            );
        }
    }
}
