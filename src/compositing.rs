//! Per-layer opacity, draw order and depth for the image stack.
//!
//! A flat stack has zero layer spacing; a layered stack pushes image `i` back
//! to `-i * spacing`. An optional overlay always draws last and fully opaque.

use crate::sequencer::Sequencer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySpec {
    pub depth_offset: f32,
    pub draw_order_margin: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Stack(usize),
    Overlay,
}

/// One plane to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub opacity: f32,
    pub draw_order: i32,
    pub depth_offset: f32,
}

/// Opacity of stack image `index` for the given sequence position.
///
/// The in-flight flag, not the progress value, decides whether the next image
/// is fading in, so at progress 0 the next image is still hidden.
pub fn opacity(index: usize, current: usize, fade_progress: f32, transitioning: bool) -> f32 {
    if index < current {
        0.0
    } else if index == current {
        if transitioning { 1.0 - fade_progress } else { 1.0 }
    } else if index == current + 1 && transitioning {
        fade_progress
    } else {
        0.0
    }
}

/// Earlier images get higher hints so they composite on top.
pub fn draw_order_hint(index: usize, len: usize) -> i32 {
    len as i32 - index as i32
}

#[derive(Debug, Clone)]
pub struct StackComposition {
    len: usize,
    layer_spacing: f32,
    overlay: Option<OverlaySpec>,
}

impl StackComposition {
    pub fn new(len: usize) -> Self {
        Self { len, layer_spacing: 0.0, overlay: None }
    }

    pub fn with_layer_spacing(mut self, spacing: f32) -> Self {
        self.layer_spacing = spacing;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlaySpec) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn overlay(&self) -> Option<OverlaySpec> {
        self.overlay
    }

    pub fn depth_offset(&self, index: usize) -> f32 {
        -(index as f32) * self.layer_spacing
    }

    pub fn overlay_draw_order(&self) -> Option<i32> {
        self.overlay
            .map(|o| draw_order_hint(0, self.len) + o.draw_order_margin)
    }

    pub fn stack_layer(&self, index: usize, sequencer: &Sequencer) -> Layer {
        Layer {
            kind: LayerKind::Stack(index),
            opacity: opacity(
                index,
                sequencer.current_index(),
                sequencer.fade_progress(),
                sequencer.is_transitioning(),
            ),
            draw_order: draw_order_hint(index, self.len),
            depth_offset: self.depth_offset(index),
        }
    }

    /// Layers to draw this frame, in draw sequence (ascending hint).
    ///
    /// Fully transparent stack layers are left out; the overlay comes last.
    pub fn layers(&self, sequencer: &Sequencer) -> Vec<Layer> {
        let mut layers: Vec<Layer> = (0..self.len)
            .map(|i| self.stack_layer(i, sequencer))
            .filter(|layer| layer.opacity > 0.0)
            .collect();

        if let (Some(overlay), Some(draw_order)) = (self.overlay, self.overlay_draw_order()) {
            layers.push(Layer {
                kind: LayerKind::Overlay,
                opacity: 1.0,
                draw_order,
                depth_offset: overlay.depth_offset,
            });
        }

        layers.sort_by_key(|layer| layer.draw_order);
        layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn idle_next_layer_stays_hidden_at_zero_progress() {
        assert_eq!(opacity(1, 0, 0.0, false), 0.0);
        assert_eq!(opacity(1, 0, 0.0, true), 0.0);
        assert_eq!(opacity(0, 0, 0.0, true), 1.0);
    }

    #[test]
    fn passed_and_future_layers_are_hidden() {
        assert_eq!(opacity(0, 2, 0.5, true), 0.0);
        assert_eq!(opacity(4, 2, 0.5, true), 0.0);
    }

    #[test]
    fn depth_offsets_step_back() {
        let composition = StackComposition::new(3).with_layer_spacing(0.5);
        assert_eq!(composition.depth_offset(0), 0.0);
        assert_eq!(composition.depth_offset(2), -1.0);
    }

    #[test]
    fn layers_sorted_with_current_last_during_fade() {
        let composition = StackComposition::new(4);
        let mut seq = Sequencer::new(4, Duration::from_millis(400));
        let t0 = Instant::now();
        seq.advance();
        seq.tick(t0);
        seq.tick(t0 + Duration::from_millis(100));

        let layers = composition.layers(&seq);
        let kinds: Vec<LayerKind> = layers.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LayerKind::Stack(1), LayerKind::Stack(0)]);
        assert!((layers[0].opacity - 0.25).abs() < 1e-6);
        assert!((layers[1].opacity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn overlay_draws_last() {
        let composition = StackComposition::new(3)
            .with_layer_spacing(1.0)
            .with_overlay(OverlaySpec { depth_offset: 0.01, draw_order_margin: 10 });
        let seq = Sequencer::new(3, Duration::from_millis(400));

        let layers = composition.layers(&seq);
        let last = layers.last().unwrap();
        assert_eq!(last.kind, LayerKind::Overlay);
        assert_eq!(last.opacity, 1.0);
        assert_eq!(last.draw_order, 13);
    }
}
