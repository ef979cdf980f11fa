use crate::core::Rect;
use crate::engine::renderer::{Canvas, Color};

const BODY_COLOR: Color = Color::rgba(0, 160, 255, 255);
const HIT_BOX_COLOR: Color = Color::rgba(255, 60, 60, 255);
const LINE_WIDTH: f32 = 2.0;

/// Outlines fighter bodies and attack boxes on top of the frame
#[derive(Debug, Default)]
pub struct DebugRenderer {
    enabled: bool,
}

impl DebugRenderer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        log::info!(
            "Collision debug overlay {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
    }

    /// Draw a body box and its attack box
    pub fn draw(&self, canvas: &mut dyn Canvas, body: Rect, attack_box: Rect) {
        if !self.enabled {
            return;
        }
        canvas.stroke_round_rect(body, 0.0, LINE_WIDTH, BODY_COLOR);
        canvas.stroke_round_rect(attack_box, 0.0, LINE_WIDTH, HIT_BOX_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::canvas::testing::{DrawCall, RecordingCanvas};

    #[test]
    fn test_disabled_overlay_draws_nothing() {
        let mut canvas = RecordingCanvas::new(1024, 576);
        let debug = DebugRenderer::new(false);
        debug.draw(&mut canvas, Rect::default(), Rect::default());
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_enabled_overlay_outlines_both_boxes() {
        let mut canvas = RecordingCanvas::new(1024, 576);
        let mut debug = DebugRenderer::default();
        debug.toggle();
        debug.draw(
            &mut canvas,
            Rect::new(0.0, 0.0, 100.0, 150.0),
            Rect::new(70.0, 50.0, 150.0, 80.0),
        );

        let strokes = canvas
            .calls
            .iter()
            .filter(|call| matches!(call, DrawCall::StrokeRoundRect { .. }))
            .count();
        assert_eq!(strokes, 2);
    }
}
