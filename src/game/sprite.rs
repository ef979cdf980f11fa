// Animated sprite drawn from a horizontal frame strip

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;

use crate::core::Rect;
use crate::engine::renderer::Canvas;

/// Ticks each animation frame stays on screen unless configured otherwise
pub const DEFAULT_HELD_FRAMES: u32 = 8;

/// A frame strip drawn at a position.
///
/// The image holds `frames` equally wide frames side by side. The strip
/// advances one frame every `held_frames` ticks and wraps after the last.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub position: Vec2,
    image: Option<Arc<RgbaImage>>,
    frames: usize,
    current_frame: usize,
    elapsed_ticks: u32,
    held_frames: u32,
    scale: f32,
    offset: Vec2,
}

impl Sprite {
    pub fn new(position: Vec2, image: Option<Arc<RgbaImage>>, frames: usize) -> Self {
        Self {
            position,
            image,
            frames: frames.max(1),
            current_frame: 0,
            elapsed_ticks: 0,
            held_frames: DEFAULT_HELD_FRAMES,
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Draw offset subtracted from the position
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_held_frames(mut self, held_frames: u32) -> Self {
        self.held_frames = held_frames.max(1);
        self
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_last_frame(&self) -> bool {
        self.current_frame + 1 >= self.frames
    }

    #[cfg(test)]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Switch to another strip. With `restart` the animation starts over
    /// from its first frame; otherwise the frame index is kept in range.
    pub fn set_animation(&mut self, image: Option<Arc<RgbaImage>>, frames: usize, restart: bool) {
        self.image = image;
        self.frames = frames.max(1);
        if restart {
            self.current_frame = 0;
            self.elapsed_ticks = 0;
        } else if self.current_frame >= self.frames {
            self.current_frame = 0;
        }
    }

    /// Jump to a frame of the current strip
    pub fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame.min(self.frames - 1);
    }

    /// Swap the image of the running animation (e.g. its mirrored copy)
    pub fn set_image(&mut self, image: Option<Arc<RgbaImage>>) {
        self.image = image;
    }

    /// Region of the current frame in the source image, and where it lands
    /// on the canvas
    pub fn frame_rects(&self) -> Option<(Rect, Rect)> {
        let image = self.image.as_ref()?;
        let frame_width = image.width() as f32 / self.frames as f32;
        let height = image.height() as f32;

        let src = Rect::new(frame_width * self.current_frame as f32, 0.0, frame_width, height);
        let dst = Rect::new(
            self.position.x - self.offset.x,
            self.position.y - self.offset.y,
            frame_width * self.scale,
            height * self.scale,
        );
        Some((src, dst))
    }

    /// Blit the current frame. Draws nothing without an image.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let (Some(image), Some((src, dst))) = (self.image.as_ref(), self.frame_rects()) {
            canvas.draw_image_region(image, src, dst);
        }
    }

    /// Count one tick and advance the frame every `held_frames` ticks
    pub fn animate_frames(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.wrapping_add(1);

        if self.elapsed_ticks % self.held_frames == 0 {
            if self.current_frame + 1 < self.frames {
                self.current_frame += 1;
            } else {
                self.current_frame = 0;
            }
        }
    }

    pub fn update(&mut self, canvas: &mut dyn Canvas) {
        self.draw(canvas);
        self.animate_frames();
    }
}
