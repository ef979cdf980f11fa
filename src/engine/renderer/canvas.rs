// The 2D drawing surface the game draws on

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;

use crate::core::Rect;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const RED: Color = Color::rgba(200, 30, 30, 255);
    pub const GREEN: Color = Color::rgba(40, 180, 60, 255);
    pub const GREY: Color = Color::rgba(128, 128, 128, 255);
    /// Translucent white wash painted between the background and the fighters
    pub const OVERLAY: Color = Color::rgba(255, 255, 255, 38);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear RGBA for the sRGB render target; alpha is kept as is
    pub fn to_linear(self) -> [f32; 4] {
        fn decode(channel: u8) -> f32 {
            let c = channel as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b), self.a as f32 / 255.0]
    }
}

/// Horizontal anchoring of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Drawing operations the game needs from a rendering surface.
///
/// Coordinates are logical canvas pixels with the origin top-left.
pub trait Canvas {
    /// Logical size in pixels
    fn size(&self) -> (u32, u32);

    /// Wipe the whole surface with one colour
    fn clear(&mut self, color: Color);

    /// Fill a rectangle, blending when the colour is translucent
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw the `src` region of `image` into `dst`, scaling as needed
    fn draw_image_region(&mut self, image: &Arc<RgbaImage>, src: Rect, dst: Rect);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, line_width: f32, color: Color);

    /// Draw a single line of text. `anchor` is the top of the text line;
    /// `size` is the cap height in pixels.
    fn fill_text(&mut self, text: &str, anchor: Vec2, size: f32, align: TextAlign, color: Color);

    /// Bounds of the whole surface
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::new(0.0, 0.0, width as f32, height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_colour_endpoints() {
        for channel in Color::WHITE.to_linear() {
            assert_relative_eq!(channel, 1.0, epsilon = 1e-5);
        }
        assert_eq!(Color::rgba(0, 0, 0, 0).to_linear(), [0.0; 4]);

        let grey = Color::GREY.to_linear();
        assert_relative_eq!(grey[0], 0.2158, epsilon = 1e-3);
        assert_relative_eq!(Color::OVERLAY.to_linear()[3], 38.0 / 255.0);
    }
}
