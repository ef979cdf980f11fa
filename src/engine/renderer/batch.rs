// Sprite batch: the runtime canvas
//
// Every drawing call becomes one textured quad. Quads are recorded in draw
// order and grouped into runs that share a texture; the renderer uploads the
// whole batch and issues one draw per run.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;

use super::canvas::{Canvas, Color, TextAlign};
use super::glyphs::GlyphAtlas;
use super::vertex::Vertex;
use crate::core::Rect;

/// Texture a run of quads samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// 1x1 white texel for solid fills
    White,
    Glyphs,
    /// A sprite image, identified by its shared allocation
    Image(usize),
}

/// Consecutive indices drawn with one texture
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureKey,
    pub indices: Range<u32>,
}

/// Batch length at some point of the frame, for [`SpriteBatch::rewind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMark {
    vertices: usize,
    indices: usize,
    commands: usize,
}

/// Rounded outline carried by a quad: corner radius and stroke width
#[derive(Debug, Clone, Copy)]
struct Shape {
    radius: f32,
    stroke: f32,
}

pub struct SpriteBatch {
    width: u32,
    height: u32,
    clear_color: Color,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    commands: Vec<DrawCommand>,
    images: HashMap<TextureKey, Arc<RgbaImage>>,
    glyphs: GlyphAtlas,
}

impl SpriteBatch {
    pub fn new(width: u32, height: u32, glyphs: GlyphAtlas) -> Self {
        Self {
            width,
            height,
            clear_color: Color::BLACK,
            vertices: Vec::new(),
            indices: Vec::new(),
            commands: Vec::new(),
            images: HashMap::new(),
            glyphs,
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Source image of an [`TextureKey::Image`] drawn this frame
    pub fn image(&self, key: TextureKey) -> Option<&Arc<RgbaImage>> {
        self.images.get(&key)
    }

    pub fn glyph_image(&self) -> &RgbaImage {
        self.glyphs.image()
    }

    pub fn mark(&self) -> BatchMark {
        BatchMark {
            vertices: self.vertices.len(),
            indices: self.indices.len(),
            commands: self.commands.len(),
        }
    }

    /// Drop everything drawn after `mark`
    pub fn rewind(&mut self, mark: BatchMark) {
        self.vertices.truncate(mark.vertices);
        self.indices.truncate(mark.indices);
        self.commands.truncate(mark.commands);
        if let Some(last) = self.commands.last_mut() {
            last.indices.end = last.indices.end.min(mark.indices as u32);
        }
    }

    fn push_quad(
        &mut self,
        texture: TextureKey,
        dst: Rect,
        uv: Rect,
        color: Color,
        shape: Option<Shape>,
    ) {
        if dst.width <= 0.0 || dst.height <= 0.0 {
            return;
        }

        let color = color.to_linear();
        let half = Vec2::new(dst.width, dst.height) / 2.0;
        let centre = Vec2::new(dst.x, dst.y) + half;
        let corners = [
            (Vec2::new(dst.x, dst.y), Vec2::new(uv.x, uv.y)),
            (Vec2::new(dst.right(), dst.y), Vec2::new(uv.right(), uv.y)),
            (Vec2::new(dst.right(), dst.bottom()), Vec2::new(uv.right(), uv.bottom())),
            (Vec2::new(dst.x, dst.bottom()), Vec2::new(uv.x, uv.bottom())),
        ];

        let base = self.vertices.len() as u32;
        for (position, tex_coords) in corners {
            let mut vertex = Vertex::new(position, tex_coords, color);
            if let Some(shape) = shape {
                vertex.local = (position - centre).to_array();
                vertex.half_size = half.to_array();
                vertex.shape = [shape.radius.min(half.x).min(half.y).max(0.0), shape.stroke];
            }
            self.vertices.push(vertex);
        }

        let start = self.indices.len() as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = self.indices.len() as u32;

        match self.commands.last_mut() {
            Some(last) if last.texture == texture && last.indices.end == start => {
                last.indices.end = end;
            }
            _ => self.commands.push(DrawCommand {
                texture,
                indices: start..end,
            }),
        }
    }
}

/// Texture coordinates of a pixel region of an image
fn normalized(region: Rect, width: u32, height: u32) -> Rect {
    Rect::new(
        region.x / width as f32,
        region.y / height as f32,
        region.width / width as f32,
        region.height / height as f32,
    )
}

const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

impl Canvas for SpriteBatch {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.images.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_quad(TextureKey::White, rect, FULL_UV, color, None);
    }

    fn draw_image_region(&mut self, image: &Arc<RgbaImage>, src: Rect, dst: Rect) {
        let (width, height) = image.dimensions();
        if src.width <= 0.0 || src.height <= 0.0 || width == 0 || height == 0 {
            return;
        }

        let key = TextureKey::Image(Arc::as_ptr(image) as usize);
        self.images.entry(key).or_insert_with(|| Arc::clone(image));
        self.push_quad(key, dst, normalized(src, width, height), Color::WHITE, None);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let shape = Shape { radius, stroke: 0.0 };
        self.push_quad(TextureKey::White, rect, FULL_UV, color, Some(shape));
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, line_width: f32, color: Color) {
        if line_width <= 0.0 {
            return;
        }
        let shape = Shape {
            radius,
            stroke: line_width,
        };
        self.push_quad(TextureKey::White, rect, FULL_UV, color, Some(shape));
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, size: f32, align: TextAlign, color: Color) {
        let (width, height) = self.glyphs.image().dimensions();
        for quad in self.glyphs.layout(text, anchor, size, align) {
            let uv = normalized(quad.src, width, height);
            self.push_quad(TextureKey::Glyphs, quad.dst, uv, color, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgba;

    fn batch() -> SpriteBatch {
        SpriteBatch::new(1024, 576, GlyphAtlas::hud().unwrap())
    }

    fn strip() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(400, 100, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_fill_rect_is_one_white_quad() {
        let mut batch = batch();
        batch.fill_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Color::RED);

        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.commands()[0].texture, TextureKey::White);
        assert_eq!(batch.vertices()[0].position, [10.0, 20.0]);
        assert_eq!(batch.vertices()[2].position, [40.0, 60.0]);
        assert_eq!(batch.vertices()[0].half_size, [0.0, 0.0]);
    }

    #[test]
    fn test_image_region_maps_source_to_uvs() {
        let mut batch = batch();
        let image = strip();
        // Second of four 100px frames, drawn at 2.5x
        batch.draw_image_region(
            &image,
            Rect::new(100.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 60.0, 250.0, 250.0),
        );

        let vertices = batch.vertices();
        assert_relative_eq!(vertices[0].tex_coords[0], 0.25);
        assert_relative_eq!(vertices[2].tex_coords[0], 0.5);
        assert_relative_eq!(vertices[2].tex_coords[1], 1.0);
        assert_eq!(vertices[2].position, [300.0, 310.0]);

        let key = batch.commands()[0].texture;
        assert!(matches!(key, TextureKey::Image(_)));
        assert!(Arc::ptr_eq(batch.image(key).unwrap(), &image));
    }

    #[test]
    fn test_runs_split_on_texture_change() {
        let mut batch = batch();
        let image = strip();
        let src = Rect::new(0.0, 0.0, 100.0, 100.0);

        batch.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        batch.fill_rect(Rect::new(5.0, 0.0, 5.0, 5.0), Color::WHITE);
        batch.draw_image_region(&image, src, src);
        batch.draw_image_region(&image, src, src);
        batch.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);

        let runs: Vec<_> = batch.commands().iter().map(|c| c.indices.clone()).collect();
        assert_eq!(runs, vec![0..12, 12..24, 24..30]);
    }

    #[test]
    fn test_empty_regions_are_skipped() {
        let mut batch = batch();
        let image = strip();
        batch.draw_image_region(&image, Rect::new(0.0, 0.0, 0.0, 100.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        batch.fill_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::WHITE);
        batch.stroke_round_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, 0.0, Color::WHITE);
        assert_eq!(batch.quad_count(), 0);
    }

    #[test]
    fn test_round_rect_carries_its_shape() {
        let mut batch = batch();
        batch.fill_round_rect(Rect::new(0.0, 0.0, 40.0, 10.0), 8.0, Color::GREEN);
        batch.stroke_round_rect(Rect::new(0.0, 0.0, 40.0, 10.0), 2.0, 3.0, Color::WHITE);

        let fill = batch.vertices()[0];
        assert_eq!(fill.local, [-20.0, -5.0]);
        assert_eq!(fill.half_size, [20.0, 5.0]);
        // Radius is limited to the shorter half side
        assert_eq!(fill.shape, [5.0, 0.0]);

        let stroke = batch.vertices()[4];
        assert_eq!(stroke.shape, [2.0, 3.0]);
    }

    #[test]
    fn test_text_draws_glyph_quads() {
        let mut batch = batch();
        batch.fill_text("Play again", Vec2::new(512.0, 300.0), 20.0, TextAlign::Center, Color::BLACK);

        // Nine visible glyphs, the space has no quad
        assert_eq!(batch.quad_count(), 9);
        assert_eq!(batch.commands().len(), 1);
        assert_eq!(batch.commands()[0].texture, TextureKey::Glyphs);
    }

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut batch = batch();
        let image = strip();
        batch.draw_image_region(&image, Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 10.0, 10.0));

        batch.clear(Color::GREY);
        assert_eq!(batch.quad_count(), 0);
        assert!(batch.commands().is_empty());
        assert!(batch.image(TextureKey::Image(Arc::as_ptr(&image) as usize)).is_none());
        assert_eq!(batch.clear_color(), Color::GREY);
    }

    #[test]
    fn test_rewind_removes_an_overlay() {
        let mut batch = batch();
        batch.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        let mark = batch.mark();

        batch.fill_rect(Rect::new(5.0, 0.0, 5.0, 5.0), Color::WHITE);
        batch.fill_text("Paused", Vec2::ZERO, 40.0, TextAlign::Left, Color::WHITE);
        batch.rewind(mark);

        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.commands(), &[DrawCommand {
            texture: TextureKey::White,
            indices: 0..6,
        }]);
    }
}
