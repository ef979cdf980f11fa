// Text atlas rasterised from the embedded TTF with ab_glyph

use std::collections::HashMap;

use ab_glyph::{point, Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use anyhow::Result;
use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::canvas::TextAlign;
use crate::core::Rect;

static HUD_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans-Bold.ttf"
));

/// Pixel height glyphs are rasterised at; text is scaled from this
const ATLAS_PX: f32 = 48.0;
const ATLAS_WIDTH: u32 = 512;
const PADDING: u32 = 1;

/// Printable ASCII
const CHARSET: std::ops::RangeInclusive<char> = ' '..='~';

/// Character drawn in place of anything outside the atlas
const FALLBACK: char = '?';

#[derive(Debug, Clone, Copy)]
struct GlyphInfo {
    id: GlyphId,
    /// Region in the atlas image; empty for blank glyphs such as space
    src: Rect,
    /// Top-left of the bitmap relative to the pen, at atlas scale, with
    /// y measured from the top of the line
    offset: Vec2,
    advance: f32,
}

/// One positioned glyph quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub src: Rect,
    pub dst: Rect,
}

/// CPU glyph atlas: white texels with coverage in alpha
pub struct GlyphAtlas {
    font: FontArc,
    image: RgbaImage,
    glyphs: HashMap<char, GlyphInfo>,
    /// Distance from the top of the line to the top of a capital, at atlas scale
    cap_top: f32,
    cap_height: f32,
}

impl GlyphAtlas {
    /// Atlas of the built-in HUD font
    pub fn hud() -> Result<Self> {
        Self::from_font(FontArc::try_from_slice(HUD_FONT)?)
    }

    pub fn from_font(font: FontArc) -> Result<Self> {
        let scale = PxScale::from(ATLAS_PX);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();

        let mut height = 128;
        let mut coverage = vec![0u8; (ATLAS_WIDTH * height) as usize];
        let mut glyphs = HashMap::new();
        let (mut cursor_x, mut cursor_y, mut row_height) = (PADDING, PADDING, 0);

        for c in CHARSET {
            let id = font.glyph_id(c);
            let advance = scaled.h_advance(id);
            let glyph = Glyph {
                id,
                scale,
                position: point(0.0, ascent),
            };

            let Some(outline) = font.outline_glyph(glyph) else {
                glyphs.insert(
                    c,
                    GlyphInfo {
                        id,
                        src: Rect::new(0.0, 0.0, 0.0, 0.0),
                        offset: Vec2::ZERO,
                        advance,
                    },
                );
                continue;
            };

            let bounds = outline.px_bounds();
            let glyph_width = (bounds.width().ceil() as u32).max(1);
            let glyph_height = (bounds.height().ceil() as u32).max(1);

            if cursor_x + glyph_width + PADDING > ATLAS_WIDTH {
                cursor_x = PADDING;
                cursor_y += row_height + PADDING;
                row_height = 0;
            }
            while cursor_y + glyph_height + PADDING > height {
                height *= 2;
                coverage.resize((ATLAS_WIDTH * height) as usize, 0);
            }

            let (origin_x, origin_y) = (cursor_x, cursor_y);
            outline.draw(|x, y, v| {
                let (px, py) = (origin_x + x, origin_y + y);
                if px < ATLAS_WIDTH && py < height {
                    let index = (py * ATLAS_WIDTH + px) as usize;
                    coverage[index] = coverage[index].max((v.clamp(0.0, 1.0) * 255.0) as u8);
                }
            });

            glyphs.insert(
                c,
                GlyphInfo {
                    id,
                    src: Rect::new(
                        origin_x as f32,
                        origin_y as f32,
                        glyph_width as f32,
                        glyph_height as f32,
                    ),
                    offset: Vec2::new(bounds.min.x, bounds.min.y),
                    advance,
                },
            );

            cursor_x += glyph_width + PADDING;
            row_height = row_height.max(glyph_height);
        }

        let image = RgbaImage::from_fn(ATLAS_WIDTH, height, |x, y| {
            Rgba([255, 255, 255, coverage[(y * ATLAS_WIDTH + x) as usize]])
        });

        // Capitals set the line metrics so `size` reads as a cap height
        let cap = glyphs
            .get(&'H')
            .map(|info| (info.offset.y, info.src.height))
            .filter(|(_, h)| *h > 0.0)
            .unwrap_or((0.0, ATLAS_PX * 0.7));

        log::debug!(
            "Glyph atlas built: {} glyphs, {}x{}",
            glyphs.len(),
            ATLAS_WIDTH,
            height
        );

        Ok(Self {
            font,
            image,
            glyphs,
            cap_top: cap.0,
            cap_height: cap.1,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn info(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c).or_else(|| self.glyphs.get(&FALLBACK))
    }

    /// Pixels of canvas per pixel of atlas for a given cap height
    fn factor(&self, size: f32) -> f32 {
        size / self.cap_height
    }

    /// Advance width of a line of text drawn at cap height `size`
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(ATLAS_PX));
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            if let Some(info) = self.info(c) {
                if let Some(previous) = previous {
                    width += scaled.kern(previous, info.id);
                }
                width += info.advance;
                previous = Some(info.id);
            }
        }
        width * self.factor(size)
    }

    /// Place the glyphs of one line. `anchor` is the top of the capitals.
    pub fn layout(&self, text: &str, anchor: Vec2, size: f32, align: TextAlign) -> Vec<GlyphQuad> {
        let factor = self.factor(size);
        let width = self.text_width(text, size);
        let mut pen = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width / 2.0,
            TextAlign::Right => anchor.x - width,
        };

        let scaled = self.font.as_scaled(PxScale::from(ATLAS_PX));
        let mut quads = Vec::with_capacity(text.len());
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let Some(info) = self.info(c) else {
                continue;
            };
            if let Some(previous) = previous {
                pen += scaled.kern(previous, info.id) * factor;
            }
            if info.src.width > 0.0 {
                quads.push(GlyphQuad {
                    src: info.src,
                    dst: Rect::new(
                        pen + info.offset.x * factor,
                        anchor.y + (info.offset.y - self.cap_top) * factor,
                        info.src.width * factor,
                        info.src.height * factor,
                    ),
                });
            }
            pen += info.advance * factor;
            previous = Some(info.id);
        }

        quads
    }
}
