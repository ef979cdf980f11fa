// GPU textures for batched sprites

use std::collections::HashMap;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::batch::{SpriteBatch, TextureKey};

/// Uploaded image plus the bind group a draw run uses to sample it
pub struct SpriteTexture {
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
    /// Keeps the source alive so its address cannot be reused by another image
    _source: Option<Arc<RgbaImage>>,
}

impl SpriteTexture {
    /// Create a texture from an image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &RgbaImage,
        label: Option<&str>,
    ) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            _view: view,
            bind_group,
            width,
            height,
            _source: None,
        }
    }
}

/// Textures uploaded so far, keyed like the batch's draw runs
pub struct TextureCache {
    textures: HashMap<TextureKey, SpriteTexture>,
    /// Nearest filtering keeps the pixel art sharp when scaled
    pixel_sampler: wgpu::Sampler,
    text_sampler: wgpu::Sampler,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device) -> Self {
        let sampler = |label, filter| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: filter,
                min_filter: filter,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        };

        Self {
            textures: HashMap::new(),
            pixel_sampler: sampler("Pixel Sampler", wgpu::FilterMode::Nearest),
            text_sampler: sampler("Text Sampler", wgpu::FilterMode::Linear),
        }
    }

    /// Upload every texture the batch needs that is not resident yet
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        batch: &SpriteBatch,
    ) {
        for command in batch.commands() {
            let key = command.texture;
            if self.textures.contains_key(&key) {
                continue;
            }

            let texture = match key {
                TextureKey::White => {
                    let white = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
                    SpriteTexture::from_image(
                        device,
                        queue,
                        layout,
                        &self.pixel_sampler,
                        &white,
                        Some("White Texture"),
                    )
                }
                TextureKey::Glyphs => SpriteTexture::from_image(
                    device,
                    queue,
                    layout,
                    &self.text_sampler,
                    batch.glyph_image(),
                    Some("Glyph Atlas"),
                ),
                TextureKey::Image(_) => {
                    let Some(source) = batch.image(key) else {
                        log::warn!("Draw run references an image missing from the batch");
                        continue;
                    };
                    let mut texture = SpriteTexture::from_image(
                        device,
                        queue,
                        layout,
                        &self.pixel_sampler,
                        source,
                        Some("Sprite Texture"),
                    );
                    texture._source = Some(Arc::clone(source));
                    texture
                }
            };

            log::debug!(
                "Uploaded {:?} ({}x{}), {} textures resident",
                key,
                texture.width,
                texture.height,
                self.textures.len() + 1
            );
            self.textures.insert(key, texture);
        }
    }

    pub fn get(&self, key: TextureKey) -> Option<&SpriteTexture> {
        self.textures.get(&key)
    }
}
