//! Texture handling for the rendering pipeline.
//!
//! This module provides the depth buffer used by the chunk pass and the diffuse
//! texture upload used by materials, including the CPU-side mip chain.

use image::{imageops::FilterType, RgbaImage};
use wgpu::util::DeviceExt;

/// Represents a GPU texture with its default view.
pub struct Texture {
    /// The underlying WebGPU texture resource.
    pub texture: wgpu::Texture,
    /// The texture view used for binding the texture to the pipeline.
    pub view: wgpu::TextureView,
}

impl Texture {
    /// The texture format used for depth buffers.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// The texture format diffuse images are uploaded as.
    pub const DIFFUSE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a depth texture matching the surface size.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `config` - The surface configuration containing dimensions
    /// * `label` - Debug label for the texture
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Uploads an RGBA image together with its full mip chain.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The queue the texel data is written through
    /// * `image` - Base level of the texture
    /// * `label` - Debug label for the texture
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let levels = mip_chain(image);
        let data: Vec<u8> = levels
            .iter()
            .flat_map(|level| level.as_raw().iter().copied())
            .collect();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width(),
                    height: image.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: levels.len() as u32,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::DIFFUSE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}

/// Number of mip levels for a texture of the given size, down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    width.max(height).max(1).ilog2() + 1
}

/// Builds every mip level of `image`, base level first.
///
/// Each level halves the previous one (rounding down, never below one texel)
/// and is filtered with a triangle kernel.
pub fn mip_chain(image: &RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(image.width(), image.height());
    let mut levels = Vec::with_capacity(count as usize);
    levels.push(image.clone());

    for level in 1..count {
        let width = (image.width() >> level).max(1);
        let height = (image.height() >> level).max(1);
        let previous = &levels[levels.len() - 1];
        let next = image::imageops::resize(previous, width, height, FilterType::Triangle);
        levels.push(next);
    }

    levels
}
