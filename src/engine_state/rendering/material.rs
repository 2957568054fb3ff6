//! Diffuse materials applied to chunk meshes.

use std::path::Path;

use log::info;

use crate::error::EngineError;

use super::texture::Texture;

/// A diffuse texture and its sampler, bound at [`MATERIAL_BIND_GROUP`](super::bind_group_state::MATERIAL_BIND_GROUP).
///
/// The whole image is mapped onto every face; there is no atlas lookup.
pub struct Material {
    /// The uploaded diffuse texture
    pub diffuse: Texture,
    /// Nearest magnification, nearest minification with linear mip blending, repeat addressing
    pub sampler: wgpu::Sampler,
    /// Bind group exposing the texture (binding 0) and sampler (binding 1)
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    /// Loads the image at `path` and uploads it as a mipmapped diffuse texture.
    ///
    /// # Errors
    /// * [`EngineError::Asset`] if the file cannot be read
    /// * [`EngineError::Image`] if the bytes are not a decodable image
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
    ) -> Result<Self, EngineError> {
        let bytes = std::fs::read(path).map_err(|source| EngineError::Asset {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        info!(
            "Loaded diffuse texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        let diffuse = Texture::from_image(device, queue, &image, "Diffuse Texture");
        Ok(Self::from_texture(device, layout, diffuse))
    }

    /// Wraps an already uploaded texture.
    pub fn from_texture(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        diffuse: Texture,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Diffuse Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("material_bind_group"),
        });

        Self {
            diffuse,
            sampler,
            bind_group,
        }
    }
}
