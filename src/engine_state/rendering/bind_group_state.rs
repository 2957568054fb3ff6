//! Bind group layouts shared by the chunk pipeline.
//!
//! The chunk shader reads three bind groups. Their layouts are created once and
//! handed to everything that builds a pipeline or a bind group against them:
//!
//! - group 0: camera uniform (`view`, `projection`), set once per frame
//! - group 1: material (diffuse texture and sampler), set per mesh
//! - group 2: model uniform (chunk translation), set per mesh

use wgpu::{BindGroupLayout, Device};

/// Bind group slot of the camera uniform.
pub const CAMERA_BIND_GROUP: u32 = 0;
/// Bind group slot of the material texture and sampler.
pub const MATERIAL_BIND_GROUP: u32 = 1;
/// Bind group slot of the per-mesh model uniform.
pub const MODEL_BIND_GROUP: u32 = 2;

/// Label of the camera bind group layout
pub const CAMERA_BIND_GROUP_LAYOUT: &str = "camera_bind_group_layout";
/// Label of the material bind group layout
pub const MATERIAL_BIND_GROUP_LAYOUT: &str = "material_bind_group_layout";
/// Label of the model bind group layout
pub const MODEL_BIND_GROUP_LAYOUT: &str = "model_bind_group_layout";

/// Holds the three bind group layouts of the chunk pipeline.
pub struct BindGroupState {
    /// Layout of the camera uniform group
    pub camera_layout: BindGroupLayout,
    /// Layout of the material group
    pub material_layout: BindGroupLayout,
    /// Layout of the model uniform group
    pub model_layout: BindGroupLayout,
}

impl BindGroupState {
    /// Creates every layout the chunk pipeline binds against.
    pub fn new(device: &Device) -> Self {
        Self {
            camera_layout: Self::uniform_layout(
                device,
                CAMERA_BIND_GROUP_LAYOUT,
                wgpu::ShaderStages::VERTEX,
            ),
            material_layout: Self::material_layout(device),
            model_layout: Self::uniform_layout(
                device,
                MODEL_BIND_GROUP_LAYOUT,
                wgpu::ShaderStages::VERTEX,
            ),
        }
    }

    /// Returns the layouts in bind group slot order, for pipeline layout creation.
    pub fn ordered_layouts(&self) -> [&BindGroupLayout; 3] {
        [&self.camera_layout, &self.material_layout, &self.model_layout]
    }

    fn uniform_layout(
        device: &Device,
        label: &'static str,
        visibility: wgpu::ShaderStages,
    ) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some(label),
        })
    }

    fn material_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    // Must match the filterable flag of the texture entry above.
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some(MATERIAL_BIND_GROUP_LAYOUT),
        })
    }
}
