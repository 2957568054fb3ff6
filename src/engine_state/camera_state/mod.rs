//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Player input processing for camera control
//! - The camera uniform buffer and its bind group
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders

use camera::{Camera, CameraController, CameraUniform, Projection};
use cgmath::Deg;
use wgpu::util::DeviceExt;

use super::PlayerAction;

pub mod camera;

/// Label of the GPU buffer used for camera uniform data
pub const CAMERA_BUFFER_NAME: &str = "camera_buffer";

/// Movement speed in world units per second.
const CAMERA_SPEED: f32 = 2.0;
/// Mouse look sensitivity in degrees per pixel.
const CAMERA_SENSITIVITY: f32 = 0.1;

/// Manages the camera, its controller, and the uniform the chunk shader reads.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Perspective projection for the current surface size
    pub projection: Projection,
    /// Handles player input and camera movement
    pub camera_controller: CameraController,
    camera_uniform: CameraUniform,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CameraState {
    /// Creates a camera at the origin and uploads its initial uniform.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `layout` - Layout of the camera bind group
    /// * `width` - Surface width in pixels
    /// * `height` - Surface height in pixels
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, width: u32, height: u32) -> Self {
        let camera = Camera::default();
        let projection = Projection::new(
            width,
            height,
            Deg(camera::DEFAULT_FOVY),
            camera::Z_NEAR,
            camera::Z_FAR,
        );
        let camera_controller = CameraController::new(CAMERA_SPEED, CAMERA_SENSITIVITY);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(CAMERA_BUFFER_NAME),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            projection,
            camera_controller,
            camera_uniform,
            buffer,
            bind_group,
        }
    }

    /// Bind group exposing the camera uniform.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending input and rewrites the uniform if the camera moved.
    ///
    /// # Returns
    /// `true` if the camera changed this frame
    pub fn update(&mut self, dt: web_time::Duration, queue: &wgpu::Queue) -> bool {
        if !self.camera_controller.has_updates() {
            return false;
        }

        self.camera
            .get_controller_updates_and_reset_controller(&mut self.camera_controller, dt);
        self.write_uniform(queue);
        true
    }

    /// Adjusts the projection to a new surface size.
    pub fn resize(&mut self, width: u32, height: u32, queue: &wgpu::Queue) {
        self.projection.resize(width, height);
        self.write_uniform(queue);
    }

    fn write_uniform(&mut self, queue: &wgpu::Queue) {
        self.camera_uniform
            .update_view_proj(&self.camera, &self.projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.camera_uniform]));
    }
}
