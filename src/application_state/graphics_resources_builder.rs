//! # Graphics Resources Builder
//!
//! This module creates the window and the WebGPU context the engine renders
//! with, and hands them to the application through the event loop.
//!
//! The main components are:
//! - `Graphics`: Holds all graphics-related resources
//! - `GraphicsBuilder`: Builds the resources once the event loop is running
//! - `MaybeGraphics`: Tracks whether the resources are still to be built

use std::sync::Arc;

use log::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::{
    dpi::PhysicalSize,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::{config::WorldConfig, error::EngineError};

/// Contains all graphics-related resources required by the application.
pub struct Graphics {
    /// The window the surface presents to
    pub window: Arc<Window>,
    /// The configured presentation surface
    pub surface: Surface<'static>,
    /// Configuration the surface was set up with
    pub surface_config: SurfaceConfiguration,
    /// The WebGPU device
    pub device: Device,
    /// The WebGPU queue
    pub queue: Queue,
}

/// Creates the window, requests an adapter and device, and configures the surface.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window
/// * `config` - Supplies the window title and initial size
///
/// # Errors
/// Returns [`EngineError::Resource`] if any step of the setup fails.
async fn create_graphics(
    event_loop: &ActiveEventLoop,
    config: &WorldConfig,
) -> Result<Graphics, EngineError> {
    let window_attrs = Window::default_attributes()
        .with_title(config.window_title.clone())
        .with_inner_size(PhysicalSize::new(config.window_width, config.window_height));

    let window = Arc::new(
        event_loop
            .create_window(window_attrs)
            .map_err(|e| EngineError::Resource(format!("failed to create window: {e}")))?,
    );

    // Backends::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance
        .create_surface(window.clone())
        .map_err(|e| EngineError::Resource(format!("failed to create surface: {e}")))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| EngineError::Resource(format!("no compatible adapter: {e}")))?;
    info!("Using adapter {:?}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            label: None,
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|e| EngineError::Resource(format!("failed to request device: {e}")))?;

    let size = window.inner_size();
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or_else(|| EngineError::Resource("surface reports no formats".into()))?;

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        // Fifo is the only mode every surface supports, and matches vsync
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &surface_config);

    Ok(Graphics {
        window,
        surface,
        surface_config,
        device,
        queue,
    })
}

/// Builds the graphics resources once the event loop has resumed.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
    config: WorldConfig,
}

/// Represents the possible states of the graphics initialization process.
pub enum MaybeGraphics {
    /// Waiting for the event loop to resume
    Builder(GraphicsBuilder),
    /// State after graphics resources have been moved into the engine
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Used to send the initialized graphics resources back to the event loop
    /// * `config` - Window title and size
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>, config: WorldConfig) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
            config,
        }
    }

    /// Creates the graphics resources and sends them to the event loop.
    ///
    /// Does nothing if they have already been sent.
    ///
    /// # Errors
    /// Returns [`EngineError::Resource`] if setup fails or the event loop has closed.
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return Ok(());
        };

        let gfx = pollster::block_on(create_graphics(event_loop, &self.config))?;
        event_loop_proxy
            .send_event(gfx)
            .map_err(|_| EngineError::Resource("event loop closed before graphics were ready".into()))
    }
}
