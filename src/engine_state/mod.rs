//! # Engine State Module
//!
//! The core engine module that owns everything between the window and the GPU.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning, movement and its uniform
//! * `rendering` - Vertex layout, shader, material, meshing and the frame pass
//! * `voxels` - Occupancy, chunks and the world they make up
//!
//! ## Architecture
//!
//! `EngineState` is built once the surface is configured. Building it compiles
//! the shader, loads the material and generates the whole world before the
//! first frame; after that each frame only moves the camera and submits the
//! already uploaded chunk meshes.

use log::info;
use rendering::{meshing::GpuMesh, MeshRendererManager};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::KeyCode;

use crate::{
    application_state::input_state::ProcessedInputState, config::WorldConfig, error::EngineError,
};
use camera_state::CameraState;
use voxels::world::World;

mod camera_state;
mod rendering;
mod voxels;

/// The main state container for the voxel engine
///
/// This struct owns the renderer, the camera and the world, and coordinates
/// input, rendering and teardown between them.
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Manager for mesh rendering operations
    pub render_manager: MeshRendererManager,
    /// The voxel world and its chunk meshes
    pub world: World<GpuMesh>,
}

impl EngineState {
    /// Creates a new engine state and generates the world.
    ///
    /// # Arguments
    ///
    /// * `surface` - The configured rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    /// * `config` - World sizes and asset paths
    ///
    /// # Errors
    ///
    /// Any failure loading assets, building the pipeline, or meshing a chunk.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        config: &WorldConfig,
    ) -> Result<Self, EngineError> {
        let render_manager = MeshRendererManager::new(
            surface,
            surface_config,
            device,
            queue,
            &config.shader_path,
            &config.texture_path,
        )?;

        let camera_state = CameraState::new(
            &render_manager.device,
            &render_manager.bind_group_state.camera_layout,
            render_manager.surface_config.width,
            render_manager.surface_config.height,
        );

        let mut world = World::new(config.chunk_size, config.world_size)?;
        world.generate(&render_manager.mesh_backend)?;

        Ok(Self {
            camera_state,
            player_actions: PlayerAction::default(),
            render_manager,
            world,
        })
    }

    /// Resizes the rendering surface when the window size changes
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(size);
        self.camera_state
            .resize(size.width, size.height, &self.render_manager.queue);
    }

    /// Renders the current frame
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Resource`] if the surface cannot produce a frame.
    pub fn render(&mut self) -> Result<(), EngineError> {
        self.render_manager
            .render(&self.world, self.camera_state.bind_group())
    }

    /// Applies the current player actions to the camera
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_input(&mut self, wait_duration: web_time::Duration) {
        self.camera_state.intake_actions(&self.player_actions);
        self.camera_state
            .update(wait_duration, &self.render_manager.queue);
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = PlayerAction::from_input(&input);
    }

    /// Releases every chunk mesh. Rendering afterwards draws only the clear color.
    pub fn destroy(&mut self) {
        self.world.destroy(&self.render_manager.mesh_backend);
        info!("Engine state destroyed");
    }
}

/// Represents player actions derived from input
///
/// This struct contains flags for the movement and look actions that can be
/// triggered by input.
#[derive(Debug, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,

    /// View rotation - Some if the left mouse button is held and the mouse moved
    rotate_view: Option<(f64, f64)>,
}

impl PlayerAction {
    /// Translates the processed input state into player actions.
    ///
    /// W/S/A/D move, Space and left Shift move up and down, dragging with the
    /// left mouse button looks around.
    pub fn from_input(input: &ProcessedInputState) -> Self {
        let mut player_action = PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            move_up: input.get_key_state(KeyCode::Space).is_active(),
            move_down: input.get_key_state(KeyCode::ShiftLeft).is_active(),
            rotate_view: None,
        };

        if input
            .get_mouse_button_state(winit::event::MouseButton::Left)
            .is_active()
        {
            player_action.rotate_view = input.get_mouse_delta();
        }

        player_action
    }
}
