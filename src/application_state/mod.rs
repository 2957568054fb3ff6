//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and graphics initialization
//! - Input handling
//! - Application lifecycle events
//! - State transitions between initialization and running states

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{Graphics, GraphicsBuilder, MaybeGraphics};
use input_manager::InputManager;
use log::error;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{config::WorldConfig, engine_state::EngineState};

/// The main application state container that manages the application's lifecycle.
///
/// It implements `ApplicationHandler` to handle window and device events.
pub struct ApplicationState {
    /// The current graphics state, which may be waiting, ready, or moved into the engine
    pub graphics: MaybeGraphics,
    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,
    config: WorldConfig,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,
    /// Handle to the application window
    pub window: Arc<Window>,
    /// Manages input state and event processing
    pub input_manager: InputManager,
    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,
}

impl ApplicationState {
    /// Creates the application in its waiting state.
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>, config: WorldConfig) -> Self {
        Self {
            graphics: MaybeGraphics::Builder(GraphicsBuilder::new(
                event_loop_proxy,
                config.clone(),
            )),
            state: None,
            config,
        }
    }

    /// Builds the engine from the received graphics resources and generates the world.
    fn initialize_application_state(&mut self, gfx: Graphics, event_loop: &ActiveEventLoop) {
        let Graphics {
            window,
            surface,
            surface_config,
            device,
            queue,
        } = gfx;

        match EngineState::new(surface, surface_config, device, queue, &self.config) {
            Ok(engine_state) => {
                window.request_redraw();
                self.state = Some(InitializedApplicationState {
                    engine_state,
                    window,
                    input_manager: InputManager::new(),
                    last_wait_time: web_time::Instant::now(),
                });
                self.graphics = MaybeGraphics::Moved;
            }
            Err(err) => {
                error!("Failed to start engine: {err}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Handles window-related events such as resize, focus changes, and input events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let is_exit_request = matches!(
            event,
            WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event: KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                    ..
                }
        );
        if is_exit_request {
            event_loop.exit();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        state.input_manager.intake_input(&event);

        match event {
            WindowEvent::Resized(size) => {
                state.engine_state.resize_surface(size);
            }
            WindowEvent::Focused(false) => {
                state.input_manager.reset_inputs();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.engine_state.render() {
                    error!("Rendering failed: {err}");
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    /// Handles device-level input events such as mouse motion.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Builds the graphics resources the first time the application is resumed.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            if let Err(err) = builder.build_and_send(event_loop) {
                error!("Failed to initialize graphics: {err}");
                event_loop.exit();
            }
        }
    }

    /// Receives the graphics resources and starts the engine.
    fn user_event(&mut self, event_loop: &ActiveEventLoop, graphics: Graphics) {
        self.initialize_application_state(graphics, event_loop);
    }

    /// Applies this frame's input and requests the next redraw.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let wait_dt = now - state.last_wait_time;

            let processed_input = state.input_manager.get_and_reset_processed_input();
            state.engine_state.set_input_commands(processed_input);
            state.engine_state.process_input(wait_dt);

            state.last_wait_time = now;
            state.window.request_redraw();
        }
    }

    /// Releases the world's GPU meshes before the device is dropped.
    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.engine_state.destroy();
        }
    }
}
