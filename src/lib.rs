#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A voxel world renderer built with Rust and WGPU.
//!
//! The world is a cube of chunks around the origin. Every chunk samples a
//! fixed density field, emits only the voxel faces that touch air, and
//! uploads the result once as a static triangle list. A free-look camera
//! flies through it.
//!
//! ## Key Modules
//!
//! * `application_state` - Window, event loop and input handling
//! * `engine_state` - Camera, rendering, meshing and the voxel world
//! * [`config`] - World sizes and asset paths
//! * [`error`] - The error type shared by every fallible operation
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run();
//! }
//! ```
//!
//! Set `RUST_LOG=info` to see world generation statistics.

use std::path::Path;

use application_state::ApplicationState;
use log::{error, info};
use winit::event_loop::EventLoop;

use config::WorldConfig;

mod application_state;
pub mod config;
mod engine_state;
pub mod error;

/// Initializes logging, loads the configuration and runs the event loop until the window closes.
///
/// Startup failures are logged and end the run; nothing is retried.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match WorldConfig::load(Path::new(config::CONFIG_PATH)) {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return;
        }
    };

    let event_loop = match EventLoop::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!("Failed to create event loop: {err}");
            return;
        }
    };

    let mut state = ApplicationState::new(event_loop.create_proxy(), config);

    if let Err(err) = event_loop.run_app(&mut state) {
        error!("Event loop terminated with an error: {err}");
    }
}
