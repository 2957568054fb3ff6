//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and transformations
//! - Projection matrix handling
//! - Camera controller for input processing
//! - GPU uniform layout
//!
//! Orientation is stored as yaw and pitch in degrees. The look direction is
//! the negated spherical direction `(cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)`,
//! so the default yaw of −90° looks down +Z.

use cgmath::*;
use web_time::Duration;

use crate::engine_state::PlayerAction;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// cgmath builds projections with a depth range of [-1, 1]; wgpu expects [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// Pitch limit in degrees, keeps the view away from the poles.
pub const PITCH_LIMIT: f32 = 89.99;
/// Initial yaw in degrees.
pub const DEFAULT_YAW: f32 = -90.0;
/// Vertical field of view in degrees.
pub const DEFAULT_FOVY: f32 = 70.0;
/// Near clipping plane distance.
pub const Z_NEAR: f32 = 0.01;
/// Far clipping plane distance.
pub const Z_FAR: f32 = 16384.0;

/// Represents a free-look camera in 3D space.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis)
    pub yaw: Deg<f32>,
    /// Vertical rotation, clamped to ±[`PITCH_LIMIT`]
    pub pitch: Deg<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis)
    /// * `pitch` - Initial pitch, clamped to ±[`PITCH_LIMIT`]
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// Gets the normalized direction the camera is looking in.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(self.pitch).sin_cos();
        -Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    /// Gets the normalized horizontal direction to the camera's right.
    pub fn get_right_vec(&self) -> Vector3<f32> {
        self.get_view_vec().cross(Vector3::unit_y()).normalize()
    }

    /// Calculates the view matrix for this camera.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }

    /// Applies and clears the controller's pending movement and rotation.
    ///
    /// # Arguments
    /// * `controller` - The camera controller containing input state
    /// * `dt` - Time elapsed since the last update, scales movement only
    pub fn get_controller_updates_and_reset_controller(
        &mut self,
        controller: &mut CameraController,
        dt: Duration,
    ) {
        let dt = dt.as_secs_f32();

        let forward = self.get_view_vec();
        let right = self.get_right_vec();
        self.position += forward * (controller.amount_forward - controller.amount_backward) * dt;
        self.position += right * (controller.amount_right - controller.amount_left) * dt;
        self.position.y += (controller.amount_up - controller.amount_down) * dt;

        self.yaw += Deg(controller.rotate_horizontal);
        self.pitch += Deg(controller.rotate_vertical);
        self.clamp_pitch();

        controller.reset();
    }

    fn clamp_pitch(&mut self) {
        self.pitch = Deg(self.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), Deg(DEFAULT_YAW), Deg(0.0))
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: Self::aspect_of(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::aspect_of(width, height);
    }

    /// Current aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the projection matrix in wgpu clip space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    // Minimized windows report a zero extent
    fn aspect_of(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }
}

/// Handles camera movement and rotation based on user input.
///
/// This struct tracks the current state of movement keys and mouse input,
/// and applies them to the camera when updated.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts (units per second)
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Rotation amounts (degrees)
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Degrees of rotation per pixel of mouse motion
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Processes player actions and updates controller state accordingly.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        if actions.move_forward {
            self.amount_forward = self.speed;
        }
        if actions.move_backward {
            self.amount_backward = self.speed;
        }
        if actions.move_left {
            self.amount_left = self.speed;
        }
        if actions.move_right {
            self.amount_right = self.speed;
        }
        if actions.move_up {
            self.amount_up = self.speed;
        }
        if actions.move_down {
            self.amount_down = self.speed;
        }
        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32 * self.sensitivity;
            self.rotate_vertical += delta_y as f32 * self.sensitivity;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    fn reset(&mut self) {
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.amount_up = 0.0;
        self.amount_down = 0.0;
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
    }
}

/// GPU-friendly representation of camera data for shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath matrices are not Pod, so they are stored as column-major arrays
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
        }
    }

    /// Copies the current view and projection matrices.
    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view = camera.calc_matrix().into();
        self.projection = projection.calc_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    fn actions(f: impl FnOnce(&mut PlayerAction)) -> PlayerAction {
        let mut actions = PlayerAction::default();
        f(&mut actions);
        actions
    }

    #[test]
    fn test_default_camera_looks_down_positive_z() {
        let camera = Camera::default();
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 0.0));
        assert!(approx(camera.get_view_vec(), Vector3::unit_z()));
        assert!(approx(camera.get_right_vec(), -Vector3::unit_x()));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let camera = Camera::new(Point3::origin(), Deg(0.0), Deg(120.0));
        assert_eq!(camera.pitch, Deg(PITCH_LIMIT));

        let mut camera = Camera::default();
        let mut controller = CameraController::new(1.0, 1.0);
        controller.intake_actions(&actions(|a| a.rotate_view = Some((0.0, -500.0))));
        camera.get_controller_updates_and_reset_controller(&mut controller, Duration::from_secs(1));
        assert_eq!(camera.pitch, Deg(-PITCH_LIMIT));
        assert!(!controller.has_updates());
    }

    #[test]
    fn test_forward_movement_scales_with_time() {
        let mut camera = Camera::default();
        let mut controller = CameraController::new(2.0, 0.1);
        controller.intake_actions(&actions(|a| {
            a.move_forward = true;
            a.move_up = true;
        }));
        assert!(controller.has_updates());

        camera.get_controller_updates_and_reset_controller(
            &mut controller,
            Duration::from_millis(500),
        );
        assert!(approx(camera.position.to_vec(), Vector3::new(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_projection_handles_zero_extent() {
        let mut projection = Projection::new(800, 450, Deg(DEFAULT_FOVY), Z_NEAR, Z_FAR);
        assert!((projection.aspect() - 800.0 / 450.0).abs() < 1e-6);
        projection.resize(0, 0);
        assert_eq!(projection.aspect(), 1.0);
    }

    #[test]
    fn test_uniform_holds_view_and_projection() {
        let camera = Camera::default();
        let projection = Projection::new(800, 450, Deg(DEFAULT_FOVY), Z_NEAR, Z_FAR);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);

        let view: [[f32; 4]; 4] = camera.calc_matrix().into();
        let proj: [[f32; 4]; 4] = projection.calc_matrix().into();
        assert_eq!(uniform.view, view);
        assert_eq!(uniform.projection, proj);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
    }
}
