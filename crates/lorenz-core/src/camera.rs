//! Camera controller with two interaction modes.
//!
//! Walk mode moves freely with per-frame velocities driven by held keys.
//! Orbit mode keeps the camera aimed at the origin and rotates its start
//! position by mouse drag, zooming along z with the wheel. Both produce a
//! camera-to-world matrix via [`Mat4::point_at`]; [`Camera::view_matrix`]
//! inverts it.

use crate::constants::*;
use crate::math::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    Walk,
    #[default]
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Walk => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Walk,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Up,
    Down,
}

/// Pointer input gathered between frames for orbit mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitInput {
    /// Accumulated pointer movement (previous minus current, in pixels).
    pub drag_dx: f64,
    pub drag_dy: f64,
    pub dragging: bool,
    /// Accumulated wheel lines.
    pub scroll: f64,
}

impl OrbitInput {
    pub fn pointer_moved(&mut self, dx: f64, dy: f64) {
        self.drag_dx += dx;
        self.drag_dy += dy;
    }

    pub fn scrolled(&mut self, lines: f64) {
        self.scroll += lines;
    }

    /// Drop pointer movement gathered while no camera update ran.
    pub fn discard_drag(&mut self) {
        self.drag_dx = 0.0;
        self.drag_dy = 0.0;
    }
}

const FORWARD: Vec3 = Vec3::UNIT_Z;

#[derive(Clone, Debug)]
pub struct Camera {
    pub mode: CameraMode,
    pub position: Vec3,
    /// Accumulated Euler angles. In walk mode x is pitch and y is yaw; in
    /// orbit mode x is the yaw drag and y the (clamped) pitch drag.
    pub rotation: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        let up = Vec3::UNIT_Y;
        Self {
            mode: CameraMode::default(),
            position: camera_start(),
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            direction: FORWARD,
            up,
            right: up.cross(FORWARD),
        }
    }
}

impl Camera {
    pub fn new(mode: CameraMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Back to the start pose; keeps the current mode.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Start moving along the current basis; the direction is captured now
    /// and held until [`Camera::stop_moving`].
    pub fn start_moving(&mut self, movement: Movement) {
        self.velocity = match movement {
            Movement::Forward => self.direction,
            Movement::Back => -self.direction,
            Movement::Right => self.right,
            Movement::Left => -self.right,
            Movement::Up => self.up,
            Movement::Down => -self.up,
        };
    }

    pub fn stop_moving(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn start_turning(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.angular_velocity.y = WALK_TURN_RATE,
            Turn::Right => self.angular_velocity.y = -WALK_TURN_RATE,
            Turn::Up => self.angular_velocity.x = WALK_TURN_RATE,
            Turn::Down => self.angular_velocity.x = -WALK_TURN_RATE,
        }
    }

    pub fn stop_turning(&mut self, turn: Turn) {
        match turn {
            Turn::Left | Turn::Right => self.angular_velocity.y = 0.0,
            Turn::Up | Turn::Down => self.angular_velocity.x = 0.0,
        }
    }

    /// Advance one frame and return the camera-to-world matrix.
    ///
    /// `input` is consumed in orbit mode (deltas and scroll reset to zero);
    /// `scale` is the frame scale factor.
    pub fn update(&mut self, input: &mut OrbitInput, scale: f64) -> Mat4 {
        match self.mode {
            CameraMode::Walk => self.update_walk(),
            CameraMode::Orbit => self.update_orbit(input, scale),
        }
    }

    fn update_walk(&mut self) -> Mat4 {
        self.position += self.velocity;
        self.rotation += self.angular_velocity;

        // Basis comes from the accumulated angles alone and stays orthonormal
        // at any yaw.
        let pitched = Mat4::rotation_x(self.rotation.x).multiply_vec3(FORWARD);
        let pitched_up = pitched.cross(Vec3::UNIT_X);
        let yaw = Mat4::rotation_y(self.rotation.y);
        self.direction = yaw.multiply_vec3(pitched);
        self.up = yaw.multiply_vec3(pitched_up);
        self.right = self.up.cross(self.direction);

        Mat4::point_at(self.position, self.position + self.direction, self.up)
    }

    fn update_orbit(&mut self, input: &mut OrbitInput, scale: f64) -> Mat4 {
        let zoomed = self.position.z + input.scroll * scale;
        self.position.z = zoomed.clamp(ORBIT_ZOOM_MIN, ORBIT_ZOOM_MAX);
        input.scroll = 0.0;

        if input.dragging {
            self.rotation.x += input.drag_dx / ORBIT_DRAG_DIVISOR * scale;
            self.rotation.y += input.drag_dy / ORBIT_DRAG_DIVISOR * scale;
            self.rotation.y = self.rotation.y.clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        }
        input.discard_drag();

        let pitched = Mat4::rotation_x(self.rotation.y).multiply_vec3(self.position);
        let eye = Mat4::rotation_y(self.rotation.x).multiply_vec3(pitched);
        Mat4::point_at(eye, Vec3::ZERO, self.up)
    }

    /// World-to-view matrix for a camera matrix from [`Camera::update`].
    #[inline]
    pub fn view_matrix(camera_matrix: &Mat4) -> Mat4 {
        camera_matrix.quick_inverse()
    }
}
