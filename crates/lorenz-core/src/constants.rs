use crate::math::Vec3;

// Default tuning shared by the core and the native front-end.

// Viewport and pacing
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 450;
pub const TARGET_FPS: f64 = 60.0;
pub const FPS_SAMPLE_FRAMES: u32 = 50; // frames averaged for the FPS readout
pub const RESIZE_SKIP_FRAMES: u32 = 2; // frames skipped after a resize/move

// Integration
pub const STEP_DURATION: f64 = 0.05;
pub const SUB_STEPS: u32 = 25; // more is more stable but slower
pub const STEP_DURATION_MIN: f64 = 0.01;
pub const STEP_DURATION_SPAN: f64 = 0.1;

// Particles and trails
pub const MAX_PARTICLES: usize = 1500;
pub const MAX_TRAIL: usize = 50;
pub const INITIAL_PARTICLES: usize = 500;
pub const INITIAL_TRAIL: usize = 25;
pub const SPAWN_ORIGIN: [f64; 3] = [0.01, 0.01, 25.01]; // lower corner of the spawn cube
pub const SPAWN_STEPS: u32 = 100; // spawn offsets are k / SPAWN_STEPS, k in 0..SPAWN_STEPS

// Projection and clipping (view-space units)
pub const FOV_RADIANS: f64 = std::f64::consts::FRAC_PI_2;
pub const PROJECTION_NEAR: f64 = 0.1;
pub const PROJECTION_FAR: f64 = 100.0;
pub const NEAR_CLIP_Z: f64 = 1.0;
pub const FAR_CLIP_Z: f64 = 100.0;

// Camera
pub const CAMERA_START: [f64; 3] = [0.0, 0.0, -35.0];
pub const ORBIT_ZOOM_MIN: f64 = -75.0;
pub const ORBIT_ZOOM_MAX: f64 = -1.0;
pub const ORBIT_PITCH_LIMIT: f64 = 1.55; // just short of pi/2
pub const ORBIT_DRAG_DIVISOR: f64 = 1000.0; // pixels of drag per radian at scale 1
pub const WALK_TURN_RATE: f64 = 0.05; // radians per frame while an arrow key is held

// Scene layout
pub const PARTICLE_OFFSET: [f64; 3] = [0.0, 0.0, -25.0]; // recentres the attractor on the origin
pub const PARTICLE_SCALE: f64 = 0.7;
pub const ORIGIN_UNIT: f64 = 5.0;
pub const TIP_RADIUS: f64 = 1.0;

// Velocity colouring: channel = (v + OFFSET) * GAIN
pub const VELOCITY_COLOR_OFFSET: f64 = 4.0;
pub const VELOCITY_COLOR_GAIN: f64 = 32.0;
pub const TRAIL_FADE_EXPONENT: i32 = 5;

#[inline]
pub fn camera_start() -> Vec3 {
    Vec3::from(CAMERA_START)
}
