//! Runtime configuration.
//!
//! Every value defaults to the matching entry in [`crate::constants`];
//! capacities that used to be compile-time maxima are plain fields here.

use std::time::Duration;

use thiserror::Error;

use crate::constants::*;
use crate::lorenz::{Integrator, LorenzParams};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("target fps must be positive, got {0}")]
    TargetFps(f64),
    #[error("sub-steps per frame must be at least 1")]
    NoSubSteps,
    #[error("step duration must be finite and positive, got {0}")]
    StepDuration(f64),
    #[error("max particles must be at least 1")]
    NoParticleCapacity,
    #[error("max trail length must be at least 1")]
    NoTrailCapacity,
    #[error("particle count {count} exceeds capacity {max}")]
    ParticleCount { count: usize, max: usize },
    #[error("trail length {len} exceeds capacity {max}")]
    TrailLength { len: usize, max: usize },
    #[error("field of view must be in (0, pi) radians, got {0}")]
    FieldOfView(f64),
    #[error("projection planes must satisfy 0 < near < far, got near={near} far={far}")]
    ProjectionPlanes { near: f64, far: f64 },
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f64, far: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: f64,

    pub step_duration: f64,
    pub sub_steps: u32,
    pub integrator: Integrator,
    pub params: LorenzParams,

    pub max_particles: usize,
    pub max_trail: usize,
    pub particle_count: usize,
    pub trail_length: usize,

    pub fov_radians: f64,
    pub projection_near: f64,
    pub projection_far: f64,
    pub near_clip_z: f64,
    pub far_clip_z: f64,

    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_fps: TARGET_FPS,
            step_duration: STEP_DURATION,
            sub_steps: SUB_STEPS,
            integrator: Integrator::default(),
            params: LorenzParams::default(),
            max_particles: MAX_PARTICLES,
            max_trail: MAX_TRAIL,
            particle_count: INITIAL_PARTICLES,
            trail_length: INITIAL_TRAIL,
            fov_radians: FOV_RADIANS,
            projection_near: PROJECTION_NEAR,
            projection_far: PROJECTION_FAR,
            near_clip_z: NEAR_CLIP_Z,
            far_clip_z: FAR_CLIP_Z,
            seed: 42,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.target_fps > 0.0) {
            return Err(ConfigError::TargetFps(self.target_fps));
        }
        if self.sub_steps == 0 {
            return Err(ConfigError::NoSubSteps);
        }
        if !(self.step_duration.is_finite() && self.step_duration > 0.0) {
            return Err(ConfigError::StepDuration(self.step_duration));
        }
        if self.max_particles == 0 {
            return Err(ConfigError::NoParticleCapacity);
        }
        if self.max_trail == 0 {
            return Err(ConfigError::NoTrailCapacity);
        }
        if self.particle_count > self.max_particles {
            return Err(ConfigError::ParticleCount {
                count: self.particle_count,
                max: self.max_particles,
            });
        }
        if self.trail_length > self.max_trail {
            return Err(ConfigError::TrailLength {
                len: self.trail_length,
                max: self.max_trail,
            });
        }
        if !(self.fov_radians > 0.0 && self.fov_radians < std::f64::consts::PI) {
            return Err(ConfigError::FieldOfView(self.fov_radians));
        }
        if !(self.projection_near > 0.0 && self.projection_near < self.projection_far) {
            return Err(ConfigError::ProjectionPlanes {
                near: self.projection_near,
                far: self.projection_far,
            });
        }
        if !(self.near_clip_z > 0.0 && self.near_clip_z < self.far_clip_z) {
            return Err(ConfigError::ClipPlanes {
                near: self.near_clip_z,
                far: self.far_clip_z,
            });
        }
        Ok(())
    }

    /// Time per frame at the target rate, truncated to whole milliseconds.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis((1000.0 / self.target_fps) as u64)
    }
}
