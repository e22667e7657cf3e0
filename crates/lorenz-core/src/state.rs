//! Viewer state owned by the frame loop.
//!
//! [`AppState`] holds everything that used to be ambient: parameters,
//! particles, camera, toggles, projection and clip planes. The front-end
//! feeds it input and a viewport size, calls [`AppState::frame`] once per
//! frame and rasterizes the returned draw commands.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{Camera, OrbitInput};
use crate::clip::ClipPlanes;
use crate::config::{ConfigError, SimConfig};
use crate::constants::*;
use crate::lorenz::{LorenzParams, StepSchedule};
use crate::math::{Mat4, Vec3};
use crate::particles::ParticleSystem;
use crate::projection::Viewport;
use crate::render::{draw_origin_axis, DrawCommand, Primitive, RenderView, Rgba};
use crate::timing::FrameClock;

/// What gets drawn each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderToggles {
    pub tip: bool,
    pub trail: bool,
    pub origin: bool,
    pub velocity_colors: bool,
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self {
            tip: true,
            trail: true,
            origin: true,
            velocity_colors: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub skipped: bool,
    pub lines: usize,
    pub rects: usize,
    /// Primitives rejected by clipping.
    pub culled: usize,
}

impl FrameStats {
    fn push(&mut self, out: &mut Vec<DrawCommand>, cmd: Option<DrawCommand>) {
        match cmd {
            Some(cmd) => {
                match cmd.primitive {
                    Primitive::Line(_) => self.lines += 1,
                    Primitive::Rect(_) => self.rects += 1,
                }
                out.push(cmd);
            }
            None => self.culled += 1,
        }
    }
}

pub struct AppState {
    pub config: SimConfig,
    pub params: LorenzParams,
    pub particles: ParticleSystem,
    pub camera: Camera,
    pub orbit_input: OrbitInput,
    pub toggles: RenderToggles,
    pub clock: FrameClock,
    step_duration: f64,
    trail_length: usize,
    viewport: Viewport,
    projection: Mat4,
    planes: ClipPlanes,
    rng: StdRng,
}

impl AppState {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = ParticleSystem::new(
            config.max_particles,
            config.max_trail,
            config.particle_count,
            &mut rng,
        );
        let viewport = Viewport::new(config.width, config.height);
        let projection = Mat4::projection(
            config.fov_radians,
            config.projection_near,
            config.projection_far,
            viewport.aspect(),
        );
        let planes = ClipPlanes::new(config.near_clip_z, config.far_clip_z, viewport);
        log::info!(
            "[state] particles={}/{} trail={}/{} viewport={}x{}",
            config.particle_count,
            config.max_particles,
            config.trail_length,
            config.max_trail,
            config.width,
            config.height,
        );
        log::info!(
            "[state] integrator={:?} sub_steps={} step={}",
            config.integrator,
            config.sub_steps,
            config.step_duration,
        );
        Ok(Self {
            params: config.params,
            particles,
            camera: Camera::default(),
            orbit_input: OrbitInput::default(),
            toggles: RenderToggles::default(),
            clock: FrameClock::new(config.frame_budget()),
            step_duration: config.step_duration,
            trail_length: config.trail_length,
            viewport,
            projection,
            planes,
            rng,
            config,
        })
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    #[inline]
    pub fn planes(&self) -> &ClipPlanes {
        &self.planes
    }

    /// Rebuild projection and screen planes for a new viewport size. Zero
    /// sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.projection = Mat4::projection(
            self.config.fov_radians,
            self.config.projection_near,
            self.config.projection_far,
            self.viewport.aspect(),
        );
        self.planes.resize(self.viewport);
        self.clock.skip_frames(RESIZE_SKIP_FRAMES);
        log::debug!("[state] viewport rebuilt {}x{}", width, height);
    }

    pub fn reset_particles(&mut self) {
        self.particles.reset(&mut self.rng);
        log::debug!("[state] particles reset");
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
        log::debug!("[state] camera reset");
    }

    // ---------------- Tunables ----------------

    #[inline]
    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    pub fn set_step_duration(&mut self, d: f64) {
        let max = STEP_DURATION_MIN + STEP_DURATION_SPAN;
        self.step_duration = d.clamp(STEP_DURATION_MIN, max);
    }

    /// Slider position `t` in [0, 1] to `0.01 + t * 0.1`.
    pub fn set_step_duration_slider(&mut self, t: f64) {
        let t = t.clamp(0.0, 1.0);
        self.set_step_duration(STEP_DURATION_MIN + t * STEP_DURATION_SPAN);
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.active()
    }

    pub fn set_particle_count(&mut self, n: usize) {
        self.particles.set_active(n);
    }

    /// Cubic response so the low end of the slider has fine control.
    pub fn set_particle_slider(&mut self, t: f64) {
        let t = t.clamp(0.0, 1.0);
        let count = (t.powi(3) * self.particles.capacity() as f64).floor();
        self.set_particle_count(count as usize);
    }

    #[inline]
    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    pub fn set_trail_length(&mut self, n: usize) {
        self.trail_length = n.min(self.config.max_trail);
    }

    pub fn set_trail_slider(&mut self, t: f64) {
        let t = t.clamp(0.0, 1.0);
        self.set_trail_length((t * self.config.max_trail as f64).floor() as usize);
    }

    fn schedule(&self) -> StepSchedule {
        StepSchedule {
            step_duration: self.step_duration,
            sub_steps: self.config.sub_steps,
        }
    }

    /// Object-to-world transform for particle coordinates: translate the
    /// attractor onto the origin, then scale it down.
    pub fn particle_transform() -> Mat4 {
        let rotation = Mat4::rotation_y(0.0);
        let translation = Mat4::translation(Vec3::from(PARTICLE_OFFSET));
        let scaling = Mat4::scaling(Vec3::new(PARTICLE_SCALE, PARTICLE_SCALE, PARTICLE_SCALE));
        let transform = Mat4::multiply(&rotation, &translation);
        Mat4::multiply(&scaling, &transform)
    }

    /// One frame: camera, integration, draw commands into `out` (cleared
    /// first). Returns with `skipped` set when a resize asked for a pause.
    pub fn frame(&mut self, out: &mut Vec<DrawCommand>) -> FrameStats {
        out.clear();
        let mut stats = FrameStats::default();
        if self.clock.take_skip() {
            self.orbit_input.discard_drag();
            stats.skipped = true;
            return stats;
        }

        let scale = self.clock.scale_factor();
        let camera_matrix = self.camera.update(&mut self.orbit_input, scale);
        let view_matrix = Camera::view_matrix(&camera_matrix);

        let world_matrix = Mat4::identity();
        let world_to_view = Mat4::multiply(&view_matrix, &world_matrix);
        let object_to_view = Mat4::multiply(&world_to_view, &Self::particle_transform());

        let world_view = RenderView {
            transform: world_to_view,
            projection: self.projection,
            planes: self.planes,
            viewport: self.viewport,
        };
        let object_view = world_view.with_transform(object_to_view);

        let schedule = self.schedule();
        let integrator = self.config.integrator;
        let params = self.params;
        let toggles = self.toggles;
        let trail_length = self.trail_length;

        for (point, trail) in self.particles.iter_active_mut() {
            let velocity = schedule.advance(integrator, point, &params, scale);
            let color = if toggles.velocity_colors {
                velocity_color(velocity)
            } else {
                Rgba::WHITE
            };

            let shown = trail.count().min(trail_length);
            if toggles.trail && shown > 0 {
                let segments = trail.recent(shown).zip(trail.recent(shown).skip(1));
                for (j, (a, b)) in segments.enumerate() {
                    let segment_color = color.with_alpha(trail_opacity(j, shown));
                    let cmd = object_view
                        .draw_line(*a, *b)
                        .map(|line| DrawCommand::line(line, segment_color));
                    stats.push(out, cmd);
                }
                // join the newest trail entry to the live position
                if let Some(newest) = trail.latest() {
                    let head_color = color.with_alpha(trail_opacity(shown - 1, shown));
                    let cmd = object_view
                        .draw_line(newest, *point)
                        .map(|line| DrawCommand::line(line, head_color));
                    stats.push(out, cmd);
                }
            }

            if toggles.tip {
                let cmd = object_view
                    .draw_point(*point, TIP_RADIUS)
                    .map(|rect| DrawCommand::rect(rect, color.with_alpha(255)));
                stats.push(out, cmd);
            }

            trail.append(*point);
        }

        if toggles.origin {
            for cmd in draw_origin_axis(&world_view, ORIGIN_UNIT) {
                stats.push(out, Some(cmd));
            }
        }

        log::trace!(
            "[frame] lines={} rects={} culled={} scale={:.2}",
            stats.lines,
            stats.rects,
            stats.culled,
            scale
        );
        stats
    }
}

/// Per-channel `(v + 4) * 32`, clamped to a byte.
pub fn velocity_color(velocity: Vec3) -> Rgba {
    let channel = |v: f64| {
        let scaled = (v + VELOCITY_COLOR_OFFSET) * VELOCITY_COLOR_GAIN;
        scaled.clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        channel(velocity.x),
        channel(velocity.y),
        channel(velocity.z),
        255,
    )
}

/// Alpha for trail segment `j` of `len`: `(j / len)^5 * 255`, so the tail
/// fades out towards the oldest entry.
pub fn trail_opacity(j: usize, len: usize) -> u8 {
    if len == 0 {
        return 0;
    }
    ((j as f64 / len as f64).powi(TRAIL_FADE_EXPONENT) * 255.0).clamp(0.0, 255.0) as u8
}
