//! Fixed-step integration of the Lorenz system.
//!
//! `dx/dt = σ(y - x)`, `dy/dt = x(ρ - z) - y`, `dz/dt = xy - βz`

use crate::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl LorenzParams {
    #[inline]
    pub fn derivative(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.sigma * (p.y - p.x),
            p.x * (self.rho - p.z) - p.y,
            p.x * p.y - self.beta * p.z,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Integrator {
    #[default]
    RungeKutta4,
    Euler,
}

impl Integrator {
    #[inline]
    pub fn step(self, point: &mut Vec3, velocity: &mut Vec3, params: &LorenzParams, delta: f64) {
        match self {
            Integrator::RungeKutta4 => rk4_step(point, velocity, params, delta),
            Integrator::Euler => euler_step(point, velocity, params, delta),
        }
    }
}

/// Explicit Euler step. The applied delta is added to `velocity`.
pub fn euler_step(point: &mut Vec3, velocity: &mut Vec3, params: &LorenzParams, delta: f64) {
    let d = params.derivative(*point) * delta;
    *point += d;
    *velocity += d;
}

/// Per-axis fourth-order stage scheme.
///
/// Each axis runs its own four stages where only that axis' coordinate is
/// advanced between stages; the other two coordinates stay at their values
/// from the start of the step. Replacing it with a vector RK4 changes the
/// rendered trajectories. The applied delta is added to `velocity`.
pub fn rk4_step(point: &mut Vec3, velocity: &mut Vec3, params: &LorenzParams, delta: f64) {
    let LorenzParams { sigma, rho, beta } = *params;
    let Vec3 { x, y, z } = *point;

    let dxk1 = sigma * (y - x);
    let x1 = x + delta * dxk1 / 2.0;
    let dxk2 = sigma * (y - x1);
    let x2 = x + delta * dxk2 / 2.0;
    let dxk3 = sigma * (y - x2);
    let x3 = x + delta * dxk3;
    let dxk4 = sigma * (y - x3);
    let dxdt = (dxk1 + 2.0 * dxk2 + 2.0 * dxk3 + dxk4) / 6.0 * delta;

    let dyk1 = x * (rho - z) - y;
    let y1 = y + delta * dyk1 / 2.0;
    let dyk2 = x * (rho - z) - y1;
    let y2 = y + delta * dyk2 / 2.0;
    let dyk3 = x * (rho - z) - y2;
    let y3 = y + delta * dyk3;
    let dyk4 = x * (rho - z) - y3;
    let dydt = (dyk1 + 2.0 * dyk2 + 2.0 * dyk3 + dyk4) / 6.0 * delta;

    let dzk1 = x * y - beta * z;
    let z1 = z + delta * dzk1 / 2.0;
    let dzk2 = x * y - beta * z1;
    let z2 = z + delta * dzk2 / 2.0;
    let dzk3 = x * y - beta * z2;
    let z3 = z + delta * dzk3;
    let dzk4 = x * y - beta * z3;
    let dzdt = (dzk1 + 2.0 * dzk2 + 2.0 * dzk3 + dzk4) / 6.0 * delta;

    let d = Vec3::new(dxdt, dydt, dzdt);
    *point += d;
    *velocity += d;
}

/// How one rendered frame is split into integration sub-steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSchedule {
    /// Simulated time per frame at a frame scale of 10 (100 ms frames).
    pub step_duration: f64,
    pub sub_steps: u32,
}

impl StepSchedule {
    /// `(step_duration / sub_steps) * (frame_scale / 10)`
    #[inline]
    pub fn step_size(&self, frame_scale: f64) -> f64 {
        (self.step_duration / self.sub_steps as f64) * (frame_scale / 10.0)
    }

    /// Run every sub-step of one frame on `point`, returning the summed
    /// per-step deltas (the velocity estimate used for colouring).
    pub fn advance(
        &self,
        integrator: Integrator,
        point: &mut Vec3,
        params: &LorenzParams,
        frame_scale: f64,
    ) -> Vec3 {
        let delta = self.step_size(frame_scale);
        let mut velocity = Vec3::ZERO;
        for _ in 0..self.sub_steps {
            integrator.step(point, &mut velocity, params, delta);
        }
        velocity
    }
}
