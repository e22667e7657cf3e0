use winit::dpi::PhysicalPosition;
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

use lorenz_core::constants::{STEP_DURATION_MIN, STEP_DURATION_SPAN};
use lorenz_core::{AppState, Movement, Turn};

/// Slider travel per key press.
pub const SLIDER_STEP: f64 = 0.05;
/// Pixels of touchpad scroll treated as one wheel line.
pub const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Down,
    Up,
}

impl Nudge {
    fn delta(self) -> f64 {
        match self {
            Nudge::Down => -SLIDER_STEP,
            Nudge::Up => SLIDER_STEP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Movement),
    Look(Turn),
    ToggleCameraMode,
    ResetParticles,
    ResetCamera,
    ToggleTip,
    ToggleTrail,
    ToggleOrigin,
    ToggleVelocityColors,
    Particles(Nudge),
    StepDuration(Nudge),
    TrailLength(Nudge),
    Quit,
}

impl Action {
    /// Whether OS key repeat should fire the action again.
    pub fn repeats(self) -> bool {
        matches!(
            self,
            Action::Particles(_) | Action::StepDuration(_) | Action::TrailLength(_)
        )
    }
}

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyW => Action::Move(Movement::Forward),
        KeyCode::KeyS => Action::Move(Movement::Back),
        KeyCode::KeyA => Action::Move(Movement::Left),
        KeyCode::KeyD => Action::Move(Movement::Right),
        KeyCode::KeyQ => Action::Move(Movement::Up),
        KeyCode::KeyE => Action::Move(Movement::Down),
        KeyCode::ArrowLeft => Action::Look(Turn::Left),
        KeyCode::ArrowRight => Action::Look(Turn::Right),
        KeyCode::ArrowUp => Action::Look(Turn::Up),
        KeyCode::ArrowDown => Action::Look(Turn::Down),
        KeyCode::Tab => Action::ToggleCameraMode,
        KeyCode::KeyR => Action::ResetParticles,
        KeyCode::KeyC => Action::ResetCamera,
        KeyCode::KeyT => Action::ToggleTip,
        KeyCode::KeyL => Action::ToggleTrail,
        KeyCode::KeyO => Action::ToggleOrigin,
        KeyCode::KeyV => Action::ToggleVelocityColors,
        KeyCode::BracketLeft => Action::Particles(Nudge::Down),
        KeyCode::BracketRight => Action::Particles(Nudge::Up),
        KeyCode::Minus => Action::StepDuration(Nudge::Down),
        KeyCode::Equal => Action::StepDuration(Nudge::Up),
        KeyCode::Comma => Action::TrailLength(Nudge::Down),
        KeyCode::Period => Action::TrailLength(Nudge::Up),
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Wheel lines from either delta kind; positive zooms in.
pub fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y / PIXELS_PER_LINE,
    }
}

/// Slider positions in [0, 1] behind the discrete controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sliders {
    pub step_duration: f64,
    pub particles: f64,
    pub trail: f64,
}

impl Sliders {
    /// Positions that reproduce the state's current values.
    pub fn from_state(app: &AppState) -> Self {
        let particle_max = app.particles.capacity().max(1) as f64;
        let trail_max = app.config.max_trail.max(1) as f64;
        let step = (app.step_duration() - STEP_DURATION_MIN) / STEP_DURATION_SPAN;
        Self {
            step_duration: step.clamp(0.0, 1.0),
            particles: (app.particle_count() as f64 / particle_max).cbrt(),
            trail: app.trail_length() as f64 / trail_max,
        }
    }
}

/// Applies key actions to the app state.
#[derive(Clone, Debug)]
pub struct Controls {
    pub sliders: Sliders,
}

impl Controls {
    pub fn new(app: &AppState) -> Self {
        Self {
            sliders: Sliders::from_state(app),
        }
    }

    /// Returns false when the action asks to quit.
    pub fn press(&mut self, app: &mut AppState, action: Action) -> bool {
        match action {
            Action::Move(m) => app.camera.start_moving(m),
            Action::Look(t) => app.camera.start_turning(t),
            Action::ToggleCameraMode => {
                app.camera.toggle_mode();
                log::info!("[input] camera mode {:?}", app.camera.mode);
            }
            Action::ResetParticles => app.reset_particles(),
            Action::ResetCamera => app.reset_camera(),
            Action::ToggleTip => app.toggles.tip = !app.toggles.tip,
            Action::ToggleTrail => app.toggles.trail = !app.toggles.trail,
            Action::ToggleOrigin => app.toggles.origin = !app.toggles.origin,
            Action::ToggleVelocityColors => {
                app.toggles.velocity_colors = !app.toggles.velocity_colors
            }
            Action::Particles(n) => {
                self.sliders.particles = (self.sliders.particles + n.delta()).clamp(0.0, 1.0);
                app.set_particle_slider(self.sliders.particles);
                log::info!("[input] particles {}", app.particle_count());
            }
            Action::StepDuration(n) => {
                self.sliders.step_duration =
                    (self.sliders.step_duration + n.delta()).clamp(0.0, 1.0);
                app.set_step_duration_slider(self.sliders.step_duration);
                log::info!("[input] step duration {:.3}", app.step_duration());
            }
            Action::TrailLength(n) => {
                self.sliders.trail = (self.sliders.trail + n.delta()).clamp(0.0, 1.0);
                app.set_trail_slider(self.sliders.trail);
                log::info!("[input] trail length {}", app.trail_length());
            }
            Action::Quit => return false,
        }
        true
    }

    pub fn release(&mut self, app: &mut AppState, action: Action) {
        match action {
            Action::Move(_) => app.camera.stop_moving(),
            Action::Look(t) => app.camera.stop_turning(t),
            _ => {}
        }
    }
}
