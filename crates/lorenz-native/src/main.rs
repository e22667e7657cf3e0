mod gpu;
mod input;
mod raster;

use std::time::{Duration, Instant};

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

use lorenz_core::constants::{FPS_SAMPLE_FRAMES, RESIZE_SKIP_FRAMES};
use lorenz_core::{AppState, SimConfig};

use gpu::GpuState;
use input::{action_for_key, scroll_lines, Controls};
use raster::Framebuffer;

const WINDOW_TITLE: &str = "Lorenz System Viewer";

/// Average frame rate over a fixed number of frames.
struct FpsCounter {
    frames: u32,
    sample: u32,
    elapsed: Duration,
}

impl FpsCounter {
    fn new(sample: u32) -> Self {
        Self {
            frames: 0,
            sample: sample.max(1),
            elapsed: Duration::ZERO,
        }
    }

    /// Add one frame; yields the average once per `sample` frames.
    fn tick(&mut self, frame: Duration) -> Option<f64> {
        self.frames += 1;
        self.elapsed += frame;
        if self.frames < self.sample {
            return None;
        }
        let secs = self.elapsed.as_secs_f64();
        let fps = (secs > 0.0).then(|| self.frames as f64 / secs);
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        fps
    }
}

fn title_with_fps(fps: f64) -> String {
    format!("{WINDOW_TITLE}   |   FPS: {fps:.1}")
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = SimConfig::default();
    let mut app = AppState::new(config.clone())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let size = window.inner_size();
    if (size.width, size.height) != (config.width, config.height) {
        app.resize(size.width, size.height);
    }
    let mut framebuffer = Framebuffer::new(size.width, size.height);
    let mut controls = Controls::new(&app);
    let mut commands = Vec::new();
    let mut fps = FpsCounter::new(FPS_SAMPLE_FRAMES);
    let mut cursor: Option<PhysicalPosition<f64>> = None;
    let mut quit_requested = false;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => quit_requested = true,
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                framebuffer.resize(size.width, size.height);
                app.resize(size.width, size.height);
            }
            WindowEvent::Moved(_) => app.clock.skip_frames(RESIZE_SKIP_FRAMES),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for_key(code) {
                    match state {
                        ElementState::Pressed if !repeat || action.repeats() => {
                            if !controls.press(&mut app, action) {
                                quit_requested = true;
                            }
                        }
                        ElementState::Released => controls.release(&mut app, action),
                        _ => {}
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.orbit_input.dragging = state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(prev) = cursor.replace(position) {
                    app.orbit_input
                        .pointer_moved(prev.x - position.x, prev.y - position.y);
                }
            }
            WindowEvent::CursorLeft { .. } => cursor = None,
            WindowEvent::MouseWheel { delta, .. } => app.orbit_input.scrolled(scroll_lines(delta)),
            _ => {}
        },
        Event::AboutToWait => {
            // exit only between frames
            if quit_requested {
                log::info!("[main] exiting");
                elwt.exit();
                return;
            }
            if let Some(deadline) = app.clock.deadline() {
                if Instant::now() < deadline {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                    return;
                }
            }

            let frame_time = app.clock.begin_frame();
            let stats = app.frame(&mut commands);
            if !stats.skipped {
                framebuffer.clear();
                framebuffer.draw_all(&commands);
                match gpu.present(&framebuffer) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.reconfigure()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("[gpu] out of memory");
                        elwt.exit();
                        return;
                    }
                    Err(e) => log::warn!("[gpu] frame dropped: {e}"),
                }
            }

            if let Some(rate) = fps.tick(frame_time) {
                log::debug!("[main] fps {:.1}", rate);
                if rate > 1.0 {
                    gpu.window.set_title(&title_with_fps(rate));
                }
            }
            if let Some(deadline) = app.clock.deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reported_once_per_sample() {
        let mut fps = FpsCounter::new(50);
        for _ in 0..49 {
            assert_eq!(fps.tick(Duration::from_millis(20)), None);
        }
        let rate = fps.tick(Duration::from_millis(20)).unwrap();
        assert!((rate - 50.0).abs() < 1e-9);
        assert_eq!(fps.tick(Duration::from_millis(20)), None);
    }

    #[test]
    fn zero_time_sample_reports_nothing() {
        let mut fps = FpsCounter::new(2);
        assert_eq!(fps.tick(Duration::ZERO), None);
        assert_eq!(fps.tick(Duration::ZERO), None);
    }

    #[test]
    fn title_shows_one_decimal() {
        let title = title_with_fps(59.94);
        assert_eq!(title, "Lorenz System Viewer   |   FPS: 59.9");
    }
}
