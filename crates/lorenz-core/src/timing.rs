use instant::Instant;
use std::time::Duration;

/// Measured frame durations folded into the scale factor that stretches the
/// integration step, so the attractor moves at the same visual speed whatever
/// the frame rate.
///
/// The scale factor is the last frame duration in milliseconds divided by 10;
/// a frame of one second or longer (a stall, a dragged window) yields 0 so the
/// simulation pauses instead of taking one huge step.
#[derive(Clone, Debug)]
pub struct FrameClock {
    budget: Duration,
    frame_start: Option<Instant>,
    last_frame: Duration,
    skip: u32,
}

const STALL: Duration = Duration::from_secs(1);

impl FrameClock {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frame_start: None,
            last_frame: budget,
            skip: 0,
        }
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame. The time since the previous start (pacing
    /// sleep included) becomes the measured frame duration.
    pub fn begin_frame(&mut self) -> Duration {
        let now = Instant::now();
        if let Some(prev) = self.frame_start.replace(now) {
            self.record(now.duration_since(prev));
        }
        self.last_frame
    }

    /// Feed a measured frame duration directly.
    pub fn record(&mut self, elapsed: Duration) {
        self.last_frame = elapsed;
    }

    #[inline]
    pub fn last_frame(&self) -> Duration {
        self.last_frame
    }

    pub fn scale_factor(&self) -> f64 {
        if self.last_frame >= STALL {
            0.0
        } else {
            self.last_frame.as_secs_f64() * 1000.0 / 10.0
        }
    }

    /// Time left in the current frame's budget; zero when over budget or
    /// before the first frame.
    pub fn remaining_budget(&self) -> Duration {
        match self.frame_start {
            Some(start) => self.budget.saturating_sub(start.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Instant at which the current frame's budget runs out.
    pub fn deadline(&self) -> Option<Instant> {
        self.frame_start.map(|start| start + self.budget)
    }

    pub fn skip_frames(&mut self, n: u32) {
        self.skip = self.skip.max(n);
    }

    /// Consume one pending skip; true when this frame should not simulate.
    pub fn take_skip(&mut self) -> bool {
        if self.skip > 0 {
            self.skip -= 1;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn pending_skips(&self) -> u32 {
        self.skip
    }
}
