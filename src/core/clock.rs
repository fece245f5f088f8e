use std::time::Instant;

/// Seconds between FPS refreshes
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame clock - delta time between ticks plus a smoothed FPS readout
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    fps: FpsCounter,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            fps: FpsCounter::default(),
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.fps.record(delta);
        delta
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts frames and refreshes the average once per interval
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    /// Record one frame. Returns true when the FPS value was refreshed.
    pub fn record(&mut self, delta: f32) -> bool {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames as f32 / self.elapsed;
            log::debug!("FPS: {:.1}", self.fps);
            self.frames = 0;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
