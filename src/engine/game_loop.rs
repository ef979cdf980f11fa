// Fixed-timestep tick clock
//
// The window asks for a redraw once per display refresh. The clock turns the
// real time since the previous redraw into a whole number of 1/60 s game
// ticks, so sprite frames and the attack window advance at the same rate on
// any monitor.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// One tick at 60 Hz, rounded up to whole microseconds
pub const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Ticks a single redraw may run; a longer stall drops the backlog
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Redraws averaged for the frame rate readout
const FPS_WINDOW: usize = 60;

pub struct GameLoop {
    /// Real time not yet turned into ticks
    backlog: Duration,
    last_frame: Instant,
    paused: bool,
    recent_frames: VecDeque<Duration>,
    recent_total: Duration,
    frame_count: u64,
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            backlog: Duration::ZERO,
            last_frame: Instant::now(),
            paused: false,
            recent_frames: VecDeque::with_capacity(FPS_WINDOW),
            recent_total: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Start a redraw; returns how many ticks to run before presenting
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.begin_frame_with(elapsed)
    }

    /// [`GameLoop::begin_frame`] with a given redraw interval
    pub fn begin_frame_with(&mut self, elapsed: Duration) -> u32 {
        self.frame_count += 1;
        self.record(elapsed);

        if self.paused {
            return 0;
        }

        self.backlog += elapsed;
        let mut ticks = 0;
        while self.backlog >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.backlog -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.backlog = Duration::ZERO;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    fn record(&mut self, elapsed: Duration) {
        self.recent_frames.push_back(elapsed);
        self.recent_total += elapsed;
        if self.recent_frames.len() > FPS_WINDOW {
            if let Some(oldest) = self.recent_frames.pop_front() {
                self.recent_total -= oldest;
            }
        }
    }

    /// Game time covered by one tick
    pub fn tick_duration(&self) -> Duration {
        FIXED_TIMESTEP_DURATION
    }

    /// Redraws per second over the recent window
    pub fn fps(&self) -> f32 {
        let seconds = self.recent_total.as_secs_f32();
        if self.recent_frames.is_empty() || seconds <= 0.0 {
            return 0.0;
        }
        self.recent_frames.len() as f32 / seconds
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume without replaying the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.backlog = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
