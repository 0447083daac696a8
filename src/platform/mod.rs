//! Platform abstraction layer
//!
//! Frame scheduling: a scheduler calls a frame handler with the host
//! timestamp (ms) and keeps re-arming it until the handler says `Stop`.
//! Browsers drive this from `requestAnimationFrame` in the binary; here are
//! the native and test schedulers.

use crate::sim::LoopControl;

pub trait FrameScheduler {
    /// Invoke `frame` once per frame until it returns `Stop` or the
    /// scheduler runs out of frames. Returns the number of frames delivered.
    fn run(&mut self, frame: &mut dyn FnMut(f64) -> LoopControl) -> u64;
}

/// Simulated clock: frames are delivered back to back with a fixed spacing.
/// Lets the core be single-stepped without any real timing.
#[derive(Debug, Clone)]
pub struct SteppingScheduler {
    now_ms: f64,
    frame_ms: f64,
    max_frames: u64,
}

impl SteppingScheduler {
    pub fn new(start_ms: f64, frame_ms: f64, max_frames: u64) -> Self {
        Self {
            now_ms: start_ms,
            frame_ms,
            max_frames,
        }
    }

    /// Nominal 60 Hz display
    pub fn at_60hz(start_ms: f64, max_frames: u64) -> Self {
        Self::new(
            start_ms,
            1000.0 / crate::consts::NOMINAL_FPS as f64,
            max_frames,
        )
    }

    /// Timestamp of the most recent frame
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameScheduler for SteppingScheduler {
    fn run(&mut self, frame: &mut dyn FnMut(f64) -> LoopControl) -> u64 {
        let mut delivered = 0;
        while delivered < self.max_frames {
            self.now_ms += self.frame_ms;
            delivered += 1;
            if frame(self.now_ms) == LoopControl::Stop {
                break;
            }
        }
        delivered
    }
}

/// Wall-clock scheduler that sleeps to hold a target rate
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct RealtimeScheduler {
    origin: std::time::Instant,
    frame: std::time::Duration,
    max_frames: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl RealtimeScheduler {
    pub fn new(fps: u32, max_frames: u64) -> Self {
        Self {
            origin: std::time::Instant::now(),
            frame: std::time::Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            max_frames,
        }
    }

    /// Milliseconds since the scheduler was created
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameScheduler for RealtimeScheduler {
    fn run(&mut self, frame: &mut dyn FnMut(f64) -> LoopControl) -> u64 {
        let mut delivered = 0;
        let mut next = std::time::Instant::now();
        while delivered < self.max_frames {
            next += self.frame;
            let now = std::time::Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            } else {
                // Running late: don't try to catch up with a burst
                next = now;
            }
            delivered += 1;
            if frame(self.now_ms()) == LoopControl::Stop {
                break;
            }
        }
        delivered
    }
}
