//! Frame scheduler
//!
//! Calls a tick callback once per display refresh while the clock is armed.
//! The loop is single-threaded: each callback runs to completion before the
//! next frame is awaited, and the armed flag is checked before every call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_SUBSTEPS};
use crate::settings::Timestep;

/// Shared start/stop switch for a [`Scheduler`]
#[derive(Debug, Clone, Default)]
pub struct ClockHandle {
    running: Arc<AtomicBool>,
}

impl ClockHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the clock; a subsequent `Scheduler::run` will tick
    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    /// Disarm the clock. Idempotent; no tick starts after this returns.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// One displayed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Frames delivered by this scheduler so far
    pub index: u64,
    /// Time since the previous frame
    pub delta: Duration,
}

impl Frame {
    pub fn delta_ms(&self) -> f64 {
        self.delta.as_secs_f64() * 1000.0
    }
}

/// Source of frame boundaries
pub trait FrameSource {
    /// Block until the next frame and return the time since the previous one
    fn next_frame(&mut self) -> Duration;

    /// Forget timing history (called when a run begins)
    fn reset(&mut self) {}
}

/// Paces frames to a refresh rate using the wall clock
#[derive(Debug, Clone)]
pub struct RealtimeFrames {
    interval: Duration,
    deadline: Option<Instant>,
    last: Option<Instant>,
}

impl RealtimeFrames {
    pub fn new(refresh_hz: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / refresh_hz.max(1) as f64),
            deadline: None,
            last: None,
        }
    }
}

impl FrameSource for RealtimeFrames {
    fn next_frame(&mut self) -> Duration {
        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        let now = Instant::now();
        let delta = self.last.map_or(self.interval, |last| now - last);
        self.last = Some(now);

        // Fell behind: pace from now rather than bursting to catch up
        self.deadline = Some(match self.deadline {
            Some(d) if d + self.interval >= now => d + self.interval,
            _ => now + self.interval,
        });
        delta
    }

    fn reset(&mut self) {
        self.deadline = None;
        self.last = None;
    }
}

/// Constant frame delta with no waiting, for headless runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedFrames {
    delta: Duration,
}

impl FixedFrames {
    pub fn new(delta: Duration) -> Self {
        Self { delta }
    }

    pub fn from_hz(refresh_hz: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / refresh_hz.max(1) as f64))
    }
}

impl FrameSource for FixedFrames {
    fn next_frame(&mut self) -> Duration {
        self.delta
    }
}

/// Drives a tick callback from a frame source while its clock is armed
pub struct Scheduler<S: FrameSource> {
    source: S,
    clock: ClockHandle,
    frames: u64,
}

impl<S: FrameSource> Scheduler<S> {
    pub fn new(source: S, clock: ClockHandle) -> Self {
        Self {
            source,
            clock,
            frames: 0,
        }
    }

    /// Total frames delivered across all runs
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tick once per frame until the clock is stopped. Returns the number of
    /// frames delivered by this run; returns immediately if not armed.
    pub fn run<F: FnMut(Frame)>(&mut self, mut tick: F) -> u64 {
        self.source.reset();
        let mut delivered = 0;
        while self.clock.is_running() {
            let delta = self.source.next_frame();
            if !self.clock.is_running() {
                break;
            }
            tick(Frame {
                index: self.frames,
                delta,
            });
            self.frames += 1;
            delivered += 1;
        }
        delivered
    }
}

/// Simulation steps to run for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub count: u32,
    /// Time each step represents (ms)
    pub dt_ms: f64,
}

/// Turns frame deltas into simulation steps according to a [`Timestep`]
#[derive(Debug, Clone)]
pub struct Pacer {
    timestep: Timestep,
    accumulator_ms: f64,
}

impl Pacer {
    pub fn new(timestep: Timestep) -> Self {
        Self {
            timestep,
            accumulator_ms: 0.0,
        }
    }

    /// Drop any leftover accumulated time
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    pub fn steps(&mut self, frame_delta_ms: f64) -> Steps {
        let delta = frame_delta_ms.clamp(0.0, MAX_FRAME_DELTA_MS);
        match self.timestep {
            Timestep::PerFrame => Steps {
                count: 1,
                dt_ms: delta,
            },
            Timestep::Fixed { hz } => {
                let dt_ms = 1000.0 / hz.max(1) as f64;
                self.accumulator_ms += delta;

                let mut count = 0;
                while self.accumulator_ms >= dt_ms && count < MAX_SUBSTEPS {
                    self.accumulator_ms -= dt_ms;
                    count += 1;
                }
                Steps { count, dt_ms }
            }
        }
    }
}
