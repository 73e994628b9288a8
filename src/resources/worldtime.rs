//! Time sources.
//!
//! Playback only needs a monotonic millisecond reading, expressed by the
//! [`Clock`] trait. [`WorldTime`] is the ECS-facing clock advanced once per
//! frame by [`update_world_time`](crate::systems::time::update_world_time);
//! [`SystemClock`] and [`ManualClock`] serve callers outside the ECS.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use bevy_ecs::prelude::Resource;

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Simulation time advanced by the frame loop.
///
/// `elapsed` keeps the fractional part of scaled deltas; `elapsed_ms` is its
/// whole-millisecond reading.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled milliseconds since start.
    pub elapsed: f64,
    pub elapsed_ms: u64,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            elapsed_ms: 0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

impl Clock for WorldTime {
    fn now_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Move forward by `ms`. Returns the new time.
    pub fn advance(&self, ms: u64) -> u64 {
        self.now.fetch_add(ms, Ordering::Relaxed) + ms
    }

    /// Jump to `ms`; earlier values are ignored to stay monotonic.
    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_ms(), 10);
        assert_eq!(clock.advance(5), 15);
        assert_eq!(clock.now_ms(), 15);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new(100);
        clock.set(50);
        assert_eq!(clock.now_ms(), 100);
        clock.set(150);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_world_time_reads_elapsed() {
        let wt = WorldTime {
            elapsed_ms: 1234,
            ..Default::default()
        };
        assert_eq!(wt.now_ms(), 1234);
    }
}
