use std::time::{Duration, Instant};

/// Source of total elapsed time.
///
/// Animation reads time only through this trait so it can be driven by a
/// fixed timeline in tests.
pub trait TimeSource {
    /// Seconds since the source started.
    fn total_seconds(&self) -> f64;
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Time elapsed since the clock started, in seconds. Not clamped.
    pub total_seconds: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Snapshot at an arbitrary point on a timeline.
    pub fn at(total_seconds: f64, frame_index: u64) -> Self {
        Self {
            dt: 0.0,
            total_seconds,
            now: Instant::now(),
            frame_index,
        }
    }
}

impl TimeSource for FrameTime {
    fn total_seconds(&self) -> f64 {
        self.total_seconds
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per window so delta time is never shared between render loops.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls. Total time is measured from the start
/// instant and is not affected by the clamp.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    /// Total time and the frame counter keep running.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            total_seconds: now.saturating_duration_since(self.start).as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        let indices: Vec<u64> = (0..3).map(|_| clock.tick().frame_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn dt_is_clamped_but_total_is_not() {
        let mut clock = FrameClock::new();
        let later = clock.start + Duration::from_secs(2);
        let ft = clock.tick_at(later);
        assert_eq!(ft.dt, 0.25);
        assert_eq!(ft.total_seconds, 2.0);
    }

    #[test]
    fn tiny_dt_is_raised_to_minimum() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        let ft = clock.tick_at(start);
        assert_eq!(ft.dt, Duration::from_micros(100).as_secs_f32());
    }

    #[test]
    fn reset_keeps_total_time() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        clock.tick_at(start + Duration::from_secs(1));
        clock.reset();
        let ft = clock.tick_at(start + Duration::from_secs(3));
        assert!(ft.total_seconds >= 3.0);
        assert_eq!(ft.frame_index, 1);
    }
}
