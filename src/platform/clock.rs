//! Frame clock
//!
//! Turns the host's monotonic timestamps (ms, e.g. `requestAnimationFrame`)
//! into simulation deltas in seconds.

use crate::consts::MAX_FRAME_DT;

/// Delta-time source for the simulation
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`
    ///
    /// The first frame after construction or `resync` reports 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the baseline so a resumed run does not catch up on paused time
    pub fn resync(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(1234.0), 0.0);
        assert!((clock.delta(1250.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut clock = FrameClock::default();
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), 0.1);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::default();
        clock.delta(1000.0);
        assert_eq!(clock.delta(900.0), 0.0);
    }

    #[test]
    fn test_resync_drops_paused_time() {
        let mut clock = FrameClock::new(10.0);
        clock.delta(0.0);
        clock.delta(16.0);
        clock.resync();
        // Ten seconds paused
        assert_eq!(clock.delta(10_016.0), 0.0);
        assert!((clock.delta(10_032.0) - 0.016).abs() < 1e-6);
    }
}
