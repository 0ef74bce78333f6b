/// Upper bound on a single simulation step, in seconds.
/// Longer frame deltas (hitches, debugger pauses) are truncated to this.
pub const MAX_DT: f32 = 0.1;

/// Clamp a host-supplied frame delta into `[0, max_dt]`.
/// Non-finite and negative deltas become zero.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// A timer that counts down to zero and stays there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    /// (Re)start the countdown. Non-positive durations leave it expired.
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Extend the countdown so that at least `duration` remains.
    pub fn extend_to(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    /// Advance by `dt`. Returns true on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining == 0.0
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Progress through a fixed duration as a value in `[0, 1]`.
/// A zero (or negative) duration is already complete.
#[inline]
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_caps_hitches() {
        assert_eq!(clamp_dt(0.5, MAX_DT), MAX_DT);
        assert_eq!(clamp_dt(0.016, MAX_DT), 0.016);
    }

    #[test]
    fn clamp_rejects_garbage() {
        assert_eq!(clamp_dt(-1.0, MAX_DT), 0.0);
        assert_eq!(clamp_dt(f32::NAN, MAX_DT), 0.0);
        assert_eq!(clamp_dt(f32::INFINITY, MAX_DT), 0.0);
    }

    #[test]
    fn countdown_floors_at_zero() {
        let mut c = Countdown::idle();
        c.start(0.25);
        assert!(!c.tick(0.1));
        assert!(c.is_running());
        assert!(c.tick(0.2));
        assert_eq!(c.remaining(), 0.0);
        // Already expired: no second edge.
        assert!(!c.tick(0.1));
    }

    #[test]
    fn zero_duration_never_runs() {
        let mut c = Countdown::idle();
        c.start(0.0);
        assert!(!c.is_running());
        assert!(!c.tick(0.016));
    }

    #[test]
    fn extend_keeps_longer_remaining() {
        let mut c = Countdown::idle();
        c.start(1.0);
        c.extend_to(0.4);
        assert!((c.remaining() - 1.0).abs() < 1e-6);
        c.extend_to(2.0);
        assert!((c.remaining() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn progress_handles_zero_duration() {
        assert_eq!(progress(0.0, 0.0), 1.0);
        assert!((progress(0.25, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(progress(2.0, 0.5), 1.0);
    }
}
