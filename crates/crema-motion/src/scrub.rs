//! Scrub: progress bound to scroll, optionally smoothed over time.

/// How a timeline follows the scroll-derived progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Scrub {
    /// Time-driven playback; scroll only toggles it.
    #[default]
    Off,
    /// Progress equals scroll progress every frame.
    Immediate,
    /// Progress catches up with scroll progress over roughly this many seconds.
    Smoothed(f32),
}

impl Scrub {
    /// Catch-up time in seconds, zero when progress follows scroll directly.
    pub fn lag(&self) -> f32 {
        match self {
            Scrub::Off | Scrub::Immediate => 0.0,
            Scrub::Smoothed(secs) => secs.max(0.0),
        }
    }
}

/// Displayed progress of a scrubbed timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubPlayhead {
    lag: f32,
    current: f32,
}

impl ScrubPlayhead {
    pub fn new(scrub: Scrub) -> Self {
        Self {
            lag: scrub.lag(),
            current: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Jump straight to `target`.
    pub fn snap(&mut self, target: f32) {
        self.current = target.clamp(0.0, 1.0);
    }

    /// Move toward `target` after `dt` seconds. About 95% of the gap is closed
    /// after `lag` seconds.
    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        if self.lag <= 0.0 {
            self.current = target;
            return self.current;
        }
        let blend = 1.0 - (-3.0 * dt.max(0.0) / self.lag).exp();
        self.current += (target - self.current) * blend;
        if (target - self.current).abs() < 1e-4 {
            self.current = target;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_tracks_target() {
        let mut p = ScrubPlayhead::new(Scrub::Immediate);
        assert_eq!(p.advance(0.4, 0.016), 0.4);
        assert_eq!(p.advance(0.1, 0.016), 0.1);
        assert_eq!(p.advance(3.0, 0.016), 1.0);
    }

    #[test]
    fn test_smoothed_lags_then_converges() {
        let mut p = ScrubPlayhead::new(Scrub::Smoothed(1.0));
        let first = p.advance(1.0, 0.1);
        assert!(first > 0.0 && first < 0.5);
        let after_lag = p.advance(1.0, 0.9);
        assert!(after_lag > 0.94);
        for _ in 0..200 {
            p.advance(1.0, 0.05);
        }
        assert_eq!(p.current(), 1.0);
    }

    #[test]
    fn test_smoothed_reverses_on_scroll_back() {
        let mut p = ScrubPlayhead::new(Scrub::Smoothed(0.5));
        p.snap(0.8);
        let v = p.advance(0.2, 0.1);
        assert!(v < 0.8 && v > 0.2);
    }
}
