//! Scroll math behind the marquee speed-up, line reveals and parallax.

use std::collections::VecDeque;

const VELOCITY_WINDOW_MS: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn top_in(&self, viewport: &Viewport) -> f64 {
        self.top - viewport.scroll_y
    }
}

// px/s
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, t_ms: f64, y: f64) -> f64 {
        self.samples.push_back((t_ms, y));
        while self.samples.len() > 2
            && self.samples.front().is_some_and(|(t, _)| t_ms - t > VELOCITY_WINDOW_MS)
        {
            self.samples.pop_front();
        }
        self.velocity()
    }

    pub fn velocity(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some((t0, y0)), Some((t1, y1))) if t1 - t0 >= 1.0 => (y1 - y0) / ((t1 - t0) / 1000.0),
            _ => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

/// Playback rate for a velocity already divided by 1000.
pub fn rate_multiplier(scaled_velocity: f64, clamp: f64) -> f64 {
    1.0 + scaled_velocity.clamp(-clamp, clamp)
}

#[derive(Debug)]
pub struct RateGovernor {
    last: f64,
    threshold: f64,
    clamp: f64,
}

impl RateGovernor {
    pub fn new(threshold: f64, clamp: f64) -> Self {
        Self { last: 0.0, threshold, clamp }
    }

    // Velocity in px/s.
    pub fn observe(&mut self, velocity: f64) -> Option<f64> {
        let scaled = velocity / 1000.0;
        if (scaled - self.last).abs() > self.threshold {
            self.last = scaled;
            Some(rate_multiplier(scaled, self.clamp))
        } else {
            None
        }
    }
}

/// Fires once, the first time an element's top edge reaches
/// `start_fraction` of the viewport height.
#[derive(Debug)]
pub struct RevealTrigger {
    start_fraction: f64,
    fired: bool,
}

impl RevealTrigger {
    pub fn new(start_fraction: f64) -> Self {
        Self { start_fraction, fired: false }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn check(&mut self, layout: &LayoutBox, viewport: &Viewport) -> bool {
        if self.fired {
            return false;
        }
        if layout.top_in(viewport) <= viewport.height * self.start_fraction {
            self.fired = true;
            return true;
        }
        false
    }
}

/// 0 when the element's top meets the viewport bottom, 1 when its bottom
/// meets the viewport top.
pub fn parallax_progress(layout: &LayoutBox, viewport: &Viewport) -> f64 {
    let span = layout.height + viewport.height;
    if span <= 0.0 {
        return 0.0;
    }
    ((viewport.scroll_y + viewport.height - layout.top) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(scroll_y: f64) -> Viewport {
        Viewport { scroll_y, height: 800.0 }
    }

    #[test]
    fn velocity_from_recent_samples() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.record(0.0, 0.0), 0.0);
        let v = tracker.record(16.0, 32.0);
        assert!((v - 2000.0).abs() < 1e-9);
        let v = tracker.record(32.0, 16.0);
        assert!((v - 500.0).abs() < 1e-9);
    }

    #[test]
    fn stale_samples_fall_out_of_the_window() {
        let mut tracker = VelocityTracker::new();
        tracker.record(0.0, 0.0);
        tracker.record(500.0, 1000.0);
        tracker.record(520.0, 1040.0);
        assert!((tracker.velocity() - 2000.0).abs() < 1e-9);
        tracker.reset();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn governor_ignores_small_changes() {
        let mut governor = RateGovernor::new(0.2, 2.0);
        assert_eq!(governor.observe(150.0), None);
        assert_eq!(governor.observe(-200.0), None);
        assert_eq!(governor.observe(500.0), Some(1.5));
        assert_eq!(governor.observe(650.0), None);
        assert_eq!(governor.observe(0.0), Some(1.0));
    }

    #[test]
    fn governor_clamps_the_rate() {
        let mut governor = RateGovernor::new(0.2, 2.0);
        assert_eq!(governor.observe(9000.0), Some(3.0));
        assert_eq!(governor.observe(-9000.0), Some(-1.0));
    }

    #[test]
    fn rate_is_monotonic_in_velocity() {
        let mut last = f64::MIN;
        for v in -40..=40 {
            let rate = rate_multiplier(v as f64 * 0.1, 2.0);
            assert!(rate >= last);
            assert!((-1.0..=3.0).contains(&rate));
            last = rate;
        }
    }

    #[test]
    fn reveal_fires_once_at_eighty_percent() {
        let layout = LayoutBox { top: 2000.0, height: 120.0 };
        let mut trigger = RevealTrigger::new(0.8);
        assert!(!trigger.check(&layout, &viewport_at(1300.0)));
        assert!(!trigger.fired());
        // top_in = 2000 - 1360 = 640 = 0.8 * 800
        assert!(trigger.check(&layout, &viewport_at(1360.0)));
        assert!(trigger.fired());
        assert!(!trigger.check(&layout, &viewport_at(1500.0)));
        assert!(!trigger.check(&layout, &viewport_at(0.0)));
        assert!(trigger.fired());
    }

    #[test]
    fn reveal_fires_when_already_past() {
        let layout = LayoutBox { top: 100.0, height: 50.0 };
        let mut trigger = RevealTrigger::new(0.8);
        assert!(trigger.check(&layout, &viewport_at(0.0)));
    }

    #[test]
    fn parallax_progress_spans_the_pass() {
        let layout = LayoutBox { top: 2000.0, height: 400.0 };
        assert_eq!(parallax_progress(&layout, &viewport_at(0.0)), 0.0);
        assert_eq!(parallax_progress(&layout, &viewport_at(1200.0)), 0.0);
        assert!((parallax_progress(&layout, &viewport_at(1800.0)) - 0.5).abs() < 1e-9);
        assert_eq!(parallax_progress(&layout, &viewport_at(2400.0)), 1.0);
        assert_eq!(parallax_progress(&layout, &viewport_at(5000.0)), 1.0);
    }

    #[test]
    fn parallax_tracks_scroll_both_ways() {
        let layout = LayoutBox { top: 2000.0, height: 400.0 };
        let down: Vec<f64> = (1200..=2400)
            .step_by(100)
            .map(|y| parallax_progress(&layout, &viewport_at(y as f64)))
            .collect();
        assert!(down.windows(2).all(|w| w[1] > w[0]));
        let up: Vec<f64> = (1200..=2400)
            .rev()
            .step_by(100)
            .map(|y| parallax_progress(&layout, &viewport_at(y as f64)))
            .collect();
        assert!(up.windows(2).all(|w| w[1] < w[0]));
    }
}
