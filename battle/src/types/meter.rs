//! Animated health meter

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

/// Displayed health fraction easing toward its target over time
#[derive(Debug, Clone, PartialEq)]
pub struct HealthMeter {
    from: f32,
    to: f32,
    /// `None` while resting
    started_at: Option<Duration>,
    duration: Duration,
}

impl HealthMeter {
    /// A resting meter showing `fraction`
    pub fn new(fraction: f32, duration: Duration) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self {
            from: fraction,
            to: fraction,
            started_at: None,
            duration,
        }
    }

    /// Start easing from the currently displayed value to `target`.
    /// Returns how long the animation runs.
    pub fn animate_to(&mut self, target: f32, now: Duration) -> Duration {
        self.from = self.fraction_at(now);
        self.to = target.clamp(0.0, 1.0);
        self.started_at = Some(now);
        self.duration
    }

    /// Fraction the meter shows at `now` (sine-out easing)
    pub fn fraction_at(&self, now: Duration) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = (progress * FRAC_PI_2).sin();
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.progress(now) < 1.0
    }

    fn progress(&self, now: Duration) -> f32 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_resting_meter() {
        let meter = HealthMeter::new(0.6, ms(1000));
        assert_eq!(meter.fraction_at(ms(0)), 0.6);
        assert!(!meter.is_animating(ms(0)));
        assert!(!meter.is_animating(ms(400)));
        assert_eq!(meter.fraction_at(ms(400)), 0.6);
    }

    #[test]
    fn test_settles_after_animation() {
        let mut meter = HealthMeter::new(1.0, ms(1000));
        meter.animate_to(0.5, ms(0));
        assert!(meter.is_animating(ms(0)));
        assert!(!meter.is_animating(ms(1000)));
        assert_eq!(meter.target(), 0.5);
    }

    #[test]
    fn test_animates_toward_target() {
        let mut meter = HealthMeter::new(1.0, ms(1000));
        let length = meter.animate_to(0.6, ms(200));

        assert_eq!(length, ms(1000));
        assert_eq!(meter.fraction_at(ms(200)), 1.0);

        let midway = meter.fraction_at(ms(700));
        assert!(midway < 1.0 && midway > 0.6);
        assert!(meter.is_animating(ms(700)));

        assert_eq!(meter.fraction_at(ms(1200)), 0.6);
        assert!(!meter.is_animating(ms(1200)));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut meter = HealthMeter::new(1.0, Duration::ZERO);
        meter.animate_to(0.0, ms(5));
        assert_eq!(meter.fraction_at(ms(5)), 0.0);
    }
}
