mod animatable;
mod property;
mod timing;
mod value;

pub use animatable::Animatable;
pub use property::{Property, PropertySet};
pub use timing::{EaseDirection, TimingFunction};
pub use value::{PropertyValue, Template};

use crate::error::{Result, RevealError};

/// Timing configuration for one animated property
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Time from the start of the track until it settles
    pub fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for value in [self.duration_ms, self.delay_ms] {
            if value < 0.0 || value.is_nan() {
                return Err(RevealError::NegativeDuration(value));
            }
        }
        Ok(())
    }

    /// Eased progress of this transition at `elapsed_ms` after its track starts
    pub fn progress_at(&self, elapsed_ms: f32) -> f32 {
        let active = elapsed_ms - self.delay_ms;
        if active < 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (active / self.duration_ms).min(1.0);
        self.timing.evaluate(t)
    }
}

impl Default for Transition {
    /// 500ms with a gentle ease-out
    fn default() -> Self {
        Self::new(500.0, TimingFunction::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_respects_delay() {
        let transition = Transition::new(100.0, TimingFunction::Linear).delay(50.0);
        assert_eq!(transition.progress_at(0.0), 0.0);
        assert_eq!(transition.progress_at(50.0), 0.0);
        assert_eq!(transition.progress_at(100.0), 0.5);
        assert_eq!(transition.progress_at(150.0), 1.0);
        assert_eq!(transition.progress_at(500.0), 1.0);
        assert_eq!(transition.total_ms(), 150.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let transition = Transition::new(0.0, TimingFunction::Linear).delay(10.0);
        assert_eq!(transition.progress_at(5.0), 0.0);
        assert_eq!(transition.progress_at(10.0), 1.0);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let transition = Transition::new(-1.0, TimingFunction::Linear);
        assert!(matches!(
            transition.validate(),
            Err(RevealError::NegativeDuration(_))
        ));
    }
}
