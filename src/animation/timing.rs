//! Timing functions (easing curves) for timeline tracks.
//!
//! Timing functions map normalized track time to an interpolation factor,
//! allowing natural-feeling motion rather than linear interpolation.
//!
//! ## Built-in Easing Functions
//!
//! - [`TimingFunction::Linear`] - Constant speed (no easing)
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast (acceleration)
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow (deceleration)
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle
//! - [`TimingFunction::Power`] - Polynomial curves named `power1`..`power4`
//!
//! ## Advanced Options
//!
//! - [`TimingFunction::CubicBezier`] - CSS-style cubic bezier curve,
//!   written `cubic-bezier(0.22, 1, 0.36, 1)`
//!
//! ## Names
//!
//! Views declare easing by name, the way the site's animation code does:
//!
//! ```ignore
//! let ease: TimingFunction = "power3.out".parse()?;
//! let linear: TimingFunction = "none".parse()?;
//! let snappy: TimingFunction = "cubic-bezier(0.22, 1, 0.36, 1)".parse()?;
//! ```

use std::str::FromStr;

use crate::error::RevealError;

/// Which end of a polynomial curve is eased
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaseDirection {
    /// Slow start
    In,
    /// Slow end
    Out,
    /// Slow start and end
    InOut,
}

/// Timing function that controls the animation curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
    /// Polynomial curve of degree `power + 1` (`power2.out` is a cubic ease-out)
    Power(u8, EaseDirection),
    /// CSS cubic-bezier curve (x1, y1, x2, y2), with x1 and x2 in [0, 1]
    CubicBezier(f32, f32, f32, f32),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => ease_in(t),
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::EaseInOut => ease_in_out(t),
            TimingFunction::Power(power, direction) => power_curve(t, *power, *direction),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        TimingFunction::Power(1, EaseDirection::Out)
    }
}

impl FromStr for TimingFunction {
    type Err = RevealError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unknown = || RevealError::UnknownEasing(name.to_string());

        match name.trim() {
            "none" | "linear" => return Ok(TimingFunction::Linear),
            "ease-in" => return Ok(TimingFunction::EaseIn),
            "ease-out" => return Ok(TimingFunction::EaseOut),
            "ease-in-out" => return Ok(TimingFunction::EaseInOut),
            _ => {}
        }

        if let Some(args) = name
            .trim()
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let points = args
                .split(',')
                .map(|p| p.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| unknown())?;
            return match points[..] {
                [x1, y1, x2, y2] if (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2) => {
                    Ok(TimingFunction::CubicBezier(x1, y1, x2, y2))
                }
                _ => Err(unknown()),
            };
        }

        let (curve, direction) = match name.trim().split_once('.') {
            Some((curve, "in")) => (curve, EaseDirection::In),
            Some((curve, "out")) => (curve, EaseDirection::Out),
            Some((curve, "inOut")) => (curve, EaseDirection::InOut),
            Some(_) => return Err(unknown()),
            // A bare curve name eases out
            None => (name.trim(), EaseDirection::Out),
        };

        let power = curve
            .strip_prefix("power")
            .and_then(|p| p.parse::<u8>().ok())
            .filter(|p| (1..=4).contains(p))
            .ok_or_else(unknown)?;

        Ok(TimingFunction::Power(power, direction))
    }
}

// Easing functions

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn power_curve(t: f32, power: u8, direction: EaseDirection) -> f32 {
    let exponent = i32::from(power) + 1;
    match direction {
        EaseDirection::In => t.powi(exponent),
        EaseDirection::Out => 1.0 - (1.0 - t).powi(exponent),
        EaseDirection::InOut => {
            if t < 0.5 {
                (2.0 * t).powi(exponent) / 2.0
            } else {
                1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
            }
        }
    }
}

/// Cubic bezier curve evaluation
/// Simplified implementation assuming x1, x2 are in [0, 1]
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Use Newton-Raphson to solve for t given x
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t, y1, y2)
}

fn cubic_bezier_x(t: f32, x1: f32, x2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

fn cubic_bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

fn cubic_bezier_slope(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
