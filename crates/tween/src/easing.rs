//! Easing curves over normalized time.
//!
//! Every curve maps `t` in `[0, 1]` to a progress ratio. Inputs outside the
//! range are clamped, so `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for all
//! curves.

use core::f32::consts::TAU;

/// Default overshoot amplitude of [`Easing::elastic_out`].
pub const DEFAULT_ELASTIC_AMPLITUDE: f32 = 1.0;

/// Default oscillation period of [`Easing::elastic_out`].
pub const DEFAULT_ELASTIC_PERIOD: f32 = 0.3;

/// An easing curve.
///
/// # Example
///
/// ```rust
/// use tween::Easing;
///
/// let ease = Easing::elastic_out(1.2, 0.4);
/// assert_eq!(ease.apply(0.0), 0.0);
/// assert_eq!(ease.apply(1.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic deceleration.
    QuadOut,
    /// Cubic deceleration.
    CubicOut,
    /// Exponentially decaying sine that overshoots the target and settles.
    ElasticOut {
        /// Overshoot scale, at least 1.
        amplitude: f32,
        /// Oscillation period in normalized time.
        period: f32,
    },
}

impl Easing {
    /// Creates an elastic ease-out curve.
    ///
    /// `amplitude` below 1 is raised to 1 (the curve cannot start at zero
    /// otherwise). A non-positive `period` falls back to
    /// [`DEFAULT_ELASTIC_PERIOD`].
    pub fn elastic_out(amplitude: f32, period: f32) -> Self {
        let amplitude = if amplitude.is_finite() {
            amplitude.max(1.0)
        } else {
            DEFAULT_ELASTIC_AMPLITUDE
        };
        let period = if period.is_finite() && period > 0.0 {
            period
        } else {
            DEFAULT_ELASTIC_PERIOD
        };
        Self::ElasticOut { amplitude, period }
    }

    /// Applies the curve to a normalized time value.
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    /// Returns true if the curve leaves `[0, 1]` before settling.
    pub fn overshoots(&self) -> bool {
        matches!(self, Easing::ElasticOut { .. })
    }
}

/// `a · 2^(−10t) · sin((t − s) · 2π / p) + 1`, where the phase shift `s` makes
/// the curve start at exactly zero.
fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    let shift = period / TAU * (1.0 / amplitude).asin();
    amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn test_endpoints_exact() {
        for ease in [
            Easing::Linear,
            Easing::QuadOut,
            Easing::CubicOut,
            Easing::elastic_out(1.2, 0.4),
        ] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        }
    }

    #[test]
    fn test_out_of_range_clamped() {
        let ease = Easing::elastic_out(1.2, 0.4);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
        assert_eq!(ease.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_elastic_starts_near_zero() {
        // The phase shift cancels the +1 offset at t = 0
        let a = 1.2;
        let p = 0.4;
        let tiny = elastic_out(1e-6, a, p);
        assert!(tiny.abs() < 1e-3, "got {tiny}");
    }

    #[test]
    fn test_elastic_overshoots() {
        let ease = Easing::elastic_out(1.2, 0.4);
        let peak = (1..100)
            .map(|i| ease.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "elastic should overshoot, peak={peak}");
        assert!(ease.overshoots());
        assert!(!Easing::CubicOut.overshoots());
    }

    #[test]
    fn test_elastic_settles() {
        let ease = Easing::elastic_out(1.2, 0.4);
        assert!((ease.apply(0.99) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_amplitude_clamped() {
        assert_eq!(
            Easing::elastic_out(0.5, 0.4),
            Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.4
            }
        );
    }

    #[test]
    fn test_bad_period_falls_back() {
        let ease = Easing::elastic_out(1.2, 0.0);
        assert_eq!(
            ease,
            Easing::ElasticOut {
                amplitude: 1.2,
                period: DEFAULT_ELASTIC_PERIOD
            }
        );
        assert!(ease.apply(0.5).is_finite());
    }

    #[test]
    fn test_linear_midpoint() {
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < TOLERANCE);
        assert!((Easing::QuadOut.apply(0.5) - 0.75).abs() < TOLERANCE);
        assert!((Easing::CubicOut.apply(0.5) - 0.875).abs() < TOLERANCE);
    }
}
