//! The interpolation task record.
//!
//! A [`Tween`] holds everything needed to resume an interpolation on the next
//! frame: start and end values, elapsed and total duration, and the easing
//! curve. It never schedules itself; the owner calls [`Tween::step`] once per
//! frame and reacts to [`Step::Finished`].

use crate::easing::Easing;

/// Values that can be linearly interpolated.
///
/// `ratio` is not clamped: eased ratios above 1 extrapolate past `to`, which
/// is how overshooting curves are expressed.
pub trait Lerp: Copy {
    /// Interpolates between `from` and `to`.
    fn lerp(from: Self, to: Self, ratio: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(from: Self, to: Self, ratio: f32) -> Self {
        from + (to - from) * ratio
    }
}

impl Lerp for (f32, f32) {
    #[inline]
    fn lerp(from: Self, to: Self, ratio: f32) -> Self {
        (f32::lerp(from.0, to.0, ratio), f32::lerp(from.1, to.1, ratio))
    }
}

impl Lerp for [f32; 2] {
    #[inline]
    fn lerp(from: Self, to: Self, ratio: f32) -> Self {
        [f32::lerp(from[0], to[0], ratio), f32::lerp(from[1], to[1], ratio)]
    }
}

/// Outcome of advancing a [`Tween`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<T> {
    /// Still in flight; carries the eased value for this frame.
    Running(T),
    /// The duration elapsed on this frame; carries the exact target.
    ///
    /// Returned once. Later calls report [`Step::Idle`].
    Finished(T),
    /// The tween had already finished before this call.
    Idle,
}

impl<T> Step<T> {
    /// Returns the value carried by the step, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Step::Running(v) | Step::Finished(v) => Some(v),
            Step::Idle => None,
        }
    }

    /// Returns true for [`Step::Finished`].
    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }
}

/// An eased interpolation from one value to another over a fixed duration.
///
/// # Example
///
/// ```rust
/// use tween::{Easing, Step, Tween};
///
/// let mut tween = Tween::new(0.0_f32, 100.0, 1.0, Easing::Linear);
/// assert_eq!(tween.step(0.25), Step::Running(25.0));
/// assert_eq!(tween.step(1.0), Step::Finished(100.0));
/// assert_eq!(tween.step(1.0), Step::Idle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    elapsed: f32,
    duration: f32,
    easing: Easing,
    done: bool,
}

impl<T: Lerp> Tween<T> {
    /// Creates a tween. Durations that are not positive and finite complete on
    /// the first step.
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
            easing,
            done: false,
        }
    }

    /// Advances the tween by `dt` seconds.
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn step(&mut self, dt: f32) -> Step<T> {
        if self.done {
            return Step::Idle;
        }

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.done = true;
            return Step::Finished(self.to);
        }

        Step::Running(self.value())
    }

    /// Returns the eased value at the current elapsed time.
    pub fn value(&self) -> T {
        if self.done {
            return self.to;
        }
        T::lerp(self.from, self.to, self.easing.apply(self.progress()))
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.done { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Seconds left before completion.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Returns true once the tween has reported [`Step::Finished`].
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Start value.
    pub fn start(&self) -> T {
        self.from
    }

    /// Target value.
    pub fn target(&self) -> T {
        self.to
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The easing curve.
    pub fn easing(&self) -> Easing {
        self.easing
    }
}
