#![forbid(unsafe_code)]
// Allow these clippy lints for easing/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]

//! # Tween
//!
//! Frame-driven eased interpolation.
//!
//! Tween provides:
//! - **Easing**: normalized easing curves, including an overshoot-and-settle
//!   elastic ease-out parameterized by amplitude and period
//! - **Tween**: an explicit interpolation task record that is advanced once per
//!   frame and reports its completion exactly once
//!
//! ## Example
//!
//! ```rust
//! use tween::{fps, Easing, Step, Tween};
//!
//! let mut tween = Tween::new((0.0_f32, 0.0_f32), (10.0, 20.0), 0.5, Easing::elastic_out(1.2, 0.4));
//!
//! let mut finished = None;
//! for _ in 0..60 {
//!     if let Step::Finished(pos) = tween.step(fps(60)) {
//!         finished = Some(pos);
//!         break;
//!     }
//! }
//!
//! // The final frame lands exactly on the target
//! assert_eq!(finished, Some((10.0, 20.0)));
//! ```
//!
//! ## Elastic Ease-Out
//!
//! The elastic curve overshoots its target and rings back with an
//! exponentially decaying sine:
//!
//! - **amplitude** (clamped to ≥ 1) scales the overshoot
//! - **period** is the length of one oscillation in normalized time

mod easing;
mod tween;

pub use easing::Easing;
pub use tween::{Lerp, Step, Tween};

/// Returns a time delta in seconds for a given number of frames per second.
///
/// ```rust
/// use tween::fps;
///
/// assert!((fps(60) - 0.016_666).abs() < 1e-5);
/// ```
#[inline]
pub fn fps(n: u32) -> f32 {
    1.0 / n as f32
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::easing::Easing;
    pub use crate::fps;
    pub use crate::tween::{Lerp, Step, Tween};
}
