//! Configuration, tuning constants and mesh layout.
//!
//! [`ClothConfig`] is what a host application reads from its settings;
//! [`Tuning`] collects the constants of the animation and displacement model
//! so they can be adjusted without touching the algorithms; [`MeshLayout`] is
//! the slice of the render collaborator the engine needs (mesh size and
//! on-screen origin).

use serde::{Deserialize, Serialize};
use tween::Easing;

use crate::error::{ClothError, Result};

/// Default grid resolution along each axis.
pub const DEFAULT_POINTS: usize = 50;

/// Default brush radius in pixels.
pub const DEFAULT_BRUSH_SIZE: f32 = 30.0;

/// Constants of the reveal animation and brush model.
///
/// # Example
///
/// ```rust
/// use cloth::Tuning;
///
/// let tuning = Tuning::default();
/// // Short hops are stretched to the minimum duration
/// assert_eq!(tuning.duration_for(1.0), 0.4);
/// // Long hops are capped
/// assert_eq!(tuning.duration_for(1000.0), 1.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Half-width of the uniform random offset applied per axis by a
    /// randomize, in pixels.
    pub jitter: f32,
    /// Pixels travelled per second of animation before clamping.
    pub duration_divisor: f32,
    /// Shortest animation, in seconds.
    pub min_duration: f32,
    /// Longest animation, in seconds.
    pub max_duration: f32,
    /// Overshoot scale of the elastic ease-out.
    pub elastic_amplitude: f32,
    /// Oscillation period of the elastic ease-out.
    pub elastic_period: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jitter: 30.0,
            duration_divisor: 40.0,
            min_duration: 0.4,
            max_duration: 1.25,
            elastic_amplitude: 1.2,
            elastic_period: 0.4,
        }
    }
}

impl Tuning {
    /// Duration of an animation covering `distance` pixels.
    ///
    /// The minimum is applied first and the maximum last, so inverted bounds
    /// yield `max_duration` instead of panicking.
    pub fn duration_for(&self, distance: f32) -> f32 {
        (distance / self.duration_divisor)
            .max(self.min_duration)
            .min(self.max_duration)
    }

    /// The easing curve used by every point animation.
    pub fn easing(&self) -> Easing {
        Easing::elastic_out(self.elastic_amplitude, self.elastic_period)
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(ClothError::parameter("jitter", self.jitter));
        }
        if !self.duration_divisor.is_finite() || self.duration_divisor <= 0.0 {
            return Err(ClothError::parameter(
                "duration divisor",
                self.duration_divisor,
            ));
        }
        if !self.min_duration.is_finite() || self.min_duration < 0.0 {
            return Err(ClothError::parameter("minimum duration", self.min_duration));
        }
        if !self.max_duration.is_finite() || self.max_duration < self.min_duration {
            return Err(ClothError::parameter("maximum duration", self.max_duration));
        }
        if !self.elastic_amplitude.is_finite() {
            return Err(ClothError::parameter(
                "elastic amplitude",
                self.elastic_amplitude,
            ));
        }
        if !self.elastic_period.is_finite() || self.elastic_period <= 0.0 {
            return Err(ClothError::parameter("elastic period", self.elastic_period));
        }
        Ok(())
    }
}

/// Host-facing settings for a cloth.
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```rust
/// use cloth::ClothConfig;
///
/// let config = ClothConfig::default();
/// assert_eq!(config.points_x, 50);
/// assert_eq!(config.cells(), (49, 49));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Grid points along x.
    pub points_x: usize,
    /// Grid points along y.
    pub points_y: usize,
    /// Brush radius in pixels.
    pub brush_size: f32,
    /// Pin the grid corners. Accepted for compatibility; corners are not
    /// pinned by the current model.
    pub pin_corners: bool,
    /// RNG seed for the randomized animations.
    ///
    /// If None, a seed is drawn from the thread RNG at build time.
    pub seed: Option<u64>,
    /// Animation and brush constants.
    pub tuning: Tuning,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            points_x: DEFAULT_POINTS,
            points_y: DEFAULT_POINTS,
            brush_size: DEFAULT_BRUSH_SIZE,
            pin_corners: false,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl ClothConfig {
    /// Cells per axis, one fewer than points.
    pub fn cells(&self) -> (usize, usize) {
        (
            self.points_x.saturating_sub(1),
            self.points_y.saturating_sub(1),
        )
    }

    /// Whether the grid is free (not corner-pinned).
    pub fn free(&self) -> bool {
        !self.pin_corners
    }

    /// Rejects configurations that cannot build a grid.
    pub fn validate(&self) -> Result<()> {
        if self.points_x < 2 || self.points_y < 2 {
            return Err(ClothError::InvalidPointCount {
                points_x: self.points_x,
                points_y: self.points_y,
            });
        }
        if !self.brush_size.is_finite() || self.brush_size < 0.0 {
            return Err(ClothError::parameter("brush size", self.brush_size));
        }
        self.tuning.validate()
    }
}

/// Size and placement of the rendered mesh.
///
/// Point rest positions are in mesh-local pixels; the origin converts pointer
/// coordinates (viewport pixels) into that space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshLayout {
    /// Mesh width in pixels.
    pub width: f32,
    /// Mesh height in pixels.
    pub height: f32,
    /// Viewport x of the mesh's top-left corner.
    pub origin_x: f32,
    /// Viewport y of the mesh's top-left corner.
    pub origin_y: f32,
}

impl MeshLayout {
    /// Creates a layout with the mesh at the viewport origin.
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    /// Creates a layout with the mesh centred in a viewport.
    ///
    /// ```rust
    /// use cloth::MeshLayout;
    ///
    /// let layout = MeshLayout::centered(200.0, 100.0, 800.0, 600.0);
    /// assert_eq!(layout.origin(), (300.0, 250.0));
    /// ```
    pub fn centered(width: f32, height: f32, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            width,
            height,
            origin_x: viewport_width / 2.0 - width / 2.0,
            origin_y: viewport_height / 2.0 - height / 2.0,
        }
    }

    /// Viewport position of the mesh's top-left corner.
    pub const fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    /// Distance between neighbouring rest positions for a grid of the given
    /// point counts.
    pub fn spacing(&self, points_x: usize, points_y: usize) -> Result<(f32, f32)> {
        if points_x < 2 || points_y < 2 {
            return Err(ClothError::InvalidPointCount { points_x, points_y });
        }
        let x = self.width / (points_x - 1) as f32;
        let y = self.height / (points_y - 1) as f32;
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return Err(ClothError::InvalidSpacing { x, y });
        }
        Ok((x, y))
    }
}
