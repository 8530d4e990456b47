//! Error types for cloth construction and frame updates.

/// Errors produced by the cloth engine.
///
/// The engine performs no I/O. Every variant is either a configuration
/// problem caught at construction time or a mismatch between the grid and the
/// vertex buffer handed in by the render side.
///
/// # Example
///
/// ```rust
/// use cloth::{Cloth, ClothError};
///
/// let err = Cloth::new(0, 4, true, (5.0, 5.0)).unwrap_err();
/// assert!(matches!(err, ClothError::InvalidResolution { .. }));
/// assert!(err.is_config_error());
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The grid needs at least one cell along each axis.
    #[error("invalid grid resolution: {cells_x}x{cells_y} cells (need at least 1x1)")]
    InvalidResolution {
        /// Requested cells along x.
        cells_x: usize,
        /// Requested cells along y.
        cells_y: usize,
    },

    /// The configured point counts cannot span a mesh.
    ///
    /// Spacing is derived as `size / (points - 1)`, so each axis needs at
    /// least two points.
    #[error("invalid point count: {points_x}x{points_y} (need at least 2x2)")]
    InvalidPointCount {
        /// Requested points along x.
        points_x: usize,
        /// Requested points along y.
        points_y: usize,
    },

    /// Grid spacing must be finite and non-negative.
    #[error("invalid grid spacing: ({x}, {y})")]
    InvalidSpacing {
        /// Spacing along x.
        x: f32,
        /// Spacing along y.
        y: f32,
    },

    /// A tuning or brush value is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The vertex buffer cannot hold every grid point.
    #[error("vertex buffer too small: need {needed} values, got {got}")]
    BufferTooSmall {
        /// Values required (`2 * points`).
        needed: usize,
        /// Values available.
        got: usize,
    },
}

impl ClothError {
    /// Creates an [`InvalidParameter`](ClothError::InvalidParameter) error.
    pub fn parameter(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Returns true if the error stems from configuration rather than from a
    /// per-frame call.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::BufferTooSmall { .. })
    }
}

/// A specialized [`Result`] type for cloth operations.
pub type Result<T> = std::result::Result<T, ClothError>;
