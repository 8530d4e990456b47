//! Pointer state and the brush displacement model.
//!
//! The input collaborator owns a [`Pointer`] and feeds it raw press, move and
//! release events; the cloth only reads it once per frame. [`Brush`] turns
//! the pointer's frame-to-frame velocity into a displacement for every point
//! inside its radius.

use core::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BRUSH_SIZE, MeshLayout};

/// State of the single active pointer.
///
/// The previous position is only meaningful while the pointer stays down; a
/// release clears it.
///
/// # Example
///
/// ```rust
/// use cloth::Pointer;
///
/// let mut pointer = Pointer::new();
/// pointer.press(10.0, 10.0);
/// pointer.move_to(14.0, 7.0);
/// assert_eq!(pointer.velocity(), (4.0, -3.0));
///
/// pointer.release();
/// assert!(!pointer.is_down());
/// assert_eq!(pointer.velocity(), (0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    down: bool,
    x: f32,
    y: f32,
    previous: Option<(f32, f32)>,
    tracking: bool,
}

impl Pointer {
    /// Creates a released pointer at the viewport origin.
    pub const fn new() -> Self {
        Self {
            down: false,
            x: 0.0,
            y: 0.0,
            previous: None,
            tracking: false,
        }
    }

    /// Creates a pointer from explicit state, as a host that tracks the
    /// pointer itself would report it.
    pub const fn from_state(down: bool, x: f32, y: f32, previous: Option<(f32, f32)>) -> Self {
        Self {
            down,
            x,
            y,
            previous,
            tracking: true,
        }
    }

    /// Presses the pointer at a position.
    pub fn press(&mut self, x: f32, y: f32) {
        self.down = true;
        self.move_to(x, y);
    }

    /// Moves the pointer. The position before the move becomes the previous
    /// position; the very first move uses the new position for both.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.previous = if self.tracking {
            Some((self.x, self.y))
        } else {
            Some((x, y))
        };
        self.x = x;
        self.y = y;
        self.tracking = true;
    }

    /// Releases the pointer and forgets the previous position.
    pub fn release(&mut self) {
        self.down = false;
        self.previous = None;
    }

    /// Whether the pointer is held down.
    pub const fn is_down(&self) -> bool {
        self.down
    }

    /// Current position in viewport pixels.
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Position before the last move, if still meaningful.
    pub const fn previous(&self) -> Option<(f32, f32)> {
        self.previous
    }

    /// Displacement between the previous and current position.
    pub fn velocity(&self) -> (f32, f32) {
        match self.previous {
            Some((px, py)) => (self.x - px, self.y - py),
            None => (0.0, 0.0),
        }
    }
}

/// Circular region around the pointer inside which points are pushed.
///
/// The falloff is `|cos(2π · dx / dist)|` on x (and the same with `dy` on y):
/// the cosine takes the axis ratio, not an angle, which gives a rippled
/// rather than radial falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Radius in pixels.
    pub radius: f32,
    /// Viewport position of the mesh origin.
    pub origin: (f32, f32),
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE)
    }
}

impl Brush {
    /// Creates a brush for a mesh at the viewport origin.
    pub const fn new(radius: f32) -> Self {
        Self {
            radius,
            origin: (0.0, 0.0),
        }
    }

    /// Creates a brush for a mesh placed by `layout`.
    pub const fn for_layout(radius: f32, layout: &MeshLayout) -> Self {
        Self {
            radius,
            origin: layout.origin(),
        }
    }

    /// Offset from the pointer to a mesh-local position, in viewport space.
    pub fn offset(&self, position: (f32, f32), pointer: &Pointer) -> (f32, f32) {
        let (px, py) = pointer.position();
        (position.0 - px + self.origin.0, position.1 - py + self.origin.1)
    }

    /// Displacement for a point at `position`, or `None` when the point is
    /// outside the brush, the pointer is up, or the pointer sits exactly on the
    /// point.
    ///
    /// ```rust
    /// use cloth::{Brush, Pointer};
    ///
    /// let brush = Brush::new(30.0);
    /// let pointer = Pointer::from_state(true, 0.0, 0.0, Some((-5.0, 0.0)));
    ///
    /// // Straight to the right of the pointer: full push on x
    /// let (dx, dy) = brush.displacement((10.0, 0.0), &pointer).unwrap();
    /// assert!((dx - 5.0).abs() < 1e-4);
    /// assert_eq!(dy, 0.0);
    ///
    /// // Outside the radius
    /// assert!(brush.displacement((40.0, 0.0), &pointer).is_none());
    /// ```
    pub fn displacement(&self, position: (f32, f32), pointer: &Pointer) -> Option<(f32, f32)> {
        if !pointer.is_down() {
            return None;
        }

        let (dx, dy) = self.offset(position, pointer);
        let dist = dx.hypot(dy);

        // Pointer exactly on the point: the ratio below is undefined
        if dist == 0.0 {
            tracing::trace!(point.x = position.0, point.y = position.1, "Brush centred on point");
            return None;
        }
        if dist.is_nan() || dist >= self.radius {
            return None;
        }

        let (vx, vy) = pointer.velocity();
        Some((
            vx * (TAU * dx / dist).cos().abs(),
            vy * (TAU * dy / dist).cos().abs(),
        ))
    }
}
