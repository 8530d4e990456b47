//! The point grid and its per-frame orchestration.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, trace};

use crate::brush::{Brush, Pointer};
use crate::config::{ClothConfig, MeshLayout, Tuning};
use crate::error::{ClothError, Result};
use crate::point::{CompletionId, Point, Signal, Then};

/// Notification produced while advancing the cloth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClothEvent {
    /// An animation carrying this id finished. For [`Cloth::randomize_all`]
    /// this is sent once, after the last point finished.
    Completed(CompletionId),
    /// A point taking part in this [`Cloth::randomize_all`] barrier was
    /// pre-empted (by [`Cloth::reset`] or a colliding [`Then::Reset`]) before
    /// it landed; the barrier will never complete.
    Abandoned(CompletionId),
}

/// Builder for [`Cloth`].
///
/// # Example
///
/// ```rust
/// use cloth::{Brush, Cloth};
///
/// let cloth = Cloth::builder(4, 3)
///     .spacing(10.0, 10.0)
///     .brush(Brush::new(25.0))
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(cloth.len(), 5 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct ClothBuilder {
    cells_x: usize,
    cells_y: usize,
    free: bool,
    spacing: (f32, f32),
    tuning: Tuning,
    brush: Brush,
    seed: Option<u64>,
    reveal: bool,
}

impl ClothBuilder {
    /// Starts a builder for a grid of `cells_x` by `cells_y` cells.
    pub fn new(cells_x: usize, cells_y: usize) -> Self {
        Self {
            cells_x,
            cells_y,
            free: true,
            spacing: (1.0, 1.0),
            tuning: Tuning::default(),
            brush: Brush::default(),
            seed: None,
            reveal: true,
        }
    }

    /// Sets whether the grid is free (corners not pinned).
    pub fn free(mut self, free: bool) -> Self {
        self.free = free;
        self
    }

    /// Sets the distance between neighbouring rest positions.
    pub fn spacing(mut self, x: f32, y: f32) -> Self {
        self.spacing = (x, y);
        self
    }

    /// Sets the animation constants.
    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Sets the brush.
    pub fn brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self
    }

    /// Seeds the RNG used by randomize.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether points start with the reveal animation (default true).
    pub fn reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }

    /// Builds the grid.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty grid, non-finite or negative spacing,
    /// or unusable tuning.
    pub fn build(self) -> Result<Cloth> {
        if self.cells_x == 0 || self.cells_y == 0 {
            return Err(ClothError::InvalidResolution {
                cells_x: self.cells_x,
                cells_y: self.cells_y,
            });
        }
        let (sx, sy) = self.spacing;
        if !sx.is_finite() || !sy.is_finite() || sx < 0.0 || sy < 0.0 {
            return Err(ClothError::InvalidSpacing { x: sx, y: sy });
        }
        if !self.brush.radius.is_finite() || self.brush.radius < 0.0 {
            return Err(ClothError::parameter("brush size", self.brush.radius));
        }
        self.tuning.validate()?;

        let mut rng = match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        };

        let columns = self.cells_x + 1;
        let rows = self.cells_y + 1;
        let mut points = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            for x in 0..columns {
                let rest_x = x as f32 * sx;
                let rest_y = y as f32 * sy;
                let point = if self.reveal {
                    Point::new(rest_x, rest_y, self.tuning, &mut rng)
                } else {
                    Point::at_rest(rest_x, rest_y, self.tuning)
                };
                points.push(point);
            }
        }

        debug!(
            cloth.cells_x = self.cells_x,
            cloth.cells_y = self.cells_y,
            cloth.points = points.len(),
            cloth.free = self.free,
            cloth.reveal = self.reveal,
            "Cloth built"
        );

        Ok(Cloth {
            points,
            cells_x: self.cells_x,
            cells_y: self.cells_y,
            spacing: self.spacing,
            free: self.free,
            brush: self.brush,
            rng,
            signals: Vec::new(),
            barriers: HashMap::new(),
            events: Vec::new(),
            next_completion: 1,
        })
    }
}

/// A grid of animated points driving a mesh's vertices.
///
/// Points are stored row-major; point `i` owns vertex-buffer slots `2i` (x)
/// and `2i + 1` (y).
///
/// # Example
///
/// ```rust
/// use cloth::{Cloth, Pointer};
///
/// let mut cloth = Cloth::builder(2, 1).spacing(10.0, 10.0).seed(1).build().unwrap();
/// let mut vertices = vec![0.0_f32; cloth.vertex_len()];
/// let pointer = Pointer::new();
///
/// // Three seconds is enough for every reveal to land
/// for _ in 0..180 {
///     cloth.frame(1.0 / 60.0, &pointer, &mut vertices).unwrap();
/// }
///
/// assert!(cloth.is_settled());
/// assert_eq!(&vertices[..6], &[0.0, 0.0, 10.0, 0.0, 20.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Cloth {
    points: Vec<Point>,
    cells_x: usize,
    cells_y: usize,
    spacing: (f32, f32),
    free: bool,
    brush: Brush,
    rng: Pcg64,
    /// Point signals not yet routed.
    signals: Vec<Signal>,
    /// Outstanding `randomize_all` barriers and their pending point counts.
    barriers: HashMap<CompletionId, usize>,
    events: Vec<ClothEvent>,
    next_completion: u64,
}

impl Cloth {
    /// Builds a revealing grid with default tuning and brush.
    ///
    /// # Errors
    ///
    /// See [`ClothBuilder::build`].
    pub fn new(cells_x: usize, cells_y: usize, free: bool, spacing: (f32, f32)) -> Result<Self> {
        ClothBuilder::new(cells_x, cells_y)
            .free(free)
            .spacing(spacing.0, spacing.1)
            .build()
    }

    /// Starts a [`ClothBuilder`].
    pub fn builder(cells_x: usize, cells_y: usize) -> ClothBuilder {
        ClothBuilder::new(cells_x, cells_y)
    }

    /// Builds a grid for a mesh from host configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the derived spacing is
    /// invalid.
    pub fn from_config(config: &ClothConfig, layout: &MeshLayout) -> Result<Self> {
        config.validate()?;
        let (sx, sy) = layout.spacing(config.points_x, config.points_y)?;
        let (cells_x, cells_y) = config.cells();

        let mut builder = ClothBuilder::new(cells_x, cells_y)
            .free(config.free())
            .spacing(sx, sy)
            .tuning(config.tuning)
            .brush(Brush::for_layout(config.brush_size, layout));
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    /// Allocates a fresh completion id.
    pub fn next_completion_id(&mut self) -> CompletionId {
        let id = CompletionId::new(self.next_completion);
        self.next_completion += 1;
        id
    }

    /// Randomizes every point. Only the first point carries `then`, so the
    /// continuation runs when that point finishes, not when all have.
    ///
    /// Use [`randomize_all`](Self::randomize_all) to wait for every point.
    pub fn randomize(&mut self, then: Then) {
        debug!(cloth.points = self.points.len(), "Cloth randomize");
        for (i, point) in self.points.iter_mut().enumerate() {
            let then = if i == 0 { then } else { Then::Nothing };
            point.randomize(&mut self.rng, then, &mut self.signals);
        }
        self.route_signals();
    }

    /// Randomizes every point and sends [`ClothEvent::Completed`] with `id`
    /// once all of them have finished, or [`ClothEvent::Abandoned`] as soon
    /// as one of them is pre-empted.
    ///
    /// Barrier ids are separate from [`Then::Notify`] ids: a plain
    /// notification never counts towards a barrier.
    pub fn randomize_all(&mut self, id: CompletionId) {
        debug!(cloth.points = self.points.len(), completion = id.get(), "Cloth randomize_all");
        *self.barriers.entry(id).or_insert(0) += self.points.len();
        for point in &mut self.points {
            point.randomize(&mut self.rng, Then::Join(id), &mut self.signals);
        }
        self.route_signals();
    }

    /// Returns every point to rest. Outstanding barriers are abandoned.
    pub fn reset(&mut self) {
        debug!(cloth.points = self.points.len(), "Cloth reset");
        for point in &mut self.points {
            point.reset(&mut self.signals);
        }
        self.route_signals();
    }

    /// Advances every in-flight animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let mut completed = 0usize;
        for point in &mut self.points {
            if point.advance(dt, &mut self.signals) {
                completed += 1;
            }
        }
        if completed > 0 {
            trace!(cloth.completed = completed, "Animations completed");
        }
        self.route_signals();
    }

    /// Applies brush displacement to every point and writes every position
    /// into `vertices`.
    ///
    /// The buffer is fully rewritten each call, whether or not anything
    /// moved.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::BufferTooSmall`] without touching any point if
    /// `vertices` holds fewer than [`vertex_len`](Self::vertex_len) values.
    pub fn update(&mut self, delta: f32, pointer: &Pointer, vertices: &mut [f32]) -> Result<()> {
        self.check_buffer(vertices)?;
        let delta_squared = delta * delta;
        for (point, slot) in self.points.iter_mut().zip(vertices.chunks_exact_mut(2)) {
            point.update(delta_squared, pointer, &self.brush);
            slot[0] = point.x();
            slot[1] = point.y();
        }
        Ok(())
    }

    /// Runs one frame: animations first, then brush and buffer sync, so the
    /// buffer reflects this frame's animation state.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update). Nothing advances when the buffer is too
    /// small.
    pub fn frame(&mut self, dt: f32, pointer: &Pointer, vertices: &mut [f32]) -> Result<()> {
        self.check_buffer(vertices)?;
        self.advance(dt);
        self.update(dt, pointer, vertices)
    }

    /// Writes current positions into `vertices` without touching the points.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::BufferTooSmall`] if the buffer is short.
    pub fn write_vertices(&self, vertices: &mut [f32]) -> Result<()> {
        self.check_buffer(vertices)?;
        for (point, slot) in self.points.iter().zip(vertices.chunks_exact_mut(2)) {
            slot[0] = point.x();
            slot[1] = point.y();
        }
        Ok(())
    }

    /// Takes the pending notifications.
    pub fn drain_events(&mut self) -> Vec<ClothEvent> {
        std::mem::take(&mut self.events)
    }

    fn route_signals(&mut self) {
        for signal in self.signals.drain(..) {
            match signal {
                Signal::Notified(id) => self.events.push(ClothEvent::Completed(id)),
                Signal::Joined(id) => {
                    let Some(pending) = self.barriers.get_mut(&id) else {
                        continue;
                    };
                    *pending = pending.saturating_sub(1);
                    if *pending == 0 {
                        self.barriers.remove(&id);
                        debug!(completion = id.get(), "Barrier reached");
                        self.events.push(ClothEvent::Completed(id));
                    }
                }
                Signal::Preempted(id) => {
                    if self.barriers.remove(&id).is_some() {
                        debug!(completion = id.get(), "Barrier abandoned by pre-emption");
                        self.events.push(ClothEvent::Abandoned(id));
                    }
                }
            }
        }
    }

    fn check_buffer(&self, vertices: &[f32]) -> Result<()> {
        let needed = self.vertex_len();
        if vertices.len() < needed {
            return Err(ClothError::BufferTooSmall {
                needed,
                got: vertices.len(),
            });
        }
        Ok(())
    }

    /// Whether no point is animating.
    pub fn is_settled(&self) -> bool {
        self.points.iter().all(|p| !p.is_resetting())
    }

    /// Number of points still animating.
    pub fn animating(&self) -> usize {
        self.points.iter().filter(|p| p.is_resetting()).count()
    }

    /// Points in row-major order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point at a row-major index.
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Point at a grid cell corner.
    pub fn point_at(&self, column: usize, row: usize) -> Option<&Point> {
        if column > self.cells_x || row > self.cells_y {
            return None;
        }
        self.points.get(row * (self.cells_x + 1) + column)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a cloth has at least 2x2 points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values the vertex buffer must hold.
    pub fn vertex_len(&self) -> usize {
        self.points.len() * 2
    }

    /// Cells per axis.
    pub fn dims(&self) -> (usize, usize) {
        (self.cells_x, self.cells_y)
    }

    /// Distance between neighbouring rest positions.
    pub fn spacing(&self) -> (f32, f32) {
        self.spacing
    }

    /// Whether the grid is free (corners not pinned).
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// The brush.
    pub fn brush(&self) -> &Brush {
        &self.brush
    }
}
