//! A single animated grid node.
//!
//! A [`Point`] is either idle or owns exactly one interpolation task. The task
//! is a plain record (a [`Tween`] plus the [`Then`] continuation to run when it
//! lands), advanced by the owner once per frame. Brush displacement only
//! applies to idle points.

use rand::Rng;
use tween::{Step, Tween};

use crate::brush::{Brush, Pointer};
use crate::config::Tuning;

/// Identifies a completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletionId(u64);

impl CompletionId {
    /// Wraps a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What to do once an animation completes.
///
/// A rejected (non-forced, colliding) animation request still runs its
/// continuation immediately, so chains always make progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Then {
    /// Nothing further.
    #[default]
    Nothing,
    /// Return the same point to its rest position.
    Reset,
    /// Report the id to the owner.
    Notify(CompletionId),
    /// Count towards the owner's all-points barrier for the id, as used by
    /// `Cloth::randomize_all`.
    Join(CompletionId),
}

/// What a point reports to its owner about its continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A [`Then::Notify`] continuation ran.
    Notified(CompletionId),
    /// A [`Then::Join`] continuation ran.
    Joined(CompletionId),
    /// A task carrying [`Then::Join`] was replaced before it landed; its
    /// continuation will never run.
    Preempted(CompletionId),
}

/// The in-flight interpolation owned by a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTask {
    tween: Tween<(f32, f32)>,
    then: Then,
}

impl PointTask {
    /// The underlying tween.
    pub fn tween(&self) -> &Tween<(f32, f32)> {
        &self.tween
    }

    /// The continuation run on completion.
    pub fn then(&self) -> Then {
        self.then
    }
}

/// One control node of the cloth grid.
///
/// A point does not validate its [`Tuning`] (see [`Tuning::validate`]), but
/// out-of-range constants never panic: a negative jitter acts as its
/// magnitude, a non-finite one as zero, and durations follow
/// [`Tuning::duration_for`].
///
/// # Example
///
/// ```rust
/// use cloth::{Point, Then, Tuning};
///
/// let mut point = Point::at_rest(10.0, 20.0, Tuning::default());
/// let mut signals = Vec::new();
///
/// point.animate_to(40.0, 20.0, false, Then::Nothing, &mut signals);
/// assert!(point.is_resetting());
///
/// // 30px at 40px/s is 0.75s
/// while point.is_resetting() {
///     point.advance(1.0 / 60.0, &mut signals);
/// }
/// assert_eq!(point.position(), (40.0, 20.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    orig_x: f32,
    orig_y: f32,
    x: f32,
    y: f32,
    tuning: Tuning,
    task: Option<PointTask>,
}

impl Point {
    /// Creates a point at its rest position and starts the reveal: a random
    /// hop followed by a return to rest.
    pub fn new<R: Rng>(x: f32, y: f32, tuning: Tuning, rng: &mut R) -> Self {
        let mut point = Self::at_rest(x, y, tuning);
        // An idle point never runs the continuation synchronously
        point.randomize(rng, Then::Reset, &mut Vec::new());
        point
    }

    /// Creates an idle point at its rest position.
    pub const fn at_rest(x: f32, y: f32, tuning: Tuning) -> Self {
        Self {
            orig_x: x,
            orig_y: y,
            x,
            y,
            tuning,
            task: None,
        }
    }

    /// Starts an eased animation towards `(tx, ty)`.
    ///
    /// While another animation is in flight the request is skipped unless
    /// `force` is set, but `then` still runs right away. A forced request
    /// replaces the current task; the replaced task's continuation is dropped.
    ///
    /// Continuations that run synchronously, and replaced [`Then::Join`]
    /// tasks, are reported through `signals`.
    pub fn animate_to(
        &mut self,
        tx: f32,
        ty: f32,
        force: bool,
        then: Then,
        signals: &mut Vec<Signal>,
    ) {
        if self.is_resetting() && !force {
            self.run(then, signals);
            return;
        }
        self.start(tx, ty, then, signals);
    }

    /// Animates to a random offset of up to `jitter` pixels per axis from the
    /// current position. Repeated calls wander; they are not anchored to rest.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, then: Then, signals: &mut Vec<Signal>) {
        let jitter = if self.tuning.jitter.is_finite() {
            self.tuning.jitter.abs()
        } else {
            0.0
        };
        let tx = self.x + rng.random_range(-jitter..=jitter);
        let ty = self.y + rng.random_range(-jitter..=jitter);
        self.animate_to(tx, ty, false, then, signals);
    }

    /// Returns to the rest position, interrupting any animation.
    pub fn reset(&mut self, signals: &mut Vec<Signal>) {
        self.start(self.orig_x, self.orig_y, Then::Nothing, signals);
    }

    /// Applies brush displacement for this frame.
    ///
    /// `_delta_squared` is the squared frame delta; the displacement model
    /// is velocity based and does not scale by it.
    pub fn update(&mut self, _delta_squared: f32, pointer: &Pointer, brush: &Brush) {
        if self.is_resetting() {
            return;
        }
        if let Some((mx, my)) = brush.displacement(self.position(), pointer) {
            self.x += mx;
            self.y += my;
        }
    }

    /// Advances the in-flight animation by `dt` seconds.
    ///
    /// Returns true on the frame the animation completes. The position lands
    /// exactly on the target, the point turns idle, and then the continuation
    /// runs (which may start a new animation).
    pub fn advance(&mut self, dt: f32, signals: &mut Vec<Signal>) -> bool {
        let Some(task) = self.task.as_mut() else {
            return false;
        };

        match task.tween.step(dt) {
            Step::Running((x, y)) => {
                self.x = x;
                self.y = y;
                false
            }
            Step::Finished((x, y)) => {
                let then = task.then;
                self.x = x;
                self.y = y;
                self.task = None;
                self.run(then, signals);
                true
            }
            Step::Idle => {
                self.task = None;
                false
            }
        }
    }

    fn start(&mut self, tx: f32, ty: f32, then: Then, signals: &mut Vec<Signal>) {
        if let Some(PointTask {
            then: Then::Join(id),
            ..
        }) = self.task
        {
            signals.push(Signal::Preempted(id));
        }
        let distance = (tx - self.x).hypot(ty - self.y);
        let duration = self.tuning.duration_for(distance);
        self.task = Some(PointTask {
            tween: Tween::new((self.x, self.y), (tx, ty), duration, self.tuning.easing()),
            then,
        });
    }

    fn run(&mut self, then: Then, signals: &mut Vec<Signal>) {
        match then {
            Then::Nothing => {}
            Then::Reset => self.reset(signals),
            Then::Notify(id) => signals.push(Signal::Notified(id)),
            Then::Join(id) => signals.push(Signal::Joined(id)),
        }
    }

    /// Current position.
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Rest position.
    pub const fn rest(&self) -> (f32, f32) {
        (self.orig_x, self.orig_y)
    }

    /// Current x.
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Current y.
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Whether an animation is in flight.
    pub const fn is_resetting(&self) -> bool {
        self.task.is_some()
    }

    /// The in-flight task, if any.
    pub const fn task(&self) -> Option<&PointTask> {
        self.task.as_ref()
    }

    /// Target of the in-flight animation.
    pub fn target(&self) -> Option<(f32, f32)> {
        self.task.map(|t| t.tween.target())
    }

    /// Seconds left in the in-flight animation; zero when idle.
    pub fn remaining(&self) -> f32 {
        self.task.map_or(0.0, |t| t.tween.remaining())
    }

    /// The tuning this point animates with.
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
