//! Scripted pointer input.
//!
//! Stands in for the mouse/touch listeners of an interactive host: each
//! stroke presses somewhere over the mesh, drags in a straight line and
//! releases. Strokes are generated from a seed so runs are reproducible.

use cloth::{MeshLayout, Pointer};
use rand::Rng;
use rand_pcg::Pcg64;

/// Pointer event for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press at a viewport position.
    Press(f32, f32),
    /// Move to a viewport position.
    Move(f32, f32),
    /// Release.
    Release,
}

impl PointerEvent {
    /// Applies the event to a pointer.
    pub fn apply(self, pointer: &mut Pointer) {
        match self {
            PointerEvent::Press(x, y) => pointer.press(x, y),
            PointerEvent::Move(x, y) => pointer.move_to(x, y),
            PointerEvent::Release => pointer.release(),
        }
    }
}

/// A straight drag from one viewport point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Press position.
    pub from: (f32, f32),
    /// Release position.
    pub to: (f32, f32),
    /// Frames spent moving.
    pub frames: u32,
}

impl Stroke {
    /// Random stroke whose endpoints lie over the mesh.
    pub fn random(rng: &mut Pcg64, layout: &MeshLayout, frames: u32) -> Self {
        let (ox, oy) = layout.origin();
        let mut pick = || {
            (
                ox + rng.random_range(0.0..=layout.width.max(0.0)),
                oy + rng.random_range(0.0..=layout.height.max(0.0)),
            )
        };
        let from = pick();
        let to = pick();
        Self {
            from,
            to,
            frames: frames.max(1),
        }
    }

    /// Frames from press to release inclusive.
    pub fn span(&self) -> usize {
        self.frames as usize + 2
    }

    /// Event for the `i`th frame of the stroke: press, `frames` moves along
    /// the line, then release.
    pub fn event(&self, i: usize) -> Option<PointerEvent> {
        let moves = self.frames as usize;
        match i {
            0 => Some(PointerEvent::Press(self.from.0, self.from.1)),
            i if i <= moves => {
                let t = i as f32 / self.frames as f32;
                Some(PointerEvent::Move(
                    self.from.0 + (self.to.0 - self.from.0) * t,
                    self.from.1 + (self.to.1 - self.from.1) * t,
                ))
            }
            i if i == moves + 1 => Some(PointerEvent::Release),
            _ => None,
        }
    }
}

/// Pointer events by frame: idle for a while, then strokes back to back.
///
/// Events are computed on demand, so long idle stretches or strokes cost
/// nothing up front.
#[derive(Debug, Clone, Default)]
pub struct Script {
    start: usize,
    strokes: Vec<Stroke>,
}

impl Script {
    /// Idle for `start` frames, then plays the strokes back to back.
    pub fn new(start: u32, strokes: &[Stroke]) -> Self {
        Self {
            start: start as usize,
            strokes: strokes.to_vec(),
        }
    }

    /// Event for a frame.
    pub fn event(&self, frame: usize) -> Option<PointerEvent> {
        let mut offset = frame.checked_sub(self.start)?;
        for stroke in &self.strokes {
            if offset < stroke.span() {
                return stroke.event(offset);
            }
            offset -= stroke.span();
        }
        None
    }

    /// Frames until the last event.
    pub fn len(&self) -> usize {
        self.strokes
            .iter()
            .fold(self.start, |total, stroke| total.saturating_add(stroke.span()))
    }

    /// Whether the script has no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_stroke_events_shape() {
        let stroke = Stroke {
            from: (0.0, 0.0),
            to: (10.0, 20.0),
            frames: 4,
        };
        assert_eq!(stroke.span(), 6);
        assert_eq!(stroke.event(0), Some(PointerEvent::Press(0.0, 0.0)));
        assert_eq!(stroke.event(2), Some(PointerEvent::Move(5.0, 10.0)));
        assert_eq!(stroke.event(4), Some(PointerEvent::Move(10.0, 20.0)));
        assert_eq!(stroke.event(5), Some(PointerEvent::Release));
        assert_eq!(stroke.event(6), None);
    }

    #[test]
    fn test_huge_script_costs_nothing_up_front() {
        let stroke = Stroke {
            from: (0.0, 0.0),
            to: (1.0, 0.0),
            frames: u32::MAX,
        };
        let script = Script::new(u32::MAX, &[stroke]);
        assert_eq!(script.event(0), None);
        assert_eq!(
            script.event(u32::MAX as usize),
            Some(PointerEvent::Press(0.0, 0.0))
        );
    }

    #[test]
    fn test_random_stroke_over_mesh() {
        let layout = MeshLayout::centered(100.0, 50.0, 300.0, 200.0);
        let mut rng = Pcg64::seed_from_u64(4);
        for _ in 0..20 {
            let stroke = Stroke::random(&mut rng, &layout, 10);
            for (x, y) in [stroke.from, stroke.to] {
                assert!((100.0..=200.0).contains(&x));
                assert!((75.0..=125.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_script_offsets_and_applies() {
        let stroke = Stroke {
            from: (5.0, 5.0),
            to: (9.0, 5.0),
            frames: 2,
        };
        let script = Script::new(3, &[stroke]);
        assert_eq!(script.len(), 3 + 4);
        assert_eq!(script.event(0), None);
        assert_eq!(script.event(3), Some(PointerEvent::Press(5.0, 5.0)));
        assert_eq!(script.event(100), None);

        let mut pointer = Pointer::new();
        for frame in 0..5 {
            if let Some(event) = script.event(frame) {
                event.apply(&mut pointer);
            }
        }
        assert!(pointer.is_down());
        assert_eq!(pointer.velocity(), (2.0, 0.0));
    }
}
