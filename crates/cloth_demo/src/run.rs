//! The headless frame loop.
//!
//! Plays the role of the host's animation-frame callback: one
//! [`Cloth::frame`] per tick with the scripted pointer, collecting a
//! [`Report`] as it goes.

use cloth::{Cloth, ClothEvent, Pointer};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DemoConfig;
use crate::script::{Script, Stroke};

/// Summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Seed used for the cloth and the strokes.
    pub seed: u64,
    /// Grid points.
    pub points: usize,
    /// Frames simulated.
    pub frames: u32,
    /// Frame on which the reveal finished, if it did.
    pub revealed_at: Option<u32>,
    /// Frames on which the pointer was down.
    pub pointer_frames: u32,
    /// Largest distance of any point from its rest position at the end.
    pub max_offset: f32,
    /// Mean distance of all points from rest at the end.
    pub mean_offset: f32,
    /// Completion events drained during the run.
    pub events: usize,
}

/// A cloth plus its scripted input and vertex buffer.
pub struct Simulation {
    cloth: Cloth,
    script: Script,
    pointer: Pointer,
    vertices: Vec<f32>,
    seed: u64,
    delta: f32,
}

impl Simulation {
    /// Builds the cloth and the stroke script.
    ///
    /// # Errors
    ///
    /// Returns the cloth's configuration error.
    pub fn new(config: &DemoConfig) -> cloth::Result<Self> {
        let seed = config.effective_seed();
        let mut cloth_config = config.cloth.clone();
        cloth_config.seed = Some(seed);

        let layout = config.mesh.layout();
        let cloth = Cloth::from_config(&cloth_config, &layout)?;

        // Strokes start once the longest possible reveal has finished, and
        // only strokes that start within the run are generated
        let total = config.run.frames;
        let tuning = &cloth_config.tuning;
        let reveal_frames = (2.0 * tuning.max_duration / config.run.frame_delta()).ceil();
        let start = if reveal_frames < total as f32 {
            reveal_frames as u32
        } else {
            total
        };
        let mut rng = Pcg64::seed_from_u64(seed ^ 0x5eed_c107);
        let mut strokes = Vec::new();
        let mut next = start as usize;
        for _ in 0..config.run.strokes {
            if next >= total as usize {
                break;
            }
            let stroke = Stroke::random(&mut rng, &layout, config.run.stroke_frames);
            next = next.saturating_add(stroke.span());
            strokes.push(stroke);
        }
        let script = Script::new(start, &strokes);

        info!(
            seed,
            points = cloth.len(),
            free = cloth.is_free(),
            strokes = strokes.len(),
            script_frames = script.len(),
            "Simulation ready"
        );

        let vertices = vec![0.0; cloth.vertex_len()];
        Ok(Self {
            cloth,
            script,
            pointer: Pointer::new(),
            vertices,
            seed,
            delta: config.run.frame_delta(),
        })
    }

    /// Runs `frames` frames and reports.
    ///
    /// # Errors
    ///
    /// Propagates frame errors from the cloth.
    pub fn run(&mut self, frames: u32) -> cloth::Result<Report> {
        let mut revealed_at = None;
        let mut pointer_frames = 0;
        let mut events = 0;

        for frame in 0..frames {
            if let Some(event) = self.script.event(frame as usize) {
                event.apply(&mut self.pointer);
            }
            if self.pointer.is_down() {
                pointer_frames += 1;
            }

            self.cloth.frame(self.delta, &self.pointer, &mut self.vertices)?;

            for event in self.cloth.drain_events() {
                events += 1;
                if let ClothEvent::Completed(id) = event {
                    debug!(frame, completion = id.get(), "Completion");
                }
            }
            if revealed_at.is_none() && self.cloth.is_settled() {
                revealed_at = Some(frame);
                info!(frame, "Reveal finished");
            }
        }

        let offsets: Vec<f32> = self
            .cloth
            .points()
            .iter()
            .map(|p| {
                let (x, y) = p.position();
                let (rx, ry) = p.rest();
                (x - rx).hypot(y - ry)
            })
            .collect();
        let max_offset = offsets.iter().copied().fold(0.0, f32::max);
        let mean_offset = offsets.iter().sum::<f32>() / offsets.len().max(1) as f32;

        Ok(Report {
            seed: self.seed,
            points: self.cloth.len(),
            frames,
            revealed_at,
            pointer_frames,
            max_offset,
            mean_offset,
            events,
        })
    }

    /// The vertex buffer as last written.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// The cloth.
    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }
}
