//! Command-line interface for `cloth_demo`.
//!
//! # Examples
//!
//! ```bash
//! # Reveal plus three random strokes on the default 50x50 grid
//! cloth_demo
//!
//! # Deterministic run from a config file, dumping the final vertex buffer
//! cloth_demo --config cloth.toml --seed 42 --dump vertices.json
//!
//! # Small grid, bigger brush, verbose logging
//! cloth_demo --points-x 10 --points-y 10 --brush-size 60 -vv
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Headless cloth warp driver.
///
/// Builds a cloth for a mesh centred in a viewport, plays the reveal
/// animation, drags a simulated pointer across it and reports how far the
/// mesh moved.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "cloth_demo",
    author,
    version,
    about = "Headless cloth warp driver",
    long_about = "Builds a cloth grid over a mesh, plays the reveal animation, \
                  drags a scripted pointer across it and prints a JSON report."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "CLOTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for the reveal animation and the scripted strokes
    #[arg(long, short = 's', env = "CLOTH_SEED")]
    pub seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, short = 'f')]
    pub frames: Option<u32>,

    /// Frames per second of the simulated clock
    #[arg(long)]
    pub fps: Option<u32>,

    /// Grid points along x
    #[arg(long)]
    pub points_x: Option<usize>,

    /// Grid points along y
    #[arg(long)]
    pub points_y: Option<usize>,

    /// Brush radius in pixels
    #[arg(long)]
    pub brush_size: Option<f32>,

    /// Pin the grid corners
    #[arg(long)]
    pub pin_corners: bool,

    /// Mesh width in pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Mesh height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of pointer strokes to play after the reveal
    #[arg(long)]
    pub strokes: Option<u32>,

    /// Write the final vertex buffer as JSON to this path
    #[arg(long, short = 'd')]
    pub dump: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
