#![forbid(unsafe_code)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]

//! # Cloth Demo
//!
//! Headless driver for the `cloth` engine.
//!
//! The demo stands in for an interactive host: it centres a mesh in a
//! viewport, builds the cloth, ticks a fixed-step frame loop, feeds scripted
//! pointer strokes and reports how the mesh ended up.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p cloth_demo -- --seed 42 --strokes 5
//! ```

pub mod cli;
pub mod config;
pub mod run;
pub mod script;

pub use cli::Cli;
pub use config::{ConfigError, DemoConfig};
pub use run::{Report, Simulation};

/// Maps `-v` occurrences to a default tracing filter.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
