#![forbid(unsafe_code)]
// Allow these clippy lints for geometry code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

//! # Cloth
//!
//! A grid of animated control points that drives the vertices of a
//! deformable mesh.
//!
//! - On build, every point hops to a random nearby spot and springs back to
//!   rest with an elastic ease-out (the "reveal").
//! - While the pointer is held down, idle points inside the brush radius are
//!   pushed along with the pointer's velocity.
//! - Each frame, every point's position is written into the mesh's vertex
//!   buffer at slots `2i` and `2i + 1`.
//!
//! ## Example
//!
//! ```rust
//! use cloth::{Cloth, ClothConfig, MeshLayout, Pointer};
//!
//! let config = ClothConfig { points_x: 10, points_y: 10, seed: Some(7), ..ClothConfig::default() };
//! let layout = MeshLayout::centered(90.0, 90.0, 200.0, 200.0);
//! let mut cloth = Cloth::from_config(&config, &layout).unwrap();
//!
//! let mut vertices = vec![0.0_f32; cloth.vertex_len()];
//! let mut pointer = Pointer::new();
//! pointer.press(100.0, 100.0);
//! pointer.move_to(104.0, 100.0);
//!
//! // Animations advance first, then the brush, then the buffer is written
//! cloth.frame(1.0 / 60.0, &pointer, &mut vertices).unwrap();
//! assert!(vertices.iter().all(|v| v.is_finite()));
//! ```
//!
//! ## Driving the cloth
//!
//! The engine never keeps time itself. A host calls [`Cloth::frame`] once per
//! rendered frame; [`Cloth::advance`] and [`Cloth::update`] are available
//! separately for hosts that need to interleave other work, in which case
//! `advance` must run first.
//!
//! Completion continuations are values ([`Then`]) rather than closures.
//! Points report what their continuations did as [`Signal`]s; the cloth
//! routes them into [`ClothEvent`]s, drained with [`Cloth::drain_events`].

mod brush;
mod cloth;
mod config;
mod error;
mod point;

pub use brush::{Brush, Pointer};
pub use cloth::{Cloth, ClothBuilder, ClothEvent};
pub use config::{ClothConfig, DEFAULT_BRUSH_SIZE, DEFAULT_POINTS, MeshLayout, Tuning};
pub use error::{ClothError, Result};
pub use point::{CompletionId, Point, PointTask, Signal, Then};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::brush::{Brush, Pointer};
    pub use crate::cloth::{Cloth, ClothEvent};
    pub use crate::config::{ClothConfig, MeshLayout, Tuning};
    pub use crate::error::{ClothError, Result};
    pub use crate::point::{CompletionId, Then};
}
