//! Per-frame animation core of a spinning, bouncing triangle.
//!
//! [`animation`] advances the pose, [`transform`] turns it into the matrix
//! fed to the `transform` uniform. Everything touching a window or GL
//! context lives in the `spintri` binary and the `gl_wrapper` crate.

pub mod animation;
pub mod config;
pub mod geometry;
pub mod transform;

pub use animation::{AnimationState, MotionSettings};
pub use transform::compose;
