//! # engine_math
//!
//! Re-exports [`glam`] and defines the spatial components shared by the demo
//! systems.

pub mod transform;

pub use glam::{Affine2, Vec2};

pub use transform::Transform2D;
