//! 2D transform component.
//!
//! [`Transform2D`] places a sprite on a raster surface: position in pixels,
//! rotation in radians and a per-axis scale.

use engine_component::Component;
use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in surface pixels, origin top-left.
    pub position: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// The affine matrix mapping local space to surface space.
    #[must_use]
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.position)
    }

    /// Map a point from local space to surface space.
    #[must_use]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.to_affine().transform_point2(local)
    }

    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.position += offset;
        self
    }

    #[must_use]
    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation += radians;
        self
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform2D {
    fn type_name() -> &'static str {
        "Transform2D"
    }
}
