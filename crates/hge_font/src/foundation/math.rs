//! Math utilities and types
//!
//! Provides the small set of 2D types used for glyph placement.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D rotation type
pub type Rot2 = Rotation2<f32>;

/// Placement of a scaled, rotated quad in screen space
///
/// Maps quad-local coordinates (pixels inside the source rectangle, origin at
/// its top-left corner) to destination coordinates. The hot spot is the
/// quad's top-left corner, so rotation pivots there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTransform {
    /// Destination of the quad's top-left corner
    pub origin: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Horizontal and vertical scale
    pub scale: Vec2,
}

impl QuadTransform {
    /// Create a new transform
    pub fn new(origin: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self { origin, rotation, scale }
    }

    /// Map a quad-local point to destination space
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let scaled = local.component_mul(&self.scale);
        self.origin + Rot2::new(self.rotation) * scaled
    }

    /// Map a destination point back to quad-local space
    ///
    /// Returns `None` when either scale component is zero.
    pub fn invert(&self, world: Vec2) -> Option<Vec2> {
        if self.scale.x == 0.0 || self.scale.y == 0.0 {
            return None;
        }
        let unrotated = Rot2::new(-self.rotation) * (world - self.origin);
        Some(unrotated.component_div(&self.scale))
    }
}
