//! Viewport rectangle and the camera interface consumed by picking.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A viewport rectangle in window pixels plus its depth range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in pixels.
    pub top_left_x: f32,
    /// Top edge in pixels.
    pub top_left_y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Depth mapped to the near plane.
    pub min_depth: f32,
    /// Depth mapped to the far plane.
    pub max_depth: f32,
}

impl Viewport {
    /// Creates a viewport covering `[x, x + width] x [y, y + height]` with depth `[0, 1]`.
    #[must_use]
    pub fn new(top_left_x: f32, top_left_y: f32, width: f32, height: f32) -> Self {
        Self {
            top_left_x,
            top_left_y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Creates a viewport covering a whole `width x height` surface.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Clamps a cursor position to the last addressable pixel of the viewport.
    #[must_use]
    pub fn clamp_cursor(&self, cursor: Vec2) -> Vec2 {
        let max_x = (self.top_left_x + self.width - 1.0).max(self.top_left_x);
        let max_y = (self.top_left_y + self.height - 1.0).max(self.top_left_y);
        Vec2::new(
            cursor.x.clamp(self.top_left_x, max_x),
            cursor.y.clamp(self.top_left_y, max_y),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1280.0, 720.0)
    }
}

/// What picking needs from a camera.
pub trait ViewCamera {
    /// World-to-view transform.
    fn view_matrix(&self) -> Mat4;

    /// View-to-clip transform. Clip depth is expected in `[0, 1]`.
    fn projection_matrix(&self) -> Mat4;

    /// The viewport the camera renders into.
    fn viewport(&self) -> Viewport;

    /// Eye position in world space.
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_aspect_ratio() {
        let vp = Viewport::from_size(1600, 800);
        assert_eq!(vp.aspect_ratio(), 2.0);
        assert_eq!(Viewport::new(0.0, 0.0, 10.0, 0.0).aspect_ratio(), 1.0);
    }

    #[test]
    fn test_clamp_cursor() {
        let vp = Viewport::from_size(800, 600);
        assert_eq!(
            vp.clamp_cursor(Vec2::new(-20.0, 900.0)),
            Vec2::new(0.0, 599.0)
        );
        assert_eq!(
            vp.clamp_cursor(Vec2::new(400.0, 300.0)),
            Vec2::new(400.0, 300.0)
        );
    }
}
