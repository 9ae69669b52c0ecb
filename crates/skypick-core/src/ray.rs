//! World-space rays built from the cursor.

use glam::{Vec2, Vec3};

use crate::bounds::{BoundingBox, BoundingSphere};
use crate::view::ViewCamera;

/// A ray with an origin and a direction.
///
/// The direction is not required to be normalized; intersection distances are
/// expressed in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parametric distance `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Builds the ray under a screen pixel.
    ///
    /// The pixel is mapped back through the viewport to normalized device
    /// coordinates at the viewport's near depth, unprojected with the inverse
    /// view-projection transform, and the ray runs from the camera eye through
    /// that point. Callers clamp the pixel to the viewport first.
    ///
    /// A degenerate projection (zero-sized viewport, singular matrix) yields a
    /// meaningless ray; it is not detected here.
    pub fn screen_to_ray(camera: &impl ViewCamera, screen_x: f32, screen_y: f32) -> Self {
        let viewport = camera.viewport();

        let ndc_x = (screen_x - viewport.top_left_x) / (viewport.width * 0.5) - 1.0;
        let ndc_y = 1.0 - (screen_y - viewport.top_left_y) / (viewport.height * 0.5);
        let ndc_z = -viewport.min_depth / (viewport.max_depth - viewport.min_depth);

        let inv_view_proj = (camera.projection_matrix() * camera.view_matrix()).inverse();
        let target = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, ndc_z));

        let eye = camera.position();
        Self::new(eye, (target - eye).normalize())
    }

    /// Same as [`Ray::screen_to_ray`], taking the cursor as a vector.
    pub fn from_cursor(camera: &impl ViewCamera, cursor: Vec2) -> Self {
        Self::screen_to_ray(camera, cursor.x, cursor.y)
    }

    /// Returns true if the ray meets the sphere at a non-negative distance.
    #[must_use]
    pub fn hit_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.intersect(self).is_some()
    }

    /// Returns true if the ray enters the box in front of its origin.
    #[must_use]
    pub fn hit_box(&self, aabb: &BoundingBox) -> bool {
        aabb.intersect(self).is_some()
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::view::Viewport;

    struct TestCamera {
        eye: Vec3,
        look: Vec3,
        viewport: Viewport,
    }

    impl ViewCamera for TestCamera {
        fn view_matrix(&self) -> Mat4 {
            Mat4::look_to_lh(self.eye, self.look, Vec3::Y)
        }

        fn projection_matrix(&self) -> Mat4 {
            Mat4::perspective_lh(
                std::f32::consts::FRAC_PI_3,
                self.viewport.aspect_ratio(),
                1.0,
                1000.0,
            )
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn position(&self) -> Vec3 {
            self.eye
        }
    }

    fn camera() -> TestCamera {
        TestCamera {
            eye: Vec3::new(0.0, 0.0, -10.0),
            look: Vec3::Z,
            viewport: Viewport::from_size(800, 600),
        }
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.at(1.5), Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn test_screen_center_looks_forward() {
        let cam = camera();
        let ray = Ray::screen_to_ray(&cam, 400.0, 300.0);
        assert_eq!(ray.origin, cam.eye);
        assert!((ray.direction - Vec3::Z).length() < 1e-4);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_screen_corners_map_to_world_axes() {
        let cam = camera();
        // Left half of the screen maps to -x, top half to +y.
        let top_left = Ray::screen_to_ray(&cam, 0.0, 0.0);
        assert!(top_left.direction.x < 0.0);
        assert!(top_left.direction.y > 0.0);

        let bottom_right = Ray::screen_to_ray(&cam, 799.0, 599.0);
        assert!(bottom_right.direction.x > 0.0);
        assert!(bottom_right.direction.y < 0.0);
    }

    #[test]
    fn test_screen_ray_respects_half_fov() {
        let cam = camera();
        let top = Ray::screen_to_ray(&cam, 400.0, 0.0);
        // Vertical half-angle of a 60 degree frustum is 30 degrees.
        let angle = top.direction.angle_between(Vec3::Z);
        assert!((angle - std::f32::consts::FRAC_PI_6).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_offset_is_removed() {
        let mut cam = camera();
        cam.viewport = Viewport::new(100.0, 50.0, 800.0, 600.0);
        let ray = Ray::screen_to_ray(&cam, 500.0, 350.0);
        assert!((ray.direction - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_cursor_over_sphere_hits() {
        let cam = camera();
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        assert!(Ray::from_cursor(&cam, Vec2::new(400.0, 300.0)).hit_sphere(&sphere));
        assert!(!Ray::from_cursor(&cam, Vec2::new(0.0, 0.0)).hit_sphere(&sphere));
    }

    #[test]
    fn test_cursor_below_horizon_hits_ground() {
        let cam = camera();
        let ground = BoundingBox::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(50.0, 0.5, 50.0));
        assert!(Ray::screen_to_ray(&cam, 400.0, 599.0).hit_box(&ground));
        assert!(!Ray::screen_to_ray(&cam, 400.0, 0.0).hit_box(&ground));
    }
}
