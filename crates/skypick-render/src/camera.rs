//! Camera and view management.
//!
//! The camera is left-handed: +x right, +y up, +z into the screen, with clip
//! depth in `[0, 1]`.

use glam::{Mat4, Quat, Vec3};
use skypick_core::{CameraOptions, ViewCamera, Viewport};

/// Largest pitch away from the horizon, just short of vertical.
pub const MAX_PITCH: f32 = 7.0 * std::f32::consts::PI / 18.0;

/// A first-person camera with an orthonormal basis.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Unit viewing direction.
    look: Vec3,
    /// Unit right vector.
    right: Vec3,
    /// Unit up vector.
    up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    viewport: Viewport,
}

impl Camera {
    /// Creates a camera at the origin looking down +z.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Vec3::ZERO,
            look: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_3,
            aspect_ratio: viewport.aspect_ratio(),
            near: 1.0,
            far: 1000.0,
            viewport,
        }
    }

    /// Creates a camera from configured options.
    #[must_use]
    pub fn from_options(options: &CameraOptions, viewport: Viewport) -> Self {
        let mut camera = Self::new(viewport);
        camera.set_frustum(options.fov_y, viewport.aspect_ratio(), options.near, options.far);
        camera.look_to(options.position, options.forward, options.up);
        camera
    }

    /// Places the camera at `position` looking along `direction`.
    pub fn look_to(&mut self, position: Vec3, direction: Vec3, up: Vec3) {
        let look = direction.normalize();
        let right = up.cross(look).normalize();
        self.position = position;
        self.look = look;
        self.right = right;
        self.up = look.cross(right);
    }

    /// Places the camera at `position` looking at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.look_to(position, target - position, up);
    }

    /// Sets the perspective frustum.
    pub fn set_frustum(&mut self, fov: f32, aspect_ratio: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect_ratio = aspect_ratio;
        self.near = near;
        self.far = far;
    }

    /// Sets the viewport and matches the aspect ratio to it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.aspect_ratio = viewport.aspect_ratio();
    }

    /// Follows a window resize. Zero-sized windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.set_viewport(Viewport::from_size(width, height));
    }

    /// Unit viewing direction.
    #[must_use]
    pub fn look(&self) -> Vec3 {
        self.look
    }

    /// Unit right vector.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Moves along the right vector.
    pub fn strafe(&mut self, distance: f32) {
        self.position += self.right * distance;
    }

    /// Moves along the viewing direction projected onto the ground plane.
    pub fn walk(&mut self, distance: f32) {
        let forward = self.right.cross(Vec3::Y).normalize_or_zero();
        self.position += forward * distance;
    }

    /// Moves along the viewing direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.look * distance;
    }

    /// Rotates up or down about the right vector. Positive angles look down.
    ///
    /// The result stays within [`MAX_PITCH`] of the horizon.
    pub fn pitch(&mut self, angle: f32) {
        let current = (-self.look.y).clamp(-1.0, 1.0).asin();
        let target = (current + angle).clamp(-MAX_PITCH, MAX_PITCH);
        let rotation = Quat::from_axis_angle(self.right, target - current);
        self.look = (rotation * self.look).normalize();
        self.up = (rotation * self.up).normalize();
    }

    /// Rotates about the world y axis. Positive angles turn right.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotation = Quat::from_rotation_y(angle);
        self.right = (rotation * self.right).normalize();
        self.look = (rotation * self.look).normalize();
        self.up = (rotation * self.up).normalize();
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }
}

impl ViewCamera for Camera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(self.position, self.look, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
