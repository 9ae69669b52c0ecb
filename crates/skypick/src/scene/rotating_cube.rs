//! The rotating colored cube sample.

use glam::{Mat4, Vec4};
use skypick_core::SceneOptions;
use skypick_render::{
    colored_cube, Camera, ColorDraw, DrawList, FirstPersonController, MeshHandle, RenderEngine,
};

use super::{FrameInput, Sample};
use crate::error::Result;

/// Radians per second subtracted from the X rotation.
pub const PHI_RATE: f32 = 0.7;
/// Radians per second subtracted from the Y rotation.
pub const THETA_RATE: f32 = 0.9;

/// A vertex-colored cube spinning in front of a fixed camera.
#[derive(Debug, Clone)]
pub struct RotatingCubeScene {
    options: SceneOptions,
    phi: f32,
    theta: f32,
    mesh: Option<MeshHandle>,
}

impl RotatingCubeScene {
    /// Creates the scene with both angles at zero.
    pub fn new(options: SceneOptions) -> Self {
        Self {
            options,
            phi: 0.0,
            theta: 0.0,
            mesh: None,
        }
    }

    /// Advances the rotation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.phi -= PHI_RATE * dt;
        self.theta -= THETA_RATE * dt;
    }

    /// Current `(phi, theta)` angles in radians.
    pub fn angles(&self) -> (f32, f32) {
        (self.phi, self.theta)
    }

    /// World transform: rotate about X by `phi`, then about Y by `theta`.
    pub fn world(&self) -> Mat4 {
        Mat4::from_rotation_y(self.theta) * Mat4::from_rotation_x(self.phi)
    }
}

impl Default for RotatingCubeScene {
    fn default() -> Self {
        Self::new(SceneOptions::rotating_cube())
    }
}

impl Sample for RotatingCubeScene {
    fn options(&self) -> &SceneOptions {
        &self.options
    }

    fn controller(&self) -> Option<FirstPersonController> {
        None
    }

    fn load(&mut self, engine: &mut RenderEngine) -> Result<()> {
        self.mesh = Some(engine.upload_color_mesh("cube", &colored_cube()));
        Ok(())
    }

    fn update(&mut self, dt: f32, _camera: &Camera, _input: &FrameInput) {
        self.advance(dt);
    }

    fn draw_list(&self) -> DrawList {
        let clear: Vec4 = self.options.clear_color;
        DrawList {
            clear_color: clear.as_dvec4().to_array(),
            colored: self
                .mesh
                .map(|mesh| ColorDraw {
                    mesh,
                    world: self.world(),
                })
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_angles_decrease_with_time() {
        let mut scene = RotatingCubeScene::default();
        scene.advance(0.5);
        scene.advance(0.5);
        let (phi, theta) = scene.angles();
        assert!((phi + 0.7).abs() < 1e-6);
        assert!((theta + 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_world_applies_x_then_y() {
        let mut scene = RotatingCubeScene::default();
        // phi = -pi/2, theta = 0: +Y rotates about X onto -Z.
        scene.advance(std::f32::consts::FRAC_PI_2 / PHI_RATE);
        scene.theta = 0.0;
        let rotated = scene.world().transform_vector3(Vec3::Y);
        assert!((rotated - Vec3::NEG_Z).length() < 1e-5);

        // phi = 0, theta = -pi/2: +X rotates about Y onto +Z.
        scene.phi = 0.0;
        scene.theta = -std::f32::consts::FRAC_PI_2;
        let rotated = scene.world().transform_vector3(Vec3::X);
        assert!((rotated - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_draw_list_before_load_is_empty() {
        let scene = RotatingCubeScene::default();
        let list = scene.draw_list();
        assert!(list.colored.is_empty());
        assert_eq!(list.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(scene.controller().is_none());
    }

    #[test]
    fn test_camera_options_match_sample() {
        let scene = RotatingCubeScene::default();
        let camera = &scene.options().camera;
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, -5.0));
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
