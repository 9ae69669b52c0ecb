//! The two samples and the interface the app shell drives them through.

mod cube_mapping;
mod rotating_cube;

pub use cube_mapping::{
    CubeMappingScene, SceneObject, CUBE_EXTENTS, CYLINDER_HEIGHT, CYLINDER_POSITION,
    CYLINDER_RADIUS, GROUND_POSITION, GROUND_SCALE, SPHERE_RADIUS,
};
pub use rotating_cube::{RotatingCubeScene, PHI_RATE, THETA_RATE};

use glam::Vec2;
use skypick_core::SceneOptions;
use skypick_render::{Camera, DrawList, FirstPersonController, RenderEngine};

use crate::error::Result;

/// Pointer state for one frame.
///
/// Clicks are edge-triggered: true only on the frame the click completed,
/// and never while the pointer is over the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor position in window pixels, not yet clamped.
    pub cursor: Vec2,
    /// Left button clicked.
    pub primary_clicked: bool,
    /// Right button clicked without dragging.
    pub secondary_clicked: bool,
}

/// A sample driven by the app shell.
///
/// Per frame the shell calls [`Sample::update`], then [`Sample::build_ui`],
/// then renders [`Sample::draw_list`].
pub trait Sample {
    /// Window, camera and asset options.
    fn options(&self) -> &SceneOptions;

    /// Controller for the camera, or `None` for a fixed camera.
    fn controller(&self) -> Option<FirstPersonController>;

    /// Creates the GPU resources of the scene. Called once, after the
    /// engine exists.
    fn load(&mut self, engine: &mut RenderEngine) -> Result<()>;

    /// Advances the scene by `dt` seconds.
    fn update(&mut self, dt: f32, camera: &Camera, input: &FrameInput);

    /// Declares the UI of this frame.
    fn build_ui(&mut self, _ctx: &egui::Context) {}

    /// What to draw this frame.
    fn draw_list(&self) -> DrawList;
}
