//! Application window and event loop management.

mod input;
mod render;

use std::collections::HashSet;
pub(super) use std::sync::Arc;
pub(super) use std::time::Instant;

pub(super) use egui_wgpu::ScreenDescriptor;
pub(super) use glam::Vec2;
pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub(super) use skypick_core::{ViewCamera, Viewport};
pub(super) use skypick_render::{
    default_lights, Camera, DragTracker, FirstPersonController, FrameUniforms, MovementInput,
    RenderEngine, RenderError,
};
pub(super) use skypick_ui::EguiIntegration;

use crate::error::{AppError, Result};
pub(super) use crate::scene::{FrameInput, Sample};

/// Window, GPU and input state around one sample.
pub struct App<S: Sample> {
    pub(super) sample: S,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) camera: Camera,
    pub(super) controller: Option<FirstPersonController>,
    // Keyboard state for WASD movement
    pub(super) keys_down: HashSet<KeyCode>,
    pub(super) cursor: Vec2,
    // Right button: look while dragged, place the cube on a plain click
    pub(super) look: DragTracker,
    pub(super) look_delta: Vec2,
    // Edge-triggered clicks, consumed by the next frame
    pub(super) primary_clicked: bool,
    pub(super) secondary_clicked: bool,
    pub(super) last_frame_time: Option<Instant>,
    pub(super) close_requested: bool,
    pub(super) error: Option<AppError>,
}

impl<S: Sample> App<S> {
    /// Creates the app. The window opens once the event loop resumes.
    pub fn new(sample: S) -> Self {
        let options = sample.options();
        let camera = Camera::from_options(
            &options.camera,
            Viewport::from_size(options.width, options.height),
        );
        Self {
            sample,
            window: None,
            engine: None,
            egui: None,
            camera,
            controller: None,
            keys_down: HashSet::new(),
            cursor: Vec2::ZERO,
            look: DragTracker::default(),
            look_delta: Vec2::ZERO,
            primary_clicked: false,
            secondary_clicked: false,
            last_frame_time: None,
            close_requested: false,
            error: None,
        }
    }

    /// The sample being run.
    pub fn sample(&self) -> &S {
        &self.sample
    }
}

/// Opens a window and runs `sample` until the window closes.
///
/// Initialization failures stop the event loop and are returned.
pub fn run<S: Sample>(sample: S) -> Result<()> {
    let _ = env_logger::try_init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(sample);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
