//! First-person camera controller.

use glam::Vec2;
use skypick_core::CameraOptions;

use crate::camera::Camera;

/// Pixels the cursor may travel while a button is held and still count as a click.
pub const CLICK_SLOP: f32 = 4.0;

/// Input gathered for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// W held.
    pub forward: bool,
    /// S held.
    pub backward: bool,
    /// A held.
    pub left: bool,
    /// D held.
    pub right: bool,
    /// Cursor travel in pixels while the look button was dragged.
    pub look_delta: Vec2,
}

impl MovementInput {
    /// Returns true if nothing would move the camera.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
            && self.look_delta == Vec2::ZERO
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Drives a [`Camera`] from keyboard and mouse state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonController {
    /// World units per second.
    pub move_speed: f32,
    /// Radians per pixel of drag.
    pub look_sensitivity: f32,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

impl FirstPersonController {
    /// Creates a controller with the configured speeds.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            move_speed: options.move_speed,
            look_sensitivity: options.look_sensitivity,
        }
    }

    /// Applies one frame of input to the camera.
    pub fn update(&self, camera: &mut Camera, input: &MovementInput, dt: f32) {
        if input.is_idle() {
            return;
        }

        let step = self.move_speed * dt;
        camera.walk(axis(input.forward, input.backward) * step);
        camera.strafe(axis(input.right, input.left) * step);

        if input.look_delta != Vec2::ZERO {
            camera.pitch(input.look_delta.y * self.look_sensitivity);
            camera.rotate_y(input.look_delta.x * self.look_sensitivity);
        }
    }
}

/// Separates a click from a drag on one mouse button.
///
/// A press followed by a release is a click unless the cursor travelled more
/// than [`CLICK_SLOP`] pixels in between; travel beyond that is reported as
/// look movement instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    pressed: bool,
    travel: f32,
}

impl DragTracker {
    /// Button went down.
    pub fn press(&mut self) {
        self.pressed = true;
        self.travel = 0.0;
    }

    /// Cursor moved by `delta` pixels.
    ///
    /// Returns the delta to apply as look movement, zero until the drag
    /// threshold is crossed.
    pub fn motion(&mut self, delta: Vec2) -> Vec2 {
        if !self.pressed {
            return Vec2::ZERO;
        }
        self.travel += delta.length();
        if self.is_dragging() {
            delta
        } else {
            Vec2::ZERO
        }
    }

    /// Button went up. Returns true if this completed a click.
    pub fn release(&mut self) -> bool {
        let was_click = self.pressed && !self.is_dragging();
        self.pressed = false;
        self.travel = 0.0;
        was_click
    }

    /// Returns true while the button is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns true once the held button has moved past the click slop.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pressed && self.travel > CLICK_SLOP
    }
}
