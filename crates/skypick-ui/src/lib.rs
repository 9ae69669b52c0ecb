//! UI layer for skypick using egui.

#![allow(clippy::must_use_candidate)]

pub mod integration;
pub mod panels;

pub use integration::EguiIntegration;
pub use panels::{
    build_scene_panel, coordinate_label, object_label, SceneUiState, PANEL_TITLE,
};
