//! Errors raised while starting or running a sample.

use skypick_core::{SkyboxPreset, SkypickError};
use skypick_render::RenderError;
use thiserror::Error;

/// Everything that can stop a sample.
#[derive(Error, Debug)]
pub enum AppError {
    /// Options or assets were rejected.
    #[error(transparent)]
    Core(#[from] SkypickError),

    /// GPU setup or resource upload failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// The event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The options select a skybox that has no configured source.
    #[error("skybox preset '{0}' has no configured source")]
    MissingSkybox(SkyboxPreset),
}

/// A specialized Result type for running samples.
pub type Result<T> = std::result::Result<T, AppError>;
