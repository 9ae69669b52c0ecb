//! Rendering error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable configuration for the adapter.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// An image file could not be read or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoadFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Cube-map faces do not share one square size.
    #[error("cube face {face} is {actual_width}x{actual_height}, expected {width}x{height}")]
    CubeFaceMismatch {
        face: usize,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// A cube source did not provide six faces.
    #[error("cube map needs 6 faces, got {0}")]
    CubeFaceCount(usize),

    /// Texture creation failed.
    #[error("texture creation failed: {0}")]
    TextureCreationFailed(String),

    /// Surface lost.
    #[error("surface lost")]
    SurfaceLost,

    /// Surface outdated.
    #[error("surface outdated")]
    SurfaceOutdated,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Timeout waiting for GPU.
    #[error("timeout waiting for GPU")]
    Timeout,
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            // Outdated, and Other for surfaces that need reconfiguring.
            _ => RenderError::SurfaceOutdated,
        }
    }
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
