//! Rendering backend for skypick.
//!
//! This crate provides the wgpu side of the samples:
//! - [`RenderEngine`] with color, lit and skybox pipelines
//! - [`Camera`] and [`FirstPersonController`]
//! - Procedural meshes and cube-map image assembly
//! - Light and uniform blocks shared with the WGSL shaders

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Graphics code has many intentional numeric casts
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod controller;
pub mod cube_image;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod lighting;

pub use camera::Camera;
pub use controller::{DragTracker, FirstPersonController, MovementInput, CLICK_SLOP};
pub use cube_image::{load_rgba, CubeImage};
pub use engine::{
    ColorDraw, CubeHandle, DrawList, Frame, LitDraw, MeshHandle, RenderEngine, TextureHandle,
};
pub use error::{RenderError, RenderResult};
pub use geometry::{box_mesh, colored_cube, cylinder_mesh, sphere_mesh, ColorVertex, LitVertex, MeshData};
pub use lighting::{default_lights, DirectionalLight, FrameUniforms, ObjectUniforms, MAX_LIGHTS};
