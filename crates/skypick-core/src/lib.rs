//! Core types for skypick.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`Ray`] construction from a cursor and a [`ViewCamera`]
//! - [`BoundingSphere`] and [`BoundingBox`] ray tests
//! - [`Picker`], which resolves the object under the cursor
//! - [`Placeable`], the place-and-remove state machine
//! - Materials, skybox presets and [`SceneOptions`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod bounds;
pub mod error;
pub mod material;
pub mod options;
pub mod pick;
pub mod ray;
pub mod selection;
pub mod skybox;
pub mod transform;
pub mod view;

pub use bounds::{BoundingBox, BoundingSphere};
pub use error::{Result, SkypickError};
pub use material::Material;
pub use options::{CameraOptions, SceneMaterials, SceneOptions, CONFIG_ENV_VAR};
pub use pick::{PickPolicy, PickResult, PickTarget, PickVolume, Picker};
pub use ray::Ray;
pub use selection::{Placeable, PlacementEvent, PlacementState};
pub use skybox::{CubeFace, CubeSource, SkyboxConfig, SkyboxPreset};
pub use transform::Transform;
pub use view::{ViewCamera, Viewport};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
