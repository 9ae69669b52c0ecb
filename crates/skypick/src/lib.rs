//! skypick: two small rendering samples on wgpu.
//!
//! - `rotating_cube`: a vertex-colored cube spinning in front of a fixed camera.
//! - `cube_mapping`: a reflective sphere, ground, cylinder and skybox with
//!   mouse picking. A right click on the ground places a cube, a left click
//!   on the cube removes it.
//!
//! Both samples implement [`Sample`] and are run with [`run`]:
//!
//! ```no_run
//! use skypick::{run, CubeMappingScene, SceneOptions};
//!
//! fn main() -> skypick::Result<()> {
//!     let options = SceneOptions::from_env_or(SceneOptions::default())?;
//!     run(CubeMappingScene::new(options))
//! }
//! ```
//!
//! Options are read from the JSON file named by `SKYPICK_CONFIG` when set.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
pub mod error;
pub mod scene;

pub use app::{run, App};
pub use error::{AppError, Result};
pub use scene::{CubeMappingScene, FrameInput, RotatingCubeScene, Sample, SceneObject};

pub use skypick_core::{
    PickPolicy, PickResult, PickTarget, Placeable, PlacementState, SceneOptions, SkyboxPreset,
    Vec2, Vec3,
};
