//! Configuration options for the skypick samples.

use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkypickError};
use crate::material::Material;
use crate::pick::PickPolicy;
use crate::skybox::{SkyboxConfig, SkyboxPreset};

/// Environment variable naming a JSON options file.
pub const CONFIG_ENV_VAR: &str = "SKYPICK_CONFIG";

/// Initial camera pose and frustum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Eye position.
    pub position: Vec3,
    /// Viewing direction.
    pub forward: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Radians of rotation per pixel of mouse drag.
    pub look_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -10.0),
            forward: Vec3::Z,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_3,
            near: 1.0,
            far: 1000.0,
            move_speed: 5.0,
            look_sensitivity: 0.004,
        }
    }
}

/// Materials of the cube-mapping scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneMaterials {
    pub cube: Material,
    pub sphere: Material,
    pub ground: Material,
    pub cylinder: Material,
}

impl Default for SceneMaterials {
    fn default() -> Self {
        Self {
            cube: Material::cube(),
            sphere: Material::sphere(),
            ground: Material::ground(),
            cylinder: Material::cylinder(),
        }
    }
}

impl SceneMaterials {
    /// Iterates over all materials.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        [&self.cube, &self.sphere, &self.ground, &self.cylinder].into_iter()
    }
}

/// Options for one sample window and its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Color the frame is cleared to.
    pub clear_color: Vec4,
    /// Starting camera.
    pub camera: CameraOptions,
    /// How overlapping pick candidates are resolved.
    pub pick_policy: PickPolicy,
    /// Directory textures and skybox images are read from.
    pub asset_root: PathBuf,
    /// Object materials.
    pub materials: SceneMaterials,
    /// Skybox sources, one per preset.
    pub skyboxes: Vec<SkyboxConfig>,
    /// Skybox shown at startup.
    pub initial_skybox: SkyboxPreset,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            title: "Static Cube Mapping".to_string(),
            width: 1280,
            height: 720,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            camera: CameraOptions::default(),
            pick_policy: PickPolicy::FirstMatch,
            asset_root: PathBuf::from("assets"),
            materials: SceneMaterials::default(),
            skyboxes: SkyboxConfig::defaults(),
            initial_skybox: SkyboxPreset::Daylight,
        }
    }
}

impl SceneOptions {
    /// Defaults for the rotating cube sample.
    #[must_use]
    pub fn rotating_cube() -> Self {
        Self {
            title: "Rotating Cube".to_string(),
            camera: CameraOptions {
                position: Vec3::new(0.0, 0.0, -5.0),
                forward: Vec3::Z,
                fov_y: std::f32::consts::FRAC_PI_2,
                ..CameraOptions::default()
            },
            ..Self::default()
        }
    }

    /// Parses options from JSON over the cube-mapping defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_over(json, &Self::default())
    }

    /// Parses options from JSON, taking every field the JSON leaves out from
    /// `base`. Objects are merged key by key, so a partial material keeps the
    /// rest of its preset. Arrays and scalars replace the base value.
    pub fn from_json_over(json: &str, base: &Self) -> Result<Self> {
        let patch: serde_json::Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(base)?;
        merge_json(&mut merged, patch);
        let options: Self = serde_json::from_value(merged)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and validates options from a JSON file over the cube-mapping defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_over(path, &Self::default())
    }

    /// Reads and validates options from a JSON file over `base`.
    pub fn load_over(path: impl AsRef<Path>, base: &Self) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_over(&json, base)?;
        log::info!("loaded scene options from {}", path.display());
        Ok(options)
    }

    /// Loads options from `SKYPICK_CONFIG` over `defaults` if the variable is
    /// set, otherwise returns `defaults`.
    pub fn from_env_or(defaults: Self) -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_over(PathBuf::from(path), &defaults),
            None => Ok(defaults),
        }
    }

    /// Returns the source of `preset`, if configured.
    #[must_use]
    pub fn skybox(&self, preset: SkyboxPreset) -> Option<&SkyboxConfig> {
        self.skyboxes.iter().find(|config| config.preset == preset)
    }

    /// Presets with a configured source, in [`SkyboxPreset::ALL`] order.
    #[must_use]
    pub fn configured_skyboxes(&self) -> Vec<SkyboxPreset> {
        SkyboxPreset::ALL
            .into_iter()
            .filter(|preset| self.skybox(*preset).is_some())
            .collect()
    }

    /// Resolves a file under the asset root, failing if it does not exist.
    pub fn resolve_asset(&self, name: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.asset_root.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SkypickError::AssetNotFound(path.display().to_string()))
        }
    }

    /// Checks value ranges and cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(SkypickError::InvalidOptions(reason));

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_y > 0.0 && camera.fov_y < std::f32::consts::PI) {
            return invalid(format!("fov_y must lie in (0, pi), got {}", camera.fov_y));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            ));
        }
        if !camera.position.is_finite() {
            return invalid("camera position must be finite".to_string());
        }
        if camera.forward.length_squared() < 1e-12 || camera.up.length_squared() < 1e-12 {
            return invalid("camera forward and up must be non-zero".to_string());
        }
        if camera.forward.normalize().cross(camera.up.normalize()).length_squared() < 1e-6 {
            return invalid("camera forward and up must not be parallel".to_string());
        }
        if camera.move_speed < 0.0 || camera.look_sensitivity < 0.0 {
            return invalid("camera speeds must be non-negative".to_string());
        }

        for material in self.materials.iter() {
            material.validate()?;
        }

        if self.skybox(self.initial_skybox).is_none() {
            return invalid(format!(
                "initial skybox '{}' has no configured source",
                self.initial_skybox
            ));
        }
        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}
