//! Per-object surface materials.
//!
//! A material carries the Phong terms consumed by the lit shader, an optional
//! reflection weight for sampling the environment cube map, and the diffuse
//! texture file name.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkypickError};

/// A typed surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Name used in diagnostics.
    pub name: String,
    /// Ambient reflectance.
    pub ambient: Vec4,
    /// Diffuse reflectance. The alpha channel is kept for the shader.
    pub diffuse: Vec4,
    /// Specular reflectance.
    pub specular: Vec4,
    /// Phong exponent.
    pub specular_power: f32,
    /// Weight of the environment reflection, `None` for a non-reflective surface.
    pub reflect: Option<Vec4>,
    /// Diffuse texture file, relative to the asset root.
    pub texture: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default")
    }
}

impl Material {
    /// Creates a grey material with the usual sample terms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.6, 0.6, 0.6, 1.0),
            specular: Vec4::new(0.2, 0.2, 0.2, 1.0),
            specular_power: 16.0,
            reflect: None,
            texture: None,
        }
    }

    /// Sets the ambient term.
    #[must_use]
    pub fn with_ambient(mut self, ambient: Vec4) -> Self {
        self.ambient = ambient;
        self
    }

    /// Sets the diffuse term.
    #[must_use]
    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Sets the specular term and exponent.
    #[must_use]
    pub fn with_specular(mut self, specular: Vec4, power: f32) -> Self {
        self.specular = specular;
        self.specular_power = power;
        self
    }

    /// Makes the surface reflect the environment.
    #[must_use]
    pub fn with_reflect(mut self, reflect: Vec4) -> Self {
        self.reflect = Some(reflect);
        self
    }

    /// Sets the diffuse texture file.
    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Returns true if the environment map contributes to this surface.
    #[must_use]
    pub fn is_reflective(&self) -> bool {
        self.reflect.is_some_and(|r| r.truncate().max_element() > 0.0)
    }

    /// Checks the terms are usable by the lit shader.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| SkypickError::InvalidMaterial {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        let terms = [("ambient", self.ambient), ("diffuse", self.diffuse)];
        for (label, term) in terms {
            if !term.is_finite() || term.min_element() < 0.0 {
                return Err(invalid(&format!("{label} must be finite and non-negative")));
            }
        }
        if !self.specular.is_finite() || self.specular.truncate().min_element() < 0.0 {
            return Err(invalid("specular must be finite and non-negative"));
        }
        if !self.specular_power.is_finite() || self.specular_power < 1.0 {
            return Err(invalid("specular power must be at least 1"));
        }
        if let Some(reflect) = self.reflect {
            if !reflect.is_finite() || reflect.min_element() < 0.0 || reflect.max_element() > 1.0 {
                return Err(invalid("reflect must lie in [0, 1]"));
            }
        }
        if self.texture.as_deref().is_some_and(str::is_empty) {
            return Err(invalid("texture name is empty"));
        }
        Ok(())
    }

    /// The placeable cube.
    #[must_use]
    pub fn cube() -> Self {
        Self::new("cube")
            .with_diffuse(Vec4::new(0.6, 0.6, 0.6, 1.0))
            .with_specular(Vec4::new(0.2, 0.2, 0.2, 1.0), 16.0)
            .with_texture("water2.png")
    }

    /// The reflective sphere.
    #[must_use]
    pub fn sphere() -> Self {
        Self::new("sphere")
            .with_diffuse(Vec4::new(0.5, 0.5, 0.5, 1.0))
            .with_specular(Vec4::new(0.8, 0.8, 0.8, 1.0), 16.0)
            .with_reflect(Vec4::new(0.8, 0.8, 0.8, 1.0))
            .with_texture("stone.png")
    }

    /// The ground slab.
    #[must_use]
    pub fn ground() -> Self {
        Self::new("ground")
            .with_diffuse(Vec4::new(0.3, 0.0, 0.4, 0.1))
            .with_specular(Vec4::new(0.2, 0.2, 0.2, 1.0), 16.0)
            .with_texture("floor.png")
    }

    /// The cylinder.
    #[must_use]
    pub fn cylinder() -> Self {
        Self::new("cylinder")
            .with_diffuse(Vec4::new(0.1, 0.1, 0.6, 1.0))
            .with_specular(Vec4::new(0.2, 0.2, 0.2, 1.0), 16.0)
            .with_texture("bricks.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_materials_validate() {
        for material in [
            Material::cube(),
            Material::sphere(),
            Material::ground(),
            Material::cylinder(),
        ] {
            assert!(material.validate().is_ok(), "{} failed", material.name);
        }
    }

    #[test]
    fn test_only_sphere_reflects() {
        assert!(Material::sphere().is_reflective());
        assert!(!Material::cube().is_reflective());
        assert!(!Material::new("zero").with_reflect(Vec4::ZERO).is_reflective());
    }

    #[test]
    fn test_negative_diffuse_is_rejected() {
        let material = Material::new("bad").with_diffuse(Vec4::new(-0.1, 0.0, 0.0, 1.0));
        let err = material.validate().unwrap_err();
        assert!(err.to_string().contains("diffuse"));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_out_of_range_reflect_is_rejected() {
        let material = Material::new("mirror").with_reflect(Vec4::splat(1.5));
        assert!(matches!(
            material.validate(),
            Err(SkypickError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn test_bad_specular_power_is_rejected() {
        let material = Material::new("dull").with_specular(Vec4::ZERO, 0.0);
        assert!(material.validate().is_err());
        let material = Material::new("nan").with_specular(Vec4::ZERO, f32::NAN);
        assert!(material.validate().is_err());
    }

    #[test]
    fn test_empty_texture_is_rejected() {
        assert!(Material::new("blank").with_texture("").validate().is_err());
    }

    #[test]
    fn test_material_json_uses_defaults() {
        let material: Material = serde_json::from_str(r#"{"name": "partial"}"#).unwrap();
        assert_eq!(material.name, "partial");
        assert_eq!(material.specular_power, 16.0);
        assert_eq!(material.reflect, None);
    }
}
