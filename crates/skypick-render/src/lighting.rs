//! Directional lights and the per-frame / per-object uniform blocks.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use skypick_core::{Material, Transform};

/// Number of directional lights the lit shader evaluates.
pub const MAX_LIGHTS: usize = 4;

/// A directional light, laid out for a WGSL uniform array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub direction: [f32; 3],
    pub _pad: f32,
}

impl DirectionalLight {
    /// Creates a light with grey terms shining along `direction`.
    #[must_use]
    pub fn new(ambient: f32, diffuse: f32, specular: f32, direction: Vec3) -> Self {
        let grey = |v: f32| [v, v, v, 1.0];
        Self {
            ambient: grey(ambient),
            diffuse: grey(diffuse),
            specular: grey(specular),
            direction: direction.to_array(),
            _pad: 0.0,
        }
    }
}

/// The four downward diagonal lights of the cube-mapping scene.
#[must_use]
pub fn default_lights() -> [DirectionalLight; MAX_LIGHTS] {
    [
        Vec3::new(-0.577, -0.577, 0.577),
        Vec3::new(0.577, -0.577, 0.577),
        Vec3::new(0.577, -0.577, -0.577),
        Vec3::new(-0.577, -0.577, -0.577),
    ]
    .map(|direction| DirectionalLight::new(0.15, 0.5, 0.1, direction))
}

/// Per-frame uniforms shared by every pipeline (group 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub lights: [DirectionalLight; MAX_LIGHTS],
}

impl FrameUniforms {
    /// Packs camera matrices, eye position and lights.
    #[must_use]
    pub fn new(view: Mat4, proj: Mat4, eye: Vec3, lights: &[DirectionalLight; MAX_LIGHTS]) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            lights: *lights,
        }
    }
}

/// Per-object uniforms for the lit and color pipelines (group 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub world: [[f32; 4]; 4],
    pub world_inv_transpose: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub reflect: [f32; 4],
    /// x: specular power, y: 1.0 when the environment map is sampled.
    pub params: [f32; 4],
}

impl ObjectUniforms {
    /// Packs a world matrix and material.
    ///
    /// Reflection is applied only when both the frame enables it and the
    /// material reflects.
    #[must_use]
    pub fn new(world: Mat4, material: &Material, reflection_enabled: bool) -> Self {
        let reflect = material.reflect.unwrap_or(Vec4::ZERO);
        let reflecting = reflection_enabled && material.is_reflective();
        Self {
            world: world.to_cols_array_2d(),
            world_inv_transpose: world.inverse().transpose().to_cols_array_2d(),
            ambient: material.ambient.to_array(),
            diffuse: material.diffuse.to_array(),
            specular: material.specular.to_array(),
            reflect: reflect.to_array(),
            params: [
                material.specular_power,
                if reflecting { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }

    /// Uniforms for an object placed by `transform`.
    #[must_use]
    pub fn from_transform(transform: &Transform, material: &Material, reflection_enabled: bool) -> Self {
        Self::new(transform.to_matrix(), material, reflection_enabled)
    }

    /// Uniforms that only carry a world matrix, for the color pipeline.
    #[must_use]
    pub fn world_only(world: Mat4) -> Self {
        Self::new(world, &Material::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<DirectionalLight>(), 64);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 400);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 208);
    }

    #[test]
    fn test_default_lights_point_down() {
        let lights = default_lights();
        for light in &lights {
            assert!(light.direction[1] < 0.0);
            assert_eq!(light.ambient, [0.15, 0.15, 0.15, 1.0]);
            assert_eq!(light.diffuse, [0.5, 0.5, 0.5, 1.0]);
        }
    }

    #[test]
    fn test_reflection_flag_needs_frame_and_material() {
        let world = Mat4::IDENTITY;
        assert_eq!(ObjectUniforms::new(world, &Material::sphere(), true).params[1], 1.0);
        assert_eq!(ObjectUniforms::new(world, &Material::sphere(), false).params[1], 0.0);
        assert_eq!(ObjectUniforms::new(world, &Material::cube(), true).params[1], 0.0);
    }

    #[test]
    fn test_normal_matrix_for_scaled_ground() {
        let transform = Transform::from_translation(Vec3::new(0.0, -3.0, 0.0))
            .with_scale(Vec3::new(100.0, 1.0, 100.0));
        let uniforms = ObjectUniforms::from_transform(&transform, &Material::ground(), false);
        let normal = Mat4::from_cols_array_2d(&uniforms.world_inv_transpose)
            .transform_vector3(Vec3::Y)
            .normalize();
        assert!((normal - Vec3::Y).length() < 1e-6);
        assert_eq!(uniforms.params[0], 16.0);
    }
}
