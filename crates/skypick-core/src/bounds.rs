//! Bounding volumes and their ray tests.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::transform::Transform;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns the parametric distance at which the ray first meets the sphere.
    ///
    /// Solves `|o + t*d - c|^2 = r^2` through its discriminant. A ray starting
    /// inside (or on) the sphere reports distance 0. A sphere entirely behind
    /// the origin is a miss.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let m = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = m.dot(ray.direction);
        let c = m.dot(m) - self.radius * self.radius;

        if c <= 0.0 {
            return Some(0.0);
        }

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Origin is outside, so both roots share a sign.
        let t = (-b - discriminant.sqrt()) / a;
        (t >= 0.0).then_some(t)
    }

    /// Returns true if the point lies inside or on the sphere.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}

/// An axis-aligned box given by center and per-axis half-widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Center in world space.
    pub center: Vec3,
    /// Half-widths along x, y and z.
    pub extents: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[must_use]
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents }
    }

    /// Creates a box from its two corners.
    #[must_use]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            extents: (max - min).abs() * 0.5,
        }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Returns true if the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.cmple(self.extents).all()
    }

    /// Returns the axis-aligned box enclosing this box after `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        let rotation = Mat3::from_quat(transform.rotation);
        let abs_rotation = Mat3::from_cols(
            rotation.x_axis.abs(),
            rotation.y_axis.abs(),
            rotation.z_axis.abs(),
        );
        let scaled_extents = self.extents * transform.scale.abs();
        Self {
            center: transform.to_matrix().transform_point3(self.center),
            extents: abs_rotation * scaled_extents,
        }
    }

    /// Computes the slab interval `[t_min, t_max]` testing axes in `order`.
    ///
    /// Each axis contributes the two distances to its min/max planes; the
    /// running interval keeps the larger of the near distances and the smaller
    /// of the far ones. A zero direction component produces infinities, which
    /// the min/max folding handles without special cases. A `0/0` NaN (origin
    /// exactly on a face plane of a parallel slab) is dropped by
    /// `f32::min`/`max`, so the other plane's infinity gives that axis an
    /// empty interval and a ray running along a face misses in every order.
    #[must_use]
    pub fn slab_interval_in_order(&self, ray: &Ray, order: [usize; 3]) -> Option<(f32, f32)> {
        let min = self.min();
        let max = self.max();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in order {
            let t1 = (min[axis] - ray.origin[axis]) / ray.direction[axis];
            let t2 = (max[axis] - ray.origin[axis]) / ray.direction[axis];
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        (t_min <= t_max).then_some((t_min, t_max))
    }

    /// Slab interval with the x, y, z test order.
    #[must_use]
    pub fn slab_interval(&self, ray: &Ray) -> Option<(f32, f32)> {
        self.slab_interval_in_order(ray, [0, 1, 2])
    }

    /// Returns the entry distance of the ray, or `None` if it misses.
    ///
    /// The distance is negative when the origin is inside the box. A box lying
    /// entirely behind the origin is a miss.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.slab_interval(ray)
            .and_then(|(t_min, t_max)| (t_max >= 0.0).then_some(t_min))
    }

    /// Returns `origin + t_min * direction` if the ray hits the box.
    #[must_use]
    pub fn entry_point(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect(ray).map(|t_min| ray.at(t_min))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use proptest::prelude::*;

    use super::*;

    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    fn ground() -> BoundingBox {
        BoundingBox::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(50.0, 0.5, 50.0))
    }

    #[test]
    fn test_ray_hits_unit_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        assert!(ray.hit_sphere(&sphere));
        assert_eq!(sphere.intersect(&ray), Some(4.0));
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!ray.hit_sphere(&BoundingSphere::default()));
    }

    #[test]
    fn test_sphere_offset_misses() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::Z);
        assert!(!ray.hit_sphere(&BoundingSphere::default()));
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(BoundingSphere::default().intersect(&ray), Some(2.0));
    }

    #[test]
    fn test_origin_inside_sphere_hits_at_zero() {
        let ray = Ray::new(Vec3::new(0.2, 0.0, 0.0), Vec3::X);
        assert_eq!(BoundingSphere::default().intersect(&ray), Some(0.0));
    }

    #[test]
    fn test_parallel_ray_outside_ground_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(!ray.hit_box(&ground()));
        assert!(ground().slab_interval(&ray).is_none());
    }

    #[test]
    fn test_ray_down_onto_ground_enters_top_face() {
        let ray = Ray::new(Vec3::new(2.0, 5.0, 1.0), Vec3::NEG_Y);
        let entry = ground().entry_point(&ray).expect("should hit");
        assert!((entry - Vec3::new(2.0, -2.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_behind_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ground().slab_interval(&ray).is_some());
        assert!(!ray.hit_box(&ground()));
    }

    #[test]
    fn test_origin_inside_box_reports_back_projected_entry() {
        let aabb = BoundingBox::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = aabb.intersect(&ray).expect("inside counts as hit");
        assert_eq!(t, -1.0);
        assert_eq!(aabb.entry_point(&ray), Some(Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_axis_parallel_rays_rely_on_infinities() {
        let aabb = BoundingBox::default();
        let inside_slab = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
        assert_eq!(aabb.intersect(&inside_slab), Some(4.0));

        let outside_slab = Ray::new(Vec3::new(-5.0, 1.5, 0.0), Vec3::X);
        assert!(!outside_slab.hit_box(&aabb));
    }

    #[test]
    fn test_ray_along_face_plane_misses_in_every_order() {
        let aabb = BoundingBox::default();
        let on_top_face = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        let on_bottom_face = Ray::new(Vec3::new(-5.0, -1.0, 0.0), Vec3::X);
        for order in PERMUTATIONS {
            assert_eq!(aabb.slab_interval_in_order(&on_top_face, order), None);
            assert_eq!(aabb.slab_interval_in_order(&on_bottom_face, order), None);
        }
        assert!(aabb.entry_point(&on_top_face).is_none());

        let just_inside = Ray::new(Vec3::new(-5.0, 0.999, 0.0), Vec3::X);
        assert_eq!(aabb.intersect(&just_inside), Some(4.0));
    }

    #[test]
    fn test_min_max_roundtrip() {
        let aabb = BoundingBox::from_min_max(Vec3::new(-1.0, 2.0, 3.0), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(aabb.center, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(aabb.extents, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(aabb.min(), Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(aabb.max(), Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_transformed_box_scales_and_translates() {
        let local = BoundingBox::new(Vec3::ZERO, Vec3::splat(0.5));
        let transform = Transform::from_translation(Vec3::new(0.0, -3.0, 0.0))
            .with_scale(Vec3::new(100.0, 1.0, 100.0));
        let world = local.transformed(&transform);
        assert_eq!(world, ground());
    }

    #[test]
    fn test_transformed_box_rotation_grows_extents() {
        let local = BoundingBox::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let mut transform = Transform::identity();
        transform.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let world = local.transformed(&transform);
        let expected = std::f32::consts::SQRT_2;
        assert!((world.extents.x - expected).abs() < 1e-5);
        assert!((world.extents.y - 1.0).abs() < 1e-5);
        assert!((world.extents.z - expected).abs() < 1e-5);
    }

    fn component() -> impl Strategy<Value = f32> {
        prop_oneof![Just(0.0_f32), -10.0_f32..10.0_f32]
    }

    fn vec3() -> impl Strategy<Value = Vec3> {
        (component(), component(), component()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn nonzero_vec3() -> impl Strategy<Value = Vec3> {
        vec3().prop_filter("direction must be non-zero", |v| v.length_squared() > 1e-6)
    }

    proptest! {
        #[test]
        fn prop_slab_order_does_not_change_hit(
            origin in vec3(),
            direction in nonzero_vec3(),
            center in vec3(),
            extents in (0.1_f32..5.0, 0.1_f32..5.0, 0.1_f32..5.0),
        ) {
            let aabb = BoundingBox::new(center, Vec3::new(extents.0, extents.1, extents.2));
            let ray = Ray::new(origin, direction);
            let reference = aabb.slab_interval(&ray);
            for order in PERMUTATIONS {
                prop_assert_eq!(aabb.slab_interval_in_order(&ray, order), reference);
            }
        }

        #[test]
        fn prop_entry_point_lies_on_boundary(
            target in (-0.9_f32..0.9, -0.9_f32..0.9, -0.9_f32..0.9),
            from in (-1.0_f32..1.0, -1.0_f32..1.0, -1.0_f32..1.0),
            distance in 3.0_f32..50.0,
        ) {
            let aabb = BoundingBox::new(Vec3::new(1.0, -2.0, 0.5), Vec3::new(2.0, 0.5, 3.0));
            let offset = Vec3::new(from.0, from.1, from.2);
            prop_assume!(offset.length_squared() > 0.01);

            // Aim from outside the box at a point strictly inside it.
            let aim = aabb.center + aabb.extents * Vec3::new(target.0, target.1, target.2);
            let origin = aabb.center + offset.normalize() * (aabb.extents.length() + distance);
            let ray = Ray::new(origin, aim - origin);

            let entry = aabb.entry_point(&ray);
            prop_assert!(entry.is_some());
            let entry = entry.unwrap_or_default();
            let (min, max) = (aabb.min(), aabb.max());
            let tolerance = 1e-3;
            let on_face = (0..3).any(|axis| {
                (entry[axis] - min[axis]).abs() < tolerance
                    || (entry[axis] - max[axis]).abs() < tolerance
            });
            prop_assert!(on_face, "entry {entry:?} is not on a face of {aabb:?}");
            let grown = BoundingBox::new(aabb.center, aabb.extents + Vec3::splat(tolerance));
            prop_assert!(grown.contains(entry));
        }

        #[test]
        fn prop_sphere_hit_iff_min_root_non_negative(
            origin in (-10.0_f32..10.0, -10.0_f32..10.0, -10.0_f32..10.0),
            direction in nonzero_vec3(),
            radius in 0.1_f32..4.0,
        ) {
            let sphere = BoundingSphere::new(Vec3::ZERO, radius);
            let origin = Vec3::new(origin.0, origin.1, origin.2);
            prop_assume!(origin.length() > radius * 1.01);

            let ray = Ray::new(origin, direction);
            let a = direction.dot(direction);
            let b = 2.0 * origin.dot(direction);
            let c = origin.dot(origin) - radius * radius;
            let discriminant = b * b - 4.0 * a * c;
            // Skip rays that are numerically tangent.
            prop_assume!(discriminant.abs() > 1e-3);

            let expected = discriminant > 0.0 && (-b - discriminant.sqrt()) / (2.0 * a) >= 0.0;
            prop_assert_eq!(ray.hit_sphere(&sphere), expected);
        }
    }
}
