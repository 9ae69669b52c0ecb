//! Picking: resolving which scene object lies under the cursor.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, BoundingSphere};
use crate::ray::Ray;

/// Objects that can be reported as picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PickTarget {
    /// Nothing under the cursor.
    #[default]
    None,
    /// The reflective sphere.
    Sphere,
    /// The ground slab.
    Ground,
    /// The placeable cube.
    Cube,
    /// The cylinder standing on the ground.
    Cylinder,
}

impl PickTarget {
    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PickTarget::None => "None",
            PickTarget::Sphere => "Sphere",
            PickTarget::Ground => "Ground",
            PickTarget::Cube => "Cube",
            PickTarget::Cylinder => "Cylinder",
        }
    }
}

impl fmt::Display for PickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The bounding volume a pick candidate is tested with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickVolume {
    /// Sphere test; reports no entry coordinate.
    Sphere(BoundingSphere),
    /// Slab test; reports the entry coordinate.
    Box(BoundingBox),
}

impl PickVolume {
    /// Returns the hit distance and, for boxes, the entry coordinate.
    fn intersect(&self, ray: &Ray) -> Option<(f32, Option<Vec3>)> {
        match self {
            PickVolume::Sphere(sphere) => sphere.intersect(ray).map(|t| (t, None)),
            PickVolume::Box(aabb) => aabb.intersect(ray).map(|t| (t, Some(ray.at(t)))),
        }
    }
}

/// How overlapping candidates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickPolicy {
    /// The first registered candidate that is hit wins. No depth sorting.
    #[default]
    FirstMatch,
    /// Every candidate is tested and the smallest entry distance wins.
    Nearest,
}

/// Result of a pick operation for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PickResult {
    /// The object that was picked.
    pub target: PickTarget,
    /// Whether anything was hit.
    pub hit: bool,
    /// World-space entry coordinate, only for box hits.
    pub coordinate: Option<Vec3>,
}

impl PickResult {
    /// A result with nothing under the cursor.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the entry coordinate if `target` was hit through its box.
    #[must_use]
    pub fn coordinate_on(&self, target: PickTarget) -> Option<Vec3> {
        if self.hit && self.target == target {
            self.coordinate
        } else {
            None
        }
    }
}

/// An ordered set of pick candidates.
#[derive(Debug, Clone, Default)]
pub struct Picker {
    policy: PickPolicy,
    candidates: Vec<(PickTarget, PickVolume)>,
}

impl Picker {
    /// Creates an empty picker.
    #[must_use]
    pub fn new(policy: PickPolicy) -> Self {
        Self {
            policy,
            candidates: Vec::new(),
        }
    }

    /// Returns the resolution policy.
    #[must_use]
    pub fn policy(&self) -> PickPolicy {
        self.policy
    }

    /// Sets the resolution policy.
    pub fn set_policy(&mut self, policy: PickPolicy) {
        self.policy = policy;
    }

    /// Registers a sphere candidate. Registration order is test order.
    pub fn add_sphere(&mut self, target: PickTarget, sphere: BoundingSphere) {
        self.candidates.push((target, PickVolume::Sphere(sphere)));
    }

    /// Registers a box candidate. Registration order is test order.
    pub fn add_box(&mut self, target: PickTarget, aabb: BoundingBox) {
        self.candidates.push((target, PickVolume::Box(aabb)));
    }

    /// Replaces the volume of an already registered target.
    ///
    /// Returns false if the target was never registered.
    pub fn update_volume(&mut self, target: PickTarget, volume: PickVolume) -> bool {
        match self.candidates.iter_mut().find(|(t, _)| *t == target) {
            Some(candidate) => {
                candidate.1 = volume;
                true
            }
            None => false,
        }
    }

    /// Removes every candidate for `target`.
    pub fn remove(&mut self, target: PickTarget) {
        self.candidates.retain(|(t, _)| *t != target);
    }

    /// Number of registered candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Resolves the object under `ray`.
    ///
    /// At most one object is reported.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> PickResult {
        let mut hits = self
            .candidates
            .iter()
            .filter_map(|(target, volume)| {
                volume
                    .intersect(ray)
                    .map(|(t, coordinate)| (*target, t, coordinate))
            });

        let best = match self.policy {
            PickPolicy::FirstMatch => hits.next(),
            PickPolicy::Nearest => hits.min_by(|a, b| a.1.max(0.0).total_cmp(&b.1.max(0.0))),
        };

        match best {
            Some((target, _, coordinate)) => PickResult {
                target,
                hit: true,
                coordinate,
            },
            None => PickResult::none(),
        }
    }
}
