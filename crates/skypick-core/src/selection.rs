//! Placement of the single placeable object.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::ray::Ray;
use crate::transform::Transform;

/// Whether the placeable object is in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementState {
    /// Not shown and not pickable.
    #[default]
    Empty,
    /// Shown at its current transform.
    Placed,
}

/// A transition reported by [`Placeable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementEvent {
    /// The object appeared at the given position.
    Placed(Vec3),
    /// The already placed object moved to the given position.
    Moved(Vec3),
    /// The object was removed.
    Removed,
}

/// One reusable object placed on the ground and removed by clicking it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeable {
    state: PlacementState,
    transform: Transform,
    local_bounds: BoundingBox,
}

impl Placeable {
    /// Creates an empty placeable whose local box has the given half-widths.
    #[must_use]
    pub fn new(local_extents: Vec3) -> Self {
        Self {
            state: PlacementState::Empty,
            transform: Transform::identity(),
            local_bounds: BoundingBox::new(Vec3::ZERO, local_extents),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Returns true if the object is in the scene.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.state == PlacementState::Placed
    }

    /// Current transform. Meaningful only while placed.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// World-space box, or `None` while empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.is_placed()
            .then(|| self.local_bounds.transformed(&self.transform))
    }

    /// Handles a secondary click.
    ///
    /// `ground_hit` is the entry coordinate on the ground if the cursor
    /// currently resolves to the ground, `None` otherwise.
    pub fn handle_secondary(&mut self, ground_hit: Option<Vec3>) -> Option<PlacementEvent> {
        let position = ground_hit?;
        self.transform.set_position(position);

        let event = match self.state {
            PlacementState::Empty => PlacementEvent::Placed(position),
            PlacementState::Placed => PlacementEvent::Moved(position),
        };
        self.state = PlacementState::Placed;
        log::debug!("placeable: {event:?}");
        Some(event)
    }

    /// Handles a primary click with the cursor ray of this frame.
    pub fn handle_primary(&mut self, ray: &Ray) -> Option<PlacementEvent> {
        let bounds = self.bounding_box()?;
        if !ray.hit_box(&bounds) {
            return None;
        }

        self.state = PlacementState::Empty;
        log::debug!("placeable: removed from {}", self.position());
        Some(PlacementEvent::Removed)
    }
}

impl Default for Placeable {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_click_on_ground_places() {
        let mut cube = Placeable::default();
        assert_eq!(cube.state(), PlacementState::Empty);
        assert_eq!(cube.bounding_box(), None);

        let event = cube.handle_secondary(Some(Vec3::new(2.0, -3.5, 1.0)));
        assert_eq!(event, Some(PlacementEvent::Placed(Vec3::new(2.0, -3.5, 1.0))));
        assert!(cube.is_placed());
        assert_eq!(cube.position(), Vec3::new(2.0, -3.5, 1.0));
    }

    #[test]
    fn test_secondary_click_elsewhere_does_nothing() {
        let mut cube = Placeable::default();
        assert_eq!(cube.handle_secondary(None), None);
        assert!(!cube.is_placed());
    }

    #[test]
    fn test_second_placement_moves() {
        let mut cube = Placeable::default();
        cube.handle_secondary(Some(Vec3::ZERO));
        let event = cube.handle_secondary(Some(Vec3::new(5.0, -2.5, 5.0)));
        assert_eq!(event, Some(PlacementEvent::Moved(Vec3::new(5.0, -2.5, 5.0))));
        assert_eq!(cube.position(), Vec3::new(5.0, -2.5, 5.0));
    }

    #[test]
    fn test_primary_click_on_cube_removes() {
        let mut cube = Placeable::default();
        cube.handle_secondary(Some(Vec3::new(2.0, -3.5, 1.0)));

        let ray = Ray::new(Vec3::new(2.0, 10.0, 1.0), Vec3::NEG_Y);
        assert_eq!(cube.handle_primary(&ray), Some(PlacementEvent::Removed));
        assert_eq!(cube.state(), PlacementState::Empty);
        assert_eq!(cube.bounding_box(), None);
    }

    #[test]
    fn test_primary_click_missing_cube_keeps_it() {
        let mut cube = Placeable::default();
        cube.handle_secondary(Some(Vec3::new(2.0, -3.5, 1.0)));

        let ray = Ray::new(Vec3::new(20.0, 10.0, 1.0), Vec3::NEG_Y);
        assert_eq!(cube.handle_primary(&ray), None);
        assert!(cube.is_placed());
    }

    #[test]
    fn test_primary_click_while_empty_is_ignored() {
        let mut cube = Placeable::default();
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert_eq!(cube.handle_primary(&ray), None);
    }

    #[test]
    fn test_bounding_box_follows_position() {
        let mut cube = Placeable::new(Vec3::splat(0.5));
        cube.handle_secondary(Some(Vec3::new(1.0, 2.0, 3.0)));
        let bounds = cube.bounding_box().expect("placed");
        assert_eq!(bounds.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.extents, Vec3::splat(0.5));
    }
}
