//! Picking and placement through the cube mapping scene.

use proptest::prelude::*;
use skypick::{
    CubeMappingScene, FrameInput, PickPolicy, PickTarget, PlacementState, SceneObject,
    SceneOptions, Vec2, Vec3,
};
use skypick_core::{BoundingBox, BoundingSphere, Ray, Viewport};
use skypick_render::Camera;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn camera() -> Camera {
    Camera::from_options(
        &SceneOptions::default().camera,
        Viewport::from_size(WIDTH, HEIGHT),
    )
}

fn hover(x: f32, y: f32) -> FrameInput {
    FrameInput {
        cursor: Vec2::new(x, y),
        ..Default::default()
    }
}

fn on_ground_surface(point: Vec3) -> bool {
    let eps = 1e-3;
    (point.y + 2.5).abs() < eps
        || (point.y + 3.5).abs() < eps
        || (point.x.abs() - 50.0).abs() < eps
        || (point.z.abs() - 50.0).abs() < eps
}

#[test]
fn test_reference_ray_hits_sphere_and_misses_ground() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    assert!(ray.hit_sphere(&BoundingSphere::new(Vec3::ZERO, 1.0)));
    assert!(!ray.hit_box(&BoundingBox::new(
        Vec3::new(0.0, -3.0, 0.0),
        Vec3::new(50.0, 0.5, 50.0)
    )));
}

#[test]
fn test_place_move_and_remove_cube() {
    let mut scene = CubeMappingScene::default();
    let cam = camera();

    // Hovering the ground shows an entry coordinate.
    let first = *scene.handle_input(&cam, &hover(300.0, 550.0));
    assert_eq!(first.target, PickTarget::Ground);
    let first_coord = first.coordinate.unwrap();

    // Right click there places the cube at that coordinate.
    scene.handle_input(
        &cam,
        &FrameInput {
            secondary_clicked: true,
            ..hover(300.0, 550.0)
        },
    );
    assert_eq!(scene.cube().state(), PlacementState::Placed);
    assert!((scene.cube().position() - first_coord).length() < 1e-5);

    // A second right click elsewhere on the ground moves it.
    scene.handle_input(
        &cam,
        &FrameInput {
            secondary_clicked: true,
            ..hover(600.0, 580.0)
        },
    );
    let moved = scene.cube().position();
    assert!(moved.x > first_coord.x);
    assert_eq!(scene.cube().state(), PlacementState::Placed);

    // Left click away from the cube leaves it alone.
    scene.handle_input(
        &cam,
        &FrameInput {
            primary_clicked: true,
            ..hover(400.0, 100.0)
        },
    );
    assert_eq!(scene.cube().state(), PlacementState::Placed);

    // Left click on it removes it.
    scene.handle_input(
        &cam,
        &FrameInput {
            primary_clicked: true,
            ..hover(600.0, 580.0)
        },
    );
    assert_eq!(scene.cube().state(), PlacementState::Empty);
    assert!(!scene.visible_objects().contains(&SceneObject::Cube));
}

#[test]
fn test_looking_at_sky_picks_nothing() {
    let mut scene = CubeMappingScene::default();
    let pick = *scene.handle_input(&camera(), &hover(400.0, 0.0));
    assert_eq!(pick.target, PickTarget::None);
    assert!(!pick.hit);
    assert_eq!(pick.coordinate, None);
}

#[test]
fn test_policy_decides_between_ground_and_cylinder() {
    // Aim at the cylinder standing in front of the ground behind it.
    let input = hover(400.0, 403.0);
    let cam = camera();

    let mut first_match = CubeMappingScene::default();
    assert_eq!(first_match.handle_input(&cam, &input).target, PickTarget::Ground);

    let options = SceneOptions::from_json(r#"{ "pick_policy": "Nearest" }"#).unwrap();
    let mut nearest = CubeMappingScene::new(options);
    assert_eq!(nearest.handle_input(&cam, &input).target, PickTarget::Cylinder);

    first_match.set_pick_policy(PickPolicy::Nearest);
    assert_eq!(first_match.handle_input(&cam, &input).target, PickTarget::Cylinder);
}

#[test]
fn test_clicks_without_ground_hit_do_not_place() {
    let mut scene = CubeMappingScene::default();
    scene.handle_input(
        &camera(),
        &FrameInput {
            secondary_clicked: true,
            ..hover(400.0, 0.0)
        },
    );
    assert_eq!(scene.cube().state(), PlacementState::Empty);
}

proptest! {
    #[test]
    fn prop_ground_coordinate_lies_on_ground_box(
        x in -100.0_f32..900.0,
        y in -100.0_f32..700.0,
    ) {
        let mut scene = CubeMappingScene::default();
        let pick = *scene.handle_input(&camera(), &hover(x, y));
        if pick.target == PickTarget::Ground {
            let coordinate = pick.coordinate.unwrap();
            prop_assert!(on_ground_surface(coordinate), "{coordinate:?}");
        } else if matches!(pick.target, PickTarget::Sphere | PickTarget::None) {
            prop_assert_eq!(pick.coordinate, None);
        }
    }
}
