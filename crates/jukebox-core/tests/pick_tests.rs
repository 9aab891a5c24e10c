// Host-side tests for ray picking and the single-slot hover state.

use glam::Vec3;
use jukebox_core::*;

fn ray_down_z() -> (Vec3, Vec3) {
    (Vec3::new(0.0, 0.0, 15.0), Vec3::new(0.0, 0.0, -1.0))
}

#[test]
fn ray_sphere_hit_and_miss() {
    let (ro, rd) = ray_down_z();
    let t = ray_sphere(ro, rd, Vec3::ZERO, 2.0);
    assert!(t.is_some());
    let t = t.unwrap();
    assert!((t - 13.0).abs() < 1e-4, "front of the sphere is 13 units away, got {t}");

    assert!(ray_sphere(ro, rd, Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
}

#[test]
fn ray_sphere_tangent_grazes() {
    let (ro, rd) = ray_down_z();
    // Sphere offset exactly one radius sideways: the ray grazes the edge.
    let t = ray_sphere(ro, rd, Vec3::new(2.0, 0.0, 0.0), 2.0);
    assert!(t.is_some());
    assert!(t.unwrap() > 0.0);
}

#[test]
fn pick_prefers_nearest_hit() {
    // Two targets stacked along the ray: the one closer to the camera wins.
    let (ro, rd) = ray_down_z();
    let set = TargetSet::new(vec![
        PickTarget::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
        PickTarget::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
    ]);
    assert_eq!(set.pick(ro, rd), Some(1), "nearest hit should win");
}

#[test]
fn pick_skips_non_pickable_targets() {
    let (ro, rd) = ray_down_z();
    let mut near = PickTarget::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
    near.pickable = false;
    let set = TargetSet::new(vec![PickTarget::new(Vec3::ZERO, 1.0), near]);
    assert_eq!(
        set.pick(ro, rd),
        Some(0),
        "non-pickable targets are excluded even when geometrically nearer"
    );
}

#[test]
fn pick_returns_none_when_everything_excluded() {
    let (ro, rd) = ray_down_z();
    let mut only = PickTarget::new(Vec3::ZERO, 1.0);
    only.pickable = false;
    let set = TargetSet::new(vec![only]);
    assert_eq!(set.pick(ro, rd), None);
}

#[test]
fn hover_is_exclusive_and_restores_scale() {
    // Property 4: at most one hovered target, and switching restores the
    // previous target's original scale before boosting the new one.
    let mut set = TargetSet::new(vec![
        PickTarget::new(Vec3::new(-2.0, 0.0, 0.0), 1.0),
        PickTarget::new(Vec3::new(2.0, 0.0, 0.0), 1.0),
    ]);

    set.update_hover(Some(0));
    assert_eq!(set.hovered(), Some(0));
    assert!(set.targets()[0].scale.x > 1.0, "hovered target gets the boost");
    assert_eq!(set.targets()[1].scale, Vec3::ONE);

    // Direct hover move between two targets, no empty frame in between.
    set.update_hover(Some(1));
    assert_eq!(set.hovered(), Some(1));
    assert_eq!(set.targets()[0].scale, Vec3::ONE, "old target restored before switch");
    assert!(set.targets()[1].scale.x > 1.0);

    set.update_hover(None);
    assert_eq!(set.hovered(), None);
    assert_eq!(set.targets()[0].scale, Vec3::ONE);
    assert_eq!(set.targets()[1].scale, Vec3::ONE);
}

#[test]
fn hover_same_target_is_idempotent() {
    let mut set = TargetSet::new(vec![PickTarget::new(Vec3::ZERO, 1.0)]);
    set.update_hover(Some(0));
    let boosted = set.targets()[0].scale;
    // Repeated hits on the same target must not compound the boost.
    set.update_hover(Some(0));
    set.update_hover(Some(0));
    assert_eq!(set.targets()[0].scale, boosted);
    set.update_hover(None);
    assert_eq!(set.targets()[0].scale, Vec3::ONE);
}

#[test]
fn camera_center_ray_points_at_target() {
    let camera = Camera::jukebox(16.0 / 9.0);
    let (ro, rd) = camera.ndc_ray(glam::Vec2::ZERO);
    assert_eq!(ro, camera.eye);
    assert!(rd.z < 0.0, "camera looks down -Z");
    assert!(rd.x.abs() < 1e-5 && rd.y.abs() < 1e-5, "center ray has no lateral drift");
    assert!((rd.length() - 1.0).abs() < 1e-5, "direction is normalized");
}
