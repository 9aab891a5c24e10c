// Host-side tests for the per-frame scene update loop.

use glam::{Vec2, Vec3};
use jukebox_core::*;
use std::time::Duration;

fn make_scene() -> SceneState {
    let camera = Camera::jukebox(16.0 / 9.0);
    let targets = TargetSet::new(vec![
        PickTarget::new(Vec3::new(0.0, 0.0, 0.0), 2.0),
        PickTarget::new(Vec3::new(0.0, -6.0, 0.0), 2.0),
    ]);
    SceneState::new(camera, targets, 42)
}

fn drain_factors(events: &[SceneEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|ev| match ev {
            SceneEvent::Factor { factor } => Some(*factor),
            _ => None,
        })
        .collect()
}

#[test]
fn advance_emits_update_every_frame() {
    let mut scene = make_scene();
    let mut events = Vec::new();
    for _ in 0..10 {
        scene.advance(Duration::from_millis(16), &FrameInput::default(), &mut events);
    }
    let updates = events
        .iter()
        .filter(|ev| matches!(ev, SceneEvent::Update { .. }))
        .count();
    assert_eq!(updates, 10, "every advance should broadcast an update");
}

#[test]
fn flicker_accumulates_deltas_until_first_interval() {
    // Property 1: elapsed time is exactly the sum of deltas until a fire
    // resets it. The first interval is 1.0s, so 19 frames of 50ms stay short.
    let mut scene = make_scene();
    let mut events = Vec::new();
    for _ in 0..19 {
        scene.advance(Duration::from_secs_f32(0.05), &FrameInput::default(), &mut events);
    }
    assert!(
        (scene.flicker.elapsed_sec - 0.95).abs() < 1e-5,
        "accumulator should hold the delta sum, got {}",
        scene.flicker.elapsed_sec
    );
    assert!(drain_factors(&events).is_empty(), "no flicker should fire yet");
    assert_eq!(scene.exposure(), 1.0, "exposure stays neutral before a fire");
}

#[test]
fn flicker_fire_resets_accumulator_and_bounds_outputs() {
    // Property 2: post-fire, exposure is factor^4 with factor in [0.98, 0.99)
    // and the next interval is drawn from [0, 0.3).
    let mut scene = make_scene();
    let mut events = Vec::new();
    // 0.4 * 3 = 1.2s crosses the 1.0s first interval without float edge cases.
    for _ in 0..3 {
        scene.advance(Duration::from_secs_f32(0.4), &FrameInput::default(), &mut events);
    }
    let factors = drain_factors(&events);
    assert!(!factors.is_empty(), "crossing the interval should fire");
    let lo = 0.98_f32.powf(4.0);
    let hi = 0.99_f32.powf(4.0);
    assert!(
        scene.exposure() >= lo && scene.exposure() <= hi,
        "exposure {} outside [{lo}, {hi}]",
        scene.exposure()
    );
    assert!(scene.flicker.elapsed_sec < 0.4 + 1e-5, "fire should reset the accumulator");
    assert!(
        scene.flicker.next_interval_sec >= 0.0 && scene.flicker.next_interval_sec < 0.3,
        "next interval {} outside [0, 0.3)",
        scene.flicker.next_interval_sec
    );
    for f in factors {
        assert!((0.98..0.99).contains(&f), "raw factor {f} outside [0.98, 0.99)");
    }
}

#[test]
fn flicker_sequence_is_deterministic_under_seed() {
    // Property 7: identical seeds and delta sequences produce identical
    // event streams, flicker timing included.
    let mut a = make_scene();
    let mut b = make_scene();
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();
    let input = FrameInput::default();
    for _ in 0..25 {
        a.advance(Duration::from_secs_f32(0.05), &input, &mut events_a);
        b.advance(Duration::from_secs_f32(0.05), &input, &mut events_b);
    }
    assert_eq!(events_a, events_b, "seeded runs must replay identically");
    assert_eq!(a.exposure(), b.exposure());
    assert_eq!(a.flicker.next_interval_sec, b.flicker.next_interval_sec);
}

#[test]
fn bloom_strength_tracks_latest_loudness_sample() {
    // Property 5: bloom strength equals loudness / reference for the most
    // recent sample, with no smoothing between frames.
    let mut scene = make_scene();
    let mut events = Vec::new();
    let loud = FrameInput {
        avg_loudness: 55.0,
        ..Default::default()
    };
    scene.advance(Duration::from_millis(16), &loud, &mut events);
    assert!((scene.bloom_strength - 0.55).abs() < 1e-6);

    let silent = FrameInput::default();
    scene.advance(Duration::from_millis(16), &silent, &mut events);
    assert_eq!(scene.bloom_strength, 0.0, "silence maps straight to zero bloom");
}

#[test]
fn volume_ramps_linearly_then_caps() {
    // Property 6: volume after t seconds equals min(0.5, t / 10).
    let mut scene = make_scene();
    let mut events = Vec::new();
    let input = FrameInput::default();

    scene.advance(Duration::from_secs(2), &input, &mut events);
    assert!((scene.volume - 0.2).abs() < 1e-6, "2s in, volume should be 0.2");

    scene.advance(Duration::from_secs(2), &input, &mut events);
    assert!((scene.volume - 0.4).abs() < 1e-6, "4s in, volume should be 0.4");

    scene.advance(Duration::from_secs(2), &input, &mut events);
    assert!((scene.volume - 0.5).abs() < 1e-6, "past 5s the ceiling holds");

    scene.advance(Duration::from_secs(60), &input, &mut events);
    assert!((scene.volume - 0.5).abs() < 1e-6, "ceiling holds indefinitely");
}

#[test]
fn pointer_over_center_target_hovers_it() {
    let mut scene = make_scene();
    let mut events = Vec::new();
    let over_center = FrameInput {
        pointer_ndc: Some(Vec2::ZERO),
        ..Default::default()
    };
    scene.advance(Duration::from_millis(16), &over_center, &mut events);
    assert_eq!(scene.targets.hovered(), Some(0), "center ray should hit the first target");

    // Pointer far into a corner misses everything and clears the hover.
    let off_target = FrameInput {
        pointer_ndc: Some(Vec2::new(0.95, 0.95)),
        ..Default::default()
    };
    scene.advance(Duration::from_millis(16), &off_target, &mut events);
    assert_eq!(scene.targets.hovered(), None, "missing everything clears the hover");
    assert_eq!(scene.targets.targets()[0].scale, Vec3::ONE, "scale restored on leave");
}

#[test]
fn absent_pointer_leaves_hover_untouched() {
    let mut scene = make_scene();
    let mut events = Vec::new();
    let over_center = FrameInput {
        pointer_ndc: Some(Vec2::ZERO),
        ..Default::default()
    };
    scene.advance(Duration::from_millis(16), &over_center, &mut events);
    assert_eq!(scene.targets.hovered(), Some(0));

    // No pointer sample this frame (e.g. pointer left the window without a
    // final move event): hover state is simply carried over.
    scene.advance(Duration::from_millis(16), &FrameInput::default(), &mut events);
    assert_eq!(scene.targets.hovered(), Some(0));
}
