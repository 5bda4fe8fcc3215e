//! End-to-end scenarios: tap, fall, settle, regrow

use fruit_tree::Tuning;
use fruit_tree::consts::SIM_DT;
use fruit_tree::sim::{
    Fruit, FruitKind, FruitState, LayoutParams, SceneEvent, SceneState, Viewport, layout, tick,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Scene with exactly one fruit sitting at the crown center
fn single_fruit_scene() -> SceneState {
    let tuning = Tuning::default();
    let mut scene = SceneState::new(Viewport::new(800.0, 600.0), 1, tuning.clone(), 2024);
    let center = scene.crown().center;
    scene.fruits = vec![Fruit::new(center, FruitKind::Apple, 0.0, &tuning)];
    scene.events.clear();
    scene
}

#[test]
fn tap_center_fruit_falls_and_settles_on_ground() {
    let mut scene = single_fruit_scene();
    let center = scene.fruits[0].pos;

    assert_eq!(scene.pointer_down(center), Some(0));
    assert_eq!(scene.fruits[0].state, FruitState::Falling);

    assert_eq!(scene.particles.len(), 5);
    for particle in &scene.particles {
        assert_eq!(particle.pos, Vec2::new(center.x, center.y - 10.0));
    }

    // Stay short of the 10 s regrow that the tap just armed
    let mut now = 0.0;
    for _ in 0..500 {
        now += SIM_DT;
        tick(&mut scene, now);
    }

    let fruit = &scene.fruits[0];
    assert!((fruit.pos.y - 440.0).abs() < 1e-3, "rest y = {}", fruit.pos.y);
    assert_eq!(fruit.vel.y, 0.0);
    assert_eq!(fruit.state, FruitState::Falling);

    // Settled: another tick changes nothing
    let before = (fruit.pos, fruit.vel);
    tick(&mut scene, now + SIM_DT);
    assert_eq!((scene.fruits[0].pos, scene.fruits[0].vel), before);
}

#[test]
fn small_viewport_layout_returns_all_fruit_inside_crown() {
    let tuning = Tuning::default();
    let scene = SceneState::new(Viewport::new(400.0, 400.0), 8, tuning.clone(), 77);
    let params = LayoutParams::new(scene.crown(), &tuning);

    for seed in 0..32 {
        let placed = layout::generate(&mut Pcg32::seed_from_u64(seed), &params, 8);
        assert_eq!(placed.len(), 8);
        for p in &placed {
            assert!(p.attempts <= 200);
            assert!(p.pos.distance(params.center) <= params.sampling_radius + 1e-3);
        }
    }

    assert_eq!(scene.fruits.len(), 8);
}

#[test]
fn clearing_the_tree_regrows_after_delay() {
    let mut scene = SceneState::new(Viewport::new(800.0, 600.0), 8, Tuning::default(), 31337);
    scene.events.clear();

    // Tap until nothing is left hanging (overlapping fruit may need a second tap)
    let mut guard = 0;
    while !scene.all_fallen() {
        let target = scene
            .fruits
            .iter()
            .find(|f| f.state == FruitState::Hanging)
            .map(|f| f.pos)
            .unwrap();
        scene.pointer_down(target);
        guard += 1;
        assert!(guard <= 8);
    }

    let due = scene.pending_reset_at().expect("reset armed");
    assert!(
        scene
            .events
            .iter()
            .any(|e| matches!(e, SceneEvent::TreeCleared { .. }))
    );

    // Let the leaves expire (slowest decay is 0.01 per tick) without reaching the deadline
    let mut now = 0.0;
    while now + SIM_DT < due {
        now += SIM_DT;
        tick(&mut scene, now);
    }
    assert!(scene.particles.is_empty());
    assert!(scene.all_fallen());

    tick(&mut scene, due);
    assert_eq!(scene.fruits.len(), 8);
    assert!(scene.fruits.iter().all(|f| f.state == FruitState::Hanging));
    assert!(scene.particles.is_empty());
    assert!(scene.pending_reset_at().is_none());
}

#[test]
fn resize_cancels_pending_regrow() {
    let mut scene = single_fruit_scene();
    let center = scene.fruits[0].pos;
    scene.pointer_down(center);
    assert!(scene.pending_reset_at().is_some());

    scene.resize(Viewport::new(1024.0, 768.0));
    assert!(scene.pending_reset_at().is_none());
    assert_eq!(scene.fruits.len(), 1);
    assert!((scene.ground_level() - 614.4).abs() < 1e-3);
}

#[test]
fn tree_cleared_event_can_cancel_its_regrow() {
    let mut scene = single_fruit_scene();
    let center = scene.fruits[0].pos;
    scene.pointer_down(center);

    let reset = scene
        .events
        .iter()
        .find_map(|e| match e {
            SceneEvent::TreeCleared { reset } => Some(*reset),
            _ => None,
        })
        .expect("tree cleared");
    assert!(scene.cancel_reset(reset));

    // Past the regrow deadline nothing happens
    tick(&mut scene, 20.0);
    assert!(scene.all_fallen());
    assert!(!scene.reset_armed());
}
