//! End-to-end run of the intersection: jam, resolve, clear

use four_way_deadlock::sim::{
    CommandOutcome, DEADLOCK_PAIRS, Phase, Scene, SceneAssets, SceneEvent, apply_command, tick,
};
use four_way_deadlock::{AlphaMaskCache, CollisionStrategy, Settings};

fn run_until_phase_change(scene: &mut Scene, strategy: &CollisionStrategy, cache: &AlphaMaskCache) -> u64 {
    let start = scene.phase;
    let mut frames = 0;
    while scene.phase == start && frames < 5_000 {
        tick(scene, strategy, cache).unwrap();
        frames += 1;
    }
    frames
}

#[test]
fn test_deadlock_resolve_clear() {
    let settings = Settings::default();
    let cache = AlphaMaskCache::new();
    let assets = SceneAssets::placeholder(settings.placeholder_size).unwrap();
    let mut scene = Scene::new(assets);

    run_until_phase_change(&mut scene, &settings.collision, &cache);
    assert_eq!(scene.phase, Phase::Deadlocked);
    let events = scene.drain_events();
    assert!(matches!(
        events.as_slice(),
        [SceneEvent::Deadlock { a, b }] if DEADLOCK_PAIRS.contains(&(*a, *b))
    ));
    // Only the two lead vehicles' textures needed masks
    assert_eq!(cache.len(), 2);

    assert_eq!(apply_command(&mut scene, "RESOLVE"), CommandOutcome::Resolved);
    run_until_phase_change(&mut scene, &settings.collision, &cache);
    assert_eq!(scene.phase, Phase::Cleared);
    assert_eq!(
        scene.drain_events(),
        vec![SceneEvent::Resolved, SceneEvent::LightsSwitched, SceneEvent::Cleared]
    );

    // Cleared is terminal
    let frame = scene.frame;
    tick(&mut scene, &settings.collision, &cache).unwrap();
    assert_eq!(scene.frame, frame);
    assert_eq!(apply_command(&mut scene, "resolve"), CommandOutcome::Ignored);
}

#[test]
fn test_repeated_wrong_commands_keep_jamming() {
    let cache = AlphaMaskCache::new();
    let strategy = CollisionStrategy::BoundingBox;
    let mut scene = Scene::new(SceneAssets::placeholder((40, 30)).unwrap());

    for attempt in ["stop", "", "resolve please"] {
        run_until_phase_change(&mut scene, &strategy, &cache);
        assert_eq!(scene.phase, Phase::Deadlocked);
        assert_eq!(apply_command(&mut scene, attempt), CommandOutcome::WrongCommand);
        assert_eq!(scene.phase, Phase::Running);
    }
}
