//! Integration тесты стрельбы: fire rate, assist, попадания, бонусы

mod support;

use bevy::prelude::*;
use pointblank_simulation::*;
use support::*;

#[test]
fn test_point_hand_fires_at_fire_rate() {
    let mut app = scripted_app();
    send_hands(&mut app, vec![point_at(Vec2::new(0.1, 0.9))]);

    let mut shot_times = Vec::new();
    for _ in 0..120 {
        step(&mut app);
        let shots = drain::<ShotFired>(&mut app);
        assert!(shots.len() <= 1, "одна рука: максимум один выстрел за tick");
        if !shots.is_empty() {
            shot_times.push(app.world().resource::<SimulationClock>().elapsed_ms);
        }
    }

    assert!(shot_times.len() >= 10, "shots: {:?}", shot_times);
    for pair in shot_times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap > 150.0, "gap {} ms", gap);
        assert!(gap < 150.0 + 2.0 * 1000.0 / 60.0, "gap {} ms", gap);
    }
}

#[test]
fn test_assist_snaps_aim_and_shot_hits() {
    let mut app = scripted_app();
    let target_screen = Vec2::new(0.52, 0.51);
    let target = place_on_screen(&mut app, EntityKind::Striker, target_screen, 35.0);

    // Spawn tick: Spawning → Active
    step(&mut app);

    send_hands(&mut app, vec![point_at(Vec2::new(0.5, 0.5))]);
    step(&mut app);

    let slot = app.world().resource::<GestureSlots>().slots[0];
    assert_eq!(slot.gesture, Gesture::Point);
    assert!(slot.aim.unwrap().distance(target_screen) < 1e-3, "aim = {:?}", slot.aim);
    assert!(slot.raw_aim.unwrap().distance(Vec2::new(0.5, 0.5)) < 1e-5);

    let hits = drain::<TargetHit>(&mut app);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, target);
    assert_eq!(hits[0].points, 100);
    assert_eq!(ledger(&app).score, 100);

    let released = drain::<EntityReleased>(&mut app);
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].cause, RetireCause::Destroyed);
    assert_eq!(live_count(&mut app), 0);
}

#[test]
fn test_assist_ignores_fist() {
    let mut app = scripted_app();
    let target_screen = Vec2::new(0.55, 0.62);
    place_on_screen(&mut app, EntityKind::Striker, target_screen, 35.0);
    step(&mut app);

    send_hands(&mut app, vec![fist(), point_at(Vec2::new(0.6, 0.6))]);
    step(&mut app);

    let slots = app.world().resource::<GestureSlots>().clone();
    let held = slots.slots[0];
    assert_eq!(held.gesture, Gesture::Fist);
    assert_eq!(held.aim, held.raw_aim);
    assert!(held.aim.unwrap().distance(target_screen) > 0.01);

    // Point рядом с тем же entity притягивается
    let pointing = slots.slots[1];
    assert_eq!(pointing.gesture, Gesture::Point);
    assert!(pointing.aim.unwrap().distance(target_screen) < 1e-3);
}

#[test]
fn test_shot_without_target_only_spends_budget() {
    let mut app = scripted_app();
    place_on_screen(&mut app, EntityKind::Striker, Vec2::new(0.9, 0.9), 35.0);
    step(&mut app);

    send_hands(&mut app, vec![point_at(Vec2::new(0.1, 0.1))]);
    step(&mut app);

    assert_eq!(drain::<ShotFired>(&mut app).len(), 1);
    assert!(drain::<TargetHit>(&mut app).is_empty());
    assert_eq!(ledger(&app).score, 0);
    assert_eq!(live_count(&mut app), 1);
}

#[test]
fn test_both_hands_hit_different_targets_same_tick() {
    let mut app = scripted_app();
    place_on_screen(&mut app, EntityKind::Striker, Vec2::new(0.3, 0.5), 30.0);
    place_on_screen(&mut app, EntityKind::BossStriker, Vec2::new(0.7, 0.5), 30.0);
    step(&mut app);

    send_hands(
        &mut app,
        vec![point_at(Vec2::new(0.3, 0.5)), point_at(Vec2::new(0.7, 0.5))],
    );
    step(&mut app);

    let hits = drain::<TargetHit>(&mut app);
    assert_eq!(hits.len(), 2);
    assert_eq!(ledger(&app).score, 400);
}

#[test]
fn test_target_scored_once_when_both_hands_aim_at_it() {
    let mut app = scripted_app();
    place_on_screen(&mut app, EntityKind::Striker, Vec2::new(0.5, 0.5), 30.0);
    step(&mut app);

    let aim = Vec2::new(0.5, 0.5);
    send_hands(&mut app, vec![point_at(aim), point_at(aim)]);
    step(&mut app);

    assert_eq!(drain::<ShotFired>(&mut app).len(), 2);
    assert_eq!(drain::<TargetHit>(&mut app).len(), 1);
    assert_eq!(ledger(&app).score, 100);
}

#[test]
fn test_bonus_pickups_clamped() {
    let mut app = scripted_app();
    app.world_mut().resource_mut::<GameLedger>().bombs = 2;
    place_on_screen(&mut app, EntityKind::BonusAmmo, Vec2::new(0.3, 0.5), 30.0);
    place_on_screen(&mut app, EntityKind::BonusLife, Vec2::new(0.7, 0.5), 30.0);
    step(&mut app);

    send_hands(
        &mut app,
        vec![point_at(Vec2::new(0.3, 0.5)), point_at(Vec2::new(0.7, 0.5))],
    );
    step(&mut app);

    let pickups = drain::<BonusCollected>(&mut app);
    assert_eq!(pickups.len(), 2);
    assert!(drain::<TargetHit>(&mut app).is_empty());

    let ledger = ledger(&app);
    assert_eq!(ledger.bombs, 3);
    assert_eq!(ledger.lives, 5);
    assert_eq!(ledger.score, 0);

    let released = drain::<EntityReleased>(&mut app);
    assert!(released.iter().all(|event| event.cause == RetireCause::Collected));
}

#[test]
fn test_open_hand_never_fires() {
    let mut app = scripted_app();
    send_hands(&mut app, vec![open_hand(), fist()]);
    run_ticks(&mut app, 30);

    assert!(drain::<ShotFired>(&mut app).is_empty());
}

#[test]
fn test_without_camera_shots_never_hit() {
    let mut app = scripted_app();
    let target_screen = Vec2::new(0.5, 0.5);
    place_on_screen(&mut app, EntityKind::Striker, target_screen, 30.0);
    app.world_mut().remove_resource::<ViewCamera>();
    step(&mut app);

    send_hands(&mut app, vec![point_at(target_screen)]);
    step(&mut app);

    assert_eq!(drain::<ShotFired>(&mut app).len(), 1);
    assert!(drain::<TargetHit>(&mut app).is_empty());
    assert_eq!(live_count(&mut app), 1);
}
