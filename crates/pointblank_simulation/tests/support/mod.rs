//! Общие fixtures для integration тестов
//!
//! App без случайного spawn, tick = прямой прогон FixedUpdate,
//! синтетические позы рук в формате pose estimator.

#![allow(dead_code)]

use bevy::ecs::event::Events;
use bevy::prelude::*;
use pointblank_simulation::gesture::DetectionCadence;
use pointblank_simulation::lifecycle::spawn_airborne;
use pointblank_simulation::*;

pub const SEED: u64 = 7;

/// Headless app с GameConfig::scripted() и запущенной сессией
pub fn scripted_app() -> App {
    app_with_config(GameConfig::scripted(), SEED)
}

pub fn app_with_config(config: GameConfig, seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);
    start_session(app.world_mut());
    app
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step(app);
    }
}

/// Забирает все накопленные события типа `E`
pub fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// `ticks` tick'ов подряд, события `E` забираются после каждого
/// (буферы живут два tick'а)
pub fn collect_ticks<E: Event>(app: &mut App, ticks: usize) -> Vec<E> {
    let mut collected = Vec::new();
    for _ in 0..ticks {
        step(app);
        collected.extend(drain::<E>(app));
    }
    collected
}

pub fn ledger(app: &App) -> GameLedger {
    *app.world().resource::<GameLedger>()
}

pub fn camera(app: &App) -> ViewCamera {
    *app.world().resource::<ViewCamera>()
}

pub fn place(app: &mut App, kind: EntityKind, position: Vec3) -> Entity {
    spawn_airborne(
        app.world_mut(),
        Airborne::new(kind, 0.0),
        Transform::from_translation(position),
    )
}

/// Entity на луче камеры через `screen` на глубине `distance`
pub fn place_on_screen(app: &mut App, kind: EntityKind, screen: Vec2, distance: f32) -> Entity {
    let position = camera(app)
        .point_along(screen, distance)
        .expect("camera ray through screen point");
    place(app, kind, position)
}

pub fn live_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Airborne>();
    query.iter(world).filter(|airborne| airborne.is_live()).count()
}

/// Отправляет ответ pose estimator (текущая сессия, свежий sequence)
pub fn send_hands(app: &mut App, hands: Vec<Vec<Vec3>>) {
    let session = app.world().resource::<SessionState>().generation;
    let sequence = app
        .world()
        .resource::<DetectionCadence>()
        .last_applied_sequence
        .map_or(0, |applied| applied + 1);
    app.world_mut()
        .send_event(PoseDetectionResult::new(session, sequence, hands));
}

/// Рука: wrist снизу, пальцы вверх. `extended` = (index, middle, ring, pinky)
pub fn hand(extended: [bool; 4]) -> Vec<Vec3> {
    let mut points = vec![Vec3::new(0.5, 0.9, 0.0); 21];

    for thumb in 1..=4 {
        points[thumb] = Vec3::new(0.42 - thumb as f32 * 0.02, 0.86, 0.0);
    }

    for finger in 0..4 {
        let x = 0.44 + finger as f32 * 0.05;
        let base = 5 + finger * 4;
        let joints = if extended[finger] {
            [0.6, 0.5, 0.4]
        } else {
            [0.66, 0.72, 0.82]
        };

        points[base] = Vec3::new(x, 0.7, 0.0);
        for (offset, y) in joints.into_iter().enumerate() {
            points[base + 1 + offset] = Vec3::new(x, y, 0.0);
        }
    }

    points
}

/// Point-поза с aim (после mirror) ровно в `aim`
pub fn point_at(aim: Vec2) -> Vec<Vec3> {
    let mut points = hand([true, false, false, false]);
    let target = Vec2::new(1.0 - aim.x, aim.y);
    let delta = (target - points[8].truncate()).extend(0.0);
    for point in points.iter_mut() {
        *point += delta;
    }
    points
}

pub fn fist() -> Vec<Vec3> {
    hand([false; 4])
}

pub fn open_hand() -> Vec<Vec3> {
    hand([true; 4])
}
