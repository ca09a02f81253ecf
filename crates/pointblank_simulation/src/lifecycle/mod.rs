//! Entity lifecycle: spawn, полёт к игроку, intrusion, release
//!
//! ECS ответственность:
//! - Живое множество entities (Airborne component), лимит MAX_ENTITIES
//! - Steering + wobble, intrusion → штраф в GameLedger
//!
//! Renderer ответственность:
//! - Визуалы по EntitySpawned / EntityMoved / EntityReleased
//!
//! Порядок внутри tick:
//! 1. spawn_entities: случайный spawn (Commands, применяется к Cleanup)
//! 2. steer_entities: движение, анимация, intrusion
//! 3. release_retired: despawn Retired + EntityReleased (Cleanup)
//! 4. activate_spawned: Spawning → Active (Cleanup)

use bevy::prelude::*;
use rand::Rng;

pub mod airborne;
pub mod flight;
pub mod kind;

pub use airborne::{
    Airborne, EntityMoved, EntityReleased, EntitySpawned, Lifecycle, RetireCause, VisualAnimation,
};
pub use flight::{animation, face_origin, has_intruded, roll_airborne, spawn_transform, steer};
pub use kind::{EntityKind, KindProfile};

use crate::config::GameConfig;
use crate::ledger::{GameLedger, GameOver, Intrusion};
use crate::logger;
use crate::session::SimulationClock;
use crate::{DeterministicRng, SimulationSet};

/// Lifecycle Plugin
///
/// Spawn + steering в `SimulationSet::Lifecycle`, release + activation в
/// `SimulationSet::Cleanup` (после sync point, поэтому новые entities уже видны).
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EntitySpawned>()
            .add_event::<EntityMoved>()
            .add_event::<EntityReleased>();

        app.add_systems(
            FixedUpdate,
            (spawn_entities, steer_entities)
                .chain()
                .in_set(SimulationSet::Lifecycle),
        );
        app.add_systems(
            FixedUpdate,
            (release_retired, activate_spawned)
                .chain()
                .in_set(SimulationSet::Cleanup),
        );
    }
}

/// Spawn напрямую в World (старт сессии, тесты, scripted прогоны)
///
/// Entity стартует в `Spawning` и становится `Active` в конце ближайшего tick.
pub fn spawn_airborne(world: &mut World, airborne: Airborne, transform: Transform) -> Entity {
    let transform = face_origin(transform);
    let entity = world.spawn((airborne, transform)).id();
    world.send_event(EntitySpawned {
        entity,
        kind: airborne.kind,
        transform,
    });

    logger::log(&format!(
        "Spawned {:?} {:?} at {:?}",
        airborne.kind, entity, transform.translation
    ));
    entity
}

/// Spawn случайного entity через DeterministicRng
pub fn spawn_random(world: &mut World) -> Entity {
    let (airborne, transform) = {
        let mut rng = world.get_resource_or_insert_with(|| DeterministicRng::new(42));
        roll_airborne(&mut rng.rng)
    };
    spawn_airborne(world, airborne, transform)
}

/// Синхронный teardown: despawn всех Airborne (EntityReleased с cause Teardown)
///
/// Entities, уже Retired по другой причине, отпускаются со своей причиной.
pub fn release_all(world: &mut World) -> usize {
    let mut query = world.query::<(Entity, &Airborne)>();
    let released: Vec<(Entity, Airborne)> = query
        .iter(world)
        .map(|(entity, airborne)| (entity, *airborne))
        .collect();

    for (entity, mut airborne) in released.iter().copied() {
        airborne.retire(RetireCause::Teardown);
        world.despawn(entity);
        world.send_event(EntityReleased {
            entity,
            kind: airborne.kind,
            cause: airborne.cause.unwrap_or(RetireCause::Teardown),
        });
    }

    released.len()
}

/// Система: случайный spawn, пока живых меньше лимита
pub fn spawn_entities(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<DeterministicRng>,
    population: Query<&Airborne>,
    mut spawned: EventWriter<EntitySpawned>,
) {
    let live = population.iter().filter(|airborne| airborne.is_live()).count();
    if live >= config.max_entities {
        return;
    }
    if rng.rng.gen::<f32>() >= config.spawn_chance {
        return;
    }

    let (airborne, transform) = roll_airborne(&mut rng.rng);
    let entity = commands.spawn((airborne, transform)).id();
    spawned.write(EntitySpawned {
        entity,
        kind: airborne.kind,
        transform,
    });

    logger::log(&format!(
        "Spawned {:?} {:?} ({} live)",
        airborne.kind,
        entity,
        live + 1
    ));
}

/// Система: движение к origin + intrusion
///
/// Двигаются только Active entities. Intrusion у страйкера снимает жизни по
/// профилю kind'а; бонус просто исчезает.
pub fn steer_entities(
    clock: Res<SimulationClock>,
    config: Res<GameConfig>,
    mut ledger: ResMut<GameLedger>,
    mut flyers: Query<(Entity, &mut Airborne, &mut Transform)>,
    mut moved: EventWriter<EntityMoved>,
    mut intrusions: EventWriter<Intrusion>,
    mut game_over: EventWriter<GameOver>,
) {
    let t_secs = clock.elapsed_secs();

    for (entity, mut airborne, mut transform) in flyers.iter_mut() {
        if !airborne.is_active() {
            continue;
        }

        let profile = airborne.kind.profile();
        let position = steer(
            transform.translation,
            airborne.seed,
            t_secs,
            config.flight_speed * profile.speed_modifier,
        );
        *transform = face_origin(transform.with_translation(position));
        airborne.age_ticks += 1;

        if !has_intruded(position) {
            moved.write(EntityMoved {
                entity,
                transform: *transform,
                animation: animation(&airborne, t_secs),
            });
            continue;
        }

        airborne.retire(RetireCause::Intrusion);
        if airborne.kind.is_bonus() {
            logger::log(&format!("{:?} {:?} slipped past", airborne.kind, entity));
            continue;
        }
        // Игра закончилась раньше в этом же tick
        if ledger.game_over {
            continue;
        }

        let ended = ledger.apply_penalty(profile.penalty);
        intrusions.write(Intrusion {
            entity,
            kind: airborne.kind,
            penalty: profile.penalty,
            lives_left: ledger.lives,
        });
        logger::log_info(&format!(
            "{:?} {:?} intruded: -{} lives ({} left)",
            airborne.kind, entity, profile.penalty, ledger.lives
        ));

        if ended {
            game_over.write(GameOver {
                score: ledger.score,
            });
            logger::log_info(&format!("GAME OVER, final score {}", ledger.score));
        }
    }
}

/// Система: despawn Retired entities (EntityReleased ровно один раз)
pub fn release_retired(
    mut commands: Commands,
    retired: Query<(Entity, &Airborne)>,
    mut released: EventWriter<EntityReleased>,
) {
    for (entity, airborne) in retired.iter() {
        if airborne.is_live() {
            continue;
        }

        let cause = airborne.cause.unwrap_or(RetireCause::Teardown);
        commands.entity(entity).despawn();
        released.write(EntityReleased {
            entity,
            kind: airborne.kind,
            cause,
        });
        logger::log(&format!("Released {:?} {:?} ({:?})", airborne.kind, entity, cause));
    }
}

/// Система: Spawning → Active в конце tick
pub fn activate_spawned(mut flyers: Query<&mut Airborne>) {
    for mut airborne in flyers.iter_mut() {
        if airborne.phase == Lifecycle::Spawning {
            airborne.activate();
        }
    }
}
