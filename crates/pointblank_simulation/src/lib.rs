//! PointBlank Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: gesture-driven аркадный тир.
//!
//! ECS = game state, правила, жизненный цикл entities.
//! Снаружи (collaborators): video + pose model, renderer, audio, HUD layout.
//! Связь только через events (ECS → renderer) и ресурсы (HudSnapshot).

use bevy::ecs::event::Events;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod charge;
pub mod combat;
pub mod config;
pub mod gesture;
pub mod ledger;
pub mod lifecycle;
pub mod logger;
pub mod session;
pub mod targeting;

// Re-export основных типов
pub use charge::{BombDetonated, ChargeOutcome, ChargePhase, ChargePlugin, ChargeState, ChargeTick};
pub use combat::{BonusCollected, CombatPlugin, ShotFired, TargetHit, TriggerClock};
pub use config::GameConfig;
pub use gesture::{
    classify_hand, Gesture, GesturePlugin, GestureSlots, HandObservation, HandSlot, LandmarkError,
    PoseDetectionRequest, PoseDetectionResult,
};
pub use ledger::{GameLedger, GameOver, HudSnapshot, Intrusion, LedgerPlugin};
pub use lifecycle::{
    Airborne, EntityKind, EntityMoved, EntityReleased, EntitySpawned, Lifecycle, LifecyclePlugin,
    RetireCause, VisualAnimation,
};
pub use logger::init_logger;
pub use session::{end_session, start_session, SessionState, SimulationClock};
pub use targeting::{TargetingPlugin, ViewCamera, ViewportResized};

/// Порядок фаз внутри одного tick (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// SimulationClock += fixed timestep
    Clock,
    /// Detection cadence, pose results + assist, viewport
    Input,
    /// Charge weapon, потом стрельба
    Weapons,
    /// Spawn, steering, intrusion
    Lifecycle,
    /// Despawn Retired, Spawning → Active
    Cleanup,
    /// HudSnapshot
    Hud,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Clock..Lifecycle останавливаются, пока сессия не запущена или игра окончена.
/// Cleanup и Hud работают всегда.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(config::SIMULATION_HZ));

        // Seed/конфиг могли вставить раньше (create_headless_app, тесты)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::default());
        }

        app.init_resource::<SessionState>()
            .init_resource::<SimulationClock>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Clock,
                SimulationSet::Input,
                SimulationSet::Weapons,
                SimulationSet::Lifecycle,
                SimulationSet::Cleanup,
                SimulationSet::Hud,
            )
                .chain(),
        );
        for gated in [
            SimulationSet::Clock,
            SimulationSet::Input,
            SimulationSet::Weapons,
            SimulationSet::Lifecycle,
        ] {
            app.configure_sets(FixedUpdate, gated.run_if(session::simulation_running));
        }

        app.add_systems(
            FixedUpdate,
            session::advance_clock.in_set(SimulationSet::Clock),
        );

        // Подсистемы
        app.add_plugins((
            LedgerPlugin,
            TargetingPlugin,
            GesturePlugin,
            ChargePlugin,
            CombatPlugin,
            LifecyclePlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(config::SIMULATION_HZ));

    app
}

/// Один simulation tick (FixedUpdate напрямую, без wall clock)
///
/// В конце tick'а event буферы ротируются (как `First` в обычном update):
/// событие доступно host'у после своего tick'а и следующего, потом удаляется.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);
    rotate_event_buffers(world);
}

fn rotate_event_buffers(world: &mut World) {
    rotate::<PoseDetectionRequest>(world);
    rotate::<PoseDetectionResult>(world);
    rotate::<ViewportResized>(world);
    rotate::<ChargeTick>(world);
    rotate::<BombDetonated>(world);
    rotate::<ShotFired>(world);
    rotate::<TargetHit>(world);
    rotate::<BonusCollected>(world);
    rotate::<EntitySpawned>(world);
    rotate::<EntityMoved>(world);
    rotate::<EntityReleased>(world);
    rotate::<Intrusion>(world);
    rotate::<GameOver>(world);
}

fn rotate<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
///
/// Airborne + позиция по каждому entity (сортировка по index), затем ledger.
pub fn world_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &Airborne, &Transform)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, airborne, transform) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", airborne).as_bytes());
        for value in transform.translation.to_array() {
            snapshot.extend_from_slice(&value.to_le_bytes());
        }
    }

    if let Some(ledger) = world.get_resource::<GameLedger>() {
        snapshot.extend_from_slice(format!("{:?}", ledger).as_bytes());
    }

    snapshot
}
