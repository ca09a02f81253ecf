//! Сессия: старт/рестарт, teardown, simulation clock
//!
//! Одна сессия = один GameLedger. Рестарт после game over: тот же
//! `start_session`. Generation растёт на каждом старте и teardown, чтобы
//! ответы pose estimator от прошлой сессии не применялись.

use bevy::prelude::*;

use crate::charge::ChargeState;
use crate::combat::TriggerClock;
use crate::config::GameConfig;
use crate::gesture::{DetectionCadence, GestureSlots};
use crate::ledger::{GameLedger, HudSnapshot};
use crate::lifecycle::{release_all, spawn_random};
use crate::logger;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub generation: u32,
    pub running: bool,
}

/// Время симуляции (мс с начала сессии), двигается фиксированным шагом
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationClock {
    pub elapsed_ms: f64,
    pub tick: u64,
}

impl SimulationClock {
    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }
}

/// Система: первый шаг каждого tick
pub fn advance_clock(time: Res<Time<Fixed>>, mut clock: ResMut<SimulationClock>) {
    clock.tick += 1;
    clock.elapsed_ms += time.timestep().as_secs_f64() * 1000.0;
}

/// Run condition: tick идёт, пока сессия запущена и игра не окончена
pub fn simulation_running(session: Res<SessionState>, ledger: Res<GameLedger>) -> bool {
    session.running && !ledger.game_over
}

/// Старт (или рестарт) сессии: полный reset + начальный spawn
pub fn start_session(world: &mut World) {
    let released = release_all(world);
    reset_state(world);

    let generation = {
        let mut session = world.get_resource_or_insert_with(SessionState::default);
        session.generation = session.generation.wrapping_add(1);
        session.running = true;
        session.generation
    };

    // Начальный spawn тоже под лимитом живых entities
    let initial_spawns = {
        let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
        config.initial_spawns.min(config.max_entities)
    };
    for _ in 0..initial_spawns {
        spawn_random(world);
    }

    logger::log_info(&format!(
        "Session {} started ({} stale entities released, {} spawned)",
        generation, released, initial_spawns
    ));
}

/// Teardown: синхронно отпускает все entities, сессия остановлена
pub fn end_session(world: &mut World) {
    let released = release_all(world);
    reset_state(world);

    let generation = {
        let mut session = world.get_resource_or_insert_with(SessionState::default);
        session.generation = session.generation.wrapping_add(1);
        session.running = false;
        session.generation
    };

    logger::log_info(&format!(
        "Session ended ({} entities released, generation {})",
        released, generation
    ));
}

fn reset_state(world: &mut World) {
    let ledger = GameLedger::new();
    let charge = ChargeState::default();
    let slots = GestureSlots::default();

    world.insert_resource(HudSnapshot::capture(&ledger, &charge, &slots));
    world.insert_resource(ledger);
    world.insert_resource(charge);
    world.insert_resource(slots);
    world.insert_resource(TriggerClock::default());
    world.insert_resource(DetectionCadence::default());
    world.insert_resource(SimulationClock::default());
}
