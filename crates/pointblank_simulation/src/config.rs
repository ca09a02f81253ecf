//! Игровые константы + GameConfig resource
//!
//! Константы фиксированы (никакого difficulty tuning). `GameConfig` только
//! переносит их в ECS, чтобы headless прогоны и тесты могли выключить
//! случайный spawn.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Частота simulation tick (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;
/// Целевая частота запросов pose detection
pub const DETECTION_HZ: f64 = 30.0;

/// Максимум одновременно живых entities
pub const MAX_ENTITIES: usize = 6;
/// Базовая глубина spawn (units от origin по -Z)
pub const SPAWN_DISTANCE: f32 = 40.0;
/// Случайная добавка к глубине spawn
pub const SPAWN_JITTER: f32 = 5.0;
/// Разброс spawn по X (полная ширина)
pub const SPAWN_SPREAD_X: f32 = 40.0;
/// Разброс spawn по Y (полная высота)
pub const SPAWN_SPREAD_Y: f32 = 20.0;
/// Вероятность spawn за tick (пока есть место)
pub const SPAWN_CHANCE: f32 = 0.04;
/// Скорость полёта (units/tick)
pub const FLIGHT_SPEED: f32 = 0.133;
/// Дистанция до origin, на которой entity считается intrusion
pub const INTRUSION_RADIUS: f32 = 3.0;
/// Амплитуда вертикального wobble
pub const WOBBLE_AMPLITUDE: f32 = 0.05;
/// Частота вертикального wobble (rad/sec)
pub const WOBBLE_FREQUENCY: f32 = 2.0;

/// Радиус magnetic assist (normalized screen units)
pub const MAGNETIC_RADIUS: f32 = 0.5;
/// Минимальный интервал между выстрелами одной руки
pub const FIRE_RATE_MS: f64 = 150.0;

pub const MAX_LIVES: u32 = 5;
pub const MAX_BOMBS: u32 = 3;
/// Сколько держать кулак до детонации
pub const BOMB_CHARGE_MS: f64 = 3000.0;
/// Шаг audible/visual tick во время зарядки
pub const CHARGE_TICK_MS: f64 = 200.0;

/// Сколько рук трекаем (dual wield)
pub const MAX_HANDS: usize = 2;

/// Конфиг симуляции (defaults = константы выше)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_entities: usize,
    pub spawn_chance: f32,
    /// Сколько entities спавнится на старте сессии
    pub initial_spawns: usize,
    pub flight_speed: f32,
    pub fire_rate_ms: f64,
    pub bomb_charge_ms: f64,
    pub magnetic_radius: f32,
    pub detection_interval_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            spawn_chance: SPAWN_CHANCE,
            initial_spawns: 1,
            flight_speed: FLIGHT_SPEED,
            fire_rate_ms: FIRE_RATE_MS,
            bomb_charge_ms: BOMB_CHARGE_MS,
            magnetic_radius: MAGNETIC_RADIUS,
            detection_interval_ms: 1000.0 / DETECTION_HZ,
        }
    }
}

impl GameConfig {
    /// Без случайного spawn: для тестов и scripted прогонов
    pub fn scripted() -> Self {
        Self {
            spawn_chance: 0.0,
            initial_spawns: 0,
            ..Self::default()
        }
    }
}
