//! Spawn geometry + steering
//!
//! Полёт: единичный вектор к origin + sinusoidal wobble по Y, шаг
//! `FLIGHT_SPEED × speed_modifier` за tick. Ориентация всегда на origin.

use bevy::prelude::*;
use rand::Rng;

use super::airborne::{Airborne, VisualAnimation};
use super::kind::EntityKind;
use crate::config::*;

/// Амплитуда взмаха крыльев (rad)
const WING_SWING: f32 = 0.5;
/// Прирост yaw бонуса за tick (rad)
const BONUS_SPIN_PER_TICK: f32 = 0.02;
const BONUS_TILT: f32 = 0.2;
/// Верхняя граница seed (фаза wobble)
const SEED_RANGE: f32 = 100.0;

/// Позиция spawn: разброс по X/Y, глубина 40–45 units по -Z, лицом к origin
pub fn spawn_transform<R: Rng + ?Sized>(rng: &mut R) -> Transform {
    let depth = SPAWN_DISTANCE + rng.gen::<f32>() * SPAWN_JITTER;
    let x = (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD_X;
    let y = (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD_Y;

    face_origin(Transform::from_xyz(x, y, -depth))
}

/// Случайный kind + seed + transform
pub fn roll_airborne<R: Rng + ?Sized>(rng: &mut R) -> (Airborne, Transform) {
    let kind = EntityKind::from_roll(rng.gen::<f32>());
    let transform = spawn_transform(rng);
    let seed = rng.gen::<f32>() * SEED_RANGE;
    (Airborne::new(kind, seed), transform)
}

pub fn face_origin(transform: Transform) -> Transform {
    transform.looking_at(Vec3::ZERO, Vec3::Y)
}

/// Один шаг полёта к origin
///
/// Wobble добавляется к нормализованному направлению без повторной нормализации,
/// поэтому шаг чуть длиннее `speed` на пиках синусоиды.
pub fn steer(position: Vec3, seed: f32, t_secs: f32, speed: f32) -> Vec3 {
    let mut direction = (-position).normalize_or_zero();
    direction.y += (t_secs * WOBBLE_FREQUENCY + seed).sin() * WOBBLE_AMPLITUDE;
    position + direction * speed
}

/// Анимация для renderer: крылья у страйкеров, вращение у бонусов
pub fn animation(airborne: &Airborne, t_secs: f32) -> VisualAnimation {
    match airborne.kind.profile().flap_frequency {
        Some(frequency) => VisualAnimation::Wings {
            angle: (t_secs * frequency + airborne.seed).sin() * WING_SWING,
        },
        None => VisualAnimation::Spin {
            yaw: airborne.age_ticks as f32 * BONUS_SPIN_PER_TICK,
            tilt: t_secs.sin() * BONUS_TILT,
        },
    }
}

pub fn has_intruded(position: Vec3) -> bool {
    position.length() < INTRUSION_RADIUS
}
