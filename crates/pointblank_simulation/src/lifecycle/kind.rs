//! Entity kinds + lookup table поведения
//!
//! Вместо иерархии типов: закрытый enum и `KindProfile` на каждый вариант:
//! spawn threshold, очки, скорость, штраф, hit volume, параметры анимации.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum EntityKind {
    /// Обычный враг
    Striker,
    /// Медленный босс (урон при intrusion ×2, HP нет: один хит убивает)
    BossStriker,
    /// Подарок: +1 бомба
    BonusAmmo,
    /// Сладость: +1 жизнь
    BonusLife,
}

/// Поведение kind'а (статическая таблица)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    /// Spawn roll строго выше порога → этот kind (проверки по порядку `SPAWN_ORDER`)
    pub spawn_threshold: f32,
    pub score: u64,
    pub speed_modifier: f32,
    /// Сколько жизней снимает intrusion
    pub penalty: u32,
    /// Радиус hit sphere до масштаба
    pub hit_radius: f32,
    /// Визуальный масштаб группы
    pub scale: f32,
    /// Частота взмахов крыльев (rad/sec), None: у бонусов крыльев нет
    pub flap_frequency: Option<f32>,
}

const STRIKER: KindProfile = KindProfile {
    spawn_threshold: f32::NEG_INFINITY,
    score: 100,
    speed_modifier: 1.0,
    penalty: 1,
    hit_radius: 1.0,
    scale: 1.0,
    flap_frequency: Some(15.0),
};

const BOSS_STRIKER: KindProfile = KindProfile {
    spawn_threshold: 0.75,
    score: 300,
    speed_modifier: 0.7,
    penalty: 2,
    hit_radius: 1.0,
    scale: 2.5,
    flap_frequency: Some(8.0),
};

const BONUS_AMMO: KindProfile = KindProfile {
    spawn_threshold: 0.90,
    score: 0,
    speed_modifier: 1.0,
    penalty: 0,
    hit_radius: 0.8,
    scale: 1.0,
    flap_frequency: None,
};

const BONUS_LIFE: KindProfile = KindProfile {
    spawn_threshold: 0.95,
    score: 0,
    speed_modifier: 1.0,
    penalty: 0,
    hit_radius: 0.7,
    scale: 1.0,
    flap_frequency: None,
};

/// Порядок проверки порогов важен: life → ammo → boss → striker
const SPAWN_ORDER: [EntityKind; 4] = [
    EntityKind::BonusLife,
    EntityKind::BonusAmmo,
    EntityKind::BossStriker,
    EntityKind::Striker,
];

impl EntityKind {
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            EntityKind::Striker => &STRIKER,
            EntityKind::BossStriker => &BOSS_STRIKER,
            EntityKind::BonusAmmo => &BONUS_AMMO,
            EntityKind::BonusLife => &BONUS_LIFE,
        }
    }

    /// Weighted draw: 5% life, 5% ammo, 15% boss, остальное striker
    pub fn from_roll(roll: f32) -> Self {
        SPAWN_ORDER
            .into_iter()
            .find(|kind| roll > kind.profile().spawn_threshold)
            .unwrap_or(EntityKind::Striker)
    }

    pub fn is_striker(&self) -> bool {
        matches!(self, EntityKind::Striker | EntityKind::BossStriker)
    }

    pub fn is_bonus(&self) -> bool {
        !self.is_striker()
    }

    /// Радиус hit sphere с учётом масштаба
    pub fn hit_radius(&self) -> f32 {
        let profile = self.profile();
        profile.hit_radius * profile.scale
    }
}
