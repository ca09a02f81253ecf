//! Airborne entity: компонент + lifecycle + events для renderer
//!
//! Lifecycle: Spawning → Active → Retired (терминально, без воскрешения).
//! Identity = Bevy `Entity` (index + generation): уникален среди живых,
//! generation отличает переиспользованный index.

use bevy::prelude::*;

use super::kind::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Lifecycle {
    /// Только что создан, renderer ещё не подтвердил визуалы (до конца tick)
    Spawning,
    Active,
    /// Удалён из активного множества; despawn в конце tick
    Retired,
}

/// Почему entity ушёл из активного множества
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum RetireCause {
    /// Сбит выстрелом
    Destroyed,
    /// Бонус подобран выстрелом
    Collected,
    /// Уничтожен детонацией бомбы
    Detonated,
    /// Долетел до игрока
    Intrusion,
    /// Сессия закончилась
    Teardown,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Airborne {
    pub kind: EntityKind,
    /// Фаза wobble и анимации
    pub seed: f32,
    pub phase: Lifecycle,
    /// Заполняется при retire
    pub cause: Option<RetireCause>,
    /// Сколько tick'ов entity в полёте
    pub age_ticks: u32,
}

impl Airborne {
    pub fn new(kind: EntityKind, seed: f32) -> Self {
        Self {
            kind,
            seed,
            phase: Lifecycle::Spawning,
            cause: None,
            age_ticks: 0,
        }
    }

    /// Участвует в лимите MAX_ENTITIES и в детонации
    pub fn is_live(&self) -> bool {
        self.phase != Lifecycle::Retired
    }

    /// Можно попасть лучом / двигается
    pub fn is_active(&self) -> bool {
        self.phase == Lifecycle::Active
    }

    /// Retire. `true` только на первом переходе: повторный retire ничего не меняет.
    pub fn retire(&mut self, cause: RetireCause) -> bool {
        if self.phase == Lifecycle::Retired {
            return false;
        }
        self.phase = Lifecycle::Retired;
        self.cause = Some(cause);
        true
    }

    pub fn activate(&mut self) {
        if self.phase == Lifecycle::Spawning {
            self.phase = Lifecycle::Active;
        }
    }
}

/// Параметры анимации для renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualAnimation {
    /// Угол крыльев (rad): left = angle, right = -angle
    Wings { angle: f32 },
    /// Бонус крутится: накопленный yaw + покачивание по X
    Spin { yaw: f32, tilt: f32 },
}

/// Event: создать визуалы (ECS → renderer)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntitySpawned {
    pub entity: Entity,
    pub kind: EntityKind,
    pub transform: Transform,
}

/// Event: per-tick transform + анимация (ECS → renderer)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityMoved {
    pub entity: Entity,
    pub transform: Transform,
    pub animation: VisualAnimation,
}

/// Event: освободить визуалы (ECS → renderer), ровно один раз на entity
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityReleased {
    pub entity: Entity,
    pub kind: EntityKind,
    pub cause: RetireCause,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_airborne_is_spawning() {
        let airborne = Airborne::new(EntityKind::Striker, 12.0);
        assert_eq!(airborne.phase, Lifecycle::Spawning);
        assert!(airborne.is_live());
        assert!(!airborne.is_active());
    }

    #[test]
    fn test_retire_is_idempotent() {
        let mut airborne = Airborne::new(EntityKind::BossStriker, 0.0);
        airborne.activate();

        assert!(airborne.retire(RetireCause::Destroyed));
        assert!(!airborne.retire(RetireCause::Detonated));
        assert_eq!(airborne.cause, Some(RetireCause::Destroyed));
        assert!(!airborne.is_live());
    }

    #[test]
    fn test_retired_never_reactivates() {
        let mut airborne = Airborne::new(EntityKind::Striker, 0.0);
        airborne.retire(RetireCause::Teardown);
        airborne.activate();
        assert_eq!(airborne.phase, Lifecycle::Retired);
    }
}
