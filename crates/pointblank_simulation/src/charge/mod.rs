//! Charge weapon: держим кулак → бомба
//!
//! FSM: Idle → Charging (кулак хотя бы одной руки + есть бомбы) → Detonate → Idle.
//! Отпустил кулак до конца зарядки: прогресс сбрасывается, продолжения нет.
//! Tick детонации = tick без стрельбы.

use bevy::prelude::*;

use crate::config::{GameConfig, CHARGE_TICK_MS};
use crate::gesture::GestureSlots;
use crate::ledger::GameLedger;
use crate::lifecycle::{Airborne, RetireCause};
use crate::logger;
use crate::session::SimulationClock;
use crate::SimulationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargePhase {
    Idle,
    Charging,
}

/// Результат одного шага FSM
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeOutcome {
    Idle,
    Charging {
        progress: f32,
        /// Пересекли очередную отметку CHARGE_TICK_MS (для audio/HUD)
        tick: bool,
    },
    Detonate,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ChargeState {
    pub started_ms: Option<f64>,
    /// [0,1]
    pub progress: f32,
    pub last_elapsed_ms: f64,
    /// Выставляется charge_weapon, читается resolve_shots
    pub detonated_this_tick: bool,
}

impl ChargeState {
    pub fn phase(&self) -> ChargePhase {
        if self.started_ms.is_some() {
            ChargePhase::Charging
        } else {
            ChargePhase::Idle
        }
    }

    pub fn reset(&mut self) {
        self.started_ms = None;
        self.progress = 0.0;
        self.last_elapsed_ms = 0.0;
    }

    pub fn update(&mut self, any_fist: bool, bombs: u32, now_ms: f64, charge_ms: f64) -> ChargeOutcome {
        if !any_fist || bombs == 0 {
            self.reset();
            return ChargeOutcome::Idle;
        }

        let started = *self.started_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - started).max(0.0);
        let progress = if charge_ms > 0.0 {
            (elapsed / charge_ms).min(1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            self.reset();
            return ChargeOutcome::Detonate;
        }

        let tick = (elapsed / CHARGE_TICK_MS).floor() > (self.last_elapsed_ms / CHARGE_TICK_MS).floor();
        self.last_elapsed_ms = elapsed;
        self.progress = progress as f32;

        ChargeOutcome::Charging {
            progress: self.progress,
            tick,
        }
    }
}

/// Event: очередная отметка зарядки
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ChargeTick {
    pub progress: f32,
}

/// Event: бомба взорвалась
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombDetonated {
    pub destroyed: usize,
    pub points: u64,
}

pub struct ChargePlugin;

impl Plugin for ChargePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChargeState>()
            .add_event::<ChargeTick>()
            .add_event::<BombDetonated>();

        app.add_systems(FixedUpdate, charge_weapon.in_set(SimulationSet::Weapons));
    }
}

/// Система: шаг FSM + детонация
///
/// Детонация retire'ит все живые entities (Spawning тоже). Очки только за
/// страйкеров, бонусы сгорают без награды.
pub fn charge_weapon(
    clock: Res<SimulationClock>,
    config: Res<GameConfig>,
    slots: Res<GestureSlots>,
    mut charge: ResMut<ChargeState>,
    mut ledger: ResMut<GameLedger>,
    mut flyers: Query<&mut Airborne>,
    mut ticks: EventWriter<ChargeTick>,
    mut detonations: EventWriter<BombDetonated>,
) {
    charge.detonated_this_tick = false;

    match charge.update(slots.any_fist(), ledger.bombs, clock.elapsed_ms, config.bomb_charge_ms) {
        ChargeOutcome::Idle => {}
        ChargeOutcome::Charging { progress, tick } => {
            if tick {
                ticks.write(ChargeTick { progress });
            }
        }
        ChargeOutcome::Detonate => {
            if !ledger.spend_bomb() {
                return;
            }

            let mut destroyed = 0;
            let mut points = 0;
            for mut airborne in flyers.iter_mut() {
                if !airborne.retire(RetireCause::Detonated) {
                    continue;
                }
                destroyed += 1;
                if airborne.kind.is_striker() {
                    points += airborne.kind.profile().score;
                }
            }
            ledger.award(points);
            charge.detonated_this_tick = true;

            detonations.write(BombDetonated { destroyed, points });
            logger::log_info(&format!(
                "Bomb detonated: {} destroyed, +{} points, {} bombs left",
                destroyed, points, ledger.bombs
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BOMB_CHARGE_MS;

    #[test]
    fn test_idle_without_fist() {
        let mut charge = ChargeState::default();
        assert_eq!(charge.update(false, 3, 0.0, BOMB_CHARGE_MS), ChargeOutcome::Idle);
        assert_eq!(charge.phase(), ChargePhase::Idle);
    }

    #[test]
    fn test_full_charge_detonates() {
        let mut charge = ChargeState::default();

        assert!(matches!(
            charge.update(true, 1, 1000.0, BOMB_CHARGE_MS),
            ChargeOutcome::Charging { progress, tick: false } if progress == 0.0
        ));
        match charge.update(true, 1, 2500.0, BOMB_CHARGE_MS) {
            ChargeOutcome::Charging { progress, .. } => assert!((progress - 0.5).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(charge.update(true, 1, 4000.0, BOMB_CHARGE_MS), ChargeOutcome::Detonate);
        assert_eq!(charge.phase(), ChargePhase::Idle);
        assert_eq!(charge.progress, 0.0);
    }

    #[test]
    fn test_release_resets_progress() {
        let mut charge = ChargeState::default();
        charge.update(true, 2, 0.0, BOMB_CHARGE_MS);
        charge.update(true, 2, 2900.0, BOMB_CHARGE_MS);
        assert!(charge.progress > 0.9);

        charge.update(false, 2, 2950.0, BOMB_CHARGE_MS);
        assert_eq!(charge.progress, 0.0);

        // Новая зарядка стартует с нуля
        assert!(matches!(
            charge.update(true, 2, 3000.0, BOMB_CHARGE_MS),
            ChargeOutcome::Charging { .. }
        ));
        assert_eq!(charge.started_ms, Some(3000.0));
    }

    #[test]
    fn test_no_bombs_never_charges() {
        let mut charge = ChargeState::default();
        for step in 0..400 {
            let now = step as f64 * 16.0;
            assert_eq!(charge.update(true, 0, now, BOMB_CHARGE_MS), ChargeOutcome::Idle);
        }
        assert_eq!(charge.progress, 0.0);
    }

    #[test]
    fn test_ticks_every_200ms() {
        let mut charge = ChargeState::default();
        let mut ticks = 0;
        for step in 0..=60 {
            let now = step as f64 * 16.0;
            if let ChargeOutcome::Charging { tick: true, .. } = charge.update(true, 1, now, BOMB_CHARGE_MS) {
                ticks += 1;
            }
        }
        // 960 ms → отметки 200, 400, 600, 800
        assert_eq!(ticks, 4);
    }
}
