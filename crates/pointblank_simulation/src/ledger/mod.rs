//! Game ledger: score, lives, bombs, game over
//!
//! Единственный экземпляр на сессию. Мутируют: combat resolver (награды,
//! бонусы), lifecycle (intrusion penalty), charge weapon (бомбы, очки).
//! После game over ledger заморожен: все мутации no-op до рестарта сессии.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::{MAX_BOMBS, MAX_LIVES};
use crate::SimulationSet;

pub mod hud;

pub use hud::{publish_hud, HudSlot, HudSnapshot};

/// Ledger Plugin: ресурсы сессии + HUD snapshot в конце каждого tick
///
/// `publish_hud` вне run condition: HUD обновляется и после game over.
pub struct LedgerPlugin;

impl Plugin for LedgerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameLedger>()
            .init_resource::<HudSnapshot>()
            .add_event::<Intrusion>()
            .add_event::<GameOver>();

        app.add_systems(FixedUpdate, publish_hud.in_set(SimulationSet::Hud));
    }
}

/// Инварианты: lives ∈ [0, MAX_LIVES], bombs ∈ [0, MAX_BOMBS], score не убывает
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameLedger {
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub game_over: bool,
}

impl Default for GameLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLedger {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: MAX_LIVES,
            bombs: MAX_BOMBS,
            game_over: false,
        }
    }

    pub fn award(&mut self, points: u64) {
        if self.game_over {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    pub fn gain_life(&mut self) {
        if self.game_over {
            return;
        }
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    pub fn gain_bomb(&mut self) {
        if self.game_over {
            return;
        }
        self.bombs = (self.bombs + 1).min(MAX_BOMBS);
    }

    /// Списывает бомбу. `false` если бомб нет (или игра окончена).
    pub fn spend_bomb(&mut self) -> bool {
        if self.game_over || self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        true
    }

    /// Снимает жизни. Возвращает `true`, если именно этот штраф закончил игру.
    pub fn apply_penalty(&mut self, penalty: u32) -> bool {
        if self.game_over {
            return false;
        }
        self.lives = self.lives.saturating_sub(penalty);
        if self.lives == 0 {
            self.game_over = true;
            return true;
        }
        false
    }
}

/// Event: entity долетел до игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Intrusion {
    pub entity: Entity,
    pub kind: crate::lifecycle::EntityKind,
    pub penalty: u32,
    pub lives_left: u32,
}

/// Event: жизни кончились (терминально до рестарта)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u64,
}
