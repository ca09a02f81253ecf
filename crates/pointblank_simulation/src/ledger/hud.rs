//! HUD snapshot: всё, что HUD collaborator читает раз в tick

use bevy::prelude::*;
use serde::Serialize;

use super::GameLedger;
use crate::charge::ChargeState;
use crate::config::MAX_HANDS;
use crate::gesture::{Gesture, GestureSlots};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HudSlot {
    pub gesture: Gesture,
    /// Normalized screen (x, y), если рука видна
    pub aim: Option<[f32; 2]>,
    pub index_extended: bool,
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub game_over: bool,
    /// Прогресс зарядки бомбы [0,1]
    pub charge: f32,
    pub hands: [HudSlot; MAX_HANDS],
}

impl HudSnapshot {
    pub fn capture(ledger: &GameLedger, charge: &ChargeState, slots: &GestureSlots) -> Self {
        let mut hands = [HudSlot::default(); MAX_HANDS];
        for (hud, slot) in hands.iter_mut().zip(slots.slots.iter()) {
            *hud = HudSlot {
                gesture: slot.gesture,
                aim: slot.aim.map(|aim| aim.to_array()),
                index_extended: slot.index_extended,
            };
        }

        Self {
            score: ledger.score,
            lives: ledger.lives,
            bombs: ledger.bombs,
            game_over: ledger.game_over,
            charge: charge.progress,
            hands,
        }
    }
}

/// Система: обновляет HudSnapshot (работает и после game over)
pub fn publish_hud(
    ledger: Res<GameLedger>,
    charge: Res<ChargeState>,
    slots: Res<GestureSlots>,
    mut hud: ResMut<HudSnapshot>,
) {
    let snapshot = HudSnapshot::capture(&ledger, &charge, &slots);
    if *hud != snapshot {
        *hud = snapshot;
    }
}
