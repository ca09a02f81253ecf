//! Gesture slots: ровно 2 руки, слот = порядок detection
//!
//! Identity руки между кадрами не трекается: рука, пропавшая и вернувшаяся,
//! попадает в тот же индекс слота, но это не "та же" рука.

use bevy::prelude::*;

use super::classifier::{classify_hand, Gesture, GestureReading};
use super::landmarks::HandObservation;
use crate::config::MAX_HANDS;

/// Состояние одного слота руки
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandSlot {
    pub gesture: Gesture,
    /// Итоговый aim (после target assist)
    pub aim: Option<Vec2>,
    /// Aim до assist
    pub raw_aim: Option<Vec2>,
    pub index_extended: bool,
}

impl HandSlot {
    pub fn from_reading(reading: GestureReading) -> Self {
        Self {
            gesture: reading.gesture,
            aim: Some(reading.aim),
            raw_aim: Some(reading.aim),
            index_extended: reading.index_extended,
        }
    }

    pub fn is_point(&self) -> bool {
        self.gesture == Gesture::Point
    }

    pub fn is_fist(&self) -> bool {
        self.gesture == Gesture::Fist
    }
}

/// GestureState обеих рук (resource, перезаписывается каждым detection кадром)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GestureSlots {
    pub slots: [HandSlot; MAX_HANDS],
}

impl GestureSlots {
    /// Классифицирует кадр и раскладывает руки по слотам (лишние руки игнорируются)
    pub fn apply_frame(&mut self, hands: &[HandObservation]) {
        self.apply_detected(hands.iter().map(Some));
    }

    /// То же, но `None` на позиции = рука отброшена (невалидные landmarks), слот очищается
    pub fn apply_detected<'a>(
        &mut self,
        hands: impl IntoIterator<Item = Option<&'a HandObservation>>,
    ) {
        let mut hands = hands.into_iter();
        for slot in self.slots.iter_mut() {
            *slot = hands
                .next()
                .flatten()
                .map(|hand| HandSlot::from_reading(classify_hand(hand)))
                .unwrap_or_default();
        }
    }

    pub fn slot(&self, index: usize) -> Option<&HandSlot> {
        self.slots.get(index)
    }

    pub fn any_fist(&self) -> bool {
        self.slots.iter().any(HandSlot::is_fist)
    }
}
