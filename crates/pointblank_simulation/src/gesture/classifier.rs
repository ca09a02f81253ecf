//! Gesture classifier: landmarks → {None, Point, Fist} + raw aim point
//!
//! Только отношения расстояний wrist→tip vs wrist→base, без обучаемой модели.
//! Point и Fist взаимоисключающие: Fist требует curled index, Point: нет.

use bevy::prelude::*;
use serde::Serialize;

use super::landmarks::*;

/// Tip дальше second joint минимум на 5% → index extended
const INDEX_EXTENDED_RATIO: f32 = 1.05;
/// Tip ближе base × 1.2 → палец согнут
const CURL_RATIO: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Reflect, Serialize)]
pub enum Gesture {
    /// Открытая ладонь / неоднозначная поза: no-op для стрельбы и зарядки
    #[default]
    None,
    /// "Пистолет": index вытянут, middle + ring согнуты
    Point,
    /// Кулак: все четыре пальца согнуты
    Fist,
}

/// Результат классификации одной руки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureReading {
    pub gesture: Gesture,
    pub index_extended: bool,
    /// Сырой aim (mirrored), до target assist
    pub aim: Vec2,
}

/// Согнутость пальцев (index, middle, ring, pinky)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerCurl {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerCurl {
    pub fn measure(hand: &HandObservation) -> Self {
        let curled =
            |tip: usize, base: usize| hand.distance(WRIST, tip) < hand.distance(WRIST, base) * CURL_RATIO;

        Self {
            index: curled(INDEX_TIP, INDEX_MCP),
            middle: curled(MIDDLE_TIP, MIDDLE_MCP),
            ring: curled(RING_TIP, RING_MCP),
            pinky: curled(PINKY_TIP, PINKY_MCP),
        }
    }

    pub fn all(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }
}

pub fn classify_hand(hand: &HandObservation) -> GestureReading {
    let index_extended =
        hand.distance(WRIST, INDEX_TIP) > hand.distance(WRIST, INDEX_PIP) * INDEX_EXTENDED_RATIO;
    let curl = FingerCurl::measure(hand);

    let gesture = if curl.all() {
        Gesture::Fist
    } else if index_extended && curl.middle && curl.ring && !curl.index {
        Gesture::Point
    } else {
        Gesture::None
    };

    // Кулак целится серединой ладони, остальное: кончиком index
    let source = match gesture {
        Gesture::Fist => MIDDLE_MCP,
        _ => INDEX_TIP,
    };

    GestureReading {
        gesture,
        index_extended,
        aim: mirror(hand.planar(source)),
    }
}

/// Видео зеркальное → отражаем X
pub fn mirror(point: Vec2) -> Vec2 {
    Vec2::new(1.0 - point.x, point.y)
}
