//! Pose detection cadence (fire-and-forget, latest result wins)
//!
//! Архитектура:
//! - Simulation tick (60Hz) решает КОГДА просить новый кадр (~30Hz)
//! - Внешний pose estimator отвечает асинхронно через `PoseDetectionResult`
//! - Результаты не ставятся в очередь: применяется самый свежий sequence,
//!   всё старее (или от прошлой сессии) выбрасывается

use bevy::prelude::*;

/// Допуск на накопленную ошибку fixed timestep (2 tick'а по 1/60 ≈ 1000/30)
const TIMING_SLACK_MS: f64 = 0.01;

/// Event: симуляция просит внешний pose estimator обработать новый кадр
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseDetectionRequest {
    /// Generation сессии (после teardown старые ответы не применяются)
    pub session: u32,
    pub sequence: u64,
}

/// Event: ответ pose estimator (0..N рук, 21 landmark на руку, raw)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PoseDetectionResult {
    pub session: u32,
    pub sequence: u64,
    pub hands: Vec<Vec<Vec3>>,
}

impl PoseDetectionResult {
    pub fn new(session: u32, sequence: u64, hands: Vec<Vec<Vec3>>) -> Self {
        Self {
            session,
            sequence,
            hands,
        }
    }
}

/// Bookkeeping detection cadence
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DetectionCadence {
    pub last_request_ms: Option<f64>,
    pub next_sequence: u64,
    pub last_applied_sequence: Option<u64>,
}

impl DetectionCadence {
    /// Пора ли выпускать новый request; если да: резервирует sequence
    pub fn poll(&mut self, now_ms: f64, interval_ms: f64) -> Option<u64> {
        let due = match self.last_request_ms {
            None => true,
            Some(last) => now_ms - last + TIMING_SLACK_MS >= interval_ms,
        };
        if !due {
            return None;
        }

        self.last_request_ms = Some(now_ms);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Some(sequence)
    }

    /// Результат свежее всего, что уже применено?
    pub fn is_fresh(&self, sequence: u64) -> bool {
        self.last_applied_sequence
            .map_or(true, |applied| sequence > applied)
    }

    pub fn mark_applied(&mut self, sequence: u64) {
        self.last_applied_sequence = Some(sequence);
    }
}

/// Выбирает единственный результат для применения в этом tick
///
/// Возвращает самый свежий результат текущей сессии, который новее уже применённого.
pub fn select_latest<'a>(
    results: impl IntoIterator<Item = &'a PoseDetectionResult>,
    cadence: &DetectionCadence,
    session: u32,
) -> Option<&'a PoseDetectionResult> {
    results
        .into_iter()
        .filter(|result| result.session == session && cadence.is_fresh(result.sequence))
        .max_by_key(|result| result.sequence)
}
