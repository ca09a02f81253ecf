//! Gesture input: landmarks → жест + aim по двум слотам рук
//!
//! Pose estimator живёт снаружи. Симуляция решает, когда просить кадр
//! (`PoseDetectionRequest`), и применяет самый свежий ответ
//! (`PoseDetectionResult`): классификация + target assist для Point.

use bevy::prelude::*;

pub mod classifier;
pub mod detection;
pub mod landmarks;
pub mod slots;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classifier::{classify_hand, mirror, FingerCurl, Gesture, GestureReading};
pub use detection::{select_latest, DetectionCadence, PoseDetectionRequest, PoseDetectionResult};
pub use landmarks::{HandObservation, LandmarkError, LANDMARK_COUNT};
pub use slots::{GestureSlots, HandSlot};

use crate::config::GameConfig;
use crate::lifecycle::Airborne;
use crate::logger;
use crate::session::{SessionState, SimulationClock};
use crate::targeting::{assist_with_camera, ViewCamera};
use crate::SimulationSet;

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GestureSlots>()
            .init_resource::<DetectionCadence>()
            .add_event::<PoseDetectionRequest>()
            .add_event::<PoseDetectionResult>();

        app.add_systems(
            FixedUpdate,
            (request_pose_detection, apply_pose_results)
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}

/// Система: выпускает detection request с частотой DETECTION_HZ
pub fn request_pose_detection(
    clock: Res<SimulationClock>,
    session: Res<SessionState>,
    config: Res<GameConfig>,
    mut cadence: ResMut<DetectionCadence>,
    mut requests: EventWriter<PoseDetectionRequest>,
) {
    if let Some(sequence) = cadence.poll(clock.elapsed_ms, config.detection_interval_ms) {
        requests.write(PoseDetectionRequest {
            session: session.generation,
            sequence,
        });
    }
}

/// Система: применяет самый свежий PoseDetectionResult
///
/// Невалидная рука (не 21 landmark, NaN) = рука не найдена, слот очищается.
/// Assist считается против Active entities на момент применения.
pub fn apply_pose_results(
    mut results: EventReader<PoseDetectionResult>,
    session: Res<SessionState>,
    config: Res<GameConfig>,
    camera: Option<Res<ViewCamera>>,
    targets: Query<(&Airborne, &Transform)>,
    mut cadence: ResMut<DetectionCadence>,
    mut slots: ResMut<GestureSlots>,
) {
    let received: Vec<&PoseDetectionResult> = results.read().collect();
    let Some(latest) = select_latest(received.iter().copied(), &cadence, session.generation) else {
        if !received.is_empty() {
            logger::log_warning(&format!(
                "Discarded {} stale detection result(s)",
                received.len()
            ));
        }
        return;
    };

    let skipped = received.len() - 1;
    if skipped > 0 {
        logger::log(&format!("Skipped {} older detection result(s)", skipped));
    }

    let observations: Vec<Option<HandObservation>> = latest
        .hands
        .iter()
        .enumerate()
        .map(|(index, points)| match HandObservation::new(points) {
            Ok(hand) => Some(hand),
            Err(err) => {
                logger::log_warning(&format!("Rejected hand #{}: {}", index, err));
                None
            }
        })
        .collect();

    slots.apply_detected(observations.iter().map(Option::as_ref));

    if let Some(camera) = camera.as_deref() {
        let positions: Vec<Vec3> = targets
            .iter()
            .filter(|(airborne, _)| airborne.is_active())
            .map(|(_, transform)| transform.translation)
            .collect();

        for slot in slots.slots.iter_mut().filter(|slot| slot.is_point()) {
            if let Some(raw) = slot.raw_aim {
                slot.aim = Some(assist_with_camera(
                    raw,
                    camera,
                    positions.iter().copied(),
                    config.magnetic_radius,
                ));
            }
        }
    }

    cadence.mark_applied(latest.sequence);
}
