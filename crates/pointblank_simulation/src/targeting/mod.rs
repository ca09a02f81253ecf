//! Targeting: view camera + magnetic target assist
//!
//! Assist применяется только к Point жесту: aim "прилипает" к проекции
//! ближайшего entity, если тот ближе MAGNETIC_RADIUS.

pub mod camera;

pub use camera::{apply_viewport_resize, ndc_to_screen, screen_to_ndc, ViewCamera, ViewportResized};

use bevy::prelude::*;

use crate::SimulationSet;

/// Регистрирует ViewCamera (если renderer ещё не вставил свою) + resize
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ViewportResized>();
        if !app.world().contains_resource::<ViewCamera>() {
            app.insert_resource(ViewCamera::default());
        }

        app.add_systems(
            FixedUpdate,
            apply_viewport_resize.in_set(SimulationSet::Input),
        );
    }
}

/// Magnetic assist
///
/// Минимум стартует с `radius`; цель заменяет текущую лучшую только при строго
/// меньшем расстоянии (стабильный порядок итерации = tie-break).
/// Возвращает центр ближайшей цели или `raw`, если никто не попал в радиус.
pub fn assist_aim(raw: Vec2, targets: impl IntoIterator<Item = Vec2>, radius: f32) -> Vec2 {
    let mut best_distance = radius;
    let mut best = None;

    for target in targets {
        let distance = raw.distance(target);
        if distance < best_distance {
            best_distance = distance;
            best = Some(target);
        }
    }

    best.unwrap_or(raw)
}

/// Assist по живым entities: проецирует позиции через камеру и вызывает `assist_aim`
pub fn assist_with_camera(
    raw: Vec2,
    camera: &ViewCamera,
    positions: impl IntoIterator<Item = Vec3>,
    radius: f32,
) -> Vec2 {
    let projected = positions
        .into_iter()
        .filter_map(|position| camera.project(position));
    assist_aim(raw, projected, radius)
}
