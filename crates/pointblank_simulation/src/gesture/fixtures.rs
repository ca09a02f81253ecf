//! Синтетические позы руки для тестов

use bevy::prelude::*;

use super::landmarks::*;

const WRIST_POS: Vec2 = Vec2::new(0.5, 0.9);
/// X оснований index / middle / ring / pinky
const BASE_X: [f32; 4] = [0.44, 0.49, 0.54, 0.59];
const BASE_Y: f32 = 0.7;
const EXTENDED_TIP_Y: f32 = 0.4;
const CURLED_TIP_Y: f32 = 0.82;

/// Поза по флагам extended для (index, middle, ring, pinky)
pub fn pose(extended: [bool; 4]) -> Vec<Vec3> {
    let mut points = vec![WRIST_POS.extend(0.0); LANDMARK_COUNT];

    // Большой палец: в сторону, классификатор его не смотрит
    for (offset, index) in (1..=4).enumerate() {
        points[index] = Vec3::new(0.4 - offset as f32 * 0.03, 0.85, 0.0);
    }

    for (finger, &x) in BASE_X.iter().enumerate() {
        let base = INDEX_MCP + finger * 4;
        let tip_y = if extended[finger] { EXTENDED_TIP_Y } else { CURLED_TIP_Y };
        let tip = Vec3::new(x, tip_y, 0.0);
        let base_pos = Vec3::new(x, BASE_Y, 0.0);

        points[base] = base_pos;
        if extended[finger] {
            points[base + 1] = Vec3::new(x, 0.6, 0.0);
            points[base + 2] = Vec3::new(x, 0.5, 0.0);
        } else {
            points[base + 1] = Vec3::new(x, 0.66, 0.0);
            points[base + 2] = Vec3::new(x, 0.72, 0.0);
        }
        points[base + 3] = tip;
    }

    points
}

pub fn point_pose() -> Vec<Vec3> {
    pose([true, false, false, false])
}

pub fn fist_pose() -> Vec<Vec3> {
    pose([false, false, false, false])
}

pub fn open_pose() -> Vec<Vec3> {
    pose([true, true, true, true])
}

/// Сдвигает позу так, чтобы landmark `anchor` попал в `target` (camera space, не mirrored)
pub fn moved(mut points: Vec<Vec3>, anchor: usize, target: Vec2) -> Vec<Vec3> {
    let delta = (target - points[anchor].truncate()).extend(0.0);
    for point in points.iter_mut() {
        *point += delta;
    }
    points
}

pub fn observation(points: Vec<Vec3>) -> HandObservation {
    HandObservation::new(&points).expect("fixture pose has 21 landmarks")
}

/// Point-поза, raw aim которой (после mirror) равен `aim`
pub fn pointing_at(aim: Vec2) -> HandObservation {
    observation(moved(point_pose(), INDEX_TIP, Vec2::new(1.0 - aim.x, aim.y)))
}

pub fn fist() -> HandObservation {
    observation(fist_pose())
}

pub fn open_hand() -> HandObservation {
    observation(open_pose())
}
