//! Hand landmarks (21 точка, анатомическая нумерация pose model)
//!
//! x/y нормализованы в [0,1] относительно кадра камеры, z не используется.

use bevy::prelude::*;
use std::fmt;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Ошибки входных landmarks
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Pose model вернула не 21 точку
    WrongLandmarkCount { expected: usize, actual: usize },
    /// NaN / inf в координатах
    NonFiniteCoordinate { index: usize },
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkError::WrongLandmarkCount { expected, actual } => {
                write!(f, "expected {} hand landmarks, got {}", expected, actual)
            }
            LandmarkError::NonFiniteCoordinate { index } => {
                write!(f, "landmark {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for LandmarkError {}

/// Одна рука за один кадр detection
///
/// Эфемерная: создаётся на каждый кадр, после классификации выбрасывается.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(points: &[Vec3]) -> Result<Self, LandmarkError> {
        let points: [Vec3; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| LandmarkError::WrongLandmarkCount {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFiniteCoordinate { index });
        }

        Ok(Self { points })
    }

    /// Плоская (x, y) проекция landmark
    pub fn planar(&self, index: usize) -> Vec2 {
        self.points[index].truncate()
    }

    /// 2D расстояние между landmarks (depth игнорируется)
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.planar(a).distance(self.planar(b))
    }
}
