//! View camera: проекция world ↔ normalized screen
//!
//! Renderer владеет настоящей камерой, симуляция держит её математическую копию
//! (pose + perspective). Нет resource → нет assist и нет попаданий.
//!
//! Screen space: x вправо, y вниз, [0,1] на весь viewport.

use bevy::prelude::*;

/// Perspective камера сцены
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub pose: Transform,
    /// Вертикальный FOV (градусы)
    pub fov_y_degrees: f32,
    /// width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            // Камера на +Z смотрит в origin, враги прилетают из -Z
            pose: Transform::from_xyz(0.0, 0.0, 10.0),
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Event: renderer поменял размер viewport
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

impl ViewCamera {
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    fn tan_half_fov(&self) -> f32 {
        (self.fov_y_degrees.to_radians() * 0.5).tan()
    }

    /// World → normalized screen. `None` если точка за near plane.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let local = self.pose.rotation.inverse() * (world - self.pose.translation);
        let depth = -local.z;
        if depth <= self.near {
            return None;
        }

        let tan_half = self.tan_half_fov();
        let ndc = Vec2::new(
            local.x / (depth * tan_half * self.aspect),
            local.y / (depth * tan_half),
        );
        Some(ndc_to_screen(ndc))
    }

    /// Луч из центра камеры через точку экрана
    pub fn ray_through(&self, aim: Vec2) -> Option<(Vec3, Dir3)> {
        let ndc = screen_to_ndc(aim);
        let tan_half = self.tan_half_fov();
        let local = Vec3::new(ndc.x * tan_half * self.aspect, ndc.y * tan_half, -1.0);

        let direction = Dir3::new(self.pose.rotation * local).ok()?;
        Some((self.pose.translation, direction))
    }

    /// Точка на луче через `aim` на расстоянии `distance` от камеры
    pub fn point_along(&self, aim: Vec2, distance: f32) -> Option<Vec3> {
        let (origin, direction) = self.ray_through(aim)?;
        Some(origin + *direction * distance)
    }
}

/// [0,1] screen (y вниз) → NDC [-1,1] (y вверх)
pub fn screen_to_ndc(screen: Vec2) -> Vec2 {
    Vec2::new(screen.x * 2.0 - 1.0, -(screen.y * 2.0) + 1.0)
}

pub fn ndc_to_screen(ndc: Vec2) -> Vec2 {
    Vec2::new((ndc.x + 1.0) / 2.0, (1.0 - ndc.y) / 2.0)
}

/// Система: применяет ViewportResized к aspect
pub fn apply_viewport_resize(
    mut events: EventReader<ViewportResized>,
    camera: Option<ResMut<ViewCamera>>,
) {
    let Some(mut camera) = camera else {
        // Камеры нет: просто дренируем события
        events.clear();
        return;
    };

    for event in events.read() {
        if event.width <= 0.0 || event.height <= 0.0 {
            crate::logger::log_warning(&format!(
                "Ignoring degenerate viewport {}x{}",
                event.width, event.height
            ));
            continue;
        }
        camera.aspect = event.width / event.height;
    }
}
