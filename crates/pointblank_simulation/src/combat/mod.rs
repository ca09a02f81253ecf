//! Combat resolver: Point жест → выстрел → ray vs hit spheres
//!
//! ECS ответственность:
//! - Fire rate по каждой руке (TriggerClock)
//! - Ray cast из центра камеры через aim, ближайшее пересечение
//! - Награды: очки за страйкеров, бомба/жизнь за бонусы
//!
//! Renderer ответственность:
//! - Tracer по ShotFired (muzzle → tracer_end), эффекты по TargetHit / BonusCollected

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

use crate::charge::ChargeState;
use crate::config::{GameConfig, MAX_HANDS};
use crate::gesture::GestureSlots;
use crate::ledger::GameLedger;
use crate::lifecycle::{Airborne, EntityKind, RetireCause};
use crate::logger;
use crate::session::SimulationClock;
use crate::targeting::{screen_to_ndc, ViewCamera};
use crate::SimulationSet;

/// Время последнего выстрела каждой руки
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct TriggerClock {
    pub last_shot_ms: [Option<f64>; MAX_HANDS],
}

impl TriggerClock {
    /// Выстрел разрешён, если рука ещё не стреляла или прошло строго больше `fire_rate_ms`
    pub fn try_fire(&mut self, slot: usize, now_ms: f64, fire_rate_ms: f64) -> bool {
        let Some(last) = self.last_shot_ms.get_mut(slot) else {
            return false;
        };

        let ready = last.map_or(true, |previous| now_ms - previous > fire_rate_ms);
        if ready {
            *last = Some(now_ms);
        }
        ready
    }
}

/// Event: выстрел (для tracer + звука)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotFired {
    pub slot: usize,
    /// Normalized screen
    pub aim: Vec2,
    pub muzzle: Vec3,
    pub tracer_end: Vec3,
}

impl ShotFired {
    /// Геометрия tracer: от "ствола" под камерой в глубину сцены
    pub fn new(slot: usize, aim: Vec2) -> Self {
        let ndc = screen_to_ndc(aim);
        Self {
            slot,
            aim,
            muzzle: Vec3::new(ndc.x * 5.0, ndc.y * 5.0 - 2.0, 8.0),
            tracer_end: Vec3::new(ndc.x * 50.0, ndc.y * 50.0, -50.0),
        }
    }
}

/// Event: страйкер сбит
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    pub entity: Entity,
    pub kind: EntityKind,
    /// Где на экране показать эффект (aim выстрела)
    pub screen: Vec2,
    pub points: u64,
}

/// Event: бонус подобран
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BonusCollected {
    pub entity: Entity,
    pub kind: EntityKind,
    pub screen: Vec2,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TriggerClock>()
            .add_event::<ShotFired>()
            .add_event::<TargetHit>()
            .add_event::<BonusCollected>();

        // После charge_weapon: tick детонации без стрельбы
        app.add_systems(
            FixedUpdate,
            resolve_shots
                .in_set(SimulationSet::Weapons)
                .after(crate::charge::charge_weapon),
        );
    }
}

/// Ближайшее пересечение луча с hit spheres
///
/// `candidates` = (entity, центр, радиус). Равные дистанции: побеждает первый.
pub fn nearest_hit(
    origin: Vec3,
    direction: Dir3,
    max_distance: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<(Entity, f32)> {
    let ray = RayCast3d::new(origin, direction, max_distance);

    candidates
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            ray.sphere_intersection_at(&BoundingSphere::new(center, radius))
                .map(|distance| (entity, distance))
        })
        .fold(None, |best: Option<(Entity, f32)>, hit| match best {
            Some(current) if current.1 <= hit.1 => Some(current),
            _ => Some(hit),
        })
}

/// Награда за попадание. Возвращает начисленные очки (0 у бонусов).
pub fn reward(kind: EntityKind, ledger: &mut GameLedger) -> u64 {
    match kind {
        EntityKind::Striker | EntityKind::BossStriker => {
            let points = kind.profile().score;
            ledger.award(points);
            points
        }
        EntityKind::BonusAmmo => {
            ledger.gain_bomb();
            0
        }
        EntityKind::BonusLife => {
            ledger.gain_life();
            0
        }
    }
}

/// Система: стрельба обеих рук (слот 0, потом слот 1)
///
/// Entity, сбитый слотом 0, уже Retired и не участвует в ray cast слота 1.
pub fn resolve_shots(
    clock: Res<SimulationClock>,
    config: Res<GameConfig>,
    charge: Res<ChargeState>,
    slots: Res<GestureSlots>,
    camera: Option<Res<ViewCamera>>,
    mut trigger: ResMut<TriggerClock>,
    mut ledger: ResMut<GameLedger>,
    mut targets: Query<(Entity, &mut Airborne, &Transform)>,
    mut shots: EventWriter<ShotFired>,
    mut hits: EventWriter<TargetHit>,
    mut pickups: EventWriter<BonusCollected>,
) {
    if charge.detonated_this_tick {
        return;
    }

    for (index, slot) in slots.slots.iter().enumerate() {
        if !slot.is_point() {
            continue;
        }
        let Some(aim) = slot.aim else {
            continue;
        };
        if !trigger.try_fire(index, clock.elapsed_ms, config.fire_rate_ms) {
            continue;
        }

        shots.write(ShotFired::new(index, aim));

        let Some((origin, direction)) = camera.as_deref().and_then(|camera| camera.ray_through(aim)) else {
            continue;
        };
        let far = camera.as_deref().map_or(f32::MAX, |camera| camera.far);

        let candidates = targets
            .iter()
            .filter(|(_, airborne, _)| airborne.is_active())
            .map(|(entity, airborne, transform)| {
                (entity, transform.translation, airborne.kind.hit_radius())
            });
        let Some((entity, _)) = nearest_hit(origin, direction, far, candidates) else {
            continue;
        };

        let Ok((_, mut airborne, _)) = targets.get_mut(entity) else {
            continue;
        };
        let kind = airborne.kind;
        let cause = if kind.is_bonus() {
            RetireCause::Collected
        } else {
            RetireCause::Destroyed
        };
        if !airborne.retire(cause) {
            continue;
        }

        let points = reward(kind, &mut ledger);
        if kind.is_bonus() {
            pickups.write(BonusCollected {
                entity,
                kind,
                screen: aim,
            });
            logger::log(&format!("Hand {} collected {:?} {:?}", index, kind, entity));
        } else {
            hits.write(TargetHit {
                entity,
                kind,
                screen: aim,
                points,
            });
            logger::log(&format!("Hand {} hit {:?} {:?} (+{})", index, kind, entity, points));
        }
    }
}
