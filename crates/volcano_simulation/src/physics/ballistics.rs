//! Баллистика снарядов: гравитация, экспоненциальное затухание, контакт
//! с поверхностью конуса / земли.
//!
//! Rapier здесь только для collision shapes — интеграция скоростей своя,
//! потом зеркалим в `Velocity` для внешнего слоя.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::physics::{contact_friction, SurfaceKind};
use crate::terrain::{surface_height, ISLAND_RADIUS};

pub const GRAVITY: Vec3 = Vec3::new(0.0, -30.0, 0.0);

/// Динамическое тело под собственной интеграцией.
/// `damping` — доля скорости, теряемая за секунду: v *= (1 - damping)^dt.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BallisticBody {
    pub velocity: Vec3,
    pub damping: f32,
    pub radius: f32,
}

impl Default for BallisticBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            damping: 0.0,
            radius: 0.5,
        }
    }
}

/// На какую поверхность легло тело в этом тике
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSurface {
    /// Склон конуса (внутри радиуса острова)
    Volcano,
    /// Плоскость за пределами острова
    Ground,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactPair {
    pub body: Entity,
    pub surface: ContactSurface,
}

/// Журнал контактов за текущий тик. Очищается в начале physics step,
/// потребители опрашивают его синхронно после.
#[derive(Resource, Debug, Default)]
pub struct ContactLog {
    pub pairs: Vec<ContactPair>,
}

/// System: шаг интеграции для всех BallisticBody.
///
/// Контакт с поверхностью: позиция клампится на `surface + radius`,
/// вертикальная скорость вниз обнуляется (restitution 0), горизонтальная
/// гасится трением пары материалов. Пара пишется в ContactLog.
pub fn step_ballistics(
    time: Res<Time<Fixed>>,
    mut log: ResMut<ContactLog>,
    mut bodies: Query<(Entity, &mut BallisticBody, &mut Transform)>,
) {
    let dt = time.delta_secs();
    log.pairs.clear();

    for (entity, mut body, mut transform) in bodies.iter_mut() {
        body.velocity += GRAVITY * dt;
        let decay = (1.0 - body.damping).powf(dt);
        body.velocity *= decay;
        let step = body.velocity * dt;
        transform.translation += step;

        let pos = transform.translation;
        let dist = (pos.x * pos.x + pos.z * pos.z).sqrt();
        let (floor, surface) = if dist <= ISLAND_RADIUS {
            (surface_height(pos.x, pos.z), ContactSurface::Volcano)
        } else {
            (0.0, ContactSurface::Ground)
        };

        if pos.y - body.radius <= floor {
            transform.translation.y = floor + body.radius;
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
            let friction = match surface {
                ContactSurface::Volcano => contact_friction(SurfaceKind::Lava, SurfaceKind::Volcano),
                ContactSurface::Ground => contact_friction(SurfaceKind::Lava, SurfaceKind::Ground),
            };
            let grip = 1.0 / (1.0 + friction * dt);
            body.velocity.x *= grip;
            body.velocity.z *= grip;
            log.pairs.push(ContactPair {
                body: entity,
                surface,
            });
        }
    }
}

/// System: зеркалит свою скорость в rapier Velocity (контракт для
/// внешнего физического слоя, сама симуляция её не читает)
pub fn sync_velocity_to_rapier(mut bodies: Query<(&BallisticBody, &mut Velocity)>) {
    for (body, mut velocity) in bodies.iter_mut() {
        velocity.linvel = body.velocity;
    }
}
