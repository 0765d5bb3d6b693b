//! Компоненты и параметры снарядов.

use bevy::prelude::*;

/// Физический тип снаряда. Каждому WeaponKind соответствует свой вид
/// (spray порождает пачку droplet-ов), параметры зашиты per-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectileKind {
    Boulder,
    SprayDroplet,
    Bomb,
}

impl ProjectileKind {
    pub fn radius(self) -> f32 {
        match self {
            ProjectileKind::Boulder => 0.5,
            ProjectileKind::SprayDroplet => 0.15,
            ProjectileKind::Bomb => 0.8,
        }
    }

    pub fn mass(self) -> f32 {
        match self {
            ProjectileKind::Boulder => 5.0,
            ProjectileKind::SprayDroplet => 0.2,
            ProjectileKind::Bomb => 10.0,
        }
    }

    /// Доля скорости, теряемая за секунду полёта
    pub fn damping(self) -> f32 {
        match self {
            ProjectileKind::Boulder => 0.5,
            ProjectileKind::SprayDroplet => 0.6,
            ProjectileKind::Bomb => 0.3,
        }
    }
}

/// Летящий горячий снаряд. После застывания entity уничтожается и на его
/// месте появляется отдельный `SolidifiedLava` — живой Projectile всегда hot.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Возраст в симулированных секундах
    pub age: f32,
    /// Было ли хоть одно касание поверхности (из ContactLog)
    pub has_collided: bool,
    pub is_hot: bool,
    /// Transient-флаг: в этом тике снаряд рядом с препятствием или попал
    /// в жителя. Ставит resolver, потребляет retirement, сбрасывает aging.
    pub near_obstacle: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(ProjectileKind::Boulder)
    }
}

impl Projectile {
    pub fn new(kind: ProjectileKind) -> Self {
        Self {
            kind,
            age: 0.0,
            has_collided: false,
            is_hot: true,
            near_obstacle: false,
        }
    }
}

/// Застывшая лава: постоянный статичный рельеф. Никогда не удаляется.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct SolidifiedLava {
    pub radius: f32,
}

impl Default for SolidifiedLava {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

pub const LAUNCH_POWER: f32 = 30.0;
/// Вертикальная компонента выстрела приглушена
pub const LAUNCH_VERTICAL_FACTOR: f32 = 0.7;
/// Точка вылета: столько юнитов вдоль направления прицела
pub const MUZZLE_OFFSET: f32 = 2.0;

/// Максимальное время жизни в полёте, сек
pub const MAX_LIFETIME: f32 = 10.0;
/// Порог скорости покоя для застывания
pub const REST_SPEED: f32 = 0.3;
/// Минимальный возраст до застывания "по покою"
pub const SETTLE_AGE: f32 = 0.3;

pub const SPRAY_DROPLETS: usize = 20;
/// Разброс скоростей droplet-ов: ±3 в стороны, ±1.5 по вертикали
pub const SPRAY_JITTER_LATERAL: f32 = 3.0;
pub const SPRAY_JITTER_VERTICAL: f32 = 1.5;

pub const BLAST_RADIUS: f32 = 10.0;
pub const BLAST_DAMAGE: u32 = 2;

/// Вероятность дымного следа за тик
pub const SMOKE_TRAIL_CHANCE: f32 = 0.15;
