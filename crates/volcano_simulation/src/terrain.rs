//! Остров-вулкан: height oracle и мировые константы.
//!
//! Конус задан аналитически, поэтому никакого heightmap-ресурса нет:
//! `surface_height` — чистая функция, её зовут и физика, и агенты, и тесты.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_4, FRAC_PI_6, PI};

use crate::physics::{terrain_collision_groups, SurfaceKind, CONTACT_RESTITUTION};
use crate::DeterministicRng;

pub const ISLAND_RADIUS: f32 = 60.0;
pub const CONE_HEIGHT: f32 = 30.0;
pub const CALDERA_RADIUS: f32 = ISLAND_RADIUS * 0.15;
/// Уровень океана вокруг острова
pub const WATER_LEVEL: f32 = 2.0;
pub const LOWER_BOUND_Y: f32 = -50.0;
pub const UPPER_BOUND_Y: f32 = 100.0;
/// Высота победы жителей (кромка кальдеры)
pub const WIN_HEIGHT: f32 = CONE_HEIGHT * 0.9;
/// Минимальная высота, с которой может начаться ритуал
pub const RITUAL_MIN_HEIGHT: f32 = CONE_HEIGHT * 0.85;

pub const VILLAGE_DISTANCE: f32 = ISLAND_RADIUS * 0.6;
pub const VILLAGE_PLATFORM_HEIGHT: f32 = 2.0;

pub const TREE_COUNT: usize = 30;
pub const TREE_TRUNK_HEIGHT: f32 = 4.5;
pub const TREE_TRUNK_RADIUS: f32 = 0.45;
/// Деревья растут в кольце [0.25, 0.60] * R
pub const TREE_BAND_INNER: f32 = ISLAND_RADIUS * 0.25;
pub const TREE_BAND_OUTER: f32 = ISLAND_RADIUS * 0.60;

pub const SUMMIT: Vec3 = Vec3::new(0.0, CONE_HEIGHT, 0.0);

/// Высота поверхности в точке (x, z).
///
/// Внутри радиуса острова — линейный конус, снаружи — ноль (вода на Y=2
/// обрабатывается отдельно в retirement). Clamp закрывает обе стороны.
pub fn surface_height(x: f32, z: f32) -> f32 {
    let dist = (x * x + z * z).sqrt();
    let ratio = (1.0 - dist / ISLAND_RADIUS).clamp(0.0, 1.0);
    CONE_HEIGHT * ratio
}

/// Две деревни на противоположных склонах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum VillageId {
    East,
    West,
}

impl VillageId {
    pub const ALL: [VillageId; 2] = [VillageId::East, VillageId::West];

    pub fn angle(self) -> f32 {
        match self {
            VillageId::East => FRAC_PI_4,
            VillageId::West => FRAC_PI_4 + PI,
        }
    }

    pub fn index(self) -> usize {
        match self {
            VillageId::East => 0,
            VillageId::West => 1,
        }
    }

    /// Центр деревенской платформы (точка отсчёта elevation progress)
    pub fn anchor(self) -> Vec3 {
        let angle = self.angle();
        let x = angle.cos() * VILLAGE_DISTANCE;
        let z = angle.sin() * VILLAGE_DISTANCE;
        let y = surface_height(x, z) + VILLAGE_PLATFORM_HEIGHT * 0.5;
        Vec3::new(x, y, z)
    }

    /// Цель марша для waypoint 0/1/2. Индексы 0 и 1 — промежуточные точки
    /// на склоне, 2 — вершина. Индексы выше не выдаются (waypoint монотонен).
    pub fn waypoint_target(self, waypoint: u8) -> Vec3 {
        let angle = self.angle();
        match waypoint {
            0 => ring_point(angle - FRAC_PI_6, ISLAND_RADIUS * 0.45),
            1 => ring_point(angle + FRAC_PI_6, ISLAND_RADIUS * 0.30),
            _ => SUMMIT,
        }
    }
}

fn ring_point(angle: f32, dist: f32) -> Vec3 {
    let x = angle.cos() * dist;
    let z = angle.sin() * dist;
    Vec3::new(x, surface_height(x, z), z)
}

/// Статичное препятствие. `base` — точка основания ствола на поверхности:
/// blast и avoidance меряют до неё, projectile proximity — до центра ствола
/// (Transform entity).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Tree {
    pub base: Vec3,
}

pub fn tree_bundle(base: Vec3) -> impl Bundle {
    // Центр коллайдера ствола смещён на высоту ствола вверх от основания
    let trunk_center = Vec3::new(base.x, base.y + TREE_TRUNK_HEIGHT, base.z);
    (
        Tree { base },
        Transform::from_translation(trunk_center),
        RigidBody::Fixed,
        Collider::cylinder(TREE_TRUNK_HEIGHT * 0.5, TREE_TRUNK_RADIUS),
        Friction::coefficient(SurfaceKind::Tree.friction_vs_lava()),
        Restitution::coefficient(CONTACT_RESTITUTION),
        terrain_collision_groups(),
    )
}

/// System (Startup): рассаживает деревья по кольцу seeded RNG-ом
pub fn spawn_island_trees(mut commands: Commands, mut rng: ResMut<DeterministicRng>) {
    for _ in 0..TREE_COUNT {
        let angle = rng.rng.gen::<f32>() * PI * 2.0;
        let dist = TREE_BAND_INNER + rng.rng.gen::<f32>() * (TREE_BAND_OUTER - TREE_BAND_INNER);
        let x = angle.cos() * dist;
        let z = angle.sin() * dist;
        let base = Vec3::new(x, surface_height(x, z), z);
        commands.spawn(tree_bundle(base));
    }
    crate::logger::log_info(&format!("🌴 Spawned {} trees on the island", TREE_COUNT));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_peaks_at_center() {
        assert_eq!(surface_height(0.0, 0.0), CONE_HEIGHT);
    }

    #[test]
    fn surface_reaches_zero_at_shore() {
        let h = surface_height(ISLAND_RADIUS, 0.0);
        assert!(h.abs() < 1e-5);
    }

    #[test]
    fn surface_clamped_outside_island() {
        assert_eq!(surface_height(ISLAND_RADIUS * 2.0, 0.0), 0.0);
        assert_eq!(surface_height(0.0, -ISLAND_RADIUS * 3.0), 0.0);
    }

    #[test]
    fn surface_linear_on_slope() {
        // На половине радиуса — половина высоты
        let half = ISLAND_RADIUS * 0.5;
        let h = surface_height(half, 0.0);
        assert!((h - CONE_HEIGHT * 0.5).abs() < 1e-4);
    }

    #[test]
    fn village_anchors_sit_on_slope() {
        for village in VillageId::ALL {
            let anchor = village.anchor();
            let slope = surface_height(anchor.x, anchor.z);
            assert!((anchor.y - slope - 1.0).abs() < 1e-4);
            let dist = (anchor.x * anchor.x + anchor.z * anchor.z).sqrt();
            assert!((dist - VILLAGE_DISTANCE).abs() < 1e-3);
        }
    }

    #[test]
    fn waypoints_climb_toward_summit() {
        for village in VillageId::ALL {
            let wp0 = village.waypoint_target(0);
            let wp1 = village.waypoint_target(1);
            let wp2 = village.waypoint_target(2);
            assert!(wp1.y > wp0.y);
            assert_eq!(wp2, SUMMIT);
        }
    }
}
