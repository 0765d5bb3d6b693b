//! Волны жителей из деревень.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::agent::components::*;
use crate::physics::{agent_collision_groups, contact_friction, SurfaceKind, CONTACT_RESTITUTION};
use crate::terrain::{surface_height, VillageId, WIN_HEIGHT};
use crate::DeterministicRng;

/// Интервал между волнами одной деревни, сек
pub const SPAWN_INTERVAL: f32 = 10.0;
pub const GROUP_MIN: u32 = 3;
pub const GROUP_MAX: u32 = 5;
/// Шанс того, что не-принцесса окажется brute-ом
pub const BRUTE_CHANCE: f32 = 0.3;
/// Шаг построения группы в шеренгу
pub const GROUP_SPACING: f32 = 0.8;
pub const SPAWN_HEIGHT_OFFSET: f32 = 3.0;

/// Аккумуляторы времени с последней волны, по деревне.
/// Стартуют заполненными: первая волна уходит сразу после начала игры.
#[derive(Resource, Debug)]
pub struct SpawnTimers {
    pub accumulated: [f32; 2],
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            accumulated: [SPAWN_INTERVAL; 2],
        }
    }
}

pub fn villager_bundle(role: VillagerRole, village: VillageId, position: Vec3) -> impl Bundle {
    // Коллайдер базового размера, масштаб роли несёт Transform
    (
        Villager { role, village },
        Health::new(role.max_health()),
        AgentPhase::Walking { waypoint: 0 },
        Transform::from_translation(position).with_scale(Vec3::splat(role.scale())),
        RigidBody::KinematicPositionBased,
        Collider::cylinder(VILLAGER_HEIGHT * 0.5, VILLAGER_RADIUS),
        Velocity::default(),
        LockedAxes::ROTATION_LOCKED,
        Friction::coefficient(contact_friction(SurfaceKind::Agent, SurfaceKind::Volcano)),
        Restitution::coefficient(CONTACT_RESTITUTION),
        agent_collision_groups(),
    )
}

/// System: каждые SPAWN_INTERVAL секунд деревня выпускает группу 3–5.
/// Средний в шеренге — принцесса, остальные с шансом 30% brute.
pub fn spawn_villager_waves(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut timers: ResMut<SpawnTimers>,
    mut rng: ResMut<DeterministicRng>,
) {
    let dt = time.delta_secs();
    for village in VillageId::ALL {
        let slot = &mut timers.accumulated[village.index()];
        *slot += dt;
        if *slot < SPAWN_INTERVAL {
            continue;
        }
        *slot = 0.0;
        spawn_group(&mut commands, &mut rng, village);
    }
}

pub fn spawn_group(commands: &mut Commands, rng: &mut DeterministicRng, village: VillageId) {
    let anchor = village.anchor();
    let group_size = rng.rng.gen_range(GROUP_MIN..=GROUP_MAX);
    let middle = group_size / 2;

    for i in 0..group_size {
        let role = if i == middle {
            VillagerRole::Princess
        } else if rng.rng.gen::<f32>() < BRUTE_CHANCE {
            VillagerRole::Brute
        } else {
            VillagerRole::Normal
        };

        let offset = (i as f32 - middle as f32) * GROUP_SPACING;
        let x = anchor.x + offset;
        let z = anchor.z;
        let mut y = surface_height(x, z) + SPAWN_HEIGHT_OFFSET;
        // Деревня не может заспавнить жителя уже на победной высоте
        if y >= WIN_HEIGHT {
            y = WIN_HEIGHT - 5.0;
        }
        commands.spawn(villager_bundle(role, village, Vec3::new(x, y, z)));
    }

    crate::logger::log_info(&format!(
        "🏘️ Village {:?} sent a group of {}",
        village, group_size
    ));
}
