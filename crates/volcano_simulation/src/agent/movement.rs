//! Марш жителей по waypoint-ам.
//!
//! Всё движение горизонтальное: Y жёстко прижат к `surface + standoff`,
//! скорость — прямое задание, без сил.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::agent::components::*;
use crate::session::SessionState;
use crate::terrain::{surface_height, Tree, VillageId, WIN_HEIGHT};

/// Прогресс подъёма: 0 у деревни, 1 на победной высоте. Чистая функция,
/// ratchet (невозврат) обеспечивает вызывающая система.
pub fn elevation_progress(y: f32, village: VillageId) -> f32 {
    let base = village.anchor().y;
    ((y - base) / (WIN_HEIGHT - base)).clamp(0.0, 1.0)
}

/// System: движение идущих жителей.
///
/// Гейт эскорта: обычный житель двигается, только если в пределах
/// ESCORT_RADIUS есть живая принцесса ЕГО деревни; иначе тормозит на месте.
/// Принцессы идут всегда. Waypoint засчитывается по XZ-дистанции
/// и только вперёд.
pub fn update_villager_movement(
    time: Res<Time<Fixed>>,
    mut state: ResMut<SessionState>,
    trees: Query<&Tree>,
    mut agents: Query<
        (&Villager, &mut AgentPhase, &mut Velocity, &mut Transform),
        Without<Dead>,
    >,
) {
    let dt = time.delta_secs();

    // Живые принцессы (включая ритуальных) — для escort-гейта
    let princesses: Vec<(VillageId, Vec3)> = agents
        .iter()
        .filter(|(villager, ..)| villager.role.is_princess())
        .map(|(villager, _, _, transform)| (villager.village, transform.translation))
        .collect();

    for (villager, mut phase, mut velocity, mut transform) in agents.iter_mut() {
        let AgentPhase::Walking { waypoint } = *phase else {
            continue; // ритуал и lingering — в системе ритуала
        };

        let pos = transform.translation;
        let target = villager.village.waypoint_target(waypoint);
        let to_target = Vec2::new(target.x - pos.x, target.z - pos.z);
        let dist_xz = to_target.length();

        // Засчитываем waypoint, цель обновится на следующем тике
        if dist_xz < WAYPOINT_RADIUS && waypoint < 2 {
            *phase = AgentPhase::Walking {
                waypoint: waypoint + 1,
            };
        }

        let escorted = villager.role.is_princess()
            || princesses.iter().any(|(home, p)| {
                *home == villager.village && p.distance(pos) < ESCORT_RADIUS
            });

        if escorted && dist_xz > ARRIVE_RADIUS {
            let mut direction = to_target.normalize_or_zero();
            direction += tree_repulsion(pos, &trees);
            direction = direction.normalize_or_zero();
            velocity.linvel.x = direction.x * MARCH_SPEED;
            velocity.linvel.z = direction.y * MARCH_SPEED;
        } else {
            velocity.linvel.x *= IDLE_DAMPING;
            velocity.linvel.z *= IDLE_DAMPING;
        }
        velocity.linvel.y = 0.0;

        transform.translation.x += velocity.linvel.x * dt;
        transform.translation.z += velocity.linvel.z * dt;
        transform.translation.y =
            surface_height(transform.translation.x, transform.translation.z) + SURFACE_STANDOFF;

        // Ratchet: рекорд подъёма не убывает
        let progress = elevation_progress(transform.translation.y, villager.village);
        if progress > state.highest_elevation {
            state.highest_elevation = progress;
        }
    }
}

/// Суммарное отталкивание от стволов в радиусе обхода. Сила линейно
/// спадает от ствола к краю радиуса.
fn tree_repulsion(pos: Vec3, trees: &Query<&Tree>) -> Vec2 {
    let mut repulsion = Vec2::ZERO;
    for tree in trees.iter() {
        let away = Vec2::new(pos.x - tree.base.x, pos.z - tree.base.z);
        let dist = away.length();
        if dist < TREE_AVOID_RADIUS && dist > f32::EPSILON {
            let strength = (1.0 - dist / TREE_AVOID_RADIUS) * TREE_AVOID_STRENGTH;
            repulsion += away / dist * strength;
        }
    }
    repulsion
}
