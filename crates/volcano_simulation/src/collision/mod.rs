//! Resolver попаданий: горячие снаряды против препятствий и жителей.
//!
//! Работает после шага баллистики и до движения агентов. Сам никого не
//! удаляет: близость к препятствию/жителю только взводит transient-флаг,
//! терминальный путь выбирает retirement в этом же тике.

use bevy::prelude::*;

use crate::agent::{damage_villager, Dead, Health, Villager};
use crate::events::VisualEffect;
use crate::projectile::{Projectile, SolidifiedLava};
use crate::session::SessionState;
use crate::terrain::Tree;

/// Дистанция попадания снаряда в ствол дерева (до центра ствола)
pub const TREE_HIT_RADIUS: f32 = 2.0;
/// Дистанция попадания в застывшую лаву
pub const SOLID_LAVA_HIT_RADIUS: f32 = 1.5;
/// Дистанция прямого попадания в жителя
pub const AGENT_HIT_RADIUS: f32 = 2.0;
pub const DIRECT_HIT_DAMAGE: u32 = 1;

/// System: проверка близости для каждого горячего снаряда.
///
/// Попадание в жителя: 1 урон первому живому в радиусе, не больше одного
/// жителя на снаряд за тик; снаряд при этом форсированно застывает
/// (бомбе флаг вместо этого даёт детонацию — приоритет взрыва решает
/// retirement).
pub fn resolve_hot_projectiles(
    mut commands: Commands,
    mut state: ResMut<SessionState>,
    mut effects: EventWriter<VisualEffect>,
    mut projectiles: Query<(&mut Projectile, &Transform)>,
    trees: Query<&Transform, With<Tree>>,
    solids: Query<&Transform, With<SolidifiedLava>>,
    mut agents: Query<(Entity, &mut Health, &Transform), (With<Villager>, Without<Dead>)>,
) {
    for (mut projectile, transform) in projectiles.iter_mut() {
        if !projectile.is_hot {
            continue;
        }
        let pos = transform.translation;

        let near_tree = trees
            .iter()
            .any(|tree| tree.translation.distance(pos) < TREE_HIT_RADIUS);
        let near_solid = near_tree
            || solids
                .iter()
                .any(|solid| solid.translation.distance(pos) < SOLID_LAVA_HIT_RADIUS);
        if near_solid {
            projectile.near_obstacle = true;
        }

        for (entity, mut health, agent_transform) in agents.iter_mut() {
            if !health.is_alive() {
                continue;
            }
            if pos.distance(agent_transform.translation) < AGENT_HIT_RADIUS {
                damage_villager(
                    &mut commands,
                    &mut state,
                    &mut effects,
                    entity,
                    &mut health,
                    agent_transform.translation,
                    DIRECT_HIT_DAMAGE,
                );
                projectile.near_obstacle = true;
                break; // максимум один житель на снаряд за тик
            }
        }
    }
}
