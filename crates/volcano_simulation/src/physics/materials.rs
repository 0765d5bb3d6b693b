//! Таблица контактных материалов.
//!
//! Отскоков в игре нет вообще: restitution 0.0 для всех пар. Трение
//! асимметричное — лава "прилипает" к террейну, жители скользят по лаве.

use bevy_rapier3d::prelude::*;

pub const CONTACT_RESTITUTION: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Lava,
    Volcano,
    Ground,
    Tree,
    Agent,
}

/// Коэффициент трения для пары поверхностей (симметричен)
pub fn contact_friction(a: SurfaceKind, b: SurfaceKind) -> f32 {
    use SurfaceKind::*;
    match (a, b) {
        // Горячая лава практически сразу встаёт на террейне
        (Lava, Volcano) | (Volcano, Lava) => 50.0,
        (Lava, Ground) | (Ground, Lava) => 50.0,
        (Lava, Tree) | (Tree, Lava) => 50.0,
        // Жители скользят по лаве, но держатся за склон
        (Agent, Lava) | (Lava, Agent) => 0.3,
        (Agent, Volcano) | (Volcano, Agent) => 0.5,
        (Agent, Ground) | (Ground, Agent) => 0.5,
        _ => 0.5,
    }
}

impl SurfaceKind {
    pub fn friction_vs_lava(self) -> f32 {
        contact_friction(self, SurfaceKind::Lava)
    }
}

// Membership/filter группы для rapier-коллайдеров
pub const GROUP_TERRAIN: Group = Group::GROUP_1;
pub const GROUP_LAVA: Group = Group::GROUP_2;
pub const GROUP_AGENT: Group = Group::GROUP_3;

pub fn lava_collision_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_LAVA, GROUP_TERRAIN | GROUP_LAVA | GROUP_AGENT)
}

pub fn agent_collision_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_AGENT, GROUP_TERRAIN | GROUP_LAVA)
}

pub fn terrain_collision_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_TERRAIN, GROUP_LAVA | GROUP_AGENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SurfaceKind::*;

    #[test]
    fn friction_is_symmetric() {
        for a in [Lava, Volcano, Ground, Tree, Agent] {
            for b in [Lava, Volcano, Ground, Tree, Agent] {
                assert_eq!(contact_friction(a, b), contact_friction(b, a));
            }
        }
    }

    #[test]
    fn lava_grips_terrain_agents_slide() {
        assert_eq!(contact_friction(Lava, Volcano), 50.0);
        assert_eq!(contact_friction(Agent, Lava), 0.3);
        assert_eq!(contact_friction(Agent, Volcano), 0.5);
    }
}
