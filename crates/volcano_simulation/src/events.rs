//! События наружу: узкий интерфейс для рендера/UI.
//!
//! Симуляция шлёт только "что и где произошло"; partикли, звук и камера —
//! забота подписчиков. Transforms и счётчики читаются напрямую из ECS.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum VisualEffect {
    /// Снаряд ушёл в воду
    Steam { position: Vec3 },
    /// Снаряд застыл на поверхности
    ImpactBurst { position: Vec3 },
    /// Дымный след горячего снаряда в полёте
    LavaSmoke { position: Vec3 },
    /// Смерть жителя
    BlackSmoke { position: Vec3 },
    Embers { position: Vec3 },
    /// Дерево уничтожено взрывом
    WoodSplinters { position: Vec3 },
    BombBlast { position: Vec3 },
    /// Принцесса завершила ритуал
    RedExplosion { position: Vec3 },
}

impl VisualEffect {
    pub fn position(&self) -> Vec3 {
        match *self {
            VisualEffect::Steam { position }
            | VisualEffect::ImpactBurst { position }
            | VisualEffect::LavaSmoke { position }
            | VisualEffect::BlackSmoke { position }
            | VisualEffect::Embers { position }
            | VisualEffect::WoodSplinters { position }
            | VisualEffect::BombBlast { position }
            | VisualEffect::RedExplosion { position } => position,
        }
    }
}

/// Жители победили. Ровно один на сессию.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOverEvent {
    pub kills: u32,
}
