//! Компоненты жителей.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::terrain::VillageId;

pub const VILLAGER_HEIGHT: f32 = 1.5;
pub const VILLAGER_RADIUS: f32 = 0.4;
/// Princess и brute крупнее обычных жителей
pub const GIANT_SCALE: f32 = 3.0;

/// Базовая скорость ходьбы; марш идёт с форсажем ×1.5
pub const BASE_SPEED: f32 = 1.5;
pub const MARCH_SPEED: f32 = BASE_SPEED * 1.5;

/// Горизонтальная дистанция засчитывания waypoint-а
pub const WAYPOINT_RADIUS: f32 = 1.5;
/// Ближе этой дистанции к цели житель тормозит, а не дёргается
pub const ARRIVE_RADIUS: f32 = 0.5;
/// Затухание скорости при остановке, множитель за тик
pub const IDLE_DAMPING: f32 = 0.5;

pub const TREE_AVOID_RADIUS: f32 = 3.0;
pub const TREE_AVOID_STRENGTH: f32 = 2.0;

/// Обычные жители идут только рядом с живой принцессой своей деревни
pub const ESCORT_RADIUS: f32 = 5.0;

/// Жители "парят" над склоном на фиксированной высоте
pub const SURFACE_STANDOFF: f32 = 5.0;

pub const RITUAL_DURATION: f32 = 3.0;
pub const RITUAL_BOB_HZ: f32 = 2.0;
pub const RITUAL_BOB_AMPLITUDE: f32 = 0.5;
pub const RITUAL_SPIN_SPEED: f32 = 0.5;

pub const DAMAGE_FLASH_DURATION: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum VillagerRole {
    Normal,
    /// Ведёт группу; её ритуал на вершине — поражение вулкана
    Princess,
    /// Толстый: вдвое больше здоровья
    Brute,
}

impl VillagerRole {
    pub fn max_health(self) -> u32 {
        match self {
            VillagerRole::Brute => 4,
            VillagerRole::Normal | VillagerRole::Princess => 2,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            VillagerRole::Normal => 1.0,
            VillagerRole::Princess | VillagerRole::Brute => GIANT_SCALE,
        }
    }

    pub fn is_princess(self) -> bool {
        matches!(self, VillagerRole::Princess)
    }
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Villager {
    pub role: VillagerRole,
    pub village: VillageId,
}

impl Default for Villager {
    fn default() -> Self {
        Self {
            role: VillagerRole::Normal,
            village: VillageId::East,
        }
    }
}

/// Фаза жизни агента. Waypoint монотонен: 0 → 1 → 2, назад не бывает.
/// `Ritual` достижим только из `Walking { waypoint: 2 }`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub enum AgentPhase {
    Walking { waypoint: u8 },
    Ritual { elapsed: f32, start_y: f32 },
    /// Не-принцесса дотянула ритуальный таймер: замирает у кальдеры,
    /// остаётся убиваемой
    Lingering,
}

impl Default for AgentPhase {
    fn default() -> Self {
        AgentPhase::Walking { waypoint: 0 }
    }
}

impl AgentPhase {
    pub fn waypoint(&self) -> Option<u8> {
        match self {
            AgentPhase::Walking { waypoint } => Some(*waypoint),
            _ => None,
        }
    }

    pub fn is_ritual(&self) -> bool {
        matches!(self, AgentPhase::Ritual { .. })
    }
}

/// Цвет индикатора здоровья для внешнего UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthIndicator {
    Green,
    Yellow,
    Red,
}

/// Здоровье в целых хитах. Урон насыщающий, лечения в игре нет.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn indicator(&self) -> HealthIndicator {
        let ratio = self.ratio();
        if ratio > 0.6 {
            HealthIndicator::Green
        } else if ratio > 0.3 {
            HealthIndicator::Yellow
        } else {
            HealthIndicator::Red
        }
    }
}

/// Маркер смерти. Ставится в момент летального урона, убирается вместе
/// с entity системой `despawn_dead` в конце тика — сами боевые системы
/// entity не удаляют.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Countdown подсветки попадания. Повторное попадание перезаводит таймер
/// (insert заменяет компонент).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DamageFlash {
    pub remaining: f32,
}

impl DamageFlash {
    pub fn new() -> Self {
        Self {
            remaining: DAMAGE_FLASH_DURATION,
        }
    }
}

impl Default for DamageFlash {
    fn default() -> Self {
        Self::new()
    }
}
