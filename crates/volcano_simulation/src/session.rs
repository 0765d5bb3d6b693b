//! Состояние игровой сессии и входные intents.
//!
//! Никаких ambient-глобалов: всё сессионное — lava reserve, счётчики,
//! выбранное оружие, флаги паузы/конца — живёт в одном ресурсе с явным
//! `reset()` для рестарта.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Типы извержений. Closed enum: UI циклится по `CYCLE`, стоимость и
/// параметры снарядов матчатся исчерпывающе.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Boulder,
    Spray,
    Bomb,
}

impl WeaponKind {
    /// Порядок переключения колесом/клавишами
    pub const CYCLE: [WeaponKind; 3] = [WeaponKind::Bomb, WeaponKind::Boulder, WeaponKind::Spray];

    /// Стоимость выстрела в единицах лавы. Бомба привязана к капу,
    /// а не к абсолюту: всегда половина максимума.
    pub fn cost(self, lava_max: f32) -> f32 {
        match self {
            WeaponKind::Boulder => 10.0,
            WeaponKind::Spray => 5.0,
            WeaponKind::Bomb => lava_max * 0.5,
        }
    }

    /// Следующее оружие в цикле; direction ±1, wrap в обе стороны
    pub fn cycled(self, direction: i8) -> WeaponKind {
        let cycle = Self::CYCLE;
        let current = cycle.iter().position(|w| *w == self).unwrap_or(0) as i32;
        let len = cycle.len() as i32;
        let next = (current + direction as i32).rem_euclid(len);
        cycle[next as usize]
    }
}

/// Минимальный интервал между выстрелами, сек
pub const FIRE_INTERVAL: f32 = 0.2;

pub const LAVA_MAX: f32 = 100.0;
pub const LAVA_REGEN_PER_SECOND: f32 = 10.0;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub lava_amount: f32,
    pub lava_max: f32,
    pub lava_regen_rate: f32,
    pub kill_count: u32,
    /// High-water mark прогресса жителей к вершине, [0, 1], не убывает
    pub highest_elevation: f32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub weapon: WeaponKind,
    /// Оставшийся cooldown выстрела, сек (countdown, не wall clock)
    pub fire_cooldown: f32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            lava_amount: LAVA_MAX,
            lava_max: LAVA_MAX,
            lava_regen_rate: LAVA_REGEN_PER_SECOND,
            kill_count: 0,
            highest_elevation: 0.0,
            started: false,
            paused: false,
            game_over: false,
            weapon: WeaponKind::default(),
            fire_cooldown: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    /// Сброс сессионных счётчиков. Для полного рестарта (включая таймеры
    /// волн) — `crate::reset_session`; мир чистится снаружи.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.lava_amount >= cost
    }

    pub fn lava_ratio(&self) -> f32 {
        (self.lava_amount / self.lava_max).clamp(0.0, 1.0)
    }
}

/// Intents от внешнего input-слоя. Камера — внешний коллаборатор:
/// каждый кадр она кладёт сюда точку и направление прицеливания.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub fire: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fly_forward: bool,
    pub fly_backward: bool,
    pub fly_left: bool,
    pub fly_right: bool,
    /// ±1 на один тик, потребляется системой переключения
    pub cycle_weapon: i8,
    pub aim_origin: Vec3,
    pub aim_direction: Vec3,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            fire: false,
            rotate_left: false,
            rotate_right: false,
            fly_forward: false,
            fly_backward: false,
            fly_left: false,
            fly_right: false,
            cycle_weapon: 0,
            aim_origin: Vec3::ZERO,
            aim_direction: Vec3::NEG_Z,
        }
    }
}

// Run conditions для FixedUpdate-систем

/// Физика/снаряды/экономика работают всегда, кроме паузы
pub fn simulation_running(state: Res<SessionState>) -> bool {
    !state.paused
}

/// Агенты живут после старта сессии (и после game over тоже — мир не
/// замирает, замирают только спавн и выстрелы)
pub fn session_started(state: Res<SessionState>) -> bool {
    state.started && !state.paused
}

/// Спавн волн и выстрелы — только в активной игре
pub fn game_active(state: Res<SessionState>) -> bool {
    state.started && !state.paused && !state.game_over
}
