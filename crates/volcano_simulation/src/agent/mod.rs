//! Жители: state machine марша к вершине, ритуал, урон и смерть.
//!
//! Организация по подсистемам:
//! - components: роли, здоровье, фазы, маркеры
//! - spawn: волны из деревень
//! - movement: марш по waypoint-ам с escort-гейтом и обходом деревьев
//! - ritual: бой у кальдеры и условие поражения
//! - damage: общий путь урона, flash, уборка мёртвых

mod components;
mod damage;
mod movement;
mod ritual;
mod spawn;

pub use components::*;
pub use damage::*;
pub use movement::*;
pub use ritual::*;
pub use spawn::*;
