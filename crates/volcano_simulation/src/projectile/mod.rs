//! Жизненный цикл снаряда: выстрел → полёт → ровно один терминальный путь
//! (взрыв / вода / за границами / застывание).

mod components;
mod systems;

pub use components::*;
pub use systems::*;
