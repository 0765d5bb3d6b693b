//! Физика снарядов: собственная интеграция скорости + rapier-компоненты
//! как контракт коллизий для tactical layer.
//!
//! Контакты с террейном не приходят callback-ами: `step_ballistics` пишет
//! пары в `ContactLog`, потребители читают лог синхронно в том же тике.

mod ballistics;
mod materials;

pub use ballistics::*;
pub use materials::*;
