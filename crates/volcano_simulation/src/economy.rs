//! Экономика лавы: регенерация, cooldown выстрела, переключение оружия.

use bevy::prelude::*;

use crate::session::{PlayerInput, SessionState};

/// System: +regen_rate лавы в симулированную секунду, кап сверху.
/// Инвариант: 0 <= lava_amount <= lava_max всегда.
pub fn regenerate_lava(time: Res<Time<Fixed>>, mut state: ResMut<SessionState>) {
    let dt = time.delta_secs();
    state.lava_amount = (state.lava_amount + state.lava_regen_rate * dt).min(state.lava_max);
}

/// System: countdown до следующего разрешённого выстрела
pub fn tick_fire_cooldown(time: Res<Time<Fixed>>, mut state: ResMut<SessionState>) {
    let dt = time.delta_secs();
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
}

/// System: потребляет intent переключения оружия (wrap в обе стороны)
pub fn process_weapon_cycle(mut input: ResMut<PlayerInput>, mut state: ResMut<SessionState>) {
    if input.cycle_weapon == 0 {
        return;
    }
    let direction = input.cycle_weapon;
    input.cycle_weapon = 0;
    state.weapon = state.weapon.cycled(direction);
    crate::logger::log(&format!("Weapon selected: {:?}", state.weapon));
}
