//! Общий путь урона жителям и уборка мёртвых.

use bevy::prelude::*;

use crate::agent::components::*;
use crate::events::VisualEffect;
use crate::session::SessionState;

/// Наносит урон живому жителю. Вызывающий обязан отфильтровать мёртвых
/// (`health.is_alive()` / `Without<Dead>`), иначе счётчик убийств не сойдётся.
///
/// Летальный исход: +1 к счётчику, эффекты смерти, маркер `Dead`
/// (физически entity убирает `despawn_dead` в конце тика).
/// Возвращает true, если житель погиб от этого урона.
pub fn damage_villager(
    commands: &mut Commands,
    state: &mut SessionState,
    effects: &mut EventWriter<VisualEffect>,
    entity: Entity,
    health: &mut Health,
    position: Vec3,
    amount: u32,
) -> bool {
    health.take_damage(amount);
    commands.entity(entity).insert(DamageFlash::new());
    if health.is_alive() {
        return false;
    }

    state.kill_count += 1;
    effects.write(VisualEffect::BlackSmoke { position });
    effects.write(VisualEffect::Embers { position });
    commands.entity(entity).insert(Dead);
    crate::logger::log(&format!("💀 Villager down, kills: {}", state.kill_count));
    true
}

/// System: countdown подсветки попадания
pub fn tick_damage_flash(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut flashes: Query<(Entity, &mut DamageFlash)>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<DamageFlash>();
        }
    }
}

/// System: убирает помеченных мёртвыми в конце тика
pub fn despawn_dead(mut commands: Commands, dead: Query<Entity, (With<Dead>, With<Villager>)>) {
    for entity in dead.iter() {
        commands.entity(entity).despawn();
    }
}
