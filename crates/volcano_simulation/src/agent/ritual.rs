//! Ритуал у кальдеры: условие поражения вулкана.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use std::f32::consts::TAU;

use crate::agent::components::*;
use crate::events::{GameOverEvent, VisualEffect};
use crate::session::SessionState;
use crate::terrain::{CALDERA_RADIUS, RITUAL_MIN_HEIGHT};

/// Ритуал стартует ближе полутора радиусов кальдеры к оси вулкана
pub const RITUAL_TRIGGER_RADIUS: f32 = CALDERA_RADIUS * 1.5;

/// System: запуск и прокрутка ритуала.
///
/// Житель на последнем waypoint-е, дошедший до кальдеры выше минимальной
/// высоты, встаёт в ритуал: подпрыгивает синусом вокруг стартовой высоты
/// и крутится. Через 3 секунды принцесса завершает ритуал — единственный
/// game over за сессию; не-принцесса просто замирает (Lingering).
pub fn update_rituals(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut state: ResMut<SessionState>,
    mut effects: EventWriter<VisualEffect>,
    mut game_over: EventWriter<GameOverEvent>,
    mut agents: Query<
        (Entity, &Villager, &mut AgentPhase, &mut Velocity, &mut Transform),
        Without<Dead>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, villager, mut phase, mut velocity, mut transform) in agents.iter_mut() {
        match &mut *phase {
            AgentPhase::Walking { waypoint: 2 } => {
                let pos = transform.translation;
                let dist_from_axis = (pos.x * pos.x + pos.z * pos.z).sqrt();
                if dist_from_axis < RITUAL_TRIGGER_RADIUS && pos.y >= RITUAL_MIN_HEIGHT {
                    velocity.linvel = Vec3::ZERO;
                    *phase = AgentPhase::Ritual {
                        elapsed: 0.0,
                        start_y: pos.y,
                    };
                    crate::logger::log(&format!(
                        "🕯️ {:?} villager began the ritual at the caldera",
                        villager.role
                    ));
                }
            }
            AgentPhase::Ritual { elapsed, start_y } => {
                *elapsed += dt;
                velocity.linvel = Vec3::ZERO;
                let bob = (*elapsed * RITUAL_BOB_HZ * TAU).sin() * RITUAL_BOB_AMPLITUDE;
                transform.translation.y = *start_y + bob;
                transform.rotation = Quat::from_rotation_y(*elapsed * RITUAL_SPIN_SPEED);

                if *elapsed >= RITUAL_DURATION {
                    if villager.role.is_princess() {
                        if !state.game_over {
                            state.game_over = true;
                            effects.write(VisualEffect::RedExplosion {
                                position: transform.translation,
                            });
                            game_over.write(GameOverEvent {
                                kills: state.kill_count,
                            });
                            crate::logger::log_info(
                                "👑 The princess completed the ritual — the volcano falls",
                            );
                        }
                        commands.entity(entity).despawn();
                    } else {
                        *phase = AgentPhase::Lingering;
                    }
                }
            }
            AgentPhase::Lingering => {
                velocity.linvel = Vec3::ZERO;
            }
            AgentPhase::Walking { .. } => {}
        }
    }
}
