//! Системы жизненного цикла снарядов.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::agent::{damage_villager, Dead, Health, Villager};
use crate::events::VisualEffect;
use crate::physics::{
    lava_collision_groups, terrain_collision_groups, BallisticBody, ContactLog, SurfaceKind,
    CONTACT_RESTITUTION,
};
use crate::projectile::components::*;
use crate::session::{PlayerInput, SessionState, WeaponKind, FIRE_INTERVAL};
use crate::terrain::{
    surface_height, Tree, ISLAND_RADIUS, LOWER_BOUND_Y, UPPER_BOUND_Y, WATER_LEVEL,
};
use crate::DeterministicRng;

/// Полный набор компонентов летящего снаряда. Rapier-часть — контракт
/// коллизий для внешнего слоя, движет тело собственная баллистика.
pub fn projectile_bundle(kind: ProjectileKind, position: Vec3, velocity: Vec3) -> impl Bundle {
    (
        Projectile::new(kind),
        Transform::from_translation(position),
        BallisticBody {
            velocity,
            damping: kind.damping(),
            radius: kind.radius(),
        },
        RigidBody::Dynamic,
        Collider::ball(kind.radius()),
        ColliderMassProperties::Mass(kind.mass()),
        Velocity {
            linvel: velocity,
            ..default()
        },
        Damping {
            linear_damping: kind.damping(),
            angular_damping: kind.damping(),
        },
        Friction::coefficient(SurfaceKind::Volcano.friction_vs_lava()),
        Restitution::coefficient(CONTACT_RESTITUTION),
        lava_collision_groups(),
    )
}

/// System: intent выстрела → снаряды.
///
/// Отказ всегда молчаливый no-op: активный cooldown, нулевое направление
/// или нехватка лавы не меняют состояние и ничего не спавнят.
pub fn process_fire_intents(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut state: ResMut<SessionState>,
    mut rng: ResMut<DeterministicRng>,
) {
    if !input.fire || state.fire_cooldown > 0.0 {
        return;
    }
    let direction = input.aim_direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }
    let cost = state.weapon.cost(state.lava_max);
    if !state.can_afford(cost) {
        return;
    }
    state.lava_amount -= cost;
    state.fire_cooldown = FIRE_INTERVAL;

    let origin = input.aim_origin + direction * MUZZLE_OFFSET;
    let velocity = Vec3::new(
        direction.x * LAUNCH_POWER,
        direction.y * LAUNCH_POWER * LAUNCH_VERTICAL_FACTOR,
        direction.z * LAUNCH_POWER,
    );

    match state.weapon {
        WeaponKind::Boulder => {
            commands.spawn(projectile_bundle(ProjectileKind::Boulder, origin, velocity));
        }
        WeaponKind::Bomb => {
            commands.spawn(projectile_bundle(ProjectileKind::Bomb, origin, velocity));
        }
        WeaponKind::Spray => {
            for _ in 0..SPRAY_DROPLETS {
                let jitter = Vec3::new(
                    (rng.rng.gen::<f32>() - 0.5) * 2.0 * SPRAY_JITTER_LATERAL,
                    (rng.rng.gen::<f32>() - 0.5) * 2.0 * SPRAY_JITTER_VERTICAL,
                    (rng.rng.gen::<f32>() - 0.5) * 2.0 * SPRAY_JITTER_LATERAL,
                );
                commands.spawn(projectile_bundle(
                    ProjectileKind::SprayDroplet,
                    origin,
                    velocity + jitter,
                ));
            }
        }
    }
    crate::logger::log(&format!(
        "🌋 Fired {:?}, lava {:.1}/{:.1}",
        state.weapon, state.lava_amount, state.lava_max
    ));
}

/// System: переносит контакты этого тика из ContactLog в снаряды
pub fn apply_contacts(log: Res<ContactLog>, mut projectiles: Query<&mut Projectile>) {
    for pair in &log.pairs {
        let Ok(mut projectile) = projectiles.get_mut(pair.body) else {
            continue;
        };
        projectile.has_collided = true;
    }
}

/// System: возраст + дымный след. Здесь же сбрасывается transient-флаг
/// resolver-а с прошлого тика.
pub fn age_projectiles(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<VisualEffect>,
    mut projectiles: Query<(&mut Projectile, &Transform)>,
) {
    let dt = time.delta_secs();
    for (mut projectile, transform) in projectiles.iter_mut() {
        projectile.age += dt;
        projectile.near_obstacle = false;
        if projectile.is_hot && rng.rng.gen::<f32>() < SMOKE_TRAIL_CHANCE {
            effects.write(VisualEffect::LavaSmoke {
                position: transform.translation,
            });
        }
    }
}

/// System: терминальные пути снаряда. Ровно один путь за тик на снаряд,
/// приоритет фиксированный: взрыв → вода → за границами → застывание.
pub fn retire_projectiles(
    mut commands: Commands,
    mut state: ResMut<SessionState>,
    mut effects: EventWriter<VisualEffect>,
    projectiles: Query<(Entity, &Projectile, &BallisticBody, &Transform)>,
    mut agents: Query<(Entity, &mut Health, &Transform), (With<Villager>, Without<Dead>, Without<Projectile>)>,
    trees: Query<(Entity, &Tree), Without<Projectile>>,
) {
    for (entity, projectile, body, transform) in projectiles.iter() {
        let pos = transform.translation;

        // Бомба детонирует от первого касания или близости к цели
        if projectile.kind == ProjectileKind::Bomb
            && (projectile.has_collided || projectile.near_obstacle)
        {
            explode_bomb(&mut commands, &mut state, &mut effects, entity, pos, &mut agents, &trees);
            continue;
        }

        // Вода: за пределами острова и ниже уровня океана
        let dist = (pos.x * pos.x + pos.z * pos.z).sqrt();
        if dist > ISLAND_RADIUS && pos.y <= WATER_LEVEL {
            effects.write(VisualEffect::Steam { position: pos });
            commands.entity(entity).despawn();
            continue;
        }

        // За вертикальными границами мира — тихо убираем
        if pos.y < LOWER_BOUND_Y || pos.y > UPPER_BOUND_Y {
            commands.entity(entity).despawn();
            continue;
        }

        let settled = body.velocity.length() < REST_SPEED
            && projectile.has_collided
            && projectile.age > SETTLE_AGE;
        if settled || projectile.age > MAX_LIFETIME || projectile.near_obstacle {
            solidify(&mut commands, &mut effects, entity, projectile, pos);
        }
    }
}

/// Снаряд застывает: динамическое тело умирает, на его месте — постоянный
/// статичный рельеф на поверхности конуса.
fn solidify(
    commands: &mut Commands,
    effects: &mut EventWriter<VisualEffect>,
    entity: Entity,
    projectile: &Projectile,
    pos: Vec3,
) {
    let radius = projectile.kind.radius();
    let rest = Vec3::new(pos.x, surface_height(pos.x, pos.z) + radius, pos.z);
    if !projectile.near_obstacle {
        effects.write(VisualEffect::ImpactBurst { position: rest });
    }
    commands.entity(entity).despawn();
    commands.spawn((
        SolidifiedLava { radius },
        Transform::from_translation(rest),
        RigidBody::Fixed,
        Collider::ball(radius),
        Friction::coefficient(SurfaceKind::Tree.friction_vs_lava()),
        Restitution::coefficient(CONTACT_RESTITUTION),
        terrain_collision_groups(),
    ));
}

/// Взрыв бомбы: плоские 2 урона всем живым в радиусе, деревья в радиусе
/// уничтожаются. Бомба не оставляет застывшего остатка.
fn explode_bomb(
    commands: &mut Commands,
    state: &mut SessionState,
    effects: &mut EventWriter<VisualEffect>,
    bomb: Entity,
    pos: Vec3,
    agents: &mut Query<(Entity, &mut Health, &Transform), (With<Villager>, Without<Dead>, Without<Projectile>)>,
    trees: &Query<(Entity, &Tree), Without<Projectile>>,
) {
    effects.write(VisualEffect::BombBlast { position: pos });
    commands.entity(bomb).despawn();

    for (tree_entity, tree) in trees.iter() {
        if pos.distance(tree.base) < BLAST_RADIUS {
            effects.write(VisualEffect::WoodSplinters {
                position: tree.base,
            });
            commands.entity(tree_entity).despawn();
        }
    }

    for (agent, mut health, transform) in agents.iter_mut() {
        if !health.is_alive() {
            continue;
        }
        if pos.distance(transform.translation) < BLAST_RADIUS {
            damage_villager(
                commands,
                state,
                effects,
                agent,
                &mut health,
                transform.translation,
                BLAST_DAMAGE,
            );
        }
    }
    crate::logger::log("💥 Bomb detonated");
}
