//! Volcano God — simulation core
//!
//! ECS-симуляция на Bevy 0.16: остров-вулкан против деревенских жителей.
//! Игрок-вулкан швыряет лаву, жители маршируют к кальдере ради ритуала.
//!
//! Архитектура гибридная: собственная баллистика + синхронный ContactLog,
//! rapier-компоненты — контракт коллизий для внешнего tactical layer.
//! Рендер, UI, камера и ввод — внешние коллабораторы: они читают
//! компоненты/ресурсы и события `VisualEffect`/`GameOverEvent`, а пишут
//! только `PlayerInput`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod agent;
pub mod collision;
pub mod economy;
pub mod events;
pub mod logger;
pub mod physics;
pub mod projectile;
pub mod session;
pub mod terrain;

pub use agent::{
    damage_villager, AgentPhase, DamageFlash, Dead, Health, HealthIndicator, SpawnTimers, Villager,
    VillagerRole,
};
pub use events::{GameOverEvent, VisualEffect};
pub use physics::{BallisticBody, ContactLog, GRAVITY};
pub use projectile::{Projectile, ProjectileKind, SolidifiedLava};
pub use session::{PlayerInput, SessionState, WeaponKind};
pub use terrain::{surface_height, Tree, VillageId};

use session::{game_active, session_started, simulation_running};

pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции.
///
/// Все системы в FixedUpdate 60Hz одной цепочкой — порядок тика строгий,
/// commands применяются на sync point-ах между системами.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            // init_resource не затирает seed, выставленный до plugin-а
            .init_resource::<DeterministicRng>()
            .init_resource::<SessionState>()
            .init_resource::<PlayerInput>()
            .init_resource::<ContactLog>()
            .init_resource::<SpawnTimers>()
            .add_event::<VisualEffect>()
            .add_event::<GameOverEvent>()
            .add_systems(Startup, terrain::spawn_island_trees)
            .add_systems(
                FixedUpdate,
                (
                    // Фаза 0: intents и экономика выстрела
                    economy::process_weapon_cycle.run_if(simulation_running),
                    economy::tick_fire_cooldown.run_if(simulation_running),
                    projectile::process_fire_intents.run_if(game_active),
                    // Фаза 1: баллистика + контакты
                    physics::step_ballistics.run_if(simulation_running),
                    physics::sync_velocity_to_rapier.run_if(simulation_running),
                    projectile::apply_contacts.run_if(simulation_running),
                    projectile::age_projectiles.run_if(simulation_running),
                    // Фаза 2: попадания и терминальные пути снарядов
                    collision::resolve_hot_projectiles.run_if(simulation_running),
                    projectile::retire_projectiles.run_if(simulation_running),
                    // Фаза 3: жители
                    agent::update_villager_movement.run_if(session_started),
                    agent::update_rituals.run_if(session_started),
                    agent::tick_damage_flash.run_if(session_started),
                    agent::despawn_dead,
                    agent::spawn_villager_waves.run_if(game_active),
                    // Фаза 4: регенерация лавы
                    economy::regenerate_lava.run_if(simulation_running),
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Полный рестарт сессии: состояние, таймеры волн и журнал контактов —
/// к начальным значениям. Entity-мир (жители, снаряды, застывшая лава)
/// чистит вызывающий.
pub fn reset_session(world: &mut World) {
    world.resource_mut::<SessionState>().reset();
    world.insert_resource(SpawnTimers::default());
    world.resource_mut::<ContactLog>().pairs.clear();
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Прогоняет ровно N фиксированных тиков, независимо от wall clock.
///
/// `app.update()` копит реальное время и может не запустить FixedUpdate ни
/// разу — для тестов и headless-прогонов двигаем Time<Fixed> руками.
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot компонентов типа T для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
