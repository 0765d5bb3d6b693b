//! Интеграционные тесты жизненного цикла снарядов.
//!
//! Headless App + ручные фиксированные тики: каждый снаряд обязан уйти
//! ровно одним терминальным путём.

use bevy::prelude::*;
use volcano_simulation::projectile::projectile_bundle;
use volcano_simulation::session::WeaponKind;
use volcano_simulation::terrain::tree_bundle;
use volcano_simulation::{
    create_headless_app, run_fixed_ticks, surface_height, DamageFlash, Health, PlayerInput,
    Projectile, ProjectileKind, SessionState, SimulationPlugin, SolidifiedLava, SpawnTimers,
    Villager, VillagerRole, VisualEffect,
};

fn test_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    // Отключаем волны жителей: тесты спавнят entity сами
    app.world_mut().resource_mut::<SpawnTimers>().accumulated = [-1.0e9; 2];
    app
}

fn count<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&T>().iter(world).count()
}

fn effect_count(app: &App, matcher: impl Fn(&VisualEffect) -> bool) -> usize {
    let events = app.world().resource::<Events<VisualEffect>>();
    events.iter_current_update_events().filter(|e| matcher(e)).count()
}

#[test]
fn bomb_costs_half_reserve_and_empty_reserve_rejects() {
    let mut app = test_app(7);
    {
        let mut state = app.world_mut().resource_mut::<SessionState>();
        state.start();
        state.weapon = WeaponKind::Bomb;
        state.lava_regen_rate = 0.0; // изолируем экономику выстрела
    }
    {
        let mut input = app.world_mut().resource_mut::<PlayerInput>();
        input.fire = true;
        input.aim_origin = Vec3::new(0.0, 60.0, 0.0);
        input.aim_direction = Vec3::NEG_Z;
    }

    run_fixed_ticks(&mut app, 1);
    assert_eq!(count::<Projectile>(&mut app), 1);
    assert_eq!(app.world().resource::<SessionState>().lava_amount, 50.0);

    // Снимаем cooldown: вторая бомба стоит ровно остаток
    app.world_mut().resource_mut::<SessionState>().fire_cooldown = 0.0;
    run_fixed_ticks(&mut app, 1);
    assert_eq!(count::<Projectile>(&mut app), 2);
    assert_eq!(app.world().resource::<SessionState>().lava_amount, 0.0);

    // Третья — молчаливый отказ: лавы меньше стоимости
    app.world_mut().resource_mut::<SessionState>().fire_cooldown = 0.0;
    run_fixed_ticks(&mut app, 1);
    assert_eq!(count::<Projectile>(&mut app), 2);
    assert_eq!(app.world().resource::<SessionState>().lava_amount, 0.0);
}

#[test]
fn spray_spawns_exactly_twenty_jittered_droplets() {
    use volcano_simulation::projectile::SPRAY_DROPLETS;
    use volcano_simulation::BallisticBody;

    let mut app = test_app(7);
    {
        let mut state = app.world_mut().resource_mut::<SessionState>();
        state.start();
        state.weapon = WeaponKind::Spray;
    }
    {
        let mut input = app.world_mut().resource_mut::<PlayerInput>();
        input.fire = true;
        input.aim_origin = Vec3::new(0.0, 40.0, 0.0);
        input.aim_direction = Vec3::NEG_Z;
    }

    run_fixed_ticks(&mut app, 1);

    assert_eq!(count::<Projectile>(&mut app), SPRAY_DROPLETS);
    // Один выстрел, одна цена
    assert_eq!(app.world().resource::<SessionState>().lava_amount, 95.0);

    // Jitter из seeded RNG: скорости droplet-ов не совпадают
    let world = app.world_mut();
    let velocities: Vec<Vec3> = world
        .query::<&BallisticBody>()
        .iter(world)
        .map(|body| body.velocity)
        .collect();
    assert_eq!(velocities.len(), SPRAY_DROPLETS);
    assert!(
        velocities.iter().any(|v| *v != velocities[0]),
        "droplet velocities must differ through seeded jitter"
    );
}

#[test]
fn boulder_settles_into_solidified_lava_on_slope() {
    let mut app = test_app(7);

    let x = 10.0;
    let z = 10.0;
    let start = Vec3::new(x, surface_height(x, z) + 5.0, z);
    app.world_mut()
        .spawn(projectile_bundle(ProjectileKind::Boulder, start, Vec3::ZERO));

    run_fixed_ticks(&mut app, 120);

    assert_eq!(count::<Projectile>(&mut app), 0, "boulder must retire");
    assert_eq!(count::<SolidifiedLava>(&mut app), 1, "exactly one remnant");

    let world = app.world_mut();
    let transform = world
        .query_filtered::<&Transform, With<SolidifiedLava>>()
        .single(world)
        .unwrap();
    let expected = surface_height(transform.translation.x, transform.translation.z) + 0.5;
    assert!(
        (transform.translation.y - expected).abs() < 1e-3,
        "solidified boulder rests at surface + radius, got y={}",
        transform.translation.y
    );
    assert!(effect_count(&app, |e| matches!(e, VisualEffect::ImpactBurst { .. })) >= 1);
}

#[test]
fn projectile_over_water_despawns_with_steam() {
    let mut app = test_app(7);

    // За пределами острова, падает в океан
    app.world_mut().spawn(projectile_bundle(
        ProjectileKind::Boulder,
        Vec3::new(70.0, 10.0, 0.0),
        Vec3::ZERO,
    ));

    run_fixed_ticks(&mut app, 120);

    assert_eq!(count::<Projectile>(&mut app), 0);
    assert_eq!(count::<SolidifiedLava>(&mut app), 0, "water leaves no remnant");
    assert_eq!(
        effect_count(&app, |e| matches!(e, VisualEffect::Steam { .. })),
        1
    );
}

#[test]
fn out_of_bounds_projectile_despawns_silently() {
    let mut app = test_app(7);

    app.world_mut().spawn(projectile_bundle(
        ProjectileKind::Boulder,
        Vec3::new(0.0, 150.0, 0.0),
        Vec3::new(0.0, 50.0, 0.0),
    ));

    run_fixed_ticks(&mut app, 10);

    assert_eq!(count::<Projectile>(&mut app), 0);
    assert_eq!(count::<SolidifiedLava>(&mut app), 0);
    assert_eq!(
        effect_count(&app, |e| matches!(e, VisualEffect::Steam { .. })),
        0
    );
    assert_eq!(
        effect_count(&app, |e| matches!(e, VisualEffect::ImpactBurst { .. })),
        0
    );
}

#[test]
fn lethal_hit_counts_one_kill_across_two_hits() {
    use volcano_simulation::VillageId;
    use volcano_simulation::agent::villager_bundle;

    let mut app = test_app(7);

    let vx = 20.0;
    let vz = 0.0;
    let vy = surface_height(vx, vz) + 5.0;
    let villager = app.world_mut().spawn(villager_bundle(
        VillagerRole::Normal,
        VillageId::East,
        Vec3::new(vx, vy, vz),
    )).id();

    // Первый валун: 1 урон, житель жив, валун форсированно застывает
    app.world_mut().spawn(projectile_bundle(
        ProjectileKind::Boulder,
        Vec3::new(vx + 1.0, vy, vz),
        Vec3::ZERO,
    ));
    run_fixed_ticks(&mut app, 1);

    {
        let health = app.world().entity(villager).get::<Health>().unwrap();
        assert_eq!(health.current, 1);
        assert!(app.world().entity(villager).get::<DamageFlash>().is_some());
    }
    assert_eq!(app.world().resource::<SessionState>().kill_count, 0);
    assert_eq!(count::<Projectile>(&mut app), 0);
    assert_eq!(count::<SolidifiedLava>(&mut app), 1);

    // Второй валун добивает: ровно +1 к счётчику, entity убрана
    app.world_mut().spawn(projectile_bundle(
        ProjectileKind::Boulder,
        Vec3::new(vx - 1.0, vy, vz),
        Vec3::ZERO,
    ));
    run_fixed_ticks(&mut app, 1);

    assert_eq!(app.world().resource::<SessionState>().kill_count, 1);
    assert_eq!(count::<Villager>(&mut app), 0);
    assert!(effect_count(&app, |e| matches!(e, VisualEffect::BlackSmoke { .. })) >= 1);

    // Дальше счётчик не двигается
    run_fixed_ticks(&mut app, 60);
    assert_eq!(app.world().resource::<SessionState>().kill_count, 1);
}

#[test]
fn bomb_detonates_near_obstacle_and_clears_blast_radius() {
    use volcano_simulation::VillageId;
    use volcano_simulation::agent::villager_bundle;
    use volcano_simulation::terrain::Tree;

    let mut app = test_app(7);

    let base = Vec3::new(25.0, surface_height(25.0, 0.0), 0.0);
    app.world_mut().spawn(tree_bundle(base));

    // Житель в радиусе взрыва, но не в радиусе прямого попадания
    let vpos = Vec3::new(30.0, surface_height(30.0, 0.0) + 5.0, 0.0);
    app.world_mut()
        .spawn(villager_bundle(VillagerRole::Normal, VillageId::East, vpos));

    // Бомба рядом с центром ствола — детонация через proximity-флаг
    let trunk_center = base + Vec3::Y * 4.5;
    app.world_mut().spawn(projectile_bundle(
        ProjectileKind::Bomb,
        trunk_center + Vec3::X * 1.0,
        Vec3::ZERO,
    ));

    run_fixed_ticks(&mut app, 2);

    assert_eq!(count::<Projectile>(&mut app), 0, "bomb must detonate");
    assert_eq!(count::<SolidifiedLava>(&mut app), 0, "bomb leaves no remnant");
    assert_eq!(count::<Tree>(&mut app), 0, "tree in blast radius destroyed");
    assert_eq!(count::<Villager>(&mut app), 0, "2 blast damage kills a normal villager");
    assert_eq!(app.world().resource::<SessionState>().kill_count, 1);
    assert_eq!(
        effect_count(&app, |e| matches!(e, VisualEffect::BombBlast { .. })),
        1
    );
    assert_eq!(
        effect_count(&app, |e| matches!(e, VisualEffect::WoodSplinters { .. })),
        1
    );
}
