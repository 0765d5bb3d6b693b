//! Headless-прогон симуляции вулкана
//!
//! Bevy App без рендера: стартуем сессию и крутим фиксированные тики,
//! печатая счётчики. Полезно для smoke-прогонов и профилирования.

use volcano_simulation::{
    create_headless_app, run_fixed_ticks, Projectile, SessionState, SimulationPlugin,
    SolidifiedLava, Villager,
};

fn main() {
    let seed = 42;
    println!("Starting volcano headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Первый update прогоняет Startup (деревья), дальше двигаем тики руками
    app.update();
    app.world_mut().resource_mut::<SessionState>().start();

    for block in 0..36 {
        run_fixed_ticks(&mut app, 100);

        let world = app.world_mut();
        let villagers = world.query::<&Villager>().iter(world).count();
        let projectiles = world.query::<&Projectile>().iter(world).count();
        let solidified = world.query::<&SolidifiedLava>().iter(world).count();
        let state = world.resource::<SessionState>();
        println!(
            "Tick {}: {} villagers, {} projectiles, {} solidified, lava {:.1}, elevation {:.2}",
            (block + 1) * 100,
            villagers,
            projectiles,
            solidified,
            state.lava_amount,
            state.highest_elevation
        );
        if state.game_over {
            println!("Game over: the princess completed the ritual");
            break;
        }
    }

    println!("Simulation complete!");
}
