//! Headless симуляция PointBlank
//!
//! Без камеры и рук: entities спавнятся, летят и доходят до игрока,
//! пока не кончатся жизни. Smoke-прогон правил + детерминизма.

use pointblank_simulation::{
    create_headless_app, start_session, step, world_snapshot, HudSnapshot, SimulationPlugin,
};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    println!("Starting PointBlank headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    start_session(app.world_mut());

    // 10 минут игрового времени максимум
    for tick in 0..36_000 {
        step(&mut app);

        let hud = app.world().resource::<HudSnapshot>().clone();
        if tick % 600 == 0 {
            println!(
                "Tick {}: score {}, lives {}, bombs {}",
                tick, hud.score, hud.lives, hud.bombs
            );
        }
        if hud.game_over {
            println!("Game over at tick {} (score {})", tick, hud.score);
            break;
        }
    }

    let snapshot = world_snapshot(app.world_mut());
    println!("Simulation complete! Snapshot: {} bytes", snapshot.len());
}
