// In src/main.rs

// Declare modules
pub mod color;
pub mod config;
pub mod display;
pub mod life;
pub mod orchestrator;

// Use statements for items needed in main.rs
use crate::{
    config::{Config, CONFIG},
    display::ConsoleScreen,
    life::GameOfLife,
    orchestrator::{Orchestrator, SimulationStatus},
};

// Logging
use anyhow::{ensure, Context};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Fills a `rows` x `columns` grid where each cell is alive with
/// probability `fill_density`.
fn random_grid(rng: &mut StdRng, rows: usize, columns: usize, fill_density: f64) -> Vec<Vec<bool>> {
    (0..rows)
        .map(|_| (0..columns).map(|_| rng.gen_bool(fill_density)).collect())
        .collect()
}

/// Main entry point for the `life-term` simulator.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting life-term...");

    // --- Configuration ---
    let config: &Config = &CONFIG;
    ensure!(
        (0.0..=1.0).contains(&config.grid.fill_density),
        "grid.fill_density must be within [0, 1], got {}",
        config.grid.fill_density
    );
    info!(
        "Configuration loaded: {}x{} grid, {} ms between generations.",
        config.grid.columns, config.grid.rows, config.simulation.generation_interval_ms
    );

    // --- Initial Population ---
    // The generator is injected here rather than seeded process-wide, so a
    // fixed seed reproduces a run exactly.
    let mut rng = match config.grid.seed {
        Some(seed) => {
            info!("Seeding PRNG with fixed seed {}.", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let initial_state = random_grid(
        &mut rng,
        config.grid.rows,
        config.grid.columns,
        config.grid.fill_density,
    );

    // --- Screen and Engine ---
    let mut screen = ConsoleScreen::new(config.grid.rows, config.grid.columns, &config.display)
        .context("Failed to initialize console screen")?;
    let mut engine = GameOfLife::new(&initial_state, &mut screen)
        .context("Failed to initialize simulation engine")?;

    engine.clear_screen();

    // --- Main Simulation Loop ---
    let interval = std::time::Duration::from_millis(config.simulation.generation_interval_ms);
    let mut orchestrator = Orchestrator::new(engine);
    loop {
        match orchestrator.step().context("Error while showing a generation")? {
            SimulationStatus::Running => std::thread::sleep(interval),
            SimulationStatus::Converged => break,
        }
    }

    info!(
        "finished running! {} generations shown.",
        orchestrator.generation()
    );
    Ok(())
}
