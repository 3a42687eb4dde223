//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use fl_energy::config::ScenarioConfig;
use fl_energy::devices::{Buffer, Consumer, Generator};
use fl_energy::scenario::build_grid;
use fl_energy::sim::engine::Grid;
use fl_energy::sim::types::SimConfig;

/// Default simulation configuration (24 steps/day, 1 day, seed 42).
pub fn default_config() -> SimConfig {
    SimConfig::new(24, 1, 42)
}

/// Grid built from a named preset.
pub fn preset_grid(name: &str) -> Grid {
    let cfg = ScenarioConfig::from_preset(name).expect("preset should load");
    build_grid(&cfg).expect("preset should build")
}

/// Small hand-wired grid: noisy generator -> buffer -> consumer.
pub fn small_grid(seed: u64) -> Grid {
    let mut grid = Grid::new(SimConfig::new(24, 2, seed));
    let generator = grid.add(
        "gen",
        Box::new(Generator::new(20, 60, 0.2, seed).with_daylight(5, 19)),
    );
    let buffer = grid.add("store", Box::new(Buffer::with_rates(200, 100, 25, 25)));
    let consumer = grid.add(
        "load",
        Box::new(Consumer::new(12.0, 4.0, 0.5, 1.0, 30, seed.wrapping_add(1))),
    );
    grid.link(generator, buffer, 25);
    grid.link(buffer, consumer, 25);
    grid
}
