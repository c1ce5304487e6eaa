// src/config.rs

//! Defines the configuration structures for the simulator.
//!
//! This module provides a set of structs that can be deserialized from a
//! JSON configuration file to customize the grid, the console rendering,
//! and the pacing of the simulation. Default values reproduce the classic
//! setup: a 25x25 board, a coin-flip initial population, and half a second
//! between generations.
//!
//! The file to load is named by the `LIFE_TERM_CONFIG` environment
//! variable; when it is unset, compiled-in defaults are used.

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Environment variable naming the JSON configuration file to load.
pub const CONFIG_PATH_ENV: &str = "LIFE_TERM_CONFIG";

/// Process-wide configuration, loaded once on first access.
///
/// Load failures are not fatal: the error is logged and defaults are used,
/// so a broken config file never prevents the simulation from starting.
pub static CONFIG: Lazy<Config> = Lazy::new(|| match Config::load() {
    Ok(config) => config,
    Err(e) => {
        warn!("Config: failed to load configuration: {:#}. Using defaults.", e);
        Config::default()
    }
});

/// Represents the complete configuration for the simulator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Grid dimensions and initial-population settings.
    pub grid: GridConfig,
    /// Console rendering settings.
    pub display: DisplayConfig,
    /// Pacing settings.
    pub simulation: SimulationConfig,
}

impl Config {
    /// Loads the configuration from the file named by [`CONFIG_PATH_ENV`],
    /// or returns defaults when the variable is unset.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                info!("Config: loading configuration from '{}'.", path);
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file '{}'", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config file '{}'", path))
            }
            Err(_) => Ok(Config::default()),
        }
    }
}

// --- Grid Configuration ---

/// Defines the simulated grid and how its initial population is seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns in the grid.
    pub columns: usize,
    /// Number of rows in the grid.
    pub rows: usize,
    /// Probability in `[0, 1]` that a cell starts alive.
    pub fill_density: f64,
    /// Fixed PRNG seed for reproducible runs; seeded from entropy when
    /// absent.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            columns: 25,
            rows: 25,
            fill_density: 0.5, // a coin flip per cell
            seed: None,
        }
    }
}

// --- Display Configuration ---

/// Defines how the grid is laid out on the terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Terminal rows drawn per logical cell. The horizontal run is doubled
    /// by the backend so cells stay roughly square in a typical font.
    pub pixel_size: usize,
    /// Terminal rows skipped above the grid.
    pub row_offset: usize,
    /// Terminal columns skipped left of the grid.
    pub col_offset: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            pixel_size: 1,
            row_offset: 1,
            col_offset: 2,
        }
    }
}

// --- Simulation Configuration ---

/// Defines the pacing of the driving loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay between generations, in milliseconds.
    pub generation_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            generation_interval_ms: 500, // half a second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_classic_setup() {
        let config = Config::default();
        assert_eq!(config.grid.columns, 25);
        assert_eq!(config.grid.rows, 25);
        assert_eq!(config.simulation.generation_interval_ms, 500);
    }

    #[test]
    fn partial_json_falls_back_to_defaults_per_field() {
        let config: Config =
            serde_json::from_str(r#"{"grid": {"columns": 40, "seed": 7}}"#).unwrap();
        assert_eq!(config.grid.columns, 40);
        assert_eq!(config.grid.rows, 25);
        assert_eq!(config.grid.seed, Some(7));
        assert_eq!(config.display.pixel_size, 1);
    }
}
