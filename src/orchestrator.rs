// src/orchestrator.rs
//! Orchestrates the simulation flow: one `step` per generation, progress
//! accounting, and the running/converged status the driving loop consumes.
//! The delay between generations deliberately lives in the caller's loop,
//! not here.

use crate::life::GameOfLife;

use anyhow::Result;
use log::{debug, info};

/// Represents the status of the simulation after one step.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SimulationStatus {
    /// The generation was shown and the grid changed; keep stepping.
    Running,
    /// The grid reached a fixed point; the simulation is over.
    Converged,
}

/// Drives the engine one generation at a time.
pub struct Orchestrator<'a> {
    engine: GameOfLife<'a>,
    generation: u64,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator around a freshly constructed engine.
    pub fn new(engine: GameOfLife<'a>) -> Self {
        Orchestrator {
            engine,
            generation: 0,
        }
    }

    /// Number of generations shown so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shows one generation and reports whether the simulation should
    /// continue. Display failures propagate unmodified.
    pub fn step(&mut self) -> Result<SimulationStatus> {
        let converged = self.engine.show_generation()?;
        self.generation += 1;

        if converged {
            info!(
                "Orchestrator: population stabilized after {} generations.",
                self.generation
            );
            return Ok(SimulationStatus::Converged);
        }

        debug!(
            "Orchestrator: generation {} shown, population {}.",
            self.generation,
            self.engine.population()
        );
        Ok(SimulationStatus::Running)
    }
}
