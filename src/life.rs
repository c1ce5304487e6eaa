// src/life.rs

//! The Game of Life engine: owns the grid state, computes successive
//! generations under the classical rule, reports convergence, and drives a
//! borrowed [`Screen`] to visualize each generation.
//!
//! The grid is toroidal: coordinate arithmetic wraps modulo the grid
//! dimensions, so edge cells neighbor cells on the opposite edge and no
//! access is ever out of bounds. Dimensions are fixed at construction.

use crate::color::Color;
use crate::display::Screen;

use anyhow::{ensure, Result};
use log::debug;

#[cfg(test)]
mod tests;

/// A live cell with fewer live neighbors than this dies.
const UNDER_POPULATION_THRESHOLD: usize = 2;
/// A live cell with more live neighbors than this dies.
const OVER_POPULATION_THRESHOLD: usize = 3;
/// A dead cell with exactly this many live neighbors becomes alive.
const REPRODUCTION_THRESHOLD: usize = 3;

/// Visual value plotted for a live cell.
const ALIVE_COLOR: Color = Color::WHITE;
/// Visual value plotted for a dead cell.
const DEAD_COLOR: Color = Color::BLACK;

/// Simulates Conway's Game of Life on a fixed-size toroidal grid.
///
/// The engine exclusively owns its grid buffer; the screen is borrowed for
/// the engine's lifetime and must outlive it.
pub struct GameOfLife<'a> {
    /// Current generation, `height` rows of `width` cells.
    grid: Vec<Vec<bool>>,
    width: usize,
    height: usize,
    screen: &'a mut dyn Screen,
}

impl<'a> GameOfLife<'a> {
    /// Creates an engine from the caller-supplied initial population.
    ///
    /// The initial state is copied into engine-owned storage; the caller's
    /// rows are never aliased or mutated afterwards. Rejects an empty or
    /// ragged initial state.
    pub fn new(initial_state: &[Vec<bool>], screen: &'a mut dyn Screen) -> Result<Self> {
        ensure!(!initial_state.is_empty(), "initial state has no rows");
        let width = initial_state[0].len();
        ensure!(width > 0, "initial state has no columns");
        ensure!(
            initial_state.iter().all(|row| row.len() == width),
            "initial state rows must all be {} cells wide",
            width
        );

        let grid = initial_state.to_vec();
        let height = grid.len();
        debug!("GameOfLife: created a {}x{} grid.", width, height);

        Ok(GameOfLife {
            grid,
            width,
            height,
            screen,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (`row`, `col`) is alive in the current
    /// generation. Panics if the coordinate is out of range.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.grid[row][col]
    }

    /// Number of live cells in the current generation.
    pub fn population(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    /// Draws every cell as dead.
    ///
    /// Purely a display-side operation: the grid itself is untouched, and
    /// no refresh is issued. Typically invoked once before the first
    /// generation is shown.
    pub fn clear_screen(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                self.screen.set_pixel(row, col, DEAD_COLOR);
            }
        }
    }

    /// Shows the current generation and advances the simulation.
    ///
    /// Plots one pixel per cell, refreshes the screen, then computes the
    /// next generation. Returns `true` when the grid has reached a fixed
    /// point (the next generation is identical to the current one), in
    /// which case the stored grid is left unchanged; otherwise the new
    /// generation is adopted and `false` is returned.
    ///
    /// Screen failures propagate unmodified.
    pub fn show_generation(&mut self) -> Result<bool> {
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                let color = if alive { ALIVE_COLOR } else { DEAD_COLOR };
                self.screen.set_pixel(row, col, color);
            }
        }
        self.screen.refresh()?;

        Ok(self.advance())
    }

    /// Computes the next generation and adopts it unless it equals the
    /// current one. Returns whether a fixed point was reached.
    ///
    /// The next grid is fully computed from an unmodified snapshot before
    /// any cell is committed; updating in place would corrupt neighbor
    /// counts mid-step.
    fn advance(&mut self) -> bool {
        let mut next = vec![vec![false; self.width]; self.height];
        for row in 0..self.height {
            for col in 0..self.width {
                next[row][col] = self.next_cell_state(row, col);
            }
        }

        if next == self.grid {
            return true;
        }

        self.grid = next;
        false
    }

    /// Whether the cell at (`row`, `col`) is alive in the next generation.
    ///
    /// Under-/over-population is checked first, then reproduction; a live
    /// cell with two or three live neighbors falls through both checks and
    /// survives.
    fn next_cell_state(&self, row: usize, col: usize) -> bool {
        let neighbors = self.live_neighbors(row, col);

        if neighbors < UNDER_POPULATION_THRESHOLD || neighbors > OVER_POPULATION_THRESHOLD {
            return false;
        }

        if !self.grid[row][col] && neighbors != REPRODUCTION_THRESHOLD {
            return false;
        }

        true
    }

    /// Counts live cells among the 8 neighbors of (`row`, `col`), wrapping
    /// around the grid edges.
    ///
    /// A position that wraps onto the cell itself is not a neighbor, which
    /// on a grid one cell wide or tall skips more than the center offset.
    fn live_neighbors(&self, row: usize, col: usize) -> usize {
        let height = self.height as isize;
        let width = self.width as isize;
        let mut count = 0;

        for row_offset in [-1isize, 0, 1] {
            for col_offset in [-1isize, 0, 1] {
                let neighbor_row = (row as isize + row_offset).rem_euclid(height) as usize;
                let neighbor_col = (col as isize + col_offset).rem_euclid(width) as usize;
                if neighbor_row == row && neighbor_col == col {
                    continue;
                }
                if self.grid[neighbor_row][neighbor_col] {
                    count += 1;
                }
            }
        }

        count
    }
}
