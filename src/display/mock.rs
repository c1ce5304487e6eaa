// src/display/mock.rs

use crate::color::Color;
use crate::display::screen::Screen;
use anyhow::{bail, Result};

/// One recorded call on the screen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCall {
    SetPixel {
        row: usize,
        col: usize,
        color: Color,
    },
    Refresh,
}

/// Recording `Screen` double for engine tests.
pub struct MockScreen {
    calls: Vec<ScreenCall>,
    fail_next_refresh: bool,
}

impl MockScreen {
    pub fn new() -> Self {
        MockScreen {
            calls: Vec::new(),
            fail_next_refresh: false,
        }
    }

    pub fn calls(&self) -> &[ScreenCall] {
        &self.calls
    }

    /// Makes the next `refresh` call return an error instead of recording.
    pub fn fail_next_refresh(&mut self) {
        self.fail_next_refresh = true;
    }

    pub fn set_pixel_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ScreenCall::SetPixel { .. }))
            .count()
    }

    pub fn refresh_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ScreenCall::Refresh))
            .count()
    }

    /// The last color plotted at (`row`, `col`), if any.
    pub fn last_color_at(&self, row: usize, col: usize) -> Option<Color> {
        self.calls.iter().rev().find_map(|call| match call {
            ScreenCall::SetPixel {
                row: r,
                col: c,
                color,
            } if *r == row && *c == col => Some(*color),
            _ => None,
        })
    }
}

impl Default for MockScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MockScreen {
    fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        self.calls.push(ScreenCall::SetPixel { row, col, color });
    }

    fn refresh(&mut self) -> Result<()> {
        if self.fail_next_refresh {
            self.fail_next_refresh = false;
            bail!("mock refresh failure");
        }
        self.calls.push(ScreenCall::Refresh);
        Ok(())
    }
}
