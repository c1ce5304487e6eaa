// src/display/console.rs

//! Provides a `Screen` implementation for rendering to a standard Unix
//! terminal using ANSI escape codes. This is the only backend the binary
//! ships; anything that can interpret SGR truecolor sequences works.
//!
//! Cell colors are buffered internally; `refresh` composes one escape-code
//! frame for the whole grid and writes it to stdout in a single syscall
//! burst, which keeps animation flicker-free on slow terminals.

use crate::color::Color;
use crate::config::DisplayConfig;
use crate::display::screen::Screen;

use anyhow::{anyhow, Context, Result};
use libc::{winsize, STDOUT_FILENO, TIOCGWINSZ};
use std::io::{self, stdout, Write};
use std::mem;
use std::os::unix::io::RawFd;

use log::{info, trace, warn};

// --- ANSI Escape Code Constants ---
const CURSOR_HIDE: &str = "\x1b[?25l"; // Hide cursor
const CURSOR_SHOW: &str = "\x1b[?25h"; // Show cursor
const SGR_PREFIX: &str = "\x1b["; // Start of Select Graphic Rendition sequence
const SGR_SUFFIX: char = 'm'; // End of SGR sequence
const SGR_SEPARATOR: char = ';'; // Separator for multiple SGR codes
const SGR_RESET_ALL: u16 = 0; // SGR code to reset all attributes
const SGR_BG_TRUECOLOR: u16 = 48; // SGR code selecting the background color
const SGR_COLOR_SPACE_RGB: u16 = 2; // SGR sub-code for a direct RGB triple
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H"; // Clear entire screen and move cursor to home

/// Terminal columns drawn per terminal row of a cell block. Character cells
/// are roughly twice as tall as they are wide, so doubling the horizontal
/// run keeps logical cells approximately square.
const COLUMNS_PER_PIXEL_ROW: usize = 2;

/// A `Screen` implementation for a standard Unix terminal.
///
/// Each logical cell is rendered as a block of `pixel_size` terminal rows by
/// `pixel_size * 2` terminal columns of background-colored spaces, offset
/// from the top-left corner by a configurable margin.
pub struct ConsoleScreen {
    /// Logical grid rows.
    rows: usize,
    /// Logical grid columns.
    cols: usize,
    /// Terminal rows per logical cell (always at least 1).
    pixel_size: usize,
    /// Terminal rows skipped above the grid.
    row_offset: usize,
    /// Terminal columns skipped left of the grid.
    col_offset: usize,
    /// Buffered cell colors, row-major.
    cells: Vec<Color>,
}

impl ConsoleScreen {
    /// Creates a new `ConsoleScreen` for a `rows` x `cols` logical grid.
    ///
    /// Clears the terminal and hides the hardware cursor; both are restored
    /// when the screen is dropped. The terminal size is queried once to warn
    /// (not fail) when the grid will not fit the visible area.
    pub fn new(rows: usize, cols: usize, display: &DisplayConfig) -> Result<Self> {
        let pixel_size = display.pixel_size.max(1);
        let screen = ConsoleScreen {
            rows,
            cols,
            pixel_size,
            row_offset: display.row_offset,
            col_offset: display.col_offset,
            cells: vec![Color::BLACK; rows * cols],
        };

        match get_terminal_size_cells(STDOUT_FILENO) {
            Ok((term_cols, term_rows)) => {
                let needed_rows = screen.row_offset + rows * pixel_size;
                let needed_cols = screen.col_offset + cols * pixel_size * COLUMNS_PER_PIXEL_ROW;
                if needed_rows > term_rows as usize || needed_cols > term_cols as usize {
                    warn!(
                        "ConsoleScreen: grid needs {}x{} terminal cells but only {}x{} are available. Output will be clipped.",
                        needed_cols, needed_rows, term_cols, term_rows
                    );
                }
            }
            Err(e) => {
                warn!(
                    "ConsoleScreen: failed to query terminal size: {}. Skipping fit check.",
                    e
                );
            }
        }

        print!("{}{}", CLEAR_SCREEN_AND_HOME, CURSOR_HIDE);
        stdout()
            .flush()
            .context("ConsoleScreen: failed to flush initial escape sequences")?;

        info!(
            "ConsoleScreen: initialized for a {}x{} grid (pixel size {}).",
            cols, rows, pixel_size
        );
        Ok(screen)
    }

    /// Composes the full ANSI frame for the buffered cell colors.
    ///
    /// Adjacent same-colored cells on a row are coalesced into a single SGR
    /// run to keep the frame small.
    fn compose_frame(&self) -> String {
        let mut frame = String::new();

        for cell_row in 0..self.rows {
            for pixel_row in 0..self.pixel_size {
                let term_row = self.row_offset + cell_row * self.pixel_size + pixel_row + 1;
                frame.push_str(&format_cursor_position(term_row, self.col_offset + 1));

                let mut col = 0;
                while col < self.cols {
                    let color = self.cells[cell_row * self.cols + col];
                    let mut run_len = 1;
                    while col + run_len < self.cols
                        && self.cells[cell_row * self.cols + col + run_len] == color
                    {
                        run_len += 1;
                    }

                    let mut sgr_codes = vec![SGR_RESET_ALL];
                    sgr_append_bg_color(&mut sgr_codes, color);
                    push_sgr(&mut frame, &sgr_codes);

                    let width_chars = run_len * self.pixel_size * COLUMNS_PER_PIXEL_ROW;
                    frame.extend(std::iter::repeat(' ').take(width_chars));
                    col += run_len;
                }
            }
        }

        push_sgr(&mut frame, &[SGR_RESET_ALL]);
        frame
    }
}

impl Screen for ConsoleScreen {
    fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        if row >= self.rows || col >= self.cols {
            trace!(
                "ConsoleScreen: set_pixel({}, {}) outside the {}x{} grid ignored.",
                row,
                col,
                self.rows,
                self.cols
            );
            return;
        }
        self.cells[row * self.cols + col] = color;
    }

    fn refresh(&mut self) -> Result<()> {
        let frame = self.compose_frame();
        let mut out = stdout();
        out.write_all(frame.as_bytes())
            .context("ConsoleScreen: failed to write frame to stdout")?;
        out.flush()
            .context("ConsoleScreen: failed to flush frame to stdout")?;
        Ok(())
    }
}

impl Drop for ConsoleScreen {
    /// Restores the terminal: attributes reset, cursor parked below the grid
    /// and made visible again.
    fn drop(&mut self) {
        let mut footer = String::new();
        push_sgr(&mut footer, &[SGR_RESET_ALL]);
        let footer_row = self.row_offset + self.rows * self.pixel_size + 1;
        footer.push_str(&format_cursor_position(footer_row, 1));
        footer.push_str(CURSOR_SHOW);

        print!("{}", footer);
        if let Err(e) = stdout().flush() {
            warn!("ConsoleScreen: failed to restore terminal state: {}", e);
        }
    }
}

/// Formats a 1-based ANSI cursor-position sequence.
fn format_cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{};{}H", row, col)
}

/// Appends the SGR codes selecting `color` as the background color.
fn sgr_append_bg_color(codes: &mut Vec<u16>, color: Color) {
    codes.push(SGR_BG_TRUECOLOR);
    codes.push(SGR_COLOR_SPACE_RGB);
    codes.push(color.r as u16);
    codes.push(color.g as u16);
    codes.push(color.b as u16);
}

/// Appends a complete SGR sequence for `codes` to `buffer`.
fn push_sgr(buffer: &mut String, codes: &[u16]) {
    buffer.push_str(SGR_PREFIX);
    buffer.push_str(
        &codes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(&SGR_SEPARATOR.to_string()),
    );
    buffer.push(SGR_SUFFIX);
}

/// Queries the terminal size in character cells as `(cols, rows)`.
fn get_terminal_size_cells(fd: RawFd) -> Result<(u16, u16)> {
    // SAFETY: TIOCGWINSZ only writes into the winsize struct passed to it.
    let mut ws: winsize = unsafe { mem::zeroed() };
    let ret = unsafe { libc::ioctl(fd, TIOCGWINSZ, &mut ws) };
    if ret != 0 {
        return Err(anyhow!(
            "ioctl(TIOCGWINSZ) failed: {}",
            io::Error::last_os_error()
        ));
    }
    Ok((ws.ws_col, ws.ws_row))
}
