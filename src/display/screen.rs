// src/display/screen.rs

//! Defines the `Screen` trait, the rendering contract consumed by the
//! simulation engine.
//!
//! Any concrete rendering surface (terminal, framebuffer, test double)
//! implements this one-level abstraction. Backends are free to buffer
//! `set_pixel` calls and defer all visible output to `refresh`, or to render
//! immediately and treat `refresh` as a no-op.

use crate::color::Color;
use anyhow::Result;

/// A minimal pixel-plotting surface.
pub trait Screen {
    /// Records that the cell at logical coordinate (`row`, `col`) should
    /// render as `color`.
    ///
    /// Call order is unconstrained; repeated calls for the same coordinate
    /// overwrite the prior value. The side effect is purely visual.
    fn set_pixel(&mut self, row: usize, col: usize, color: Color);

    /// Flushes any buffered visual changes to the physically visible surface.
    ///
    /// Failures here are the backend's own; callers propagate them
    /// unmodified rather than catching, translating, or retrying.
    fn refresh(&mut self) -> Result<()>;
}
