//! Render module: plays the reveal on a true-color terminal.
//!
//! - [`Cell`] / [`Rgb`] / [`Modifiers`]: one painted column
//! - [`Grid`] / [`Rect`]: a frame of cells
//! - [`FadeView`]: paints a surface, honouring registered fade rules
//! - [`OutputBuffer`] / [`render_full`]: single-write ANSI frames

mod cell;
mod easing;
mod fade;
mod grid;
mod output;

pub use cell::{Cell, Modifiers, Rgb};
pub use easing::Easing;
pub use fade::FadeView;
pub use grid::{Grid, Rect};
pub use output::{render_full, OutputBuffer};
