//! Grayscale layer for charplot.
//!
//! Brightness values in `[0, 1]` are quantised to palette characters and
//! drawn through the character engine of `cp-raster`.

pub mod error;
pub mod gradient;
pub mod kernel;
pub mod palette;
pub mod plotter;

pub use error::GrayError;
pub use kernel::{BrightnessMatrix, Kernel};
pub use palette::Palette;
pub use plotter::GrayscalePlotter;
