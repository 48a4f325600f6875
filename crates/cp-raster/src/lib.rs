pub mod brush;
pub mod fill;
pub mod plotter;
/// Rasterization engine for charplot.
///
/// Turns shapes into grid cells, fills regions and moves sub-grids around.
pub mod raster;
pub mod region;

pub use brush::{Brush, Ink};
pub use plotter::Plotter;
