use std::io::{self, Write};

use cp_core::error::CoreError;
use cp_core::grid::Grid;
use cp_core::histogram::{self, ColorHistogram};

use crate::{fill, raster, region};

/// Dessin au pinceau-caractère sur une grille possédée.
///
/// # Example
/// ```
/// use cp_raster::Plotter;
/// let mut plotter = Plotter::new(5, 3, '.').unwrap();
/// plotter.draw_line(0, 1, 4, 1, '-');
/// assert_eq!(plotter.grid().to_string(), ".....\n-----\n.....\n");
/// ```
#[derive(Clone, Debug)]
pub struct Plotter {
    grid: Grid,
}

impl Plotter {
    /// Creates a plotter over a fresh grid.
    ///
    /// # Errors
    /// See [`Grid::new`].
    pub fn new(width: i32, height: i32, background: char) -> Result<Self, CoreError> {
        Ok(Self::from_grid(Grid::new(width, height, background)?))
    }

    /// Takes ownership of an existing grid.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    /// The drawing surface.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The drawing surface, mutable.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Gives the grid back.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Segment de Bresenham, clippé.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, brush: char) {
        raster::draw_line(&mut self.grid, x1, y1, x2, y2, &brush);
    }

    /// Rectangle outline, or filled and clamped.
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, brush: char, fill: bool) {
        raster::draw_rectangle(&mut self.grid, x1, y1, x2, y2, &brush, fill);
    }

    /// Triangle outline, or filled with the top-left convention.
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        brush: char,
        fill: bool,
    ) {
        raster::draw_triangle(&mut self.grid, (x1, y1), (x2, y2), (x3, y3), &brush, fill);
    }

    /// Midpoint circle, outline or filled spans.
    pub fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: i32, brush: char, fill: bool) {
        raster::draw_circle(&mut self.grid, center_x, center_y, radius, &brush, fill);
    }

    /// Flood fill from a seed.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfBounds`] for a seed outside the grid.
    pub fn flood_fill(&mut self, x: i32, y: i32, fill_brush: char) -> Result<(), CoreError> {
        fill::flood_fill(&mut self.grid, x, y, fill_brush)
    }

    /// Scanline fill from a seed.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfBounds`] for a seed outside the grid.
    pub fn scanline_fill(&mut self, x: i32, y: i32, fill_brush: char) -> Result<(), CoreError> {
        fill::scanline_fill(&mut self.grid, x, y, fill_brush)
    }

    /// Histogram of the whole grid.
    #[must_use]
    pub fn color_histogram(&self) -> ColorHistogram {
        histogram::color_histogram(&self.grid)
    }

    /// Histogram over a clamped rectangle.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRegion`] for an inverted rectangle.
    pub fn color_histogram_in(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<ColorHistogram, CoreError> {
        histogram::color_histogram_in(&self.grid, x1, y1, x2, y2)
    }

    /// Independent copy of a clamped rectangle.
    ///
    /// # Errors
    /// See [`region::extract_region`].
    pub fn extract_region(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Grid, CoreError> {
        region::extract_region(&self.grid, x1, y1, x2, y2)
    }

    /// Paste `region` with its top-left at `(x, y)`, clipped.
    pub fn paste_region(&mut self, region: &Grid, x: i32, y: i32) {
        region::paste_region(&mut self.grid, region, x, y);
    }

    /// Writes the grid content, one line per row.
    ///
    /// # Errors
    /// Propagates I/O errors from `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.grid.render(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_drawing() {
        let mut plotter = Plotter::new(9, 7, ' ').unwrap();
        plotter.draw_rectangle(1, 3, 7, 6, '#', false);
        plotter.draw_triangle(1, 3, 4, 0, 7, 3, '^', false);
        plotter.draw_rectangle(3, 4, 4, 6, '|', true);

        let grid = plotter.grid();
        assert_eq!(grid.pixel(4, 0), '^');
        assert_eq!(grid.pixel(1, 6), '#');
        assert_eq!(grid.pixel(3, 5), '|');
        assert_eq!(grid.pixel(5, 5), ' ');
    }

    #[test]
    fn fill_inside_outline() {
        let mut plotter = Plotter::new(10, 10, '.').unwrap();
        plotter.draw_circle(5, 5, 4, '#', false);
        plotter.scanline_fill(5, 5, '+').unwrap();
        let hist = plotter.color_histogram();
        assert!(hist[&'+'] > 20);
        assert_eq!(plotter.grid().pixel(0, 0), '.');

        let mut other = Plotter::new(10, 10, '.').unwrap();
        other.draw_circle(5, 5, 4, '#', false);
        other.flood_fill(5, 5, '+').unwrap();
        assert_eq!(other.grid(), plotter.grid());
    }

    #[test]
    fn histogram_and_regions() {
        let mut plotter = Plotter::new(6, 4, '.').unwrap();
        plotter.draw_rectangle(0, 0, 2, 1, 'x', true);
        let hist = plotter.color_histogram_in(0, 0, 3, 1).unwrap();
        assert_eq!(hist[&'x'], 6);
        assert_eq!(hist[&'.'], 2);

        let part = plotter.extract_region(0, 0, 2, 1).unwrap();
        plotter.paste_region(&part, 3, 2);
        assert_eq!(plotter.color_histogram()[&'x'], 12);
    }

    #[test]
    fn render_writes_rows() {
        let mut plotter = Plotter::new(2, 2, '.').unwrap();
        plotter.draw_line(0, 0, 1, 1, '\\');
        let mut out = Vec::new();
        plotter.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\\.\n.\\\n");
    }
}
