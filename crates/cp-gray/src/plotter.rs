use cp_core::grid::Grid;
use cp_raster::brush::Ink;
use cp_raster::{Plotter, raster};

use crate::error::GrayError;
use crate::gradient::{linear_brightness, radial_brightness};
use crate::kernel::{BrightnessMatrix, Kernel};
use crate::palette::Palette;

/// Sigma used by [`GrayscalePlotter::apply_gaussian_blur`].
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Plotter en niveaux de gris : chaque primitive prend une luminosité `[0, 1]`.
///
/// Composes a [`Plotter`]: the brightness is mapped once to a palette
/// character and the character engine does the drawing. Gradients map per
/// cell.
///
/// # Example
/// ```
/// use cp_gray::{GrayscalePlotter, Palette};
/// let mut plotter = GrayscalePlotter::new(5, 5, ' ', Palette::from(" .#")).unwrap();
/// plotter.draw_rectangle(1, 1, 3, 3, 1.0, true);
/// assert_eq!(plotter.grid().to_string(), "     \n ### \n ### \n ### \n     \n");
/// ```
#[derive(Clone, Debug)]
pub struct GrayscalePlotter {
    plotter: Plotter,
    palette: Palette,
}

impl GrayscalePlotter {
    /// Creates a grayscale plotter over a fresh grid.
    ///
    /// # Errors
    /// Returns [`GrayError::Core`] for invalid grid parameters and
    /// [`GrayError::NullPaletteEntry`] for a NUL palette entry.
    pub fn new(width: i32, height: i32, background: char, palette: Palette) -> Result<Self, GrayError> {
        Self::from_plotter(Plotter::new(width, height, background)?, palette)
    }

    /// Wraps an existing plotter.
    ///
    /// # Errors
    /// Returns [`GrayError::NullPaletteEntry`] for a NUL palette entry.
    pub fn from_plotter(plotter: Plotter, palette: Palette) -> Result<Self, GrayError> {
        palette.check()?;
        Ok(Self { plotter, palette })
    }

    /// The character-level plotter.
    #[must_use]
    pub fn plotter(&self) -> &Plotter {
        &self.plotter
    }

    /// The character-level plotter, mutable.
    pub fn plotter_mut(&mut self) -> &mut Plotter {
        &mut self.plotter
    }

    /// Gives the character-level plotter back.
    #[must_use]
    pub fn into_plotter(self) -> Plotter {
        self.plotter
    }

    /// The drawing surface.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.plotter.grid()
    }

    /// Active palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of palette entries.
    #[must_use]
    pub fn palette_size(&self) -> usize {
        self.palette.len()
    }

    /// Replaces the palette. Existing cells are left as they are.
    ///
    /// # Errors
    /// Returns [`GrayError::NullPaletteEntry`] for a NUL palette entry.
    pub fn set_palette(&mut self, palette: Palette) -> Result<(), GrayError> {
        palette.check()?;
        self.palette = palette;
        Ok(())
    }

    /// Character for `brightness` under the active palette and background.
    #[must_use]
    pub fn brightness_to_char(&self, brightness: f64) -> char {
        self.palette
            .brightness_to_char(brightness, self.grid().background())
    }

    fn char_to_brightness(&self, ch: char) -> f64 {
        self.palette.char_to_brightness(ch, self.grid().background())
    }

    /// Segment at a given brightness.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, brightness: f64) {
        let brush = self.brightness_to_char(brightness);
        self.plotter.draw_line(x1, y1, x2, y2, brush);
    }

    /// Rectangle at a given brightness.
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, brightness: f64, fill: bool) {
        let brush = self.brightness_to_char(brightness);
        self.plotter.draw_rectangle(x1, y1, x2, y2, brush, fill);
    }

    /// Triangle at a given brightness.
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        brightness: f64,
        fill: bool,
    ) {
        let brush = self.brightness_to_char(brightness);
        self.plotter.draw_triangle(x1, y1, x2, y2, x3, y3, brush, fill);
    }

    /// Circle at a given brightness.
    pub fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: i32, brightness: f64, fill: bool) {
        let brush = self.brightness_to_char(brightness);
        self.plotter.draw_circle(center_x, center_y, radius, brush, fill);
    }

    /// Flood fill with the character for `brightness`.
    ///
    /// # Errors
    /// Returns [`GrayError::Core`] for a seed outside the grid.
    pub fn flood_fill(&mut self, x: i32, y: i32, brightness: f64) -> Result<(), GrayError> {
        let brush = self.brightness_to_char(brightness);
        Ok(self.plotter.flood_fill(x, y, brush)?)
    }

    /// Scanline fill with the character for `brightness`.
    ///
    /// # Errors
    /// Returns [`GrayError::Core`] for a seed outside the grid.
    pub fn scanline_fill(&mut self, x: i32, y: i32, brightness: f64) -> Result<(), GrayError> {
        let brush = self.brightness_to_char(brightness);
        Ok(self.plotter.scanline_fill(x, y, brush)?)
    }

    /// Repaints every cell with a brush computed per cell.
    fn paint_all(&mut self, brightness_at: impl Fn(i32, i32) -> f64) {
        let palette = &self.palette;
        let grid = self.plotter.grid_mut();
        let background = grid.background();
        let (w, h) = (grid.width(), grid.height());
        let ink = Ink(|x, y| palette.brightness_to_char(brightness_at(x, y), background));
        raster::fill_rect(grid, 0, 0, w - 1, h - 1, &ink);
    }

    /// Dégradé linéaire de `(x1, y1)` vers `(x2, y2)` sur toute la grille.
    pub fn draw_linear_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        start_brightness: f64,
        end_brightness: f64,
    ) {
        self.paint_all(|x, y| linear_brightness(x, y, (x1, y1), (x2, y2), start_brightness, end_brightness));
    }

    /// Dégradé radial autour de `(center_x, center_y)` sur toute la grille.
    pub fn draw_radial_gradient(
        &mut self,
        center_x: i32,
        center_y: i32,
        radius: i32,
        center_brightness: f64,
        edge_brightness: f64,
    ) {
        self.paint_all(|x, y| {
            radial_brightness(x, y, (center_x, center_y), radius, center_brightness, edge_brightness)
        });
    }

    /// Approximate brightness of one cell.
    ///
    /// # Errors
    /// Returns [`GrayError::Core`] outside the grid.
    pub fn pixel_brightness(&self, x: i32, y: i32) -> Result<f64, GrayError> {
        let ch = self.grid().at(x, y)?;
        Ok(self.char_to_brightness(ch))
    }

    /// Writes the palette character for `brightness` into one cell.
    ///
    /// # Errors
    /// Returns [`GrayError::Core`] outside the grid.
    pub fn set_pixel_brightness(&mut self, x: i32, y: i32, brightness: f64) -> Result<(), GrayError> {
        let ch = self.brightness_to_char(brightness);
        self.plotter.grid_mut().put(x, y, ch).map_err(GrayError::from)
    }

    fn matrix(&self) -> BrightnessMatrix {
        let grid = self.grid();
        BrightnessMatrix::from_fn(grid.width() as usize, grid.height() as usize, |x, y| {
            self.char_to_brightness(grid.pixel(x as i32, y as i32))
        })
    }

    fn write_matrix(&mut self, matrix: &BrightnessMatrix) {
        let palette = &self.palette;
        let grid = self.plotter.grid_mut();
        let background = grid.background();
        for (cell, &b) in grid.cells_mut().iter_mut().zip(matrix.values()) {
            *cell = palette.brightness_to_char(b, background);
        }
    }

    /// Applies `f` to every cell's brightness and writes the result back.
    fn map_brightness(&mut self, f: impl Fn(f64) -> f64) {
        let palette = &self.palette;
        let grid = self.plotter.grid_mut();
        let background = grid.background();
        for cell in grid.cells_mut() {
            let b = palette.char_to_brightness(*cell, background);
            *cell = palette.brightness_to_char(f(b), background);
        }
    }

    /// Matrice de luminosité, une ligne par rangée.
    #[must_use]
    pub fn brightness_matrix(&self) -> Vec<Vec<f64>> {
        self.matrix().to_rows()
    }

    /// Mean brightness; 0 for a vacant grid.
    #[must_use]
    pub fn average_brightness(&self) -> f64 {
        let grid = self.grid();
        if grid.cells().is_empty() {
            return 0.0;
        }
        let sum: f64 = grid.cells().iter().map(|&c| self.char_to_brightness(c)).sum();
        sum / grid.cells().len() as f64
    }

    /// Darkest and brightest cell values; `(0, 0)` for a vacant grid.
    #[must_use]
    pub fn min_max_brightness(&self) -> (f64, f64) {
        let mut iter = self.grid().cells().iter().map(|&c| self.char_to_brightness(c));
        let Some(first) = iter.next() else {
            return (0.0, 0.0);
        };
        iter.fold((first, first), |(lo, hi), b| (lo.min(b), hi.max(b)))
    }

    /// Multiplies every brightness by `factor` (clamped on write).
    pub fn adjust_brightness(&mut self, factor: f64) {
        self.map_brightness(|b| b * factor);
    }

    /// Step function: `b >= threshold` becomes 1, anything else 0.
    pub fn apply_threshold(&mut self, threshold: f64) {
        self.map_brightness(|b| if b >= threshold { 1.0 } else { 0.0 });
    }

    /// `b` becomes `1 - b`.
    pub fn invert_brightness(&mut self) {
        self.map_brightness(|b| 1.0 - b);
    }

    fn apply_kernel(&mut self, kernel: &Kernel) {
        if kernel.size() == 1 {
            return;
        }
        let blurred = self.matrix().convolve(kernel);
        self.write_matrix(&blurred);
    }

    /// Flou moyen (noyau uniforme).
    ///
    /// # Errors
    /// Returns [`GrayError::InvalidKernel`] unless `kernel_size` is odd and
    /// within `1..=Kernel::MAX_SIZE`.
    pub fn apply_box_blur(&mut self, kernel_size: i32) -> Result<(), GrayError> {
        let kernel = Kernel::box_blur(kernel_size)?;
        self.apply_kernel(&kernel);
        Ok(())
    }

    /// Gaussian blur with [`DEFAULT_SIGMA`].
    ///
    /// # Errors
    /// Returns [`GrayError::InvalidKernel`] unless `kernel_size` is odd and
    /// within `1..=Kernel::MAX_SIZE`.
    pub fn apply_gaussian_blur(&mut self, kernel_size: i32) -> Result<(), GrayError> {
        self.apply_gaussian_blur_with_sigma(kernel_size, DEFAULT_SIGMA)
    }

    /// Gaussian blur with an explicit sigma.
    ///
    /// # Errors
    /// Returns [`GrayError::InvalidKernel`] for a bad size and
    /// [`GrayError::InvalidSigma`] for a non-finite or non-positive sigma.
    pub fn apply_gaussian_blur_with_sigma(&mut self, kernel_size: i32, sigma: f64) -> Result<(), GrayError> {
        let kernel = Kernel::gaussian(kernel_size, sigma)?;
        self.apply_kernel(&kernel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_core::error::CoreError;

    fn small() -> GrayscalePlotter {
        GrayscalePlotter::new(5, 5, ' ', Palette::from(" .#")).unwrap()
    }

    #[test]
    fn example_palette_mapping() {
        let plotter = small();
        assert_eq!(plotter.brightness_to_char(0.5), '.');
        assert_eq!(plotter.brightness_to_char(0.0), ' ');
        assert_eq!(plotter.brightness_to_char(1.0), '#');
        assert_eq!(plotter.palette_size(), 3);
    }

    #[test]
    fn filled_rectangle_at_full_brightness() {
        let mut plotter = small();
        plotter.draw_rectangle(1, 1, 3, 3, 1.0, true);
        let grid = plotter.grid();
        for y in 0..5 {
            for x in 0..5 {
                let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
                assert_eq!(grid.pixel(x, y), if inside { '#' } else { ' ' });
            }
        }
    }

    #[test]
    fn empty_palette_uses_marker() {
        let mut plotter = GrayscalePlotter::new(3, 1, '-', Palette::empty()).unwrap();
        assert_eq!(plotter.brightness_to_char(0.0), '-');
        assert_eq!(plotter.brightness_to_char(2.0), '@');
        plotter.draw_line(0, 0, 2, 0, 0.7);
        assert_eq!(plotter.grid().to_string(), "@@@\n");
    }

    #[test]
    fn shapes_and_fills_use_mapped_char() {
        let mut plotter = GrayscalePlotter::new(9, 9, ' ', Palette::default()).unwrap();
        plotter.draw_circle(4, 4, 3, 1.0, false);
        plotter.scanline_fill(4, 4, 0.5).unwrap();
        assert_eq!(plotter.grid().pixel(4, 4), plotter.brightness_to_char(0.5));
        assert_eq!(plotter.grid().pixel(7, 4), '@');
        plotter.flood_fill(0, 0, 1.0 / 9.0).unwrap();
        assert_eq!(plotter.grid().pixel(0, 0), '.');
        plotter.draw_triangle(0, 8, 8, 8, 4, 5, 0.0, true);
        assert_eq!(plotter.grid().pixel(4, 7), ' ');
        assert!(plotter.flood_fill(9, 0, 1.0).is_err());
    }

    #[test]
    fn pixel_brightness_round_trip() {
        let mut plotter = GrayscalePlotter::new(4, 4, ' ', Palette::default()).unwrap();
        plotter.set_pixel_brightness(1, 2, 1.0).unwrap();
        assert_eq!(plotter.pixel_brightness(1, 2).unwrap(), 1.0);

        plotter.set_pixel_brightness(0, 0, 0.3).unwrap();
        let back = plotter.pixel_brightness(0, 0).unwrap();
        assert!((back - 3.0 / 9.0).abs() < 1e-12, "quantised to the nearest step");

        assert!(plotter.set_pixel_brightness(4, 0, 0.5).is_err());
        assert!(plotter.pixel_brightness(-1, 0).is_err());
    }

    #[test]
    fn box_blur_size_one_is_identity() {
        let mut plotter = GrayscalePlotter::new(6, 4, ' ', Palette::default()).unwrap();
        plotter.draw_linear_gradient(0, 0, 5, 0, 0.0, 1.0);
        plotter.plotter_mut().draw_line(0, 3, 5, 3, 'x');
        let before = plotter.grid().clone();
        plotter.apply_box_blur(1).unwrap();
        assert_eq!(plotter.grid(), &before);
        plotter.apply_gaussian_blur(1).unwrap();
        assert_eq!(plotter.grid(), &before);
    }

    #[test]
    fn box_blur_spreads_a_dot() {
        let mut plotter = GrayscalePlotter::new(7, 7, ' ', Palette::default()).unwrap();
        plotter.set_pixel_brightness(3, 3, 1.0).unwrap();
        plotter.apply_box_blur(3).unwrap();
        let grid = plotter.grid();
        for y in 0..7 {
            for x in 0..7 {
                let near = (2..=4).contains(&x) && (2..=4).contains(&y);
                assert_eq!(grid.pixel(x, y), if near { '.' } else { ' ' }, "({x}, {y})");
            }
        }
    }

    #[test]
    fn blur_keeps_uniform_grid() {
        let mut plotter = GrayscalePlotter::new(5, 4, '#', Palette::default()).unwrap();
        plotter.apply_gaussian_blur(5).unwrap();
        assert!(plotter.grid().cells().iter().all(|&c| c == '#'));
        plotter.apply_box_blur(3).unwrap();
        assert!(plotter.grid().cells().iter().all(|&c| c == '#'));
    }

    #[test]
    fn blur_rejects_bad_kernels() {
        let mut plotter = small();
        assert!(matches!(plotter.apply_box_blur(2), Err(GrayError::InvalidKernel { size: 2 })));
        assert!(plotter.apply_gaussian_blur(0).is_err());
        assert!(plotter.apply_gaussian_blur_with_sigma(3, 0.0).is_err());
        let before = plotter.grid().clone();
        assert!(matches!(
            plotter.apply_box_blur(i32::MAX),
            Err(GrayError::InvalidKernel { size: i32::MAX })
        ));
        assert!(plotter.apply_gaussian_blur(Kernel::MAX_SIZE + 2).is_err());
        assert_eq!(plotter.grid(), &before);
    }

    #[test]
    fn gaussian_blur_softens_edge() {
        let mut plotter = GrayscalePlotter::new(8, 3, ' ', Palette::default()).unwrap();
        plotter.draw_rectangle(4, 0, 7, 2, 1.0, true);
        plotter.apply_gaussian_blur(3).unwrap();
        let row = &plotter.brightness_matrix()[1];
        assert_eq!(row[0], 0.0);
        assert_eq!(row[7], 1.0);
        assert!(row[3] > 0.0 && row[3] < 1.0);
        assert!(row[4] > 0.0 && row[4] < 1.0);
        for pair in row.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn linear_gradient_spans_palette() {
        let mut plotter = GrayscalePlotter::new(10, 2, ' ', Palette::default()).unwrap();
        plotter.draw_linear_gradient(0, 0, 9, 0, 0.0, 1.0);
        assert_eq!(plotter.grid().row(0).unwrap().iter().collect::<String>(), " .:-=+*#%@");
        assert_eq!(plotter.grid().row(1).unwrap(), plotter.grid().row(0).unwrap());
    }

    #[test]
    fn radial_gradient_peaks_at_centre() {
        let mut plotter = GrayscalePlotter::new(9, 9, ' ', Palette::default()).unwrap();
        plotter.draw_radial_gradient(4, 4, 4, 1.0, 0.0);
        assert_eq!(plotter.grid().pixel(4, 4), '@');
        assert_eq!(plotter.grid().pixel(0, 0), ' ');
        assert_eq!(plotter.grid().pixel(8, 4), ' ');
        let (lo, hi) = plotter.min_max_brightness();
        assert_eq!((lo, hi), (0.0, 1.0));
    }

    #[test]
    fn global_adjustments() {
        let mut plotter = GrayscalePlotter::new(3, 1, ' ', Palette::default()).unwrap();
        plotter.set_pixel_brightness(0, 0, 1.0).unwrap();
        plotter.set_pixel_brightness(1, 0, 1.0 / 9.0).unwrap();

        let mut inverted = plotter.clone();
        inverted.invert_brightness();
        assert_eq!(inverted.grid().to_string(), " %@\n");

        let mut halved = plotter.clone();
        halved.adjust_brightness(0.5);
        assert_eq!(halved.grid().pixel(0, 0), '+');

        let mut boosted = plotter.clone();
        boosted.adjust_brightness(20.0);
        assert_eq!(boosted.grid().to_string(), "@@ \n");

        plotter.apply_threshold(0.5);
        assert_eq!(plotter.grid().to_string(), "@  \n");
    }

    #[test]
    fn average_and_matrix() {
        let mut plotter = GrayscalePlotter::new(2, 2, ' ', Palette::from(" #")).unwrap();
        plotter.set_pixel_brightness(0, 0, 1.0).unwrap();
        assert!((plotter.average_brightness() - 0.25).abs() < 1e-12);
        assert_eq!(plotter.brightness_matrix(), vec![vec![1.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn palette_swap_and_validation() {
        let mut plotter = small();
        assert!(plotter.set_palette(Palette::new(vec!['a', '\0'])).is_err());
        plotter.set_palette(Palette::from(" ░▒▓█")).unwrap();
        assert_eq!(plotter.brightness_to_char(1.0), '█');
        assert!(GrayscalePlotter::new(2, 2, ' ', Palette::new(vec!['\0'])).is_err());
        assert!(matches!(
            GrayscalePlotter::new(0, 2, ' ', Palette::default()),
            Err(GrayError::Core(CoreError::InvalidDimensions { .. }))
        ));
    }
}
