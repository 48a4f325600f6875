use std::fmt;
use std::io::{self, Write};

use crate::error::CoreError;
use crate::traverse::Lane;

/// Background used when none is supplied, and by a vacated grid.
pub const DEFAULT_BACKGROUND: char = ' ';

/// Inclusive rectangle already clamped to a grid's bounds.
///
/// # Example
/// ```
/// use cp_core::grid::Rect;
/// let r = Rect { left: 1, top: 1, right: 3, bottom: 2 };
/// assert_eq!((r.width(), r.height()), (3, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// First column.
    pub left: i32,
    /// First row.
    pub top: i32,
    /// Last column (inclusive).
    pub right: i32,
    /// Last row (inclusive).
    pub bottom: i32,
}

impl Rect {
    /// Number of columns covered.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }
}

/// Surface de dessin : buffer de caractères row-major, taille fixe.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// let mut grid = Grid::new(3, 2, '.').unwrap();
/// grid.put(1, 1, 'x').unwrap();
/// assert_eq!(grid.at(1, 1).unwrap(), 'x');
/// assert_eq!(grid.size(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    background: char,
    /// Cells, row-major, `width * height` long.
    cells: Vec<char>,
}

impl Grid {
    /// Crée une grille remplie du caractère de fond.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either dimension is below 1,
    /// [`CoreError::NullBackground`] for a NUL background and
    /// [`CoreError::SizeOverflow`] when `width * height` overflows `i32`.
    pub fn new(width: i32, height: i32, background: char) -> Result<Self, CoreError> {
        if width < 1 || height < 1 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        if background == '\0' {
            return Err(CoreError::NullBackground);
        }
        let size = width
            .checked_mul(height)
            .ok_or(CoreError::SizeOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            background,
            cells: vec![background; size as usize],
        })
    }

    /// Same as [`Grid::new`] with [`DEFAULT_BACKGROUND`].
    ///
    /// # Errors
    /// See [`Grid::new`].
    pub fn with_size(width: i32, height: i32) -> Result<Self, CoreError> {
        Self::new(width, height, DEFAULT_BACKGROUND)
    }

    /// Transfers the buffer out, leaving `self` vacant (`0×0`, empty buffer).
    ///
    /// # Example
    /// ```
    /// use cp_core::grid::Grid;
    /// let mut a = Grid::new(2, 2, '#').unwrap();
    /// let b = a.take();
    /// assert_eq!(b.size(), 4);
    /// assert!(a.is_vacant());
    /// assert_eq!((a.width(), a.height()), (0, 0));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::vacant())
    }

    fn vacant() -> Self {
        Self {
            width: 0,
            height: 0,
            background: DEFAULT_BACKGROUND,
            cells: Vec::new(),
        }
    }

    /// True once the buffer was moved out by [`Grid::take`].
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.width * self.height
    }

    /// Caractère de fond.
    #[must_use]
    pub fn background(&self) -> char {
        self.background
    }

    /// True if `(x, y)` addresses a cell.
    #[inline(always)]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline(always)]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn check(&self, x: i32, y: i32) -> Result<usize, CoreError> {
        if self.in_bounds(x, y) {
            Ok(self.offset(x, y))
        } else {
            Err(CoreError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checked read.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfBounds`] outside the grid.
    pub fn at(&self, x: i32, y: i32) -> Result<char, CoreError> {
        let idx = self.check(x, y)?;
        Ok(self.cells[idx])
    }

    /// Checked mutable access.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfBounds`] outside the grid.
    pub fn at_mut(&mut self, x: i32, y: i32) -> Result<&mut char, CoreError> {
        let idx = self.check(x, y)?;
        Ok(&mut self.cells[idx])
    }

    /// Checked write.
    ///
    /// # Errors
    /// Returns [`CoreError::OutOfBounds`] outside the grid and
    /// [`CoreError::NullBackground`] when `ch` is NUL.
    pub fn put(&mut self, x: i32, y: i32, ch: char) -> Result<(), CoreError> {
        if ch == '\0' {
            return Err(CoreError::NullBackground);
        }
        *self.at_mut(x, y)? = ch;
        Ok(())
    }

    /// Unchecked read. The caller has validated `(x, y)`.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> char {
        debug_assert!(self.in_bounds(x, y), "pixel out of bounds");
        self.cells[self.offset(x, y)]
    }

    /// Unchecked mutable access. The caller has validated `(x, y)`.
    #[inline(always)]
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> &mut char {
        debug_assert!(self.in_bounds(x, y), "pixel out of bounds");
        let idx = self.offset(x, y);
        &mut self.cells[idx]
    }

    /// Unchecked write. The caller has validated `(x, y)`.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: i32, y: i32, ch: char) {
        *self.pixel_mut(x, y) = ch;
    }

    /// Remplit tout le buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::NullBackground`] when `fill` is NUL.
    pub fn clear(&mut self, fill: char) -> Result<(), CoreError> {
        if fill == '\0' {
            return Err(CoreError::NullBackground);
        }
        self.cells.fill(fill);
        Ok(())
    }

    /// Intersects an inclusive rectangle with the grid.
    ///
    /// Returns `Ok(None)` when nothing is left after clamping.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRegion`] when `x1 > x2` or `y1 > y2`.
    pub fn clamp_rect(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Option<Rect>, CoreError> {
        if x1 > x2 || y1 > y2 {
            return Err(CoreError::InvalidRegion { x1, y1, x2, y2 });
        }
        let rect = Rect {
            left: x1.max(0),
            top: y1.max(0),
            right: x2.min(self.width - 1),
            bottom: y2.min(self.height - 1),
        };
        if rect.left > rect.right || rect.top > rect.bottom {
            return Ok(None);
        }
        Ok(Some(rect))
    }

    /// Fills an inclusive rectangle, clamped to the grid.
    ///
    /// # Example
    /// ```
    /// use cp_core::grid::Grid;
    /// let mut grid = Grid::new(3, 2, '.').unwrap();
    /// grid.fill_region(-2, -2, 1, 1, 'x').unwrap();
    /// assert_eq!(grid.to_string(), "xx.\nxx.\n");
    /// ```
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRegion`] for an inverted rectangle and
    /// [`CoreError::NullBackground`] when `fill` is NUL.
    pub fn fill_region(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, fill: char) -> Result<(), CoreError> {
        if fill == '\0' {
            return Err(CoreError::NullBackground);
        }
        let Some(rect) = self.clamp_rect(x1, y1, x2, y2)? else {
            return Ok(());
        };
        for y in rect.top..=rect.bottom {
            let start = self.offset(rect.left, y);
            let end = self.offset(rect.right, y);
            self.cells[start..=end].fill(fill);
        }
        Ok(())
    }

    /// Writes the content: `height` lines of `width` characters.
    ///
    /// # Errors
    /// Propagates I/O errors from `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut line = String::with_capacity(self.width.max(0) as usize + 1);
        for y in 0..self.height {
            line.clear();
            line.extend(self.row_cells(y));
            line.push('\n');
            out.write_all(line.as_bytes())?;
        }
        out.flush()
    }

    /// Writes the `Grid WxH` / `Background` / `Content:` header, then the content.
    ///
    /// # Example
    /// ```
    /// use cp_core::grid::Grid;
    /// let grid = Grid::new(2, 1, '#').unwrap();
    /// let mut out = Vec::new();
    /// grid.write_to(&mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "Grid 2x1\nBackground: '#'\nContent:\n##\n");
    /// ```
    ///
    /// # Errors
    /// Propagates I/O errors from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Grid {}x{}", self.width, self.height)?;
        writeln!(out, "Background: '{}'", self.background)?;
        writeln!(out, "Content:")?;
        self.render(out)
    }

    fn row_cells(&self, y: i32) -> impl Iterator<Item = char> + '_ {
        let start = self.offset(0, y);
        self.cells[start..start + self.width as usize].iter().copied()
    }

    fn position_error(position: i32, limit: i32) -> CoreError {
        CoreError::InvalidPosition {
            position: i64::from(position),
            limit: i64::from(limit),
        }
    }

    /// Lane over row `y`, starting at column `from_x`.
    ///
    /// `y == height` or `from_x == width` give an empty lane (one past the end).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] beyond one past the end.
    pub fn row_lane(&self, y: i32, from_x: i32) -> Result<Lane, CoreError> {
        if !(0..=self.height).contains(&y) {
            return Err(Self::position_error(y, self.height));
        }
        if !(0..=self.width).contains(&from_x) {
            return Err(Self::position_error(from_x, self.width));
        }
        let len = if y < self.height { self.width - from_x } else { 0 };
        Ok(Lane::new(self.offset(from_x, y), 1, len as usize))
    }

    /// Lane over column `x`, starting at row `from_y`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] beyond one past the end.
    pub fn column_lane(&self, x: i32, from_y: i32) -> Result<Lane, CoreError> {
        if !(0..=self.width).contains(&x) {
            return Err(Self::position_error(x, self.width));
        }
        if !(0..=self.height).contains(&from_y) {
            return Err(Self::position_error(from_y, self.height));
        }
        let len = if x < self.width { self.height - from_y } else { 0 };
        Ok(Lane::new(
            self.offset(x, from_y),
            self.width.max(1) as usize,
            len as usize,
        ))
    }

    /// Lane over the whole buffer in row-major order, from linear position `from`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] beyond one past the end.
    pub fn pixel_lane(&self, from: i32) -> Result<Lane, CoreError> {
        let size = self.size();
        if !(0..=size).contains(&from) {
            return Err(Self::position_error(from, size));
        }
        Ok(Lane::new(from as usize, 1, (size - from) as usize))
    }

    /// Reads the cell at a lane index (row-major offset).
    #[inline(always)]
    #[must_use]
    pub fn cell_at(&self, index: usize) -> char {
        debug_assert!(index < self.cells.len(), "index out of buffer");
        self.cells[index]
    }

    /// Cells visited by `lane`.
    pub fn lane_cells(&self, lane: Lane) -> impl DoubleEndedIterator<Item = &char> + ExactSizeIterator {
        self.cells
            .iter()
            .skip(lane.start())
            .step_by(lane.stride())
            .take(lane.len())
    }

    /// Mutable cells visited by `lane`.
    pub fn lane_cells_mut(
        &mut self,
        lane: Lane,
    ) -> impl DoubleEndedIterator<Item = &mut char> + ExactSizeIterator {
        self.cells
            .iter_mut()
            .skip(lane.start())
            .step_by(lane.stride())
            .take(lane.len())
    }

    /// Row `y` as a slice.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] unless `0 <= y < height`.
    pub fn row(&self, y: i32) -> Result<&[char], CoreError> {
        if !(0..self.height).contains(&y) {
            return Err(Self::position_error(y, self.height));
        }
        let start = self.offset(0, y);
        Ok(&self.cells[start..start + self.width as usize])
    }

    /// Row `y` as a mutable slice.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] unless `0 <= y < height`.
    pub fn row_mut(&mut self, y: i32) -> Result<&mut [char], CoreError> {
        if !(0..self.height).contains(&y) {
            return Err(Self::position_error(y, self.height));
        }
        let start = self.offset(0, y);
        let width = self.width as usize;
        Ok(&mut self.cells[start..start + width])
    }

    /// Column `x`, top to bottom.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPosition`] unless `0 <= x < width`.
    pub fn column_mut(
        &mut self,
        x: i32,
    ) -> Result<impl DoubleEndedIterator<Item = &mut char> + ExactSizeIterator, CoreError> {
        if !(0..self.width).contains(&x) {
            return Err(Self::position_error(x, self.width));
        }
        let lane = self.column_lane(x, 0)?;
        Ok(self.lane_cells_mut(lane))
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// All cells, row-major, mutable.
    pub fn cells_mut(&mut self) -> &mut [char] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for ch in self.row_cells(y) {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_contract() {
        assert!(matches!(
            Grid::new(0, 1, ' '),
            Err(CoreError::InvalidDimensions { width: 0, height: 1 })
        ));
        assert!(matches!(
            Grid::new(1, 0, ' '),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(matches!(Grid::new(1, 1, '\0'), Err(CoreError::NullBackground)));
        assert!(matches!(
            Grid::new(i32::MAX, 2, ' '),
            Err(CoreError::SizeOverflow { .. })
        ));
    }

    #[test]
    fn dimensions_and_bounds() {
        let grid = Grid::new(3, 2, '.').unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.size(), 6);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(2, 1));
        assert!(!grid.in_bounds(0, 2));
        assert!(!grid.in_bounds(3, 0));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
    }

    #[test]
    fn write_then_read_everywhere() {
        let mut grid = Grid::new(4, 3, ' ').unwrap();
        for y in 0..3 {
            for x in 0..4 {
                let ch = char::from(b'a' + (y * 4 + x) as u8);
                grid.put(x, y, ch).unwrap();
                assert_eq!(grid.at(x, y).unwrap(), ch);
            }
        }
    }

    #[test]
    fn checked_access_rejects_outside() {
        let mut grid = Grid::new(2, 2, ' ').unwrap();
        assert!(matches!(grid.at(2, 0), Err(CoreError::OutOfBounds { x: 2, .. })));
        assert!(grid.at_mut(0, -1).is_err());
        assert!(grid.put(5, 5, 'x').is_err());
        assert!(matches!(grid.put(0, 0, '\0'), Err(CoreError::NullBackground)));
    }

    #[test]
    fn fill_region_clamps_and_rejects_inverted() {
        let mut grid = Grid::new(3, 2, '.').unwrap();
        grid.fill_region(-2, -2, 1, 1, 'x').unwrap();
        assert_eq!(grid.pixel(0, 0), 'x');
        assert_eq!(grid.pixel(1, 1), 'x');
        assert_eq!(grid.pixel(2, 0), '.');
        assert_eq!(grid.pixel(2, 1), '.');

        assert!(matches!(
            grid.fill_region(3, 3, 1, 1, 'x'),
            Err(CoreError::InvalidRegion { .. })
        ));

        let before = grid.clone();
        grid.fill_region(10, 10, 20, 20, 'o').unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn clear_fills_buffer() {
        let mut grid = Grid::new(2, 2, '.').unwrap();
        grid.clear('#').unwrap();
        assert!(grid.cells().iter().all(|&c| c == '#'));
        assert!(grid.clear('\0').is_err());
    }

    #[test]
    fn take_leaves_vacant_grid() {
        let mut grid = Grid::new(3, 3, '*').unwrap();
        let moved = grid.take();
        assert_eq!(moved.background(), '*');
        assert_eq!(moved.size(), 9);
        assert!(grid.is_vacant());
        assert_eq!(grid.size(), 0);
        assert_eq!(grid.background(), DEFAULT_BACKGROUND);
        assert!(!grid.in_bounds(0, 0));
        assert_eq!(grid.to_string(), "");
        assert!(grid.fill_region(0, 0, 1, 1, 'x').is_ok());
        assert_eq!(grid.pixel_lane(0).unwrap().len(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = Grid::new(2, 2, '.').unwrap();
        let b = a.clone();
        a.set_pixel(0, 0, 'x');
        assert_eq!(b.pixel(0, 0), '.');
    }

    #[test]
    fn header_and_content_format() {
        let mut grid = Grid::new(3, 2, '.').unwrap();
        grid.set_pixel(1, 0, '#');
        let mut out = Vec::new();
        grid.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Grid 3x2\nBackground: '.'\nContent:\n.#.\n...\n");
    }

    #[test]
    fn row_and_column_views() {
        let mut grid = Grid::new(2, 3, '.').unwrap();
        for (i, cell) in grid.column_mut(1).unwrap().enumerate() {
            *cell = char::from(b'a' + i as u8);
        }
        assert_eq!(grid.row(0).unwrap(), &['.', 'a']);
        assert_eq!(grid.row(2).unwrap(), &['.', 'c']);
        grid.row_mut(1).unwrap().fill('z');
        assert_eq!(grid.to_string(), ".a\nzz\n.c\n");
        assert!(grid.row(3).is_err());
        assert!(grid.column_mut(2).is_err());
    }

    #[test]
    fn view_errors_report_dimension_as_limit() {
        let mut grid = Grid::new(2, 3, '.').unwrap();
        let expected = |position, limit| CoreError::InvalidPosition { position, limit };
        assert_eq!(grid.row(3).unwrap_err(), expected(3, 3));
        assert_eq!(grid.row(-1).unwrap_err(), expected(-1, 3));
        assert_eq!(grid.row_mut(4).unwrap_err(), expected(4, 3));
        assert!(matches!(
            grid.column_mut(2),
            Err(CoreError::InvalidPosition { position: 2, limit: 2 })
        ));
        // Lanes share the convention: the limit itself is the empty lane.
        assert!(grid.row_lane(3, 0).unwrap().is_empty());
        assert_eq!(grid.row_lane(4, 0).unwrap_err(), expected(4, 3));
    }
}
