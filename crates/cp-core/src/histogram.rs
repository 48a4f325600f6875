use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::grid::Grid;

/// Character → occurrence count, ordered by character.
pub type ColorHistogram = BTreeMap<char, usize>;

/// Compte les occurrences de chaque caractère sur toute la grille.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_core::histogram::color_histogram;
/// let mut grid = Grid::new(2, 2, '.').unwrap();
/// grid.set_pixel(0, 0, '#');
/// let hist = color_histogram(&grid);
/// assert_eq!(hist[&'.'], 3);
/// assert_eq!(hist[&'#'], 1);
/// ```
#[must_use]
pub fn color_histogram(grid: &Grid) -> ColorHistogram {
    let mut hist = ColorHistogram::new();
    for &ch in grid.cells() {
        *hist.entry(ch).or_insert(0) += 1;
    }
    hist
}

/// Histogram over an inclusive rectangle, clamped like [`Grid::fill_region`].
///
/// # Errors
/// Returns [`CoreError::InvalidRegion`] for an inverted rectangle.
pub fn color_histogram_in(
    grid: &Grid,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> Result<ColorHistogram, CoreError> {
    let mut hist = ColorHistogram::new();
    let Some(rect) = grid.clamp_rect(x1, y1, x2, y2)? else {
        return Ok(hist);
    };
    for y in rect.top..=rect.bottom {
        let row = grid.row(y)?;
        for &ch in &row[rect.left as usize..=rect.right as usize] {
            *hist.entry(ch).or_insert(0) += 1;
        }
    }
    Ok(hist)
}

/// Least and most frequent characters. Ties go to the smaller character.
///
/// # Example
/// ```
/// use cp_core::histogram::{min_max_colors, ColorHistogram};
/// let hist = ColorHistogram::from([('a', 3), ('b', 1), ('c', 3)]);
/// assert_eq!(min_max_colors(&hist), Some(('b', 'a')));
/// ```
#[must_use]
pub fn min_max_colors(hist: &ColorHistogram) -> Option<(char, char)> {
    let mut iter = hist.iter();
    let (&first, &count) = iter.next()?;
    let (mut min, mut max) = ((first, count), (first, count));
    for (&ch, &n) in iter {
        if n < min.1 {
            min = (ch, n);
        }
        if n > max.1 {
            max = (ch, n);
        }
    }
    Some((min.0, max.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_histogram_is_clamped() {
        let mut grid = Grid::new(4, 4, '.').unwrap();
        grid.fill_region(0, 0, 1, 1, '#').unwrap();
        let hist = color_histogram_in(&grid, -5, -5, 1, 2).unwrap();
        assert_eq!(hist.get(&'#'), Some(&4));
        assert_eq!(hist.get(&'.'), Some(&2));
        assert_eq!(hist.values().sum::<usize>(), 6);
    }

    #[test]
    fn region_histogram_rejects_inverted() {
        let grid = Grid::new(2, 2, '.').unwrap();
        assert!(matches!(
            color_histogram_in(&grid, 1, 0, 0, 1),
            Err(CoreError::InvalidRegion { .. })
        ));
        assert!(color_histogram_in(&grid, 5, 5, 9, 9).unwrap().is_empty());
    }

    #[test]
    fn whole_grid_counts_every_cell() {
        let grid = Grid::new(5, 3, ' ').unwrap();
        let hist = color_histogram(&grid);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[&' '], 15);
    }

    #[test]
    fn min_max_of_empty_is_none() {
        assert_eq!(min_max_colors(&ColorHistogram::new()), None);
    }
}
