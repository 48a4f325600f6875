use cp_core::error::CoreError;
use cp_core::grid::Grid;

/// Copie indépendante d'un rectangle inclusif, borné à la grille source.
///
/// The copy keeps the source background.
///
/// # Errors
/// Returns [`CoreError::InvalidRegion`] for an inverted rectangle and
/// [`CoreError::RegionOutside`] when no cell of it lies in the grid.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_raster::region::extract_region;
/// let mut grid = Grid::new(4, 4, '.').unwrap();
/// grid.set_pixel(3, 3, '#');
/// let part = extract_region(&grid, 2, 2, 10, 10).unwrap();
/// assert_eq!(part.to_string(), "..\n.#\n");
/// ```
pub fn extract_region(grid: &Grid, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Grid, CoreError> {
    let rect = grid
        .clamp_rect(x1, y1, x2, y2)?
        .ok_or(CoreError::RegionOutside { x1, y1, x2, y2 })?;

    let mut out = Grid::new(rect.width(), rect.height(), grid.background())?;
    for dy in 0..rect.height() {
        let src = grid.row(rect.top + dy)?;
        out.row_mut(dy)?
            .copy_from_slice(&src[rect.left as usize..=rect.right as usize]);
    }
    Ok(out)
}

/// Colle `src` entier avec son coin haut-gauche en `(x, y)`, clippé à `dst`.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_raster::region::paste_region;
/// let mut dst = Grid::new(3, 2, '.').unwrap();
/// let src = Grid::new(2, 2, '#').unwrap();
/// paste_region(&mut dst, &src, 2, -1);
/// assert_eq!(dst.to_string(), "..#\n...\n");
/// ```
pub fn paste_region(dst: &mut Grid, src: &Grid, x: i32, y: i32) {
    let (x, y) = (i64::from(x), i64::from(y));
    let (dst_w, dst_h) = (i64::from(dst.width()), i64::from(dst.height()));
    let (src_w, src_h) = (i64::from(src.width()), i64::from(src.height()));

    // Source columns/rows that land inside the destination.
    let col_lo = (-x).max(0);
    let col_hi = src_w.min(dst_w - x);
    let row_lo = (-y).max(0);
    let row_hi = src_h.min(dst_h - y);
    if col_lo >= col_hi || row_lo >= row_hi {
        return;
    }

    for sy in row_lo..row_hi {
        let start = sy as usize * src_w as usize;
        let src_row = &src.cells()[start..start + src_w as usize];
        let dst_start = (y + sy) as usize * dst_w as usize + (x + col_lo) as usize;
        let len = (col_hi - col_lo) as usize;
        dst.cells_mut()[dst_start..dst_start + len]
            .copy_from_slice(&src_row[col_lo as usize..col_hi as usize]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: i32, h: i32) -> Grid {
        let mut grid = Grid::new(w, h, '.').unwrap();
        for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
            *cell = char::from(b'a' + (i % 26) as u8);
        }
        grid
    }

    #[test]
    fn extract_then_paste_round_trips() {
        let original = numbered(7, 5);
        let mut grid = original.clone();
        let part = extract_region(&grid, 2, 1, 5, 3).unwrap();
        assert_eq!((part.width(), part.height()), (4, 3));

        grid.fill_region(2, 1, 5, 3, '#').unwrap();
        assert_ne!(grid, original);
        paste_region(&mut grid, &part, 2, 1);
        assert_eq!(grid, original);
    }

    #[test]
    fn extract_is_independent_copy() {
        let grid = numbered(3, 3);
        let mut part = extract_region(&grid, 0, 0, 1, 1).unwrap();
        part.set_pixel(0, 0, '#');
        assert_eq!(grid.pixel(0, 0), 'a');
        assert_eq!(part.background(), grid.background());
    }

    #[test]
    fn extract_rejects_bad_rectangles() {
        let grid = numbered(3, 3);
        assert!(matches!(
            extract_region(&grid, 2, 0, 1, 2),
            Err(CoreError::InvalidRegion { .. })
        ));
        assert!(matches!(
            extract_region(&grid, 5, 5, 8, 8),
            Err(CoreError::RegionOutside { .. })
        ));
        assert!(extract_region(&grid, -4, -4, -1, 0).is_err());
    }

    #[test]
    fn extract_clamps_partial_overlap() {
        let grid = numbered(4, 4);
        let part = extract_region(&grid, -3, 2, 1, 9).unwrap();
        assert_eq!((part.width(), part.height()), (2, 2));
        assert_eq!(part.pixel(0, 0), grid.pixel(0, 2));
        assert_eq!(part.pixel(1, 1), grid.pixel(1, 3));
    }

    #[test]
    fn paste_clips_every_side() {
        let src = numbered(3, 3);
        let mut dst = Grid::new(4, 4, '.').unwrap();
        paste_region(&mut dst, &src, -1, -1);
        assert_eq!(dst.pixel(0, 0), src.pixel(1, 1));
        assert_eq!(dst.pixel(1, 1), src.pixel(2, 2));
        assert_eq!(dst.pixel(2, 2), '.');

        let mut dst = Grid::new(4, 4, '.').unwrap();
        paste_region(&mut dst, &src, 3, 3);
        assert_eq!(dst.pixel(3, 3), src.pixel(0, 0));
        assert_eq!(dst.cells().iter().filter(|&&c| c != '.').count(), 1);

        let mut dst = Grid::new(4, 4, '.').unwrap();
        paste_region(&mut dst, &src, 50, -50);
        assert!(dst.cells().iter().all(|&c| c == '.'));
        assert_eq!((dst.width(), dst.height()), (4, 4));
    }

    #[test]
    fn paste_vacant_source_is_noop() {
        let mut src = numbered(2, 2);
        let _moved = src.take();
        let mut dst = Grid::new(2, 2, '.').unwrap();
        paste_region(&mut dst, &src, 0, 0);
        assert!(dst.cells().iter().all(|&c| c == '.'));
    }
}
