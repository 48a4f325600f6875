//! Remplissage de régions 4-connexes.
//!
//! Both fills sample the seed's colour once at entry and replace every cell
//! of that colour reachable through up/down/left/right steps.

use cp_core::error::CoreError;
use cp_core::grid::Grid;

/// Seed colour, or `None` when the fill has nothing to do.
fn prepare(grid: &Grid, x: i32, y: i32, replacement: char) -> Result<Option<char>, CoreError> {
    let target = grid.at(x, y)?;
    if replacement == '\0' {
        return Err(CoreError::NullBackground);
    }
    if target == replacement {
        return Ok(None);
    }
    Ok(Some(target))
}

/// Stack-based flood fill from `(x, y)`.
///
/// # Errors
/// Returns [`CoreError::OutOfBounds`] if the seed is outside the grid and
/// [`CoreError::NullBackground`] for a NUL replacement.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_raster::fill::flood_fill;
/// let mut grid = Grid::new(3, 3, '.').unwrap();
/// grid.set_pixel(1, 0, '#');
/// grid.set_pixel(1, 1, '#');
/// grid.set_pixel(1, 2, '#');
/// flood_fill(&mut grid, 0, 0, 'o').unwrap();
/// assert_eq!(grid.to_string(), "o#.\no#.\no#.\n");
/// ```
pub fn flood_fill(grid: &mut Grid, x: i32, y: i32, replacement: char) -> Result<(), CoreError> {
    let Some(target) = prepare(grid, x, y, replacement)? else {
        return Ok(());
    };

    let mut stack = vec![(x, y)];
    while let Some((px, py)) = stack.pop() {
        if !grid.in_bounds(px, py) || grid.pixel(px, py) != target {
            continue;
        }
        grid.set_pixel(px, py, replacement);
        stack.push((px + 1, py));
        stack.push((px - 1, py));
        stack.push((px, py + 1));
        stack.push((px, py - 1));
    }
    Ok(())
}

/// Horizontal run of candidate cells, both ends inclusive.
#[derive(Clone, Copy, Debug)]
struct Span {
    y: i32,
    x_start: i32,
    x_end: i32,
}

/// Pushes one span per run of `target` cells on row `y` within `[left, right]`.
fn push_runs(grid: &Grid, stack: &mut Vec<Span>, y: i32, left: i32, right: i32, target: char) {
    if y < 0 || y >= grid.height() {
        return;
    }
    let mut x = left;
    while x <= right {
        if grid.pixel(x, y) != target {
            x += 1;
            continue;
        }
        let x_start = x;
        while x <= right && grid.pixel(x, y) == target {
            x += 1;
        }
        stack.push(Span {
            y,
            x_start,
            x_end: x - 1,
        });
    }
}

/// Span-based fill from `(x, y)`. Same result as [`flood_fill`]; the stack
/// holds spans instead of cells.
///
/// # Errors
/// Returns [`CoreError::OutOfBounds`] if the seed is outside the grid and
/// [`CoreError::NullBackground`] for a NUL replacement.
pub fn scanline_fill(grid: &mut Grid, x: i32, y: i32, replacement: char) -> Result<(), CoreError> {
    let Some(target) = prepare(grid, x, y, replacement)? else {
        return Ok(());
    };
    let width = grid.width();

    let mut stack = vec![Span {
        y,
        x_start: x,
        x_end: x,
    }];
    while let Some(span) = stack.pop() {
        let row = span.y;
        let mut sx = span.x_start;
        while sx <= span.x_end {
            if grid.pixel(sx, row) != target {
                sx += 1;
                continue;
            }

            let mut left = sx;
            while left > 0 && grid.pixel(left - 1, row) == target {
                left -= 1;
            }
            let mut right = sx;
            while right + 1 < width && grid.pixel(right + 1, row) == target {
                right += 1;
            }

            for cx in left..=right {
                grid.set_pixel(cx, row, replacement);
            }
            push_runs(grid, &mut stack, row - 1, left, right, target);
            push_runs(grid, &mut stack, row + 1, left, right, target);

            sx = right + 1;
        }
    }
    Ok(())
}
