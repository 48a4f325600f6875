use cp_core::grid::Grid;

use crate::brush::Brush;

/// Écrit une cellule déjà clippée ; une encre NUL laisse la cellule intacte.
#[inline(always)]
fn paint<B: Brush + ?Sized>(grid: &mut Grid, x: i32, y: i32, brush: &B) {
    let ch = brush.ink(x, y);
    if ch != '\0' {
        grid.set_pixel(x, y, ch);
    }
}

/// Écrit une cellule si elle est dans la grille, sinon l'ignore (clipping).
#[inline(always)]
fn plot<B: Brush + ?Sized>(grid: &mut Grid, x: i64, y: i64, brush: &B) {
    if x < 0 || y < 0 || x >= i64::from(grid.width()) || y >= i64::from(grid.height()) {
        return;
    }
    paint(grid, x as i32, y as i32, brush);
}

/// Horizontal run from `xa` to `xb` inclusive on row `y`, clipped.
fn hline<B: Brush + ?Sized>(grid: &mut Grid, y: i64, xa: i64, xb: i64, brush: &B) {
    if y < 0 || y >= i64::from(grid.height()) {
        return;
    }
    let (lo, hi) = if xa <= xb { (xa, xb) } else { (xb, xa) };
    let lo = lo.max(0);
    let hi = hi.min(i64::from(grid.width()) - 1);
    let y = y as i32;
    for x in lo..=hi {
        paint(grid, x as i32, y, brush);
    }
}

/// Walks the segment one major-axis step at a time.
///
/// The minor offset at step `i` is `i * minor / major` rounded half up, so a
/// step can be computed without walking the ones before it. With `window`
/// set, only the steps whose major coordinate lands inside
/// `[0, width) × [0, height)` are visited.
fn walk_line(
    from: (i32, i32),
    to: (i32, i32),
    window: Option<(i32, i32)>,
    mut visit: impl FnMut(i64, i64),
) {
    let (start, end) = if from <= to { (from, to) } else { (to, from) };
    let (x0, y0) = (i64::from(start.0), i64::from(start.1));
    let (dx, dy) = (i64::from(end.0) - x0, i64::from(end.1) - y0);

    let x_major = dx.abs() >= dy.abs();
    let (major0, minor0, d_major, d_minor) = if x_major { (x0, y0, dx, dy) } else { (y0, x0, dy, dx) };
    let (span, rise) = (d_major.abs(), d_minor.abs());
    let (s_major, s_minor) = (d_major.signum(), d_minor.signum());

    let (mut first, mut last) = (0, span);
    if let Some((w, h)) = window {
        let size = i64::from(if x_major { w } else { h });
        if s_major >= 0 {
            first = first.max(-major0);
            last = last.min(size - 1 - major0);
        } else {
            first = first.max(major0 - (size - 1));
            last = last.min(major0);
        }
    }

    for i in first..=last {
        let offset = if span == 0 {
            0
        } else {
            ((2 * i128::from(i) * i128::from(rise) + i128::from(span)) / (2 * i128::from(span))) as i64
        };
        let (major, minor) = (major0 + s_major * i, minor0 + s_minor * offset);
        if x_major {
            visit(major, minor);
        } else {
            visit(minor, major);
        }
    }
}

/// Visits every cell of the Bresenham segment between two endpoints.
///
/// Endpoints are ordered first, so both directions visit the same cells.
///
/// # Example
/// ```
/// use cp_raster::raster::line_points;
/// let mut pts = Vec::new();
/// line_points(0, 0, 3, 1, |x, y| pts.push((x, y)));
/// assert_eq!(pts, vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
/// ```
pub fn line_points(x1: i32, y1: i32, x2: i32, y2: i32, visit: impl FnMut(i64, i64)) {
    walk_line((x1, y1), (x2, y2), None, visit);
}

/// Trace un segment avec Bresenham.
///
/// Only the steps that can reach the grid are walked, so the cost is bounded
/// by the grid size whatever the endpoints.
pub fn draw_line<B: Brush + ?Sized>(grid: &mut Grid, x1: i32, y1: i32, x2: i32, y2: i32, brush: &B) {
    let window = (grid.width(), grid.height());
    walk_line((x1, y1), (x2, y2), Some(window), |x, y| plot(grid, x, y, brush));
}

/// Fills the rectangle spanned by two corners (any order), clamped to the grid.
pub fn fill_rect<B: Brush + ?Sized>(grid: &mut Grid, x1: i32, y1: i32, x2: i32, y2: i32, brush: &B) {
    let (left, right) = (x1.min(x2), x1.max(x2));
    let (top, bottom) = (y1.min(y2), y1.max(y2));
    let Ok(Some(rect)) = grid.clamp_rect(left, top, right, bottom) else {
        return;
    };
    for y in rect.top..=rect.bottom {
        hline(grid, i64::from(y), i64::from(rect.left), i64::from(rect.right), brush);
    }
}

/// Rectangle outline (four Bresenham edges) or filled block.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_raster::raster::draw_rectangle;
/// let mut grid = Grid::new(4, 3, '.').unwrap();
/// draw_rectangle(&mut grid, 0, 0, 3, 2, &'#', false);
/// assert_eq!(grid.to_string(), "####\n#..#\n####\n");
/// ```
pub fn draw_rectangle<B: Brush + ?Sized>(
    grid: &mut Grid,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    brush: &B,
    fill: bool,
) {
    if fill {
        fill_rect(grid, x1, y1, x2, y2, brush);
        return;
    }
    let (left, right) = (x1.min(x2), x1.max(x2));
    let (top, bottom) = (y1.min(y2), y1.max(y2));
    draw_line(grid, left, top, right, top, brush);
    draw_line(grid, left, bottom, right, bottom, brush);
    draw_line(grid, left, top, left, bottom, brush);
    draw_line(grid, right, top, right, bottom, brush);
}

/// Signed doubled area of `(a, b, p)`; positive when `p` is on the inner side
/// of `a → b` for a clockwise (screen-space) triangle.
///
/// Products of two `i32` spans need 64 bits each, their difference needs more.
#[inline(always)]
fn edge(a: (i64, i64), b: (i64, i64), p: (i64, i64)) -> i128 {
    i128::from(b.0 - a.0) * i128::from(p.1 - a.1) - i128::from(b.1 - a.1) * i128::from(p.0 - a.0)
}

/// Top-left rule: top edges (horizontal, going right) and left edges (going up) own their pixels.
#[inline(always)]
fn is_top_left(a: (i64, i64), b: (i64, i64)) -> bool {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    (dy == 0 && dx > 0) || dy < 0
}

#[inline(always)]
fn widen(v: (i32, i32)) -> (i64, i64) {
    (i64::from(v.0), i64::from(v.1))
}

/// Visits the interior cells of a triangle under the top-left convention.
///
/// Pixel centres sit on integer coordinates. Adjacent triangles sharing an
/// edge never visit the same cell. Visits nothing for a zero-area triangle.
pub fn triangle_cells(
    v0: (i32, i32),
    v1: (i32, i32),
    v2: (i32, i32),
    bounds: (i32, i32),
    mut visit: impl FnMut(i32, i32),
) {
    let (a, mut b, mut c) = (widen(v0), widen(v1), widen(v2));
    let area = edge(a, b, c);
    if area == 0 {
        return;
    }
    if area < 0 {
        std::mem::swap(&mut b, &mut c);
    }

    let (w, h) = (i64::from(bounds.0), i64::from(bounds.1));
    let min_x = a.0.min(b.0).min(c.0).max(0);
    let max_x = a.0.max(b.0).max(c.0).min(w - 1);
    let min_y = a.1.min(b.1).min(c.1).max(0);
    let max_y = a.1.max(b.1).max(c.1).min(h - 1);

    let owns = |e: i128, from: (i64, i64), to: (i64, i64)| e > 0 || (e == 0 && is_top_left(from, to));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let q = (x, y);
            if owns(edge(a, b, q), a, b) && owns(edge(b, c, q), b, c) && owns(edge(c, a, q), c, a) {
                visit(x as i32, y as i32);
            }
        }
    }
}

/// Triangle outline, or its interior filled with the top-left convention.
///
/// A degenerate filled triangle falls back to its edges.
pub fn draw_triangle<B: Brush + ?Sized>(
    grid: &mut Grid,
    v0: (i32, i32),
    v1: (i32, i32),
    v2: (i32, i32),
    brush: &B,
    fill: bool,
) {
    let area = edge(widen(v0), widen(v1), widen(v2));
    if fill && area != 0 {
        let bounds = (grid.width(), grid.height());
        triangle_cells(v0, v1, v2, bounds, |x, y| paint(grid, x, y, brush));
        return;
    }
    draw_line(grid, v0.0, v0.1, v1.0, v1.1, brush);
    draw_line(grid, v1.0, v1.1, v2.0, v2.1, brush);
    draw_line(grid, v2.0, v2.1, v0.0, v0.1, brush);
}

/// Column offset the midpoint walk picks on row offset `y`:
/// `sqrt(r² - y²)` rounded to nearest (no exact ties exist for integers).
#[inline(always)]
fn octant_x(r: i64, y: i64) -> i64 {
    let n = r * r - y * y;
    let s = n.isqrt();
    if n - s * s > s { s + 1 } else { s }
}

/// Last row offset of the first octant, where `octant_x(r, y) >= y` still holds.
fn octant_end(r: i64) -> i64 {
    let (mut lo, mut hi) = (0, r);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if octant_x(r, mid) >= mid {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Half-width of the filled span on row offset `t` (`0 <= t <= r`).
fn span_half_width(r: i64, t: i64, end: i64) -> i64 {
    if t <= end {
        octant_x(r, t)
    } else {
        // Widest first-octant row whose column offset still reaches `t`.
        (r * r - t * t + t - 1).max(0).isqrt().min(end)
    }
}

/// Cercle par point milieu, symétrie huit voies.
///
/// Each octant cell is computed directly from its row offset, so only rows
/// and columns crossing the grid are visited. The filled variant draws one
/// horizontal span per row. A negative radius draws nothing; radius 0 is the
/// centre cell.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// use cp_raster::raster::draw_circle;
/// let mut grid = Grid::new(5, 5, '.').unwrap();
/// draw_circle(&mut grid, 2, 2, 2, &'o', true);
/// assert_eq!(grid.to_string(), ".ooo.\nooooo\nooooo\nooooo\n.ooo.\n");
/// ```
pub fn draw_circle<B: Brush + ?Sized>(grid: &mut Grid, cx: i32, cy: i32, radius: i32, brush: &B, fill: bool) {
    if radius < 0 {
        return;
    }
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let (w, h) = (i64::from(grid.width()), i64::from(grid.height()));
    if cx + r < 0 || cy + r < 0 || cx - r >= w || cy - r >= h {
        return;
    }
    let end = octant_end(r);

    if fill {
        for row in (cy - r).max(0)..=(cy + r).min(h - 1) {
            let half = span_half_width(r, (row - cy).abs(), end);
            hline(grid, row, cx - half, cx + half, brush);
        }
        return;
    }

    for row in (cy - end).max(0)..=(cy + end).min(h - 1) {
        let x = octant_x(r, (row - cy).abs());
        plot(grid, cx + x, row, brush);
        plot(grid, cx - x, row, brush);
    }
    for col in (cx - end).max(0)..=(cx + end).min(w - 1) {
        let y = octant_x(r, (col - cx).abs());
        plot(grid, col, cy + y, brush);
        plot(grid, col, cy - y, brush);
    }
}
