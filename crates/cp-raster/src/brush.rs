/// Ce qu'une primitive écrit dans chaque cellule couverte.
///
/// A plain `char` paints every cell the same; [`Ink`] computes the
/// character per cell (gradients).
///
/// # Example
/// ```
/// use cp_raster::brush::{Brush, Ink};
/// assert_eq!('#'.ink(3, 4), '#');
/// let checker = Ink(|x: i32, y: i32| if (x + y) % 2 == 0 { '#' } else { '.' });
/// assert_eq!(checker.ink(1, 0), '.');
/// ```
pub trait Brush {
    /// Character for cell `(x, y)`. Only called for in-bounds cells.
    ///
    /// Returning `'\0'` leaves the cell as it was.
    fn ink(&self, x: i32, y: i32) -> char;
}

impl Brush for char {
    #[inline(always)]
    fn ink(&self, _x: i32, _y: i32) -> char {
        *self
    }
}

/// Per-cell brush backed by a closure.
pub struct Ink<F>(pub F);

impl<F: Fn(i32, i32) -> char> Brush for Ink<F> {
    #[inline(always)]
    fn ink(&self, x: i32, y: i32) -> char {
        (self.0)(x, y)
    }
}

impl<B: Brush + ?Sized> Brush for &B {
    #[inline(always)]
    fn ink(&self, x: i32, y: i32) -> char {
        (**self).ink(x, y)
    }
}
