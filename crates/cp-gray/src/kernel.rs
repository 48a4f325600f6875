//! Noyaux de convolution et matrice de luminosité.

use crate::error::GrayError;

/// Square, normalised convolution kernel of odd size.
///
/// # Example
/// ```
/// use cp_gray::Kernel;
/// let k = Kernel::box_blur(3).unwrap();
/// assert_eq!(k.size(), 3);
/// assert!((k.weight(1, 1) - 1.0 / 9.0).abs() < 1e-12);
/// assert!(Kernel::box_blur(4).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Largest accepted side length.
    pub const MAX_SIZE: i32 = 255;

    fn checked_size(size: i32) -> Result<usize, GrayError> {
        if !(1..=Self::MAX_SIZE).contains(&size) || size % 2 == 0 {
            return Err(GrayError::InvalidKernel { size });
        }
        Ok(size as usize)
    }

    /// Uniform weights `1 / size²`.
    ///
    /// # Errors
    /// Returns [`GrayError::InvalidKernel`] for an even size or one outside
    /// `1..=MAX_SIZE`.
    pub fn box_blur(size: i32) -> Result<Self, GrayError> {
        let n = Self::checked_size(size)?;
        let w = 1.0 / (n * n) as f64;
        Ok(Self {
            size: n,
            weights: vec![w; n * n],
        })
    }

    /// Weights `exp(-(i² + j²) / (2σ²))` around the centre, normalised to sum 1.
    ///
    /// # Errors
    /// Returns [`GrayError::InvalidKernel`] for an even size or one outside
    /// `1..=MAX_SIZE`, and [`GrayError::InvalidSigma`] unless `sigma` is finite and positive.
    pub fn gaussian(size: i32, sigma: f64) -> Result<Self, GrayError> {
        let n = Self::checked_size(size)?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(GrayError::InvalidSigma { sigma });
        }
        let half = (n / 2) as i64;
        let two_sigma_sq = 2.0 * sigma * sigma;

        let mut weights = Vec::with_capacity(n * n);
        for j in -half..=half {
            for i in -half..=half {
                let d2 = (i * i + j * j) as f64;
                weights.push((-d2 / two_sigma_sq).exp());
            }
        }
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { size: n, weights })
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at column `i`, row `j` (0-based from the top-left tap).
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[j * self.size + i]
    }

    /// Kernel as rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.weights.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}

/// One brightness per cell, row-major. A computed view of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessMatrix {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl BrightnessMatrix {
    /// Builds the matrix by sampling `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(x, y)`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Value at the nearest in-bounds cell (edge clamping).
    #[inline(always)]
    #[must_use]
    pub fn get_clamped(&self, x: i64, y: i64) -> f64 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.get(cx, cy)
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values as rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.width == 0 {
            return Vec::new();
        }
        self.values.chunks(self.width).map(<[f64]>::to_vec).collect()
    }

    /// Convolution avec échantillonnage borné aux bords.
    ///
    /// # Example
    /// ```
    /// use cp_gray::{BrightnessMatrix, Kernel};
    /// let m = BrightnessMatrix::from_fn(3, 3, |x, y| if (x, y) == (1, 1) { 1.0 } else { 0.0 });
    /// let blurred = m.convolve(&Kernel::box_blur(3).unwrap());
    /// assert!((blurred.get(0, 0) - 1.0 / 9.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn convolve(&self, kernel: &Kernel) -> Self {
        if self.values.is_empty() {
            return self.clone();
        }
        let half = (kernel.size() / 2) as i64;
        Self::from_fn(self.width, self.height, |x, y| {
            let mut acc = 0.0;
            for j in 0..kernel.size() {
                for i in 0..kernel.size() {
                    let sx = x as i64 + i as i64 - half;
                    let sy = y as i64 + j as i64 - half;
                    acc += kernel.weight(i, j) * self.get_clamped(sx, sy);
                }
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_size_must_be_odd_and_positive() {
        for size in [0, -1, 2, 4, -3] {
            assert!(matches!(Kernel::box_blur(size), Err(GrayError::InvalidKernel { .. })));
            assert!(matches!(
                Kernel::gaussian(size, 1.0),
                Err(GrayError::InvalidKernel { .. })
            ));
        }
        assert!(Kernel::box_blur(1).is_ok());
    }

    #[test]
    fn oversized_kernels_are_rejected_before_allocating() {
        for size in [Kernel::MAX_SIZE + 2, 1_000_001, i32::MAX] {
            assert!(matches!(Kernel::box_blur(size), Err(GrayError::InvalidKernel { size: s }) if s == size));
            assert!(matches!(
                Kernel::gaussian(size, 1.0),
                Err(GrayError::InvalidKernel { .. })
            ));
        }
        assert_eq!(Kernel::box_blur(Kernel::MAX_SIZE).unwrap().size(), 255);
    }

    #[test]
    fn gaussian_is_normalised_and_peaked() {
        let k = Kernel::gaussian(5, 1.0).unwrap();
        let sum: f64 = k.to_rows().iter().flatten().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        let centre = k.weight(2, 2);
        for j in 0..5 {
            for i in 0..5 {
                assert!(k.weight(i, j) <= centre);
                assert!((k.weight(i, j) - k.weight(4 - i, 4 - j)).abs() < 1e-15);
                assert!((k.weight(i, j) - k.weight(j, i)).abs() < 1e-15);
            }
        }
        assert!(k.weight(1, 2) > k.weight(0, 2));
    }

    #[test]
    fn gaussian_rejects_bad_sigma() {
        assert!(matches!(Kernel::gaussian(3, 0.0), Err(GrayError::InvalidSigma { .. })));
        assert!(Kernel::gaussian(3, -2.0).is_err());
        assert!(Kernel::gaussian(3, f64::NAN).is_err());
    }

    #[test]
    fn convolution_clamps_at_edges() {
        let m = BrightnessMatrix::from_fn(4, 3, |_, _| 0.6);
        let blurred = m.convolve(&Kernel::gaussian(5, 1.5).unwrap());
        for &v in blurred.values() {
            assert!((v - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn size_one_kernel_is_identity() {
        let m = BrightnessMatrix::from_fn(3, 2, |x, y| (x + y) as f64 / 4.0);
        assert_eq!(m.convolve(&Kernel::box_blur(1).unwrap()), m);
    }

    #[test]
    fn rows_match_values() {
        let m = BrightnessMatrix::from_fn(2, 3, |x, y| (y * 2 + x) as f64);
        assert_eq!(m.to_rows(), vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]);
    }
}
