//! Interpolations de luminosité pour les dégradés.

#[inline(always)]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Brightness at `(x, y)` for a linear gradient from `from` (value `start`)
/// to `to` (value `end`).
///
/// The cell is projected onto the segment; the projection is clamped to the
/// segment, so cells beyond an endpoint take that endpoint's value. A
/// zero-length segment gives `start` everywhere.
///
/// # Example
/// ```
/// use cp_gray::gradient::linear_brightness;
/// assert_eq!(linear_brightness(0, 0, (0, 0), (4, 0), 0.0, 1.0), 0.0);
/// assert_eq!(linear_brightness(2, 7, (0, 0), (4, 0), 0.0, 1.0), 0.5);
/// assert_eq!(linear_brightness(9, 0, (0, 0), (4, 0), 0.0, 1.0), 1.0);
/// ```
#[must_use]
pub fn linear_brightness(x: i32, y: i32, from: (i32, i32), to: (i32, i32), start: f64, end: f64) -> f64 {
    let dx = f64::from(to.0) - f64::from(from.0);
    let dy = f64::from(to.1) - f64::from(from.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return start;
    }
    let px = f64::from(x) - f64::from(from.0);
    let py = f64::from(y) - f64::from(from.1);
    let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
    lerp(start, end, t)
}

/// Brightness at `(x, y)` for a radial gradient: `center_value` at the
/// centre, `edge_value` at `radius` and beyond.
///
/// With `radius <= 0` only the centre cell keeps `center_value`.
///
/// # Example
/// ```
/// use cp_gray::gradient::radial_brightness;
/// assert_eq!(radial_brightness(5, 5, (5, 5), 4, 1.0, 0.0), 1.0);
/// assert_eq!(radial_brightness(7, 5, (5, 5), 4, 1.0, 0.0), 0.5);
/// assert_eq!(radial_brightness(0, 0, (5, 5), 4, 1.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn radial_brightness(x: i32, y: i32, center: (i32, i32), radius: i32, center_value: f64, edge_value: f64) -> f64 {
    let dx = f64::from(x) - f64::from(center.0);
    let dy = f64::from(y) - f64::from(center.1);
    let distance = dx.hypot(dy);
    if radius <= 0 {
        return if distance == 0.0 { center_value } else { edge_value };
    }
    let t = (distance / f64::from(radius)).min(1.0);
    lerp(center_value, edge_value, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_monotonic_along_segment() {
        let mut prev = -1.0;
        for x in 0..=10 {
            let b = linear_brightness(x, 3, (0, 3), (10, 3), 0.0, 1.0);
            assert!(b >= prev);
            prev = b;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn linear_clamps_before_start() {
        assert_eq!(linear_brightness(-5, 0, (0, 0), (10, 10), 0.2, 0.8), 0.2);
        assert_eq!(linear_brightness(3, 3, (3, 3), (3, 3), 0.4, 0.9), 0.4);
    }

    #[test]
    fn diagonal_projection() {
        // (4, 0) projects onto the midpoint of (0,0)-(4,4).
        let b = linear_brightness(4, 0, (0, 0), (4, 4), 0.0, 1.0);
        assert!((b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn radial_degenerate_radius() {
        assert_eq!(radial_brightness(2, 2, (2, 2), 0, 0.9, 0.1), 0.9);
        assert_eq!(radial_brightness(3, 2, (2, 2), 0, 0.9, 0.1), 0.1);
        assert_eq!(radial_brightness(3, 2, (2, 2), -4, 0.9, 0.1), 0.1);
    }
}
