use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Width or height below 1.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: i32,
        /// Height value.
        height: i32,
    },

    /// `width * height` does not fit in an `i32`.
    #[error("Grid too large : {width}×{height} overflows")]
    SizeOverflow {
        /// Width value.
        width: i32,
        /// Height value.
        height: i32,
    },

    /// Background (or written cell) set to NUL.
    #[error("Background can't be set to null")]
    NullBackground,

    /// Checked access outside the grid.
    #[error("Coordonnées hors grille : ({x}, {y}) pour {width}×{height}")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// Rectangle given with `x1 > x2` or `y1 > y2`.
    #[error("Incorrect region : ({x1}, {y1})-({x2}, {y2})")]
    InvalidRegion {
        /// Left corner as supplied.
        x1: i32,
        /// Top corner as supplied.
        y1: i32,
        /// Right corner as supplied.
        x2: i32,
        /// Bottom corner as supplied.
        y2: i32,
    },

    /// Well-formed rectangle with no cell inside the grid.
    #[error("Region ({x1}, {y1})-({x2}, {y2}) lies outside the grid")]
    RegionOutside {
        /// Left corner as supplied.
        x1: i32,
        /// Top corner as supplied.
        y1: i32,
        /// Right corner as supplied.
        x2: i32,
        /// Bottom corner as supplied.
        y2: i32,
    },

    /// Row, column or lane position outside its dimension.
    #[error("Position de parcours invalide : {position} (limite {limit})")]
    InvalidPosition {
        /// Requested position.
        position: i64,
        /// Length of the dimension: one past the last cell.
        limit: i64,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
