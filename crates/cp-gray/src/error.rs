use cp_core::error::CoreError;
use thiserror::Error;

/// Errors originating from the grayscale layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrayError {
    /// Grid-level failure (bounds, construction).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Convolution kernel size must be odd, between 1 and `Kernel::MAX_SIZE`.
    #[error("Taille de noyau invalide : {size} (impair, entre 1 et 255 attendu)")]
    InvalidKernel {
        /// Requested size.
        size: i32,
    },

    /// Gaussian sigma must be finite and positive.
    #[error("Sigma invalide : {sigma}")]
    InvalidSigma {
        /// Requested sigma.
        sigma: f64,
    },

    /// Palette entries must not be NUL.
    #[error("Palette contains a null character")]
    NullPaletteEntry,
}
