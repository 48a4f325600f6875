//! Grid, traversal, configuration and shared types for charplot.
//!
//! This crate holds the character buffer every other crate draws on,
//! plus the plain configuration record consumed by the app.

pub mod charset;
pub mod config;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod traverse;

pub use config::{PlotterConfig, PlotterType};
pub use error::CoreError;
pub use grid::Grid;
pub use histogram::ColorHistogram;
pub use traverse::Lane;
