//! Domain types used throughout the app.
//!
//! This module defines:
//!
//! - model query/response values (`FeatureVector`, `TensorData`)
//! - sweep types (`SweepRange`, `SweepRecord`)
//! - run configuration (`RunConfig`, `ModelLocation`, `PlotConfig`)

pub mod types;

pub use types::*;
