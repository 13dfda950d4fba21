//! Input/output helpers.
//!
//! - sweep CSV export (`export`)

pub mod export;

pub use export::*;
