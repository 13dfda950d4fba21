//! Terminal plots of sweep results.

pub mod ascii;

pub use ascii::*;
