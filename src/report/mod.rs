//! Reporting utilities: banner, menu, and result formatting.

pub mod format;

pub use format::*;
