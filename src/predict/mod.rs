//! Model queries.
//!
//! Responsibilities:
//!
//! - evaluate one feature vector (`evaluate`)
//! - scan temperature for fixed thickness/diameter and export the curve (`sweep`)

pub mod evaluate;
pub mod sweep;

pub use evaluate::*;
pub use sweep::*;
