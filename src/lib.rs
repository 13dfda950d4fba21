//! `magcalc` library crate.
//!
//! The binary (`magcalc`) is a thin wrapper around this library so that:
//!
//! - the evaluator and sweep exporter are testable without spawning processes
//!   or loading a real ONNX model
//! - the REPL can be driven from in-memory buffers

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod plot;
pub mod predict;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;
