//! Inference engine seam.
//!
//! The rest of the crate only sees the `Model` trait:
//! - `onnx` implements it on top of ONNX Runtime (`ort`)
//! - `locate` picks which model file to load
//!
//! Tests drive the evaluator and exporter with stub models instead of a real
//! runtime session.

pub mod locate;
pub mod onnx;

pub use locate::*;
pub use onnx::*;

use crate::domain::TensorData;
use crate::error::AppError;

/// A loaded regression model.
///
/// Implementations run synchronously; `run` blocks until the engine returns.
pub trait Model {
    /// Declared input names, in order.
    fn input_names(&self) -> &[String];

    /// Declared output names, in order.
    fn output_names(&self) -> &[String];

    /// Run one forward pass.
    ///
    /// Failures are reported as `ErrorKind::Inference`.
    fn run(&mut self, input: &TensorData) -> Result<Vec<TensorData>, AppError>;
}
