//! Test-only helpers: a stub `Model` and scratch directories.

use std::path::PathBuf;

use crate::domain::TensorData;
use crate::engine::Model;
use crate::error::AppError;

type Respond = Box<dyn FnMut(&TensorData) -> Vec<TensorData>>;

/// In-memory model that records every input it sees.
pub struct StubModel {
    inputs: Vec<String>,
    outputs: Vec<String>,
    respond: Respond,
    fail_at: Option<usize>,
    pub calls: Vec<TensorData>,
}

impl StubModel {
    /// Always answers `[[value]]`.
    pub fn constant(value: f32) -> Self {
        Self::with(move |_| vec![TensorData::scalar(value)])
    }

    /// Answers with `f(input)`.
    pub fn with(f: impl FnMut(&TensorData) -> Vec<TensorData> + 'static) -> Self {
        Self {
            inputs: vec!["float_input".to_string()],
            outputs: vec!["variable".to_string()],
            respond: Box::new(f),
            fail_at: None,
            calls: Vec::new(),
        }
    }

    /// Deterministic magnetization-like curve of the temperature feature.
    pub fn linear_in_temperature() -> Self {
        Self::with(|input| vec![TensorData::scalar(1.0 - input.data[2] / 1000.0)])
    }

    /// Fail the call with zero-based index `call`.
    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }
}

impl Model for StubModel {
    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }

    fn run(&mut self, input: &TensorData) -> Result<Vec<TensorData>, AppError> {
        let call = self.calls.len();
        self.calls.push(input.clone());
        if self.fail_at == Some(call) {
            return Err(AppError::inference(format!("stub failure on call {call}")));
        }
        Ok((self.respond)(input))
    }
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("magcalc-{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
