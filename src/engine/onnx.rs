//! ONNX Runtime backend.
//!
//! `OnnxEnvironment` is the process-wide runtime context. It is created once by
//! the app and passed to whatever needs to load a model, instead of relying on
//! ambient global initialization.

use std::path::{Path, PathBuf};

use ort::session::Session;
use ort::value::Tensor;

use crate::domain::TensorData;
use crate::engine::Model;
use crate::error::AppError;

/// Name the runtime environment registers under (shows up in ORT logs).
const ENVIRONMENT_NAME: &str = "magcalc";

/// Initialized ONNX Runtime environment.
#[derive(Debug)]
pub struct OnnxEnvironment {
    _initialized: (),
}

impl OnnxEnvironment {
    /// Initialize the runtime environment.
    ///
    /// A failed commit is logged and not fatal here: session creation reports it
    /// as a load error.
    pub fn init() -> Self {
        let committed = ort::init().with_name(ENVIRONMENT_NAME).commit();
        match committed.failure() {
            Some(reason) => log::warn!(
                "ONNX Runtime environment '{ENVIRONMENT_NAME}' failed to initialize: {reason}"
            ),
            None => log::debug!("ONNX Runtime environment '{ENVIRONMENT_NAME}' committed"),
        }
        Self { _initialized: () }
    }

    /// Load a model file into a CPU session.
    pub fn load_model(&self, path: &Path) -> Result<OnnxModel, AppError> {
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| {
                AppError::load(format!("Failed to load ONNX model '{}': {e}", path.display()))
            })?;

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        if input_names.is_empty() || output_names.is_empty() {
            return Err(AppError::load(format!(
                "ONNX model '{}' declares {} input(s) and {} output(s); expected at least one of each.",
                path.display(),
                input_names.len(),
                output_names.len()
            )));
        }

        log::info!(
            "Loaded '{}' (inputs: {:?}, outputs: {:?})",
            path.display(),
            input_names,
            output_names
        );

        Ok(OnnxModel {
            path: path.to_path_buf(),
            session,
            input_names,
            output_names,
        })
    }
}

/// Outcome of committing the runtime environment.
trait CommitOutcome {
    fn failure(&self) -> Option<String>;
}

/// `false` only means an environment already existed.
impl CommitOutcome for bool {
    fn failure(&self) -> Option<String> {
        None
    }
}

impl<T, E: std::fmt::Display> CommitOutcome for Result<T, E> {
    fn failure(&self) -> Option<String> {
        self.as_ref().err().map(|e| e.to_string())
    }
}

/// A model backed by an ONNX Runtime session.
pub struct OnnxModel {
    path: PathBuf,
    session: Session,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl OnnxModel {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("path", &self.path)
            .field("input_names", &self.input_names)
            .field("output_names", &self.output_names)
            .finish()
    }
}

impl Model for OnnxModel {
    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn run(&mut self, input: &TensorData) -> Result<Vec<TensorData>, AppError> {
        let shape: Vec<i64> = input.shape.iter().map(|&d| d as i64).collect();
        let tensor = Tensor::from_array((shape, input.data.clone()))
            .map_err(|e| AppError::inference(format!("Failed to build input tensor: {e}")))?;

        // Only the first declared input is fed; the model takes one [1,3] tensor.
        let input_name = self.input_names[0].as_str();
        let outputs = self
            .session
            .run(ort::inputs![input_name => tensor])
            .map_err(|e| AppError::inference(format!("ONNX Runtime error: {e}")))?;

        let mut out = Vec::with_capacity(self.output_names.len());
        for (idx, name) in self.output_names.iter().enumerate() {
            match outputs[name.as_str()].try_extract_tensor::<f32>() {
                Ok((shape, data)) => out.push(TensorData::new(
                    shape.iter().map(|&d| d.max(0) as usize).collect(),
                    data.to_vec(),
                )),
                Err(e) if idx == 0 => {
                    return Err(AppError::inference(format!(
                        "Output '{name}' is not an f32 tensor: {e}"
                    )));
                }
                // Secondary outputs are informational only.
                Err(e) => log::debug!("Skipping output '{name}': {e}"),
            }
        }
        Ok(out)
    }
}
