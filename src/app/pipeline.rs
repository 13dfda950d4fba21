//! Model opening shared by every front-end (REPL and one-shot commands).
//!
//! path candidates -> first readable file -> runtime environment -> session

use crate::domain::RunConfig;
use crate::engine::{OnnxEnvironment, OnnxModel, ResolvedModel, resolve_model_path};
use crate::error::AppError;

/// A ready-to-query model plus the runtime environment it was built from.
#[derive(Debug)]
pub struct LoadedModel {
    pub resolved: ResolvedModel,
    pub model: OnnxModel,
    // Held so the runtime context outlives the session.
    _environment: OnnxEnvironment,
}

/// Resolve the model path from the config and load it.
///
/// `on_resolved` runs between path selection and the (slow) session creation,
/// so front-ends can tell the user which file is being loaded.
pub fn open_model(
    config: &RunConfig,
    on_resolved: impl FnOnce(&ResolvedModel),
) -> Result<LoadedModel, AppError> {
    let resolved = resolve_model_path(&config.model.candidates())?;
    log::info!("Using model {}", resolved.path.display());
    on_resolved(&resolved);

    let environment = OnnxEnvironment::init();
    let model = environment.load_model(&resolved.path)?;

    Ok(LoadedModel {
        resolved,
        model,
        _environment: environment,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{ModelLocation, PlotConfig};
    use crate::error::ErrorKind;
    use crate::test_support::scratch_dir;

    #[test]
    fn missing_model_fails_before_touching_the_runtime() {
        let dir = scratch_dir("pipeline-missing");
        let config = RunConfig {
            model: ModelLocation {
                primary: dir.join("rf_model.onnx"),
                fallback: Some(dir.join("backup.onnx")),
            },
            out_dir: PathBuf::from("."),
            plot: PlotConfig {
                enabled: false,
                width: 10,
                height: 5,
            },
        };

        let mut called = false;
        let err = open_model(&config, |_| called = true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(!called);
    }
}
