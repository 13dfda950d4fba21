//! Model file lookup.
//!
//! Candidates are checked in order; the first one that is an existing, readable
//! regular file wins.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Default model file name, looked up relative to the working directory.
pub const DEFAULT_MODEL_FILE: &str = "rf_model.onnx";

/// Which candidate was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub path: PathBuf,
    /// Position in the candidate list (0 = primary).
    pub index: usize,
}

impl ResolvedModel {
    pub fn is_fallback(&self) -> bool {
        self.index > 0
    }
}

/// Return the first candidate that can be opened for reading.
pub fn resolve_model_path(candidates: &[PathBuf]) -> Result<ResolvedModel, AppError> {
    if candidates.is_empty() {
        return Err(AppError::load("No model path configured."));
    }

    for (index, path) in candidates.iter().enumerate() {
        match check_readable(path) {
            Ok(()) => {
                if index > 0 {
                    log::warn!("Primary model not found; using fallback {}", path.display());
                }
                return Ok(ResolvedModel {
                    path: path.clone(),
                    index,
                });
            }
            Err(reason) => log::debug!("Model candidate {} rejected: {reason}", path.display()),
        }
    }

    let tried = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::load(format!(
        "No model file is accessible (tried: {tried})."
    )))
}

fn check_readable(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err("not found".to_string());
    }
    if !path.is_file() {
        return Err("not a regular file".to_string());
    }
    File::open(path).map(|_| ()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::scratch_dir;

    #[test]
    fn picks_primary_when_present() {
        let dir = scratch_dir("locate-primary");
        let primary = dir.join("rf_model.onnx");
        let fallback = dir.join("other.onnx");
        std::fs::write(&primary, b"model").unwrap();
        std::fs::write(&fallback, b"model").unwrap();

        let resolved = resolve_model_path(&[primary.clone(), fallback]).unwrap();
        assert_eq!(resolved.path, primary);
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn falls_back_when_primary_missing() {
        let dir = scratch_dir("locate-fallback");
        let primary = dir.join("missing.onnx");
        let fallback = dir.join("fallback.onnx");
        std::fs::write(&fallback, b"model").unwrap();

        let resolved = resolve_model_path(&[primary, fallback.clone()]).unwrap();
        assert_eq!(resolved.path, fallback);
        assert_eq!(resolved.index, 1);
        assert!(resolved.is_fallback());
    }

    #[test]
    fn directory_is_not_a_model() {
        let dir = scratch_dir("locate-dir");
        let err = resolve_model_path(&[dir.clone()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn none_accessible_names_every_candidate() {
        let dir = scratch_dir("locate-none");
        let a = dir.join("a.onnx");
        let b = dir.join("b.onnx");

        let err = resolve_model_path(&[a.clone(), b.clone()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        let msg = err.to_string();
        assert!(msg.contains(&a.display().to_string()));
        assert!(msg.contains(&b.display().to_string()));
    }

    #[test]
    fn empty_candidate_list_fails() {
        let err = resolve_model_path(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }
}
