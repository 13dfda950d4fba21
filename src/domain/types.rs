//! Shared domain types.
//!
//! The model's trained input contract fixes the feature order:
//! `[thickness, diameter, temperature]`. Everything that talks to a model goes
//! through `FeatureVector` so the order is defined in exactly one place.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::AppError;

/// Number of features the model expects per sample.
pub const FEATURE_COUNT: usize = 3;

/// Upper bound on the number of samples one sweep may produce.
pub const MAX_SWEEP_SAMPLES: usize = 1_000_000;

/// One model query: `(thickness, diameter, temperature)`.
///
/// Values are not validated; any float is forwarded to the model as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub thickness: f32,
    pub diameter: f32,
    pub temperature: f32,
}

impl FeatureVector {
    pub fn new(thickness: f32, diameter: f32, temperature: f32) -> Self {
        Self {
            thickness,
            diameter,
            temperature,
        }
    }

    /// Features in model input order.
    pub fn to_array(self) -> [f32; FEATURE_COUNT] {
        [self.thickness, self.diameter, self.temperature]
    }
}

/// An owned `f32` tensor exchanged with a model handle.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorData {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl TensorData {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        Self { shape, data }
    }

    /// Batch-of-one input tensor, shape `[1, 3]`.
    pub fn from_features(features: FeatureVector) -> Self {
        Self {
            shape: vec![1, FEATURE_COUNT],
            data: features.to_array().to_vec(),
        }
    }

    /// A `[1, 1]` tensor holding one value (handy for model outputs).
    pub fn scalar(value: f32) -> Self {
        Self {
            shape: vec![1, 1],
            data: vec![value],
        }
    }
}

/// One CSV row of a sweep export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRecord {
    pub temperature: f32,
    pub magnetization: f32,
}

/// Temperature samples of one sweep: `start, start + step, ...` up to and
/// including `stop` when it is reachable.
///
/// Samples are derived from an integer index so the sample count never depends
/// on float accumulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start: f32,
    pub stop: f32,
    pub step: f32,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 900.0,
            step: 2.0,
        }
    }
}

impl SweepRange {
    /// Build a range, rejecting non-finite bounds, a non-positive step, `stop < start`,
    /// more than `MAX_SWEEP_SAMPLES` samples, or a step too small to keep `f32`
    /// samples distinct.
    pub fn new(start: f32, stop: f32, step: f32) -> Result<Self, AppError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(AppError::usage(format!(
                "Sweep range must be finite (start={start}, stop={stop}, step={step})."
            )));
        }
        if step <= 0.0 {
            return Err(AppError::usage(format!("Sweep step must be positive (got {step}).")));
        }
        if stop < start {
            return Err(AppError::usage(format!(
                "Sweep stop ({stop}) must not be below start ({start})."
            )));
        }

        let range = Self { start, stop, step };
        let count = range.sample_count();
        if count > MAX_SWEEP_SAMPLES as f64 {
            return Err(AppError::usage(format!(
                "Sweep from {start} to {stop} by {step} has too many samples (limit {MAX_SWEEP_SAMPLES})."
            )));
        }
        let widest = f32_spacing(start.abs().max(stop.abs()));
        if f64::from(step) <= widest {
            return Err(AppError::usage(format!(
                "Sweep step {step} is below f32 resolution ({widest}) near {}.",
                start.abs().max(stop.abs())
            )));
        }
        Ok(range)
    }

    /// Unclamped sample count in `f64`; may be huge or NaN for unchecked fields.
    fn sample_count(&self) -> f64 {
        // Relative tolerance so `stop` stays on the grid when `(stop - start) / step`
        // is integral up to f32 rounding (e.g. step = 0.1).
        let span = (f64::from(self.stop) - f64::from(self.start)) / f64::from(self.step);
        (span * (1.0 + 1e-6)).floor() + 1.0
    }

    /// Number of samples in the range, never above `MAX_SWEEP_SAMPLES`.
    pub fn len(&self) -> usize {
        // `as` saturates: negative counts become 0, NaN becomes 0.
        self.sample_count().min(MAX_SWEEP_SAMPLES as f64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Temperature of sample `index`.
    pub fn temperature(&self, index: usize) -> f32 {
        (f64::from(self.start) + index as f64 * f64::from(self.step)) as f32
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len()).map(|i| self.temperature(i))
    }
}

/// Gap between adjacent `f32` values in the binade of `x` (`x >= 0`, finite).
fn f32_spacing(x: f32) -> f64 {
    let exponent = ((x.to_bits() >> 23) & 0xff) as i32;
    // Subnormals share the spacing of the smallest normal binade.
    2f64.powi(exponent.max(1) - 127 - 23)
}

/// Where to look for the model.
#[derive(Debug, Clone)]
pub struct ModelLocation {
    pub primary: PathBuf,
    pub fallback: Option<PathBuf>,
}

impl ModelLocation {
    /// Candidates in lookup order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = vec![self.primary.clone()];
        if let Some(fallback) = &self.fallback {
            out.push(fallback.clone());
        }
        out
    }
}

/// Terminal plot settings for sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotConfig {
    pub enabled: bool,
    pub width: usize,
    pub height: usize,
}

/// A run's configuration as understood by the app.
///
/// This is derived from CLI flags, environment, and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model: ModelLocation,
    /// Directory sweep CSV files are written into.
    pub out_dir: PathBuf,
    pub plot: PlotConfig,
}
