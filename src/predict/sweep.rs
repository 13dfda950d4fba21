//! Temperature sweep with CSV export.
//!
//! For fixed thickness and diameter, every temperature of a `SweepRange` is
//! evaluated in ascending order and streamed into `<thickness>_<diameter>.csv`.
//! The first failure aborts the sweep; rows produced before it stay in the
//! file, which is flushed and closed before the error is returned.

use std::path::{Path, PathBuf};

use crate::domain::{FeatureVector, SweepRange, SweepRecord};
use crate::engine::Model;
use crate::error::AppError;
use crate::io::export::{SweepWriter, sweep_file_name};
use crate::predict::evaluate;

/// Fixed parameters of one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRequest {
    pub thickness: f32,
    pub diameter: f32,
    pub range: SweepRange,
}

impl SweepRequest {
    /// Sweep over the default temperature range.
    pub fn new(thickness: f32, diameter: f32) -> Self {
        Self {
            thickness,
            diameter,
            range: SweepRange::default(),
        }
    }
}

/// A completed sweep.
#[derive(Debug, Clone)]
pub struct SweepOutput {
    pub path: PathBuf,
    pub records: Vec<SweepRecord>,
}

/// Evaluate every temperature sample and write the CSV into `out_dir`.
pub fn export_sweep<M: Model + ?Sized>(
    model: &mut M,
    request: &SweepRequest,
    out_dir: &Path,
) -> Result<SweepOutput, AppError> {
    let path = out_dir.join(sweep_file_name(request.thickness, request.diameter));
    let total = request.range.len();
    log::info!(
        "Sweep t={} d={}: {total} samples from {} to {} -> {}",
        request.thickness,
        request.diameter,
        request.range.start,
        request.range.temperature(total.saturating_sub(1)),
        path.display()
    );

    let mut writer = SweepWriter::create(&path)?;
    let mut records = Vec::with_capacity(total);

    for temperature in request.range.temperatures() {
        let features = FeatureVector::new(request.thickness, request.diameter, temperature);
        let record = evaluate(&mut *model, features).and_then(|magnetization| {
            let record = SweepRecord {
                temperature,
                magnetization,
            };
            writer.write(&record)?;
            Ok(record)
        });

        match record {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!(
                    "Sweep aborted at T={temperature} after {} of {total} rows: {err}",
                    writer.rows()
                );
                // Keep the partial file readable; the first error wins over a flush failure.
                if let Err(flush_err) = writer.flush() {
                    log::warn!("{flush_err}");
                }
                return Err(err);
            }
        }
    }

    let path = writer.finish()?;
    log::info!("Wrote {total} rows to {}", path.display());

    Ok(SweepOutput { path, records })
}
