//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the evaluator/exporter stay free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use std::path::Path;

use crate::domain::SweepRecord;
use crate::predict::SweepRequest;

const BANNER: &str = r"
 .----------------.  .----------------.  .-----------------. .----------------.
| .--------------. || .--------------. || .--------------. || .--------------. |
| | ____    ____ | || |     _____    | || | ____  _____  | || |  _________   | |
| ||_   \  /   _|| || |    |_   _|   | || ||_   \|_   _| | || | |  _   _  |  | |
| |  |   \/   |  | || |      | |     | || |  |   \ | |   | || | |_/ | | \_|  | |
| |  | |\  /| |  | || |      | |     | || |  | |\ \| |   | || |     | |      | |
| | _| |_\/_| |_ | || |     _| |_    | || | _| |_\   |_  | || |    _| |_     | |
| ||_____||_____|| || |    |_____|   | || ||_____|\____| | || |   |_____|    | |
| |              | || |              | || |              | || |              | |
| '--------------' || '--------------' || '--------------' || '--------------' |
 '----------------'  '----------------'  '----------------'  '----------------'
";

/// Start-up banner.
pub fn format_banner() -> String {
    let mut out = String::new();
    out.push_str("Magnetic Information Storage Technology, MSU & UoY\n");
    out.push_str(BANNER);
    out.push_str("\nMagCalc (MINT Lab) ML version trained from Vampire Data\n");
    out
}

/// REPL menu.
pub fn format_menu() -> &'static str {
    "\nSelect mode: \n(a) Autorun with temperature from 0 to 900 \n(s) Single value prediction \n(exit) to close:\n> "
}

/// Result line of a single prediction.
pub fn format_single_result(magnetization: f32) -> String {
    format!("Magnetization: {magnetization:.6}")
}

/// Model path and tensor names.
pub fn format_model_info(path: &Path, inputs: &[String], outputs: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Model: {}\n", path.display()));
    out.push_str(&format!("Inputs : {}\n", fmt_names(inputs)));
    out.push_str(&format!("Outputs: {}\n", fmt_names(outputs)));
    out
}

/// One-line summary of a finished sweep.
pub fn format_sweep_summary(request: &SweepRequest, records: &[SweepRecord]) -> String {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return format!(
            "Sweep t={} d={}: no samples",
            request.thickness, request.diameter
        );
    };

    let (min, max) = records.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.magnetization), hi.max(r.magnetization))
    });

    format!(
        "Sweep t={} d={}: {} samples, T=[{}, {}], M=[{min:.6}, {max:.6}]",
        request.thickness,
        request.diameter,
        records.len(),
        first.temperature,
        last.temperature,
    )
}

fn fmt_names(names: &[String]) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }
    names.join(", ")
}
