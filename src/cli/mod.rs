//! Command-line parsing for the magnetization calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the inference/export code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod repl;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "magcalc",
    version,
    about = "Magnetization predictions from a pre-trained ONNX regression model"
)]
pub struct Cli {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu: `a` sweeps temperature, `s` predicts one value, `exit` quits.
    Repl(PlotArgs),
    /// Predict magnetization for one (thickness, diameter, temperature).
    Single(SingleArgs),
    /// Sweep temperature for fixed thickness/diameter and export `<thickness>_<diameter>.csv`.
    Sweep(SweepArgs),
    /// Print the resolved model path and its input/output names.
    Info,
}

/// Model lookup and output location (accepted by every subcommand).
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model file (defaults to $MAGCALC_MODEL, then `rf_model.onnx`).
    #[arg(long, global = true, value_name = "ONNX")]
    pub model: Option<PathBuf>,

    /// Model file tried when the primary one is not accessible (defaults to $MAGCALC_MODEL_FALLBACK).
    #[arg(long = "fallback-model", global = true, value_name = "ONNX")]
    pub fallback_model: Option<PathBuf>,

    /// Directory sweep CSV files are written into.
    #[arg(long = "out-dir", global = true, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

/// Terminal plot options for sweeps.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Do not print the ASCII plot after a sweep.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for a single prediction.
#[derive(Debug, Args, Clone)]
pub struct SingleArgs {
    /// Film thickness.
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub thickness: f32,

    /// Grain diameter.
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub diameter: f32,

    /// Temperature.
    #[arg(short = 'T', long, allow_negative_numbers = true)]
    pub temperature: f32,
}

/// Options for a temperature sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Film thickness.
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub thickness: f32,

    /// Grain diameter.
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub diameter: f32,

    /// First temperature.
    #[arg(long = "t-start", default_value_t = 0.0, allow_negative_numbers = true)]
    pub t_start: f32,

    /// Last temperature (included when reachable from the start by whole steps).
    #[arg(long = "t-stop", default_value_t = 900.0, allow_negative_numbers = true)]
    pub t_stop: f32,

    /// Temperature step.
    #[arg(long = "t-step", default_value_t = 2.0)]
    pub t_step: f32,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_defaults_to_0_900_step_2() {
        let cli = Cli::try_parse_from(["magcalc", "sweep", "-t", "1.5", "-d", "2"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!((args.t_start, args.t_stop, args.t_step), (0.0, 900.0, 2.0));
        assert_eq!(args.thickness, 1.5);
        assert_eq!(args.diameter, 2.0);
        assert!(!args.plot.no_plot);
        assert_eq!(cli.model.out_dir, PathBuf::from("."));
    }

    #[test]
    fn global_model_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "magcalc",
            "single",
            "-t",
            "1",
            "-d",
            "2",
            "-T",
            "300",
            "--model",
            "m.onnx",
            "--fallback-model",
            "/srv/m.onnx",
        ])
        .unwrap();
        assert_eq!(cli.model.model, Some(PathBuf::from("m.onnx")));
        assert_eq!(cli.model.fallback_model, Some(PathBuf::from("/srv/m.onnx")));
        let Command::Single(args) = cli.command else {
            panic!("expected single");
        };
        assert_eq!(args.temperature, 300.0);
    }

    #[test]
    fn single_requires_all_three_features() {
        assert!(Cli::try_parse_from(["magcalc", "single", "-t", "1", "-d", "2"]).is_err());
    }
}
