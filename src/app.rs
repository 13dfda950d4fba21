//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment into a `RunConfig`
//! - opens the model
//! - dispatches to the REPL or a one-shot command

use std::path::PathBuf;

use clap::Parser;

use crate::cli::repl::Repl;
use crate::cli::{Command, ModelArgs, PlotArgs, SingleArgs, SweepArgs};
use crate::domain::{FeatureVector, ModelLocation, PlotConfig, RunConfig, SweepRange};
use crate::engine::{DEFAULT_MODEL_FILE, Model};
use crate::error::AppError;
use crate::predict::{SweepRequest, evaluate, export_sweep};

pub mod pipeline;

/// Environment variable naming the primary model file.
pub const ENV_MODEL: &str = "MAGCALC_MODEL";
/// Environment variable naming the fallback model file.
pub const ENV_MODEL_FALLBACK: &str = "MAGCALC_MODEL_FALLBACK";

/// Entry point for the `magcalc` binary.
pub fn run() -> Result<(), AppError> {
    // `magcalc` and `magcalc --model x.onnx` behave like `magcalc repl ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();
    let env = |key: &str| std::env::var(key).ok();

    match cli.command {
        Command::Repl(args) => handle_repl(run_config_from_args(&cli.model, Some(&args), env)),
        Command::Single(args) => handle_single(run_config_from_args(&cli.model, None, env), &args),
        Command::Sweep(args) => {
            handle_sweep(run_config_from_args(&cli.model, Some(&args.plot), env), &args)
        }
        Command::Info => handle_info(run_config_from_args(&cli.model, None, env)),
    }
}

fn handle_repl(config: RunConfig) -> Result<(), AppError> {
    println!("{}", crate::report::format_banner());

    let mut loaded = pipeline::open_model(&config, |resolved| {
        if resolved.is_fallback() {
            println!(
                "\nPrimary model not found. \nUsing secondary model path: {}",
                resolved.path.display()
            );
        } else {
            println!("Using primary model path: {}", resolved.path.display());
        }
        println!("\nLoading model, please wait...");
    })?;
    println!("Model loaded successfully.");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Repl::new(
        &mut loaded.model,
        stdin.lock(),
        stdout.lock(),
        config.out_dir.clone(),
        config.plot,
    )
    .run()
}

fn handle_single(config: RunConfig, args: &SingleArgs) -> Result<(), AppError> {
    let mut loaded = pipeline::open_model(&config, |_| {})?;
    let features = FeatureVector::new(args.thickness, args.diameter, args.temperature);
    let value = evaluate(&mut loaded.model, features)?;
    println!("{}", crate::report::format_single_result(value));
    Ok(())
}

fn handle_sweep(config: RunConfig, args: &SweepArgs) -> Result<(), AppError> {
    // Validate the range before paying for model loading.
    let request = SweepRequest {
        thickness: args.thickness,
        diameter: args.diameter,
        range: SweepRange::new(args.t_start, args.t_stop, args.t_step)?,
    };

    let mut loaded = pipeline::open_model(&config, |_| {})?;
    let out = export_sweep(&mut loaded.model, &request, &config.out_dir)?;

    println!("Data saved to {}", out.path.display());
    println!("{}", crate::report::format_sweep_summary(&request, &out.records));
    if config.plot.enabled {
        print!(
            "{}",
            crate::plot::render_sweep_plot(&out.records, config.plot.width, config.plot.height)
        );
    }
    Ok(())
}

fn handle_info(config: RunConfig) -> Result<(), AppError> {
    let loaded = pipeline::open_model(&config, |_| {})?;
    print!(
        "{}",
        crate::report::format_model_info(
            loaded.model.path(),
            loaded.model.input_names(),
            loaded.model.output_names()
        )
    );
    Ok(())
}

/// Build the run configuration.
///
/// Precedence for each model path: CLI flag, then environment, then default
/// (`rf_model.onnx` for the primary, none for the fallback).
pub fn run_config_from_args(
    args: &ModelArgs,
    plot: Option<&PlotArgs>,
    env: impl Fn(&str) -> Option<String>,
) -> RunConfig {
    let primary = args
        .model
        .clone()
        .or_else(|| env(ENV_MODEL).filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_FILE));
    let fallback = args
        .fallback_model
        .clone()
        .or_else(|| env(ENV_MODEL_FALLBACK).filter(|v| !v.is_empty()).map(PathBuf::from));

    let plot = match plot {
        Some(p) => PlotConfig {
            enabled: !p.no_plot,
            width: p.width,
            height: p.height,
        },
        None => PlotConfig {
            enabled: false,
            width: 100,
            height: 25,
        },
    };

    RunConfig {
        model: ModelLocation { primary, fallback },
        out_dir: args.out_dir.clone(),
        plot,
    }
}

/// Rewrite argv so `magcalc` defaults to `magcalc repl`.
///
/// Rules:
/// - `magcalc`                      -> `magcalc repl`
/// - `magcalc --model m.onnx ...`   -> `magcalc repl --model m.onnx ...`
/// - `magcalc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("repl".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "repl" | "single" | "sweep" | "info");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "repl flags".
    if arg1.starts_with('-') {
        argv.insert(1, "repl".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn model_args(model: Option<&str>, fallback: Option<&str>) -> ModelArgs {
        ModelArgs {
            model: model.map(PathBuf::from),
            fallback_model: fallback.map(PathBuf::from),
            out_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn bare_invocation_starts_repl() {
        assert_eq!(rewrite_args(argv(&["magcalc"])), argv(&["magcalc", "repl"]));
        assert_eq!(
            rewrite_args(argv(&["magcalc", "--model", "m.onnx"])),
            argv(&["magcalc", "repl", "--model", "m.onnx"])
        );
        assert_eq!(rewrite_args(argv(&["magcalc", "--help"])), argv(&["magcalc", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["magcalc", "sweep", "-t", "1"])),
            argv(&["magcalc", "sweep", "-t", "1"])
        );
    }

    #[test]
    fn rewritten_flags_parse_as_repl() {
        let cli = crate::cli::Cli::try_parse_from(rewrite_args(argv(&["magcalc", "--no-plot"]))).unwrap();
        match cli.command {
            Command::Repl(args) => assert!(args.no_plot),
            other => panic!("expected repl, got {other:?}"),
        }
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let config = run_config_from_args(&model_args(None, None), None, |_| None);
        assert_eq!(config.model.primary, PathBuf::from("rf_model.onnx"));
        assert_eq!(config.model.fallback, None);
        assert!(!config.plot.enabled);
    }

    #[test]
    fn environment_fills_unset_flags() {
        let env = |key: &str| match key {
            ENV_MODEL => Some("/data/primary.onnx".to_string()),
            ENV_MODEL_FALLBACK => Some("/data/fallback.onnx".to_string()),
            _ => None,
        };
        let config = run_config_from_args(&model_args(None, None), None, env);
        assert_eq!(config.model.primary, PathBuf::from("/data/primary.onnx"));
        assert_eq!(config.model.fallback, Some(PathBuf::from("/data/fallback.onnx")));
    }

    #[test]
    fn flags_win_over_environment() {
        let env = |_: &str| Some("/from/env.onnx".to_string());
        let config = run_config_from_args(&model_args(Some("cli.onnx"), Some("cli_fb.onnx")), None, env);
        assert_eq!(config.model.primary, PathBuf::from("cli.onnx"));
        assert_eq!(config.model.fallback, Some(PathBuf::from("cli_fb.onnx")));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let env = |_: &str| Some(String::new());
        let config = run_config_from_args(&model_args(None, None), None, env);
        assert_eq!(config.model.primary, PathBuf::from("rf_model.onnx"));
        assert_eq!(config.model.fallback, None);
    }

    #[test]
    fn plot_args_map_to_plot_config() {
        let plot = PlotArgs {
            no_plot: false,
            width: 60,
            height: 20,
        };
        let config = run_config_from_args(&model_args(None, None), Some(&plot), |_| None);
        assert_eq!(
            config.plot,
            PlotConfig {
                enabled: true,
                width: 60,
                height: 20
            }
        );
    }
}
