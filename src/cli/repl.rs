//! Interactive menu.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the REPL provides the "run `magcalc` and answer prompts" UX
//!
//! Commands (one per line): `a`/`A` sweep, `s`/`S` single value, `exit` quit.
//! Failures inside one command are reported and the menu comes back; only
//! console I/O failures end the session with an error.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::domain::{FeatureVector, PlotConfig};
use crate::engine::Model;
use crate::error::AppError;
use crate::plot::render_sweep_plot;
use crate::predict::{SweepRequest, evaluate, export_sweep};
use crate::report::{format_menu, format_single_result, format_sweep_summary};

enum Flow {
    Continue,
    Quit,
}

/// Prompt loop over any line source and sink.
pub struct Repl<'m, M: Model + ?Sized, R, W> {
    model: &'m mut M,
    input: R,
    output: W,
    out_dir: PathBuf,
    plot: PlotConfig,
}

impl<'m, M, R, W> Repl<'m, M, R, W>
where
    M: Model + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(model: &'m mut M, input: R, output: W, out_dir: PathBuf, plot: PlotConfig) -> Self {
        Self {
            model,
            input,
            output,
            out_dir,
            plot,
        }
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            self.print(format_menu())?;
            let Some(token) = self.read_line()? else {
                return Ok(());
            };

            let flow = match token.as_str() {
                "exit" => Flow::Quit,
                "a" | "A" => self.sweep()?,
                "s" | "S" => self.single()?,
                "" => Flow::Continue,
                _ => {
                    self.println("Invalid input. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn single(&mut self) -> Result<Flow, AppError> {
        let Some(thickness) = self.prompt_f32("Enter thickness: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(diameter) = self.prompt_f32("Enter diameter: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(temperature) = self.prompt_f32("Enter temperature: ")? else {
            return Ok(Flow::Quit);
        };

        match evaluate(&mut *self.model, FeatureVector::new(thickness, diameter, temperature)) {
            Ok(value) => self.println(&format_single_result(value))?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn sweep(&mut self) -> Result<Flow, AppError> {
        let Some(thickness) = self.prompt_f32("Enter thickness: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(diameter) = self.prompt_f32("Enter diameter: ")? else {
            return Ok(Flow::Quit);
        };

        let request = SweepRequest::new(thickness, diameter);
        match export_sweep(&mut *self.model, &request, &self.out_dir) {
            Ok(out) => {
                self.println(&format!("Data saved to {}", out.path.display()))?;
                self.println(&format_sweep_summary(&request, &out.records))?;
                if self.plot.enabled {
                    let plot = render_sweep_plot(&out.records, self.plot.width, self.plot.height);
                    self.print(&plot)?;
                }
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    /// Ask until a finite number is entered. `None` means end of input.
    fn prompt_f32(&mut self, prompt: &str) -> Result<Option<f32>, AppError> {
        loop {
            self.print(prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<f32>() {
                Ok(value) if value.is_finite() => return Ok(Some(value)),
                _ => self.println(&format!("Invalid number: '{line}'. Please try again."))?,
            }
        }
    }

    fn report(&mut self, err: &AppError) -> Result<(), AppError> {
        log::error!("{err}");
        self.println(&format!("Error: {err}"))
    }

    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print(&mut self, text: &str) -> Result<(), AppError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| AppError::io(format!("Failed to write prompt: {e}")))
    }

    fn println(&mut self, text: &str) -> Result<(), AppError> {
        self.print(text)?;
        self.print("\n")
    }
}
