//! # lottie-crop
//!
//! Crops a Lottie animation to the top part of its canvas.
//!
//! The canvas height is reduced to a fraction of the original (half by
//! default) and every layer position moves up by another fraction of the
//! original height (a quarter by default). The result is written to a new
//! file next to the input unless `--output` says otherwise.
//!
//! Options can also come from a TOML file passed with `--config`; flags on
//! the command line take precedence.

mod config;
mod snippet;


use anyhow::{Context, Result};
use clap::Parser;
use config::{FileConfig, Overrides, Settings};
use lottie_core::{crop_animation_with, read_animation, write_animation, Fraction};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lottie-crop")]
#[command(about = "Crop a Lottie animation to the top of its canvas")]
#[command(version)]
struct Cli {
    /// Source Lottie JSON file
    input: Option<PathBuf>,

    /// Destination file (defaults to <input>_cropped.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with default values for any option below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Share of the canvas height to keep, e.g. "1/2" or "0.6"
    #[arg(long)]
    keep: Option<Fraction>,

    /// Share of the original height to move positions up by, e.g. "1/4"
    #[arg(long)]
    shift: Option<Fraction>,

    /// Also shift legacy keyframe end values (`e`)
    #[arg(long)]
    shift_end_values: bool,

    /// Fail when the animation has no canvas height instead of copying it unchanged
    #[arg(long)]
    require_height: bool,

    /// Write indented JSON
    #[arg(long)]
    pretty: bool,

    /// Skip the React Native usage example
    #[arg(long)]
    no_snippet: bool,
}

impl Cli {
    fn into_parts(self) -> (Option<PathBuf>, Overrides) {
        let overrides = Overrides {
            input: self.input,
            output: self.output,
            keep: self.keep,
            shift: self.shift,
            shift_end_values: self.shift_end_values,
            require_height: self.require_height,
            pretty: self.pretty,
            no_snippet: self.no_snippet,
        };
        (self.config, overrides)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lottie_crop=info,lottie_core=info,lottie_data=info".into()),
        )
        .init();

    let (config_path, overrides) = Cli::parse().into_parts();
    let file = match config_path {
        Some(path) => FileConfig::load(&path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(overrides, file)?;

    let stdout = std::io::stdout();
    run(&settings, &mut stdout.lock())
}

/// Loads, crops and saves the animation, reporting progress to `out`.
fn run(settings: &Settings, out: &mut impl Write) -> Result<()> {
    tracing::info!("Loading {}", settings.input.display());
    let mut doc = read_animation(&settings.input)?;

    crop_animation_with(&mut doc, &settings.crop, |change| -> Result<()> {
        writeln!(out, "Original height: {}", change.original)?;
        writeln!(out, "New height: {}", change.cropped)?;
        Ok(())
    })?;

    write_animation(&settings.output, &doc, settings.pretty).with_context(|| {
        format!(
            "Failed to save cropped animation from {}",
            settings.input.display()
        )
    })?;

    writeln!(out)?;
    writeln!(out, "Cropped animation saved to: {}", settings.output.display())?;
    if settings.snippet {
        writeln!(out)?;
        writeln!(out, "To use in your React Native app:")?;
        write!(
            out,
            "{}",
            snippet::react_native_usage(&settings.output, settings.crop.keep)
        )?;
    }
    Ok(())
}
