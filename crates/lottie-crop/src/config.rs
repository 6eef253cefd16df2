//! Settings resolution: command-line flags over an optional TOML file over defaults.

use anyhow::{bail, Context, Result};
use lottie_core::{CropConfig, Fraction, MissingHeight};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub keep: Option<Fraction>,
    pub shift: Option<Fraction>,
    pub shift_end_values: Option<bool>,
    pub require_height: Option<bool>,
    pub pretty: Option<bool>,
    pub snippet: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line. Flags are `true` only when passed.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub keep: Option<Fraction>,
    pub shift: Option<Fraction>,
    pub shift_end_values: bool,
    pub require_height: bool,
    pub pretty: bool,
    pub no_snippet: bool,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub crop: CropConfig,
    pub pretty: bool,
    pub snippet: bool,
}

impl Settings {
    pub fn resolve(cli: Overrides, file: FileConfig) -> Result<Self> {
        let Some(input) = cli.input.or(file.input) else {
            bail!("No input file given (pass INPUT or set `input` in the config file)");
        };
        let output = cli
            .output
            .or(file.output)
            .unwrap_or_else(|| default_output(&input));
        if same_file(&input, &output) {
            bail!(
                "Output path {} would overwrite the input animation",
                output.display()
            );
        }

        let defaults = CropConfig::default();
        let require_height = cli.require_height || file.require_height.unwrap_or(false);
        let crop = CropConfig {
            keep: cli.keep.or(file.keep).unwrap_or(defaults.keep),
            shift: cli.shift.or(file.shift).unwrap_or(defaults.shift),
            shift_end_values: cli.shift_end_values || file.shift_end_values.unwrap_or(false),
            missing_height: if require_height {
                MissingHeight::Fail
            } else {
                MissingHeight::Skip
            },
        };

        Ok(Settings {
            input,
            output,
            crop,
            pretty: cli.pretty || file.pretty.unwrap_or(false),
            snippet: !cli.no_snippet && file.snippet.unwrap_or(true),
        })
    }
}

/// Whether `output` names the same file as `input`, after resolving `.`/`..`
/// and symlinks. A missing input can't be overwritten, so it only matches
/// when the two paths are textually equal.
fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    let Ok(input) = fs::canonicalize(input) else {
        return false;
    };
    if let Ok(output) = fs::canonicalize(output) {
        return output == input;
    }
    let parent = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name) == input,
        _ => false,
    }
}

/// `dir/name.json` -> `dir/name_cropped.json`.
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "animation".to_string());
    input.with_file_name(format!("{stem}_cropped.json"))
}
