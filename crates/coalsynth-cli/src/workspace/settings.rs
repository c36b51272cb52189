use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use coalsynth_generate::{GenerateOptions, SchemaPolicy};

use super::{WorkspaceError, WorkspaceResult};

pub const DEFAULT_SETTINGS_FILE: &str = "coalsynth.toml";
pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Optional run settings. The same shape holds values read from
/// `coalsynth.toml` and values given as command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub schema_policy: Option<SchemaPolicy>,
    pub unit_size: Option<u32>,
    pub truck_count: Option<usize>,
    pub seed: Option<u64>,
    pub prompt: Option<bool>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub prompt: bool,
    pub options: GenerateOptions,
}

impl Settings {
    /// Layer `overrides` over these settings, then over built-in defaults.
    pub fn resolve(self, overrides: Settings) -> RunConfig {
        let defaults = GenerateOptions::default();
        RunConfig {
            input: overrides
                .input
                .or(self.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: overrides
                .output
                .or(self.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            report: overrides.report.or(self.report),
            log_file: overrides.log_file.or(self.log_file),
            prompt: overrides.prompt.or(self.prompt).unwrap_or(true),
            options: GenerateOptions {
                schema_policy: overrides
                    .schema_policy
                    .or(self.schema_policy)
                    .unwrap_or(defaults.schema_policy),
                unit_size: overrides
                    .unit_size
                    .or(self.unit_size)
                    .unwrap_or(defaults.unit_size),
                truck_count: overrides
                    .truck_count
                    .or(self.truck_count)
                    .unwrap_or(defaults.truck_count),
                seed: overrides.seed.or(self.seed),
            },
        }
    }
}

/// Read settings from `path`. A missing file yields defaults unless
/// `required` is set.
pub fn load_settings(path: &Path, required: bool) -> WorkspaceResult<Settings> {
    if !path.exists() {
        if required {
            return Err(WorkspaceError::MissingSettings(path.to_path_buf()));
        }
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
