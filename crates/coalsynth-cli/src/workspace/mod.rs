mod atomic;
mod settings;

pub use atomic::AtomicFile;
pub use settings::{DEFAULT_SETTINGS_FILE, RunConfig, Settings, load_settings};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("settings file not found: {0}")]
    MissingSettings(PathBuf),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
