use std::fs::{OpenOptions, create_dir_all};
use std::path::Path;

use coalsynth_generate::GenerationReport;

use super::{RegistryError, RegistryResult};

/// Write the run report as pretty JSON, creating parent directories.
pub fn write_report(path: &Path, report: &GenerationReport) -> RegistryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, report).map_err(RegistryError::from)
}
