use std::fs::{File, OpenOptions, create_dir_all};
use std::io;
use std::path::{Path, PathBuf};

use super::{WorkspaceError, WorkspaceResult};

/// Output file written to a temporary sibling and renamed over the target
/// on [`AtomicFile::commit`]. Dropping it uncommitted removes the temporary.
#[derive(Debug)]
pub struct AtomicFile {
    path: PathBuf,
    tmp_path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl AtomicFile {
    pub fn begin(path: &Path) -> WorkspaceResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }

        let tmp_path = temp_path(path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&tmp_path)?;

        Ok(Self {
            path: path.to_path_buf(),
            tmp_path,
            file: Some(file),
            committed: false,
        })
    }

    pub fn writer(&mut self) -> WorkspaceResult<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| WorkspaceError::Invalid("output already committed".to_string()))
    }

    pub fn commit(mut self) -> WorkspaceResult<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        std::fs::rename(&self.tmp_path, &self.path)?;
        self.committed = true;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            sync_dir(parent)?;
        }
        Ok(())
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.file.take());
            let _ = std::fs::remove_file(&self.tmp_path);
        }
    }
}

fn temp_path(path: &Path) -> WorkspaceResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WorkspaceError::Invalid("invalid path for output file".to_string()))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
