//! Root directory provisioning.

use crate::error::{Result, SemaphoreError};
use std::fs::{self, DirBuilder};
use std::io;
use std::path::Path;
use tempfile::Builder;

/// Make sure `path` is a directory this process can create files in.
///
/// Missing directories are created recursively. An existing non-directory,
/// or a directory that rejects a scratch file, is a provisioning error.
pub fn ensure_writable_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => check_writable(path).map_err(|e| {
            SemaphoreError::Provisioning(format!(
                "Directory is not writable '{}': {}",
                path.display(),
                e
            ))
        }),
        Ok(_) => Err(SemaphoreError::Provisioning(format!(
            "Expected directory, found file at '{}'",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_dir_tree(path).map_err(|e| {
            SemaphoreError::Provisioning(format!(
                "Failed to create directory '{}': {}",
                path.display(),
                e
            ))
        }),
        Err(e) => Err(SemaphoreError::Provisioning(format!(
            "failed to inspect '{}': {}",
            path.display(),
            e
        ))),
    }
}

fn create_dir_tree(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path)
}

/// Create and remove a hidden scratch file.
///
/// Permission bits alone do not tell whether this process may write
/// (ACLs, read-only mounts, root), so actually try it. The scratch name is
/// random per call; concurrent constructions on one root never share it.
fn check_writable(dir: &Path) -> io::Result<()> {
    let scratch = Builder::new()
        .prefix(".filesem-check.")
        .tempfile_in(dir)?;

    scratch.close()
}
