//! Atomic whole-file writes.
//!
//! Lease records are replaced, never appended to. A reader on another host
//! must see either the previous expiry or the new one, so every write follows
//! the same pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `rename()` is atomic on POSIX when source and target share a filesystem,
//! and on Windows the persist step replaces an existing target. Every call
//! gets its own randomly named temporary file (`.{filename}.XXXXXX.tmp`), so
//! concurrent writers of one key, whether threads or processes on hosts
//! sharing the mount, never touch each other's temporary file. On crash the
//! dot-prefixed file may remain; it is never a valid key name, so listings
//! skip it.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Atomically replace `path` with `content`.
///
/// The parent directory must already exist.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let mut temp = temp_file_for(path)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // On failure the temporary file is handed back and deleted on drop
    temp.persist(path).map_err(|e| e.error)?;

    // Persist the directory entry as well; best effort.
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Fresh temporary sibling of `target`, unique per call.
pub(crate) fn temp_file_for(target: &Path) -> io::Result<NamedTempFile> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file path"))?;

    Builder::new()
        .prefix(&format!(".{}.", filename))
        .suffix(".tmp")
        .tempfile_in(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("jobs");

        atomic_write(&file_path, b"1700000000").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "1700000000");
    }

    #[test]
    fn test_atomic_write_replaces_instead_of_appending() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("jobs");
        fs::write(&file_path, "not a timestamp at all").unwrap();

        atomic_write(&file_path, b"42").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "42");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("jobs");

        atomic_write(&file_path, b"42").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("jobs")]);
    }

    #[test]
    fn test_atomic_write_missing_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("jobs");

        let err = atomic_write(&file_path, b"42").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_temp_files_are_hidden_and_unique() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("jobs");

        let first = temp_file_for(&target).unwrap();
        let second = temp_file_for(&target).unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(first.path().parent().unwrap(), temp_dir.path());
        let name = first.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".jobs."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_concurrent_writes_to_one_target_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("shared");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let target = target.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        atomic_write(&target, format!("{}", i * 1000 + round).as_bytes())
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.parse::<u32>().is_ok());
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("shared")]);
    }
}
