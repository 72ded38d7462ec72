//! Atomic file writes using a temp-file-and-rename strategy.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::dirs::ensure_dir;

/// Atomically writes bytes to a file.
///
/// The content goes to a temporary file in the target directory, is synced to
/// disk, then renamed over the target. Readers see either the old content or the
/// new content, never a partial write. Parent directories are created as needed.
///
/// # Examples
///
/// ```rust,no_run
/// use sharegen_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new(".build/out/gen.txt"), b"Value: hello")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("test.txt");

        atomic_write(&file_path, b"first").unwrap();
        atomic_write(&file_path, b"second").unwrap();
        assert_eq!(std::fs::read(&file_path).unwrap(), b"second");

        // No temp files left behind
        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("a").join("b").join("c.bin");

        atomic_write(&file_path, &[0, 1, 2]).unwrap();
        assert_eq!(std::fs::read(&file_path).unwrap(), vec![0, 1, 2]);
    }
}
