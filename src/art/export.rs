//! Saving the displayed art to disk.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const EXPORT_FILE_NAME: &str = "ascii_art.txt";

/// Write `text` verbatim to `ascii_art.txt` inside `dir`.
///
/// The content is staged in a temp file next to the target and renamed into place,
/// so a failed write never leaves a truncated file behind. The temp file is removed
/// on every error path when it drops.
pub fn export_art(text: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create download directory: {}", dir.display()))?;

    let target = dir.join(EXPORT_FILE_NAME);
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    staged
        .write_all(text.as_bytes())
        .context("Failed to write art to temp file")?;
    staged.flush().context("Failed to flush art to temp file")?;
    staged
        .persist(&target)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to save {}", target.display()))?;

    tracing::info!(path = %target.display(), bytes = text.len(), "exported art");
    Ok(target)
}

/// Open an exported file with the system viewer. Failures are only logged.
pub fn open_exported(path: &Path) {
    if let Err(err) = open::that(path) {
        tracing::warn!(path = %path.display(), error = %err, "could not open exported file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_displayed_text_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = export_art("ABC", dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "ascii_art.txt");
        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC");
    }

    #[test]
    fn overwrites_previous_export_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        export_art("first version, longer", dir.path()).unwrap();
        let path = export_art(" _\n|_|\n", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), " _\n|_|\n");

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("downloads").join("art");
        let path = export_art("x", &nested).unwrap();
        assert!(path.starts_with(&nested));
    }
}
