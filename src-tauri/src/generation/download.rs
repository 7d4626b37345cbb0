use anyhow::{anyhow, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Reduce a server-supplied name to a bare file name.
///
/// Directory components are stripped so a hostile name cannot escape the
/// download directory. Returns `None` if nothing usable remains.
pub fn safe_file_name(name: &str) -> Option<String> {
    let normalized = name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.to_string())
}

/// Write a downloaded document into `dir` atomically.
///
/// The bytes go to a temp file in `dir` first and are renamed into place, so an
/// interrupted download never leaves a partial document. An existing file with
/// the same name is replaced.
pub fn save_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name =
        safe_file_name(file_name).ok_or_else(|| anyhow!("Invalid file name: {:?}", file_name))?;

    std::fs::create_dir_all(dir)?;
    let target = dir.join(name);

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(&target)?;

    info!("Saved {} bytes to {:?}", bytes.len(), target);
    Ok(target)
}
