//! Path utilities: expand `~/` in user supplied paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Expand `~/` and anchor a relative path at the current directory, so a
/// `--db` value names the same file for every command.
pub fn resolve_user_path(path: &str) -> PathBuf {
    let p = expand_tilde(path);
    std::path::absolute(&p).unwrap_or(p)
}
