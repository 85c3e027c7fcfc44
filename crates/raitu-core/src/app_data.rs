//! Where Raitu stores its own data (config).
//!
//! Conversations are never written here; only settings live on disk.

use std::path::PathBuf;

/// Returns the directory where Raitu stores its config.
/// On Linux: `~/.local/share/raitu/`; on macOS: `~/Library/Application Support/app.Raitu.Raitu/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("app", "Raitu", "Raitu")?
        .data_local_dir()
        .to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
