use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the log file goes; the terminal belongs to the UI
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("minetype")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "minetype") {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            std::env::temp_dir().join("minetype")
        }
    }
}
