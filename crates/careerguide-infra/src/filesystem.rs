//! Data directory layout.

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CAREERGUIDE_DATA_DIR` environment variable
/// 2. `~/.careerguide`
/// 3. `./.careerguide` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CAREERGUIDE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".careerguide");
    }

    PathBuf::from(".careerguide")
}

/// Create the data directory if needed.
pub async fn ensure_data_dir(dir: &std::path::Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await
}
