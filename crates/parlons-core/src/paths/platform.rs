//! Data root resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "PARLONS_DATA_DIR";

const APP_DIR_NAME: &str = "parlons";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `PARLONS_DATA_DIR` environment variable
/// 2. `<system local data dir>/parlons`
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let override_dir = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    resolve_data_root(override_dir.as_deref(), dirs::data_local_dir().as_deref())
}

/// Pure form of [`data_root`] with its inputs passed in.
pub fn resolve_data_root(
    override_dir: Option<&Path>,
    system_data_dir: Option<&Path>,
) -> Result<PathBuf, PathError> {
    let root = match override_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => system_data_dir.ok_or(PathError::NoDataDir)?.join(APP_DIR_NAME),
    };

    if root.exists() {
        if !root.is_dir() {
            return Err(PathError::NotADirectory(root));
        }
    } else {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %root.display(), "Created data root");
    }

    Ok(root)
}

/// Location of the optional `.env` file next to the data.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}
