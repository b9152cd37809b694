use std::path::PathBuf;

/// Returns the root OfficeHub directory path.
///
/// Resolution order:
/// 1. `OFFICEHUB_ROOT` environment variable (if set)
/// 2. Current working directory + `.officehub`
pub fn officehub_root() -> PathBuf {
    if let Ok(root) = std::env::var("OFFICEHUB_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".officehub")
    }
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    officehub_root().join("config.yaml")
}
