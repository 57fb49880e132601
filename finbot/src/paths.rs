use std::path::{Path, PathBuf};

/// Return the path of a file inside the Finbot config directory.
pub(crate) fn config_path(file_name: &str) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("finbot")
            .join(file_name);
    }
    std::env::temp_dir().join("finbot").join(file_name)
}
