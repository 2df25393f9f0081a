//! Configuration files on disk

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temporary file ending in `suffix` (`.toml`, `.json`)
pub fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("chat.config")
        .suffix(suffix)
        .tempfile()
        .expect("failed to create temp config");
    file.write_all(contents.as_bytes()).expect("failed to write temp config");
    file
}
