//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "THREADLY_DATA_DIR";

/// Resolve the data directory: `$THREADLY_DATA_DIR` if set, otherwise
/// `~/.threadly` (falling back to `./.threadly` when no home directory
/// can be determined).
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".threadly")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_ends_with_threadly() {
        // The env var may or may not be set in the test environment; either
        // way the path is non-empty and absolute-or-relative sane.
        let dir = resolve_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
