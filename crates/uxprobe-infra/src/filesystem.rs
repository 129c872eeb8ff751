//! Data directory resolution.
//!
//! The data directory only holds `config.toml`; nothing else is written
//! there. `UXPROBE_DATA_DIR` overrides the default for tests and scripting.

use std::path::PathBuf;

/// Resolve the uxprobe data directory.
///
/// Priority:
/// 1. `UXPROBE_DATA_DIR` environment variable
/// 2. `~/.uxprobe`
/// 3. `./.uxprobe` when no home directory can be determined
pub fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("UXPROBE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    match dirs::home_dir() {
        Some(home) => home.join(".uxprobe"),
        None => PathBuf::from(".uxprobe"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        // Env vars are process-global; run the override check in one test
        // to avoid ordering races with other tests.
        unsafe {
            std::env::set_var("UXPROBE_DATA_DIR", "/tmp/uxprobe-test");
        }
        assert_eq!(resolve_data_dir(), PathBuf::from("/tmp/uxprobe-test"));
        unsafe {
            std::env::remove_var("UXPROBE_DATA_DIR");
        }
        assert!(resolve_data_dir().ends_with(".uxprobe"));
    }
}
