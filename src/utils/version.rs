//! Version information utilities
//!
//! Provides version information for the application.

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the current application version
pub fn get_version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION")); // Should match Cargo.toml
    }

    #[test]
    fn test_version_const_matches() {
        assert_eq!(VERSION, get_version());
    }
}
