use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clew";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum transcript length in characters (~20k tokens).
pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;

/// Timeout for a single oracle call, in seconds.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 60;

/// Get the application data directory
/// ~/Clew/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clew")
}

/// Get the directory where per-session recap files are stored
pub fn sessions_dir() -> PathBuf {
    app_data_dir().join("sessions")
}

/// Default deny-listed terms: credential markers and destructive commands.
pub fn default_deny_terms() -> Vec<String> {
    [
        "api_key",
        "password",
        "secret",
        "rm -rf /",
        "BEGIN RSA PRIVATE KEY",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

/// Recognized pipeline options. One value per processor; construct once at
/// process start and pass in — there is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Transcripts longer than this (in chars) are rejected outright.
    pub max_input_chars: usize,
    /// Case-insensitive terms that halt the pipeline before the oracle call.
    pub deny_terms: Vec<String>,
    /// Upper bound on a single oracle round trip.
    pub oracle_timeout_secs: u64,
    /// Closed-schema enforcement. Disabling is a debug-only escape hatch:
    /// unknown fields are stripped with a warning instead of rejecting.
    pub schema_strict: bool,
    /// Where the file-backed session store keeps its recap files.
    pub store_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            deny_terms: default_deny_terms(),
            oracle_timeout_secs: DEFAULT_ORACLE_TIMEOUT_SECS,
            schema_strict: true,
            store_dir: sessions_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Clew"));
    }

    #[test]
    fn sessions_dir_under_app_data() {
        let sessions = sessions_dir();
        assert!(sessions.starts_with(app_data_dir()));
        assert!(sessions.ends_with("sessions"));
    }

    #[test]
    fn default_config_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_input_chars, 100_000);
        assert_eq!(config.oracle_timeout_secs, 60);
        assert!(config.schema_strict);
        assert!(!config.deny_terms.is_empty());
    }

    #[test]
    fn deny_terms_include_credential_markers() {
        let terms = default_deny_terms();
        assert!(terms.iter().any(|t| t == "api_key"));
        assert!(terms.iter().any(|t| t == "rm -rf /"));
    }
}
