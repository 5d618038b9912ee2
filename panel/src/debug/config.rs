//! Panel configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LOG_LEVEL: &str = "panel=info,warn";
const DEFAULT_CONFIRMATION_OVERDUE_SECS: u64 = 120;
const DEFAULT_SIM_CONFIRM_MS: u64 = 750;

/// Logging and runtime settings for a mounted panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "panel=debug,info")
    pub log_level: String,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
    /// How long a watcher waits before logging a confirmation as overdue
    pub confirmation_overdue: Duration,
    /// Auto-confirm delay of the simulated chain used by the demo binary
    pub sim_confirm_delay: Duration,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            confirmation_overdue: Duration::from_secs(DEFAULT_CONFIRMATION_OVERDUE_SECS),
            sim_confirm_delay: Duration::from_millis(DEFAULT_SIM_CONFIRM_MS),
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or unparsable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            log_dir: lookup("PANEL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_to_stderr: lookup("PANEL_LOG_STDERR")
                .map(|v| v == "1")
                .unwrap_or(defaults.log_to_stderr),
            confirmation_overdue: lookup("PANEL_CONFIRMATION_OVERDUE_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.confirmation_overdue),
            sim_confirm_delay: lookup("PANEL_SIM_CONFIRM_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sim_confirm_delay),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(super::logger::LOG_FILE_PREFIX)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(DebugConfig::from_lookup(lookup(&[])), DebugConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = DebugConfig::from_lookup(lookup(&[
            ("PANEL_LOG_DIR", "/tmp/panel"),
            ("RUST_LOG", "panel=debug"),
            ("PANEL_LOG_STDERR", "1"),
            ("PANEL_CONFIRMATION_OVERDUE_SECS", "15"),
            ("PANEL_SIM_CONFIRM_MS", "20"),
        ]));

        assert_eq!(config.log_dir, PathBuf::from("/tmp/panel"));
        assert!(config.is_debug_enabled());
        assert!(config.log_to_stderr);
        assert_eq!(config.confirmation_overdue, Duration::from_secs(15));
        assert_eq!(config.sim_confirm_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = DebugConfig::from_lookup(lookup(&[("PANEL_CONFIRMATION_OVERDUE_SECS", "soon")]));
        assert_eq!(
            config.confirmation_overdue,
            Duration::from_secs(DEFAULT_CONFIRMATION_OVERDUE_SECS)
        );
    }
}
