use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "MediGuide";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path to a knowledge base JSON file that replaces the bundled one.
pub const KNOWLEDGE_BASE_ENV: &str = "MEDIGUIDE_KNOWLEDGE_BASE";
/// `1`/`true` turns on entity deduplication.
pub const DEDUPLICATE_ENV: &str = "MEDIGUIDE_DEDUPLICATE";
pub const MAX_INPUT_CHARS_ENV: &str = "MEDIGUIDE_MAX_INPUT_CHARS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "mediguide_lib=debug,mediguide=debug,warn"
    } else {
        "mediguide_lib=info,mediguide=info,warn"
    }
}

/// Get the application data directory
/// ~/MediGuide/ on all platforms
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Knowledge base override picked up when present in the app data directory.
pub fn knowledge_base_override() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("knowledge_base.json"))
}

/// Tunables for one `ReportAnalyzer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Collapse entities with the same name whose matched spans overlap.
    pub deduplicate_entities: bool,
    /// Longer input aborts the analysis with a failed outcome.
    pub max_input_chars: usize,
    /// Characters of surrounding text searched for frequencies and
    /// reported as context for concerning terms.
    pub context_window_chars: usize,
    /// Imaging fragments shorter than this are dropped as noise.
    pub min_finding_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            deduplicate_entities: false,
            max_input_chars: 1_000_000,
            context_window_chars: 50,
            min_finding_chars: 10,
        }
    }
}

impl AnalyzerConfig {
    /// Defaults overridden by `MEDIGUIDE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEDUPLICATE_ENV) {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.deduplicate_entities = true,
                "0" | "false" | "no" | "off" => config.deduplicate_entities = false,
                other => tracing::warn!(value = other, "Ignoring invalid {DEDUPLICATE_ENV}"),
            }
        }

        if let Some(raw) = lookup(MAX_INPUT_CHARS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => config.max_input_chars = max,
                _ => tracing::warn!(value = %raw, "Ignoring invalid {MAX_INPUT_CHARS_ENV}"),
            }
        }

        config
    }
}
