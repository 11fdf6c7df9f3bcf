//! Runner configuration from environment variables.

use crate::types::QUEUE_REPEAT;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Seed of the next-queue generator
    pub seed: u32,
    /// Queue repeat count; each color appears `repeat / 2` times
    pub repeat: u32,
    /// Initial field string, loaded before the first command
    pub field: Option<String>,
    /// Append one JSON record per command to this file
    pub log_path: Option<String>,
    /// Skip accepted move and rotate replies; `state` commands, drops,
    /// resolves, refused actions and errors are still printed
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            repeat: QUEUE_REPEAT,
            field: None,
            log_path: None,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = get("PUYO_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let repeat = get("PUYO_REPEAT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.repeat);

        let non_blank = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let field = non_blank("PUYO_FIELD");
        let log_path = non_blank("PUYO_LOG_PATH");

        let quiet = get("PUYO_QUIET")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.quiet);

        Self {
            seed,
            repeat,
            field,
            log_path,
            quiet,
        }
    }
}
