//! Logging configuration and initialization.
//!
//! Presets pick sensible levels for the bot's own targets
//! (`catalogbot::startup`, `::bot`, `::query`, `::session`) and for the
//! transport and database libraries. `--log target=level` overrides a single
//! target and `RUST_LOG`, when set, replaces the whole filter.

use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Targets that are not under `catalogbot::` and are passed through as-is.
const EXTERNAL_TARGETS: &[&str] = &["teloxide", "sqlx"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Startup, received queries and failures
    #[default]
    Production,
    /// Adds library info and session writes
    Verbose,
    /// Classification and per-lookup row counts
    Debug,
    /// Everything
    Trace,
    /// Warnings and errors only
    Quiet,
}

impl LogPreset {
    fn directives(self) -> Vec<String> {
        let directives: &[&str] = match self {
            LogPreset::Production => &[
                "catalogbot::startup=info",
                "catalogbot::bot=info",
                "catalogbot::query=info",
                "catalogbot::session=warn",
                "teloxide=warn",
                "sqlx=warn",
            ],
            LogPreset::Verbose => &["catalogbot=info", "teloxide=info", "sqlx=warn"],
            LogPreset::Debug => &["catalogbot=debug", "teloxide=debug", "sqlx=info"],
            LogPreset::Trace => &["catalogbot=trace", "teloxide=trace", "sqlx=debug"],
            LogPreset::Quiet => &["catalogbot=warn", "teloxide=error", "sqlx=error"],
        };
        directives.iter().map(|d| d.to_string()).collect()
    }
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target level overrides, keyed by full target name.
    pub overrides: HashMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Create a new LogConfig from CLI arguments.
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_overrides: Vec<String>,
        format: LogFormat,
    ) -> Self {
        let preset = if quiet {
            LogPreset::Quiet
        } else if trace {
            LogPreset::Trace
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        };

        // "query=debug" or "query=debug,teloxide=trace"
        let mut overrides = HashMap::new();
        for part in log_overrides.iter().flat_map(|s| s.split(',')) {
            let Some((target, level_str)) = part.split_once('=') else {
                continue;
            };
            if let Some(level) = parse_level(level_str.trim()) {
                overrides.insert(full_target(target.trim()), level);
            }
        }

        Self {
            preset,
            overrides,
            format,
        }
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives = self.preset.directives();
        for (target, level) in &self.overrides {
            directives.push(format!("{}={}", target, level.as_str().to_lowercase()));
        }

        EnvFilter::try_new(directives.join(",")).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// "query" -> "catalogbot::query"; external and already-qualified targets pass through.
fn full_target(target: &str) -> String {
    let is_external = EXTERNAL_TARGETS
        .iter()
        .any(|ext| target == *ext || target.starts_with(&format!("{}::", ext)));
    if target == "catalogbot" || target.starts_with("catalogbot::") || is_external {
        target.to_string()
    } else {
        format!("catalogbot::{}", target)
    }
}

/// Parse a level string (case-insensitive).
fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_thread_ids(false))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_preset_priority() {
        let config = LogConfig::from_cli(true, true, true, true, vec![], LogFormat::Text);
        assert_eq!(config.preset, LogPreset::Quiet);

        let config = LogConfig::from_cli(true, true, false, false, vec![], LogFormat::Text);
        assert_eq!(config.preset, LogPreset::Debug);

        let config = LogConfig::from_cli(false, false, false, false, vec![], LogFormat::Text);
        assert_eq!(config.preset, LogPreset::Production);
    }

    #[test]
    fn test_overrides_are_qualified() {
        let config = LogConfig::from_cli(
            false,
            false,
            false,
            false,
            vec!["query=debug,teloxide=trace".into(), "catalogbot::session=info".into()],
            LogFormat::Text,
        );

        assert_eq!(config.overrides.get("catalogbot::query"), Some(&Level::DEBUG));
        assert_eq!(config.overrides.get("teloxide"), Some(&Level::TRACE));
        assert_eq!(config.overrides.get("catalogbot::session"), Some(&Level::INFO));
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let config = LogConfig::from_cli(
            false,
            false,
            false,
            false,
            vec!["query".into(), "bot=loud".into(), "sqlx::pool=warning".into()],
            LogFormat::Json,
        );
        assert_eq!(config.overrides.len(), 1);
        assert_eq!(config.overrides.get("sqlx::pool"), Some(&Level::WARN));
    }

    #[test]
    fn test_every_preset_builds_a_filter() {
        for preset in [
            LogPreset::Production,
            LogPreset::Verbose,
            LogPreset::Debug,
            LogPreset::Trace,
            LogPreset::Quiet,
        ] {
            let joined = preset.directives().join(",");
            assert!(EnvFilter::try_new(&joined).is_ok(), "{}", joined);
        }
    }
}
