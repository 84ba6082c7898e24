//! Tracing/logging initialization.
//!
//! The filter comes from `RUST_LOG`; output format and target display are
//! configured through `PRICETAG_LOG_FORMAT` and `PRICETAG_LOG_TARGET`.

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "PRICETAG_LOG_FORMAT";
pub const LOG_TARGET_VAR: &str = "PRICETAG_LOG_TARGET";

/// Log line format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON lines.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
            with_target: false,
        }
    }
}

impl TracingConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unknown values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match lookup(LOG_FORMAT_VAR).as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => config.format = LogFormat::Pretty,
            Some(v) if v.eq_ignore_ascii_case("json") => config.format = LogFormat::Json,
            _ => {}
        }

        if let Some(v) = lookup(LOG_TARGET_VAR) {
            config.with_target = matches!(v.trim(), "1" | "true" | "yes");
        }

        config
    }
}

/// Initialize tracing/logging with explicit settings.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(config.with_target);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = TracingConfig::from_lookup(|_| None);
        assert_eq!(config, TracingConfig::default());
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn format_and_target_are_read() {
        let config = TracingConfig::from_lookup(lookup_from(&[
            (LOG_FORMAT_VAR, " Pretty "),
            (LOG_TARGET_VAR, "true"),
        ]));
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.with_target);
    }

    #[test]
    fn unknown_format_keeps_default() {
        let config = TracingConfig::from_lookup(lookup_from(&[(LOG_FORMAT_VAR, "xml")]));
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_with(&TracingConfig::default());
        init_with(&TracingConfig {
            format: LogFormat::Pretty,
            ..TracingConfig::default()
        });
        ::tracing::info!("observability initialized");
    }
}
