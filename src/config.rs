use serde::Deserialize;

/// Environment variable read by [`QuerierConfig::from_env`].
pub const DEBUG_ENV_VAR: &str = "SQLSCAN_DEBUG";

/// Configuration for a [`Querier`](crate::Querier).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuerierConfig {
    /// Log every statement, with its arguments inlined, before it is sent.
    pub debug: bool,
}

impl QuerierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Read the configuration from `SQLSCAN_DEBUG`.
    /// Unset or unrecognized values leave debugging off.
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR)
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { debug }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
