// src/config.rs

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// GGUF weights for the local model. `None` serves rule-based answers only.
    pub model_path: Option<PathBuf>,
    pub model_load_delay: Duration,
    pub append_disclaimer: bool,
    pub reject_blank_messages: bool,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            model_path: None,
            model_load_delay: Duration::from_secs(2),
            append_disclaimer: true,
            reject_blank_messages: true,
            cors_allowed_origin: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: match get("PORT") {
                Some(v) => parse_number("PORT", &v)?,
                None => defaults.port,
            },
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            model_path: get("MODEL_PATH").map(PathBuf::from),
            model_load_delay: match get("MODEL_LOAD_DELAY_SECS") {
                Some(v) => Duration::from_secs(parse_number("MODEL_LOAD_DELAY_SECS", &v)?),
                None => defaults.model_load_delay,
            },
            append_disclaimer: match get("APPEND_DISCLAIMER") {
                Some(v) => parse_bool("APPEND_DISCLAIMER", &v)?,
                None => defaults.append_disclaimer,
            },
            reject_blank_messages: match get("REJECT_BLANK_MESSAGES") {
                Some(v) => parse_bool("REJECT_BLANK_MESSAGES", &v)?,
                None => defaults.reject_blank_messages,
            },
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN").filter(|v| v != "*"),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("PORT", "9000"),
            ("MODEL_PATH", "/models/med.gguf"),
            ("MODEL_LOAD_DELAY_SECS", "0"),
            ("APPEND_DISCLAIMER", "off"),
            ("REJECT_BLANK_MESSAGES", "No"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
        ])
        .unwrap();

        assert_eq!(s.port, 9000);
        assert_eq!(s.model_path, Some(PathBuf::from("/models/med.gguf")));
        assert_eq!(s.model_load_delay, Duration::ZERO);
        assert!(!s.append_disclaimer);
        assert!(!s.reject_blank_messages);
        assert_eq!(s.cors_allowed_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn wildcard_origin_means_any() {
        let s = settings(&[("CORS_ALLOWED_ORIGIN", "*")]).unwrap();
        assert_eq!(s.cors_allowed_origin, None);
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = settings(&[("MODEL_PATH", "  "), ("PORT", "")]).unwrap();
        assert_eq!(s.model_path, None);
        assert_eq!(s.port, 8080);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            settings(&[("APPEND_DISCLAIMER", "maybe")]),
            Err(ConfigError::Invalid { key: "APPEND_DISCLAIMER", .. })
        ));
    }
}
