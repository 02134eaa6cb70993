//! # Logging Configuration
//!
//! Per-component log levels read from a logging ConfigMap. Each component's
//! level lives under `loglevel.<component>`; values use zap-style names
//! (`debug`, `info`, `warn`, `error`, `dpanic`, `panic`, `fatal`), and
//! `trace` is accepted as well.

use crate::constants::LOG_LEVEL_KEY_PREFIX;
use crate::error::RevisionError;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;
use tracing::Level;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level per component; components without an entry inherit the base filter
    pub levels: BTreeMap<String, Level>,
}

impl LoggingConfig {
    /// Read levels for the expected components
    ///
    /// Missing or empty entries are skipped; an unrecognized level is an error.
    pub fn from_map(
        data: &BTreeMap<String, String>,
        components: &[&str],
    ) -> Result<Self, RevisionError> {
        let mut levels = BTreeMap::new();
        for component in components {
            let key = format!("{LOG_LEVEL_KEY_PREFIX}{component}");
            match data.get(&key).map(String::as_str) {
                Some("") | None => {}
                Some(raw) => {
                    levels.insert((*component).to_string(), level_from_str(component, raw)?);
                }
            }
        }
        Ok(Self { levels })
    }

    pub fn from_config_map(
        config_map: &ConfigMap,
        components: &[&str],
    ) -> Result<Self, RevisionError> {
        match &config_map.data {
            Some(data) => Self::from_map(data, components),
            None => Ok(Self::default()),
        }
    }

    pub fn level(&self, component: &str) -> Option<Level> {
        self.levels.get(component).copied()
    }

    /// `EnvFilter` directives: the base filter followed by one
    /// `component=level` directive per configured component
    pub fn env_filter_directives(&self, base: &str) -> String {
        let mut directives: Vec<String> = Vec::new();
        if !base.is_empty() {
            directives.push(base.to_string());
        }
        directives.extend(
            self.levels
                .iter()
                .map(|(component, level)| format!("{component}={}", level.as_str().to_lowercase())),
        );
        directives.join(",")
    }
}

fn level_from_str(component: &str, raw: &str) -> Result<Level, RevisionError> {
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "dpanic" | "panic" | "fatal" => Ok(Level::ERROR),
        _ => Err(RevisionError::InvalidLogLevel {
            component: component.to_string(),
            level: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_map_reads_expected_components_only() {
        let config = LoggingConfig::from_map(
            &data(&[
                ("loglevel.controller", "debug"),
                ("loglevel.autoscaler", "error"),
                ("zap-logger-config", "{}"),
            ]),
            &["controller", "queueproxy"],
        )
        .unwrap();

        assert_eq!(config.level("controller"), Some(Level::DEBUG));
        assert_eq!(config.level("autoscaler"), None);
        assert_eq!(config.level("queueproxy"), None);
    }

    #[test]
    fn test_zap_levels_map_onto_tracing_levels() {
        let config = LoggingConfig::from_map(
            &data(&[("loglevel.a", "fatal"), ("loglevel.b", "WARN")]),
            &["a", "b"],
        )
        .unwrap();
        assert_eq!(config.level("a"), Some(Level::ERROR));
        assert_eq!(config.level("b"), Some(Level::WARN));
    }

    #[test]
    fn test_empty_level_is_skipped() {
        let config =
            LoggingConfig::from_map(&data(&[("loglevel.controller", "")]), &["controller"]).unwrap();
        assert!(config.levels.is_empty());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let err = LoggingConfig::from_map(&data(&[("loglevel.controller", "verbose")]), &["controller"])
            .unwrap_err();
        assert_eq!(
            err,
            RevisionError::InvalidLogLevel {
                component: "controller".to_string(),
                level: "verbose".to_string(),
            }
        );
    }

    #[test]
    fn test_from_config_map_without_data() {
        let config = LoggingConfig::from_config_map(&ConfigMap::default(), &["controller"]).unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_env_filter_directives() {
        let config = LoggingConfig::from_map(
            &data(&[("loglevel.revisionctl", "debug")]),
            &["revisionctl"],
        )
        .unwrap();
        assert_eq!(
            config.env_filter_directives("info"),
            "info,revisionctl=debug"
        );
        assert_eq!(config.env_filter_directives(""), "revisionctl=debug");
    }
}
