//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use infoco_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub ai_base_url: String,
    pub ai_timeout: Duration,
    pub news_cache_ttl: Duration,
    pub log_format: LogFormat,
    pub seed_defaults: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            data_dir: None,
            ai_base_url: "http://localhost:3000/api".to_string(),
            ai_timeout: Duration::from_secs(60),
            news_cache_ttl: Duration::from_secs(3600),
            log_format: LogFormat::default(),
            seed_defaults: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let data_dir = get("INFOCO_DATA_DIR").map(PathBuf::from);

        Ok(Self {
            bind_addr: parse(&get, "INFOCO_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            data_dir,
            ai_base_url: get("INFOCO_AI_BASE_URL").unwrap_or(defaults.ai_base_url),
            ai_timeout: parse(&get, "INFOCO_AI_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ai_timeout),
            news_cache_ttl: parse(&get, "INFOCO_NEWS_CACHE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.news_cache_ttl),
            log_format: parse(&get, "INFOCO_LOG_FORMAT")?.unwrap_or(defaults.log_format),
            seed_defaults: parse(&get, "INFOCO_SEED_DEFAULTS")?.unwrap_or(defaults.seed_defaults),
        })
    }
}

impl AppConfig {
    /// Settings that work but are unsuitable outside development.
    ///
    /// Read before logging is set up, so callers log these once it is.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.data_dir.is_none() {
            out.push("INFOCO_DATA_DIR not set; state is kept in memory only");
        }
        out
    }
}

fn parse<T, F>(get: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    get(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn empty_environment_gives_dev_defaults() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn values_are_read_and_typed() {
        let cfg = config(&[
            ("INFOCO_BIND_ADDR", "127.0.0.1:9000"),
            ("INFOCO_DATA_DIR", "/var/lib/infoco"),
            ("INFOCO_AI_TIMEOUT_SECS", "5"),
            ("INFOCO_LOG_FORMAT", "pretty"),
            ("INFOCO_SEED_DEFAULTS", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/var/lib/infoco")));
        assert_eq!(cfg.ai_timeout, Duration::from_secs(5));
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(!cfg.seed_defaults);
    }

    #[test]
    fn missing_data_dir_is_reported_as_a_warning() {
        assert_eq!(
            config(&[]).unwrap().warnings(),
            vec!["INFOCO_DATA_DIR not set; state is kept in memory only"]
        );
        assert!(config(&[("INFOCO_DATA_DIR", "/tmp/infoco")])
            .unwrap()
            .warnings()
            .is_empty());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[("INFOCO_NEWS_CACHE_SECS", "1h")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "INFOCO_NEWS_CACHE_SECS",
                value: "1h".into()
            }
        );
    }
}
