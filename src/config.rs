use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Health Buddy";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MODEL: &str = "medgemma";
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 120;
/// Simulated network latency of the mock predictor.
pub const DEFAULT_PREDICTION_DELAY_MS: u64 = 800;

pub const ENV_BIND: &str = "HEALTHBUDDY_BIND";
pub const ENV_OLLAMA_URL: &str = "HEALTHBUDDY_OLLAMA_URL";
pub const ENV_MODEL: &str = "HEALTHBUDDY_MODEL";
pub const ENV_ORACLE_TIMEOUT: &str = "HEALTHBUDDY_OLLAMA_TIMEOUT_SECS";
pub const ENV_SCORE_MODE: &str = "HEALTHBUDDY_SCORE_MODE";
pub const ENV_PREDICTION_DELAY: &str = "HEALTHBUDDY_PREDICTION_DELAY_MS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,healthbuddy_lib=debug"
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Which risk estimator is wired into the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Uniform random score, no per-condition predictions.
    Random,
    /// Score derived from mocked per-condition predictions.
    Prediction,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Random => "random",
            ScoreMode::Prediction => "prediction",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Some(ScoreMode::Random),
            "prediction" | "predictive" => Some(ScoreMode::Prediction),
            _ => None,
        }
    }
}

/// Runtime configuration, read from `HEALTHBUDDY_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Ollama base URL. `None` leaves the assistant unconfigured, so every
    /// assistant reply is the fallback text.
    pub ollama_url: Option<String>,
    pub model: String,
    pub oracle_timeout: Duration,
    pub score_mode: ScoreMode,
    pub prediction_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            ollama_url: None,
            model: DEFAULT_MODEL.to_string(),
            oracle_timeout: Duration::from_secs(DEFAULT_ORACLE_TIMEOUT_SECS),
            score_mode: ScoreMode::Prediction,
            prediction_delay: Duration::from_millis(DEFAULT_PREDICTION_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_BIND) {
            config.bind_addr = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_BIND,
                value: raw.clone(),
            })?;
        }

        config.ollama_url = get(ENV_OLLAMA_URL).map(|url| url.trim().to_string());

        if let Some(model) = get(ENV_MODEL) {
            config.model = model.trim().to_string();
        }

        if let Some(raw) = get(ENV_ORACLE_TIMEOUT) {
            let secs = parse_u64(ENV_ORACLE_TIMEOUT, &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_ORACLE_TIMEOUT,
                    value: raw,
                });
            }
            config.oracle_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(ENV_SCORE_MODE) {
            config.score_mode = ScoreMode::parse(&raw).ok_or(ConfigError::InvalidValue {
                var: ENV_SCORE_MODE,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = get(ENV_PREDICTION_DELAY) {
            config.prediction_delay = Duration::from_millis(parse_u64(ENV_PREDICTION_DELAY, &raw)?);
        }

        Ok(config)
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}
