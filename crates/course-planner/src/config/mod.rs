use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::planning::{
    AdviceRules, CreditBand, FitnessWeights, SearchLimits, UnknownPreferencePolicy,
    DEFAULT_RESULT_LIMIT,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) if environment == AppEnvironment::Production => LogFormat::Json,
            Err(_) => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            planner: PlannerConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Line format of emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Search caps, validation bands, and rule tables for plan generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub limits: SearchLimits,
    pub credit_band: CreditBand,
    pub result_limit: usize,
    pub unknown_preference: UnknownPreferencePolicy,
    pub weights: FitnessWeights,
    pub advice_rules: AdviceRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            limits: SearchLimits::default(),
            credit_band: CreditBand::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
            unknown_preference: UnknownPreferencePolicy::default(),
            weights: FitnessWeights::default(),
            advice_rules: AdviceRules::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let limits = SearchLimits {
            max_plans: env_number("PLANNER_MAX_PLANS", defaults.limits.max_plans)?,
            fallback_threshold: env_number(
                "PLANNER_FALLBACK_THRESHOLD",
                defaults.limits.fallback_threshold,
            )?,
            fallback_max_subset_size: env_number(
                "PLANNER_FALLBACK_MAX_SUBSET",
                defaults.limits.fallback_max_subset_size,
            )?,
            max_subsets_explored: match env::var("PLANNER_SUBSET_BUDGET") {
                Ok(raw) if raw.trim().eq_ignore_ascii_case("unbounded") => None,
                Ok(raw) => Some(parse_number("PLANNER_SUBSET_BUDGET", &raw)?),
                Err(_) => defaults.limits.max_subsets_explored,
            },
        };

        let result_limit = env_number("PLANNER_RESULT_LIMIT", defaults.result_limit)?;

        let unknown_preference = match env::var("PLANNER_UNKNOWN_PREFERENCE") {
            Ok(raw) => UnknownPreferencePolicy::parse(&raw)
                .ok_or(ConfigError::InvalidPreferencePolicy(raw))?,
            Err(_) => defaults.unknown_preference,
        };

        let advice_rules = match env::var("APP_ADVICE_RULES") {
            Ok(path) => load_advice_rules(PathBuf::from(path))?,
            Err(_) => defaults.advice_rules,
        };

        Ok(Self {
            limits,
            result_limit,
            unknown_preference,
            advice_rules,
            ..defaults
        })
    }
}

fn env_number<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_number(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_number<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}

fn load_advice_rules(path: PathBuf) -> Result<AdviceRules, ConfigError> {
    let file = std::fs::File::open(&path).map_err(|source| ConfigError::AdviceRulesIo {
        path: path.clone(),
        source,
    })?;
    AdviceRules::from_json_reader(std::io::BufReader::new(file))
        .map_err(|source| ConfigError::AdviceRulesFormat { path, source })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        name: &'static str,
        value: String,
    },
    InvalidPreferencePolicy(String),
    InvalidLogFormat(String),
    AdviceRulesIo {
        path: PathBuf,
        source: std::io::Error,
    },
    AdviceRulesFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (got '{value}')")
            }
            ConfigError::InvalidPreferencePolicy(value) => write!(
                f,
                "PLANNER_UNKNOWN_PREFERENCE must be 'balanced' or 'reject' (got '{value}')"
            ),
            ConfigError::InvalidLogFormat(value) => write!(
                f,
                "APP_LOG_FORMAT must be 'compact' or 'json' (got '{value}')"
            ),
            ConfigError::AdviceRulesIo { path, .. } => {
                write!(f, "unable to read advice rules at {}", path.display())
            }
            ConfigError::AdviceRulesFormat { path, .. } => {
                write!(f, "advice rules at {} are not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidPreferencePolicy(_)
            | ConfigError::InvalidLogFormat(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::AdviceRulesIo { source, .. } => Some(source),
            ConfigError::AdviceRulesFormat { source, .. } => Some(source),
        }
    }
}
