use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::assessment::ScoringConfig;

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
    pub model: ModelConfig,
    pub scoring: ScoringConfig,
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

        let artifact_dir = env::var("DW_MODEL_DIR")
            .ok()
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            model: ModelConfig { artifact_dir },
            scoring: scoring_from_env()?,
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
    /// Colour output; only enabled for local development.
    pub ansi: bool,
}

/// Location of the tendency model artifacts; `None` runs without a model.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    pub artifact_dir: Option<PathBuf>,
}

/// Reference cutoffs with any `DW_*` overrides applied.
pub fn scoring_from_env() -> Result<ScoringConfig, ConfigError> {
    let mut config = ScoringConfig::default();

    let fluid = &mut config.fluid;
    override_number("DW_FLUID_UNDERFILLED_ABOVE_PWI", &mut fluid.underfilled_above_pwi)?;
    override_number("DW_FLUID_OVERFILLED_BELOW_PWI", &mut fluid.overfilled_below_pwi)?;
    override_number("DW_FLUID_LOW_SYSTOLIC_BP", &mut fluid.low_systolic_bp)?;
    override_number("DW_FLUID_HIGH_SYSTOLIC_BP", &mut fluid.high_systolic_bp)?;
    override_flag("DW_FLUID_REQUIRES_BP", &mut fluid.requires_blood_pressure)?;

    let cardiac = &mut config.cardiac;
    override_number("DW_CTR_MALE_PCT", &mut cardiac.male_ctr_pct)?;
    override_number("DW_CTR_FEMALE_PCT", &mut cardiac.female_ctr_pct)?;
    override_number("DW_CTR_RAPID_INCREASE_PCT", &mut cardiac.ctr_rapid_increase_pct)?;
    override_number(
        "DW_NT_PROBNP_HIGH_CONCERN_FROM",
        &mut cardiac.nt_probnp_high_concern_from,
    )?;
    override_cutoff("DW_BNP_HIGH_CONCERN_FROM", &mut cardiac.bnp_high_concern_from)?;
    override_cutoff("DW_HANP_HIGH_CONCERN_FROM", &mut cardiac.hanp_high_concern_from)?;

    let nutrition = &mut config.nutrition;
    override_number("DW_GNRI_HIGH_RISK_BELOW", &mut nutrition.gnri_high_risk_below)?;
    override_number("DW_GNRI_LOW_RISK_FROM", &mut nutrition.gnri_low_risk_from)?;
    override_points("DW_NRI_HIGH_RISK_FROM", &mut nutrition.nri_high_risk_from)?;
    override_points("DW_NRI_MEDIUM_RISK_FROM", &mut nutrition.nri_medium_risk_from)?;

    let salt = &mut config.salt;
    override_number("DW_SALT_GRAMS_PER_KG", &mut salt.grams_per_kg)?;
    override_number("DW_SALT_HIGH_RISK_ABOVE_G", &mut salt.high_risk_above_g)?;

    check_ordering(&config)?;
    Ok(config)
}

fn env_value(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ConfigError::InvalidThreshold {
            name,
            value: value.to_string(),
        })
}

fn override_number(name: &'static str, target: &mut f64) -> Result<(), ConfigError> {
    if let Some(value) = env_value(name) {
        *target = parse_number(name, &value)?;
    }
    Ok(())
}

/// `none` or `off` clears an optional cutoff.
fn override_cutoff(name: &'static str, target: &mut Option<f64>) -> Result<(), ConfigError> {
    if let Some(value) = env_value(name) {
        *target = match value.to_ascii_lowercase().as_str() {
            "none" | "off" => None,
            _ => Some(parse_number(name, &value)?),
        };
    }
    Ok(())
}

fn override_points(name: &'static str, target: &mut u8) -> Result<(), ConfigError> {
    if let Some(value) = env_value(name) {
        *target = value
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidThreshold { name, value })?;
    }
    Ok(())
}

fn override_flag(name: &'static str, target: &mut bool) -> Result<(), ConfigError> {
    if let Some(value) = env_value(name) {
        *target = match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => return Err(ConfigError::InvalidFlag { name, value }),
        };
    }
    Ok(())
}

fn check_ordering(config: &ScoringConfig) -> Result<(), ConfigError> {
    let pairs = [
        (
            "DW_FLUID_OVERFILLED_BELOW_PWI <= DW_FLUID_UNDERFILLED_ABOVE_PWI",
            config.fluid.overfilled_below_pwi <= config.fluid.underfilled_above_pwi,
        ),
        (
            "DW_FLUID_LOW_SYSTOLIC_BP <= DW_FLUID_HIGH_SYSTOLIC_BP",
            config.fluid.low_systolic_bp <= config.fluid.high_systolic_bp,
        ),
        (
            "DW_GNRI_HIGH_RISK_BELOW <= DW_GNRI_LOW_RISK_FROM",
            config.nutrition.gnri_high_risk_below <= config.nutrition.gnri_low_risk_from,
        ),
        (
            "DW_NRI_MEDIUM_RISK_FROM <= DW_NRI_HIGH_RISK_FROM",
            config.nutrition.nri_medium_risk_from <= config.nutrition.nri_high_risk_from,
        ),
    ];

    match pairs.into_iter().find(|(_, holds)| !holds) {
        Some((rule, _)) => Err(ConfigError::InconsistentThresholds { rule }),
        None => Ok(()),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { name: &'static str, value: String },
    InvalidFlag { name: &'static str, value: String },
    InconsistentThresholds { rule: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} must be a finite number, got '{value}'")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::InconsistentThresholds { rule } => {
                write!(f, "threshold overrides violate {rule}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InconsistentThresholds { .. } => None,
        }
    }
}
