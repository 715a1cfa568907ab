use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Default API base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Synthesis API settings
    pub api: ApiConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Outbound request settings
    pub request: RequestConfig,
    /// Demo generator settings
    pub demo: DemoConfig,
    /// Result polling settings
    pub poll: PollConfig,
}

/// Synthesis API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Demo response generator configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Shortest synthetic gene, in bases.
    pub min_sequence_length: usize,
    /// Longest synthetic gene, in bases.
    pub max_sequence_length: usize,
    /// Fraction of positions rewritten by simulated codon optimization.
    pub mutation_rate: f64,
    /// Fixed seed for reproducible demo data.
    pub seed: Option<u64>,
}

/// Polling configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between checks in milliseconds
    pub interval_ms: u64,
    /// Checks before giving up
    pub max_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = ApiConfig {
            base_url: env::var("BIOSYNTH_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: parse_var("REQUEST_TIMEOUT_MS").unwrap_or(30000),
        };

        let defaults = DemoConfig::default();
        let demo = DemoConfig {
            min_sequence_length: parse_var("DEMO_MIN_SEQUENCE_LENGTH")
                .unwrap_or(defaults.min_sequence_length),
            max_sequence_length: parse_var("DEMO_MAX_SEQUENCE_LENGTH")
                .unwrap_or(defaults.max_sequence_length),
            mutation_rate: parse_var("DEMO_MUTATION_RATE").unwrap_or(defaults.mutation_rate),
            seed: parse_var("DEMO_SEED"),
        };

        let poll = PollConfig {
            interval_ms: parse_var("POLL_INTERVAL_MS").unwrap_or(2000),
            max_attempts: parse_var("POLL_MAX_ATTEMPTS").unwrap_or(30),
        };

        let config = Config {
            api,
            logging,
            request,
            demo,
            poll,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.request.timeout_ms == 0 {
            return Err(config_error("REQUEST_TIMEOUT_MS must be greater than zero"));
        }
        self.demo.validate()?;
        if self.poll.max_attempts == 0 {
            return Err(config_error("POLL_MAX_ATTEMPTS must be greater than zero"));
        }
        Ok(())
    }
}

impl DemoConfig {
    /// Check length bounds and mutation rate.
    pub fn validate(&self) -> Result<(), AppError> {
        // start codon, one sense codon, stop codon
        if self.min_sequence_length < 9 {
            return Err(config_error("DEMO_MIN_SEQUENCE_LENGTH must be at least 9"));
        }
        if self.min_sequence_length > self.max_sequence_length {
            return Err(config_error(
                "DEMO_MIN_SEQUENCE_LENGTH must not exceed DEMO_MAX_SEQUENCE_LENGTH",
            ));
        }
        // genes are whole codons
        if self.min_sequence_length.div_ceil(3) * 3 > self.max_sequence_length {
            return Err(config_error(
                "DEMO_MIN_SEQUENCE_LENGTH..=DEMO_MAX_SEQUENCE_LENGTH must contain a multiple of 3",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(config_error("DEMO_MUTATION_RATE must be within [0, 1]"));
        }
        Ok(())
    }
}

impl RequestConfig {
    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl PollConfig {
    /// Interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            min_sequence_length: 1200,
            max_sequence_length: 3000,
            mutation_rate: 0.05,
            seed: None,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            max_attempts: 30,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn config_error(message: &str) -> AppError {
    AppError::Config {
        message: message.to_string(),
    }
}
