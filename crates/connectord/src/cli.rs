use clap::{Parser, ValueEnum};
use core_chainbase::{ClientConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "CONNECTOR_HOST",
        default_value = "0.0.0.0",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(
        long,
        env = "CONNECTOR_PORT",
        default_value = "8123",
        help = "Port to bind to"
    )]
    pub port: u16,

    #[arg(
        long,
        env = "CONNECTOR_RATE_LIMIT",
        default_value = "1",
        help = "Queries allowed at once, refilled at one per second"
    )]
    pub rate_limit: NonZeroU32,

    #[arg(
        long,
        env = "CONNECTOR_REQUEST_TIMEOUT",
        default_value = "1200",
        help = "Seconds before a request is abandoned"
    )]
    request_timeout: u64,

    #[arg(
        long,
        env = "CHAINBASE_API_KEY",
        default_value = DEFAULT_API_KEY,
        hide_env_values = true,
        hide_default_value = true,
        help = "Chainbase API key",
        help_heading = "Chainbase Options"
    )]
    api_key: String,

    #[arg(
        long,
        env = "CHAINBASE_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        help = "Chainbase API base url",
        help_heading = "Chainbase Options"
    )]
    base_url: String,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(&self.base_url)
            .with_api_key(&self.api_key)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TracingLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Error => Self::ERROR,
            TracingLevel::Warn => Self::WARN,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}
