use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dispatch_core::config::DEFAULT_MAX_ATTEMPTS;
use dispatch_core::MatchingConfig;

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Seconds each live dispatch step waits, per pipeline stage and per offer.
pub const DEFAULT_DECISION_LATENCY_SECS: u64 = 5;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dispatch_server",
    about = "HTTP service that finds the closest partner for a rider"
)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,
    /// Simulated latency of live matches, in seconds
    #[arg(long, env = "DECISION_LATENCY_SECS", default_value_t = DEFAULT_DECISION_LATENCY_SECS)]
    pub decision_latency_secs: u64,
    /// Full pipeline passes before a rider is told no partner is available
    #[arg(long, env = "MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Seed partner generation and decisions for reproducible runs
    #[arg(long, env = "DISPATCH_SEED")]
    pub seed: Option<u64>,
}

impl ServerArgs {
    pub fn into_config(self) -> ServerConfig {
        let mut matching = MatchingConfig::default()
            .with_latency(Duration::from_secs(self.decision_latency_secs))
            .with_max_attempts(self.max_attempts);
        matching.seed = self.seed;

        ServerConfig {
            host: self.host,
            port: self.port,
            matching,
        }
    }
}

/// Listener address plus the live matching profile. The tester endpoint
/// derives its own zero-latency profile from `matching`.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub matching: MatchingConfig,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid host/port {}:{}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            matching: MatchingConfig::default()
                .with_latency(Duration::from_secs(DEFAULT_DECISION_LATENCY_SECS)),
        }
    }
}
