use chrono::Duration;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Everything a detection run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub threshold: Duration,
    pub pushgateway: Option<String>,
    pub in_cluster: bool,
    pub concurrency: usize,
    pub timeout: std::time::Duration,
}

/// Where the zombie set ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Pushgateway(String),
    Stdout,
}

impl Config {
    /// A config for `threshold` with every other setting at its command-line default.
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pushgateway: None,
            in_cluster: false,
            concurrency: 4,
            timeout: std::time::Duration::from_secs(600),
        }
    }

    pub fn sink(&self) -> Sink {
        match &self.pushgateway {
            Some(endpoint) => Sink::Pushgateway(endpoint.clone()),
            None => Sink::Stdout,
        }
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let raw_threshold = cli
        .threshold
        .as_deref()
        .ok_or_else(|| Error::Configuration("--threshold is required".to_string()))?;
    let threshold = parse_threshold(raw_threshold)?;

    let timeout = humantime::parse_duration(cli.timeout.trim())
        .map_err(|e| Error::Configuration(format!("invalid timeout {:?}: {}", cli.timeout, e)))?;
    if timeout.is_zero() {
        return Err(Error::Configuration("timeout must be greater than zero".to_string()));
    }

    if cli.concurrency == 0 {
        return Err(Error::Configuration("concurrency must be at least 1".to_string()));
    }

    let pushgateway = match cli.pushgateway.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(endpoint) => Some(normalize_endpoint(endpoint)),
    };

    Ok(Config {
        threshold,
        pushgateway,
        in_cluster: cli.incluster,
        concurrency: cli.concurrency,
        timeout,
    })
}

pub fn parse_threshold(raw: &str) -> Result<Duration> {
    let std_duration = humantime::parse_duration(raw.trim())
        .map_err(|e| Error::Configuration(format!("invalid threshold {:?}: {}", raw, e)))?;
    Duration::from_std(std_duration)
        .map_err(|_| Error::Configuration(format!("threshold {:?} is out of range", raw)))
}

/// Adds a scheme when missing and drops trailing slashes.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };
    endpoint.trim_end_matches('/').to_string()
}
