//! Command-line surface.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "zombie-detector",
    version,
    about = "zombie-detector detects longly undeleted kubernetes resources",
    long_about = None,
    subcommand_negates_reqs = true,
)]
pub struct Cli {
    /// Threshold of detection: how long a resource may stay in deletion (e.g. 24h)
    #[arg(long, env = "ZOMBIE_DETECTOR_THRESHOLD", required = true)]
    pub threshold: Option<String>,

    /// URL of Pushgateway's endpoint. If this flag is not given, the result outputs to stdout
    #[arg(long, env = "ZOMBIE_DETECTOR_PUSHGATEWAY")]
    pub pushgateway: Option<String>,

    /// Use the in-cluster service account instead of a kubeconfig
    #[arg(
        long,
        env = "ZOMBIE_DETECTOR_INCLUSTER",
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub incluster: bool,

    /// Maximum number of resource types listed concurrently
    #[arg(long, env = "ZOMBIE_DETECTOR_CONCURRENCY", default_value_t = 4)]
    pub concurrency: usize,

    /// Deadline for the whole run
    #[arg(long, env = "ZOMBIE_DETECTOR_TIMEOUT", default_value = "10m")]
    pub timeout: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the version of zombie-detector
    Version,
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
