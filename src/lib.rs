// Public modules
pub mod types;
pub mod error;
pub mod cli;
pub mod config;
pub mod kubernetes;
pub mod discovery;
pub mod collector;
pub mod detection;
pub mod pushgateway;
pub mod report;
pub mod pipeline;

// Re-export commonly used items
pub use types::*;
pub use error::{Error, Result};
pub use cli::{Cli, Command};
pub use config::{load_config, Config, Sink};
pub use kubernetes::build_client;
pub use discovery::{discover, ignored_resources, is_ignored, parse_group_version};
pub use collector::{classify_list_error, is_capability_gap, ListOutcome, ResourceCollector};
pub use detection::{detect_zombies, is_zombie};
pub use pushgateway::{build_metrics_payload, publish, Pushgateway};
pub use report::render_table;
pub use pipeline::{run, scan, RunOutcome};
