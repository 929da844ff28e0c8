use chrono::Utc;
use kube::Client;
use tracing::info;

use crate::collector::ResourceCollector;
use crate::config::{Config, Sink};
use crate::detection::detect_zombies;
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::pushgateway;
use crate::report::render_table;
use crate::types::ZombieSet;

/// Discovery, enumeration and detection for one point-in-time snapshot.
pub async fn scan(client: &Client, cfg: &Config) -> Result<ZombieSet> {
    let descriptors = discover(client).await?;
    let records = ResourceCollector::new(client, cfg.concurrency)
        .collect(&descriptors)
        .await?;

    let zombies = detect_zombies(records, cfg.threshold, Utc::now());
    info!("found {} zombie resources", zombies.len());
    Ok(zombies)
}

/// What a finished run produced.
#[derive(Debug)]
pub enum RunOutcome {
    Published(ZombieSet),
    Report { zombies: ZombieSet, table: String },
}

/// Scans the cluster and hands the result to the configured sink, all
/// under the configured deadline.
pub async fn run(client: &Client, cfg: &Config) -> Result<RunOutcome> {
    tokio::time::timeout(cfg.timeout, scan_and_deliver(client, cfg))
        .await
        .map_err(|_| Error::DeadlineExceeded(cfg.timeout))?
}

async fn scan_and_deliver(client: &Client, cfg: &Config) -> Result<RunOutcome> {
    let zombies = scan(client, cfg).await?;
    match cfg.sink() {
        Sink::Pushgateway(endpoint) => {
            pushgateway::publish(&zombies, &endpoint).await?;
            Ok(RunOutcome::Published(zombies))
        }
        Sink::Stdout => {
            let table = render_table(&zombies);
            Ok(RunOutcome::Report { zombies, table })
        }
    }
}
