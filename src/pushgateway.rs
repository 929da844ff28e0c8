use chrono::SecondsFormat;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::types::ZombieSet;

pub const JOB_NAME: &str = "zombie-detector";
pub const METRIC_NAME: &str = "zombie_duration_seconds";
const METRIC_HELP: &str = "zombie detector zombie duration";
const LABEL_NAMES: &[&str] = &["apiVersion", "kind", "name", "namespace", "updated_at"];

/// Encodes one gauge sample per zombie in the Prometheus text format.
pub fn build_metrics_payload(zombies: &ZombieSet) -> Result<String> {
    let registry = Registry::new();
    let gauge = GaugeVec::new(Opts::new(METRIC_NAME, METRIC_HELP), LABEL_NAMES)?;
    registry.register(Box::new(gauge.clone()))?;

    let updated_at = zombies.observed_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    for record in zombies.iter() {
        let Some(age) = zombies.age_of(record) else {
            continue;
        };
        gauge
            .with_label_values(&[
                record.api_version.as_str(),
                record.kind.as_str(),
                record.name.as_str(),
                record.namespace.as_str(),
                updated_at.as_str(),
            ])
            .set(age.num_milliseconds() as f64 / 1000.0);
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::MetricEncoding(prometheus::Error::Msg(e.to_string())))
}

/// Client for the job's metric group on a Pushgateway.
pub struct Pushgateway {
    client: reqwest::Client,
    endpoint: String,
}

impl Pushgateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn job_url(&self) -> String {
        format!("{}/metrics/job/{}", self.endpoint, JOB_NAME)
    }

    /// Replaces whatever the previous run pushed: the group is always
    /// deleted, and only a non-empty set is pushed afterwards.
    pub async fn publish(&self, zombies: &ZombieSet) -> Result<()> {
        self.delete().await?;
        if zombies.is_empty() {
            info!("no zombies found, cleared metric group {}", JOB_NAME);
            return Ok(());
        }

        let payload = build_metrics_payload(zombies)?;
        self.push_add(payload).await?;
        info!("pushed {} zombie metrics to {}", zombies.len(), self.endpoint);
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        let res = self.client.delete(self.job_url()).send().await?;
        check_status("delete", res).await
    }

    pub async fn push_add(&self, payload: String) -> Result<()> {
        let res = self
            .client
            .post(self.job_url())
            .header(reqwest::header::CONTENT_TYPE, prometheus::TEXT_FORMAT)
            .body(payload)
            .send()
            .await?;
        check_status("push", res).await
    }
}

async fn check_status(operation: &'static str, res: reqwest::Response) -> Result<()> {
    if res.status().is_success() {
        return Ok(());
    }
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    error!("pushgateway {} failed: {} - {}", operation, status, body);
    Err(Error::PublishRejected {
        operation,
        status: status.as_u16(),
        body,
    })
}

pub async fn publish(zombies: &ZombieSet, endpoint: &str) -> Result<()> {
    Pushgateway::new(endpoint).publish(zombies).await
}
