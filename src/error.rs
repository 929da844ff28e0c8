use thiserror::Error;

use crate::types::ResourceTypeDescriptor;

/// Fatal failures of a detection run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("resource discovery failed")]
    Discovery(#[source] kube::Error),

    #[error("failed to list {resource}")]
    Enumeration {
        resource: ResourceTypeDescriptor,
        #[source]
        source: kube::Error,
    },

    #[error("enumeration worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("pushgateway request failed: {0}")]
    Publish(#[from] reqwest::Error),

    #[error("pushgateway rejected {operation} with status {status}: {body}")]
    PublishRejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to encode metrics: {0}")]
    MetricEncoding(#[from] prometheus::Error),

    #[error("run did not finish within {0:?}")]
    DeadlineExceeded(std::time::Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
