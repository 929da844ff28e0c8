use kube::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Builds an API client from the configured credential source.
pub async fn build_client(cfg: &Config) -> Result<Client> {
    let kube_config = if cfg.in_cluster {
        debug!("using in-cluster service account credentials");
        kube::Config::incluster()
            .map_err(|e| Error::Configuration(format!("in-cluster credentials unavailable: {}", e)))?
    } else {
        debug!("inferring credentials from kubeconfig");
        kube::Config::infer()
            .await
            .map_err(|e| Error::Configuration(format!("cannot load kubeconfig: {}", e)))?
    };

    Client::try_from(kube_config)
        .map_err(|e| Error::Configuration(format!("cannot build Kubernetes client: {}", e)))
}
