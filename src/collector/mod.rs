use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use serde::Deserialize;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{ResourceRecord, ResourceTypeDescriptor};

/// Status reasons meaning "this type cannot be listed cluster-wide".
const CAPABILITY_GAP_REASONS: &[&str] = &["NotFound", "MethodNotAllowed"];

/// Result of listing a single resource type.
#[derive(Debug)]
pub enum ListOutcome {
    Listed(Vec<ResourceRecord>),
    /// The server refused the verb for this type; carries the status reason.
    Unlistable(String),
}

/// Lists every instance of the discovered resource types across all namespaces.
pub struct ResourceCollector<'a> {
    client: &'a Client,
    concurrency: usize,
}

impl<'a> ResourceCollector<'a> {
    pub fn new(client: &'a Client, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Keeps at most `concurrency` list calls in flight. The first fatal
    /// error drops the join set, which aborts the remaining calls.
    pub async fn collect(&self, descriptors: &[ResourceTypeDescriptor]) -> Result<Vec<ResourceRecord>> {
        let mut pending = descriptors.iter().cloned();
        let mut join_set = JoinSet::new();
        for descriptor in pending.by_ref().take(self.concurrency) {
            spawn_list(&mut join_set, self.client.clone(), descriptor);
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        while let Some(joined) = join_set.join_next().await {
            let (descriptor, result) = joined?;
            match result.or_else(classify_list_error) {
                Ok(ListOutcome::Listed(items)) => {
                    debug!("{}: {} objects", descriptor, items.len());
                    records.extend(items);
                }
                Ok(ListOutcome::Unlistable(reason)) => {
                    debug!("{}: skipped ({})", descriptor, reason);
                    skipped += 1;
                }
                Err(source) => {
                    return Err(Error::Enumeration {
                        resource: descriptor,
                        source,
                    });
                }
            }

            if let Some(next) = pending.next() {
                spawn_list(&mut join_set, self.client.clone(), next);
            }
        }

        records.sort_by(|a, b| {
            (&a.api_version, &a.kind, &a.namespace, &a.name).cmp(&(&b.api_version, &b.kind, &b.namespace, &b.name))
        });
        info!(
            "collected {} objects from {} resource types ({} not listable)",
            records.len(),
            descriptors.len() - skipped,
            skipped
        );
        Ok(records)
    }
}

fn spawn_list(
    join_set: &mut JoinSet<(ResourceTypeDescriptor, std::result::Result<ListOutcome, kube::Error>)>,
    client: Client,
    descriptor: ResourceTypeDescriptor,
) {
    join_set.spawn(async move {
        let result = list_resource(&client, &descriptor).await;
        (descriptor, result)
    });
}

/// Issues one list-across-all-namespaces call.
pub async fn list_resource(
    client: &Client,
    descriptor: &ResourceTypeDescriptor,
) -> std::result::Result<ListOutcome, kube::Error> {
    let req = http::Request::builder()
        .method("GET")
        .uri(descriptor.list_path())
        .body(Vec::new())
        .map_err(kube::Error::HttpError)?;
    let list: UnstructuredList = client.request(req).await?;
    Ok(ListOutcome::Listed(list.into_records()))
}

/// Absorbs errors that only say the type is not listable; hands back anything else.
pub fn classify_list_error(err: kube::Error) -> std::result::Result<ListOutcome, kube::Error> {
    if is_capability_gap(&err) {
        if let kube::Error::Api(resp) = err {
            return Ok(ListOutcome::Unlistable(resp.reason));
        }
    }
    Err(err)
}

pub fn is_capability_gap(err: &kube::Error) -> bool {
    match err {
        kube::Error::Api(resp) => CAPABILITY_GAP_REASONS.contains(&resp.reason.as_str()),
        _ => false,
    }
}

/// The subset of a list response the detector reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstructuredList {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub items: Option<Vec<UnstructuredItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstructuredItem {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
}

impl UnstructuredList {
    /// Built-in list responses leave the per-item type fields empty; those
    /// items take the list's apiVersion and its kind without the `List` suffix.
    pub fn into_records(self) -> Vec<ResourceRecord> {
        let item_kind = self.kind.strip_suffix("List").unwrap_or(&self.kind).to_string();
        let list_api_version = self.api_version;

        self.items
            .unwrap_or_default()
            .into_iter()
            .map(|item| ResourceRecord {
                api_version: item
                    .api_version
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| list_api_version.clone()),
                kind: item.kind.filter(|k| !k.is_empty()).unwrap_or_else(|| item_kind.clone()),
                name: item.metadata.name.unwrap_or_default(),
                namespace: item.metadata.namespace.unwrap_or_default(),
                deletion_timestamp: item.metadata.deletion_timestamp.map(|t| t.0),
                finalizers: item.metadata.finalizers.unwrap_or_default(),
            })
            .collect()
    }
}
