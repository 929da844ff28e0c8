use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::ResourceTypeDescriptor;

/// Virtual metrics resources. They are computed on every request by the
/// metrics server and never carry a deletion timestamp.
pub fn ignored_resources() -> [ResourceTypeDescriptor; 2] {
    [
        ResourceTypeDescriptor::new("metrics.k8s.io", "v1beta1", "pods"),
        ResourceTypeDescriptor::new("metrics.k8s.io", "v1beta1", "nodes"),
    ]
}

pub fn is_ignored(descriptor: &ResourceTypeDescriptor) -> bool {
    ignored_resources().contains(descriptor)
}

/// Splits a `group/version` string. The core group is written as a bare version.
pub fn parse_group_version(gv: &str) -> Option<(String, String)> {
    if gv.is_empty() {
        return Some((String::new(), String::new()));
    }
    match gv.split_once('/') {
        None => Some((String::new(), gv.to_string())),
        Some((_, version)) if version.contains('/') => None,
        Some((group, version)) => Some((group.to_string(), version.to_string())),
    }
}

/// Lists the server-preferred version of every API group and returns each of
/// its resources, minus subresources and the ignore list.
pub async fn discover(client: &Client) -> Result<Vec<ResourceTypeDescriptor>> {
    let mut resource_lists = Vec::new();

    let core = client.list_core_api_versions().await.map_err(Error::Discovery)?;
    if let Some(version) = core.versions.first() {
        let list = client
            .list_core_api_resources(version)
            .await
            .map_err(Error::Discovery)?;
        resource_lists.push(list);
    }

    let groups = client.list_api_groups().await.map_err(Error::Discovery)?;
    for group in groups.groups {
        let preferred = match group.preferred_version.as_ref().or_else(|| group.versions.first()) {
            Some(v) => v.group_version.clone(),
            None => continue,
        };
        let list = client
            .list_api_group_resources(&preferred)
            .await
            .map_err(Error::Discovery)?;
        resource_lists.push(list);
    }

    let descriptors = descriptors_from_lists(&resource_lists);
    info!("discovered {} listable resource types", descriptors.len());
    Ok(descriptors)
}

pub fn descriptors_from_lists(lists: &[APIResourceList]) -> Vec<ResourceTypeDescriptor> {
    let mut descriptors = Vec::new();
    for list in lists {
        let (group, version) = parse_group_version(&list.group_version).unwrap_or_else(|| {
            debug!("malformed group version {:?}", list.group_version);
            (String::new(), String::new())
        });

        for resource in &list.resources {
            if resource.name.contains('/') {
                continue;
            }
            let descriptor = ResourceTypeDescriptor::new(group.clone(), version.clone(), resource.name.clone());
            if is_ignored(&descriptor) {
                info!("ignoring {} {} {}", descriptor.group, descriptor.version, descriptor.resource);
                continue;
            }
            descriptors.push(descriptor);
        }
    }
    descriptors
}
