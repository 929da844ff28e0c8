//! A fake API server built from mockito mocks.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, SecondsFormat, Utc};
use mockito::{Mock, ServerGuard};
use serde_json::{json, Value};

/// How the fake server answers the list call for one resource type.
pub enum ListReply {
    Items(Vec<Value>),
    Status { code: usize, reason: &'static str },
}

pub struct FakeResource {
    pub group_version: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub reply: ListReply,
}

impl FakeResource {
    pub fn new(group_version: &'static str, name: &'static str, kind: &'static str, reply: ListReply) -> Self {
        Self {
            group_version,
            name,
            kind,
            reply,
        }
    }
}

pub struct FakeCluster {
    // Dropping a mock unregisters it
    _discovery: Vec<Mock>,
    pub lists: HashMap<String, Mock>,
}

impl FakeCluster {
    pub fn list_mock(&self, path: &str) -> &Mock {
        &self.lists[path]
    }
}

pub fn kube_client(server: &ServerGuard) -> kube::Client {
    let uri: http::Uri = server.url().parse().unwrap();
    kube::Client::try_from(kube::Config::new(uri)).unwrap()
}

pub fn object(api_version: &str, kind: &str, name: &str, namespace: &str, deleted_hours_ago: Option<i64>) -> Value {
    let mut metadata = json!({ "name": name, "namespace": namespace });
    if let Some(hours) = deleted_hours_ago {
        let ts = (Utc::now() - Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true);
        metadata["deletionTimestamp"] = json!(ts);
        metadata["finalizers"] = json!(["kubernetes"]);
    }
    json!({ "apiVersion": api_version, "kind": kind, "metadata": metadata })
}

fn list_path(group_version: &str, resource: &str) -> String {
    if group_version.contains('/') {
        format!("/apis/{}/{}", group_version, resource)
    } else {
        format!("/api/{}/{}", group_version, resource)
    }
}

fn json_mock(server: &mut ServerGuard, path: &str, status: usize, body: Value) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
}

/// Mounts discovery documents for every group version used by `resources`
/// plus one list endpoint per resource. Ignored types get a list mock that
/// expects no calls.
pub async fn mount_cluster(server: &mut ServerGuard, resources: Vec<FakeResource>) -> FakeCluster {
    let mut by_group_version: BTreeMap<&str, Vec<&FakeResource>> = BTreeMap::new();
    for r in &resources {
        by_group_version.entry(r.group_version).or_default().push(r);
    }

    let mut discovery = Vec::new();
    discovery.push(
        json_mock(
            server,
            "/api",
            200,
            json!({
                "kind": "APIVersions",
                "apiVersion": "v1",
                "versions": ["v1"],
                "serverAddressByClientCIDRs": []
            }),
        )
        .create_async()
        .await,
    );

    let groups: Vec<Value> = by_group_version
        .keys()
        .filter(|gv| gv.contains('/'))
        .map(|gv| {
            let (group, version) = gv.split_once('/').unwrap();
            json!({
                "name": group,
                "versions": [{ "groupVersion": gv, "version": version }],
                "preferredVersion": { "groupVersion": gv, "version": version }
            })
        })
        .collect();
    discovery.push(
        json_mock(
            server,
            "/apis",
            200,
            json!({ "kind": "APIGroupList", "apiVersion": "v1", "groups": groups }),
        )
        .create_async()
        .await,
    );

    if !by_group_version.contains_key("v1") {
        discovery.push(
            json_mock(
                server,
                "/api/v1",
                200,
                json!({ "kind": "APIResourceList", "apiVersion": "v1", "groupVersion": "v1", "resources": [] }),
            )
            .create_async()
            .await,
        );
    }

    for (gv, members) in &by_group_version {
        let api_resources: Vec<Value> = members
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "singularName": "",
                    "namespaced": true,
                    "kind": r.kind,
                    "verbs": ["get", "list", "watch"]
                })
            })
            .collect();
        let path = if gv.contains('/') { format!("/apis/{}", gv) } else { format!("/api/{}", gv) };
        discovery.push(
            json_mock(
                server,
                &path,
                200,
                json!({
                    "kind": "APIResourceList",
                    "apiVersion": "v1",
                    "groupVersion": gv,
                    "resources": api_resources
                }),
            )
            .create_async()
            .await,
        );
    }

    let mut lists = HashMap::new();
    for r in resources {
        let path = list_path(r.group_version, r.name);
        let mock = match r.reply {
            ListReply::Items(items) => {
                let (api_version, list_kind) = (r.group_version, format!("{}List", r.kind));
                json_mock(
                    server,
                    &path,
                    200,
                    json!({
                        "apiVersion": api_version,
                        "kind": list_kind,
                        "metadata": { "resourceVersion": "1" },
                        "items": items
                    }),
                )
            }
            ListReply::Status { code, reason } => json_mock(
                server,
                &path,
                code,
                json!({
                    "kind": "Status",
                    "apiVersion": "v1",
                    "metadata": {},
                    "status": "Failure",
                    "message": format!("{} {}", reason, r.name),
                    "reason": reason,
                    "code": code
                }),
            ),
        };
        let mock = if r.group_version == "metrics.k8s.io/v1beta1" {
            mock.expect(0)
        } else {
            mock
        };
        lists.insert(path, mock.create_async().await);
    }

    FakeCluster {
        _discovery: discovery,
        lists,
    }
}
