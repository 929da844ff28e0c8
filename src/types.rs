use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// One listable resource type, identified by its group/version/resource triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceTypeDescriptor {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl ResourceTypeDescriptor {
    pub fn new(group: impl Into<String>, version: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// Cluster-wide list path for this type.
    pub fn list_path(&self) -> String {
        if self.group.is_empty() {
            format!("/api/{}/{}", self.version, self.resource)
        } else {
            format!("/apis/{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

impl fmt::Display for ResourceTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

/// The fields of a live object that matter for zombie detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub deletion_timestamp: Option<DateTime<Utc>>,
    pub finalizers: Vec<String>,
}

/// Records whose deletion has been pending longer than the threshold,
/// together with the instant they were evaluated at.
#[derive(Debug, Clone)]
pub struct ZombieSet {
    pub observed_at: DateTime<Utc>,
    pub resources: Vec<ResourceRecord>,
}

impl ZombieSet {
    pub fn empty(observed_at: DateTime<Utc>) -> Self {
        Self {
            observed_at,
            resources: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.resources.iter()
    }

    /// Time the record has spent in deletion as of `observed_at`.
    pub fn age_of(&self, record: &ResourceRecord) -> Option<Duration> {
        record.deletion_timestamp.map(|t| self.observed_at - t)
    }
}
