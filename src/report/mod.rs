use chrono::SecondsFormat;
use tabled::{settings::Style, Table, Tabled};

use crate::types::{ResourceRecord, ZombieSet};

/// One row of the stdout report.
#[derive(Debug, Tabled)]
pub struct ZombieRow {
    #[tabled(rename = "Version")]
    pub version: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Namespace")]
    pub namespace: String,
    #[tabled(rename = "Timestamp")]
    pub timestamp: String,
    #[tabled(rename = "Finalizers")]
    pub finalizers: String,
}

impl From<&ResourceRecord> for ZombieRow {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            version: record.api_version.clone(),
            kind: record.kind.clone(),
            name: record.name.clone(),
            namespace: record.namespace.clone(),
            timestamp: record
                .deletion_timestamp
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
            finalizers: record.finalizers.join(","),
        }
    }
}

/// Borderless table of the zombie set; the header is kept for an empty set.
pub fn render_table(zombies: &ZombieSet) -> String {
    let rows: Vec<ZombieRow> = zombies.iter().map(ZombieRow::from).collect();
    Table::new(rows).with(Style::blank()).to_string()
}
