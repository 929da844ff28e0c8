use chrono::{DateTime, Duration, Utc};

use crate::types::{ResourceRecord, ZombieSet};

/// A resource is a zombie once its deletion has been pending for strictly
/// longer than `threshold` at `now`.
pub fn is_zombie(record: &ResourceRecord, threshold: Duration, now: DateTime<Utc>) -> bool {
    match record.deletion_timestamp {
        Some(deleted_at) => now - deleted_at > threshold,
        None => false,
    }
}

/// Filters a snapshot against a single reference instant.
pub fn detect_zombies<I>(records: I, threshold: Duration, now: DateTime<Utc>) -> ZombieSet
where
    I: IntoIterator<Item = ResourceRecord>,
{
    let resources = records
        .into_iter()
        .filter(|r| is_zombie(r, threshold, now))
        .collect();
    ZombieSet {
        observed_at: now,
        resources,
    }
}
