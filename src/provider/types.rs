use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Tag;

/// The account the credentials resolve to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub instance_id: String,
    pub instance_type: String,
    pub launch_time: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub volume_id: String,
    pub size_gb: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSnapshotSummary {
    pub snapshot_id: String,
    pub start_time: DateTime<Utc>,
    pub volume_size_gb: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSummary {
    pub allocation_id: String,
    pub public_ip: String,
    /// None when the address is not attached to anything.
    pub association_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbInstanceSummary {
    pub identifier: String,
    pub class: String,
    /// Whether the instance reports automated-backup retention.
    #[serde(default)]
    pub automated_backups: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbSnapshotSummary {
    pub identifier: String,
    pub create_time: DateTime<Utc>,
    pub allocated_storage_gb: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Console login profile for an identity. Looking one up for an identity
/// that never had console access yields NotFound, which is an expected
/// data state, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginProfile {
    pub create_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSummary {
    pub name: String,
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: &str, value: &str) -> Self {
        Self { name: name.to_string(), value: value.to_string() }
    }
}

/// One statistics request against the monitoring backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricQuery {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period_seconds: i64,
    pub statistic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub average: f64,
}
