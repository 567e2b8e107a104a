use serde::{Deserialize, Serialize};

/// Resource tag as it appears on the wire and in the published report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// A compute instance sitting in the stopped lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoppedInstance {
    pub instance_id: String,
    pub instance_type: String,
    pub launch_time: String,
    pub region: String,
    /// Whole days since launch at scan time.
    pub age: i64,
    pub tags: Vec<Tag>,
    pub status: String,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// A managed-database instance with zero connections across the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdleDbInstance {
    #[serde(rename = "DBInstanceIdentifier")]
    pub db_instance_identifier: String,
    #[serde(rename = "DBInstanceClass")]
    pub db_instance_class: String,
    pub backup_type: String,
    pub tags: Vec<Tag>,
    pub region: String,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// A block volume in the "available" (unattached) state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnattachedVolume {
    pub volume_id: String,
    /// Size in GB.
    pub size: i64,
    pub tags: Vec<Tag>,
    pub region: String,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// A database snapshot created before the lookback cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaleDbSnapshot {
    #[serde(rename = "DBSnapshotIdentifier")]
    pub db_snapshot_identifier: String,
    pub snapshot_create_time: String,
    pub region: String,
    /// Allocated storage in GB.
    pub size: i64,
    pub tags: Vec<Tag>,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// A block-volume snapshot started before the lookback cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaleVolumeSnapshot {
    pub snapshot_id: String,
    pub start_time: String,
    /// Source volume size in GB.
    pub volume_size: i64,
    pub tags: Vec<Tag>,
    pub region: String,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// A static public IP allocation with no association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnusedAddress {
    pub allocation_id: String,
    pub public_ip: String,
    pub tags: Vec<Tag>,
    pub region: String,
    pub potential_cost_savings: String,
    pub recommendations: String,
}

/// An identity with no console login activity worth keeping around.
///
/// `last_login` is either a `YYYY-MM-DD HH:MM:SS` UTC timestamp or the
/// literal string "Never logged in" for identities without a login profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DormantUser {
    pub user_id: String,
    pub user_name: String,
    pub tags: Vec<Tag>,
    pub last_login: String,
}

/// An object-storage bucket that is empty or shows no activity.
///
/// `status` is "Empty" for buckets with zero objects and "Unused" for
/// non-empty buckets whose object-count and size metrics are both idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdleBucket {
    pub bucket_name: String,
    pub creation_date: String,
    pub tags: Vec<Tag>,
    pub status: String,
}
