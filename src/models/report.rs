use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::finding::{
    DormantUser, IdleBucket, IdleDbInstance, StaleDbSnapshot, StaleVolumeSnapshot,
    StoppedInstance, UnattachedVolume, UnusedAddress,
};

/// Per-kind cost totals as published, already formatted as "X.XX USD".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeCostOptimization {
    #[serde(rename = "EC2")]
    pub ec2: String,
    #[serde(rename = "RDS")]
    pub rds: String,
    #[serde(rename = "EBS")]
    pub ebs: String,
    #[serde(rename = "RDSSnapshots")]
    pub rds_snapshots: String,
    #[serde(rename = "EBSSnapshots")]
    pub ebs_snapshots: String,
    #[serde(rename = "ElasticIPs")]
    pub elastic_ips: String,
}

/// Account-global findings plus the cost rollup across all regions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalBucket {
    #[serde(rename = "IAMUsers")]
    pub iam_users: Vec<DormantUser>,
    #[serde(rename = "S3Buckets")]
    pub s3_buckets: Vec<IdleBucket>,
    #[serde(rename = "CumulativeCostOptimization")]
    pub cumulative_cost_optimization: CumulativeCostOptimization,
}

/// The six per-region finding sequences. A region with nothing to report
/// serializes as six empty arrays, which is a valid result, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionBucket {
    #[serde(rename = "StoppedEC2Instances")]
    pub stopped_instances: Vec<StoppedInstance>,
    #[serde(rename = "UnusedRDSInstances")]
    pub idle_db_instances: Vec<IdleDbInstance>,
    #[serde(rename = "AvailableEBSVolumes")]
    pub unattached_volumes: Vec<UnattachedVolume>,
    #[serde(rename = "OldRDSSnapshots")]
    pub stale_db_snapshots: Vec<StaleDbSnapshot>,
    #[serde(rename = "OldEBSSnapshots")]
    pub stale_volume_snapshots: Vec<StaleVolumeSnapshot>,
    #[serde(rename = "AvailableElasticIPs")]
    pub unused_addresses: Vec<UnusedAddress>,
}

impl RegionBucket {
    pub fn is_empty(&self) -> bool {
        self.stopped_instances.is_empty()
            && self.idle_db_instances.is_empty()
            && self.unattached_volumes.is_empty()
            && self.stale_db_snapshots.is_empty()
            && self.stale_volume_snapshots.is_empty()
            && self.unused_addresses.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.stopped_instances.len()
            + self.idle_db_instances.len()
            + self.unattached_volumes.len()
            + self.stale_db_snapshots.len()
            + self.stale_volume_snapshots.len()
            + self.unused_addresses.len()
    }
}

/// The published report. Region buckets are flattened onto the top level
/// keyed by region code, next to `project_name`, `account_id` and `global`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub project_name: String,
    pub account_id: String,
    pub global: GlobalBucket,
    #[serde(flatten)]
    pub regions: BTreeMap<String, RegionBucket>,
}

impl ScanReport {
    pub fn finding_count(&self) -> usize {
        self.global.iam_users.len()
            + self.global.s3_buckets.len()
            + self.regions.values().map(RegionBucket::finding_count).sum::<usize>()
    }
}
