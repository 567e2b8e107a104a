use serde::{Deserialize, Serialize};

/// Flat 30-day month used to project hourly rates to a monthly estimate.
/// A deliberate simplification, not a derived calendar duration.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// The resource kinds a scan can bill against. Keys into the cost rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    ComputeInstance,
    DbInstance,
    BlockVolume,
    DbSnapshot,
    BlockSnapshot,
    ElasticAddress,
}

impl ResourceKind {
    /// Key under `CumulativeCostOptimization` in the published report.
    pub fn total_key(&self) -> &'static str {
        match self {
            ResourceKind::ComputeInstance => "EC2",
            ResourceKind::DbInstance => "RDS",
            ResourceKind::BlockVolume => "EBS",
            ResourceKind::DbSnapshot => "RDSSnapshots",
            ResourceKind::BlockSnapshot => "EBSSnapshots",
            ResourceKind::ElasticAddress => "ElasticIPs",
        }
    }
}

/// Fixed per-unit rates used for savings estimates. Anchored to us-east-1
/// list prices; a configuration surface, not runtime-discovered pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// USD per hour for a stopped compute instance (t2.micro anchor).
    pub compute_hourly: f64,
    /// USD per GB-month for block volumes.
    pub block_per_gb_month: f64,
    /// USD per hour for a managed-database instance (db.t2.micro anchor).
    pub db_hourly: f64,
    /// USD per GB-month for database snapshots.
    pub db_snapshot_per_gb_month: f64,
    /// USD per GB-month for block-volume snapshots.
    pub block_snapshot_per_gb_month: f64,
    /// USD per hour for an unassociated static IP.
    pub address_hourly: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            compute_hourly: 0.0116,
            block_per_gb_month: 0.10,
            db_hourly: 0.038,
            db_snapshot_per_gb_month: 0.125,
            block_snapshot_per_gb_month: 0.10,
            address_hourly: 0.005,
        }
    }
}

impl RateTable {
    /// Monthly estimate for an hourly-billed kind.
    pub fn monthly_from_hourly(hourly: f64) -> f64 {
        hourly * HOURS_PER_MONTH
    }
}
