pub mod addresses;
pub mod buckets;
pub mod compute;
pub mod database;
pub mod db_snapshots;
pub mod identity;
pub mod volume_snapshots;
pub mod volumes;

use async_trait::async_trait;

use crate::cost::ResourceKind;
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::{
    IdleDbInstance, RegionBucket, StaleDbSnapshot, StaleVolumeSnapshot, StoppedInstance,
    UnattachedVolume, UnusedAddress,
};

pub use addresses::UnusedAddressProbe;
pub use buckets::BucketProbe;
pub use compute::StoppedInstanceProbe;
pub use database::IdleDbInstanceProbe;
pub use db_snapshots::StaleDbSnapshotProbe;
pub use identity::IdentityProbe;
pub use volume_snapshots::StaleVolumeSnapshotProbe;
pub use volumes::UnattachedVolumeProbe;

/// Fixed ticketing link embedded in every recommendation.
pub const TICKET_URL: &str = "https://cuda.atlassian.net/jira/";

/// Deterministic recommendation text: console locator plus ticketing link.
/// Byte-for-byte reproducible for a given resource id and region.
pub(crate) fn cleanup_recommendation(console_url: &str) -> String {
    format!(
        "Need to save cost? Review and delete this resource: {}\nNeed to create cleanup ticket for this resource? {}",
        console_url, TICKET_URL
    )
}

/// One finding from a regional probe, in report form.
#[derive(Debug, Clone)]
pub enum RegionalFinding {
    StoppedInstance(StoppedInstance),
    IdleDbInstance(IdleDbInstance),
    UnattachedVolume(UnattachedVolume),
    StaleDbSnapshot(StaleDbSnapshot),
    StaleVolumeSnapshot(StaleVolumeSnapshot),
    UnusedAddress(UnusedAddress),
}

impl RegionalFinding {
    pub fn kind(&self) -> ResourceKind {
        match self {
            RegionalFinding::StoppedInstance(_) => ResourceKind::ComputeInstance,
            RegionalFinding::IdleDbInstance(_) => ResourceKind::DbInstance,
            RegionalFinding::UnattachedVolume(_) => ResourceKind::BlockVolume,
            RegionalFinding::StaleDbSnapshot(_) => ResourceKind::DbSnapshot,
            RegionalFinding::StaleVolumeSnapshot(_) => ResourceKind::BlockSnapshot,
            RegionalFinding::UnusedAddress(_) => ResourceKind::ElasticAddress,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            RegionalFinding::StoppedInstance(f) => &f.region,
            RegionalFinding::IdleDbInstance(f) => &f.region,
            RegionalFinding::UnattachedVolume(f) => &f.region,
            RegionalFinding::StaleDbSnapshot(f) => &f.region,
            RegionalFinding::StaleVolumeSnapshot(f) => &f.region,
            RegionalFinding::UnusedAddress(f) => &f.region,
        }
    }

    /// Sort this finding into its sequence within a region bucket.
    pub fn add_to(self, bucket: &mut RegionBucket) {
        match self {
            RegionalFinding::StoppedInstance(f) => bucket.stopped_instances.push(f),
            RegionalFinding::IdleDbInstance(f) => bucket.idle_db_instances.push(f),
            RegionalFinding::UnattachedVolume(f) => bucket.unattached_volumes.push(f),
            RegionalFinding::StaleDbSnapshot(f) => bucket.stale_db_snapshots.push(f),
            RegionalFinding::StaleVolumeSnapshot(f) => bucket.stale_volume_snapshots.push(f),
            RegionalFinding::UnusedAddress(f) => bucket.unused_addresses.push(f),
        }
    }
}

/// A finding plus its unrounded savings contribution. The orchestrator's
/// reducer sums contributions into the per-kind totals; probes never touch
/// shared accumulator state.
#[derive(Debug, Clone)]
pub struct ProbeFinding {
    pub finding: RegionalFinding,
    pub savings: f64,
}

/// One resource kind's discovery-and-filter pass over a single region.
/// Probes are read-only and hold no per-scan state, so the orchestrator is
/// free to run regions concurrently.
#[async_trait]
pub trait RegionalProbe: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> ResourceKind;

    async fn scan(
        &self,
        region: &str,
        window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError>;
}
