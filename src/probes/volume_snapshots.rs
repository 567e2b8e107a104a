use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::StaleVolumeSnapshot;
use crate::provider::ComputeApi;
use crate::reporting::formatter::{format_timestamp, format_usd};

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

/// Finds block-volume snapshots owned by the scanned account whose start
/// time predates the window start. Same comparison base as the database
/// snapshot probe.
pub struct StaleVolumeSnapshotProbe {
    compute: Arc<dyn ComputeApi>,
    rates: RateTable,
    owner_account: String,
}

impl StaleVolumeSnapshotProbe {
    pub fn new(compute: Arc<dyn ComputeApi>, rates: RateTable, owner_account: String) -> Self {
        Self { compute, rates, owner_account }
    }
}

#[async_trait]
impl RegionalProbe for StaleVolumeSnapshotProbe {
    fn name(&self) -> &'static str {
        "stale-volume-snapshots"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::BlockSnapshot
    }

    async fn scan(
        &self,
        region: &str,
        window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let snapshots = self.compute.describe_snapshots(region, &self.owner_account).await?;

        let findings = snapshots
            .into_iter()
            .filter(|snapshot| snapshot.start_time < window.start)
            .map(|snapshot| {
                let savings =
                    self.rates.block_snapshot_per_gb_month * snapshot.volume_size_gb as f64;
                let console_url = format!(
                    "https://console.aws.amazon.com/ec2/v2/home?region={}#snapshots:snapshotId={}",
                    region, snapshot.snapshot_id
                );
                let finding = StaleVolumeSnapshot {
                    snapshot_id: snapshot.snapshot_id,
                    start_time: format_timestamp(snapshot.start_time),
                    volume_size: snapshot.volume_size_gb,
                    tags: snapshot.tags,
                    region: region.to_string(),
                    potential_cost_savings: format_usd(savings),
                    recommendations: cleanup_recommendation(&console_url),
                };
                ProbeFinding { finding: RegionalFinding::StaleVolumeSnapshot(finding), savings }
            })
            .collect::<Vec<_>>();

        info!(region, count = findings.len(), "Stale volume snapshots probed");
        Ok(findings)
    }
}
