use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::StaleDbSnapshot;
use crate::provider::DatabaseApi;
use crate::reporting::formatter::{format_timestamp, format_usd};

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

/// Finds database snapshots created strictly before the window start. The
/// comparison base is the lookback cutoff, not "now"; downstream consumers
/// depend on that distinction.
pub struct StaleDbSnapshotProbe {
    database: Arc<dyn DatabaseApi>,
    rates: RateTable,
}

impl StaleDbSnapshotProbe {
    pub fn new(database: Arc<dyn DatabaseApi>, rates: RateTable) -> Self {
        Self { database, rates }
    }
}

#[async_trait]
impl RegionalProbe for StaleDbSnapshotProbe {
    fn name(&self) -> &'static str {
        "stale-db-snapshots"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::DbSnapshot
    }

    async fn scan(
        &self,
        region: &str,
        window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let snapshots = self.database.describe_db_snapshots(region).await?;

        let findings = snapshots
            .into_iter()
            .filter(|snapshot| snapshot.create_time < window.start)
            .map(|snapshot| {
                let savings =
                    self.rates.db_snapshot_per_gb_month * snapshot.allocated_storage_gb as f64;
                let console_url = format!(
                    "https://console.aws.amazon.com/rds/home?region={}#dbsnapshots:id={}",
                    region, snapshot.identifier
                );
                let finding = StaleDbSnapshot {
                    db_snapshot_identifier: snapshot.identifier,
                    snapshot_create_time: format_timestamp(snapshot.create_time),
                    region: region.to_string(),
                    size: snapshot.allocated_storage_gb,
                    tags: snapshot.tags,
                    potential_cost_savings: format_usd(savings),
                    recommendations: cleanup_recommendation(&console_url),
                };
                ProbeFinding { finding: RegionalFinding::StaleDbSnapshot(finding), savings }
            })
            .collect::<Vec<_>>();

        info!(region, count = findings.len(), "Stale database snapshots probed");
        Ok(findings)
    }
}
