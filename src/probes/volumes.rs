use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::UnattachedVolume;
use crate::provider::ComputeApi;
use crate::reporting::formatter::format_usd;

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

const AVAILABLE_STATUS: &str = "available";

/// Finds block volumes in the "available" state, i.e. not attached to any
/// instance. Savings scale with provisioned size.
pub struct UnattachedVolumeProbe {
    compute: Arc<dyn ComputeApi>,
    rates: RateTable,
}

impl UnattachedVolumeProbe {
    pub fn new(compute: Arc<dyn ComputeApi>, rates: RateTable) -> Self {
        Self { compute, rates }
    }
}

#[async_trait]
impl RegionalProbe for UnattachedVolumeProbe {
    fn name(&self) -> &'static str {
        "unattached-volumes"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::BlockVolume
    }

    async fn scan(
        &self,
        region: &str,
        _window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let volumes = self.compute.describe_volumes(region, AVAILABLE_STATUS).await?;

        let findings = volumes
            .into_iter()
            .map(|volume| {
                let savings = self.rates.block_per_gb_month * volume.size_gb as f64;
                let console_url = format!(
                    "https://console.aws.amazon.com/ec2/v2/home?region={}#Volumes:volumeId={}",
                    region, volume.volume_id
                );
                let finding = UnattachedVolume {
                    volume_id: volume.volume_id,
                    size: volume.size_gb,
                    tags: volume.tags,
                    region: region.to_string(),
                    potential_cost_savings: format_usd(savings),
                    recommendations: cleanup_recommendation(&console_url),
                };
                ProbeFinding { finding: RegionalFinding::UnattachedVolume(finding), savings }
            })
            .collect::<Vec<_>>();

        info!(region, count = findings.len(), "Unattached volumes probed");
        Ok(findings)
    }
}
