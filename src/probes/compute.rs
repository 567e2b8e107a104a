use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::StoppedInstance;
use crate::provider::ComputeApi;
use crate::reporting::formatter::{format_timestamp, format_usd};

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

const STOPPED_STATE: &str = "stopped";

/// Finds compute instances parked in the stopped lifecycle state. The state
/// itself is the idleness signal; no metric check. Savings assume the
/// instance would otherwise run a full flat month.
pub struct StoppedInstanceProbe {
    compute: Arc<dyn ComputeApi>,
    rates: RateTable,
}

impl StoppedInstanceProbe {
    pub fn new(compute: Arc<dyn ComputeApi>, rates: RateTable) -> Self {
        Self { compute, rates }
    }
}

#[async_trait]
impl RegionalProbe for StoppedInstanceProbe {
    fn name(&self) -> &'static str {
        "stopped-instances"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::ComputeInstance
    }

    async fn scan(
        &self,
        region: &str,
        window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let instances = self.compute.describe_instances(region, STOPPED_STATE).await?;
        let savings = RateTable::monthly_from_hourly(self.rates.compute_hourly);

        let findings = instances
            .into_iter()
            .map(|instance| {
                let console_url = format!(
                    "https://console.aws.amazon.com/ec2/v2/home?region={}#Instances:instanceId={}",
                    region, instance.instance_id
                );
                let finding = StoppedInstance {
                    instance_id: instance.instance_id,
                    instance_type: instance.instance_type,
                    launch_time: format_timestamp(instance.launch_time),
                    region: region.to_string(),
                    age: (window.end - instance.launch_time).num_days(),
                    tags: instance.tags,
                    status: STOPPED_STATE.to_string(),
                    potential_cost_savings: format_usd(savings),
                    recommendations: cleanup_recommendation(&console_url),
                };
                ProbeFinding { finding: RegionalFinding::StoppedInstance(finding), savings }
            })
            .collect::<Vec<_>>();

        info!(region, count = findings.len(), "Stopped instances probed");
        Ok(findings)
    }
}
