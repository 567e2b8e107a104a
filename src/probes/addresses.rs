use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::ScanWindow;
use crate::models::UnusedAddress;
use crate::provider::ComputeApi;
use crate::reporting::formatter::format_usd;

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

/// Finds allocated static addresses with no association, i.e. billing
/// without backing anything.
pub struct UnusedAddressProbe {
    compute: Arc<dyn ComputeApi>,
    rates: RateTable,
}

impl UnusedAddressProbe {
    pub fn new(compute: Arc<dyn ComputeApi>, rates: RateTable) -> Self {
        Self { compute, rates }
    }
}

#[async_trait]
impl RegionalProbe for UnusedAddressProbe {
    fn name(&self) -> &'static str {
        "unused-addresses"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::ElasticAddress
    }

    async fn scan(
        &self,
        region: &str,
        _window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let addresses = self.compute.describe_addresses(region).await?;
        let savings = RateTable::monthly_from_hourly(self.rates.address_hourly);

        let findings = addresses
            .into_iter()
            .filter(|address| address.association_id.is_none())
            .map(|address| {
                let console_url = format!(
                    "https://console.aws.amazon.com/ec2/v2/home?region={}#Addresses:allocationId={}",
                    region, address.allocation_id
                );
                let finding = UnusedAddress {
                    allocation_id: address.allocation_id,
                    public_ip: address.public_ip,
                    tags: address.tags,
                    region: region.to_string(),
                    potential_cost_savings: format_usd(savings),
                    recommendations: cleanup_recommendation(&console_url),
                };
                ProbeFinding { finding: RegionalFinding::UnusedAddress(finding), savings }
            })
            .collect::<Vec<_>>();

        info!(region, count = findings.len(), "Unused addresses probed");
        Ok(findings)
    }
}
