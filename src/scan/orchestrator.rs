use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::info;

use crate::cost::{CostTotals, RateTable};
use crate::errors::{with_retry, RetryConfig, SweepError};
use crate::metrics::{MetricWindowEvaluator, ScanWindow};
use crate::models::{GlobalBucket, RegionBucket, ScanReport};
use crate::probes::{
    BucketProbe, IdentityProbe, IdleDbInstanceProbe, RegionalProbe, StaleDbSnapshotProbe,
    StaleVolumeSnapshotProbe, StoppedInstanceProbe, UnattachedVolumeProbe, UnusedAddressProbe,
};
use crate::provider::{
    AccountApi, ComputeApi, DatabaseApi, IdentityApi, MetricsApi, ObjectStorageApi,
    RestCloudClient,
};

/// The cloud service handles one scan runs against. Bundled so tests can
/// swap in fixtures per service.
#[derive(Clone)]
pub struct CloudServices {
    pub account: Arc<dyn AccountApi>,
    pub compute: Arc<dyn ComputeApi>,
    pub database: Arc<dyn DatabaseApi>,
    pub metrics: Arc<dyn MetricsApi>,
    pub identity: Arc<dyn IdentityApi>,
    pub storage: Arc<dyn ObjectStorageApi>,
}

impl CloudServices {
    /// Every service backed by the same REST gateway client.
    pub fn from_client(client: Arc<RestCloudClient>) -> Self {
        Self {
            account: client.clone(),
            compute: client.clone(),
            database: client.clone(),
            metrics: client.clone(),
            identity: client.clone(),
            storage: client,
        }
    }
}

/// Resolved parameters for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub scan_id: String,
    pub project_name: String,
    /// When set, replaces provider region discovery.
    pub regions: Option<Vec<String>>,
    pub max_concurrent_regions: usize,
    pub lookback_hours: i64,
    pub retry: RetryConfig,
    pub rates: RateTable,
}

impl ScanPlan {
    pub fn new(project_name: &str) -> Self {
        Self {
            scan_id: uuid::Uuid::new_v4().to_string(),
            project_name: project_name.to_string(),
            regions: None,
            max_concurrent_regions: 4,
            lookback_hours: 24,
            retry: RetryConfig::default(),
            rates: RateTable::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub scan_id: String,
    pub account_id: String,
    pub regions_scanned: usize,
    pub findings: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: ScanReport,
    pub summary: ScanSummary,
}

/// Drives one full scan: account resolution, region discovery, the global
/// probes, the concurrent per-region probe fan-out, and the cost reduction.
///
/// Regions run concurrently behind a bounded buffer; each region task
/// returns its own bucket and partial totals, and a single reducer folds
/// them afterwards. No shared mutable state crosses tasks. Scans hold no
/// state between invocations — each run is a pure function of current
/// cloud state plus the rate table.
pub struct ScanOrchestrator {
    services: CloudServices,
    plan: ScanPlan,
}

impl ScanOrchestrator {
    pub fn new(services: CloudServices, plan: ScanPlan) -> Self {
        Self { services, plan }
    }

    pub async fn run(&self) -> Result<ScanOutcome, SweepError> {
        let started = std::time::Instant::now();
        info!(scan_id = %self.plan.scan_id, project = %self.plan.project_name, "Scan started");

        // Account and region discovery failures abort the whole scan; no
        // partial report is ever published.
        let identity = with_retry("caller-identity", &self.plan.retry, || {
            self.services.account.caller_identity()
        })
        .await?;
        let account_id = identity.account_id;
        info!(account_id = %account_id, "Resolved account");

        let regions = match &self.plan.regions {
            Some(regions) => regions.clone(),
            None => {
                with_retry("describe-regions", &self.plan.retry, || {
                    self.services.account.describe_regions()
                })
                .await?
            }
        };
        info!(count = regions.len(), "Regions to check");

        let window = ScanWindow::lookback(Utc::now(), self.plan.lookback_hours);
        let evaluator = MetricWindowEvaluator::new(self.services.metrics.clone());

        info!("Probing account-global scope");
        let iam_users = IdentityProbe::new(self.services.identity.clone())
            .scan(window.end)
            .await?;
        let s3_buckets = BucketProbe::new(self.services.storage.clone(), evaluator.clone())
            .scan(&window)
            .await?;

        let probes: Arc<Vec<Box<dyn RegionalProbe>>> =
            Arc::new(self.build_probes(&account_id, &evaluator));

        let region_results = stream::iter(regions.into_iter().map(|region| {
            let probes = probes.clone();
            let retry = self.plan.retry.clone();
            async move {
                scan_region(&region, &probes, &window, &retry)
                    .await
                    .map(|(bucket, totals)| (region, bucket, totals))
            }
        }))
        .buffer_unordered(self.plan.max_concurrent_regions)
        .collect::<Vec<_>>()
        .await;

        // The reducer: the only place totals are summed.
        let mut totals = CostTotals::new();
        let mut region_buckets = BTreeMap::new();
        for result in region_results {
            let (region, bucket, partial) = result?;
            totals.merge(&partial);
            region_buckets.insert(region, bucket);
        }

        let report = ScanReport {
            project_name: self.plan.project_name.clone(),
            account_id: account_id.clone(),
            global: GlobalBucket {
                iam_users,
                s3_buckets,
                cumulative_cost_optimization: totals.formatted(),
            },
            regions: region_buckets,
        };

        let summary = ScanSummary {
            scan_id: self.plan.scan_id.clone(),
            account_id,
            regions_scanned: report.regions.len(),
            findings: report.finding_count(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            scan_id = %summary.scan_id,
            regions = summary.regions_scanned,
            findings = summary.findings,
            duration_ms = summary.duration_ms,
            "Scan completed"
        );

        Ok(ScanOutcome { report, summary })
    }

    fn build_probes(
        &self,
        account_id: &str,
        evaluator: &MetricWindowEvaluator,
    ) -> Vec<Box<dyn RegionalProbe>> {
        vec![
            Box::new(StoppedInstanceProbe::new(self.services.compute.clone(), self.plan.rates)),
            Box::new(IdleDbInstanceProbe::new(
                self.services.database.clone(),
                evaluator.clone(),
                self.plan.rates,
            )),
            Box::new(UnattachedVolumeProbe::new(self.services.compute.clone(), self.plan.rates)),
            Box::new(StaleDbSnapshotProbe::new(self.services.database.clone(), self.plan.rates)),
            Box::new(StaleVolumeSnapshotProbe::new(
                self.services.compute.clone(),
                self.plan.rates,
                account_id.to_string(),
            )),
            Box::new(UnusedAddressProbe::new(self.services.compute.clone(), self.plan.rates)),
        ]
    }
}

/// Run all regional probes against one region. Probes execute sequentially
/// within a region (regions themselves run concurrently); a probe failure
/// that survives retry aborts the scan.
async fn scan_region(
    region: &str,
    probes: &[Box<dyn RegionalProbe>],
    window: &ScanWindow,
    retry: &RetryConfig,
) -> Result<(RegionBucket, CostTotals), SweepError> {
    info!(region, "Checking region");
    let mut bucket = RegionBucket::default();
    let mut totals = CostTotals::new();

    for probe in probes {
        let operation = format!("{}:{}", probe.name(), region);
        let findings = with_retry(&operation, retry, || probe.scan(region, window)).await?;
        for probe_finding in findings {
            totals.add(probe_finding.finding.kind(), probe_finding.savings);
            probe_finding.finding.add_to(&mut bucket);
        }
    }

    Ok((bucket, totals))
}
