use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cli::commands::ScanArgs;
use crate::config::{self, resolve_credential, SweepConfig};
use crate::errors::{RetryConfig, SweepError};
use crate::reporting::{ObjectStorePublisher, OutputDestination, ReportAssembler};
use crate::provider::RestCloudClient;
use crate::scan::{CloudServices, ScanOrchestrator, ScanPlan};

const DEFAULT_PROJECT_NAME: &str = "Cloud Efficiency Explorer";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_TOKEN_ENV: &str = "CLOUDSWEEP_API_TOKEN";

pub async fn handle_scan(args: ScanArgs) -> Result<(), SweepError> {
    // Parse config file if provided
    let file_config = if let Some(config_path) = &args.config {
        Some(config::parse_config(&PathBuf::from(config_path)).await?)
    } else {
        None
    };

    let plan = build_scan_plan(&args, file_config.as_ref());
    let (endpoint, api_token, timeout) = resolve_provider(&args, file_config.as_ref())?;

    info!(scan_id = %plan.scan_id, endpoint = %endpoint, "Starting scan");

    let client = Arc::new(RestCloudClient::new(&endpoint, &api_token, timeout)?);
    let services = CloudServices::from_client(client);

    let orchestrator = ScanOrchestrator::new(services.clone(), plan);
    let outcome = orchestrator.run().await?;

    if args.dry_run {
        println!("{}", ReportAssembler::render(&outcome.report)?);
        info!(findings = outcome.summary.findings, "Dry run, report not published");
        return Ok(());
    }

    let destination = build_destination(&args, file_config.as_ref());
    let publisher = Arc::new(ObjectStorePublisher::new(services.storage.clone()));
    ReportAssembler::new(publisher, destination).publish(&outcome.report).await?;

    info!(
        findings = outcome.summary.findings,
        regions = outcome.summary.regions_scanned,
        duration_ms = outcome.summary.duration_ms,
        "Scan published"
    );
    Ok(())
}

fn build_scan_plan(args: &ScanArgs, file_config: Option<&SweepConfig>) -> ScanPlan {
    let scan_settings = file_config.and_then(|c| c.scan.as_ref());

    let project_name = args
        .project_name
        .clone()
        .or_else(|| file_config.and_then(|c| c.project.as_ref()?.name.clone()))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    let regions = args
        .regions
        .as_ref()
        .map(|list| list.split(',').map(|s| s.trim().to_string()).collect())
        .or_else(|| scan_settings.and_then(|s| s.regions.clone()));

    let rates = file_config
        .and_then(|c| c.rates.as_ref())
        .map(|overrides| overrides.apply(Default::default()))
        .unwrap_or_default();

    let mut plan = ScanPlan::new(&project_name);
    if let Some(scan_id) = &args.scan_id {
        plan.scan_id = scan_id.clone();
    }
    plan.regions = regions;
    plan.rates = rates;
    if let Some(n) = scan_settings.and_then(|s| s.max_concurrent_regions) {
        plan.max_concurrent_regions = n;
    }
    if let Some(hours) = scan_settings.and_then(|s| s.lookback_hours) {
        plan.lookback_hours = hours;
    }
    if let Some(retries) = scan_settings.and_then(|s| s.max_retries) {
        plan.retry = RetryConfig { max_retries: retries };
    }
    plan
}

fn resolve_provider(
    args: &ScanArgs,
    file_config: Option<&SweepConfig>,
) -> Result<(String, String, Duration), SweepError> {
    let provider = file_config.and_then(|c| c.provider.as_ref());

    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| provider.and_then(|p| p.endpoint.clone()))
        .ok_or_else(|| {
            SweepError::Config("Cloud endpoint required (--endpoint or provider.endpoint)".into())
        })?;

    let api_token = args
        .api_token
        .clone()
        .or_else(|| provider.and_then(|p| p.api_token.as_deref().map(resolve_credential)))
        .or_else(|| std::env::var(API_TOKEN_ENV).ok())
        .ok_or_else(|| {
            SweepError::Authentication(format!(
                "API token required (--api-token, provider.api_token or {})",
                API_TOKEN_ENV
            ))
        })?;

    let timeout_secs = provider.and_then(|p| p.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok((endpoint, api_token, Duration::from_secs(timeout_secs)))
}

fn build_destination(args: &ScanArgs, file_config: Option<&SweepConfig>) -> OutputDestination {
    let output = file_config.and_then(|c| c.output.as_ref());
    let mut destination = OutputDestination::default();
    if let Some(bucket) = output.and_then(|o| o.bucket.clone()) {
        destination.bucket = bucket;
    }
    if let Some(key) = output.and_then(|o| o.key.clone()) {
        destination.key = key;
    }
    destination.local_path = args
        .output
        .clone()
        .or_else(|| output.and_then(|o| o.local_path.clone()))
        .map(PathBuf::from);
    destination
}
