use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::cost::{RateTable, ResourceKind};
use crate::errors::SweepError;
use crate::metrics::{MetricWindowEvaluator, ScanWindow};
use crate::models::IdleDbInstance;
use crate::provider::{DatabaseApi, Dimension};
use crate::reporting::formatter::format_usd;

use super::{cleanup_recommendation, ProbeFinding, RegionalFinding, RegionalProbe};

/// Finds managed-database instances with zero connections across the
/// lookback window. The connection-count metric decides idleness; a failed
/// per-instance metric lookup excludes just that instance when the error is
/// a skip condition, and aborts the scan otherwise.
pub struct IdleDbInstanceProbe {
    database: Arc<dyn DatabaseApi>,
    evaluator: MetricWindowEvaluator,
    rates: RateTable,
}

impl IdleDbInstanceProbe {
    pub fn new(
        database: Arc<dyn DatabaseApi>,
        evaluator: MetricWindowEvaluator,
        rates: RateTable,
    ) -> Self {
        Self { database, evaluator, rates }
    }
}

fn backup_type(automated_backups: bool) -> &'static str {
    if automated_backups {
        "automated"
    } else {
        "manual"
    }
}

#[async_trait]
impl RegionalProbe for IdleDbInstanceProbe {
    fn name(&self) -> &'static str {
        "idle-db-instances"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::DbInstance
    }

    async fn scan(
        &self,
        region: &str,
        window: &ScanWindow,
    ) -> Result<Vec<ProbeFinding>, SweepError> {
        let instances = self.database.describe_db_instances(region).await?;
        let savings = RateTable::monthly_from_hourly(self.rates.db_hourly);
        let mut findings = Vec::new();

        for db in instances {
            let dimensions =
                vec![Dimension::new("DBInstanceIdentifier", &db.identifier)];
            let idle = match self
                .evaluator
                .is_idle(region, "AWS/RDS", "DatabaseConnections", dimensions, window)
                .await
            {
                Ok(idle) => idle,
                Err(e) if e.skips_resource() => {
                    warn!(region, db = %db.identifier, error = %e, "Skipping instance, metric lookup failed");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if !idle {
                continue;
            }

            let console_url = format!(
                "https://console.aws.amazon.com/rds/home?region={}#dbinstances:id={}",
                region, db.identifier
            );
            let finding = IdleDbInstance {
                db_instance_identifier: db.identifier.clone(),
                db_instance_class: db.class,
                backup_type: backup_type(db.automated_backups).to_string(),
                tags: db.tags,
                region: region.to_string(),
                potential_cost_savings: format_usd(savings),
                recommendations: cleanup_recommendation(&console_url),
            };
            findings.push(ProbeFinding {
                finding: RegionalFinding::IdleDbInstance(finding),
                savings,
            });
        }

        info!(region, count = findings.len(), "Idle database instances probed");
        Ok(findings)
    }
}
