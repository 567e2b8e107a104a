use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::SweepError;
use crate::metrics::{MetricWindowEvaluator, ScanWindow};
use crate::models::IdleBucket;
use crate::provider::{Dimension, ObjectStorageApi, GLOBAL_SCOPE};
use crate::reporting::formatter::format_timestamp;

pub const STATUS_EMPTY: &str = "Empty";
pub const STATUS_UNUSED: &str = "Unused";

/// Bucket activity metrics always use a one-day window, independent of the
/// scan's configured lookback.
const BUCKET_METRIC_LOOKBACK_HOURS: i64 = 24;

/// Account-global probe for empty and unused object-storage buckets.
///
/// A bucket with zero objects reports status "Empty". A non-empty bucket is
/// "Unused" only when BOTH the object-count and size metrics are idle over
/// the one-day window; any non-zero datapoint on either metric excludes the
/// bucket entirely. A missing tag set is a valid state (empty tag list).
pub struct BucketProbe {
    storage: Arc<dyn ObjectStorageApi>,
    evaluator: MetricWindowEvaluator,
}

impl BucketProbe {
    pub fn new(storage: Arc<dyn ObjectStorageApi>, evaluator: MetricWindowEvaluator) -> Self {
        Self { storage, evaluator }
    }

    pub async fn scan(&self, window: &ScanWindow) -> Result<Vec<IdleBucket>, SweepError> {
        let buckets = self.storage.list_buckets().await?;
        let metric_window = ScanWindow::lookback(window.end, BUCKET_METRIC_LOOKBACK_HOURS);
        let mut findings = Vec::new();

        for bucket in buckets {
            let tags = match self.storage.bucket_tags(&bucket.name).await {
                Ok(tags) => tags,
                Err(SweepError::NotFound(_)) => Vec::new(),
                Err(e) => return Err(e),
            };

            if self.storage.is_bucket_empty(&bucket.name).await? {
                findings.push(IdleBucket {
                    bucket_name: bucket.name,
                    creation_date: format_timestamp(bucket.creation_date),
                    tags,
                    status: STATUS_EMPTY.to_string(),
                });
                continue;
            }

            let unused = match self.is_unused(&bucket.name, &metric_window).await {
                Ok(unused) => unused,
                Err(e) if e.skips_resource() => {
                    warn!(bucket = %bucket.name, error = %e, "Skipping bucket, metric lookup failed");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if unused {
                findings.push(IdleBucket {
                    bucket_name: bucket.name,
                    creation_date: format_timestamp(bucket.creation_date),
                    tags,
                    status: STATUS_UNUSED.to_string(),
                });
            }
        }

        info!(count = findings.len(), "Idle buckets probed");
        Ok(findings)
    }

    /// Both the object-count and size metrics must be idle.
    async fn is_unused(&self, bucket: &str, window: &ScanWindow) -> Result<bool, SweepError> {
        let objects_idle = self
            .evaluator
            .is_idle(
                GLOBAL_SCOPE,
                "AWS/S3",
                "NumberOfObjects",
                vec![
                    Dimension::new("BucketName", bucket),
                    Dimension::new("StorageType", "AllStorageTypes"),
                ],
                window,
            )
            .await?;
        let size_idle = self
            .evaluator
            .is_idle(
                GLOBAL_SCOPE,
                "AWS/S3",
                "BucketSizeBytes",
                vec![
                    Dimension::new("BucketName", bucket),
                    Dimension::new("StorageType", "StandardStorage"),
                ],
                window,
            )
            .await?;
        Ok(objects_idle && size_idle)
    }
}
