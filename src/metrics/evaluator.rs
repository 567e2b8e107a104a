use std::sync::Arc;

use tracing::debug;

use crate::errors::SweepError;
use crate::provider::{Datapoint, Dimension, MetricQuery, MetricsApi};

use super::window::ScanWindow;

/// Decides idle vs active from time-windowed utilization statistics.
///
/// A resource is idle iff every datapoint returned for the window averages
/// exactly zero. An empty window therefore also reads as idle (vacuous
/// truth) — a long-standing quirk kept for report compatibility; see the
/// evaluator tests. Backend errors propagate to the calling probe, which
/// applies the skip-or-abort policy.
#[derive(Clone)]
pub struct MetricWindowEvaluator {
    metrics: Arc<dyn MetricsApi>,
}

impl MetricWindowEvaluator {
    pub fn new(metrics: Arc<dyn MetricsApi>) -> Self {
        Self { metrics }
    }

    pub async fn is_idle(
        &self,
        region: &str,
        namespace: &str,
        metric_name: &str,
        dimensions: Vec<Dimension>,
        window: &ScanWindow,
    ) -> Result<bool, SweepError> {
        let query = MetricQuery {
            namespace: namespace.to_string(),
            metric_name: metric_name.to_string(),
            dimensions,
            start: window.start,
            end: window.end,
            period_seconds: window.period_seconds(),
            statistic: "Average".to_string(),
        };
        let datapoints = self.metrics.metric_statistics(region, &query).await?;
        let idle = all_zero(&datapoints);
        debug!(
            region,
            metric = metric_name,
            datapoints = datapoints.len(),
            idle,
            "Metric window evaluated"
        );
        Ok(idle)
    }
}

fn all_zero(datapoints: &[Datapoint]) -> bool {
    datapoints.iter().all(|d| d.average == 0.0)
}
