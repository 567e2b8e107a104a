use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::errors::SweepError;
use crate::models::ScanReport;

use super::publisher::ReportPublisher;

pub const DEFAULT_REPORT_BUCKET: &str = "unused-resources-output";
pub const DEFAULT_REPORT_KEY: &str = "output.json";

#[derive(Debug, Clone)]
pub struct OutputDestination {
    pub bucket: String,
    pub key: String,
    /// Optional local copy for operator inspection.
    pub local_path: Option<PathBuf>,
}

impl Default for OutputDestination {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_REPORT_BUCKET.to_string(),
            key: DEFAULT_REPORT_KEY.to_string(),
            local_path: None,
        }
    }
}

/// Serializes the finished report and hands it to the publishing
/// collaborator, replacing whatever report was there before.
pub struct ReportAssembler {
    publisher: Arc<dyn ReportPublisher>,
    destination: OutputDestination,
}

impl ReportAssembler {
    pub fn new(publisher: Arc<dyn ReportPublisher>, destination: OutputDestination) -> Self {
        Self { publisher, destination }
    }

    /// Pretty-printed JSON, the exact bytes that get published.
    pub fn render(report: &ScanReport) -> Result<String, SweepError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub async fn publish(&self, report: &ScanReport) -> Result<(), SweepError> {
        let body = Self::render(report)?;

        if let Some(path) = &self.destination.local_path {
            tokio::fs::write(path, &body).await?;
            info!(path = %path.display(), "Report written locally");
        }

        self.publisher
            .publish(&self.destination.bucket, &self.destination.key, &body)
            .await?;
        info!(
            bucket = %self.destination.bucket,
            key = %self.destination.key,
            bytes = body.len(),
            "Report published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlobalBucket;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryPublisher {
        published: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl ReportPublisher for MemoryPublisher {
        async fn publish(&self, bucket: &str, key: &str, body: &str) -> Result<(), SweepError> {
            self.published.lock().unwrap().push((
                bucket.to_string(),
                key.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    fn report() -> ScanReport {
        ScanReport {
            project_name: "Cloud Efficiency Explorer".into(),
            account_id: "123456789012".into(),
            global: GlobalBucket::default(),
            regions: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_publish_uses_configured_destination() {
        let publisher = Arc::new(MemoryPublisher::default());
        let assembler = ReportAssembler::new(publisher.clone(), OutputDestination::default());
        assembler.publish(&report()).await.unwrap();

        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (bucket, key, body) = &published[0];
        assert_eq!(bucket, "unused-resources-output");
        assert_eq!(key, "output.json");
        let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["project_name"], "Cloud Efficiency Explorer");
    }

    #[tokio::test]
    async fn test_publish_writes_local_copy() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let destination = OutputDestination {
            local_path: Some(path.clone()),
            ..Default::default()
        };
        let assembler = ReportAssembler::new(Arc::new(MemoryPublisher::default()), destination);
        assembler.publish(&report()).await.unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["account_id"], "123456789012");
    }

    #[test]
    fn test_render_is_pretty_printed() {
        let body = ReportAssembler::render(&report()).unwrap();
        assert!(body.contains("\n"));
        assert!(body.starts_with('{'));
    }
}
