use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::SweepError;
use crate::provider::ObjectStorageApi;

/// Where the serialized report ends up. The production implementation
/// overwrites the previous report in object storage; history, if anyone
/// wants it, belongs to the downstream ingestion tier.
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    async fn publish(&self, bucket: &str, key: &str, body: &str) -> Result<(), SweepError>;
}

pub struct ObjectStorePublisher {
    storage: Arc<dyn ObjectStorageApi>,
}

impl ObjectStorePublisher {
    pub fn new(storage: Arc<dyn ObjectStorageApi>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ReportPublisher for ObjectStorePublisher {
    async fn publish(&self, bucket: &str, key: &str, body: &str) -> Result<(), SweepError> {
        self.storage.put_object(bucket, key, body, "application/json").await
    }
}
