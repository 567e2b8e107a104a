use async_trait::async_trait;

use crate::errors::SweepError;

use super::types::{
    AccountIdentity, AddressSummary, BucketSummary, Datapoint, DbInstanceSummary,
    DbSnapshotSummary, InstanceSummary, LoginProfile, MetricQuery, UserSummary,
    VolumeSnapshotSummary, VolumeSummary,
};
use crate::models::Tag;

/// Scope marker for account-global API calls that still need a metrics or
/// console locator scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Account identity and region discovery. A failure here aborts the scan.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn caller_identity(&self) -> Result<AccountIdentity, SweepError>;
    async fn describe_regions(&self) -> Result<Vec<String>, SweepError>;
}

/// Region-scoped compute discovery: instances, volumes, snapshots, addresses.
/// All calls are read-only and paginated behind the implementation.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Instances filtered to a single lifecycle state (e.g. "stopped").
    async fn describe_instances(
        &self,
        region: &str,
        state: &str,
    ) -> Result<Vec<InstanceSummary>, SweepError>;

    /// Volumes filtered to a status (e.g. "available" for unattached).
    async fn describe_volumes(
        &self,
        region: &str,
        status: &str,
    ) -> Result<Vec<VolumeSummary>, SweepError>;

    /// Snapshots owned by the given account.
    async fn describe_snapshots(
        &self,
        region: &str,
        owner_account: &str,
    ) -> Result<Vec<VolumeSnapshotSummary>, SweepError>;

    async fn describe_addresses(&self, region: &str) -> Result<Vec<AddressSummary>, SweepError>;
}

/// Region-scoped managed-database discovery.
#[async_trait]
pub trait DatabaseApi: Send + Sync {
    async fn describe_db_instances(
        &self,
        region: &str,
    ) -> Result<Vec<DbInstanceSummary>, SweepError>;

    async fn describe_db_snapshots(
        &self,
        region: &str,
    ) -> Result<Vec<DbSnapshotSummary>, SweepError>;
}

/// Monitoring backend statistics. `region` may be GLOBAL_SCOPE for metrics
/// on account-global resources such as buckets.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    async fn metric_statistics(
        &self,
        region: &str,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, SweepError>;
}

/// Account-global identity discovery.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserSummary>, SweepError>;

    /// NotFound means the identity has never had a console login profile.
    async fn login_profile(&self, user_name: &str) -> Result<LoginProfile, SweepError>;
}

/// Account-global object storage: bucket discovery and report publishing.
#[async_trait]
pub trait ObjectStorageApi: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SweepError>;

    /// NotFound means the bucket has no tag set.
    async fn bucket_tags(&self, bucket: &str) -> Result<Vec<Tag>, SweepError>;

    async fn is_bucket_empty(&self, bucket: &str) -> Result<bool, SweepError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &str,
        content_type: &str,
    ) -> Result<(), SweepError>;
}
