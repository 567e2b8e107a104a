#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use cloudsweep::errors::SweepError;
use cloudsweep::models::Tag;
use cloudsweep::provider::{
    AccountApi, AccountIdentity, AddressSummary, BucketSummary, ComputeApi, Datapoint,
    DatabaseApi, DbInstanceSummary, DbSnapshotSummary, IdentityApi, InstanceSummary,
    LoginProfile, MetricQuery, MetricsApi, ObjectStorageApi, UserSummary,
    VolumeSnapshotSummary, VolumeSummary,
};
use cloudsweep::scan::CloudServices;

/// In-memory cloud account backing every provider trait. Each test builds
/// the account state it needs and hands the same fixture to all services.
#[derive(Default)]
pub struct StaticCloud {
    pub account_id: String,
    pub regions: Vec<String>,
    pub fail_region_discovery: bool,
    pub instances: HashMap<String, Vec<InstanceSummary>>,
    pub volumes: HashMap<String, Vec<VolumeSummary>>,
    pub volume_snapshots: HashMap<String, Vec<VolumeSnapshotSummary>>,
    pub addresses: HashMap<String, Vec<AddressSummary>>,
    pub db_instances: HashMap<String, Vec<DbInstanceSummary>>,
    pub db_snapshots: HashMap<String, Vec<DbSnapshotSummary>>,
    pub users: Vec<UserSummary>,
    pub login_profiles: HashMap<String, LoginProfile>,
    pub buckets: Vec<BucketSummary>,
    pub bucket_tags: HashMap<String, Vec<Tag>>,
    pub empty_buckets: HashSet<String>,
    /// Datapoints keyed by (metric name, first dimension value).
    pub datapoints: HashMap<(String, String), Vec<Datapoint>>,
    /// Metrics that fail lookup with NotFound, keyed by first dimension value.
    pub missing_metrics: HashSet<String>,
    pub published: Mutex<Vec<(String, String, String)>>,
}

impl StaticCloud {
    pub fn new(account_id: &str, regions: &[&str]) -> Self {
        Self {
            account_id: account_id.to_string(),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }
}

pub fn services(cloud: Arc<StaticCloud>) -> CloudServices {
    CloudServices {
        account: cloud.clone(),
        compute: cloud.clone(),
        database: cloud.clone(),
        metrics: cloud.clone(),
        identity: cloud.clone(),
        storage: cloud,
    }
}

/// A stable wall-clock anchor so age math is deterministic in tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    fixed_now() - Duration::days(days)
}

pub fn tag(key: &str, value: &str) -> Tag {
    Tag { key: key.to_string(), value: value.to_string() }
}

pub fn stopped_instance(id: &str, instance_type: &str, launch_time: DateTime<Utc>) -> InstanceSummary {
    InstanceSummary {
        instance_id: id.to_string(),
        instance_type: instance_type.to_string(),
        launch_time,
        tags: vec![],
    }
}

pub fn user(user_id: &str, user_name: &str) -> UserSummary {
    UserSummary { user_id: user_id.to_string(), user_name: user_name.to_string(), tags: vec![] }
}

pub fn bucket(name: &str, creation_date: DateTime<Utc>) -> BucketSummary {
    BucketSummary { name: name.to_string(), creation_date }
}

#[async_trait]
impl AccountApi for StaticCloud {
    async fn caller_identity(&self) -> Result<AccountIdentity, SweepError> {
        Ok(AccountIdentity { account_id: self.account_id.clone() })
    }

    async fn describe_regions(&self) -> Result<Vec<String>, SweepError> {
        if self.fail_region_discovery {
            return Err(SweepError::Network("region discovery unreachable".into()));
        }
        Ok(self.regions.clone())
    }
}

#[async_trait]
impl ComputeApi for StaticCloud {
    async fn describe_instances(
        &self,
        region: &str,
        _state: &str,
    ) -> Result<Vec<InstanceSummary>, SweepError> {
        Ok(self.instances.get(region).cloned().unwrap_or_default())
    }

    async fn describe_volumes(
        &self,
        region: &str,
        _status: &str,
    ) -> Result<Vec<VolumeSummary>, SweepError> {
        Ok(self.volumes.get(region).cloned().unwrap_or_default())
    }

    async fn describe_snapshots(
        &self,
        region: &str,
        _owner_account: &str,
    ) -> Result<Vec<VolumeSnapshotSummary>, SweepError> {
        Ok(self.volume_snapshots.get(region).cloned().unwrap_or_default())
    }

    async fn describe_addresses(&self, region: &str) -> Result<Vec<AddressSummary>, SweepError> {
        Ok(self.addresses.get(region).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl DatabaseApi for StaticCloud {
    async fn describe_db_instances(
        &self,
        region: &str,
    ) -> Result<Vec<DbInstanceSummary>, SweepError> {
        Ok(self.db_instances.get(region).cloned().unwrap_or_default())
    }

    async fn describe_db_snapshots(
        &self,
        region: &str,
    ) -> Result<Vec<DbSnapshotSummary>, SweepError> {
        Ok(self.db_snapshots.get(region).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl MetricsApi for StaticCloud {
    async fn metric_statistics(
        &self,
        _region: &str,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, SweepError> {
        let dimension_value =
            query.dimensions.first().map(|d| d.value.clone()).unwrap_or_default();
        if self.missing_metrics.contains(&dimension_value) {
            return Err(SweepError::NotFound(format!(
                "no such metric: {}/{}",
                query.metric_name, dimension_value
            )));
        }
        Ok(self
            .datapoints
            .get(&(query.metric_name.clone(), dimension_value))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl IdentityApi for StaticCloud {
    async fn list_users(&self) -> Result<Vec<UserSummary>, SweepError> {
        Ok(self.users.clone())
    }

    async fn login_profile(&self, user_name: &str) -> Result<LoginProfile, SweepError> {
        self.login_profiles
            .get(user_name)
            .cloned()
            .ok_or_else(|| SweepError::NotFound(format!("no login profile: {}", user_name)))
    }
}

#[async_trait]
impl ObjectStorageApi for StaticCloud {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SweepError> {
        Ok(self.buckets.clone())
    }

    async fn bucket_tags(&self, bucket: &str) -> Result<Vec<Tag>, SweepError> {
        self.bucket_tags
            .get(bucket)
            .cloned()
            .ok_or_else(|| SweepError::NotFound(format!("no tag set: {}", bucket)))
    }

    async fn is_bucket_empty(&self, bucket: &str) -> Result<bool, SweepError> {
        Ok(self.empty_buckets.contains(bucket))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &str,
        _content_type: &str,
    ) -> Result<(), SweepError> {
        self.published.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}
