use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::errors::SweepError;
use crate::models::Tag;

use super::api::{
    AccountApi, ComputeApi, DatabaseApi, IdentityApi, MetricsApi, ObjectStorageApi,
};
use super::types::{
    AccountIdentity, AddressSummary, BucketSummary, Datapoint, DbInstanceSummary,
    DbSnapshotSummary, InstanceSummary, LoginProfile, MetricQuery, RegionInfo, UserSummary,
    VolumeSnapshotSummary, VolumeSummary,
};

/// HTTP client for the cloud platform's REST gateway. One client serves
/// every service; calls are region-scoped through the URL path and
/// authenticated with a bearer token. The request timeout bounds each
/// individual provider call.
pub struct RestCloudClient {
    client: Client,
    base_url: String,
    api_token: String,
}

/// Paginated listing envelope. Implementations drain the cursor so probes
/// never see partial listings.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatisticsResponse {
    #[serde(default = "Vec::new")]
    datapoints: Vec<Datapoint>,
}

#[derive(Debug, Deserialize)]
struct TagSet {
    #[serde(default = "Vec::new")]
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct ObjectListing {
    object_count: u64,
}

impl RestCloudClient {
    pub fn new(endpoint: &str, api_token: &str, timeout: Duration) -> Result<Self, SweepError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SweepError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, SweepError> {
        debug!(path, "Cloud API request");
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;
        read_json(path, resp).await
    }

    /// Drain a paginated listing through its next_token cursor.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        base_query: &[(String, String)],
    ) -> Result<Vec<T>, SweepError> {
        let mut items = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut query = base_query.to_vec();
            if let Some(t) = &token {
                query.push(("page_token".to_string(), t.clone()));
            }
            let page: Page<T> = self.get_json(path, &query).await?;
            items.extend(page.items);
            match page.next_token {
                Some(t) if !t.is_empty() => token = Some(t),
                _ => break,
            }
        }
        Ok(items)
    }
}

fn transport_error(path: &str, e: reqwest::Error) -> SweepError {
    if e.is_timeout() {
        SweepError::Timeout(format!("Cloud API call timed out: {}", path))
    } else {
        SweepError::Network(format!("Cloud API request failed: {}: {}", path, e))
    }
}

/// Map an HTTP error status onto the scan error taxonomy. 404 carries the
/// expected-absence semantics (no such metric, no login profile, no tag set)
/// that probes turn into a per-resource skip or an empty data state.
fn status_error(status: StatusCode, path: &str) -> SweepError {
    match status.as_u16() {
        401 | 403 => SweepError::Authentication(format!("Cloud API rejected credentials: {}", path)),
        404 => SweepError::NotFound(path.to_string()),
        429 => SweepError::RateLimit(format!("Cloud API throttled: {}", path)),
        _ => SweepError::CloudApi(format!("{}: HTTP {}", path, status)),
    }
}

async fn read_json<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T, SweepError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(status_error(status, path));
    }
    resp.json::<T>()
        .await
        .map_err(|e| SweepError::CloudApi(format!("Malformed response from {}: {}", path, e)))
}

#[async_trait]
impl AccountApi for RestCloudClient {
    async fn caller_identity(&self) -> Result<AccountIdentity, SweepError> {
        self.get_json("/v1/account", &[]).await
    }

    async fn describe_regions(&self) -> Result<Vec<String>, SweepError> {
        let regions: Vec<RegionInfo> = self.get_paged("/v1/regions", &[]).await?;
        Ok(regions.into_iter().map(|r| r.name).collect())
    }
}

#[async_trait]
impl ComputeApi for RestCloudClient {
    async fn describe_instances(
        &self,
        region: &str,
        state: &str,
    ) -> Result<Vec<InstanceSummary>, SweepError> {
        let query = [("state".to_string(), state.to_string())];
        self.get_paged(&format!("/v1/{}/compute/instances", region), &query).await
    }

    async fn describe_volumes(
        &self,
        region: &str,
        status: &str,
    ) -> Result<Vec<VolumeSummary>, SweepError> {
        let query = [("status".to_string(), status.to_string())];
        self.get_paged(&format!("/v1/{}/compute/volumes", region), &query).await
    }

    async fn describe_snapshots(
        &self,
        region: &str,
        owner_account: &str,
    ) -> Result<Vec<VolumeSnapshotSummary>, SweepError> {
        let query = [("owner".to_string(), owner_account.to_string())];
        self.get_paged(&format!("/v1/{}/compute/snapshots", region), &query).await
    }

    async fn describe_addresses(&self, region: &str) -> Result<Vec<AddressSummary>, SweepError> {
        self.get_paged(&format!("/v1/{}/compute/addresses", region), &[]).await
    }
}

#[async_trait]
impl DatabaseApi for RestCloudClient {
    async fn describe_db_instances(
        &self,
        region: &str,
    ) -> Result<Vec<DbInstanceSummary>, SweepError> {
        self.get_paged(&format!("/v1/{}/database/instances", region), &[]).await
    }

    async fn describe_db_snapshots(
        &self,
        region: &str,
    ) -> Result<Vec<DbSnapshotSummary>, SweepError> {
        self.get_paged(&format!("/v1/{}/database/snapshots", region), &[]).await
    }
}

#[async_trait]
impl MetricsApi for RestCloudClient {
    async fn metric_statistics(
        &self,
        region: &str,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, SweepError> {
        let path = format!("/v1/{}/metrics/statistics", region);
        debug!(path = %path, metric = %query.metric_name, "Metric statistics request");
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .json(query)
            .send()
            .await
            .map_err(|e| transport_error(&path, e))?;
        let stats: StatisticsResponse = read_json(&path, resp).await?;
        Ok(stats.datapoints)
    }
}

#[async_trait]
impl IdentityApi for RestCloudClient {
    async fn list_users(&self) -> Result<Vec<UserSummary>, SweepError> {
        self.get_paged("/v1/identity/users", &[]).await
    }

    async fn login_profile(&self, user_name: &str) -> Result<LoginProfile, SweepError> {
        self.get_json(&format!("/v1/identity/users/{}/login-profile", user_name), &[]).await
    }
}

#[async_trait]
impl ObjectStorageApi for RestCloudClient {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, SweepError> {
        self.get_paged("/v1/storage/buckets", &[]).await
    }

    async fn bucket_tags(&self, bucket: &str) -> Result<Vec<Tag>, SweepError> {
        let tag_set: TagSet =
            self.get_json(&format!("/v1/storage/buckets/{}/tags", bucket), &[]).await?;
        Ok(tag_set.tags)
    }

    async fn is_bucket_empty(&self, bucket: &str) -> Result<bool, SweepError> {
        let query = [("max_keys".to_string(), "1".to_string())];
        let listing: ObjectListing = self
            .get_json(&format!("/v1/storage/buckets/{}/objects", bucket), &query)
            .await?;
        Ok(listing.object_count == 0)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &str,
        content_type: &str,
    ) -> Result<(), SweepError> {
        let path = format!("/v1/storage/buckets/{}/objects/{}", bucket, key);
        let resp = self
            .client
            .put(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| transport_error(&path, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status, &path));
        }
        Ok(())
    }
}
