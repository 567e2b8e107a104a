use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SweepConfig {
    pub project: Option<ProjectConfig>,
    pub provider: Option<ProviderConfig>,
    pub scan: Option<ScanSettings>,
    pub rates: Option<RateOverrides>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProjectConfig {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// Base URL of the cloud REST gateway.
    pub endpoint: Option<String>,
    /// Bearer token; supports `$ENV_VAR` indirection.
    pub api_token: Option<String>,
    /// Per-call deadline for provider requests.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanSettings {
    /// When set, replaces provider region discovery.
    pub regions: Option<Vec<String>>,
    pub max_concurrent_regions: Option<usize>,
    pub max_retries: Option<u32>,
    pub lookback_hours: Option<i64>,
}

/// Overrides for the fixed rate table. Anything left unset keeps the
/// built-in us-east-1 anchored default.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RateOverrides {
    pub compute_hourly: Option<f64>,
    pub block_per_gb_month: Option<f64>,
    pub db_hourly: Option<f64>,
    pub db_snapshot_per_gb_month: Option<f64>,
    pub block_snapshot_per_gb_month: Option<f64>,
    pub address_hourly: Option<f64>,
}

impl RateOverrides {
    pub fn apply(&self, mut rates: crate::cost::RateTable) -> crate::cost::RateTable {
        if let Some(v) = self.compute_hourly {
            rates.compute_hourly = v;
        }
        if let Some(v) = self.block_per_gb_month {
            rates.block_per_gb_month = v;
        }
        if let Some(v) = self.db_hourly {
            rates.db_hourly = v;
        }
        if let Some(v) = self.db_snapshot_per_gb_month {
            rates.db_snapshot_per_gb_month = v;
        }
        if let Some(v) = self.block_snapshot_per_gb_month {
            rates.block_snapshot_per_gb_month = v;
        }
        if let Some(v) = self.address_hourly {
            rates.address_hourly = v;
        }
        rates
    }

    pub fn values(&self) -> [Option<f64>; 6] {
        [
            self.compute_hourly,
            self.block_per_gb_month,
            self.db_hourly,
            self.db_snapshot_per_gb_month,
            self.block_snapshot_per_gb_month,
            self.address_hourly,
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub local_path: Option<String>,
}
