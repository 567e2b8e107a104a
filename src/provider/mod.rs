pub mod api;
pub mod rest;
pub mod types;

pub use api::{
    AccountApi, ComputeApi, DatabaseApi, IdentityApi, MetricsApi, ObjectStorageApi, GLOBAL_SCOPE,
};
pub use rest::RestCloudClient;
pub use types::*;
