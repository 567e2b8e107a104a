use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "project": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" }
                }
            },
            "provider": {
                "type": "object",
                "properties": {
                    "endpoint": { "type": "string", "format": "uri" },
                    "api_token": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "scan": {
                "type": "object",
                "properties": {
                    "regions": { "type": "array", "items": { "type": "string" } },
                    "max_concurrent_regions": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0 },
                    "lookback_hours": { "type": "integer", "minimum": 1 }
                }
            },
            "rates": {
                "type": "object",
                "properties": {
                    "compute_hourly": { "type": "number", "minimum": 0 },
                    "block_per_gb_month": { "type": "number", "minimum": 0 },
                    "db_hourly": { "type": "number", "minimum": 0 },
                    "db_snapshot_per_gb_month": { "type": "number", "minimum": 0 },
                    "block_snapshot_per_gb_month": { "type": "number", "minimum": 0 },
                    "address_hourly": { "type": "number", "minimum": 0 }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "bucket": { "type": "string" },
                    "key": { "type": "string" },
                    "local_path": { "type": "string" }
                }
            }
        },
        "additionalProperties": false
    })
});
