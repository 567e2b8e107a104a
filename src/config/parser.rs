use std::path::Path;

use tracing::warn;

use crate::errors::SweepError;

use super::schema::CONFIG_SCHEMA;
use super::types::SweepConfig;

const DANGEROUS_PATTERNS: &[&str] = &["../", "..\\", "<script", "javascript:", "file:"];

pub async fn parse_config(path: &Path) -> Result<SweepConfig, SweepError> {
    if !path.exists() {
        return Err(SweepError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(SweepError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    validate_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: SweepConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Screen string values for path traversal and injection shapes before the
/// config reaches anything that builds URLs or paths from it.
fn validate_patterns(value: &serde_yaml::Value) -> Result<(), SweepError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), SweepError> {
    match value {
        serde_yaml::Value::String(s) => {
            let lower = s.to_lowercase();
            for pattern in DANGEROUS_PATTERNS {
                if lower.contains(pattern) {
                    let path_str =
                        if path.is_empty() { "root".to_string() } else { path.join(".") };
                    return Err(SweepError::Config(format!(
                        "Dangerous pattern '{}' found at config path: {}",
                        pattern, path_str
                    )));
                }
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), SweepError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| SweepError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| SweepError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| SweepError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> =
            errors.map(|e| format!("{} at {}", e, e.instance_path)).collect();
        if !messages.is_empty() {
            // Warn but don't fail — schema validation is advisory for now
            for msg in &messages {
                warn!(validation_error = %msg, "Config schema warning");
            }
        }
    }

    Ok(())
}

/// Semantic checks the schema can't express.
fn validate_semantics(config: &SweepConfig) -> Result<(), SweepError> {
    if let Some(scan) = &config.scan {
        if let Some(regions) = &scan.regions {
            if regions.is_empty() {
                return Err(SweepError::Config(
                    "scan.regions override must name at least one region".into(),
                ));
            }
        }
        if scan.max_concurrent_regions == Some(0) {
            return Err(SweepError::Config("scan.max_concurrent_regions must be at least 1".into()));
        }
        if scan.lookback_hours.is_some_and(|h| h < 1) {
            return Err(SweepError::Config("scan.lookback_hours must be at least 1".into()));
        }
    }

    if let Some(provider) = &config.provider {
        if provider.timeout_secs == Some(0) {
            return Err(SweepError::Config("provider.timeout_secs must be at least 1".into()));
        }
    }

    if let Some(rates) = &config.rates {
        if rates.values().iter().flatten().any(|rate| *rate < 0.0) {
            return Err(SweepError::Config("rate overrides must be non-negative".into()));
        }
    }

    Ok(())
}
