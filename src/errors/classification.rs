use super::types::SweepError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl SweepError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            SweepError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            SweepError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            SweepError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            SweepError::CloudApi(_) => ErrorClassification {
                error_type: "CloudApiError",
                retryable: true,
            },
            SweepError::Publish(_) => ErrorClassification {
                error_type: "PublishError",
                retryable: true,
            },
            SweepError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },

            // Non-retryable errors
            SweepError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            SweepError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            SweepError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            SweepError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            SweepError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            SweepError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }

    /// Whether a failure on a per-resource lookup (metric statistics, login
    /// profile) excludes just that resource from the report instead of
    /// aborting the scan. Everything else propagates to the orchestrator.
    pub fn skips_resource(&self) -> bool {
        matches!(self, SweepError::NotFound(_) | SweepError::Timeout(_))
    }
}
