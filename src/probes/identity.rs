use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::errors::SweepError;
use crate::models::DormantUser;
use crate::provider::IdentityApi;
use crate::reporting::formatter::format_timestamp;

/// An identity counts as recently active only if its login profile was
/// created within this many days.
const DORMANT_AFTER_DAYS: i64 = 2;

pub const NEVER_LOGGED_IN: &str = "Never logged in";

/// Account-global probe for dormant identities.
///
/// An identity with no login profile is ALWAYS included, marked
/// "Never logged in", regardless of how recently it was created; one with a
/// profile is included only when the profile is older than the dormancy
/// cutoff. The asymmetry is part of the report contract.
pub struct IdentityProbe {
    identity: Arc<dyn IdentityApi>,
}

impl IdentityProbe {
    pub fn new(identity: Arc<dyn IdentityApi>) -> Self {
        Self { identity }
    }

    pub async fn scan(&self, now: DateTime<Utc>) -> Result<Vec<DormantUser>, SweepError> {
        let users = self.identity.list_users().await?;
        let cutoff = now - Duration::days(DORMANT_AFTER_DAYS);
        let mut findings = Vec::new();

        for user in users {
            match self.identity.login_profile(&user.user_name).await {
                Ok(profile) => {
                    if profile.create_date < cutoff {
                        findings.push(DormantUser {
                            user_id: user.user_id,
                            user_name: user.user_name,
                            tags: user.tags,
                            last_login: format_timestamp(profile.create_date),
                        });
                    }
                }
                Err(SweepError::NotFound(_)) => {
                    findings.push(DormantUser {
                        user_id: user.user_id,
                        user_name: user.user_name,
                        tags: user.tags,
                        last_login: NEVER_LOGGED_IN.to_string(),
                    });
                }
                Err(e) if e.skips_resource() => {
                    warn!(user = %user.user_name, error = %e, "Skipping identity, profile lookup failed");
                }
                Err(e) => return Err(e),
            }
        }

        info!(count = findings.len(), "Dormant identities probed");
        Ok(findings)
    }
}
