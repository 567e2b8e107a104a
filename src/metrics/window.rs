use chrono::{DateTime, Duration, Utc};

/// The fixed lookback window for one scan. Derived fresh per invocation;
/// never persisted across scans. `end` doubles as the scan's notion of
/// "now" so every age computation within a scan agrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period: Duration,
}

impl ScanWindow {
    /// A window covering the `hours` before `now`, aggregated into a single
    /// bucket spanning the whole window.
    pub fn lookback(now: DateTime<Utc>, hours: i64) -> Self {
        let period = Duration::hours(hours);
        Self { start: now - period, end: now, period }
    }

    pub fn period_seconds(&self) -> i64 {
        self.period.num_seconds()
    }
}
