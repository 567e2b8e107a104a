use crate::models::CumulativeCostOptimization;
use crate::reporting::formatter::format_usd;

use super::rates::ResourceKind;

/// Per-kind running savings totals for one scan.
///
/// Accumulation stays unrounded; rounding happens once, at formatting, so
/// per-finding rounding error never compounds into the totals. Totals only
/// grow within a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostTotals {
    ec2: f64,
    rds: f64,
    ebs: f64,
    rds_snapshots: f64,
    ebs_snapshots: f64,
    elastic_ips: f64,
}

impl CostTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ResourceKind, amount: f64) {
        debug_assert!(amount >= 0.0, "cost contributions never decrease a total");
        match kind {
            ResourceKind::ComputeInstance => self.ec2 += amount,
            ResourceKind::DbInstance => self.rds += amount,
            ResourceKind::BlockVolume => self.ebs += amount,
            ResourceKind::DbSnapshot => self.rds_snapshots += amount,
            ResourceKind::BlockSnapshot => self.ebs_snapshots += amount,
            ResourceKind::ElasticAddress => self.elastic_ips += amount,
        }
    }

    /// Fold another scan-partial total into this one. Used by the reducer
    /// that sums per-region contributions after the concurrent fan-out.
    pub fn merge(&mut self, other: &CostTotals) {
        self.ec2 += other.ec2;
        self.rds += other.rds;
        self.ebs += other.ebs;
        self.rds_snapshots += other.rds_snapshots;
        self.ebs_snapshots += other.ebs_snapshots;
        self.elastic_ips += other.elastic_ips;
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::ComputeInstance => self.ec2,
            ResourceKind::DbInstance => self.rds,
            ResourceKind::BlockVolume => self.ebs,
            ResourceKind::DbSnapshot => self.rds_snapshots,
            ResourceKind::BlockSnapshot => self.ebs_snapshots,
            ResourceKind::ElasticAddress => self.elastic_ips,
        }
    }

    /// Render the rollup for the published report, rounding each total to
    /// two decimals exactly once.
    pub fn formatted(&self) -> CumulativeCostOptimization {
        CumulativeCostOptimization {
            ec2: format_usd(self.ec2),
            rds: format_usd(self.rds),
            ebs: format_usd(self.ebs),
            rds_snapshots: format_usd(self.rds_snapshots),
            ebs_snapshots: format_usd(self.ebs_snapshots),
            elastic_ips: format_usd(self.elastic_ips),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_totals_format_as_zero_usd() {
        let totals = CostTotals::new();
        let formatted = totals.formatted();
        assert_eq!(formatted.ec2, "0.00 USD");
        assert_eq!(formatted.rds, "0.00 USD");
        assert_eq!(formatted.elastic_ips, "0.00 USD");
    }

    #[test]
    fn test_accumulation_is_unrounded() {
        // Three stopped t2.micro instances: 3 * 8.352 = 25.056 -> "25.06 USD".
        // Rounding each contribution first would give 3 * 8.35 = "25.05 USD".
        let mut totals = CostTotals::new();
        for _ in 0..3 {
            totals.add(ResourceKind::ComputeInstance, 0.0116 * 720.0);
        }
        assert_eq!(totals.formatted().ec2, "25.06 USD");
    }

    #[test]
    fn test_merge_sums_partials() {
        let mut a = CostTotals::new();
        a.add(ResourceKind::BlockVolume, 10.0);
        let mut b = CostTotals::new();
        b.add(ResourceKind::BlockVolume, 2.5);
        b.add(ResourceKind::ElasticAddress, 3.6);
        a.merge(&b);
        assert_eq!(a.get(ResourceKind::BlockVolume), 12.5);
        assert_eq!(a.get(ResourceKind::ElasticAddress), 3.6);
    }

    #[test]
    fn test_single_instance_example() {
        let mut totals = CostTotals::new();
        totals.add(ResourceKind::ComputeInstance, 0.0116 * 720.0);
        assert_eq!(totals.formatted().ec2, "8.35 USD");
    }
}
