mod common;

use std::sync::Arc;

use chrono::Duration;

use cloudsweep::cost::RateTable;
use cloudsweep::metrics::{MetricWindowEvaluator, ScanWindow};
use cloudsweep::probes::{
    BucketProbe, IdentityProbe, IdleDbInstanceProbe, RegionalProbe, StaleDbSnapshotProbe,
    StaleVolumeSnapshotProbe, StoppedInstanceProbe, UnattachedVolumeProbe, UnusedAddressProbe,
};
use cloudsweep::provider::{
    AddressSummary, Datapoint, DbInstanceSummary, DbSnapshotSummary, LoginProfile,
    VolumeSnapshotSummary, VolumeSummary,
};

use common::{bucket, days_ago, fixed_now, stopped_instance, tag, user, StaticCloud};

fn window() -> ScanWindow {
    ScanWindow::lookback(fixed_now(), 24)
}

fn evaluator(cloud: &Arc<StaticCloud>) -> MetricWindowEvaluator {
    MetricWindowEvaluator::new(cloud.clone())
}

#[tokio::test]
async fn test_empty_bucket_reports_empty_status() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.buckets.push(bucket("artifacts", days_ago(90)));
    cloud.empty_buckets.insert("artifacts".into());
    let cloud = Arc::new(cloud);

    let probe = BucketProbe::new(cloud.clone(), evaluator(&cloud));
    let findings = probe.scan(&window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].bucket_name, "artifacts");
    assert_eq!(findings[0].status, "Empty");
    // Missing tag set is a valid state, reported as an empty list.
    assert!(findings[0].tags.is_empty());
}

#[tokio::test]
async fn test_quiet_bucket_reports_unused_status() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.buckets.push(bucket("cold-archive", days_ago(400)));
    cloud.bucket_tags.insert("cold-archive".into(), vec![tag("team", "data")]);
    cloud.datapoints.insert(
        ("NumberOfObjects".into(), "cold-archive".into()),
        vec![Datapoint { average: 0.0 }],
    );
    cloud.datapoints.insert(
        ("BucketSizeBytes".into(), "cold-archive".into()),
        vec![Datapoint { average: 0.0 }],
    );
    let cloud = Arc::new(cloud);

    let probe = BucketProbe::new(cloud.clone(), evaluator(&cloud));
    let findings = probe.scan(&window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].status, "Unused");
    assert_eq!(findings[0].tags, vec![tag("team", "data")]);
}

#[tokio::test]
async fn test_active_bucket_is_excluded() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.buckets.push(bucket("hot-data", days_ago(30)));
    cloud.datapoints.insert(
        ("NumberOfObjects".into(), "hot-data".into()),
        vec![Datapoint { average: 1200.0 }],
    );
    cloud.datapoints.insert(
        ("BucketSizeBytes".into(), "hot-data".into()),
        vec![Datapoint { average: 0.0 }],
    );
    let cloud = Arc::new(cloud);

    let probe = BucketProbe::new(cloud.clone(), evaluator(&cloud));
    let findings = probe.scan(&window()).await.unwrap();
    assert!(findings.is_empty());
}

// A non-empty bucket with NO datapoints on either metric classifies as
// "Unused" because the all-zero check is vacuously true on an empty window.
// A busy bucket whose statistics have not landed yet would be misreported;
// this pins the current behavior rather than endorsing it.
#[tokio::test]
async fn test_bucket_with_no_datapoints_classifies_unused() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.buckets.push(bucket("no-metrics-yet", days_ago(1)));
    let cloud = Arc::new(cloud);

    let probe = BucketProbe::new(cloud.clone(), evaluator(&cloud));
    let findings = probe.scan(&window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].status, "Unused");
}

#[tokio::test]
async fn test_identity_without_profile_always_included() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.users.push(user("AIDA1", "svc-backup"));
    let cloud = Arc::new(cloud);

    let probe = IdentityProbe::new(cloud.clone());
    let findings = probe.scan(fixed_now()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].last_login, "Never logged in");
}

#[tokio::test]
async fn test_identity_with_old_profile_included_with_timestamp() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.users.push(user("AIDA2", "alex"));
    cloud.login_profiles.insert("alex".into(), LoginProfile { create_date: days_ago(10) });
    let cloud = Arc::new(cloud);

    let probe = IdentityProbe::new(cloud.clone());
    let findings = probe.scan(fixed_now()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].last_login, "2026-07-27 12:00:00");
}

#[tokio::test]
async fn test_identity_with_recent_profile_excluded() {
    let mut cloud = StaticCloud::new("123456789012", &[]);
    cloud.users.push(user("AIDA3", "sam"));
    cloud.login_profiles.insert("sam".into(), LoginProfile { create_date: days_ago(1) });
    // Exactly at the two-day cutoff counts as recent.
    cloud.users.push(user("AIDA4", "kit"));
    cloud.login_profiles.insert("kit".into(), LoginProfile { create_date: days_ago(2) });
    let cloud = Arc::new(cloud);

    let probe = IdentityProbe::new(cloud.clone());
    let findings = probe.scan(fixed_now()).await.unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_idle_db_instance_included_with_backup_type() {
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.db_instances.insert(
        "us-east-1".into(),
        vec![
            DbInstanceSummary {
                identifier: "orders-db".into(),
                class: "db.t2.micro".into(),
                automated_backups: true,
                tags: vec![],
            },
            DbInstanceSummary {
                identifier: "sessions-db".into(),
                class: "db.t2.micro".into(),
                automated_backups: false,
                tags: vec![],
            },
        ],
    );
    cloud.datapoints.insert(
        ("DatabaseConnections".into(), "orders-db".into()),
        vec![Datapoint { average: 0.0 }, Datapoint { average: 0.0 }],
    );
    cloud.datapoints.insert(
        ("DatabaseConnections".into(), "sessions-db".into()),
        vec![Datapoint { average: 4.0 }],
    );
    let cloud = Arc::new(cloud);

    let probe =
        IdleDbInstanceProbe::new(cloud.clone(), evaluator(&cloud), RateTable::default());
    let findings = probe.scan("us-east-1", &window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].savings, 0.038 * 720.0);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::IdleDbInstance(db) => {
            assert_eq!(db.db_instance_identifier, "orders-db");
            assert_eq!(db.backup_type, "automated");
            assert_eq!(db.potential_cost_savings, "27.36 USD");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[tokio::test]
async fn test_db_instance_metric_not_found_skips_instance() {
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.db_instances.insert(
        "us-east-1".into(),
        vec![DbInstanceSummary {
            identifier: "ghost-db".into(),
            class: "db.t2.micro".into(),
            automated_backups: false,
            tags: vec![],
        }],
    );
    cloud.missing_metrics.insert("ghost-db".into());
    let cloud = Arc::new(cloud);

    let probe =
        IdleDbInstanceProbe::new(cloud.clone(), evaluator(&cloud), RateTable::default());
    let findings = probe.scan("us-east-1", &window()).await.unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_db_snapshot_age_compares_against_window_start() {
    let w = window();
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.db_snapshots.insert(
        "us-east-1".into(),
        vec![
            DbSnapshotSummary {
                identifier: "at-cutoff".into(),
                create_time: w.start,
                allocated_storage_gb: 20,
                tags: vec![],
            },
            DbSnapshotSummary {
                identifier: "before-cutoff".into(),
                create_time: w.start - Duration::seconds(1),
                allocated_storage_gb: 20,
                tags: vec![],
            },
        ],
    );
    let cloud = Arc::new(cloud);

    let probe = StaleDbSnapshotProbe::new(cloud.clone(), RateTable::default());
    let findings = probe.scan("us-east-1", &w).await.unwrap();

    // Strictly older than the cutoff: the snapshot created exactly at the
    // window start stays out.
    assert_eq!(findings.len(), 1);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::StaleDbSnapshot(snap) => {
            assert_eq!(snap.db_snapshot_identifier, "before-cutoff");
            assert_eq!(snap.potential_cost_savings, "2.50 USD");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[tokio::test]
async fn test_volume_snapshot_age_filter_and_savings() {
    let w = window();
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.volume_snapshots.insert(
        "us-east-1".into(),
        vec![
            VolumeSnapshotSummary {
                snapshot_id: "snap-old".into(),
                start_time: days_ago(30),
                volume_size_gb: 30,
                tags: vec![],
            },
            VolumeSnapshotSummary {
                snapshot_id: "snap-new".into(),
                start_time: w.end,
                volume_size_gb: 30,
                tags: vec![],
            },
        ],
    );
    let cloud = Arc::new(cloud);

    let probe = StaleVolumeSnapshotProbe::new(
        cloud.clone(),
        RateTable::default(),
        "123456789012".into(),
    );
    let findings = probe.scan("us-east-1", &w).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].savings, 0.10 * 30.0);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::StaleVolumeSnapshot(snap) => {
            assert_eq!(snap.snapshot_id, "snap-old");
            assert_eq!(snap.potential_cost_savings, "3.00 USD");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[tokio::test]
async fn test_only_unassociated_addresses_reported() {
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.addresses.insert(
        "us-east-1".into(),
        vec![
            AddressSummary {
                allocation_id: "eipalloc-free".into(),
                public_ip: "203.0.113.9".into(),
                association_id: None,
                tags: vec![],
            },
            AddressSummary {
                allocation_id: "eipalloc-used".into(),
                public_ip: "203.0.113.10".into(),
                association_id: Some("eipassoc-1".into()),
                tags: vec![],
            },
        ],
    );
    let cloud = Arc::new(cloud);

    let probe = UnusedAddressProbe::new(cloud.clone(), RateTable::default());
    let findings = probe.scan("us-east-1", &window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::UnusedAddress(address) => {
            assert_eq!(address.allocation_id, "eipalloc-free");
            assert_eq!(address.potential_cost_savings, "3.60 USD");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[tokio::test]
async fn test_volume_probe_savings_scale_with_size() {
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.volumes.insert(
        "us-east-1".into(),
        vec![VolumeSummary { volume_id: "vol-big".into(), size_gb: 100, tags: vec![] }],
    );
    let cloud = Arc::new(cloud);

    let probe = UnattachedVolumeProbe::new(cloud.clone(), RateTable::default());
    let findings = probe.scan("us-east-1", &window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].savings, 10.0);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::UnattachedVolume(volume) => {
            assert_eq!(volume.potential_cost_savings, "10.00 USD");
            assert_eq!(volume.region, "us-east-1");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[tokio::test]
async fn test_stopped_instance_age_in_whole_days() {
    let mut cloud = StaticCloud::new("123456789012", &["us-east-1"]);
    cloud.instances.insert(
        "us-east-1".into(),
        vec![stopped_instance("i-0abc", "t2.micro", days_ago(10))],
    );
    let cloud = Arc::new(cloud);

    let probe = StoppedInstanceProbe::new(cloud.clone(), RateTable::default());
    let findings = probe.scan("us-east-1", &window()).await.unwrap();

    assert_eq!(findings.len(), 1);
    match &findings[0].finding {
        cloudsweep::probes::RegionalFinding::StoppedInstance(instance) => {
            assert_eq!(instance.age, 10);
            assert_eq!(instance.launch_time, "2026-07-27 12:00:00");
            assert_eq!(instance.potential_cost_savings, "8.35 USD");
        }
        other => panic!("unexpected finding: {:?}", other),
    }
}
