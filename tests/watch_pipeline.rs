//! End-to-end run over replayed captures with on-disk history

use chrono::Utc;
use tokio::sync::watch;

use wlanwatch::{
    CollectingReporter, Config, DetectionEngine, Finding, HistoryStore, ReplaySource, Watcher,
};

const QUIET: &str = "\
Interface name : Wi-Fi
There are 1 networks currently visible.

SSID 1 : Lab
    Network type            : Infrastructure
    Authentication          : WPA2-Personal
    Encryption              : CCMP
    BSSID 1                 : aa:bb:cc:00:00:01
         Signal             : 82%
         Radio type         : 802.11ax
         Band               : 5 GHz
         Channel            : 36
    BSSID 2                 : aa:bb:cc:00:00:02
         Signal             : 64%
         Radio type         : 802.11ax
         Band               : 5 GHz
         Channel            : 44
";

const BUSY: &str = "\
Interface name : Wi-Fi
There are 2 networks currently visible.

SSID 1 : Lab
    Network type            : Infrastructure
    Authentication          : WPA2-Personal
    Encryption              : CCMP
    BSSID 1                 : aa:bb:cc:00:00:01
         Signal             : 80%
         Radio type         : 802.11ax
         Band               : 5 GHz
         Channel            : 36
    BSSID 2                 : aa:bb:cc:00:00:02
         Signal             : 66%
         Radio type         : 802.11ax
         Band               : 5 GHz
         Channel            : 44
    BSSID 3                 : de:ad:be:00:00:03
         Signal             : 99%
         Radio type         : 802.11n
         Band               : 5 GHz
         Channel            : 36
         Details            : WPA2-Personal/TKIP

SSID 2 : Corp6
    Network type            : Infrastructure
    Authentication          : WPA3-Personal
    Encryption              : CCMP
    BSSID 1                 : 11:22:33:00:00:0a
         Signal             : 70%
         Radio type         : 802.11ax
         Band               : 6 GHz
         Channel            : 37
    BSSID 2                 : 11:22:33:00:00:0b
         Signal             : 68%
         Radio type         : 802.11ax
         Band               : 6 GHz
         Channel            : 37
";

#[tokio::test]
async fn test_replayed_captures_through_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let captures: Vec<_> = [QUIET, BUSY, QUIET]
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let path = dir.path().join(format!("scan{}.txt", i + 1));
            std::fs::write(&path, text).unwrap();
            path
        })
        .collect();

    let mut config = Config::default();
    config.data_dir = dir.path().join("data");
    config.watch.interval_secs = 0;

    let history = HistoryStore::open(&config, Utc::now()).unwrap();
    let mut watcher = Watcher::new(
        &config.watch,
        ReplaySource::new(captures),
        CollectingReporter::default(),
        history,
        DetectionEngine::new(config.detection.clone()),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);
    let stats = watcher.run(stop_rx).await;

    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.failed_scans, 0);
    assert_eq!(stats.persist_failures, 0);
    assert_eq!(stats.anomalies, 3);
    assert_eq!(stats.churn_events, 2);

    let reports = &watcher.reporter().reports;

    // Baseline
    assert!(reports[0].diff.baseline);
    assert!(reports[0].is_clean());

    // Rogue twin plus a 6 GHz pair
    let rules: Vec<&str> = reports[1].findings.iter().map(Finding::rule).collect();
    assert_eq!(
        rules,
        vec![
            "duplicate_transmitter",
            "capability_inconsistency",
            "vendor_collision",
            "churn"
        ]
    );
    assert_eq!(reports[1].diff.added.len(), 3);
    assert!(reports[1].diff.removed.is_empty());
    match &reports[1].findings[0] {
        Finding::DuplicateTransmitter { ssid, channel, bssids, .. } => {
            assert_eq!(ssid, "Corp6");
            assert_eq!(*channel, Some(37));
            assert_eq!(bssids.len(), 2);
        }
        other => panic!("unexpected finding {other:?}"),
    }

    // Back to quiet: only churn
    assert_eq!(reports[2].diff.removed.len(), 3);
    assert_eq!(reports[2].anomalies().count(), 0);
    assert_eq!(reports[2].findings.len(), 1);

    // Nothing is discarded on disk
    let csv = std::fs::read_to_string(config.export_path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + 2 + 5 + 2);
    assert!(lines[0].starts_with("timestamp,ssid,bssid"));
    assert!(lines[3].contains("Corp6"));

    let timeline = std::fs::read_to_string(config.timeline_path()).unwrap();
    assert_eq!(timeline.matches("=== ").count(), 3);
    assert!(timeline.contains("| cycle 2 | 5 access points ==="));
}

#[tokio::test]
async fn test_unreadable_capture_still_counts_as_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    std::fs::write(&good, QUIET).unwrap();

    let mut config = Config::default();
    config.watch.interval_secs = 0;
    let mut watcher = Watcher::new(
        &config.watch,
        ReplaySource::new([good.clone(), dir.path().join("missing.txt"), good]),
        CollectingReporter::default(),
        HistoryStore::in_memory(0),
        DetectionEngine::default(),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);
    let stats = watcher.run(stop_rx).await;

    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.failed_scans, 1);

    let reports = &watcher.reporter().reports;
    assert!(reports[1].snapshot.is_empty());
    assert_eq!(reports[1].diff.removed.len(), 2);
    assert_eq!(reports[2].diff.added.len(), 2);
}
