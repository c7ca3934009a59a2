//! gpsd provider against a fake daemon.

use std::time::Duration;

use device_sensors::GpsdProvider;
use safety_core::{LastKnownCache, LocationAcquirer, LocationFix, LocationProvider, LocationSample};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Accept one client, check the watch command, then send `reports`.
/// With `hold_open` the socket stays open after the reports.
async fn fake_gpsd(reports: Vec<&'static str>, hold_open: bool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let (read, mut write) = socket.into_split();
        let mut lines = BufReader::new(read).lines();

        let command = lines.next_line().await.unwrap().unwrap();
        assert!(command.starts_with("?WATCH="));
        assert!(command.contains("\"json\":true"));

        for report in reports {
            write.write_all(report.as_bytes()).await.unwrap();
            write.write_all(b"\n").await.unwrap();
        }
        if hold_open {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    });

    addr
}

#[tokio::test]
async fn test_first_usable_fix_wins() {
    let addr = fake_gpsd(
        vec![
            r#"{"class":"VERSION","release":"3.25","proto_major":3}"#,
            r#"{"class":"DEVICES","devices":[]}"#,
            r#"{"class":"TPV","mode":1}"#,
            "garbage",
            r#"{"class":"TPV","mode":3,"lat":28.6139,"lon":77.209,"eph":12.0}"#,
            r#"{"class":"TPV","mode":3,"lat":0.0,"lon":0.0}"#,
        ],
        false,
    )
    .await;

    let provider = GpsdProvider::new(addr);
    assert!(provider.last_known_location().await.is_none());

    let sample = provider.current_location().await.unwrap();
    assert_eq!(sample.latitude, 28.6139);
    assert_eq!(sample.accuracy_meters, Some(12.0));
    assert_eq!(provider.last_known_location().await, Some(sample));
}

#[tokio::test]
async fn test_closed_without_fix_is_unavailable() {
    let addr = fake_gpsd(vec![r#"{"class":"TPV","mode":1}"#], false).await;
    let err = GpsdProvider::new(addr).current_location().await.unwrap_err();
    assert!(err.to_string().contains("without a fix"));
}

#[tokio::test]
async fn test_silent_daemon_falls_back_to_cache() {
    let addr = fake_gpsd(vec![r#"{"class":"VERSION","release":"3.25"}"#], true).await;

    let cache = LastKnownCache::new();
    cache.record(LocationSample::new(19.076, 72.8777)).await;

    let acquirer =
        LocationAcquirer::with_timeout(GpsdProvider::new(addr), cache, Duration::from_millis(200));
    match acquirer.acquire().await {
        LocationFix::Cached(sample) => assert_eq!(sample.latitude, 19.076),
        other => panic!("Expected cached fix, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_daemon() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let err = GpsdProvider::new(addr).current_location().await.unwrap_err();
    assert!(err.to_string().starts_with("location unavailable"));
}
