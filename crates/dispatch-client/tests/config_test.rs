use dispatch_client::config::{ConfigError, DispatchConfig, LocationConfig, RefreshStrategy};
use dispatch_client::model::Coord;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_full_file() {
    let file = write_config(
        r#"
        log_filter = "debug,hyper=warn"

        [allocation]
        endpoint = "https://dispatch.example.com/api/allocate"
        timeout_ms = 2500

        [location]
        source = "http"
        url = "http://127.0.0.1:9000/position"

        [map]
        center = { lat = 28.6, lon = 77.2 }
        zoom = 10
        max_zoom = 16
        clear_between_submissions = true

        [refresh]
        strategy = "stats"
        stats_url = "https://dispatch.example.com/api/stats"
        "#,
    );

    let config = DispatchConfig::from_file(file.path()).await.unwrap();
    assert_eq!(config.log_filter, "debug,hyper=warn");
    assert_eq!(config.allocation.timeout_ms, 2500);
    assert_eq!(
        config.location,
        LocationConfig::Http {
            url: "http://127.0.0.1:9000/position".into(),
            timeout_ms: 10_000
        }
    );
    assert_eq!(config.map.center, Coord::new(28.6, 77.2));
    assert_eq!(config.map.max_zoom, 16);
    assert!(config.map.clear_between_submissions);
    assert_eq!(config.refresh.strategy, RefreshStrategy::Stats);
    // Untouched fields keep their defaults
    assert_eq!(config.refresh.delay_ms, 4000);
    assert_eq!(config.map.width_px, 800);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DispatchConfig::from_file(dir.path().join("absent.toml")).await;
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[tokio::test]
async fn test_invalid_file_is_rejected() {
    let file = write_config("[map]\nzoom = 30\nmax_zoom = 30");
    let result = DispatchConfig::from_file(file.path()).await;
    assert!(matches!(result, Err(ConfigError::Validation(_))));

    let file = write_config("[allocation\nendpoint = ");
    let result = DispatchConfig::from_file(file.path()).await;
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
