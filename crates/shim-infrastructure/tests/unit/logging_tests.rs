//! Logging Tests

use shim_infrastructure::constants::DEFAULT_LOG_LEVEL;
use shim_infrastructure::logging::{LoggingConfig, build_subscriber, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_logging_rejects_unknown_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
    assert!(build_subscriber(&config).is_err());
}

#[test]
fn test_init_logging_keeps_existing_subscriber() {
    let config = LoggingConfig::default();
    init_logging(&config).unwrap();
    assert!(!init_logging(&config).unwrap());
}

#[test]
fn test_file_output_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "warning".to_string(),
        json_format: true,
        file_output: Some(dir.path().join("shim-test.log")),
    };

    let subscriber = build_subscriber(&config).unwrap();
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("below threshold");
        tracing::warn!(upload = "file-1", "multipart upload slow");
    });

    let logs: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(
        logs[0]
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("shim-test"))
    );

    let contents = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(contents.contains("multipart upload slow"));
    assert!(!contents.contains("below threshold"));
    assert!(!contents.contains('\u{1b}'));
}
