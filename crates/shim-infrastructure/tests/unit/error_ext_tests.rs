//! Error Extension Tests

use shim_domain::error::{Error, Result};
use shim_infrastructure::error_ext::{ErrorContext, infra};
use std::io;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_and_network_context() {
    let config: Result<()> =
        Err(io::Error::other("bad value")).config_context("invalid agents section");
    assert!(matches!(config, Err(Error::Configuration { .. })));

    let network: Result<()> =
        Err(io::Error::other("connection reset")).network_context("request failed");
    assert!(matches!(network, Err(Error::Network { .. })));
}

#[test]
fn test_lazy_context_is_not_evaluated_on_success() {
    let ok: std::result::Result<u8, io::Error> = Ok(7);
    let value = ok
        .with_context(|| -> String { panic!("context evaluated on success") })
        .unwrap();
    assert_eq!(value, 7);
}

#[test]
fn test_infra_error_creation() {
    match infra::infrastructure_error_msg("test error message") {
        Error::Infrastructure { message, source } => {
            assert_eq!(message, "test error message");
            assert!(source.is_none());
        }
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}
