//! Abort Controller Tests

use std::time::Duration;

use shim_domain::AbortController;
use tokio_util::sync::CancellationToken;

#[test]
fn test_abort_is_idempotent() {
    let controller = AbortController::new();
    let signal = controller.signal();
    assert!(!signal.is_aborted());

    controller.abort();
    controller.abort();

    assert!(controller.is_aborted());
    assert!(signal.is_aborted());
}

#[tokio::test]
async fn test_signal_resolves_after_abort() {
    let controller = AbortController::new();
    let signal = controller.signal();

    let waiter = tokio::spawn(async move { signal.aborted().await });
    controller.abort();

    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("signal should resolve")
        .expect("task should not panic");
}

#[test]
fn test_child_token_follows_parent() {
    let shutdown = CancellationToken::new();
    let controller = AbortController::from_token(shutdown.child_token());

    shutdown.cancel();
    assert!(controller.signal().is_aborted());
}
