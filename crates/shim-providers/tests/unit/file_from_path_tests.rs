//! Deprecated file_from_path Tests

#![allow(deprecated)]

use std::sync::{Arc, Mutex};

use shim_domain::{AgentScheme, FileFromPathOptions, RuntimeShims};
use shim_providers::files::default_file_loader;
use shim_providers::{DefaultAgents, DeprecationNotice, NativeShims, NullAgent};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Records the `feature` field of every WARN event
#[derive(Debug, Clone, Default)]
struct WarningRecorder {
    features: Arc<Mutex<Vec<String>>>,
}

impl WarningRecorder {
    fn features(&self) -> Vec<String> {
        self.features.lock().unwrap().clone()
    }
}

struct FeatureVisitor(Option<String>);

impl Visit for FeatureVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "feature" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: Subscriber> Layer<S> for WarningRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = FeatureVisitor(None);
        event.record(&mut visitor);
        self.features
            .lock()
            .unwrap()
            .push(visitor.0.unwrap_or_default());
    }
}

fn shims_with_notice(notice: Arc<DeprecationNotice>) -> NativeShims {
    let agents = DefaultAgents::new(
        Arc::new(NullAgent::new(AgentScheme::Http)),
        Arc::new(NullAgent::new(AgentScheme::Https)),
    );
    NativeShims::new(agents)
        .with_file_loader(default_file_loader())
        .with_deprecation_notice(notice)
}

#[tokio::test]
async fn test_two_calls_emit_one_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    std::fs::write(&path, "hello").unwrap();

    let notice = Arc::new(DeprecationNotice::new());
    let shims = shims_with_notice(Arc::clone(&notice));

    let first = shims
        .file_from_path(&path, FileFromPathOptions::default())
        .await
        .unwrap();
    let second = shims
        .file_from_path(&path, FileFromPathOptions::default().with_filename("other.txt"))
        .await
        .unwrap();

    assert_eq!(first.name(), "upload.txt");
    assert_eq!(second.name(), "other.txt");
    assert_eq!(notice.times_emitted(), 1);
}

#[tokio::test]
async fn test_two_calls_log_one_warning_event() {
    let recorder = WarningRecorder::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    std::fs::write(&path, "hello").unwrap();
    let shims = shims_with_notice(Arc::new(DeprecationNotice::new()));

    shims.file_from_path(&path, FileFromPathOptions::default()).await.unwrap();
    shims.file_from_path(&path, FileFromPathOptions::default()).await.unwrap();

    assert_eq!(recorder.features(), vec!["file_from_path".to_string()]);
}

#[tokio::test]
async fn test_notice_is_shared_between_bundles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    std::fs::write(&path, "hello").unwrap();

    let notice = Arc::new(DeprecationNotice::new());
    let first = shims_with_notice(Arc::clone(&notice));
    let second = shims_with_notice(Arc::clone(&notice));

    first.file_from_path(&path, FileFromPathOptions::default()).await.unwrap();
    second.file_from_path(&path, FileFromPathOptions::default()).await.unwrap();

    assert_eq!(notice.times_emitted(), 1);
}

#[tokio::test]
async fn test_unreadable_path_propagates_error_after_warning() {
    let notice = Arc::new(DeprecationNotice::new());
    let shims = shims_with_notice(Arc::clone(&notice));

    let result = shims
        .file_from_path(std::path::Path::new("/no/such/file"), FileFromPathOptions::default())
        .await;

    assert!(matches!(result, Err(shim_domain::Error::IoSimple { .. })));
    assert!(notice.has_warned());
}
