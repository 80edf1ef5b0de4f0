//! Tests for the request lifecycle: loading flag, clearing, notifications

use request_store::prelude::*;
use request_store::testing::{RequestHarness, SinkEvent, UiCall};
use request_store::{assert_not_recorded, assert_recorded, count_recorded};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_success_brackets_action_with_loading() {
    let mut harness = RequestHarness::new();
    let ui = harness.ui.clone();

    let outcome = harness
        .gateway
        .execute(|| async move {
            // One clear, then loading, before the action body runs
            assert_eq!(
                ui.calls(),
                vec![
                    UiCall::ClearNotifications(NotificationKind::Error),
                    UiCall::SetLoading(true),
                ]
            );
            assert!(ui.is_loading());
            Ok::<_, GenericError>("done")
        })
        .await;

    assert_eq!(outcome, RequestOutcome::Success("done"));
    let calls = harness.drain_calls();
    assert_eq!(count_recorded!(calls, UiCall::ClearNotifications(_)), 1);
    assert_eq!(calls.last(), Some(&UiCall::SetLoading(false)));
    assert_not_recorded!(calls, UiCall::AddNotification(_));
    assert!(!harness.ui.is_loading());
}

#[tokio::test]
async fn test_failure_adds_exactly_one_notification() {
    let mut harness = RequestHarness::new();

    let outcome = harness
        .gateway
        .execute(|| async { Err::<(), _>(GenericError::new("boom")) })
        .await;

    assert!(outcome.is_failure());
    let calls = harness.drain_calls();
    assert_eq!(count_recorded!(calls, UiCall::AddNotification(_)), 1);
    assert_recorded!(
        calls,
        UiCall::AddNotification(n) if n.kind == NotificationKind::Error && n.text == "Error: boom"
    );
    assert_eq!(calls.last(), Some(&UiCall::SetLoading(false)));
    assert!(!harness.ui.is_loading());

    let events = harness.drain_events();
    assert_recorded!(
        events,
        SinkEvent::Failed { kind: ErrorKind::Generic, message, .. } if message == "Error: boom"
    );
}

#[tokio::test]
async fn test_response_data_message() {
    let harness = RequestHarness::new();

    let _ = harness
        .gateway
        .execute(|| async {
            Err::<(), _>(json!({
                "config": { "method": "get", "url": "/orders" },
                "response": { "data": "X", "status": 422, "statusText": "Unprocessable Entity" }
            }))
        })
        .await;

    assert_eq!(harness.ui.notifications(), vec![Notification::error("X")]);
}

#[tokio::test]
async fn test_response_status_text_message() {
    let harness = RequestHarness::new();

    let outcome = harness
        .gateway
        .execute(|| async {
            Err::<(), _>(
                ResponseError::new(json!({ "url": "/orders/9" })).with_response(
                    ResponseInfo::new()
                        .with_status(404)
                        .with_status_text("Not Found"),
                ),
            )
        })
        .await;

    assert_eq!(outcome.error().and_then(ErrorInfo::status), Some(404));
    assert_eq!(harness.ui.notifications(), vec![Notification::error("Not Found")]);
}

#[tokio::test]
async fn test_validation_failure_short_circuits() {
    struct Form {
        email: String,
    }

    impl Validate for Form {
        fn validate(&self) -> bool {
            self.email.contains('@')
        }
    }

    let mut harness = RequestHarness::new();
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();

    let outcome = harness
        .gateway
        .submit_if_valid(
            &Form {
                email: "nobody".into(),
            },
            || async move {
                flag.store(true, Ordering::SeqCst);
                Ok::<_, GenericError>(())
            },
        )
        .await;

    assert!(!invoked.load(Ordering::SeqCst));
    assert!(matches!(
        outcome,
        RequestOutcome::Failure(ErrorInfo::Validation(ref e)) if e.message == "`model` is in invalid state."
    ));
    assert!(harness.drain_calls().is_empty());
    assert!(!harness.ui.is_loading());
}

#[tokio::test]
async fn test_custom_hooks_see_success_and_shape_messages() {
    #[derive(Default)]
    struct AuditHooks {
        successes: std::sync::Mutex<Vec<u32>>,
    }

    impl RequestHooks for AuditHooks {
        fn on_success(&self, value: &dyn std::any::Any) {
            if let Some(id) = value.downcast_ref::<u32>() {
                self.successes.lock().unwrap().push(*id);
            }
        }

        fn response_message(&self, response: &ResponseInfo) -> Option<String> {
            response
                .status
                .map(|status| format!("Server answered {}", status))
        }
    }

    let hooks = Arc::new(AuditHooks::default());
    let harness = RequestHarness::with_hooks(hooks.clone());

    let _ = harness
        .gateway
        .execute(|| async { Ok::<_, GenericError>(41u32) })
        .await;
    let _ = harness
        .gateway
        .execute(|| async {
            Err::<u32, _>(
                ResponseError::new(json!({}))
                    .with_response(ResponseInfo::new().with_data("ignored").with_status(503)),
            )
        })
        .await;

    assert_eq!(*hooks.successes.lock().unwrap(), vec![41]);
    assert_eq!(
        harness.ui.notifications(),
        vec![Notification::error("Server answered 503")]
    );
}

#[tokio::test]
async fn test_errors_cleared_by_next_request() {
    let ui = UiStore::new();
    let gateway = RequestGateway::new(ui.clone()).with_sink(NullSink);

    let _ = gateway
        .execute(|| async { Err::<(), _>("first failure") })
        .await;
    assert_eq!(ui.notifications_of(NotificationKind::Error).len(), 1);

    let _ = gateway
        .execute(|| async { Ok::<_, GenericError>(()) })
        .await;
    assert!(ui.notifications_of(NotificationKind::Error).is_empty());
}

#[tokio::test]
async fn test_every_failure_reaches_the_sink() {
    let mut harness = RequestHarness::new().with_config(
        GatewayConfig::default()
            .with_name("orders")
            .with_failure_kind(NotificationKind::Warning),
    );

    let _ = harness
        .gateway
        .execute(|| async { Err::<(), _>("backend down") })
        .await;

    let events = harness.drain_events();
    assert_recorded!(
        events,
        SinkEvent::Failed { store, kind: ErrorKind::Generic, message }
            if store == "orders" && message == "Error: backend down"
    );
    assert_eq!(harness.ui.notifications().len(), 1);
}

#[tokio::test]
async fn test_quiet_sink_still_notifies() {
    let ui = UiStore::new();
    let gateway = RequestGateway::new(ui.clone()).with_sink(TracingSink {
        log_progress: false,
        log_failures: false,
    });

    let outcome = gateway
        .execute(|| async { Err::<(), _>("quiet") })
        .await;

    assert!(outcome.is_failure());
    assert_eq!(ui.notifications(), vec![Notification::error("Error: quiet")]);
    assert!(!ui.is_loading());
}

#[tokio::test]
async fn test_loose_response_status_keeps_data_message() {
    let ui = UiStore::new();
    let gateway = RequestGateway::new(ui.clone()).with_sink(NullSink);

    let _ = gateway
        .execute(|| async {
            Err::<(), _>(json!({
                "config": { "url": "/orders" },
                "response": { "data": "Order limit reached", "status": "429" }
            }))
        })
        .await;

    assert_eq!(
        ui.notifications(),
        vec![Notification::error("Order limit reached")]
    );
}

#[tokio::test]
async fn test_subscribers_observe_loading_transitions() {
    let ui = UiStore::new();
    let mut rx = ui.subscribe();
    let gateway = RequestGateway::new(ui.clone()).with_sink(NullSink);

    let watcher = ui.clone();
    let _ = gateway
        .execute(|| async move { Ok::<_, GenericError>(watcher.snapshot().loading) })
        .await;

    assert!(rx.has_changed().unwrap());
    assert!(!rx.borrow_and_update().loading);
}
