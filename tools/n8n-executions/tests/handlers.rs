//! Handler tests against the in-memory n8n mock
//!
//! No network access needed:
//!
//! ```bash
//! cargo test -p n8n-executions --test handlers
//! ```

use n8n_common::mock::MockApi;
use n8n_common::{Execution, ExecutionFilter, Workflow};
use n8n_executions::cli::ExecutionCommands;
use n8n_executions::handlers::{self, run_command};
use n8n_executions::watch::{poll_once, WatchState, WATCH_BATCH};
use serde_json::json;

fn failed_run() -> serde_json::Value {
    json!({
        "id": "42",
        "workflowId": "7",
        "status": "error",
        "mode": "webhook",
        "startedAt": "2024-05-01T08:30:00.000Z",
        "stoppedAt": "2024-05-01T08:30:02.500Z",
        "data": {"resultData": {
            "lastNodeExecuted": "HTTP Request",
            "runData": {
                "Webhook": [{"executionTime": 3, "data": {"main": [[{"json": {"a": 1}}]]}}],
                "HTTP Request": [{"executionTime": 120, "error": {"message": "ECONNREFUSED"}}]
            },
            "error": {"message": "ECONNREFUSED", "node": {"name": "HTTP Request"}}
        }}
    })
}

fn seeded() -> MockApi {
    MockApi::new()
        .with_workflow(json!({"id": "7", "name": "Sync orders", "active": true, "nodes": []}))
        .with_execution(json!({"id": "43", "workflowId": "7", "status": "success"}))
        .with_execution(failed_run())
        .with_execution(json!({"id": "41", "workflowId": "8", "status": "waiting"}))
}

#[tokio::test]
async fn debug_report_includes_workflow_name() {
    let api = seeded();
    let report = handlers::debug_report(&api, "42", false).await.unwrap();

    assert!(report.contains("Workflow:    Sync orders"));
    assert!(report.contains("HTTP Request"));
    assert!(report.contains("ECONNREFUSED"));
    assert!(api
        .calls()
        .contains(&"GET /api/v1/executions/42?includeData=true".to_string()));
    assert!(api.calls().contains(&"GET /api/v1/workflows/7".to_string()));
}

#[tokio::test]
async fn debug_report_survives_missing_workflow() {
    let api = MockApi::new().with_execution(failed_run());
    let report = handlers::debug_report(&api, "42", false).await.unwrap();

    assert!(!report.contains("Workflow:    Sync orders"));
    assert!(report.contains("EXECUTION DEBUG"));
}

#[tokio::test]
async fn debug_unknown_execution_is_error() {
    let api = seeded();
    let err = handlers::debug_report(&api, "999", false).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn lookup_skips_execution_without_workflow() {
    let api = MockApi::new();
    let execution = Execution::new(json!({"id": "1"}));
    let name = handlers::lookup_workflow_name(&api, &execution).await;
    assert!(name.is_none());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn errors_refetches_each_failure() {
    let api = seeded();
    let entries = handlers::recent_errors(&api, 10).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0][0], "\n[42] Workflow: 7 | 2024-05-01 08:30:00");
    assert_eq!(entries[0][1], "  Last node: HTTP Request");
    assert_eq!(entries[0][2], "  Error: ECONNREFUSED");
    assert_eq!(
        api.calls(),
        vec![
            "GET /api/v1/executions".to_string(),
            "GET /api/v1/executions/42?includeData=true".to_string(),
        ]
    );
}

#[tokio::test]
async fn errors_empty_when_nothing_failed() {
    let api = MockApi::new().with_execution(json!({"id": "1", "status": "success"}));
    assert!(handlers::recent_errors(&api, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn stats_over_all_or_one_workflow() {
    let api = seeded();

    let all = handlers::collect_stats(&api, None).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.success_rate(), Some(50.0));

    let one = handlers::collect_stats(&api, Some("8".to_string())).await.unwrap();
    assert_eq!(one.total, 1);
    assert_eq!(one.count("waiting"), 1);
    assert_eq!(one.success_rate(), None);
}

#[tokio::test]
async fn watch_reports_only_new_executions() {
    let api = seeded();
    let filter = ExecutionFilter {
        workflow_id: None,
        status: None,
        limit: WATCH_BATCH,
    };
    let mut state = WatchState::new();

    assert!(poll_once(&api, &filter, &mut state).await.unwrap().is_empty());

    api.push_execution(json!({"id": "44", "workflowId": "7", "status": "running"}));
    api.push_execution(json!({"id": "45", "workflowId": "7", "status": "success"}));

    let fresh = poll_once(&api, &filter, &mut state).await.unwrap();
    let ids: Vec<String> = fresh.iter().filter_map(|e| e.id()).collect();
    assert_eq!(ids, vec!["44", "45"]);

    assert!(poll_once(&api, &filter, &mut state).await.unwrap().is_empty());
}

#[tokio::test]
async fn forced_delete_removes_execution() {
    let api = seeded();
    run_command(
        &api,
        ExecutionCommands::Delete {
            id: "41".to_string(),
            force: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(api.execution_ids(), vec!["43", "42"]);
    assert!(api.calls().contains(&"DELETE /api/v1/executions/41".to_string()));
}

#[tokio::test]
async fn delete_missing_execution_fails() {
    let api = seeded();
    let result = run_command(
        &api,
        ExecutionCommands::Delete {
            id: "nope".to_string(),
            force: true,
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn list_command_runs_against_mock() {
    let api = seeded();
    run_command(
        &api,
        ExecutionCommands::List {
            workflow_id: Some("7".to_string()),
            status: None,
            limit: 20,
        },
    )
    .await
    .unwrap();
    assert_eq!(api.calls(), vec!["GET /api/v1/executions".to_string()]);
}

#[test]
fn workflow_view_used_for_names() {
    let wf = Workflow::new(json!({"id": 7, "name": "Sync orders"}));
    assert_eq!(wf.id().as_deref(), Some("7"));
    assert_eq!(wf.name(), Some("Sync orders"));
}
