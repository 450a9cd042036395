//! Tool calls through the full stack: CLI arguments, git detection on a real
//! repository and the REST client against a mocked API.

use actions_mcp::{ActionsMcpServer, Args};
use actions_test_utils::git::GitFixture;
use actions_test_utils::github::{
    log_archive, run_list, workflow, workflow_list, workflow_run,
};
use clap::Parser;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn server_for(fixture: &GitFixture, api: &MockServer, extra: &[&str]) -> ActionsMcpServer {
    let root = fixture.root().to_string_lossy().into_owned();
    let base = api.base_url();
    let mut argv = vec![
        "actions-mcp",
        "--root",
        root.as_str(),
        "--api-base",
        base.as_str(),
        "--host",
        "github.com",
        "--token",
        "test-token",
    ];
    argv.extend_from_slice(extra);

    let args = Args::try_parse_from(argv).unwrap();
    ActionsMcpServer::new(args.build_context().unwrap())
}

async fn call_tool(server: &ActionsMcpServer, name: &str) -> (bool, String) {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": {}}
    });
    let response: Value =
        serde_json::from_str(&server.handle_message(&request.to_string()).await.unwrap()).unwrap();
    let result = &response["result"];
    (
        result["isError"] == true,
        result["content"][0]["text"].as_str().unwrap().to_string(),
    )
}

fn mock_workflows(api: &MockServer) -> httpmock::Mock<'_> {
    api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/workflows");
        then.status(200).json_body(workflow_list(&[
            workflow(1, "CI", ".github/workflows/ci.yml"),
            workflow(2, "Deploy", ".github/workflows/deploy.yml"),
        ]));
    })
}

#[tokio::test]
async fn test_branch_comes_from_checked_out_head() {
    let fixture = GitFixture::with_origin("https://github.com/acme/widgets.git", "feature/login");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs")
            .query_param("branch", "feature/login");
        then.status(200)
            .json_body(run_list(&[workflow_run(42, "in_progress")]));
    });
    let logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/42/logs");
        then.status(200).body("building...");
    });

    let server = server_for(&fixture, &api, &[]);
    let (is_error, text) = call_tool(&server, "get_logs").await;

    assert!(!is_error, "{text}");
    assert_eq!(text, "building...");
    runs.assert();
    logs.assert();
}

#[tokio::test]
async fn test_trigger_dispatches_selected_workflow() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let dispatch = api.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/actions/workflows/2/dispatches")
            .header("authorization", "Bearer test-token")
            .json_body(json!({"ref": "main"}));
        then.status(204);
    });

    let server = server_for(
        &fixture,
        &api,
        &["--workflow-path", ".github/workflows/deploy.yml"],
    );
    let (is_error, text) = call_tool(&server, "trigger_workflow").await;

    assert!(!is_error, "{text}");
    dispatch.assert();
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["workflow_id"], 2);
    assert_eq!(payload["workflow"], "Deploy");
    assert_eq!(payload["http_status"], 204);
    assert_eq!(payload["response"], Value::Null);
}

#[tokio::test]
async fn test_rerun_posts_to_latest_run() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let _runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200)
            .json_body(run_list(&[workflow_run(500, "completed")]));
    });
    let rerun = api.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/actions/runs/500/rerun");
        then.status(201);
    });
    let logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/500/logs");
        then.status(200).body("unused");
    });

    let server = server_for(&fixture, &api, &[]);
    let (is_error, text) = call_tool(&server, "rerun_workflow").await;

    assert!(!is_error, "{text}");
    rerun.assert();
    logs.assert_hits(0);
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["run_id"], 500);
    assert_eq!(payload["previous_conclusion"], "success");
}

#[tokio::test]
async fn test_each_call_opens_a_fresh_session() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let workflows = mock_workflows(&api);
    let runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200)
            .json_body(run_list(&[workflow_run(500, "completed")]));
    });
    let _logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/500/logs");
        then.status(200).body("step1 ok");
    });

    let server = server_for(&fixture, &api, &[]);
    call_tool(&server, "get_logs").await;
    call_tool(&server, "get_logs").await;

    workflows.assert_hits(2);
    runs.assert_hits(2);
}

#[tokio::test]
async fn test_expired_logs_surface_http_status() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let _runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200)
            .json_body(run_list(&[workflow_run(500, "completed")]));
    });
    let _logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/500/logs");
        then.status(410).body("Gone");
    });

    let server = server_for(&fixture, &api, &[]);
    let (is_error, text) = call_tool(&server, "summarize_logs").await;

    assert!(is_error);
    assert_eq!(
        text,
        "Error summarizing logs: download run logs failed with HTTP 410: Gone"
    );
}

#[tokio::test]
async fn test_no_runs_on_branch_is_reported() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let _runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200).json_body(run_list(&[]));
    });

    let server = server_for(&fixture, &api, &[]);
    let (is_error, text) = call_tool(&server, "rerun_workflow").await;

    assert!(is_error);
    assert_eq!(
        text,
        "Error re-running workflow: No runs found for acme/widgets on branch main"
    );
}

#[tokio::test]
async fn test_queued_run_without_logs() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let _runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200)
            .json_body(run_list(&[workflow_run(501, "queued")]));
    });
    let _logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/501/logs");
        then.status(200).body("");
    });

    let server = server_for(&fixture, &api, &[]);
    let (is_error, text) = call_tool(&server, "get_logs").await;

    assert!(!is_error);
    assert_eq!(text, "No logs found for the latest run.");
}

#[tokio::test]
async fn test_zipped_logs_reach_get_logs_and_summary() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let _workflows = mock_workflows(&api);
    let _runs = api.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/actions/workflows/1/runs");
        then.status(200)
            .json_body(run_list(&[workflow_run(500, "completed")]));
    });
    let _logs = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/runs/500/logs");
        then.status(200)
            .header("content-type", "application/zip")
            .body(log_archive(&[
                ("build/1_Set up job.txt", "step1 ok"),
                ("build/2_Run tests.txt", "error: step2 failed"),
            ]));
    });

    let server = server_for(&fixture, &api, &[]);

    let (is_error, logs) = call_tool(&server, "get_logs").await;
    assert!(!is_error, "{logs}");
    assert!(logs.contains("== build/2_Run tests.txt ==\nerror: step2 failed"));
    assert!(!logs.contains("binary log archive"));

    let (is_error, summary) = call_tool(&server, "summarize_logs").await;
    assert!(!is_error, "{summary}");
    assert!(summary.contains("Workflow run ID: **500**"));
    assert!(summary.contains("step1 ok"));
    assert!(summary.contains("error: step2 failed"));
}
