//! Scenario-based Integration Tests
//!
//! End-to-end runs of the tool facade over a real git working copy and the
//! real REST client talking to a mocked GitHub API. Each scenario documents
//! the setup and the observable outcome, including which API calls must not
//! happen.

use std::sync::Arc;

use actions_client::{ClientConfig, GithubClient, WorkflowSelector};
use actions_core::Session;
use actions_git::{ContextSource, GitContext};
use actions_mcp::handlers::{get_logs, rerun_workflow, summarize_logs, trigger_workflow};
use actions_mcp::{ServerContext, ToolOutput};
use actions_test_utils::git::GitFixture;
use actions_test_utils::github::{run_list, workflow, workflow_list, workflow_run};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn client_for(api: &MockServer) -> Arc<GithubClient> {
    let config = ClientConfig::new(api.base_url()).with_token("test-token");
    Arc::new(GithubClient::new(config).unwrap())
}

fn context_for(fixture: &GitFixture, api: &MockServer) -> ServerContext {
    ServerContext::new(client_for(api), Arc::new(GitContext::new(fixture.root())))
}

/// Mocks for every endpoint a tool can reach, with hit counters.
struct ActionsMocks<'a> {
    workflows: httpmock::Mock<'a>,
    runs: httpmock::Mock<'a>,
    logs: httpmock::Mock<'a>,
    dispatch: httpmock::Mock<'a>,
    rerun: httpmock::Mock<'a>,
}

impl<'a> ActionsMocks<'a> {
    fn install(api: &'a MockServer, workflows: &[serde_json::Value]) -> Self {
        let workflow_body = workflow_list(workflows);
        Self {
            workflows: api.mock(|when, then| {
                when.method(GET).path("/repos/acme/widgets/actions/workflows");
                then.status(200).json_body(workflow_body);
            }),
            runs: api.mock(|when, then| {
                when.method(GET)
                    .path("/repos/acme/widgets/actions/workflows/1/runs")
                    .query_param("branch", "main");
                then.status(200)
                    .json_body(run_list(&[workflow_run(500, "completed")]));
            }),
            logs: api.mock(|when, then| {
                when.method(GET).path("/repos/acme/widgets/actions/runs/500/logs");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("step1 ok");
            }),
            dispatch: api.mock(|when, then| {
                when.method(POST)
                    .path("/repos/acme/widgets/actions/workflows/1/dispatches");
                then.status(204);
            }),
            rerun: api.mock(|when, then| {
                when.method(POST).path("/repos/acme/widgets/actions/runs/500/rerun");
                then.status(201);
            }),
        }
    }

    fn ci(api: &'a MockServer) -> Self {
        Self::install(api, &[workflow(1, "CI", ".github/workflows/ci.yml")])
    }
}

fn failure_text(output: ToolOutput) -> String {
    match output {
        ToolOutput::Failure(message) => message,
        other => panic!("expected a failure, got {other:?}"),
    }
}

// =============================================================================
// Scenario: healthy repository
// =============================================================================

/// SSH remote on `main`, one workflow, one completed run with logs.
#[tokio::test]
async fn scenario_logs_and_summary_for_latest_run() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let mocks = ActionsMocks::ci(&api);
    let ctx = context_for(&fixture, &api);

    let logs = get_logs(&ctx).await;
    assert_eq!(logs, ToolOutput::Text("step1 ok".to_string()));

    let summary = summarize_logs(&ctx).await;
    let ToolOutput::Text(report) = summary else {
        panic!("expected a report, got {summary:?}");
    };
    assert!(report.contains("500"));
    assert!(report.contains("step1 ok"));

    mocks.logs.assert_hits(2);
    mocks.dispatch.assert_hits(0);
    mocks.rerun.assert_hits(0);
}

/// Trigger and rerun act on the detected branch and the latest run.
#[tokio::test]
async fn scenario_trigger_then_rerun() {
    let fixture = GitFixture::with_origin("https://github.com/acme/widgets", "main");
    let api = MockServer::start();
    let mocks = ActionsMocks::ci(&api);
    let ctx = context_for(&fixture, &api);

    assert!(matches!(trigger_workflow(&ctx).await, ToolOutput::Json(_)));
    assert!(matches!(rerun_workflow(&ctx).await, ToolOutput::Json(_)));

    mocks.dispatch.assert();
    mocks.rerun.assert();
    mocks.runs.assert_hits(1);
    mocks.logs.assert_hits(0);
}

// =============================================================================
// Scenario: not a GitHub working copy
// =============================================================================

/// Remote on another host: every tool fails before touching the API.
#[tokio::test]
async fn scenario_foreign_remote_makes_no_api_calls() {
    let fixture = GitFixture::with_origin("https://gitlab.com/acme/widgets.git", "main");
    let api = MockServer::start();
    let mocks = ActionsMocks::ci(&api);
    let ctx = context_for(&fixture, &api);

    let outputs = [
        ("triggering workflow", trigger_workflow(&ctx).await),
        ("getting logs", get_logs(&ctx).await),
        ("re-running workflow", rerun_workflow(&ctx).await),
        ("summarizing logs", summarize_logs(&ctx).await),
    ];

    for (action, output) in outputs {
        assert_eq!(
            failure_text(output),
            format!("Error {action}: Git context not detected. Are you in a GitHub repo?")
        );
    }
    mocks.workflows.assert_hits(0);
    mocks.runs.assert_hits(0);
    mocks.logs.assert_hits(0);
    mocks.dispatch.assert_hits(0);
    mocks.rerun.assert_hits(0);
}

// =============================================================================
// Scenario: repository without workflows
// =============================================================================

/// Empty workflow list: the failure reaches every tool, nothing deeper runs.
#[tokio::test]
async fn scenario_empty_workflow_list_stops_every_tool() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let mocks = ActionsMocks::install(&api, &[]);
    let ctx = context_for(&fixture, &api);

    let outputs = [
        trigger_workflow(&ctx).await,
        get_logs(&ctx).await,
        rerun_workflow(&ctx).await,
        summarize_logs(&ctx).await,
    ];

    for output in outputs {
        assert!(failure_text(output).ends_with(": No workflows found in acme/widgets"));
    }
    mocks.workflows.assert_hits(4);
    mocks.runs.assert_hits(0);
    mocks.logs.assert_hits(0);
    mocks.dispatch.assert_hits(0);
    mocks.rerun.assert_hits(0);
}

// =============================================================================
// Scenario: session caching against the real client
// =============================================================================

/// One session issues each request once, however often it is asked.
#[tokio::test]
async fn scenario_session_memoizes_real_requests() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let mocks = ActionsMocks::ci(&api);
    let client = client_for(&api);
    let source = GitContext::new(fixture.root());

    let mut session = Session::open(client.as_ref(), &source, WorkflowSelector::default()).unwrap();
    let first = session.latest_run().await.unwrap();
    let second = session.latest_run().await.unwrap();
    session.logs().await.unwrap();
    session.logs().await.unwrap();

    assert_eq!(first.id, 500);
    assert_eq!(first, second);
    mocks.workflows.assert_hits(1);
    mocks.runs.assert_hits(1);
    mocks.logs.assert_hits(1);
}

/// A failed workflow lookup is cached for the rest of the session.
#[tokio::test]
async fn scenario_session_does_not_retry_failures() {
    let fixture = GitFixture::with_origin("git@github.com:acme/widgets.git", "main");
    let api = MockServer::start();
    let workflows = api.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/actions/workflows");
        then.status(500).body("boom");
    });
    let client = client_for(&api);
    let coordinate = GitContext::new(fixture.root()).resolve().unwrap();

    let mut session = Session::new(client.as_ref(), coordinate, WorkflowSelector::default());
    let first = session.workflow().await.unwrap_err();
    let second = session.logs().await.unwrap_err();

    assert!(first.same_failure(&second));
    assert_eq!(first.provider().and_then(|e| e.status()), Some(500));
    workflows.assert_hits(1);
}
