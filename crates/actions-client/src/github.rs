//! reqwest-backed GitHub Actions client

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::ActionsApi;
use crate::models::{
    Acknowledgement, LogBundle, RunList, Workflow, WorkflowList, WorkflowRun, WorkflowSelector,
    select_workflow,
};
use crate::{ClientConfig, Error, Result};

/// Longest provider error body kept in [`Error::Status`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// GitHub Actions client.
///
/// Cloning is cheap and shares the underlying connection pool. The client
/// never mutates its configuration after construction.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubClient {
    /// Build a client with headers and timeout fixed from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = config.token.as_deref() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| Error::InvalidToken)?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn repo_url(&self, owner: &str, repo: &str, rest: &str) -> String {
        format!("{}/repos/{}/{}/actions/{}", self.api_base, owner, repo, rest)
    }

    /// Send a request, mapping transport failures and non-2xx statuses.
    async fn execute(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|source| Error::Transport { operation, source })?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "GitHub response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Status {
            operation,
            status: status.as_u16(),
            body: truncate_for_error(body.trim(), MAX_ERROR_BODY_CHARS),
        })
    }

    async fn read_body(operation: &'static str, response: reqwest::Response) -> Result<Bytes> {
        response
            .bytes()
            .await
            .map_err(|source| Error::Transport { operation, source })
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = self.execute(operation, request).await?;
        let body = Self::read_body(operation, response).await?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode { operation, source })
    }

    async fn request_ack(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Acknowledgement> {
        let response = self.execute(operation, request).await?;
        let status = response.status().as_u16();
        let body = Self::read_body(operation, response).await?;
        Ok(Acknowledgement::from_response(status, &body))
    }
}

#[async_trait]
impl ActionsApi for GithubClient {
    async fn resolve_workflow(
        &self,
        owner: &str,
        repo: &str,
        selector: &WorkflowSelector,
    ) -> Result<Workflow> {
        let request = self
            .http
            .get(self.repo_url(owner, repo, "workflows"))
            .query(&[("per_page", "100")]);
        let list: WorkflowList = self.request_json("list workflows", request).await?;

        let workflow =
            select_workflow(&list.workflows, selector).ok_or_else(|| Error::NoWorkflows {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })?;

        tracing::debug!(
            owner,
            repo,
            workflow_id = workflow.id,
            workflow = %workflow.name,
            "Resolved workflow"
        );
        Ok(workflow.clone())
    }

    async fn resolve_latest_run(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        workflow_id: Option<u64>,
    ) -> Result<WorkflowRun> {
        let url = match workflow_id {
            Some(id) => self.repo_url(owner, repo, &format!("workflows/{id}/runs")),
            None => self.repo_url(owner, repo, "runs"),
        };
        let mut request = self.http.get(url).query(&[("per_page", "1")]);
        if let Some(branch) = branch {
            request = request.query(&[("branch", branch)]);
        }

        let list: RunList = self.request_json("list workflow runs", request).await?;
        let run = list
            .workflow_runs
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoRuns {
                owner: owner.to_string(),
                repo: repo.to_string(),
                branch: branch.map(str::to_string),
            })?;

        tracing::debug!(owner, repo, run_id = run.id, status = ?run.status, "Resolved latest run");
        Ok(run)
    }

    async fn fetch_logs(&self, owner: &str, repo: &str, run_id: u64) -> Result<LogBundle> {
        let operation = "download run logs";
        let request = self
            .http
            .get(self.repo_url(owner, repo, &format!("runs/{run_id}/logs")));
        let response = self.execute(operation, request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = Self::read_body(operation, response).await?;

        tracing::debug!(owner, repo, run_id, bytes = bytes.len(), "Fetched run logs");
        Ok(LogBundle::new(bytes, content_type))
    }

    async fn trigger_run(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        branch: &str,
    ) -> Result<Acknowledgement> {
        let request = self
            .http
            .post(self.repo_url(
                owner,
                repo,
                &format!("workflows/{workflow_id}/dispatches"),
            ))
            .json(&json!({ "ref": branch }));
        let ack = self.request_ack("dispatch workflow", request).await?;

        tracing::info!(owner, repo, workflow_id, branch, "Dispatched workflow run");
        Ok(ack)
    }

    async fn rerun_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<Acknowledgement> {
        let request = self
            .http
            .post(self.repo_url(owner, repo, &format!("runs/{run_id}/rerun")));
        let ack = self.request_ack("rerun workflow run", request).await?;

        tracing::info!(owner, repo, run_id, "Requested workflow rerun");
        Ok(ack)
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut.
fn truncate_for_error(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
