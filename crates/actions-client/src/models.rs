//! GitHub Actions data types

use std::borrow::Cow;
use std::io::{Cursor, Read};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workflow definition as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkflowList {
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

/// One execution of a workflow with the metadata the provider reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub run_number: Option<u64>,
    #[serde(default)]
    pub workflow_id: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunList {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Raw log payload of a run.
///
/// GitHub serves run logs as a zip archive; test doubles and proxies may
/// serve plain text. An empty payload means "no logs yet", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBundle {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl LogBundle {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    /// True when there is no log content, or only whitespace.
    ///
    /// An archive counts as empty when none of its entries has content.
    pub fn is_empty(&self) -> bool {
        if self.is_archive() {
            return match decode_archive(&self.bytes) {
                Some(text) => text.is_empty(),
                None => self.bytes.is_empty(),
            };
        }
        self.bytes.iter().all(u8::is_ascii_whitespace)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is a zip archive rather than text.
    pub fn is_archive(&self) -> bool {
        let declared = self
            .content_type
            .as_deref()
            .map(|ct| ct.contains("zip") || ct.contains("octet-stream"))
            .unwrap_or(false);
        declared || self.bytes.starts_with(b"PK\x03\x04")
    }

    /// Log text for display.
    ///
    /// Archives are expanded entry by entry in name order, each under a
    /// `== <entry name> ==` header. Payloads that fail to decode are
    /// described instead.
    pub fn text(&self) -> Cow<'_, str> {
        if !self.is_archive() {
            return String::from_utf8_lossy(&self.bytes);
        }
        match decode_archive(&self.bytes) {
            Some(text) => Cow::Owned(text),
            None => Cow::Owned(format!(
                "[binary log archive: {} bytes, content-type {}]",
                self.bytes.len(),
                self.content_type.as_deref().unwrap_or("unknown")
            )),
        }
    }
}

/// Concatenate the non-blank file entries of a zip archive, sorted by name.
///
/// Returns `None` when `bytes` is not a readable archive.
fn decode_archive(bytes: &[u8]) -> Option<String> {
    let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            tracing::debug!(error = %e, "Log payload is not a readable zip archive");
            return None;
        }
    };

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).ok()?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut content = Vec::new();
        if let Err(e) = entry.read_to_end(&mut content) {
            tracing::debug!(entry = %name, error = %e, "Failed to read log archive entry");
            return None;
        }
        let text = String::from_utf8_lossy(&content).trim_end().to_string();
        if !text.trim().is_empty() {
            entries.push((name, text));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Some(
        entries
            .iter()
            .map(|(name, text)| format!("== {name} ==\n{text}\n"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Outcome of a dispatch or rerun request.
///
/// The provider usually answers 201/204 with no body; `body` is only set
/// when a JSON body was returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acknowledgement {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Acknowledgement {
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        // A body that is not JSON is still a successful acknowledgement
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            serde_json::from_slice(body).ok()
        };
        Self { status, body }
    }
}

/// Preference used to pick a workflow from the repository's list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowSelector {
    /// Exact display name, e.g. `CI`
    pub name: Option<String>,
    /// Exact definition path, e.g. `.github/workflows/ci.yml`
    pub path: Option<String>,
}

impl WorkflowSelector {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: None,
        }
    }

    pub fn by_path(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: Some(path.into()),
        }
    }
}

/// Pick a workflow: exact path match, then exact name match, then the first
/// listed workflow. Returns `None` only for an empty list.
pub fn select_workflow<'a>(
    workflows: &'a [Workflow],
    selector: &WorkflowSelector,
) -> Option<&'a Workflow> {
    let by_path = selector
        .path
        .as_deref()
        .and_then(|path| workflows.iter().find(|wf| wf.path == path));
    let by_name = || {
        selector
            .name
            .as_deref()
            .and_then(|name| workflows.iter().find(|wf| wf.name == name))
    };

    by_path.or_else(by_name).or_else(|| workflows.first())
}
