//! GitHub Actions REST payload builders.
//!
//! Shapes follow the `list workflows` and `list workflow runs` responses,
//! trimmed to the fields the client reads plus a few realistic extras.

use std::io::{Cursor, Write};

use serde_json::{Value, json};
use zip::write::SimpleFileOptions;

/// One entry of the `workflows` array.
pub fn workflow(id: u64, name: &str, path: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("W_{id}"),
        "name": name,
        "path": path,
        "state": "active",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// A `list workflows` response body.
pub fn workflow_list(workflows: &[Value]) -> Value {
    json!({
        "total_count": workflows.len(),
        "workflows": workflows
    })
}

/// One entry of the `workflow_runs` array.
pub fn workflow_run(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "name": "CI",
        "status": status,
        "conclusion": if status == "completed" { Value::from("success") } else { Value::Null },
        "head_branch": "main",
        "head_sha": "0123456789abcdef0123456789abcdef01234567",
        "event": "push",
        "run_number": id % 1000,
        "workflow_id": 1,
        "html_url": format!("https://github.com/acme/widgets/actions/runs/{id}"),
        "created_at": "2024-01-02T10:00:00Z",
        "updated_at": "2024-01-02T10:05:00Z"
    })
}

/// A `list workflow runs` response body.
pub fn run_list(runs: &[Value]) -> Value {
    json!({
        "total_count": runs.len(),
        "workflow_runs": runs
    })
}

/// A run log download body: a zip with one text file per step.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn log_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, text) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start archive entry");
        writer
            .write_all(text.as_bytes())
            .expect("Failed to write archive entry");
    }
    writer
        .finish()
        .expect("Failed to finish archive")
        .into_inner()
}
