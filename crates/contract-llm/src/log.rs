//! Append-only prompt/response log
//!
//! Each entry is a single JSON line:
//! `{"timestamp": "...", "kind": "prompt", "model": "...", "content": "..."}`.
//! Write failures are reported through `tracing` and never fail the LLM call.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Kind of log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Prompt sent to the model
    Prompt,
    /// Raw text returned by the model
    Response,
    /// Failure reported by the provider
    Error,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    kind: LogKind,
    model: &'a str,
    content: &'a str,
}

/// File sink for prompts and responses
#[derive(Debug, Clone)]
pub struct LlmLog {
    path: PathBuf,
}

impl LlmLog {
    /// Log to the given file, creating it on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry
    pub async fn record(&self, kind: LogKind, model: &str, content: &str) {
        if let Err(e) = self.append(kind, model, content).await {
            warn!("Failed to write LLM log {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, kind: LogKind, model: &str, content: &str) -> std::io::Result<()> {
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind,
            model,
            content,
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}
