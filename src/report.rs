use crate::strip::{ProcessingOutcome, StripError};
use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: ProcessingOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
}

impl FileReport {
    pub fn success(path: &Path, backup: Option<PathBuf>) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome: ProcessingOutcome::Success,
            error: None,
            backup,
        }
    }

    pub fn failure(path: &Path, error: &StripError, backup: Option<PathBuf>) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome: error.outcome(),
            error: Some(error.to_string()),
            backup,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == ProcessingOutcome::Success
    }
}

/// Per-file outcomes of one run, in processing order.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub target: PathBuf,
    pub recursive: bool,
    pub succeeded: usize,
    pub total: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(target: &Path, recursive: bool) -> Self {
        Self {
            target: target.to_path_buf(),
            recursive,
            succeeded: 0,
            total: 0,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: FileReport) {
        if file.succeeded() {
            self.succeeded += 1;
        }
        self.total += 1;
        self.files.push(file);
    }

    pub fn summary_line(&self) -> String {
        format!(
            "📊 Successfully processed: {}/{}",
            self.succeeded, self.total
        )
    }

    /// Table of every file that was skipped or failed, `None` if all succeeded.
    pub fn failure_table(&self) -> Option<Table> {
        let failures: Vec<&FileReport> = self.files.iter().filter(|f| !f.succeeded()).collect();
        if failures.is_empty() {
            return None;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["File", "Outcome", "Reason"]);
        for file in failures {
            table.add_row(vec![
                file.path.display().to_string(),
                outcome_label(file.outcome).to_string(),
                file.error
                    .as_deref()
                    .map(last_line)
                    .unwrap_or("-")
                    .to_string(),
            ]);
        }
        Some(table)
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to '{}'", path.display()))?;
        println!("✅ Wrote report to {}", path.display());
        Ok(())
    }
}

fn outcome_label(outcome: ProcessingOutcome) -> &'static str {
    match outcome {
        ProcessingOutcome::Success => "stripped",
        ProcessingOutcome::SkippedUnsupported => "skipped (unsupported)",
        ProcessingOutcome::SkippedMissing => "skipped (missing)",
        ProcessingOutcome::Failed => "failed",
    }
}

// ffmpeg diagnostics run over many lines; the last one names the problem.
fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or(text)
}
