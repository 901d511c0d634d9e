//! Per-case report lines and batch/session summaries.

use serde::Serialize;
use std::fmt;

use crate::cleanup::CleanupReport;

/// How a single round trip ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    /// Tool succeeded both ways but the content differs.
    Mismatch,
    CompressFailed { exit_code: i32, stderr: String },
    DecompressFailed { exit_code: i32, stderr: String },
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub index: u64,
    pub original_size: u64,
    /// Unknown when the tool failed before a comparison was made.
    pub compressed_size: Option<u64>,
    pub outcome: CaseOutcome,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.outcome.passed()
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test {:02} | Original: {:8} bytes | ", self.index, self.original_size)?;
        match &self.outcome {
            CaseOutcome::Passed | CaseOutcome::Mismatch => {
                let compressed = self.compressed_size.unwrap_or(0);
                write!(f, "Compressed: {:8} bytes | ", compressed)?;
            }
            CaseOutcome::CompressFailed { exit_code, stderr } => {
                write!(f, "compression failed (exit {exit_code}): {} | ", stderr.trim())?;
            }
            CaseOutcome::DecompressFailed { exit_code, stderr } => {
                write!(f, "decompression failed (exit {exit_code}): {} | ", stderr.trim())?;
            }
        }
        f.write_str(if self.passed() { "PASS" } else { "FAIL" })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub batch_number: u64,
    pub successes: usize,
    pub total: usize,
    pub cases: Vec<CaseReport>,
}

impl BatchSummary {
    pub fn new(batch_number: u64, cases: Vec<CaseReport>) -> Self {
        Self {
            batch_number,
            successes: cases.iter().filter(|c| c.passed()).count(),
            total: cases.len(),
            cases,
        }
    }

    pub fn failures(&self) -> usize {
        self.total - self.successes
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Batch {} complete: {} of {} tests passed.",
            self.batch_number, self.successes, self.total
        )
    }
}

/// Everything a finished session did, for `--json` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub batches: Vec<BatchSummary>,
    pub total_cases: usize,
    pub total_passed: usize,
    pub cleanup: CleanupReport,
}

impl SessionSummary {
    pub fn record(&mut self, batch: BatchSummary) {
        self.total_cases += batch.total;
        self.total_passed += batch.successes;
        self.batches.push(batch);
    }

    pub fn all_passed(&self) -> bool {
        self.total_cases == self.total_passed
    }
}
