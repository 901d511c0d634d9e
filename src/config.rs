use std::path::PathBuf;

use crate::error::{HarnessError, Result};

/// Smallest test case the harness will synthesize.
pub const MIN_CASE_SIZE: usize = 256;
/// Largest test case the harness will synthesize (8 MiB).
pub const MAX_CASE_SIZE: usize = 8 * 1024 * 1024;
/// Shortest base pattern.
pub const MIN_PATTERN_LEN: usize = 10;
/// Longest base pattern.
pub const MAX_PATTERN_LEN: usize = 100;
/// Cases per batch before the operator is prompted.
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// External tool looked up next to the harness.
pub const DEFAULT_TOOL: &str = "./huffman";

/// Runtime configuration for a harness session.
#[derive(Debug, Clone)]
pub struct Config {
    /// External compression tool to drive.
    pub tool: PathBuf,
    /// Directory receiving every test artifact.
    pub work_dir: PathBuf,
    /// Number of cases per batch.
    pub batch_size: usize,
    /// Inclusive lower bound for the drawn case size.
    pub min_size: usize,
    /// Inclusive upper bound for the drawn case size.
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: PathBuf::from(DEFAULT_TOOL),
            work_dir: PathBuf::from("."),
            batch_size: DEFAULT_BATCH_SIZE,
            min_size: MIN_CASE_SIZE,
            max_size: MAX_CASE_SIZE,
        }
    }
}

impl Config {
    /// Check the size bounds and batch size.
    ///
    /// Narrowing the size range is allowed, widening it past
    /// [`MIN_CASE_SIZE`]..=[`MAX_CASE_SIZE`] is not.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(HarnessError::Config("batch size must be at least 1".into()));
        }
        if self.min_size < MIN_CASE_SIZE || self.max_size > MAX_CASE_SIZE {
            return Err(HarnessError::Config(format!(
                "case sizes must lie within {MIN_CASE_SIZE}..={MAX_CASE_SIZE} bytes"
            )));
        }
        if self.min_size > self.max_size {
            return Err(HarnessError::Config(format!(
                "min size {} exceeds max size {}",
                self.min_size, self.max_size
            )));
        }
        Ok(())
    }
}
