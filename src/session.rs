//! Per-process session state: the artifact ledger and the batch counter.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Everything a harness run has produced so far.
///
/// Paths are only ever added until [`crate::cleanup`] drains the set.
#[derive(Debug, Clone)]
pub struct SessionState {
    tracked: BTreeSet<PathBuf>,
    batch_number: u64,
    batch_size: usize,
}

impl SessionState {
    pub fn new(batch_size: usize) -> Self {
        Self {
            tracked: BTreeSet::new(),
            batch_number: 1,
            batch_size,
        }
    }

    pub fn batch_number(&self) -> u64 {
        self.batch_number
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of cases run by all earlier batches.
    pub fn global_index_offset(&self) -> u64 {
        (self.batch_number - 1) * self.batch_size as u64
    }

    /// Session-wide index of the `i`-th case (1-based) in the current batch.
    pub fn global_index(&self, i: usize) -> u64 {
        debug_assert!((1..=self.batch_size).contains(&i));
        self.global_index_offset() + i as u64
    }

    pub fn advance_batch(&mut self) {
        self.batch_number += 1;
    }

    /// Record an artifact for later deletion. Re-tracking a path is a no-op.
    pub fn track<P: AsRef<Path>>(&mut self, path: P) {
        self.tracked.insert(path.as_ref().to_path_buf());
    }

    pub fn tracked(&self) -> impl Iterator<Item = &Path> {
        self.tracked.iter().map(PathBuf::as_path)
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Hand the whole ledger over, leaving it empty.
    pub(crate) fn take_tracked(&mut self) -> BTreeSet<PathBuf> {
        std::mem::take(&mut self.tracked)
    }
}
