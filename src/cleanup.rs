//! Best-effort removal of every artifact a session produced.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::session::SessionState;

/// What happened to each tracked path during cleanup.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    /// Already gone before we got to them.
    pub missing: Vec<PathBuf>,
    /// Paths that could not be deleted, with the error text.
    pub failed: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every tracked path and empty the session ledger.
///
/// Never stops early: a failed deletion is logged and recorded, then the
/// remaining paths are still attempted.
pub fn cleanup(session: &mut SessionState) -> CleanupReport {
    let mut report = CleanupReport::default();
    for path in session.take_tracked() {
        match fs::remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => report.missing.push(path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to delete artifact");
                report.failed.push((path, e.to_string()));
            }
        }
    }
    tracing::info!(
        removed = report.removed.len(),
        missing = report.missing.len(),
        failed = report.failed.len(),
        "cleanup finished"
    );
    report
}
