//! Batch orchestration and the interactive session loop.
//!
//! A session alternates between running a batch and asking the operator
//! whether to go on:
//!
//! ```text
//! RunningBatch -> AwaitingDecision -> RunningBatch      (G)
//!                                  -> Cleanup -> Terminated (E / anything else)
//! ```
//!
//! Per-case tool failures and content mismatches are recorded and the batch
//! carries on. I/O errors while generating or verifying abort the session
//! without cleanup.

use rand::Rng;
use std::io::{BufRead, Write};

use crate::cleanup::cleanup;
use crate::config::Config;
use crate::decision::{parse_decision, Decision};
use crate::error::Result;
use crate::generator::generate;
use crate::process::{Invocation, Mode, ProcessDriver};
use crate::report::{BatchSummary, CaseOutcome, CaseReport, SessionSummary};
use crate::session::SessionState;
use crate::verifier::verify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    RunningBatch,
    AwaitingDecision,
    Cleanup,
    Terminated,
}

pub struct Harness<D, R> {
    config: Config,
    session: SessionState,
    driver: D,
    rng: R,
}

impl<D: ProcessDriver, R: Rng> Harness<D, R> {
    /// Validate `config` and start a fresh session at batch 1.
    pub fn new(config: Config, driver: D, rng: R) -> Result<Self> {
        config.validate()?;
        let session = SessionState::new(config.batch_size);
        Ok(Self {
            config,
            session,
            driver,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Generate case `index` and push it through compress, decompress and
    /// verification.
    pub fn run_case(&mut self, index: u64) -> Result<CaseReport> {
        let case = generate(index, &self.config, &mut self.session, &mut self.rng)?;
        let original_size = case.size as u64;

        let compress = self.driver.execute(&Invocation::tool(
            &self.config.tool,
            Mode::Compress,
            &case.input_path,
            &case.compressed_path,
        ));
        if !compress.success() {
            return Ok(CaseReport {
                index,
                original_size,
                compressed_size: None,
                outcome: CaseOutcome::CompressFailed {
                    exit_code: compress.exit_code,
                    stderr: compress.stderr,
                },
            });
        }

        let decompress = self.driver.execute(&Invocation::tool(
            &self.config.tool,
            Mode::Decompress,
            &case.compressed_path,
            &case.decompressed_path,
        ));
        if !decompress.success() {
            return Ok(CaseReport {
                index,
                original_size,
                compressed_size: None,
                outcome: CaseOutcome::DecompressFailed {
                    exit_code: decompress.exit_code,
                    stderr: decompress.stderr,
                },
            });
        }

        let comparison = verify(&case.input_path, &case.compressed_path, &case.decompressed_path)?;
        Ok(CaseReport {
            index,
            original_size: comparison.original_size,
            compressed_size: Some(comparison.compressed_size),
            outcome: if comparison.matched {
                CaseOutcome::Passed
            } else {
                CaseOutcome::Mismatch
            },
        })
    }

    /// Run one full batch, writing a line per case and the batch summary.
    pub fn run_batch<W: Write>(&mut self, out: &mut W) -> Result<BatchSummary> {
        let batch_number = self.session.batch_number();
        let batch_size = self.session.batch_size();
        writeln!(out, "\n=== Batch {batch_number}: {batch_size} test cases ===")?;

        let mut cases = Vec::with_capacity(batch_size);
        for i in 1..=batch_size {
            let report = self.run_case(self.session.global_index(i))?;
            writeln!(out, "{report}")?;
            out.flush()?;
            cases.push(report);
        }

        let summary = BatchSummary::new(batch_number, cases);
        writeln!(out, "\n{summary}")?;
        tracing::info!(
            batch = batch_number,
            passed = summary.successes,
            failed = summary.failures(),
            "batch finished"
        );
        Ok(summary)
    }

    /// Prompt the operator and read one line. End of input counts as invalid.
    pub fn prompt<I: BufRead, W: Write>(&mut self, input: &mut I, out: &mut W) -> Result<Decision> {
        write!(
            out,
            "\nEnter 'E' to exit and delete all generated files, or 'G' to generate {} more cases: ",
            self.session.batch_size()
        )?;
        out.flush()?;
        let mut line = Vec::new();
        input.read_until(b'\n', &mut line)?;
        Ok(parse_decision(&String::from_utf8_lossy(&line)))
    }

    /// Drive batches until the operator stops, then clean up.
    pub fn run<I: BufRead, W: Write>(&mut self, input: &mut I, out: &mut W) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut phase = Phase::RunningBatch;
        loop {
            phase = match phase {
                Phase::RunningBatch => {
                    summary.record(self.run_batch(out)?);
                    Phase::AwaitingDecision
                }
                Phase::AwaitingDecision => match self.prompt(input, out)? {
                    Decision::Continue => {
                        self.session.advance_batch();
                        Phase::RunningBatch
                    }
                    Decision::Terminate => Phase::Cleanup,
                    Decision::Invalid => {
                        writeln!(out, "Invalid option. Exiting and deleting files.")?;
                        Phase::Cleanup
                    }
                },
                Phase::Cleanup => {
                    let report = cleanup(&mut self.session);
                    for (path, err) in &report.failed {
                        writeln!(out, "Error deleting {}: {err}", path.display())?;
                    }
                    if report.is_clean() {
                        writeln!(out, "All generated files were deleted. Exiting...")?;
                    } else {
                        writeln!(out, "Some generated files could not be deleted. Exiting...")?;
                    }
                    summary.cleanup = report;
                    Phase::Terminated
                }
                Phase::Terminated => break,
            };
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ExecutionOutcome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    /// Stand-in tool: copies input to output, optionally failing or
    /// corrupting one of the two modes.
    #[derive(Default)]
    struct CopyDriver {
        fail_compress: bool,
        fail_decompress: bool,
        corrupt: bool,
        calls: Vec<Invocation>,
    }

    impl ProcessDriver for CopyDriver {
        fn execute(&mut self, invocation: &Invocation) -> ExecutionOutcome {
            self.calls.push(invocation.clone());
            let mode = invocation.mode();
            let failing = match mode {
                Some(Mode::Compress) => self.fail_compress,
                Some(Mode::Decompress) => self.fail_decompress,
                None => true,
            };
            if failing {
                return ExecutionOutcome {
                    exit_code: 1,
                    stdout: String::new(),
                    stderr: "stub failure\n".into(),
                };
            }
            let input = Path::new(&invocation.args[1]);
            let output = Path::new(&invocation.args[2]);
            let mut data = fs::read(input).unwrap();
            if self.corrupt && mode == Some(Mode::Decompress) {
                data.pop();
            }
            fs::write(output, data).unwrap();
            ExecutionOutcome {
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            }
        }
    }

    fn harness(dir: &Path, driver: CopyDriver) -> Harness<CopyDriver, StdRng> {
        let config = Config {
            tool: PathBuf::from("./huffman"),
            work_dir: dir.to_path_buf(),
            max_size: 2048,
            ..Config::default()
        };
        Harness::new(config, driver, StdRng::seed_from_u64(1234)).unwrap()
    }

    #[test]
    fn correct_tool_passes_every_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), CopyDriver::default());
        let mut out = Vec::new();
        let batch = h.run_batch(&mut out).unwrap();
        assert_eq!(batch.successes, 10);
        assert_eq!(batch.total, 10);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("| PASS").count(), 10);
        assert!(text.contains("Batch 1 complete: 10 of 10 tests passed."));
        assert!(text.contains("Test 01 |"));
        assert!(text.contains("Test 10 |"));
    }

    #[test]
    fn invocations_follow_tool_contract() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), CopyDriver::default());
        h.run_case(1).unwrap();
        let calls = &h.driver().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            Invocation::tool(
                Path::new("./huffman"),
                Mode::Compress,
                &dir.path().join("testcase_1.txt"),
                &dir.path().join("testcase_1.huff"),
            )
        );
        assert_eq!(
            calls[1],
            Invocation::tool(
                Path::new("./huffman"),
                Mode::Decompress,
                &dir.path().join("testcase_1.huff"),
                &dir.path().join("testcase_1_decompressed.txt"),
            )
        );
    }

    #[test]
    fn compress_failure_skips_decompress_and_batch_completes() {
        let dir = tempfile::tempdir().unwrap();
        let driver = CopyDriver {
            fail_compress: true,
            ..CopyDriver::default()
        };
        let mut h = harness(dir.path(), driver);
        let mut out = Vec::new();
        let batch = h.run_batch(&mut out).unwrap();
        assert_eq!(batch.successes, 0);
        assert_eq!(batch.total, 10);
        assert!(batch
            .cases
            .iter()
            .all(|c| matches!(c.outcome, CaseOutcome::CompressFailed { .. })));
        assert!(h.driver().calls.iter().all(|c| c.mode() == Some(Mode::Compress)));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("compression failed (exit 1): stub failure").count(), 10);
    }

    #[test]
    fn decompress_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let driver = CopyDriver {
            fail_decompress: true,
            ..CopyDriver::default()
        };
        let mut h = harness(dir.path(), driver);
        let report = h.run_case(1).unwrap();
        assert!(matches!(report.outcome, CaseOutcome::DecompressFailed { exit_code: 1, .. }));
    }

    #[test]
    fn corrupted_roundtrip_is_a_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let driver = CopyDriver {
            corrupt: true,
            ..CopyDriver::default()
        };
        let mut h = harness(dir.path(), driver);
        let report = h.run_case(5).unwrap();
        assert_eq!(report.outcome, CaseOutcome::Mismatch);
        assert!(report.to_string().ends_with("FAIL"));
    }

    #[test]
    fn continue_then_exit_runs_two_batches_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), CopyDriver::default());
        let mut input = Cursor::new("g\n E \n");
        let mut out = Vec::new();
        let summary = h.run(&mut input, &mut out).unwrap();

        assert_eq!(summary.batches.len(), 2);
        assert_eq!(summary.total_cases, 20);
        assert!(summary.all_passed());
        let indices: Vec<u64> = summary
            .batches
            .iter()
            .flat_map(|b| b.cases.iter().map(|c| c.index))
            .collect();
        assert_eq!(indices, (1..=20).collect::<Vec<_>>());

        assert_eq!(summary.cleanup.removed.len(), 60);
        assert!(summary.cleanup.is_clean());
        assert_eq!(h.session().tracked_len(), 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Batch 2 complete: 10 of 10 tests passed."));
        assert!(text.contains("All generated files were deleted."));
    }

    #[test]
    fn invalid_input_terminates_with_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), CopyDriver::default());
        let mut input = Cursor::new("maybe\n");
        let mut out = Vec::new();
        let summary = h.run(&mut input, &mut out).unwrap();

        assert_eq!(summary.batches.len(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid option."));
    }

    #[test]
    fn end_of_input_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), CopyDriver::default());
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        let summary = h.run(&mut input, &mut out).unwrap();
        assert_eq!(summary.batches.len(), 1);
        assert_eq!(h.session().tracked_len(), 0);
    }

    #[test]
    fn failed_cases_still_get_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let driver = CopyDriver {
            fail_compress: true,
            ..CopyDriver::default()
        };
        let mut h = harness(dir.path(), driver);
        let summary = h.run(&mut Cursor::new("E\n"), &mut Vec::new()).unwrap();
        assert_eq!(summary.total_passed, 0);
        // Only the inputs existed; the compressed and decompressed paths never did.
        assert_eq!(summary.cleanup.removed.len(), 10);
        assert_eq!(summary.cleanup.missing.len(), 20);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn generation_error_aborts_without_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            work_dir: dir.path().join("does-not-exist"),
            max_size: 512,
            ..Config::default()
        };
        let mut h = Harness::new(config, CopyDriver::default(), StdRng::seed_from_u64(3)).unwrap();
        let result = h.run(&mut Cursor::new("E\n"), &mut Vec::new());
        assert!(result.is_err());
        assert_eq!(h.session().tracked_len(), 3);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config {
            batch_size: 0,
            ..Config::default()
        };
        assert!(Harness::new(config, CopyDriver::default(), StdRng::seed_from_u64(0)).is_err());
    }
}
