//! Round-trip correctness harness for external compression tools.
//!
//! The harness synthesizes repetitive text inputs, runs an external tool in
//! compress (`C`) and decompress (`D`) mode over each one, and checks that the
//! decompressed output matches the original. Cases run in fixed-size batches;
//! between batches the operator decides whether to continue or to stop and
//! delete every generated file.

pub mod cleanup;
pub mod config;
pub mod decision;
pub mod error;
pub mod generator;
pub mod harness;
pub mod io_utils;
pub mod process;
pub mod report;
pub mod rle;
pub mod session;
pub mod verifier;

pub use cleanup::{cleanup, CleanupReport};
pub use config::Config;
pub use decision::{parse_decision, Decision};
pub use error::{HarnessError, Result};
pub use generator::{build_content, generate, TestCase};
pub use harness::{Harness, Phase};
pub use process::{ExecutionOutcome, Invocation, Mode, ProcessDriver, SystemDriver};
pub use report::{BatchSummary, CaseOutcome, CaseReport, SessionSummary};
pub use session::SessionState;
pub use verifier::{verify, ComparisonResult};
