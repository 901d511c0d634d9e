//! Synthesis of repetitive, randomly sized test inputs.
//!
//! Every case is a short alphanumeric base pattern repeated until the drawn
//! size is reached, then truncated to exactly that many bytes.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, MAX_PATTERN_LEN, MIN_PATTERN_LEN};
use crate::error::Result;
use crate::session::SessionState;

/// One synthesized input together with the paths its round trip will use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub index: u64,
    pub input_path: PathBuf,
    pub compressed_path: PathBuf,
    pub decompressed_path: PathBuf,
    /// Exact byte length of the written content.
    pub size: usize,
    pub pattern_length: usize,
    pub pattern: String,
}

/// Artifact paths for case `index` inside `dir`.
pub fn case_paths(dir: &Path, index: u64) -> (PathBuf, PathBuf, PathBuf) {
    (
        dir.join(format!("testcase_{index}.txt")),
        dir.join(format!("testcase_{index}.huff")),
        dir.join(format!("testcase_{index}_decompressed.txt")),
    )
}

/// Draw a base pattern of 10..=100 alphanumeric characters.
pub fn random_pattern<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(MIN_PATTERN_LEN..=MAX_PATTERN_LEN);
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Repeat `pattern` and truncate the result to exactly `size` bytes.
///
/// `pattern` must be ASCII so byte truncation never splits a character.
pub fn build_content(pattern: &str, size: usize) -> String {
    debug_assert!(!pattern.is_empty() && pattern.is_ascii());
    let repetitions = size / pattern.len() + 1;
    let mut content = pattern.repeat(repetitions);
    content.truncate(size);
    content
}

/// Synthesize case `index`, write it under the configured work directory and
/// register all of its artifact paths with the session.
pub fn generate<R: Rng>(
    index: u64,
    config: &Config,
    session: &mut SessionState,
    rng: &mut R,
) -> Result<TestCase> {
    let size = rng.gen_range(config.min_size..=config.max_size);
    let pattern = random_pattern(rng);
    let content = build_content(&pattern, size);

    let (input_path, compressed_path, decompressed_path) = case_paths(&config.work_dir, index);
    session.track(&input_path);
    session.track(&compressed_path);
    session.track(&decompressed_path);
    fs::write(&input_path, content.as_bytes())?;

    tracing::debug!(index, size, pattern_length = pattern.len(), "generated test case");

    Ok(TestCase {
        index,
        input_path,
        compressed_path,
        decompressed_path,
        size,
        pattern_length: pattern.len(),
        pattern,
    })
}
