use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Outcome of comparing an original with its round-tripped copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub matched: bool,
    pub original_size: u64,
    pub compressed_size: u64,
}

/// Compare `input` with `decompressed` and collect the diagnostic sizes.
///
/// Both files are read in full; equality is all-or-nothing. Any read error is
/// returned to the caller untouched.
pub fn verify(input: &Path, compressed: &Path, decompressed: &Path) -> Result<ComparisonResult> {
    let original_size = fs::metadata(input)?.len();
    let compressed_size = fs::metadata(compressed)?.len();

    let original = fs::read(input)?;
    let roundtripped = fs::read(decompressed)?;

    Ok(ComparisonResult {
        matched: original == roundtripped,
        original_size,
        compressed_size,
    })
}
