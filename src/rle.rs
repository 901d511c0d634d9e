//! Byte-oriented run-length codec backing the `rle_codec` binary.
//!
//! The stream is a sequence of `(count, byte)` pairs with `1 <= count <= 255`.
//! It is deliberately tiny: its only job is to be a known-good tool the
//! harness can drive end to end.

use crate::error::{HarnessError, Result};

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = u8::MAX as usize;

pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 2 + 2);
    let mut iter = data.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        let mut run = 1usize;
        while run < MAX_RUN && iter.peek() == Some(&byte) {
            iter.next();
            run += 1;
        }
        out.push(run as u8);
        out.push(byte);
    }
    out
}

pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % 2 != 0 {
        return Err(HarnessError::Decode(format!(
            "stream length {} is not a whole number of pairs",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(data.len());
    for (i, pair) in data.chunks_exact(2).enumerate() {
        let (count, byte) = (pair[0], pair[1]);
        if count == 0 {
            return Err(HarnessError::Decode(format!("zero-length run at pair {i}")));
        }
        out.extend(std::iter::repeat(byte).take(count as usize));
    }
    Ok(out)
}
