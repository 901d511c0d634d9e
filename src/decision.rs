/// Operator choice at a batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// `G`: run another batch.
    Continue,
    /// `E`: clean up and stop.
    Terminate,
    /// Anything else. Handled like [`Decision::Terminate`] after a warning.
    Invalid,
}

impl Decision {
    pub fn continues(self) -> bool {
        matches!(self, Decision::Continue)
    }
}

/// Interpret one line of operator input, ignoring case and surrounding
/// whitespace.
pub fn parse_decision(input: &str) -> Decision {
    match input.trim().to_ascii_uppercase().as_str() {
        "G" => Decision::Continue,
        "E" => Decision::Terminate,
        _ => Decision::Invalid,
    }
}
