use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// Invalid harness configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed input handed to the reference codec.
    #[error("decode error: {0}")]
    Decode(String),

    /// Propagated I/O error. Fatal when raised while generating or verifying.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
