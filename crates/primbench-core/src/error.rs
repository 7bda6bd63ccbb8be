use thiserror::Error;

pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    pub fn invalid_length(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            what,
            expected,
            actual,
        }
    }

    /// Check `actual == expected`, naming the offending input on mismatch.
    pub fn check_length(what: &'static str, expected: usize, actual: usize) -> BenchResult<()> {
        if actual == expected {
            Ok(())
        } else {
            Err(Self::invalid_length(what, expected, actual))
        }
    }
}
