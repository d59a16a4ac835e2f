//! Error types for rewriting, parameter files and turtle interpretation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while editing, loading or saving an [`LSystem`](crate::LSystem).
#[derive(Error, Debug)]
pub enum LSystemError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("rule trigger {0:?} is outside the ASCII rule table")]
    InvalidTrigger(char),
    #[error("malformed rule {0:?}, expected `<char>:<successor>`")]
    MalformedRule(String),
    #[error("invalid turtle configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Recoverable faults hit while the turtle walks a symbol string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurtleError {
    #[error("`]` without a matching `[`")]
    BranchUnderflow,
    #[error("triangle buffer is full ({capacity} triangles)")]
    CapacityExceeded { capacity: usize },
}
