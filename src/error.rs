use thiserror::Error;

/// Parse errors reported by the walker and everything layered on it.
///
/// The two kinds are a first-class part of the contract: `Incomplete` means
/// the input is a prefix of something that could still become valid JSON,
/// `Invalid` means no amount of further input can fix it. Clients reading
/// from a stream retry on `Incomplete` and bail on `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JsonError {
    /// Syntax error: unexpected token, control character inside a string,
    /// malformed escape or number.
    #[error("invalid JSON")]
    Invalid,
    /// The input ended in the middle of a token, escape, or container.
    #[error("incomplete JSON")]
    Incomplete,
}

/// Errors from the file helpers, which mix parsing and I/O.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
