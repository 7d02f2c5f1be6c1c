//! Error types for parameter selection and chain identity.

use thiserror::Error;

/// Errors raised by the consensus-parameter core.
///
/// Everything except `GenesisIntegrity` is recoverable: it is surfaced to the
/// operator before any consensus-affecting action has been taken. A genesis
/// integrity failure must abort startup: a node that cannot reproduce its
/// own network's genesis cannot participate.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Malformed or out-of-range configuration input.
    #[error("invalid configuration for '{field}': {message}")]
    Config { field: &'static str, message: String },

    /// Unrecognized network identifier.
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    /// Unrecognized quorum role name.
    #[error("unknown quorum role '{0}'")]
    UnknownQuorumRole(String),

    /// Computed genesis identity does not match the embedded constants, or
    /// the nonce search space is exhausted.
    #[error("genesis integrity failure: {0}")]
    GenesisIntegrity(String),
}

impl ParamsError {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> ParamsError {
        ParamsError::Config {
            field,
            message: message.into(),
        }
    }
}

/// Result type for parameter operations.
pub type ParamsResult<T> = Result<T, ParamsError>;
