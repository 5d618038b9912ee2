//! # Panel Error Types
//!
//! Synchronous failures of panel operations.
//!
//! ## Error Categories
//!
//! - **InvalidOperation**: a mutation violates a state precondition (cancelling a listing
//!   that is not open, accepting one's own listing). Detected before anything is submitted.
//! - **SubmissionRejected**: the contract refused the call before producing a transaction
//!   handle (wallet rejection, gas estimation failure). No log entry is created.
//! - **Unavailable**: a value was looked up from a provider that holds nothing.
//! - **State**: a collaborator query needed to check a precondition failed.
//!
//! A transaction that fails on chain is *not* an error value: it is recorded on the
//! transaction record (`TxStatus::Failed` plus the detail) and surfaces through the log.
//!
//! ```rust
//! use panel::core::error::PanelError;
//!
//! let err = PanelError::InvalidOperation("listing #4 is filled".to_string());
//! assert_eq!(err.to_string(), "Invalid operation: listing #4 is filled");
//! ```

use thiserror::Error;

use crate::core::service::ContractError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Precondition violated; nothing was submitted and no state changed.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The contract call was refused before a transaction handle existed.
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// Looked up a value from a provider that holds none.
    #[error("{0} is not available in this panel")]
    Unavailable(&'static str),

    /// A read needed to validate the request failed.
    #[error("State error: {0}")]
    State(String),
}

/// Convenience type alias for `Result<T, PanelError>`.
pub type Result<T> = std::result::Result<T, PanelError>;

impl PanelError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PanelError::InvalidOperation(msg.into())
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, PanelError::InvalidOperation(_))
    }
}

impl From<ContractError> for PanelError {
    fn from(err: ContractError) -> Self {
        PanelError::SubmissionRejected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_becomes_submission_rejected() {
        let err: PanelError = ContractError::InsufficientFunds.into();
        assert_eq!(
            err,
            PanelError::SubmissionRejected("insufficient funds".to_string())
        );
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(
            PanelError::Unavailable("signer").to_string(),
            "signer is not available in this panel"
        );
    }
}
