//! Error types for the execution module.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller may not act for this account")]
    Unauthorized,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Unsupported operation: only plain calls may be queued")]
    UnsupportedOperation,

    #[error("Invalid request id length: expected 32 bytes, got {got}")]
    InvalidRequestIdLength { got: usize },

    // ========================================================================
    // Queue State Errors
    // ========================================================================

    #[error("Request not found: {request_id}")]
    RequestNotFound { request_id: String },

    #[error("Request already executed: {request_id}")]
    AlreadyExecuted { request_id: String },

    #[error("Execution delay not elapsed: {remaining_seconds} seconds remaining")]
    DelayNotElapsed { remaining_seconds: u64 },

    // ========================================================================
    // Account Invocation Errors
    // ========================================================================

    #[error("Account execution failed: {reason}")]
    UnderlyingCallFailed { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
