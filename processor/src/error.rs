//! Error types for the message processor.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: messages must be delivered by the router")]
    UnauthorizedRouter,

    #[error("Sender is not an approved originator: {sender}")]
    NotApproved { sender: String },

    // ========================================================================
    // Message Validation Errors
    // ========================================================================

    #[error("Message claims to originate from the local chain: selector {selector}")]
    SameSourceChain { selector: u64 },

    #[error("Message already processed: {message_id}")]
    DuplicateMessage { message_id: String },
}
