//! Message types for the message processor.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for approver management
    pub admin: String,
    /// Bridge transport endpoint allowed to deliver messages
    pub router: String,
    /// Execution module that receives forwarded requests
    pub execution_module: String,
    /// Chain selector of this deployment; messages claiming it as their
    /// source are rejected
    pub local_chain_selector: u64,
}

// ============================================================================
// Inbound Messages
// ============================================================================

/// A message delivered by the bridge transport.
#[cw_serde]
pub struct InboundMessage {
    /// Transport-assigned unique id
    pub message_id: Binary,
    /// Selector of the chain the message originated on
    pub source_chain_selector: u64,
    /// Encoded originator address on the source chain (UTF-8 address bytes)
    pub sender: Binary,
    /// Canonically encoded execution parameters
    pub payload: Binary,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Add an approved cross-chain originator
    ///
    /// Authorization: Admin only. Idempotent.
    AddApprover {
        /// Address to approve
        address: String,
    },

    /// Remove an approved cross-chain originator
    ///
    /// Authorization: Admin only. Idempotent.
    RemoveApprover {
        /// Address to revoke
        address: String,
    },

    /// Deliver a bridge message for validation and forwarding
    ///
    /// Authorization: router only
    ReceiveMessage {
        /// The delivered message
        message: InboundMessage,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Whether an address is an approved originator
    #[returns(IsApproverResponse)]
    IsApprover { address: String },

    /// All approved originators
    #[returns(ApproversResponse)]
    Approvers {},

    /// Whether a message id has already been forwarded
    #[returns(IsProcessedResponse)]
    IsProcessed { message_id: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub router: Addr,
    pub execution_module: Addr,
    pub local_chain_selector: u64,
}

#[cw_serde]
pub struct IsApproverResponse {
    pub is_approver: bool,
}

#[cw_serde]
pub struct ApproversResponse {
    pub approvers: Vec<Addr>,
}

#[cw_serde]
pub struct IsProcessedResponse {
    pub is_processed: bool,
}
