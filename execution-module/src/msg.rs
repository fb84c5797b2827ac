//! Message types for the execution module.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use common::OperationKind;

use crate::state::RequestStatus;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address; may manage proposer registries and the forwarder
    pub admin: String,
    /// Execution delay in seconds; defaults to 7 days. Fixed for the
    /// lifetime of the deployment.
    pub delay_seconds: Option<u64>,
    /// Bridge-path forwarder, authorized as a proposer for every account
    pub forwarder: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Register a proposer for an account
    ///
    /// Authorization: the account itself, or the admin. Idempotent.
    AddProposer {
        /// Governed account
        account: String,
        /// Address allowed to queue requests for the account
        proposer: String,
    },

    /// Remove a proposer for an account
    ///
    /// Authorization: the account itself, or the admin. Idempotent.
    RemoveProposer {
        /// Governed account
        account: String,
        /// Address to revoke
        proposer: String,
    },

    /// Point the bridge path at a deployed message processor
    ///
    /// Authorization: Admin only
    SetForwarder {
        /// Forwarder address, or None to disable the bridge path
        forwarder: Option<String>,
    },

    /// Queue an execution request for an account
    ///
    /// Authorization: a registered proposer for the account, or the
    /// forwarder. Re-submitting identical parameters returns the existing
    /// request id without mutating state.
    CreateExecution {
        /// Governed account
        account: String,
        /// Call target
        target: String,
        /// Native funds the account attaches to the call
        value: Uint128,
        /// Message bytes passed to the target
        calldata: Binary,
        /// Kind of call; only `Call` is accepted
        operation: OperationKind,
    },

    /// Execute queued requests whose delay has elapsed, in the given order
    ///
    /// Authorization: anyone; the time-lock is the gate. The batch is
    /// atomic: any failing request aborts the whole call.
    ExecuteExecutions {
        /// Governed account
        account: String,
        /// 32-byte request ids to execute
        request_ids: Vec<Binary>,
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

    /// The fixed execution delay
    #[returns(ExecutionDelayResponse)]
    ExecutionDelay {},

    /// A single request by account and id
    #[returns(RequestResponse)]
    Request {
        account: String,
        request_id: Binary,
    },

    /// Paginated requests for an account
    #[returns(RequestsResponse)]
    Requests {
        account: String,
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// Whether an address is a registered proposer for an account
    #[returns(IsProposerResponse)]
    IsProposer {
        account: String,
        proposer: String,
    },

    /// All registered proposers for an account
    #[returns(ProposersResponse)]
    Proposers { account: String },

    /// Compute the content-addressed id for the given parameters without
    /// touching state
    #[returns(ComputeRequestIdResponse)]
    ComputeRequestId {
        account: String,
        target: String,
        value: Uint128,
        calldata: Binary,
        operation: OperationKind,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub forwarder: Option<Addr>,
    pub delay_seconds: u64,
}

#[cw_serde]
pub struct ExecutionDelayResponse {
    pub delay_seconds: u64,
}

#[cw_serde]
pub struct RequestResponse {
    pub request_id: Binary,
    pub account: Addr,
    pub target: Addr,
    pub value: Uint128,
    pub calldata: Binary,
    pub operation: OperationKind,
    pub enqueued_at: Timestamp,
    /// First block time at which the request may execute
    pub executable_at: Timestamp,
    pub status: RequestStatus,
}

#[cw_serde]
pub struct RequestsResponse {
    pub requests: Vec<RequestResponse>,
}

#[cw_serde]
pub struct IsProposerResponse {
    pub is_proposer: bool,
}

#[cw_serde]
pub struct ProposersResponse {
    pub proposers: Vec<Addr>,
}

#[cw_serde]
pub struct ComputeRequestIdResponse {
    pub request_id: Binary,
}
