//! State definitions for the execution module.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use common::OperationKind;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address; may manage proposer registries and the forwarder
    pub admin: Addr,
    /// Bridge-path forwarder, authorized as a proposer for every account
    pub forwarder: Option<Addr>,
}

// ============================================================================
// Execution Requests
// ============================================================================

/// A queued execution request, keyed by its content hash.
///
/// Parameters are immutable after creation; only `status` ever changes,
/// and only Pending -> Executed, exactly once. Records are never deleted,
/// so an identical re-submission dedups against history forever.
#[cw_serde]
pub struct ExecutionRequest {
    /// Governed account the request executes through
    pub account: Addr,
    /// Call target
    pub target: Addr,
    /// Native funds the account attaches to the call
    pub value: Uint128,
    /// Message bytes passed to the target
    pub calldata: Binary,
    /// Kind of call (only `Call` is accepted)
    pub operation: OperationKind,
    /// Block time when the request was enqueued
    pub enqueued_at: Timestamp,
    /// Lifecycle state
    pub status: RequestStatus,
}

/// Lifecycle state of an execution request.
#[cw_serde]
pub enum RequestStatus {
    Pending,
    Executed,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:warden-execution-module";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// Default execution delay in seconds (7 days)
pub const DEFAULT_EXECUTION_DELAY: u64 = 604_800;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Execution delay in seconds, fixed at instantiation
pub const EXECUTION_DELAY: Item<u64> = Item::new("execution_delay");

/// Queued execution requests
/// Key: (account, 32-byte request id), Value: ExecutionRequest
pub const EXECUTIONS: Map<(&Addr, &[u8]), ExecutionRequest> = Map::new("executions");

/// Registered proposers
/// Key: (account, proposer), Value: whether active
pub const PROPOSERS: Map<(&Addr, &Addr), bool> = Map::new("proposers");
