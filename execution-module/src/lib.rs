//! Warden Execution Module - Delay-Gated Execution Queue
//!
//! This contract sits in front of a custodial smart account and lets
//! authorized proposers queue outgoing transactions that can only execute
//! after a mandatory delay.
//!
//! # Request Flow
//! 1. The account (or the admin) registers proposers with `AddProposer`
//! 2. A proposer queues a request with `CreateExecution`; the request id is
//!    the keccak256 hash of its canonical field encoding
//! 3. After the delay elapses, anyone calls `ExecuteExecutions`; the module
//!    flips each request to Executed and invokes the account's
//!    module-execution capability
//!
//! # Security
//! - Fixed execution delay (7 days by default), immutable at runtime
//! - Content-addressed requests; identical re-submission is a dedup no-op
//! - Status flip persisted before the account invocation, so a re-entrant
//!   execution observes the request as already executed
//! - Atomic batches: any failing precondition or account call aborts the
//!   whole `ExecuteExecutions` transaction

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
