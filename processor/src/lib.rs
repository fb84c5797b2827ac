//! Warden Message Processor - Cross-Chain Gateway to the Execution Module
//!
//! Validates messages delivered by the bridge transport and forwards them
//! into the execution module's delayed queue:
//! 1. Only the configured router may deliver messages
//! 2. Messages claiming to originate from the local chain are rejected
//! 3. Message ids are tracked so at-least-once transport delivery forwards
//!    each message at most once
//! 4. The decoded originator must be on the approver allowlist
//! 5. The canonical payload becomes a `CreateExecution` on the module
//!
//! A compromised transport can at worst enqueue an illegitimate *delayed*
//! request, never an immediate fund movement; the execution delay is the
//! window for off-chain monitoring to react.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
