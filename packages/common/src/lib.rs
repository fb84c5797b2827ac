//! Common - Shared Types and Utilities for Warden Contracts
//!
//! This package provides the types shared between the execution module and
//! the message processor:
//! - the module-execution capability interface a governed account exposes
//! - the canonical field encoding used for bridge payloads
//! - content addressing for execution requests

pub mod account;
pub mod codec;
pub mod hash;

pub use account::{AccountExecuteMsg, OperationKind};
pub use codec::{decode_execution_params, encode_execution_params, ExecutionParams};
pub use hash::{bytes32_to_hex, compute_request_id, hex_to_bytes32, keccak256};
