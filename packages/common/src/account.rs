//! Module-execution capability interface of a governed account.
//!
//! The execution module never assumes anything about the account beyond
//! this interface: given a target, native value, calldata, and an operation
//! kind, the account attempts the call and the transaction fails if the
//! account rejects the module or the call itself fails. Any account
//! contract implementing `ExecuteFromModule` can be governed.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Kind of call an account performs on behalf of a module.
#[cw_serde]
pub enum OperationKind {
    /// Plain call from the account to the target.
    Call,
    /// Code-reuse call in the account's own storage context. Accepted on
    /// the wire for interface parity, rejected by the execution module.
    DelegateCall,
}

impl OperationKind {
    /// Single-byte canonical encoding used in content addressing.
    pub fn as_byte(&self) -> u8 {
        match self {
            OperationKind::Call => 0,
            OperationKind::DelegateCall => 1,
        }
    }
}

/// Execute interface a governed account exposes to its modules.
#[cw_serde]
pub enum AccountExecuteMsg {
    /// Perform a call decided by an enabled module.
    ExecuteFromModule {
        /// Call target address
        target: String,
        /// Native funds the account attaches to the call
        value: Uint128,
        /// Message bytes passed to the target
        calldata: Binary,
        /// Kind of call to perform
        operation: OperationKind,
    },
}
