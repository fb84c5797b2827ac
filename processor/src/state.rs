//! State definitions for the message processor.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for approver management
    pub admin: Addr,
    /// Bridge transport endpoint allowed to deliver messages
    pub router: Addr,
    /// Execution module that receives forwarded requests
    pub execution_module: Addr,
    /// Chain selector of this deployment
    pub local_chain_selector: u64,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:warden-processor";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Approved cross-chain originators
/// Key: approver address, Value: whether active
pub const APPROVERS: Map<&Addr, bool> = Map::new("approvers");

/// Message ids already forwarded, for redelivery suppression
/// Key: message id bytes, Value: true once forwarded
pub const PROCESSED_MESSAGES: Map<&[u8], bool> = Map::new("processed_messages");
