//! Proposer registry handlers.
//!
//! Each account administers its own proposer set; the contract admin may
//! act on any account's behalf. Both operations are idempotent.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, PROPOSERS};

/// Register a proposer for an account.
pub fn execute_add_proposer(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    proposer: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;

    if info.sender != account_addr && info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let proposer_addr = deps.api.addr_validate(&proposer)?;
    PROPOSERS.save(deps.storage, (&account_addr, &proposer_addr), &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_proposer")
        .add_attribute("account", account_addr)
        .add_attribute("proposer", proposer_addr))
}

/// Remove a proposer for an account.
pub fn execute_remove_proposer(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    proposer: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;

    if info.sender != account_addr && info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let proposer_addr = deps.api.addr_validate(&proposer)?;
    PROPOSERS.remove(deps.storage, (&account_addr, &proposer_addr));

    Ok(Response::new()
        .add_attribute("method", "remove_proposer")
        .add_attribute("account", account_addr)
        .add_attribute("proposer", proposer_addr))
}

/// Point the bridge path at a deployed message processor.
pub fn execute_set_forwarder(
    deps: DepsMut,
    info: MessageInfo,
    forwarder: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.forwarder = forwarder
        .map(|f| deps.api.addr_validate(&f))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_forwarder")
        .add_attribute(
            "forwarder",
            config
                .forwarder
                .map(|f| f.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}
