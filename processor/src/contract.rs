//! Message processor entry points and handlers.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult, WasmMsg,
};
use cw2::set_contract_version;

use common::{bytes32_to_hex, compute_request_id, decode_execution_params, OperationKind};
use execution_module::msg::ExecuteMsg as ModuleExecuteMsg;

use crate::error::ContractError;
use crate::msg::{
    ApproversResponse, ConfigResponse, ExecuteMsg, InboundMessage, InstantiateMsg,
    IsApproverResponse, IsProcessedResponse, MigrateMsg, QueryMsg,
};
use crate::state::{Config, APPROVERS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, PROCESSED_MESSAGES};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        router: deps.api.addr_validate(&msg.router)?,
        execution_module: deps.api.addr_validate(&msg.execution_module)?,
        local_chain_selector: msg.local_chain_selector,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("router", config.router)
        .add_attribute("execution_module", config.execution_module)
        .add_attribute(
            "local_chain_selector",
            config.local_chain_selector.to_string(),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddApprover { address } => execute_add_approver(deps, info, address),
        ExecuteMsg::RemoveApprover { address } => execute_remove_approver(deps, info, address),
        ExecuteMsg::ReceiveMessage { message } => execute_receive_message(deps, info, message),
    }
}

/// Add an approved cross-chain originator. Idempotent.
fn execute_add_approver(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let approver = deps.api.addr_validate(&address)?;
    APPROVERS.save(deps.storage, &approver, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_approver")
        .add_attribute("approver", approver))
}

/// Remove an approved cross-chain originator. Idempotent.
fn execute_remove_approver(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let approver = deps.api.addr_validate(&address)?;
    APPROVERS.remove(deps.storage, &approver);

    Ok(Response::new()
        .add_attribute("method", "remove_approver")
        .add_attribute("approver", approver))
}

/// Validate a delivered bridge message and forward it into the execution
/// module's queue.
///
/// The processed marker is written in the same transaction as the forward,
/// so a failed forward rolls the marker back and the transport can
/// redeliver; a successful forward commits it and redelivery is suppressed.
fn execute_receive_message(
    deps: DepsMut,
    info: MessageInfo,
    message: InboundMessage,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.router {
        return Err(ContractError::UnauthorizedRouter);
    }

    if message.source_chain_selector == config.local_chain_selector {
        return Err(ContractError::SameSourceChain {
            selector: message.source_chain_selector,
        });
    }

    let already_processed = PROCESSED_MESSAGES
        .may_load(deps.storage, message.message_id.as_slice())?
        .unwrap_or(false);
    if already_processed {
        return Err(ContractError::DuplicateMessage {
            message_id: hex_id(&message.message_id),
        });
    }

    let sender_str = String::from_utf8(message.sender.to_vec())
        .map_err(|_| StdError::generic_err("message sender is not valid utf-8"))?;
    let sender_addr = deps.api.addr_validate(&sender_str)?;
    let approved = APPROVERS
        .may_load(deps.storage, &sender_addr)?
        .unwrap_or(false);
    if !approved {
        return Err(ContractError::NotApproved {
            sender: sender_addr.to_string(),
        });
    }

    let params = decode_execution_params(message.payload.as_slice())?;
    let account_addr = deps.api.addr_validate(&params.account)?;
    let target_addr = deps.api.addr_validate(&params.target)?;

    PROCESSED_MESSAGES.save(deps.storage, message.message_id.as_slice(), &true)?;

    // The id the module will assign; deterministic, so it can be recorded
    // here without a round trip.
    let request_id = compute_request_id(
        account_addr.as_str(),
        target_addr.as_str(),
        params.value,
        params.calldata.as_slice(),
        OperationKind::Call,
    );

    let forward = WasmMsg::Execute {
        contract_addr: config.execution_module.to_string(),
        msg: to_json_binary(&ModuleExecuteMsg::CreateExecution {
            account: account_addr.to_string(),
            target: target_addr.to_string(),
            value: params.value,
            calldata: params.calldata,
            operation: OperationKind::Call,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(forward)
        .add_attribute("method", "receive_message")
        .add_attribute("message_id", hex_id(&message.message_id))
        .add_attribute(
            "source_chain_selector",
            message.source_chain_selector.to_string(),
        )
        .add_attribute("sender", sender_addr)
        .add_attribute("account", account_addr)
        .add_attribute("request_id", bytes32_to_hex(&request_id)))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::IsApprover { address } => to_json_binary(&query_is_approver(deps, address)?),
        QueryMsg::Approvers {} => to_json_binary(&query_approvers(deps)?),
        QueryMsg::IsProcessed { message_id } => {
            to_json_binary(&query_is_processed(deps, message_id)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        router: config.router,
        execution_module: config.execution_module,
        local_chain_selector: config.local_chain_selector,
    })
}

fn query_is_approver(deps: Deps, address: String) -> StdResult<IsApproverResponse> {
    let approver = deps.api.addr_validate(&address)?;
    let is_approver = APPROVERS
        .may_load(deps.storage, &approver)?
        .unwrap_or(false);
    Ok(IsApproverResponse { is_approver })
}

fn query_approvers(deps: Deps) -> StdResult<ApproversResponse> {
    let approvers = APPROVERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok((_, false)) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ApproversResponse { approvers })
}

fn query_is_processed(deps: Deps, message_id: Binary) -> StdResult<IsProcessedResponse> {
    let is_processed = PROCESSED_MESSAGES
        .may_load(deps.storage, message_id.as_slice())?
        .unwrap_or(false);
    Ok(IsProcessedResponse { is_processed })
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

fn hex_id(id: &Binary) -> String {
    format!("0x{}", hex::encode(id.as_slice()))
}
