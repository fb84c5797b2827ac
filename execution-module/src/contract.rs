//! Execution module entry points.
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, SubMsgResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_proposer, execute_create_execution, execute_execute_executions,
    execute_remove_proposer, execute_set_forwarder,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_compute_request_id, query_config, query_execution_delay, query_is_proposer,
    query_proposers, query_request, query_requests,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_EXECUTION_DELAY, EXECUTION_DELAY,
};

/// Reply id for account invocation submessages.
pub const ACCOUNT_EXEC_REPLY_ID: u64 = 1;

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

    let admin = deps.api.addr_validate(&msg.admin)?;
    let forwarder = msg
        .forwarder
        .map(|f| deps.api.addr_validate(&f))
        .transpose()?;

    let config = Config { admin, forwarder };
    CONFIG.save(deps.storage, &config)?;

    // The delay is fixed for the lifetime of the deployment.
    let delay = msg.delay_seconds.unwrap_or(DEFAULT_EXECUTION_DELAY);
    EXECUTION_DELAY.save(deps.storage, &delay)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute(
            "forwarder",
            config
                .forwarder
                .map(|f| f.to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
        .add_attribute("delay_seconds", delay.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddProposer { account, proposer } => {
            execute_add_proposer(deps, info, account, proposer)
        }
        ExecuteMsg::RemoveProposer { account, proposer } => {
            execute_remove_proposer(deps, info, account, proposer)
        }
        ExecuteMsg::SetForwarder { forwarder } => execute_set_forwarder(deps, info, forwarder),
        ExecuteMsg::CreateExecution {
            account,
            target,
            value,
            calldata,
            operation,
        } => execute_create_execution(deps, env, info, account, target, value, calldata, operation),
        ExecuteMsg::ExecuteExecutions {
            account,
            request_ids,
        } => execute_execute_executions(deps, env, account, request_ids),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Handle replies from account invocation submessages.
///
/// Submessages are dispatched with `reply_on_error`, so only failures land
/// here. Raising `UnderlyingCallFailed` aborts the whole transaction: every
/// request in the batch reverts to Pending and the caller can retry.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != ACCOUNT_EXEC_REPLY_ID {
        return Err(ContractError::UnknownReplyId { id: msg.id });
    }

    match msg.result {
        SubMsgResult::Err(reason) => Err(ContractError::UnderlyingCallFailed { reason }),
        SubMsgResult::Ok(_) => Ok(Response::new()),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::ExecutionDelay {} => to_json_binary(&query_execution_delay(deps)?),
        QueryMsg::Request {
            account,
            request_id,
        } => to_json_binary(&query_request(deps, account, request_id)?),
        QueryMsg::Requests {
            account,
            start_after,
            limit,
        } => to_json_binary(&query_requests(deps, account, start_after, limit)?),
        QueryMsg::IsProposer { account, proposer } => {
            to_json_binary(&query_is_proposer(deps, account, proposer)?)
        }
        QueryMsg::Proposers { account } => to_json_binary(&query_proposers(deps, account)?),
        QueryMsg::ComputeRequestId {
            account,
            target,
            value,
            calldata,
            operation,
        } => to_json_binary(&query_compute_request_id(
            deps, account, target, value, calldata, operation,
        )?),
    }
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
