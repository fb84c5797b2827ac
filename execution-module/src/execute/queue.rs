//! Request queue handlers: creation and delay-gated execution.

use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Response, SubMsg, Uint128, WasmMsg,
};

use common::{bytes32_to_hex, compute_request_id, AccountExecuteMsg, OperationKind};

use crate::contract::ACCOUNT_EXEC_REPLY_ID;
use crate::error::ContractError;
use crate::state::{
    ExecutionRequest, RequestStatus, CONFIG, EXECUTIONS, EXECUTION_DELAY, PROPOSERS,
};

/// Queue an execution request for an account.
///
/// The request id is the content hash of the parameters, so re-submitting
/// identical parameters dedups against the existing record (Pending or
/// Executed) and returns its id without mutating state.
#[allow(clippy::too_many_arguments)]
pub fn execute_create_execution(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
    target: String,
    value: Uint128,
    calldata: Binary,
    operation: OperationKind,
) -> Result<Response, ContractError> {
    if operation != OperationKind::Call {
        return Err(ContractError::UnsupportedOperation);
    }

    let account_addr = deps.api.addr_validate(&account)?;
    let target_addr = deps.api.addr_validate(&target)?;

    let config = CONFIG.load(deps.storage)?;
    let is_proposer = PROPOSERS
        .may_load(deps.storage, (&account_addr, &info.sender))?
        .unwrap_or(false);
    let is_forwarder = config.forwarder.as_ref() == Some(&info.sender);
    if !is_proposer && !is_forwarder {
        return Err(ContractError::Unauthorized);
    }

    let request_id = compute_request_id(
        account_addr.as_str(),
        target_addr.as_str(),
        value,
        calldata.as_slice(),
        operation.clone(),
    );

    if EXECUTIONS
        .may_load(deps.storage, (&account_addr, request_id.as_slice()))?
        .is_some()
    {
        return Ok(Response::new()
            .add_attribute("method", "create_execution")
            .add_attribute("request_id", bytes32_to_hex(&request_id))
            .add_attribute("deduplicated", "true"));
    }

    let request = ExecutionRequest {
        account: account_addr.clone(),
        target: target_addr.clone(),
        value,
        calldata,
        operation,
        enqueued_at: env.block.time,
        status: RequestStatus::Pending,
    };
    EXECUTIONS.save(deps.storage, (&account_addr, request_id.as_slice()), &request)?;

    let delay = EXECUTION_DELAY.load(deps.storage)?;

    Ok(Response::new()
        .add_attribute("method", "create_execution")
        .add_attribute("request_id", bytes32_to_hex(&request_id))
        .add_attribute("account", account_addr)
        .add_attribute("target", target_addr)
        .add_attribute("value", value.to_string())
        .add_attribute("proposer", info.sender)
        .add_attribute("enqueued_at", env.block.time.seconds().to_string())
        .add_attribute(
            "executable_at",
            env.block.time.plus_seconds(delay).seconds().to_string(),
        ))
}

/// Execute queued requests whose delay has elapsed, in the given order.
///
/// All preconditions are checked and every status flip is persisted before
/// any account invocation is dispatched; a re-entrant call from within the
/// account therefore observes every request in the batch as Executed. A
/// failing invocation is converted to `UnderlyingCallFailed` by the reply
/// handler, which aborts the whole transaction, so no request in the batch
/// commits unless all of them do.
pub fn execute_execute_executions(
    deps: DepsMut,
    env: Env,
    account: String,
    request_ids: Vec<Binary>,
) -> Result<Response, ContractError> {
    let account_addr = deps.api.addr_validate(&account)?;
    let delay = EXECUTION_DELAY.load(deps.storage)?;
    let now = env.block.time.seconds();

    let mut submsgs: Vec<SubMsg> = Vec::with_capacity(request_ids.len());
    let mut events: Vec<Event> = Vec::with_capacity(request_ids.len());

    for raw_id in &request_ids {
        let request_id: [u8; 32] = raw_id
            .to_vec()
            .try_into()
            .map_err(|_| ContractError::InvalidRequestIdLength { got: raw_id.len() })?;

        let mut request = EXECUTIONS
            .may_load(deps.storage, (&account_addr, request_id.as_slice()))?
            .ok_or_else(|| ContractError::RequestNotFound {
                request_id: bytes32_to_hex(&request_id),
            })?;

        if request.status == RequestStatus::Executed {
            return Err(ContractError::AlreadyExecuted {
                request_id: bytes32_to_hex(&request_id),
            });
        }

        let executable_at = request.enqueued_at.seconds() + delay;
        if now < executable_at {
            return Err(ContractError::DelayNotElapsed {
                remaining_seconds: executable_at - now,
            });
        }

        // Flip before the account invocation so a re-entrant execution of
        // the same id fails with AlreadyExecuted.
        request.status = RequestStatus::Executed;
        EXECUTIONS.save(deps.storage, (&account_addr, request_id.as_slice()), &request)?;

        let invoke = WasmMsg::Execute {
            contract_addr: request.account.to_string(),
            msg: to_json_binary(&AccountExecuteMsg::ExecuteFromModule {
                target: request.target.to_string(),
                value: request.value,
                calldata: request.calldata.clone(),
                operation: request.operation.clone(),
            })?,
            funds: vec![],
        };
        submsgs.push(SubMsg::reply_on_error(invoke, ACCOUNT_EXEC_REPLY_ID));

        events.push(
            Event::new("request_executed")
                .add_attribute("request_id", bytes32_to_hex(&request_id))
                .add_attribute("account", request.account.to_string())
                .add_attribute("target", request.target.to_string())
                .add_attribute("value", request.value.to_string()),
        );
    }

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_events(events)
        .add_attribute("method", "execute_executions")
        .add_attribute("account", account_addr)
        .add_attribute("request_count", request_ids.len().to_string()))
}
