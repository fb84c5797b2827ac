//! Query handlers for the execution module.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::{compute_request_id, OperationKind};

use crate::msg::{
    ComputeRequestIdResponse, ConfigResponse, ExecutionDelayResponse, IsProposerResponse,
    ProposersResponse, RequestResponse, RequestsResponse,
};
use crate::state::{ExecutionRequest, CONFIG, EXECUTIONS, EXECUTION_DELAY, PROPOSERS};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let delay = EXECUTION_DELAY.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        forwarder: config.forwarder,
        delay_seconds: delay,
    })
}

/// Query the fixed execution delay.
pub fn query_execution_delay(deps: Deps) -> StdResult<ExecutionDelayResponse> {
    let delay = EXECUTION_DELAY.load(deps.storage)?;
    Ok(ExecutionDelayResponse {
        delay_seconds: delay,
    })
}

/// Query a single request by account and id.
pub fn query_request(
    deps: Deps,
    account: String,
    request_id: Binary,
) -> StdResult<RequestResponse> {
    let account_addr = deps.api.addr_validate(&account)?;
    let id: [u8; 32] = request_id
        .to_vec()
        .try_into()
        .map_err(|_| StdError::generic_err("request_id must be 32 bytes"))?;

    let request = EXECUTIONS.load(deps.storage, (&account_addr, id.as_slice()))?;
    let delay = EXECUTION_DELAY.load(deps.storage)?;
    Ok(to_request_response(&id, request, delay))
}

/// Query paginated requests for an account.
pub fn query_requests(
    deps: Deps,
    account: String,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<RequestsResponse> {
    let account_addr = deps.api.addr_validate(&account)?;
    let delay = EXECUTION_DELAY.load(deps.storage)?;
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start: Option<Bound<&[u8]>> = start_after
        .as_ref()
        .map(|id| Bound::exclusive(id.as_slice()));

    let requests: Vec<RequestResponse> = EXECUTIONS
        .prefix(&account_addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (id, request) = item?;
            let id: [u8; 32] = id
                .try_into()
                .map_err(|_| StdError::generic_err("malformed request key"))?;
            Ok(to_request_response(&id, request, delay))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RequestsResponse { requests })
}

/// Query whether an address is a registered proposer for an account.
pub fn query_is_proposer(
    deps: Deps,
    account: String,
    proposer: String,
) -> StdResult<IsProposerResponse> {
    let account_addr = deps.api.addr_validate(&account)?;
    let proposer_addr = deps.api.addr_validate(&proposer)?;
    let is_proposer = PROPOSERS
        .may_load(deps.storage, (&account_addr, &proposer_addr))?
        .unwrap_or(false);
    Ok(IsProposerResponse { is_proposer })
}

/// Query all registered proposers for an account.
pub fn query_proposers(deps: Deps, account: String) -> StdResult<ProposersResponse> {
    let account_addr = deps.api.addr_validate(&account)?;
    let proposers = PROPOSERS
        .prefix(&account_addr)
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok((_, false)) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ProposersResponse { proposers })
}

/// Compute the content-addressed id for the given parameters.
pub fn query_compute_request_id(
    deps: Deps,
    account: String,
    target: String,
    value: Uint128,
    calldata: Binary,
    operation: OperationKind,
) -> StdResult<ComputeRequestIdResponse> {
    let account_addr = deps.api.addr_validate(&account)?;
    let target_addr = deps.api.addr_validate(&target)?;

    let request_id = compute_request_id(
        account_addr.as_str(),
        target_addr.as_str(),
        value,
        calldata.as_slice(),
        operation,
    );

    Ok(ComputeRequestIdResponse {
        request_id: Binary::from(request_id.to_vec()),
    })
}

fn to_request_response(id: &[u8; 32], request: ExecutionRequest, delay: u64) -> RequestResponse {
    let executable_at = request.enqueued_at.plus_seconds(delay);
    RequestResponse {
        request_id: Binary::from(id.to_vec()),
        account: request.account,
        target: request.target,
        value: request.value,
        calldata: request.calldata,
        operation: request.operation,
        enqueued_at: request.enqueued_at,
        executable_at,
        status: request.status,
    }
}
