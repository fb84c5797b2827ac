//! Execution queue integration tests.
//!
//! Covers the full request lifecycle against a mock smart account:
//! - Create -> wait out the delay -> execute (native transfer)
//! - Delay boundary enforcement
//! - At-most-once execution and content-addressed dedup
//! - Batch atomicity (one bad request poisons the whole batch)
//! - Underlying account failure keeps requests Pending and retryable

use cosmwasm_std::{coins, Addr, Binary, Uint128};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use common::{compute_request_id, OperationKind};
use execution_module::msg::{
    ExecuteMsg, InstantiateMsg, QueryMsg, RequestResponse, RequestsResponse,
};
use execution_module::state::RequestStatus;

/// Mirrors the default 7-day delay baked into the module.
const DELAY: u64 = 604_800;

// ============================================================================
// Mock Smart Account
// ============================================================================
//
// A minimal custodial account: the owner enables modules, enabled modules
// may execute calls funded from the account's balance. Its execute enum is
// a superset of `AccountExecuteMsg`, which is exactly the point of the
// capability interface: any account shape that understands
// `execute_from_module` can be governed.

mod mock_account {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        coins, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Empty, Env, MessageInfo,
        Response, StdError, StdResult, Uint128, WasmMsg,
    };
    use cw_storage_plus::{Item, Map};

    use common::OperationKind;

    #[cw_serde]
    pub struct InstantiateMsg {}

    #[cw_serde]
    pub enum AccountMsg {
        ExecuteFromModule {
            target: String,
            value: Uint128,
            calldata: Binary,
            operation: OperationKind,
        },
        EnableModule {
            module: String,
        },
    }

    const OWNER: Item<Addr> = Item::new("owner");
    const MODULES: Map<&Addr, bool> = Map::new("modules");

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        _msg: InstantiateMsg,
    ) -> StdResult<Response> {
        OWNER.save(deps.storage, &info.sender)?;
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: AccountMsg,
    ) -> Result<Response, StdError> {
        match msg {
            AccountMsg::EnableModule { module } => {
                let owner = OWNER.load(deps.storage)?;
                if info.sender != owner {
                    return Err(StdError::generic_err("only the owner can enable modules"));
                }
                let module_addr = deps.api.addr_validate(&module)?;
                MODULES.save(deps.storage, &module_addr, &true)?;
                Ok(Response::new())
            }
            AccountMsg::ExecuteFromModule {
                target,
                value,
                calldata,
                operation: _,
            } => {
                let enabled = MODULES
                    .may_load(deps.storage, &info.sender)?
                    .unwrap_or(false);
                if !enabled {
                    return Err(StdError::generic_err("module not enabled"));
                }

                let mut response = Response::new();
                if calldata.is_empty() {
                    if !value.is_zero() {
                        response = response.add_message(BankMsg::Send {
                            to_address: target,
                            amount: coins(value.u128(), "uluna"),
                        });
                    }
                } else {
                    let funds = if value.is_zero() {
                        vec![]
                    } else {
                        coins(value.u128(), "uluna")
                    };
                    response = response.add_message(WasmMsg::Execute {
                        contract_addr: target,
                        msg: calldata,
                        funds,
                    });
                }
                Ok(response)
            }
        }
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        to_json_binary(&Empty {})
    }
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_module() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        execution_module::contract::execute,
        execution_module::contract::instantiate,
        execution_module::contract::query,
    )
    .with_reply(execution_module::contract::reply);
    Box::new(contract)
}

fn contract_account() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        mock_account::execute,
        mock_account::instantiate,
        mock_account::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    module_addr: Addr,
    account_addr: Addr,
    admin: Addr,
    proposer: Addr,
    receiver: Addr,
}

fn setup() -> TestEnv {
    setup_with_enabled_module(true)
}

fn setup_with_enabled_module(enable: bool) -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let proposer = Addr::unchecked("terra1proposer");
    let receiver = Addr::unchecked("terra1receiver");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &admin, coins(10_000_000, "uluna"))
            .unwrap();
    });

    let module_code = app.store_code(contract_module());
    let module_addr = app
        .instantiate_contract(
            module_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                delay_seconds: None,
                forwarder: None,
            },
            &[],
            "execution-module",
            Some(admin.to_string()),
        )
        .unwrap();

    let account_code = app.store_code(contract_account());
    let account_addr = app
        .instantiate_contract(
            account_code,
            admin.clone(),
            &mock_account::InstantiateMsg {},
            &[],
            "mock-account",
            Some(admin.to_string()),
        )
        .unwrap();

    // Fund the account so it can transfer out
    app.send_tokens(admin.clone(), account_addr.clone(), &coins(1_000_000, "uluna"))
        .unwrap();

    if enable {
        app.execute_contract(
            admin.clone(),
            account_addr.clone(),
            &mock_account::AccountMsg::EnableModule {
                module: module_addr.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    // The account registers its proposer
    app.execute_contract(
        account_addr.clone(),
        module_addr.clone(),
        &ExecuteMsg::AddProposer {
            account: account_addr.to_string(),
            proposer: proposer.to_string(),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        module_addr,
        account_addr,
        admin,
        proposer,
        receiver,
    }
}

fn extract_attr(res: &AppResponse, key: &str) -> String {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("attribute {key} not found"))
}

/// Queue a native transfer request and return its id.
fn create_transfer(env: &mut TestEnv, amount: u128) -> Binary {
    let res = env
        .app
        .execute_contract(
            env.proposer.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::CreateExecution {
                account: env.account_addr.to_string(),
                target: env.receiver.to_string(),
                value: Uint128::new(amount),
                calldata: Binary::default(),
                operation: OperationKind::Call,
            },
            &[],
        )
        .unwrap();

    let id_hex = extract_attr(&res, "request_id");
    Binary::from(hex::decode(&id_hex[2..]).unwrap())
}

fn advance_time(env: &mut TestEnv, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += 1;
    });
}

fn query_request(env: &TestEnv, request_id: &Binary) -> RequestResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.module_addr,
            &QueryMsg::Request {
                account: env.account_addr.to_string(),
                request_id: request_id.clone(),
            },
        )
        .unwrap()
}

fn balance(env: &TestEnv, addr: &Addr) -> u128 {
    env.app
        .wrap()
        .query_balance(addr, "uluna")
        .unwrap()
        .amount
        .u128()
}

// ============================================================================
// Full Cycle
// ============================================================================

#[test]
fn test_transfer_executes_after_delay() {
    let mut env = setup();
    let account_before = balance(&env, &env.account_addr);
    let receiver_before = balance(&env, &env.receiver);

    let request_id = create_transfer(&mut env, 500_000);

    // Strictly before the boundary the request must not execute
    advance_time(&mut env, DELAY - 1);
    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![request_id.clone()],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("delay not elapsed"), "got: {err_str}");

    // At the boundary it executes
    advance_time(&mut env, 1);
    env.app
        .execute_contract(
            env.admin.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::ExecuteExecutions {
                account: env.account_addr.to_string(),
                request_ids: vec![request_id.clone()],
            },
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env, &env.account_addr), account_before - 500_000);
    assert_eq!(balance(&env, &env.receiver), receiver_before + 500_000);

    let request = query_request(&env, &request_id);
    assert_eq!(request.status, RequestStatus::Executed);
}

#[test]
fn test_second_execution_fails() {
    let mut env = setup();
    let request_id = create_transfer(&mut env, 500_000);
    advance_time(&mut env, DELAY);

    env.app
        .execute_contract(
            env.admin.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::ExecuteExecutions {
                account: env.account_addr.to_string(),
                request_ids: vec![request_id.clone()],
            },
            &[],
        )
        .unwrap();
    let receiver_after_first = balance(&env, &env.receiver);

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![request_id],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("already executed"), "got: {err_str}");

    // Funds moved exactly once
    assert_eq!(balance(&env, &env.receiver), receiver_after_first);
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_request_id_matches_content_hash() {
    let mut env = setup();
    let request_id = create_transfer(&mut env, 500_000);

    let expected = compute_request_id(
        env.account_addr.as_str(),
        env.receiver.as_str(),
        Uint128::new(500_000),
        &[],
        OperationKind::Call,
    );
    assert_eq!(request_id.as_slice(), expected.as_slice());
}

#[test]
fn test_identical_create_is_dedup_noop() {
    let mut env = setup();
    let first_id = create_transfer(&mut env, 500_000);

    let res = env
        .app
        .execute_contract(
            env.proposer.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::CreateExecution {
                account: env.account_addr.to_string(),
                target: env.receiver.to_string(),
                value: Uint128::new(500_000),
                calldata: Binary::default(),
                operation: OperationKind::Call,
            },
            &[],
        )
        .unwrap();
    assert_eq!(extract_attr(&res, "deduplicated"), "true");
    let second_hex = extract_attr(&res, "request_id");
    assert_eq!(
        Binary::from(hex::decode(&second_hex[2..]).unwrap()),
        first_id
    );

    // Still a single record
    let requests: RequestsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.module_addr,
            &QueryMsg::Requests {
                account: env.account_addr.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(requests.requests.len(), 1);
}

#[test]
fn test_create_rejects_non_proposer() {
    let mut env = setup();
    let stranger = Addr::unchecked("terra1stranger");

    let res = env.app.execute_contract(
        stranger,
        env.module_addr.clone(),
        &ExecuteMsg::CreateExecution {
            account: env.account_addr.to_string(),
            target: env.receiver.to_string(),
            value: Uint128::new(1),
            calldata: Binary::default(),
            operation: OperationKind::Call,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {err_str}");
}

#[test]
fn test_create_rejects_delegate_call() {
    let mut env = setup();

    let res = env.app.execute_contract(
        env.proposer.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::CreateExecution {
            account: env.account_addr.to_string(),
            target: env.receiver.to_string(),
            value: Uint128::new(1),
            calldata: Binary::default(),
            operation: OperationKind::DelegateCall,
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unsupported operation"), "got: {err_str}");
}

#[test]
fn test_forwarder_may_create_for_any_account() {
    let mut env = setup();
    let forwarder = Addr::unchecked("terra1forwarder");

    env.app
        .execute_contract(
            env.admin.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::SetForwarder {
                forwarder: Some(forwarder.to_string()),
            },
            &[],
        )
        .unwrap();

    // No AddProposer for the forwarder, yet creation succeeds
    env.app
        .execute_contract(
            forwarder,
            env.module_addr.clone(),
            &ExecuteMsg::CreateExecution {
                account: env.account_addr.to_string(),
                target: env.receiver.to_string(),
                value: Uint128::new(42),
                calldata: Binary::default(),
                operation: OperationKind::Call,
            },
            &[],
        )
        .unwrap();
}

// ============================================================================
// Batch Semantics
// ============================================================================

#[test]
fn test_batch_with_undue_request_fails_entirely() {
    let mut env = setup();
    let due_id = create_transfer(&mut env, 100_000);
    advance_time(&mut env, DELAY);

    // Enqueued after the jump, so still inside its delay window
    let undue_id = create_transfer(&mut env, 200_000);
    let receiver_before = balance(&env, &env.receiver);

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![due_id.clone(), undue_id.clone()],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("delay not elapsed"), "got: {err_str}");

    // The due request did not slip through
    assert_eq!(query_request(&env, &due_id).status, RequestStatus::Pending);
    assert_eq!(balance(&env, &env.receiver), receiver_before);

    // Once both are due the same batch succeeds
    advance_time(&mut env, DELAY);
    env.app
        .execute_contract(
            env.admin.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::ExecuteExecutions {
                account: env.account_addr.to_string(),
                request_ids: vec![due_id.clone(), undue_id.clone()],
            },
            &[],
        )
        .unwrap();
    assert_eq!(balance(&env, &env.receiver), receiver_before + 300_000);
    assert_eq!(query_request(&env, &due_id).status, RequestStatus::Executed);
    assert_eq!(
        query_request(&env, &undue_id).status,
        RequestStatus::Executed
    );
}

#[test]
fn test_batch_rejects_unknown_request() {
    let mut env = setup();
    let unknown = Binary::from([0x42u8; 32].to_vec());

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![unknown],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Request not found"), "got: {err_str}");
}

#[test]
fn test_batch_rejects_malformed_request_id() {
    let mut env = setup();

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![Binary::from(vec![0x01, 0x02])],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid request id length"), "got: {err_str}");
}

#[test]
fn test_duplicate_id_in_one_batch_fails() {
    let mut env = setup();
    let request_id = create_transfer(&mut env, 100_000);
    advance_time(&mut env, DELAY);
    let receiver_before = balance(&env, &env.receiver);

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![request_id.clone(), request_id.clone()],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("already executed"), "got: {err_str}");

    // Atomicity: the first occurrence rolled back too
    assert_eq!(
        query_request(&env, &request_id).status,
        RequestStatus::Pending
    );
    assert_eq!(balance(&env, &env.receiver), receiver_before);
}

// ============================================================================
// Underlying Account Failure
// ============================================================================

#[test]
fn test_account_rejection_keeps_request_retryable() {
    // Module never enabled on the account, so the invocation fails
    let mut env = setup_with_enabled_module(false);
    let request_id = create_transfer(&mut env, 500_000);
    advance_time(&mut env, DELAY);

    let res = env.app.execute_contract(
        env.admin.clone(),
        env.module_addr.clone(),
        &ExecuteMsg::ExecuteExecutions {
            account: env.account_addr.to_string(),
            request_ids: vec![request_id.clone()],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Account execution failed"), "got: {err_str}");
    assert_eq!(
        query_request(&env, &request_id).status,
        RequestStatus::Pending
    );

    // Fix the account, then the same batch succeeds
    env.app
        .execute_contract(
            env.admin.clone(),
            env.account_addr.clone(),
            &mock_account::AccountMsg::EnableModule {
                module: env.module_addr.to_string(),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            env.admin.clone(),
            env.module_addr.clone(),
            &ExecuteMsg::ExecuteExecutions {
                account: env.account_addr.to_string(),
                request_ids: vec![request_id.clone()],
            },
            &[],
        )
        .unwrap();
    assert_eq!(
        query_request(&env, &request_id).status,
        RequestStatus::Executed
    );
}
