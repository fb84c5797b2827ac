//! Canonical, order-fixed encoding of execution parameters.
//!
//! The same byte layout is used for bridge payloads and as the preimage of
//! content addressing, so a forwarded message and a locally queued request
//! with identical parameters produce the identical request id.
//!
//! # Byte Layout
//! - account:  u32 big-endian length, then UTF-8 bytes
//! - target:   u32 big-endian length, then UTF-8 bytes
//! - value:    16 bytes, u128 big-endian
//! - calldata: u32 big-endian length, then raw bytes
//!
//! Every value has exactly one encoding: lengths are explicit, integers are
//! fixed-width, and decoding rejects both truncated and trailing bytes.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, StdError, StdResult, Uint128};

/// Execution parameters carried in a bridge payload.
#[cw_serde]
pub struct ExecutionParams {
    /// Governed account the request is queued against
    pub account: String,
    /// Call target address
    pub target: String,
    /// Native funds attached to the call
    pub value: Uint128,
    /// Message bytes passed to the target
    pub calldata: Binary,
}

/// Encode execution parameters into the canonical byte layout.
pub fn encode_execution_params(params: &ExecutionParams) -> Vec<u8> {
    let mut buf = Vec::with_capacity(
        4 + params.account.len() + 4 + params.target.len() + 16 + 4 + params.calldata.len(),
    );
    put_prefixed(&mut buf, params.account.as_bytes());
    put_prefixed(&mut buf, params.target.as_bytes());
    buf.extend_from_slice(&params.value.u128().to_be_bytes());
    put_prefixed(&mut buf, params.calldata.as_slice());
    buf
}

/// Decode canonical bytes into execution parameters.
///
/// Fails on truncated input, non-UTF-8 address fields, and trailing bytes.
pub fn decode_execution_params(data: &[u8]) -> StdResult<ExecutionParams> {
    let mut cursor = 0usize;

    let account = take_string(data, &mut cursor, "account")?;
    let target = take_string(data, &mut cursor, "target")?;
    let value = take_u128(data, &mut cursor)?;
    let calldata = take_prefixed(data, &mut cursor, "calldata")?;

    if cursor != data.len() {
        return Err(StdError::generic_err(format!(
            "payload has {} trailing bytes",
            data.len() - cursor
        )));
    }

    Ok(ExecutionParams {
        account,
        target,
        value: Uint128::new(value),
        calldata: Binary::from(calldata),
    })
}

fn put_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}

fn take_prefixed(data: &[u8], cursor: &mut usize, field: &str) -> StdResult<Vec<u8>> {
    if data.len() - *cursor < 4 {
        return Err(StdError::generic_err(format!(
            "payload truncated reading {field} length"
        )));
    }
    let mut be = [0u8; 4];
    be.copy_from_slice(&data[*cursor..*cursor + 4]);
    *cursor += 4;

    let len = u32::from_be_bytes(be) as usize;
    if data.len() - *cursor < len {
        return Err(StdError::generic_err(format!(
            "payload truncated reading {field}: need {len} bytes"
        )));
    }
    let bytes = data[*cursor..*cursor + len].to_vec();
    *cursor += len;
    Ok(bytes)
}

fn take_string(data: &[u8], cursor: &mut usize, field: &str) -> StdResult<String> {
    let bytes = take_prefixed(data, cursor, field)?;
    String::from_utf8(bytes)
        .map_err(|_| StdError::generic_err(format!("{field} is not valid utf-8")))
}

fn take_u128(data: &[u8], cursor: &mut usize) -> StdResult<u128> {
    if data.len() - *cursor < 16 {
        return Err(StdError::generic_err("payload truncated reading value"));
    }
    let mut be = [0u8; 16];
    be.copy_from_slice(&data[*cursor..*cursor + 16]);
    *cursor += 16;
    Ok(u128::from_be_bytes(be))
}
