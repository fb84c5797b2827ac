//! Content addressing for execution requests.
//!
//! A request id is the Keccak-256 hash of the canonical parameter encoding
//! (see [`crate::codec`]) followed by the single operation-kind byte:
//!
//! ```text
//! request_id = keccak256(encode(account, target, value, calldata) ‖ op_byte)
//! ```
//!
//! The function is pure and independent of contract storage, so tests and
//! off-chain tooling compute expected ids without access to internal state.

use cosmwasm_std::{Binary, Uint128};
use tiny_keccak::{Hasher, Keccak};

use crate::account::OperationKind;
use crate::codec::{encode_execution_params, ExecutionParams};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the canonical request id for an execution request.
///
/// Identical parameters always produce the identical id; any single field
/// change produces a different one.
pub fn compute_request_id(
    account: &str,
    target: &str,
    value: Uint128,
    calldata: &[u8],
    operation: OperationKind,
) -> [u8; 32] {
    let mut preimage = encode_execution_params(&ExecutionParams {
        account: account.to_string(),
        target: target.to_string(),
        value,
        calldata: Binary::from(calldata.to_vec()),
    });
    preimage.push(operation.as_byte());
    keccak256(&preimage)
}

/// Convert a 32-byte hash to a 0x-prefixed hex string (for attributes).
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a hex string (with or without 0x prefix) into a 32-byte array.
pub fn hex_to_bytes32(input: &str) -> Result<[u8; 32], &'static str> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    if stripped.len() != 64 {
        return Err("invalid hex length: expected 64 characters");
    }
    let bytes = hex::decode(stripped).map_err(|_| "invalid hex character")?;
    let mut result = [0u8; 32];
    result.copy_from_slice(&bytes);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_id_for(
        account: &str,
        target: &str,
        value: u128,
        calldata: &[u8],
        operation: OperationKind,
    ) -> [u8; 32] {
        compute_request_id(account, target, Uint128::new(value), calldata, operation)
    }

    /// keccak256("hello") is a published vector
    #[test]
    fn test_keccak256_basic() {
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_request_id_deterministic() {
        let a = request_id_for("terra1acct", "terra1recv", 500_000, b"", OperationKind::Call);
        let b = request_id_for("terra1acct", "terra1recv", 500_000, b"", OperationKind::Call);
        assert_eq!(a, b);
    }

    #[test]
    fn test_request_id_sensitive_to_every_field() {
        let base = request_id_for("terra1acct", "terra1recv", 500_000, b"", OperationKind::Call);

        assert_ne!(
            base,
            request_id_for("terra1acct2", "terra1recv", 500_000, b"", OperationKind::Call)
        );
        assert_ne!(
            base,
            request_id_for("terra1acct", "terra1recv2", 500_000, b"", OperationKind::Call)
        );
        assert_ne!(
            base,
            request_id_for("terra1acct", "terra1recv", 500_001, b"", OperationKind::Call)
        );
        assert_ne!(
            base,
            request_id_for("terra1acct", "terra1recv", 500_000, b"\x00", OperationKind::Call)
        );
        assert_ne!(
            base,
            request_id_for(
                "terra1acct",
                "terra1recv",
                500_000,
                b"",
                OperationKind::DelegateCall
            )
        );
    }

    /// Field boundaries are explicit: shifting a byte between adjacent
    /// string fields must change the id.
    #[test]
    fn test_request_id_field_boundaries() {
        let a = request_id_for("terra1a", "bterra1r", 1, b"", OperationKind::Call);
        let b = request_id_for("terra1ab", "terra1r", 1, b"", OperationKind::Call);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = keccak256(b"roundtrip");
        let hex = bytes32_to_hex(&original);
        assert_eq!(hex_to_bytes32(&hex).unwrap(), original);
        assert_eq!(hex_to_bytes32(&hex[2..]).unwrap(), original);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert!(hex_to_bytes32("0x1234").is_err());
        assert!(hex_to_bytes32(&"zz".repeat(32)).is_err());
    }
}
