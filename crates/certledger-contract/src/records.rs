//! Typed reads and writes against an invocation context.

use certledger_core::{Record, RecordKey, RecordKind};
use certledger_store::TxContext;

use crate::error::{ContractError, Result};

/// Whether `key` encodes to a storage key of its own kind.
///
/// A certificate id carrying another kind's prefix would address that kind's
/// record, so it never names a certificate.
fn in_namespace(key: &RecordKey, raw: &str) -> bool {
    RecordKind::of_key(raw) == key.kind()
}

/// Load the record under `key`, failing with `NotFound` when absent.
pub(crate) fn load<R: Record>(
    ctx: &TxContext<'_>,
    key: &RecordKey,
    operation: &'static str,
) -> Result<R> {
    let raw = key.encode();
    if !in_namespace(key, &raw) {
        return Err(ContractError::not_found(R::KIND, raw));
    }

    let bytes = ctx
        .get_state(&raw)
        .map_err(|e| ContractError::store(operation, raw.as_str(), e))?
        .ok_or_else(|| ContractError::not_found(R::KIND, raw.as_str()))?;

    R::decode(&bytes).map_err(|e| ContractError::codec(R::KIND, raw, e))
}

/// Whether anything is stored under `key`.
pub(crate) fn present(
    ctx: &TxContext<'_>,
    key: &RecordKey,
    operation: &'static str,
) -> Result<bool> {
    let raw = key.encode();
    if !in_namespace(key, &raw) {
        return Ok(false);
    }

    ctx.get_state(&raw)
        .map(|bytes| bytes.is_some())
        .map_err(|e| ContractError::store(operation, raw, e))
}

/// Stage the removal of `key`. Callers check presence first.
pub(crate) fn remove(
    ctx: &mut TxContext<'_>,
    key: &RecordKey,
    operation: &'static str,
) -> Result<()> {
    let raw = key.encode();
    ctx.del_state(raw.as_str()).map_err(|e| ContractError::store(operation, raw, e))
}

/// Encode `record` and stage it under its own key. Returns the storage key.
pub(crate) fn save<R: Record>(
    ctx: &mut TxContext<'_>,
    record: &R,
    operation: &'static str,
) -> Result<String> {
    let raw = record.key().encode();
    let bytes = record
        .encode()
        .map_err(|e| ContractError::codec(R::KIND, raw.as_str(), e))?;

    ctx.put_state(raw.as_str(), bytes)
        .map_err(|e| ContractError::store(operation, raw.as_str(), e))?;

    Ok(raw)
}
