//! Interfaces of the contracts the pawnshop reads from.

use soroban_sdk::{contractclient, BytesN, Env, Symbol};

use crate::types::TransferRecord;

/// Data entries published by the rate oracle.
#[allow(dead_code)]
#[contractclient(name = "OracleClient")]
pub trait OracleData {
    /// Integer entry stored under `key`, if any.
    fn get_integer(env: Env, key: Symbol) -> Option<u64>;
}

/// Lookup of settled transfers by id.
#[allow(dead_code)]
#[contractclient(name = "TransferIndexClient")]
pub trait TransferIndex {
    fn transfer_of(env: Env, tx_id: BytesN<32>) -> Option<TransferRecord>;
}
