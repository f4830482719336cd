//! Storage layout: configuration in instance storage, loans and consumed
//! transfer ids in persistent storage.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{ContractError, Loan, PawnshopConfig};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const LOAN_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const LOAN_LIFETIME_THRESHOLD: u32 = LOAN_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Loan(Address),
    RegisteredReturn(BytesN<32>),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ── configuration ────────────────────────────────────────────────────────────

pub fn read_config(env: &Env) -> Result<PawnshopConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_config(env: &Env, config: &PawnshopConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ── loans ────────────────────────────────────────────────────────────────────

pub fn read_loan(env: &Env, borrower: &Address) -> Option<Loan> {
    let key = DataKey::Loan(borrower.clone());
    let loan = env.storage().persistent().get(&key);
    if loan.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, LOAN_LIFETIME_THRESHOLD, LOAN_BUMP_AMOUNT);
    }
    loan
}

pub fn has_loan(env: &Env, borrower: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Loan(borrower.clone()))
}

pub fn write_loan(env: &Env, borrower: &Address, loan: &Loan) {
    let key = DataKey::Loan(borrower.clone());
    env.storage().persistent().set(&key, loan);
    env.storage()
        .persistent()
        .extend_ttl(&key, LOAN_LIFETIME_THRESHOLD, LOAN_BUMP_AMOUNT);
}

pub fn remove_loan(env: &Env, borrower: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Loan(borrower.clone()));
}

// ── registered returns ───────────────────────────────────────────────────────

pub fn is_registered_return(env: &Env, tx_id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::RegisteredReturn(tx_id.clone()))
        .unwrap_or(false)
}

pub fn register_return(env: &Env, tx_id: &BytesN<32>) {
    let key = DataKey::RegisteredReturn(tx_id.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, LOAN_LIFETIME_THRESHOLD, LOAN_BUMP_AMOUNT);
}
