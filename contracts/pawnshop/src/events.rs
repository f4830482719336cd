//! Event types and topic constants for the Pawnshop contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::types::LoanTerms;

/// Emitted when a borrower opens a loan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowEvent {
    pub borrower: Address,
    pub deposit_amount: i128,
    pub lend_amount: i128,
    pub locked_rate: u64,
    pub start_height: u32,
    pub interest_end: u32,
}

/// Emitted when a loan is repaid, either through `buy_back` or `restore_buy_back`.
/// `tx_id` is set only for restored repayments.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementEvent {
    pub borrower: Address,
    pub lend_amount: i128,
    pub borrower_amount: i128,
    pub owner_amount: i128,
    pub height: u32,
    pub tx_id: Option<BytesN<32>>,
}

/// Emitted when an expired loan is forfeited to the owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpiredEvent {
    pub borrower: Address,
    pub forfeited_deposit: i128,
    pub written_off: i128,
    pub height: u32,
}

/// Emitted when the owner replaces the oracle or lending terms.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamsUpdatedEvent {
    pub oracle: Address,
    pub terms: LoanTerms,
}

/// Emitted when the owner withdraws pegged reserve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub owner: Address,
    pub amount: i128,
}

fn topic(name: Symbol) -> (Symbol, Symbol) {
    (symbol_short!("pawn"), name)
}

/// Publish a borrow event.
pub fn publish_borrow(env: &Env, event: BorrowEvent) {
    env.events().publish(topic(symbol_short!("borrow")), event);
}

/// Publish a buy-back settlement event.
pub fn publish_buy_back(env: &Env, event: SettlementEvent) {
    env.events().publish(topic(symbol_short!("buyback")), event);
}

/// Publish a restored buy-back settlement event.
pub fn publish_restore(env: &Env, event: SettlementEvent) {
    env.events().publish(topic(symbol_short!("restore")), event);
}

/// Publish an expired-loan event.
pub fn publish_expired(env: &Env, event: ExpiredEvent) {
    env.events().publish(topic(symbol_short!("expired")), event);
}

/// Publish a parameters-updated event.
pub fn publish_params_updated(env: &Env, event: ParamsUpdatedEvent) {
    env.events().publish(topic(symbol_short!("params")), event);
}

/// Publish a withdraw event.
pub fn publish_withdraw(env: &Env, event: WithdrawEvent) {
    env.events().publish(topic(symbol_short!("withdraw")), event);
}
