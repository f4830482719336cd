//! Core data types for the Pawnshop contract.

use soroban_sdk::{contracttype, Address};

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    Unauthorized = 1,
    NotInitialized = 3,
    LoanAlreadyOpen = 4,
    NoOpenLoan = 5,
    LoanExpired = 6,
    LoanNotExpired = 7,
    PaymentTooSmall = 8,
    SuspiciousRate = 9,
    WrongRepaymentAmount = 10,
    AlreadyRegistered = 11,
    OracleUnavailable = 12,
    TransferNotFound = 13,
    ForeignTransfer = 14,
    InvalidAmount = 15,
    InvalidTerms = 16,
    Overflow = 17,
}

/// Owner-tunable lending knobs. Periods are counted in ledgers.
///
/// * `max_rate` – Ceiling for the oracle rate; anything above is rejected as suspicious.
/// * `discount_percent` – Share (1..=100) of the oracle rate actually lent out.
/// * `grace_period` – Ledgers after borrowing during which the full deposit is refundable.
/// * `interest_period` – Ledgers after grace during which repayment is still accepted.
/// * `burndown_period` – Ledgers over which the refundable deposit decays linearly to zero.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoanTerms {
    pub max_rate: u64,
    pub discount_percent: u32,
    pub grace_period: u32,
    pub interest_period: u32,
    pub burndown_period: u32,
}

impl LoanTerms {
    pub fn is_valid(&self) -> bool {
        self.max_rate > 0
            && self.discount_percent > 0
            && self.discount_percent <= 100
            && self.interest_period > 0
            && self.burndown_period > 0
    }
}

/// Contract-wide configuration, written at deployment and replaced by `update_params`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PawnshopConfig {
    pub owner: Address,
    /// Token contract of the collateral coin.
    pub native_asset: Address,
    /// Token contract of the asset lent out.
    pub pegged_asset: Address,
    pub oracle: Address,
    /// Contract resolving transfer ids for `restore_buy_back`.
    pub transfer_index: Address,
    pub terms: LoanTerms,
}

/// Open loan of a borrower. Windows and rate are frozen at borrow time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub lend_amount: i128,
    pub deposit_amount: i128,
    pub start_height: u32,
    pub grace_end: u32,
    pub interest_end: u32,
    pub burndown_end: u32,
    pub locked_rate: u64,
}

/// Split of a loan's deposit between the borrower and the owner.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub borrower_amount: i128,
    pub owner_amount: i128,
}

/// A transfer as reported by the transfer index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferRecord {
    pub sender: Address,
    pub recipient: Address,
    pub asset: Address,
    pub amount: i128,
}
