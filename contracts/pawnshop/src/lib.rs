#![no_std]

//! Pawnshop contract: loans of a pegged asset against a native-coin deposit.
//!
//! A borrower deposits the native coin and receives `deposit * rate * discount`
//! of the pegged asset at the oracle rate of the borrow ledger. Repaying exactly
//! that amount returns the deposit, in full during the grace window and linearly
//! decaying over the burndown window afterwards, the decayed share going to the
//! owner. Once the interest window is over the loan is expired and anyone may
//! forfeit its deposit to the owner with `close_expired_for`.
//!
//! Every window and the lending rate are frozen into the loan when it is opened,
//! so `update_params` only affects loans opened afterwards.

mod events;
mod external;
mod rate;
mod settlement;
mod storage;
mod types;

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, BytesN, Env, Symbol,
};

use events::{
    publish_borrow, publish_buy_back, publish_expired, publish_params_updated, publish_restore,
    publish_withdraw, BorrowEvent, ExpiredEvent, ParamsUpdatedEvent, SettlementEvent,
    WithdrawEvent,
};
pub use external::{OracleClient, TransferIndexClient};
pub use types::{ContractError, Loan, LoanTerms, PawnshopConfig, Settlement, TransferRecord};

/// Oracle entry holding the price of one whole native coin in pegged-asset units.
pub const ORACLE_RATE_KEY: &str = "xlm_btc_8";

fn current_height(env: &Env) -> u32 {
    env.ledger().sequence()
}

fn require_owner(config: &PawnshopConfig, caller: &Address) -> Result<(), ContractError> {
    if *caller != config.owner {
        return Err(ContractError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// Oracle rate as published under [`ORACLE_RATE_KEY`].
fn oracle_rate(env: &Env, config: &PawnshopConfig) -> Result<u64, ContractError> {
    let client = OracleClient::new(env, &config.oracle);
    match client.try_get_integer(&Symbol::new(env, ORACLE_RATE_KEY)) {
        Ok(Ok(Some(rate))) => Ok(rate),
        _ => Err(ContractError::OracleUnavailable),
    }
}

/// Discounted rate a new loan would lock in, with the minimum deposit it implies.
fn lending_rate(env: &Env, config: &PawnshopConfig) -> Result<(u64, i128), ContractError> {
    let oracle_rate = oracle_rate(env, config)?;
    if oracle_rate > config.terms.max_rate {
        log!(
            env,
            "suspicious oracle rate above ceiling",
            oracle_rate,
            config.terms.max_rate
        );
        return Err(ContractError::SuspiciousRate);
    }
    let rate = rate::discounted_rate(oracle_rate, config.terms.discount_percent);
    let minimum = rate::minimum_deposit(rate).ok_or(ContractError::SuspiciousRate)?;
    Ok((rate, minimum))
}

fn open_loan(
    terms: &LoanTerms,
    start_height: u32,
    deposit_amount: i128,
    locked_rate: u64,
) -> Result<Loan, ContractError> {
    let lend_amount = rate::lend_for(deposit_amount, locked_rate).ok_or(ContractError::Overflow)?;
    let grace_end = start_height
        .checked_add(terms.grace_period)
        .ok_or(ContractError::Overflow)?;
    let interest_end = grace_end
        .checked_add(terms.interest_period)
        .ok_or(ContractError::Overflow)?;
    let burndown_end = grace_end
        .checked_add(terms.burndown_period)
        .ok_or(ContractError::Overflow)?;
    Ok(Loan {
        lend_amount,
        deposit_amount,
        start_height,
        grace_end,
        interest_end,
        burndown_end,
        locked_rate,
    })
}

/// Pays out a settled deposit and drops the loan.
fn close_settled(
    env: &Env,
    config: &PawnshopConfig,
    borrower: &Address,
    settlement: &Settlement,
) {
    storage::remove_loan(env, borrower);

    let native = token::Client::new(env, &config.native_asset);
    let contract = env.current_contract_address();
    if settlement.borrower_amount > 0 {
        native.transfer(&contract, borrower, &settlement.borrower_amount);
    }
    if settlement.owner_amount > 0 {
        native.transfer(&contract, &config.owner, &settlement.owner_amount);
    }
}

#[contract]
pub struct Pawnshop;

#[contractimpl]
impl Pawnshop {
    /// Install the configuration. Runs once, atomically with deployment.
    ///
    /// Panics with `InvalidTerms` when the discount is outside 1..=100, the
    /// ceiling rate is zero, or the interest or burndown window is empty.
    pub fn __constructor(
        env: Env,
        owner: Address,
        native_asset: Address,
        pegged_asset: Address,
        oracle: Address,
        transfer_index: Address,
        terms: LoanTerms,
    ) {
        if !terms.is_valid() {
            panic_with_error!(&env, ContractError::InvalidTerms);
        }

        storage::write_config(
            &env,
            &PawnshopConfig {
                owner,
                native_asset,
                pegged_asset,
                oracle,
                transfer_index,
                terms,
            },
        );
        storage::extend_instance(&env);
    }

    /// Replace the oracle and lending terms (owner only). Open loans keep the
    /// terms they were opened with.
    pub fn update_params(
        env: Env,
        caller: Address,
        oracle: Address,
        terms: LoanTerms,
    ) -> Result<(), ContractError> {
        storage::extend_instance(&env);
        let mut config = storage::read_config(&env)?;
        require_owner(&config, &caller)?;
        if !terms.is_valid() {
            return Err(ContractError::InvalidTerms);
        }

        config.oracle = oracle.clone();
        config.terms = terms;
        storage::write_config(&env, &config);

        publish_params_updated(&env, ParamsUpdatedEvent { oracle, terms });
        Ok(())
    }

    /// Move `amount` of the pegged asset from the contract reserve to the owner (owner only).
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        storage::extend_instance(&env);
        let config = storage::read_config(&env)?;
        require_owner(&config, &caller)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        token::Client::new(&env, &config.pegged_asset).transfer(
            &env.current_contract_address(),
            &config.owner,
            &amount,
        );

        publish_withdraw(
            &env,
            WithdrawEvent {
                owner: config.owner,
                amount,
            },
        );
        Ok(())
    }

    /// Deposit `payment` of the native coin and receive the pegged asset at the
    /// current discounted oracle rate.
    ///
    /// # Errors
    /// - `InvalidAmount` – payment is zero or negative
    /// - `LoanAlreadyOpen` – borrower already has an open loan
    /// - `OracleUnavailable` – the oracle has no rate entry
    /// - `SuspiciousRate` – oracle rate above the configured ceiling, or discounted to zero
    /// - `PaymentTooSmall` – payment buys less than one pegged-asset unit
    pub fn borrow(env: Env, borrower: Address, payment: i128) -> Result<Loan, ContractError> {
        storage::extend_instance(&env);
        let config = storage::read_config(&env)?;
        borrower.require_auth();

        if payment <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if storage::has_loan(&env, &borrower) {
            log!(&env, "borrower already has an open loan", borrower);
            return Err(ContractError::LoanAlreadyOpen);
        }

        let (rate, minimum) = lending_rate(&env, &config)?;
        if payment < minimum {
            log!(&env, "payment below minimum deposit", minimum);
            return Err(ContractError::PaymentTooSmall);
        }

        let loan = open_loan(&config.terms, current_height(&env), payment, rate)?;
        storage::write_loan(&env, &borrower, &loan);

        let contract = env.current_contract_address();
        token::Client::new(&env, &config.native_asset).transfer(&borrower, &contract, &payment);
        token::Client::new(&env, &config.pegged_asset).transfer(
            &contract,
            &borrower,
            &loan.lend_amount,
        );

        publish_borrow(
            &env,
            BorrowEvent {
                borrower,
                deposit_amount: loan.deposit_amount,
                lend_amount: loan.lend_amount,
                locked_rate: loan.locked_rate,
                start_height: loan.start_height,
                interest_end: loan.interest_end,
            },
        );
        Ok(loan)
    }

    /// Repay exactly the lent amount and reclaim the deposit, minus the burned-down share.
    ///
    /// # Errors
    /// - `NoOpenLoan` – borrower has nothing to repay
    /// - `LoanExpired` – interest window is over
    /// - `WrongRepaymentAmount` – `payment` differs from the lent amount
    pub fn buy_back(env: Env, borrower: Address, payment: i128) -> Result<Settlement, ContractError> {
        storage::extend_instance(&env);
        let config = storage::read_config(&env)?;
        borrower.require_auth();

        let loan = storage::read_loan(&env, &borrower).ok_or(ContractError::NoOpenLoan)?;
        let height = current_height(&env);
        let settlement = settlement::settle(&loan, height)?;
        if payment != loan.lend_amount {
            log!(&env, "borrower must return exactly", loan.lend_amount);
            return Err(ContractError::WrongRepaymentAmount);
        }

        token::Client::new(&env, &config.pegged_asset).transfer(
            &borrower,
            &env.current_contract_address(),
            &payment,
        );
        close_settled(&env, &config, &borrower, &settlement);

        publish_buy_back(
            &env,
            SettlementEvent {
                borrower,
                lend_amount: loan.lend_amount,
                borrower_amount: settlement.borrower_amount,
                owner_amount: settlement.owner_amount,
                height,
                tx_id: None,
            },
        );
        Ok(settlement)
    }

    /// Settle a loan whose repayment reached the contract as a plain transfer.
    ///
    /// The transfer is resolved through the configured transfer index and must
    /// have been sent by `borrower` to this contract, in the pegged asset, for
    /// exactly the lent amount. Each transfer can be consumed once.
    ///
    /// # Errors
    /// - `AlreadyRegistered` – transfer already consumed
    /// - `NoOpenLoan` – borrower has nothing to repay
    /// - `TransferNotFound` – index does not know `tx_id`
    /// - `ForeignTransfer` – wrong sender, recipient or asset
    /// - `WrongRepaymentAmount` – transfer amount differs from the lent amount
    /// - `LoanExpired` – interest window is over
    pub fn restore_buy_back(
        env: Env,
        borrower: Address,
        tx_id: BytesN<32>,
    ) -> Result<Settlement, ContractError> {
        storage::extend_instance(&env);
        let config = storage::read_config(&env)?;
        borrower.require_auth();

        if storage::is_registered_return(&env, &tx_id) {
            return Err(ContractError::AlreadyRegistered);
        }
        let loan = storage::read_loan(&env, &borrower).ok_or(ContractError::NoOpenLoan)?;

        let index = TransferIndexClient::new(&env, &config.transfer_index);
        let transfer = match index.try_transfer_of(&tx_id) {
            Ok(Ok(Some(transfer))) => transfer,
            _ => return Err(ContractError::TransferNotFound),
        };
        if transfer.sender != borrower
            || transfer.recipient != env.current_contract_address()
            || transfer.asset != config.pegged_asset
        {
            return Err(ContractError::ForeignTransfer);
        }
        if transfer.amount != loan.lend_amount {
            log!(&env, "borrower must return exactly", loan.lend_amount);
            return Err(ContractError::WrongRepaymentAmount);
        }

        let height = current_height(&env);
        let settlement = settlement::settle(&loan, height)?;

        storage::register_return(&env, &tx_id);
        close_settled(&env, &config, &borrower, &settlement);

        publish_restore(
            &env,
            SettlementEvent {
                borrower,
                lend_amount: loan.lend_amount,
                borrower_amount: settlement.borrower_amount,
                owner_amount: settlement.owner_amount,
                height,
                tx_id: Some(tx_id),
            },
        );
        Ok(settlement)
    }

    /// Forfeit an expired loan: the whole deposit goes to the owner and the debt
    /// is written off. Callable by anyone.
    ///
    /// # Errors
    /// - `NoOpenLoan` – borrower has no loan
    /// - `LoanNotExpired` – interest window still running
    pub fn close_expired_for(env: Env, borrower: Address) -> Result<(), ContractError> {
        storage::extend_instance(&env);
        let config = storage::read_config(&env)?;

        let loan = storage::read_loan(&env, &borrower).ok_or(ContractError::NoOpenLoan)?;
        let height = current_height(&env);
        if !settlement::is_expired(&loan, height) {
            return Err(ContractError::LoanNotExpired);
        }

        close_settled(
            &env,
            &config,
            &borrower,
            &Settlement {
                borrower_amount: 0,
                owner_amount: loan.deposit_amount,
            },
        );

        publish_expired(
            &env,
            ExpiredEvent {
                borrower,
                forfeited_deposit: loan.deposit_amount,
                written_off: loan.lend_amount,
                height,
            },
        );
        Ok(())
    }

    /// Get the contract configuration (view function).
    pub fn get_config(env: Env) -> Option<PawnshopConfig> {
        storage::read_config(&env).ok()
    }

    /// Get the open loan of a borrower (view function).
    pub fn get_loan(env: Env, borrower: Address) -> Option<Loan> {
        storage::read_loan(&env, &borrower)
    }

    /// Whether a transfer id was already consumed by `restore_buy_back` (view function).
    pub fn is_registered_return(env: Env, tx_id: BytesN<32>) -> bool {
        storage::is_registered_return(&env, &tx_id)
    }

    /// Settlement a `buy_back` would produce at the current ledger (view function).
    pub fn quote_buy_back(env: Env, borrower: Address) -> Result<Settlement, ContractError> {
        let loan = storage::read_loan(&env, &borrower).ok_or(ContractError::NoOpenLoan)?;
        settlement::settle(&loan, current_height(&env))
    }

    /// Smallest payment `borrow` currently accepts (view function).
    pub fn minimum_deposit(env: Env) -> Result<i128, ContractError> {
        let config = storage::read_config(&env)?;
        let (_, minimum) = lending_rate(&env, &config)?;
        Ok(minimum)
    }
}
