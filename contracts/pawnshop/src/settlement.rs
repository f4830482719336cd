//! Repayment split between borrower and owner as a function of ledger height.

use crate::types::{ContractError, Loan, Settlement};

/// Splits `loan.deposit_amount` for a repayment at `height`.
///
/// Up to and including `grace_end` the whole deposit goes back to the borrower.
/// After that the refundable part decays linearly over the loan's burndown
/// window, the rest going to the owner. At `interest_end` and later the loan
/// is expired and can no longer be repaid.
pub fn settle(loan: &Loan, height: u32) -> Result<Settlement, ContractError> {
    if height <= loan.grace_end {
        return Ok(Settlement {
            borrower_amount: loan.deposit_amount,
            owner_amount: 0,
        });
    }
    if height >= loan.interest_end {
        return Err(ContractError::LoanExpired);
    }

    let elapsed = height - loan.grace_end;
    let burndown = loan.burndown_end.saturating_sub(loan.grace_end).max(1);
    let remaining = burndown.saturating_sub(elapsed);

    let retained = loan
        .deposit_amount
        .checked_mul(i128::from(remaining))
        .ok_or(ContractError::Overflow)?
        / i128::from(burndown);
    let retained = retained.clamp(0, loan.deposit_amount);

    Ok(Settlement {
        borrower_amount: retained,
        owner_amount: loan.deposit_amount - retained,
    })
}

/// True once `height` has reached the loan's interest deadline.
pub fn is_expired(loan: &Loan, height: u32) -> bool {
    height >= loan.interest_end
}
