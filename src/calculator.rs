//! Simple-interest loan calculations

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::types::{LoanError, LoanResult};

/// Decimal places kept in the balance/EMI quotient before taking the ceiling
///
/// Division carries 100 significant digits, so the error of a repeating EMI
/// stays well below this scale.
const EMI_QUOTIENT_SCALE: i64 = 50;

/// Totals for a prospective loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculation {
    /// Interest over the full term
    pub total_interest: BigDecimal,
    /// Principal plus interest
    pub total_amount: BigDecimal,
    /// Equal monthly installment
    pub monthly_emi: BigDecimal,
}

/// Calculate simple-interest totals and the monthly installment
///
/// `total_interest = principal * years * rate / 100`, spread evenly over
/// `years * 12` months. No rounding is applied; formatting to currency
/// precision is left to the caller.
///
/// # Panics
///
/// Divides by `years * 12`, so `years` must be positive. Callers validate
/// inputs before calling (see [`crate::utils::validate_loan_terms`]).
pub fn calculate_loan(
    principal: &BigDecimal,
    years: u32,
    annual_rate_percent: &BigDecimal,
) -> LoanCalculation {
    let years_dec = BigDecimal::from(years);
    let total_interest = principal * &years_dec * annual_rate_percent / BigDecimal::from(100);
    let total_amount = principal + &total_interest;
    let monthly_emi = &total_amount / BigDecimal::from(years * 12);

    LoanCalculation {
        total_interest,
        total_amount,
        monthly_emi,
    }
}

/// Number of installments needed to clear `remaining_balance`
///
/// Zero once the balance is settled, otherwise the smallest `k` with
/// `k * monthly_emi >= remaining_balance`.
pub fn remaining_emis(remaining_balance: &BigDecimal, monthly_emi: &BigDecimal) -> LoanResult<u32> {
    let zero = BigDecimal::from(0);
    if *remaining_balance <= zero {
        return Ok(0);
    }
    if *monthly_emi <= zero {
        return Err(LoanError::Validation(format!(
            "Monthly EMI must be positive while a balance of {} is outstanding",
            remaining_balance
        )));
    }

    let quotient = (remaining_balance / monthly_emi).round(EMI_QUOTIENT_SCALE);
    let whole = quotient.with_scale(0);
    let count = if whole < quotient {
        whole + BigDecimal::from(1)
    } else {
        whole
    };

    count.to_u32().ok_or_else(|| {
        LoanError::Validation(format!("Remaining EMI count {} is out of range", count))
    })
}
