//! Validation utilities

use bigdecimal::BigDecimal;

use crate::config::{LoanLimits, OverpaymentPolicy};
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(label: &str, amount: &BigDecimal) -> LoanResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LoanError::Validation(format!("{} must be positive", label)))
    } else {
        Ok(())
    }
}

/// Validate a customer name
pub fn validate_customer_name(name: &str) -> LoanResult<()> {
    if name.trim().is_empty() {
        return Err(LoanError::Validation(
            "Customer name cannot be empty".to_string(),
        ));
    }

    if name.trim().chars().count() > 100 {
        return Err(LoanError::Validation(
            "Customer name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate origination inputs before they reach the calculator
pub fn validate_loan_terms(
    principal: &BigDecimal,
    years: u32,
    annual_rate_percent: &BigDecimal,
    limits: &LoanLimits,
) -> LoanResult<()> {
    validate_positive_amount("Principal amount", principal)?;

    if years < limits.min_years || years > limits.max_years {
        return Err(LoanError::Validation(format!(
            "Loan period must be between {} and {} years, got {}",
            limits.min_years, limits.max_years, years
        )));
    }

    if *annual_rate_percent < BigDecimal::from(0) {
        return Err(LoanError::Validation(
            "Interest rate cannot be negative".to_string(),
        ));
    }

    if *annual_rate_percent > limits.max_interest_rate {
        return Err(LoanError::Validation(format!(
            "Interest rate cannot exceed {}%",
            limits.max_interest_rate
        )));
    }

    Ok(())
}

/// Validate a loan record before it is persisted
pub fn validate_new_loan(loan: &NewLoan, limits: &LoanLimits) -> LoanResult<()> {
    if loan.customer_id.trim().is_empty() {
        return Err(LoanError::Validation(
            "Loan must reference a customer".to_string(),
        ));
    }

    validate_loan_terms(
        &loan.principal_amount,
        loan.loan_period_years,
        &loan.interest_rate,
        limits,
    )?;

    if loan.total_amount < loan.principal_amount {
        return Err(LoanError::Validation(format!(
            "Total amount {} is less than principal {}",
            loan.total_amount, loan.principal_amount
        )));
    }

    validate_positive_amount("Monthly EMI", &loan.monthly_emi)
}

/// Check a payment against what is still owed on its loan
///
/// `paid_so_far` is the sum of payments already recorded on `loan`.
pub fn validate_payment_amount(
    loan: &Loan,
    paid_so_far: &BigDecimal,
    amount: &BigDecimal,
    policy: OverpaymentPolicy,
) -> LoanResult<()> {
    validate_positive_amount("Payment amount", amount)?;

    let outstanding = &loan.total_amount - paid_so_far;
    match policy {
        OverpaymentPolicy::Reject if *amount > outstanding => {
            Err(LoanError::Validation(format!(
                "Payment of {} exceeds the remaining balance of {} on loan {}",
                amount,
                outstanding.max(BigDecimal::from(0)),
                loan.loan_id
            )))
        }
        // Even when excess is absorbed, a loan already paid beyond its total takes nothing more
        OverpaymentPolicy::Allow if outstanding < BigDecimal::from(0) => {
            Err(LoanError::Validation(format!(
                "Loan {} is already overpaid by {}",
                loan.loan_id,
                outstanding.abs()
            )))
        }
        _ => Ok(()),
    }
}
