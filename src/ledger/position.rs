//! Outstanding-balance derivation shared by every statement

use bigdecimal::BigDecimal;

use crate::calculator::remaining_emis;
use crate::types::*;

/// Where a loan stands given the payments recorded against it
#[derive(Debug, Clone, PartialEq)]
pub struct LoanPosition {
    pub amount_paid: BigDecimal,
    /// Never negative; overpayment clamps to zero
    pub balance_amount: BigDecimal,
    pub emis_left: u32,
}

impl LoanPosition {
    /// Derive the position of `loan` from a payment set
    ///
    /// Payments belonging to other loans are ignored, so callers may pass the
    /// whole payment collection.
    pub fn derive<'a>(
        loan: &Loan,
        payments: impl IntoIterator<Item = &'a Payment>,
    ) -> LoanResult<Self> {
        let amount_paid: BigDecimal = payments
            .into_iter()
            .filter(|p| p.loan_id == loan.loan_id)
            .map(|p| &p.amount)
            .sum();
        let balance_amount = (&loan.total_amount - &amount_paid).max(BigDecimal::from(0));
        let emis_left = remaining_emis(&balance_amount, &loan.monthly_emi)?;

        Ok(Self {
            amount_paid,
            balance_amount,
            emis_left,
        })
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance_amount <= BigDecimal::from(0)
    }

    pub fn status(&self) -> LoanStatus {
        LoanStatus::from_balance(&self.balance_amount)
    }
}
