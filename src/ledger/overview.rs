//! Per-customer account overview

use tracing::debug;

use crate::ledger::LoanPosition;
use crate::traits::*;
use crate::types::*;

/// Summarize every loan of a customer
///
/// Returns `None` when the customer has no loans. An unknown customer and a
/// registered customer without loans look the same here; use
/// [`RecordStore::get_customer`] to tell them apart.
pub async fn get_account_overview<S: RecordStore + ?Sized>(
    store: &S,
    customer_id: &str,
) -> LoanResult<Option<AccountOverview>> {
    let loans: Vec<Loan> = store
        .list_loans()
        .await?
        .into_iter()
        .filter(|loan| loan.customer_id == customer_id)
        .collect();

    if loans.is_empty() {
        debug!(customer_id, "no loans for customer");
        return Ok(None);
    }

    let payments = store.list_payments().await?;
    let summaries = loans
        .into_iter()
        .map(|loan| -> LoanResult<LoanSummary> {
            let position = LoanPosition::derive(&loan, &payments)?;
            Ok(LoanSummary {
                total_interest: loan.total_interest(),
                status: position.status(),
                loan_id: loan.loan_id,
                principal: loan.principal_amount,
                total_amount: loan.total_amount,
                emi_amount: loan.monthly_emi,
                amount_paid: position.amount_paid,
                balance_amount: position.balance_amount,
                emis_left: position.emis_left,
            })
        })
        .collect::<LoanResult<Vec<_>>>()?;

    debug!(customer_id, loans = summaries.len(), "account overview built");

    Ok(Some(AccountOverview {
        customer_id: customer_id.to_string(),
        total_loans: summaries.len(),
        loans: summaries,
    }))
}
