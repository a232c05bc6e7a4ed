//! Portfolio dashboard

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::ledger::LoanPosition;
use crate::traits::*;
use crate::types::*;

/// Aggregate the whole book
///
/// `recent_limit` caps both the recent-payment list and the active-balance
/// list. Balances and statuses are derived from payments, never read from
/// the stored loan status.
pub async fn get_dashboard<S: RecordStore + ?Sized>(
    store: &S,
    recent_limit: usize,
) -> LoanResult<DashboardSummary> {
    let customers = store.list_customers().await?;
    let loans = store.list_loans().await?;
    let mut payments = store.list_payments().await?;

    let names: HashMap<&str, &str> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.name.as_str()))
        .collect();
    let borrower_of: HashMap<&str, &str> = loans
        .iter()
        .map(|l| (l.loan_id.as_str(), l.customer_id.as_str()))
        .collect();
    let name_for_customer =
        |customer_id: &str| names.get(customer_id).map(|name| name.to_string());

    let mut total_principal = BigDecimal::from(0);
    let mut total_outstanding = BigDecimal::from(0);
    let mut active_balances = Vec::new();
    let mut active_loans = 0;

    for loan in &loans {
        let position = LoanPosition::derive(loan, &payments)?;
        total_principal += &loan.principal_amount;
        total_outstanding += &position.balance_amount;

        if !position.is_paid_off() {
            active_loans += 1;
            if active_balances.len() < recent_limit {
                active_balances.push(ActiveLoanBalance {
                    loan_id: loan.loan_id.clone(),
                    customer_name: name_for_customer(&loan.customer_id),
                    balance_amount: position.balance_amount,
                    emis_left: position.emis_left,
                });
            }
        }
    }

    let total_received: BigDecimal = payments.iter().map(|p| &p.amount).sum();

    payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
    let recent_payments = payments
        .into_iter()
        .take(recent_limit)
        .map(|payment| {
            let customer_name = borrower_of
                .get(payment.loan_id.as_str())
                .and_then(|customer_id| name_for_customer(*customer_id));
            RecentPayment {
                payment,
                customer_name,
            }
        })
        .collect();

    debug!(
        loans = loans.len(),
        active = active_loans,
        outstanding = %total_outstanding,
        "dashboard built"
    );

    Ok(DashboardSummary {
        total_customers: customers.len(),
        total_loans: loans.len(),
        total_principal,
        total_received,
        total_outstanding,
        active_loans,
        paid_off_loans: loans.len() - active_loans,
        recent_payments,
        active_balances,
    })
}
