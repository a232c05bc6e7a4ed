//! Per-loan ledger statements

use tracing::debug;

use crate::ledger::LoanPosition;
use crate::traits::*;
use crate::types::*;

/// Build the ledger of one loan, or `None` if the loan does not exist
///
/// The history holds a synthetic disbursement entry followed by one entry per
/// payment, stably sorted by date. Nothing is cached; every call reads the
/// current payment set.
pub async fn get_ledger<S: RecordStore + ?Sized>(
    store: &S,
    loan_id: &str,
) -> LoanResult<Option<LedgerResponse>> {
    let Some(loan) = store.get_loan(loan_id).await? else {
        debug!(loan_id, "ledger requested for unknown loan");
        return Ok(None);
    };

    let payments = store.list_payments_for_loan(loan_id).await?;
    let position = LoanPosition::derive(&loan, &payments)?;

    let mut transactions = Vec::with_capacity(payments.len() + 1);
    transactions.push(Transaction {
        transaction_id: format!("LOAN_CREATE_{}", loan.loan_id),
        date: loan.created_at,
        amount: loan.principal_amount.clone(),
        kind: TransactionKind::LoanDisbursed,
    });
    transactions.extend(payments.into_iter().map(|p| Transaction {
        transaction_id: p.payment_id,
        date: p.payment_date,
        amount: p.amount,
        kind: p.payment_type.into(),
    }));
    transactions.sort_by_key(|t| t.date);

    debug!(
        loan_id,
        balance = %position.balance_amount,
        emis_left = position.emis_left,
        "ledger built"
    );

    Ok(Some(LedgerResponse {
        loan_id: loan.loan_id,
        customer_id: loan.customer_id,
        principal: loan.principal_amount,
        total_amount: loan.total_amount,
        monthly_emi: loan.monthly_emi,
        amount_paid: position.amount_paid,
        balance_amount: position.balance_amount,
        emis_left: position.emis_left,
        transactions,
    }))
}

/// Like [`get_ledger`], but an unknown loan is an error
pub async fn get_ledger_required<S: RecordStore + ?Sized>(
    store: &S,
    loan_id: &str,
) -> LoanResult<LedgerResponse> {
    get_ledger(store, loan_id)
        .await?
        .ok_or_else(|| LoanError::LoanNotFound(loan_id.to_string()))
}
