//! Loan desk walkthrough: seed customers, originate a loan, take payments

use bigdecimal::BigDecimal;
use loan_ledger_core::{LoanBook, MemoryRecordStore, PaymentType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Loan Ledger Core - Loan Desk Example\n");

    let mut book = LoanBook::new(MemoryRecordStore::in_memory());

    // 1. Seed the sample customers
    book.initialize_sample_data().await?;
    let customers = book.list_customers().await?;
    for customer in &customers {
        println!("  ✓ Customer: {} - {}", customer.customer_id, customer.name);
    }
    println!();

    // 2. Quote and originate a loan
    let principal = BigDecimal::from(120000);
    let rate = BigDecimal::from(9);
    let quote = book.quote_loan(&principal, 3, &rate)?;
    println!("📋 Quote for 120,000 over 3 years at 9%:");
    println!("  Interest: {}", quote.total_interest.with_scale(2));
    println!("  Total:    {}", quote.total_amount.with_scale(2));
    println!("  EMI:      {}\n", quote.monthly_emi.with_scale(2));

    let borrower = &customers[0];
    let loan = book
        .originate_loan(&borrower.customer_id, principal, 3, rate)
        .await?;
    println!("  ✓ Originated {} for {}\n", loan.loan_id, borrower.name);

    // 3. Take two EMIs and a lump sum
    book.record_payment(&loan.loan_id, loan.monthly_emi.clone(), PaymentType::Emi)
        .await?;
    book.record_payment(&loan.loan_id, loan.monthly_emi.clone(), PaymentType::Emi)
        .await?;
    book.record_payment(&loan.loan_id, BigDecimal::from(25000), PaymentType::LumpSum)
        .await?;

    // 4. Statements
    if let Some(ledger) = book.get_ledger(&loan.loan_id).await? {
        println!("📒 Ledger for {}", ledger.loan_id);
        for txn in &ledger.transactions {
            println!(
                "  {}  {:<16} {:>12}",
                txn.date.format("%Y-%m-%d %H:%M"),
                format!("{:?}", txn.kind),
                txn.amount.with_scale(2)
            );
        }
        println!("  Paid:      {}", ledger.amount_paid.with_scale(2));
        println!("  Balance:   {}", ledger.balance_amount.with_scale(2));
        println!("  EMIs left: {}\n", ledger.emis_left);
    }

    if let Some(overview) = book.get_account_overview(&borrower.customer_id).await? {
        println!("👤 {} has {} loan(s)", borrower.name, overview.total_loans);
        for summary in &overview.loans {
            println!(
                "  {} {:?} balance {}",
                summary.loan_id,
                summary.status,
                summary.balance_amount.with_scale(2)
            );
        }
        println!();
    }

    let dashboard = book.get_dashboard().await?;
    println!("📊 Dashboard");
    println!("  Customers:   {}", dashboard.total_customers);
    println!("  Lent:        {}", dashboard.total_principal.with_scale(2));
    println!("  Received:    {}", dashboard.total_received.with_scale(2));
    println!("  Outstanding: {}", dashboard.total_outstanding.with_scale(2));
    println!(
        "  Active / paid off: {} / {}",
        dashboard.active_loans, dashboard.paid_off_loans
    );

    Ok(())
}
