//! Integration tests for loan-ledger-core

use bigdecimal::BigDecimal;
use loan_ledger_core::{
    calculate_loan, remaining_emis,
    utils::{FileStorage, MemoryStorage},
    EngineConfig, KeyValueRecordStore, KeyValueStore, LoanBook, LoanError, LoanResult,
    LoanStatus, MemoryRecordStore, OverpaymentPolicy, PaymentType, RecordStore, TransactionKind,
};
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Backend whose disk has gone away
struct UnreachableDisk;

impl KeyValueStore for UnreachableDisk {
    fn get(&self, key: &str) -> LoanResult<Option<String>> {
        Err(LoanError::Storage(format!("cannot read {}", key)))
    }

    fn set(&self, key: &str, _value: &str) -> LoanResult<()> {
        Err(LoanError::Storage(format!("cannot write {}", key)))
    }

    fn remove(&self, key: &str) -> LoanResult<bool> {
        Err(LoanError::Storage(format!("cannot remove {}", key)))
    }
}

fn scratch_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("loan-ledger-{}-{}", tag, uuid::Uuid::new_v4()))
}

#[test]
fn test_origination_totals() {
    let calc = calculate_loan(&BigDecimal::from(12000), 1, &BigDecimal::from(10));
    assert_eq!(calc.total_interest, BigDecimal::from(1200));
    assert_eq!(calc.total_amount, BigDecimal::from(13200));
    assert_eq!(calc.monthly_emi, dec("1100.00"));
    assert_eq!(
        remaining_emis(&calc.total_amount, &calc.monthly_emi).unwrap(),
        12
    );
}

#[tokio::test]
async fn test_complete_loan_lifecycle() {
    let mut book = LoanBook::new(MemoryRecordStore::in_memory());
    assert!(book.initialize_sample_data().await.unwrap());

    let customers = book.list_customers().await.unwrap();
    let jane = customers.iter().find(|c| c.name == "Jane Smith").unwrap();

    let loan = book
        .originate_loan(&jane.customer_id, BigDecimal::from(12000), 1, BigDecimal::from(10))
        .await
        .unwrap();

    // One EMI brings the balance down by exactly one installment
    book.record_payment(&loan.loan_id, BigDecimal::from(1100), PaymentType::Emi)
        .await
        .unwrap();
    let ledger = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();
    assert_eq!(ledger.balance_amount, BigDecimal::from(12100));
    assert_eq!(ledger.emis_left, 11);

    // Settle the rest with a lump sum
    book.record_payment(&loan.loan_id, BigDecimal::from(12100), PaymentType::LumpSum)
        .await
        .unwrap();
    let ledger = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();
    assert!(ledger.is_paid_off());
    assert_eq!(ledger.emis_left, 0);
    assert_eq!(ledger.amount_paid, BigDecimal::from(13200));

    let kinds: Vec<TransactionKind> = ledger.transactions.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::LoanDisbursed,
            TransactionKind::Emi,
            TransactionKind::LumpSum
        ]
    );

    // Nothing more is accepted once the loan is settled
    let extra = book
        .record_payment(&loan.loan_id, BigDecimal::from(1), PaymentType::Emi)
        .await;
    assert!(matches!(extra, Err(LoanError::Validation(_))));

    let overview = book
        .get_account_overview(&jane.customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(overview.total_loans, 1);
    assert_eq!(overview.loans[0].status, LoanStatus::PaidOff);

    let dashboard = book.get_dashboard().await.unwrap();
    assert_eq!(dashboard.total_customers, 3);
    assert_eq!(dashboard.paid_off_loans, 1);
    assert_eq!(dashboard.total_outstanding, BigDecimal::from(0));
    assert_eq!(dashboard.recent_payments.len(), 2);
    assert_eq!(
        dashboard.recent_payments[0].customer_name.as_deref(),
        Some("Jane Smith")
    );
}

#[tokio::test]
async fn test_payments_decrease_balance_monotonically() {
    let mut book = LoanBook::new(MemoryRecordStore::in_memory());
    let customer = book.create_customer("Alice").await.unwrap();
    let loan = book
        .originate_loan(&customer.customer_id, BigDecimal::from(50000), 5, dec("7.5"))
        .await
        .unwrap();

    let mut previous = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();
    for amount in ["1000", "2500.75", "833.33", "10000"] {
        let amount = dec(amount);
        book.record_payment(&loan.loan_id, amount.clone(), PaymentType::LumpSum)
            .await
            .unwrap();
        let current = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();

        assert_eq!(&previous.balance_amount - &current.balance_amount, amount);
        assert!(current.emis_left <= previous.emis_left);
        previous = current;
    }
}

#[tokio::test]
async fn test_overpayment_clamps_when_allowed() {
    let config = EngineConfig::default().with_overpayment(OverpaymentPolicy::Allow);
    let store = KeyValueRecordStore::with_config(MemoryStorage::new(), config).unwrap();
    let mut book = LoanBook::new(store);

    let customer = book.create_customer("Bob").await.unwrap();
    let loan = book
        .originate_loan(&customer.customer_id, BigDecimal::from(500), 1, BigDecimal::from(0))
        .await
        .unwrap();
    book.record_payment(&loan.loan_id, BigDecimal::from(600), PaymentType::LumpSum)
        .await
        .unwrap();

    let ledger = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();
    assert_eq!(ledger.balance_amount, BigDecimal::from(0));
    assert_eq!(ledger.emis_left, 0);
    assert_eq!(
        book.get_loan(&loan.loan_id).await.unwrap().unwrap().status,
        LoanStatus::PaidOff
    );
}

#[tokio::test]
async fn test_overpayment_rejected_by_default() {
    let mut book = LoanBook::new(MemoryRecordStore::in_memory());
    let customer = book.create_customer("Bob").await.unwrap();
    let loan = book
        .originate_loan(&customer.customer_id, BigDecimal::from(500), 1, BigDecimal::from(0))
        .await
        .unwrap();

    let result = book
        .record_payment(&loan.loan_id, BigDecimal::from(600), PaymentType::LumpSum)
        .await;
    assert!(matches!(result, Err(LoanError::Validation(_))));
    assert!(book.list_payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lookups_report_not_found() {
    let mut book = LoanBook::new(MemoryRecordStore::in_memory());
    assert!(book.get_ledger("LOAN_unknown").await.unwrap().is_none());

    let customer = book.create_customer("No Loans Yet").await.unwrap();
    assert!(book
        .get_account_overview(&customer.customer_id)
        .await
        .unwrap()
        .is_none());
    // The customer itself still resolves
    assert!(book
        .get_customer(&customer.customer_id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_overview_aggregates_customer_loans() {
    let mut book = LoanBook::new(MemoryRecordStore::in_memory());
    let alice = book.create_customer("Alice").await.unwrap();
    let bob = book.create_customer("Bob").await.unwrap();

    let principals = [10000, 25000, 4000];
    for principal in principals {
        book.originate_loan(&alice.customer_id, BigDecimal::from(principal), 2, BigDecimal::from(12))
            .await
            .unwrap();
    }
    book.originate_loan(&bob.customer_id, BigDecimal::from(99999), 3, BigDecimal::from(5))
        .await
        .unwrap();

    let overview = book
        .get_account_overview(&alice.customer_id)
        .await
        .unwrap()
        .unwrap();
    let own_loans = book
        .list_loans()
        .await
        .unwrap()
        .into_iter()
        .filter(|l| l.customer_id == alice.customer_id)
        .count();
    assert_eq!(overview.total_loans, own_loans);

    let summed: BigDecimal = overview.loans.iter().map(|s| &s.principal).sum();
    assert_eq!(summed, BigDecimal::from(39000));
    for summary in &overview.loans {
        assert_eq!(summary.total_interest, &summary.total_amount - &summary.principal);
        assert_eq!(summary.emis_left, 24);
    }
}

#[tokio::test]
async fn test_file_backend_survives_reopen() {
    let dir = scratch_dir("reopen");

    let loan_id = {
        let store = KeyValueRecordStore::new(FileStorage::open(&dir).unwrap());
        let mut book = LoanBook::new(store);
        let customer = book.create_customer("Persistent Pat").await.unwrap();
        let loan = book
            .originate_loan(&customer.customer_id, BigDecimal::from(24000), 2, BigDecimal::from(6))
            .await
            .unwrap();
        book.record_payment(&loan.loan_id, BigDecimal::from(1000), PaymentType::Emi)
            .await
            .unwrap();
        loan.loan_id
    };

    let reopened = KeyValueRecordStore::new(FileStorage::open(&dir).unwrap());
    let ledger = LoanBook::new(reopened)
        .get_ledger(&loan_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.total_amount, BigDecimal::from(26880));
    assert_eq!(ledger.balance_amount, BigDecimal::from(25880));
    assert_eq!(ledger.transactions.len(), 2);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_reads_records_written_by_the_original_app() {
    let backend = MemoryStorage::new();
    backend
        .set(
            "bank_customers",
            r#"[{"customer_id":"CUST_001","name":"John Doe","created_at":"2024-01-01T09:00:00.000Z"}]"#,
        )
        .unwrap();
    backend
        .set(
            "bank_loans",
            r#"[{"loan_id":"LOAN_1","customer_id":"CUST_001","principal_amount":12000,
                "total_amount":13200,"interest_rate":10,"loan_period_years":1,
                "monthly_emi":1100,"status":"ACTIVE","created_at":"2024-01-02T09:00:00.000Z"}]"#,
        )
        .unwrap();
    backend
        .set(
            "bank_payments",
            r#"[{"payment_id":"PAY_1","loan_id":"LOAN_1","amount":1100,
                "payment_type":"EMI","payment_date":"2024-02-02T09:00:00.000Z"}]"#,
        )
        .unwrap();

    let store = KeyValueRecordStore::new(backend);
    let ledger = LoanBook::new(store)
        .get_ledger("LOAN_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.balance_amount, BigDecimal::from(12100));
    assert_eq!(ledger.emis_left, 11);
}

#[tokio::test]
async fn test_config_file_drives_store() {
    let dir = scratch_dir("config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("engine.json");
    std::fs::write(
        &path,
        r#"{"storage_keys": {"customers": "c", "loans": "l", "payments": "p"},
            "enforce_references": false}"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    let backend = MemoryStorage::new();
    let mut store = KeyValueRecordStore::with_config(backend.clone(), config).unwrap();
    store.create_customer("Keyed").await.unwrap();

    assert!(backend.get("c").unwrap().is_some());
    assert!(backend.get("bank_customers").unwrap().is_none());

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_backend_failures_surface_as_storage_errors() {
    let mut book = LoanBook::new(KeyValueRecordStore::new(UnreachableDisk));

    assert!(matches!(
        book.list_customers().await,
        Err(LoanError::Storage(_))
    ));
    assert!(matches!(
        book.create_customer("Jane Smith").await,
        Err(LoanError::Storage(_))
    ));
    assert!(matches!(
        book.get_ledger("LOAN_1").await,
        Err(LoanError::Storage(_))
    ));
    assert!(matches!(
        book.record_payment("LOAN_1", BigDecimal::from(100), PaymentType::Emi)
            .await,
        Err(LoanError::Storage(_))
    ));
    assert!(matches!(book.get_dashboard().await, Err(LoanError::Storage(_))));
}

#[tokio::test]
async fn test_store_writes_amounts_as_json_strings() {
    let backend = MemoryStorage::new();
    let mut book = LoanBook::new(KeyValueRecordStore::new(backend.clone()));
    let customer = book.create_customer("Jane Smith").await.unwrap();
    book.originate_loan(&customer.customer_id, BigDecimal::from(12000), 1, BigDecimal::from(10))
        .await
        .unwrap();

    let raw = backend.get("bank_loans").unwrap().unwrap();
    let loans: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(loans[0]["principal_amount"].is_string());
    assert_eq!(loans[0]["status"], "ACTIVE");
}
