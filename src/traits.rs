//! Traits for storage abstraction

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::types::*;

/// Raw string-keyed persistence, the equivalent of browser local storage
///
/// Implementations only move opaque payloads. Parsing and validation belong
/// to the [`RecordStore`] built on top.
pub trait KeyValueStore: Send + Sync {
    /// Read the payload stored under `key`
    fn get(&self, key: &str) -> LoanResult<Option<String>>;

    /// Replace the payload stored under `key`
    fn set(&self, key: &str, value: &str) -> LoanResult<()>;

    /// Remove `key`, returning whether it existed
    fn remove(&self, key: &str) -> LoanResult<bool>;
}

/// Record persistence for the three loan-engine collections
///
/// Every mutation reads the whole collection, changes it in memory, and
/// writes it back. Two independent writers sharing a backend can therefore
/// lose each other's updates; the last writer wins.
///
/// Amounts are persisted as JSON strings (`"1100.5"`). Numeric amounts are
/// accepted on read, but other readers of the same collections must accept
/// the string form.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Configuration governing limits, keys and write-time checks
    fn config(&self) -> &EngineConfig;

    /// All customers in insertion order
    async fn list_customers(&self) -> LoanResult<Vec<Customer>>;

    /// Register a customer with a generated id
    async fn create_customer(&mut self, name: &str) -> LoanResult<Customer>;

    /// Get a customer by ID
    async fn get_customer(&self, customer_id: &str) -> LoanResult<Option<Customer>>;

    /// Overwrite the whole customer collection
    async fn save_customers(&mut self, customers: &[Customer]) -> LoanResult<()>;

    /// All loans in origination order
    async fn list_loans(&self) -> LoanResult<Vec<Loan>>;

    /// Persist a new loan with a generated id
    async fn create_loan(&mut self, loan: NewLoan) -> LoanResult<Loan>;

    /// Get a loan by ID
    async fn get_loan(&self, loan_id: &str) -> LoanResult<Option<Loan>>;

    /// Replace a stored loan in place
    async fn update_loan(&mut self, loan: &Loan) -> LoanResult<()>;

    /// All payments in recording order
    async fn list_payments(&self) -> LoanResult<Vec<Payment>>;

    /// Append a payment with a generated id
    async fn create_payment(&mut self, payment: NewPayment) -> LoanResult<Payment>;

    /// Get a payment by ID
    async fn get_payment(&self, payment_id: &str) -> LoanResult<Option<Payment>>;

    /// Payments recorded against one loan, in recording order
    async fn list_payments_for_loan(&self, loan_id: &str) -> LoanResult<Vec<Payment>> {
        Ok(self
            .list_payments()
            .await?
            .into_iter()
            .filter(|payment| payment.loan_id == loan_id)
            .collect())
    }
}
