//! Core records and derived statements for the loan engine

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a payment was made against a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Scheduled equal monthly installment
    Emi,
    /// Extra, non-scheduled payment toward the balance
    LumpSum,
}

/// Display status of a loan
///
/// The value stored on a [`Loan`] is cosmetic. The engine always derives the
/// real status from the outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    PaidOff,
}

impl LoanStatus {
    /// Status implied by an outstanding balance
    pub fn from_balance(balance: &BigDecimal) -> Self {
        if *balance <= BigDecimal::from(0) {
            LoanStatus::PaidOff
        } else {
            LoanStatus::Active
        }
    }
}

/// A registered customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// An originated simple-interest loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: String,
    pub customer_id: String,
    pub principal_amount: BigDecimal,
    /// Principal plus total interest over the whole term
    pub total_amount: BigDecimal,
    /// Annual rate in percent
    pub interest_rate: BigDecimal,
    pub loan_period_years: u32,
    pub monthly_emi: BigDecimal,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// Interest charged over the whole term
    pub fn total_interest(&self) -> BigDecimal {
        &self.total_amount - &self.principal_amount
    }
}

/// Loan fields supplied by the caller; the store assigns id and creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub customer_id: String,
    pub principal_amount: BigDecimal,
    pub total_amount: BigDecimal,
    pub interest_rate: BigDecimal,
    pub loan_period_years: u32,
    pub monthly_emi: BigDecimal,
    pub status: LoanStatus,
}

/// A payment recorded against a loan. Payments are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    pub loan_id: String,
    pub amount: BigDecimal,
    pub payment_type: PaymentType,
    pub payment_date: DateTime<Utc>,
}

/// Payment fields supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub loan_id: String,
    pub amount: BigDecimal,
    pub payment_type: PaymentType,
    /// Defaults to the time of recording
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
}

impl NewPayment {
    /// Payment dated at the time it is recorded
    pub fn new(loan_id: impl Into<String>, amount: BigDecimal, payment_type: PaymentType) -> Self {
        Self {
            loan_id: loan_id.into(),
            amount,
            payment_type,
            payment_date: None,
        }
    }

    /// Back-date or post-date the payment
    pub fn dated(mut self, payment_date: DateTime<Utc>) -> Self {
        self.payment_date = Some(payment_date);
        self
    }
}

/// Kind of entry in a ledger history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    LoanDisbursed,
    Emi,
    LumpSum,
}

impl From<PaymentType> for TransactionKind {
    fn from(payment_type: PaymentType) -> Self {
        match payment_type {
            PaymentType::Emi => TransactionKind::Emi,
            PaymentType::LumpSum => TransactionKind::LumpSum,
        }
    }
}

/// Synthetic history entry, rebuilt on every ledger query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: DateTime<Utc>,
    pub amount: BigDecimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Per-loan statement of totals, payments, and balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub loan_id: String,
    pub customer_id: String,
    pub principal: BigDecimal,
    pub total_amount: BigDecimal,
    pub monthly_emi: BigDecimal,
    pub amount_paid: BigDecimal,
    pub balance_amount: BigDecimal,
    pub emis_left: u32,
    /// Disbursement and payments, ascending by date
    pub transactions: Vec<Transaction>,
}

impl LedgerResponse {
    pub fn is_paid_off(&self) -> bool {
        self.balance_amount <= BigDecimal::from(0)
    }
}

/// One loan as seen from the customer's account overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: String,
    pub principal: BigDecimal,
    pub total_amount: BigDecimal,
    pub total_interest: BigDecimal,
    pub emi_amount: BigDecimal,
    pub amount_paid: BigDecimal,
    pub balance_amount: BigDecimal,
    pub emis_left: u32,
    pub status: LoanStatus,
}

/// All loans of one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub customer_id: String,
    pub total_loans: usize,
    pub loans: Vec<LoanSummary>,
}

/// A recent payment with the borrower's name resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPayment {
    pub payment: Payment,
    pub customer_name: Option<String>,
}

/// An active loan's position for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLoanBalance {
    pub loan_id: String,
    pub customer_name: Option<String>,
    pub balance_amount: BigDecimal,
    pub emis_left: u32,
}

/// Portfolio-wide aggregate view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_customers: usize,
    pub total_loans: usize,
    /// Sum of principal over every loan
    pub total_principal: BigDecimal,
    /// Sum of every recorded payment
    pub total_received: BigDecimal,
    /// Sum of derived balances
    pub total_outstanding: BigDecimal,
    pub active_loans: usize,
    pub paid_off_loans: usize,
    /// Newest first
    pub recent_payments: Vec<RecentPayment>,
    pub active_balances: Vec<ActiveLoanBalance>,
}

/// Errors that can occur in the loan engine
#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Loan not found: {0}")]
    LoanNotFound(String),
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Result type for loan engine operations
pub type LoanResult<T> = Result<T, LoanError>;
