//! # Loan Ledger Core
//!
//! A loan accounting engine: register customers, originate simple-interest
//! loans, record payments, and derive statements from the raw records.
//!
//! ## Features
//!
//! - **Loan calculator**: Simple-interest totals, equal monthly installments, remaining EMI counts
//! - **Record store**: Customers, loans, and payments persisted as JSON collections in any key-value backend
//! - **Ledger statements**: Per-loan balance and time-ordered transaction history
//! - **Account overview**: Per-customer aggregation of every loan
//! - **Dashboard**: Portfolio totals, active and paid-off counts, recent payments
//!
//! Balances and statuses are always recomputed from payments; the status
//! stored on a loan is for display only.
//!
//! ## Quick Start
//!
//! ```rust
//! use loan_ledger_core::{LoanBook, MemoryRecordStore, PaymentType};
//! use bigdecimal::BigDecimal;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let mut book = LoanBook::new(MemoryRecordStore::in_memory());
//! let customer = book.create_customer("Jane Smith").await.unwrap();
//! let loan = book
//!     .originate_loan(&customer.customer_id, BigDecimal::from(12000), 1, BigDecimal::from(10))
//!     .await
//!     .unwrap();
//! book.record_payment(&loan.loan_id, BigDecimal::from(1100), PaymentType::Emi)
//!     .await
//!     .unwrap();
//!
//! let ledger = book.get_ledger(&loan.loan_id).await.unwrap().unwrap();
//! assert_eq!(ledger.emis_left, 11);
//! # });
//! ```

pub mod calculator;
pub mod config;
pub mod ledger;
pub mod store;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use calculator::*;
pub use config::*;
pub use ledger::*;
pub use store::*;
pub use traits::*;
pub use types::*;
