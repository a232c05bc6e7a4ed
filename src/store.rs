//! Record store persisted as whole JSON collections in a key-value backend

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::traits::*;
use crate::types::*;
use crate::utils::memory_storage::MemoryStorage;
use crate::utils::validation::*;

const CUSTOMER_PREFIX: &str = "CUST";
const LOAN_PREFIX: &str = "LOAN";
const PAYMENT_PREFIX: &str = "PAY";

/// [`RecordStore`] over any [`KeyValueStore`]
///
/// Each collection lives under one key as a JSON array in insertion order.
/// A payload that fails to parse is logged and read as an empty collection,
/// so the next write to that collection replaces it.
#[derive(Debug, Clone)]
pub struct KeyValueRecordStore<K: KeyValueStore> {
    backend: K,
    config: EngineConfig,
}

/// Record store over process memory, mainly for tests
pub type MemoryRecordStore = KeyValueRecordStore<MemoryStorage>;

impl KeyValueRecordStore<MemoryStorage> {
    /// Store over a fresh in-memory backend with default configuration
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<K: KeyValueStore> KeyValueRecordStore<K> {
    /// Create a store with default configuration
    pub fn new(backend: K) -> Self {
        Self {
            backend,
            config: EngineConfig::default(),
        }
    }

    /// Create a store with a custom configuration
    pub fn with_config(backend: K, config: EngineConfig) -> LoanResult<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> LoanResult<Vec<T>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                error!(
                    key,
                    error = %e,
                    "persisted collection is unreadable, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist<T: Serialize>(&self, key: &str, records: &[T]) -> LoanResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(key, &raw)
    }
}

/// `<PREFIX>_<unix millis>_<9 random chars>`, retried until unused
fn generate_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let token = Uuid::new_v4().simple().to_string();
        let candidate = format!(
            "{}_{}_{}",
            prefix,
            Utc::now().timestamp_millis(),
            &token[..9]
        );
        if !taken(&candidate) {
            return candidate;
        }
    }
}

fn paid_on(payments: &[Payment], loan_id: &str) -> BigDecimal {
    payments
        .iter()
        .filter(|p| p.loan_id == loan_id)
        .map(|p| &p.amount)
        .sum()
}

#[async_trait]
impl<K: KeyValueStore> RecordStore for KeyValueRecordStore<K> {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn list_customers(&self) -> LoanResult<Vec<Customer>> {
        self.load(&self.config.storage_keys.customers)
    }

    async fn create_customer(&mut self, name: &str) -> LoanResult<Customer> {
        if let Err(e) = validate_customer_name(name) {
            warn!(error = %e, "rejected customer");
            return Err(e);
        }

        let key = &self.config.storage_keys.customers;
        let mut customers: Vec<Customer> = self.load(key)?;
        let customer = Customer {
            customer_id: generate_id(CUSTOMER_PREFIX, |id| {
                customers.iter().any(|c| c.customer_id == id)
            }),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        customers.push(customer.clone());
        self.persist(key, &customers)?;

        info!(customer_id = %customer.customer_id, "customer created");
        Ok(customer)
    }

    async fn get_customer(&self, customer_id: &str) -> LoanResult<Option<Customer>> {
        Ok(self
            .list_customers()
            .await?
            .into_iter()
            .find(|c| c.customer_id == customer_id))
    }

    async fn save_customers(&mut self, customers: &[Customer]) -> LoanResult<()> {
        self.persist(&self.config.storage_keys.customers, customers)?;
        info!(count = customers.len(), "customer collection replaced");
        Ok(())
    }

    async fn list_loans(&self) -> LoanResult<Vec<Loan>> {
        self.load(&self.config.storage_keys.loans)
    }

    async fn create_loan(&mut self, loan: NewLoan) -> LoanResult<Loan> {
        if let Err(e) = validate_new_loan(&loan, &self.config.limits) {
            warn!(customer_id = %loan.customer_id, error = %e, "rejected loan");
            return Err(e);
        }

        if self.config.enforce_references && self.get_customer(&loan.customer_id).await?.is_none()
        {
            warn!(customer_id = %loan.customer_id, "loan references unknown customer");
            return Err(LoanError::Validation(format!(
                "Customer '{}' does not exist",
                loan.customer_id
            )));
        }

        let key = &self.config.storage_keys.loans;
        let mut loans: Vec<Loan> = self.load(key)?;
        let record = Loan {
            loan_id: generate_id(LOAN_PREFIX, |id| loans.iter().any(|l| l.loan_id == id)),
            customer_id: loan.customer_id,
            principal_amount: loan.principal_amount,
            total_amount: loan.total_amount,
            interest_rate: loan.interest_rate,
            loan_period_years: loan.loan_period_years,
            monthly_emi: loan.monthly_emi,
            status: loan.status,
            created_at: Utc::now(),
        };
        loans.push(record.clone());
        self.persist(key, &loans)?;

        info!(
            loan_id = %record.loan_id,
            customer_id = %record.customer_id,
            principal = %record.principal_amount,
            "loan created"
        );
        Ok(record)
    }

    async fn get_loan(&self, loan_id: &str) -> LoanResult<Option<Loan>> {
        Ok(self
            .list_loans()
            .await?
            .into_iter()
            .find(|l| l.loan_id == loan_id))
    }

    async fn update_loan(&mut self, loan: &Loan) -> LoanResult<()> {
        let key = &self.config.storage_keys.loans;
        let mut loans: Vec<Loan> = self.load(key)?;
        let slot = loans
            .iter_mut()
            .find(|l| l.loan_id == loan.loan_id)
            .ok_or_else(|| LoanError::LoanNotFound(loan.loan_id.clone()))?;
        *slot = loan.clone();
        self.persist(key, &loans)?;

        info!(loan_id = %loan.loan_id, status = ?loan.status, "loan updated");
        Ok(())
    }

    async fn list_payments(&self) -> LoanResult<Vec<Payment>> {
        self.load(&self.config.storage_keys.payments)
    }

    async fn create_payment(&mut self, payment: NewPayment) -> LoanResult<Payment> {
        let key = &self.config.storage_keys.payments;
        let mut payments: Vec<Payment> = self.load(key)?;

        match self.get_loan(&payment.loan_id).await? {
            Some(loan) => {
                let paid = paid_on(&payments, &loan.loan_id);
                if let Err(e) =
                    validate_payment_amount(&loan, &paid, &payment.amount, self.config.overpayment)
                {
                    warn!(loan_id = %loan.loan_id, error = %e, "rejected payment");
                    return Err(e);
                }
            }
            None if self.config.enforce_references => {
                warn!(loan_id = %payment.loan_id, "payment references unknown loan");
                return Err(LoanError::Validation(format!(
                    "Loan '{}' does not exist",
                    payment.loan_id
                )));
            }
            None => validate_positive_amount("Payment amount", &payment.amount)?,
        }

        let record = Payment {
            payment_id: generate_id(PAYMENT_PREFIX, |id| {
                payments.iter().any(|p| p.payment_id == id)
            }),
            loan_id: payment.loan_id,
            amount: payment.amount,
            payment_type: payment.payment_type,
            payment_date: payment.payment_date.unwrap_or_else(Utc::now),
        };
        payments.push(record.clone());
        self.persist(key, &payments)?;

        info!(
            payment_id = %record.payment_id,
            loan_id = %record.loan_id,
            amount = %record.amount,
            payment_type = ?record.payment_type,
            "payment recorded"
        );
        Ok(record)
    }

    async fn get_payment(&self, payment_id: &str) -> LoanResult<Option<Payment>> {
        Ok(self
            .list_payments()
            .await?
            .into_iter()
            .find(|p| p.payment_id == payment_id))
    }
}
