//! Loan book that coordinates the record store and the derived statements

use bigdecimal::BigDecimal;
use tracing::{debug, info, warn};

use crate::calculator::{calculate_loan, LoanCalculation};
use crate::config::EngineConfig;
use crate::ledger::{get_account_overview, get_dashboard, get_ledger, LoanPosition};
use crate::traits::*;
use crate::types::*;
use crate::utils::seed;
use crate::utils::validation::validate_loan_terms;

/// Entry point for presentation code
///
/// Owns an injected [`RecordStore`]; nothing is held in process-wide state.
/// Every query recomputes from the current records. Limits and dashboard
/// sizes come from the store's [`EngineConfig`], so quoting and persisting
/// always agree.
pub struct LoanBook<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> LoanBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        self.store.config()
    }

    /// Seed the sample customers into an empty book
    pub async fn initialize_sample_data(&mut self) -> LoanResult<bool> {
        seed::initialize_sample_data(&mut self.store).await
    }

    // Customer operations
    /// Register a new customer
    pub async fn create_customer(&mut self, name: &str) -> LoanResult<Customer> {
        self.store.create_customer(name).await
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: &str) -> LoanResult<Option<Customer>> {
        self.store.get_customer(customer_id).await
    }

    /// List all customers
    pub async fn list_customers(&self) -> LoanResult<Vec<Customer>> {
        self.store.list_customers().await
    }

    // Loan operations
    /// Validate origination inputs and compute the loan totals
    pub fn quote_loan(
        &self,
        principal: &BigDecimal,
        years: u32,
        annual_rate_percent: &BigDecimal,
    ) -> LoanResult<LoanCalculation> {
        validate_loan_terms(principal, years, annual_rate_percent, &self.config().limits)?;
        Ok(calculate_loan(principal, years, annual_rate_percent))
    }

    /// Originate an active loan for a customer from its terms
    pub async fn originate_loan(
        &mut self,
        customer_id: &str,
        principal: BigDecimal,
        years: u32,
        annual_rate_percent: BigDecimal,
    ) -> LoanResult<Loan> {
        let quote = self.quote_loan(&principal, years, &annual_rate_percent)?;
        debug!(
            customer_id,
            total = %quote.total_amount,
            emi = %quote.monthly_emi,
            "loan quoted"
        );

        self.store
            .create_loan(NewLoan {
                customer_id: customer_id.to_string(),
                principal_amount: principal,
                total_amount: quote.total_amount,
                interest_rate: annual_rate_percent,
                loan_period_years: years,
                monthly_emi: quote.monthly_emi,
                status: LoanStatus::Active,
            })
            .await
    }

    /// Persist a loan whose totals the caller computed
    pub async fn create_loan(&mut self, loan: NewLoan) -> LoanResult<Loan> {
        self.store.create_loan(loan).await
    }

    /// Get a loan by ID
    pub async fn get_loan(&self, loan_id: &str) -> LoanResult<Option<Loan>> {
        self.store.get_loan(loan_id).await
    }

    /// List all loans
    pub async fn list_loans(&self) -> LoanResult<Vec<Loan>> {
        self.store.list_loans().await
    }

    /// Loans that still carry a positive derived balance
    pub async fn list_active_loans(&self) -> LoanResult<Vec<Loan>> {
        let payments = self.store.list_payments().await?;
        let mut active = Vec::new();
        for loan in self.store.list_loans().await? {
            if !LoanPosition::derive(&loan, &payments)?.is_paid_off() {
                active.push(loan);
            }
        }
        Ok(active)
    }

    // Payment operations
    /// Record a payment dated now
    pub async fn record_payment(
        &mut self,
        loan_id: &str,
        amount: BigDecimal,
        payment_type: PaymentType,
    ) -> LoanResult<Payment> {
        self.submit_payment(NewPayment::new(loan_id, amount, payment_type))
            .await
    }

    /// Record a payment and bring the loan's display status in line with its balance
    ///
    /// Once the payment is stored it is returned even if the status refresh
    /// fails; the stored status is cosmetic and is rewritten on the next payment.
    pub async fn submit_payment(&mut self, payment: NewPayment) -> LoanResult<Payment> {
        let payment = self.store.create_payment(payment).await?;
        if let Err(e) = self.refresh_loan_status(&payment.loan_id).await {
            warn!(
                loan_id = %payment.loan_id,
                payment_id = %payment.payment_id,
                error = %e,
                "payment recorded but loan status was not refreshed"
            );
        }
        Ok(payment)
    }

    /// Rewrite the cosmetic status of a loan from its derived balance
    ///
    /// Returns the derived status, or `None` for an unknown loan.
    pub async fn refresh_loan_status(&mut self, loan_id: &str) -> LoanResult<Option<LoanStatus>> {
        let Some(mut loan) = self.store.get_loan(loan_id).await? else {
            return Ok(None);
        };
        let payments = self.store.list_payments_for_loan(loan_id).await?;
        let status = LoanPosition::derive(&loan, &payments)?.status();

        if loan.status != status {
            loan.status = status;
            self.store.update_loan(&loan).await?;
            info!(loan_id, status = ?status, "loan status refreshed");
        }
        Ok(Some(status))
    }

    /// List all payments
    pub async fn list_payments(&self) -> LoanResult<Vec<Payment>> {
        self.store.list_payments().await
    }

    /// Get a payment by ID
    pub async fn get_payment(&self, payment_id: &str) -> LoanResult<Option<Payment>> {
        self.store.get_payment(payment_id).await
    }

    /// Payments recorded against one loan
    pub async fn list_payments_for_loan(&self, loan_id: &str) -> LoanResult<Vec<Payment>> {
        self.store.list_payments_for_loan(loan_id).await
    }

    // Statements
    /// Ledger of one loan, `None` if the loan does not exist
    pub async fn get_ledger(&self, loan_id: &str) -> LoanResult<Option<LedgerResponse>> {
        get_ledger(&self.store, loan_id).await
    }

    /// Overview of a customer's loans, `None` if the customer has none
    pub async fn get_account_overview(
        &self,
        customer_id: &str,
    ) -> LoanResult<Option<AccountOverview>> {
        get_account_overview(&self.store, customer_id).await
    }

    /// Portfolio dashboard sized by the configured recent limit
    pub async fn get_dashboard(&self) -> LoanResult<DashboardSummary> {
        get_dashboard(&self.store, self.config().dashboard_recent_limit).await
    }
}
