//! Engine configuration

use std::path::Path;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{LoanError, LoanResult};

/// Storage keys under which the three collections are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub customers: String,
    pub loans: String,
    pub payments: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            customers: "bank_customers".to_string(),
            loans: "bank_loans".to_string(),
            payments: "bank_payments".to_string(),
        }
    }
}

/// Accepted ranges for loan origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub min_years: u32,
    pub max_years: u32,
    /// Highest annual rate in percent
    pub max_interest_rate: BigDecimal,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            min_years: 1,
            max_years: 30,
            max_interest_rate: BigDecimal::from(50),
        }
    }
}

/// What to do with a payment larger than the outstanding balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Reject the payment
    #[default]
    Reject,
    /// Record it; the balance clamps at zero and the excess is absorbed
    Allow,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub storage_keys: StorageKeys,
    pub limits: LoanLimits,
    pub overpayment: OverpaymentPolicy,
    /// Check that loans name a known customer and payments a known loan
    pub enforce_references: bool,
    /// Rows in each dashboard list
    pub dashboard_recent_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_keys: StorageKeys::default(),
            limits: LoanLimits::default(),
            overpayment: OverpaymentPolicy::default(),
            enforce_references: true,
            dashboard_recent_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(raw: &str) -> LoanResult<Self> {
        let config: EngineConfig = serde_json::from_str(raw)
            .map_err(|e| LoanError::Configuration(format!("unreadable config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> LoanResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LoanError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Builder-style override of the overpayment policy
    pub fn with_overpayment(mut self, policy: OverpaymentPolicy) -> Self {
        self.overpayment = policy;
        self
    }

    /// Builder-style override of reference checking
    pub fn with_enforce_references(mut self, enforce: bool) -> Self {
        self.enforce_references = enforce;
        self
    }

    pub fn validate(&self) -> LoanResult<()> {
        if self.limits.min_years == 0 {
            return Err(LoanError::Configuration(
                "min_years must be at least 1".to_string(),
            ));
        }
        if self.limits.min_years > self.limits.max_years {
            return Err(LoanError::Configuration(format!(
                "min_years {} exceeds max_years {}",
                self.limits.min_years, self.limits.max_years
            )));
        }
        if self.limits.max_interest_rate < BigDecimal::from(0) {
            return Err(LoanError::Configuration(
                "max_interest_rate cannot be negative".to_string(),
            ));
        }

        let keys = &self.storage_keys;
        if keys.customers == keys.loans
            || keys.customers == keys.payments
            || keys.loans == keys.payments
        {
            return Err(LoanError::Configuration(
                "storage keys must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}
