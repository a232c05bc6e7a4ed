//! Sample-data bootstrap

use chrono::Utc;
use tracing::info;

use crate::traits::*;
use crate::types::*;

const SAMPLE_CUSTOMERS: [(&str, &str); 3] = [
    ("CUST_001", "John Doe"),
    ("CUST_002", "Jane Smith"),
    ("CUST_003", "Bob Johnson"),
];

/// Seed the sample customers if the customer collection is empty
///
/// Returns whether anything was written. Running it again is a no-op.
pub async fn initialize_sample_data<S: RecordStore + ?Sized>(store: &mut S) -> LoanResult<bool> {
    if !store.list_customers().await?.is_empty() {
        return Ok(false);
    }

    let now = Utc::now();
    let customers: Vec<Customer> = SAMPLE_CUSTOMERS
        .iter()
        .map(|(id, name)| Customer {
            customer_id: id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
        .collect();
    store.save_customers(&customers).await?;

    info!(count = customers.len(), "seeded sample customers");
    Ok(true)
}
