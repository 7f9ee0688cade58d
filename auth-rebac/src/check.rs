use crate::{
    error::{AuthzError, Result},
    models::Subject,
    repository::{within_deadline, AuthzStore},
    transaction::{CorrelationId, GettableTransaction, Transaction},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Batch checker resolves a list of transactions for one subject with a
/// single round trip to the store, preserving input order in the results.
pub struct BatchChecker {
    store: Arc<dyn AuthzStore>,
}

impl BatchChecker {
    pub fn new(store: Arc<dyn AuthzStore>) -> Self {
        Self { store }
    }

    pub async fn check(
        &self,
        subject: &Subject,
        transactions: &[Transaction],
        deadline: Instant,
    ) -> Result<Vec<GettableTransaction>> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Checking {} transactions for {}", transactions.len(), subject);
        let decisions =
            within_deadline(deadline, self.store.batch_check(subject, transactions)).await?;

        assemble(transactions, &decisions)
    }
}

/// Join store decisions back onto the submitted transactions by correlation id
pub fn assemble(
    transactions: &[Transaction],
    decisions: &HashMap<CorrelationId, bool>,
) -> Result<Vec<GettableTransaction>> {
    if decisions.len() > transactions.len() {
        warn!(
            "Store returned {} decisions for {} transactions, ignoring extras",
            decisions.len(),
            transactions.len()
        );
    }

    transactions
        .iter()
        .map(|txn| {
            let authorized = decisions.get(&txn.id()).copied().ok_or_else(|| {
                AuthzError::Internal(format!(
                    "store returned no decision for transaction {} ({} on {})",
                    txn.id(),
                    txn.relation(),
                    txn.object()
                ))
            })?;

            Ok(GettableTransaction {
                relation: txn.relation(),
                object: txn.object().clone(),
                authorized,
            })
        })
        .collect()
}
